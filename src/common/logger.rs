use colored::*;

/// 漂亮的日志输出工具
pub struct PrettyLogger;

impl PrettyLogger {
    /// 显示成功消息
    pub fn success(message: impl AsRef<str>) {
        println!("{} {}", "✓".green().bold(), message.as_ref());
    }

    /// 显示信息消息
    pub fn info(message: impl AsRef<str>) {
        println!("{} {}", "ℹ".blue().bold(), message.as_ref());
    }

    /// 显示警告消息
    pub fn warning(message: impl AsRef<str>) {
        println!("{} {}", "⚠".yellow().bold(), message.as_ref());
    }

    /// 显示错误消息
    pub fn error(message: impl AsRef<str>) {
        println!("{} {}", "✗".red().bold(), message.as_ref());
    }

    /// 显示短暂提示（对应小程序的 toast）
    pub fn toast(message: impl AsRef<str>) {
        println!("{} {}", "💬".yellow().bold(), message.as_ref());
    }

    /// 显示用户状态
    pub fn user_status(status: impl AsRef<str>, details: impl AsRef<str>) {
        println!(
            "{} {} - {}",
            "👤".green().bold(),
            status.as_ref().bold(),
            details.as_ref()
        );
    }

    /// 显示分割线
    pub fn separator() {
        println!("{}", "─".repeat(50).bright_black());
    }
}
