use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// 小程序后端命令行客户端
#[derive(Parser, Debug)]
#[command(name = "miniapp")]
#[command(version = "0.1.0")]
#[command(about = "微信小程序后端的命令行客户端", long_about = None)]
pub struct Cli {
    /// 本地存储目录（token 落盘位置）
    #[arg(long, value_name = "DIR")]
    #[arg(default_value = ".miniapp")]
    #[arg(value_hint = clap::ValueHint::DirPath)]
    pub storage_dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// 手机号授权登录
    Login {
        /// getPhoneNumber 返回的 code
        #[arg(long, value_name = "CODE")]
        code: String,

        /// 平台静默登录 code（换取 openid 用，可选）
        #[arg(long, value_name = "CODE")]
        openid_code: Option<String>,
    },

    /// 查看登录状态
    Status,

    /// 拉取并显示用户信息
    Info,

    /// 更新昵称和头像
    Update {
        #[arg(long, value_name = "NICKNAME")]
        nickname: String,

        #[arg(long, value_name = "URL", default_value = "")]
        avatar_url: String,
    },

    /// 上传头像文件
    Upload {
        /// 本地文件路径
        #[arg(value_name = "FILE")]
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: PathBuf,
    },

    /// 退出登录
    Logout,
}
