use serde_derive::Serialize;

/// 错误分类，用于用户可见的提示策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    /// 传输层失败，没有拿到响应
    Network,
    /// 后端返回了非成功 code
    Api,
    /// 响应体与期望结构不匹配
    Decode,
    /// 客户端本地校验失败
    Validation,
    /// 未归类异常
    Unknown,
}

/// 面向展示层的错误描述
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,

    pub kind: ErrorKind,
}

impl ErrorInfo {
    pub fn new(message: impl Into<String>, code: Option<i64>, kind: ErrorKind) -> Self {
        Self {
            message: message.into(),
            code,
            kind,
        }
    }

    /// 表单校验错误
    pub fn validation(field: &str, message: &str) -> Self {
        Self::new(format!("{}: {}", field, message), None, ErrorKind::Validation)
    }
}

/// 常见 HTTP 状态码对应的提示文案
pub fn status_message(status: u16) -> String {
    match status {
        400 => "请求参数错误".to_string(),
        401 => "未授权，请重新登录".to_string(),
        403 => "拒绝访问".to_string(),
        404 => "请求的资源不存在".to_string(),
        405 => "请求方法不允许".to_string(),
        408 => "请求超时".to_string(),
        409 => "请求冲突".to_string(),
        422 => "请求参数验证失败".to_string(),
        429 => "请求过于频繁".to_string(),
        500 => "服务器内部错误".to_string(),
        502 => "网关错误".to_string(),
        503 => "服务不可用".to_string(),
        504 => "网关超时".to_string(),
        other => format!("HTTP {} 错误", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_status_has_fixed_message() {
        assert_eq!(status_message(404), "请求的资源不存在");
        assert_eq!(status_message(500), "服务器内部错误");
    }

    #[test]
    fn unknown_status_falls_back_to_generic() {
        assert_eq!(status_message(418), "HTTP 418 错误");
    }

    #[test]
    fn validation_error_carries_field() {
        let info = ErrorInfo::validation("昵称", "不能为空");
        assert_eq!(info.kind, ErrorKind::Validation);
        assert_eq!(info.message, "昵称: 不能为空");
    }
}
