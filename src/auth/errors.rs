use thiserror::Error;

use crate::common::api::error::ApiError;
use crate::common::error_handler::{ErrorInfo, ErrorKind};
use crate::common::token::TokenError;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("缺少 appId 配置")]
    MissingAppId,

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("token 存储失败: {0}")]
    Token(#[from] TokenError),

    /// 后端返回了失败结果（携带 msg 或默认文案）
    #[error("{0}")]
    Failed(String),

    /// 平台侧静默登录失败
    #[error("平台登录失败: {0}")]
    Platform(String),

    /// 客户端本地校验失败
    #[error("{0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, AuthError>;

impl AuthError {
    /// 转成面向展示层的错误描述
    pub fn error_info(&self) -> ErrorInfo {
        match self {
            AuthError::MissingAppId | AuthError::Validation(_) => {
                ErrorInfo::new(self.to_string(), None, ErrorKind::Validation)
            }
            AuthError::Api(ApiError::Reqwest(_)) | AuthError::Api(ApiError::Io(_)) => {
                ErrorInfo::new(self.to_string(), None, ErrorKind::Network)
            }
            AuthError::Api(ApiError::SessionExpired(message)) => {
                ErrorInfo::new(message.clone(), Some(401), ErrorKind::Api)
            }
            AuthError::Api(ApiError::InvalidResponse(_)) => {
                ErrorInfo::new(self.to_string(), None, ErrorKind::Decode)
            }
            AuthError::Api(ApiError::Api(code, message)) => {
                ErrorInfo::new(message.clone(), Some(*code), ErrorKind::Api)
            }
            AuthError::Failed(_) | AuthError::Platform(_) => {
                ErrorInfo::new(self.to_string(), None, ErrorKind::Api)
            }
            AuthError::Token(_) => ErrorInfo::new(self.to_string(), None, ErrorKind::Unknown),
        }
    }
}
