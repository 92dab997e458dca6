use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("网络请求失败: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO操作失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    SessionExpired(String),

    #[error("响应解析失败: {0}")]
    InvalidResponse(String),

    #[error("接口返回错误: {1}")]
    Api(i64, String),
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        Self::InvalidResponse(e.to_string())
    }
}
