use serde::de::DeserializeOwned;
use serde_derive::Serialize;
use serde_json::Value;

use crate::common::error_handler::ErrorKind;

/// 业务成功的 code 哨兵值
pub const SUCCESS_CODES: [i64; 2] = [0, 200];

/// 触发强制登出的 code 哨兵值
pub const EXPIRED_CODES: [i64; 2] = [401, 403];

pub const DEFAULT_EXPIRED_MESSAGE: &str = "登录已过期，请重新登录";

const DEFAULT_FAILURE_MESSAGE: &str = "请求失败";

/// 后端信封 { code, msg, data } 的归一化结果
#[derive(Debug)]
pub enum Unwrapped<T> {
    /// code 缺省或命中成功哨兵，data 已提取
    Success {
        data: T,
        code: Option<i64>,
        message: Option<String>,
    },

    /// 业务失败，msg 即用户可见信息
    Failure { code: i64, message: String },

    /// 401/403，会话已过期
    Expired { message: String },

    /// 信封本身可读，但 data 与目标结构不匹配
    Decode { message: String },
}

/// 按信封格式归一化一个 2xx 响应体
///
/// data 缺省或为 null 时退回整个响应体（与原接口语义一致）
pub fn unwrap_envelope<T: DeserializeOwned>(body: Value) -> Unwrapped<T> {
    let code = body.get("code").and_then(Value::as_i64);
    let msg = body
        .get("msg")
        .and_then(Value::as_str)
        .map(str::to_string);

    if let Some(c) = code {
        if EXPIRED_CODES.contains(&c) {
            return Unwrapped::Expired {
                message: msg.unwrap_or_else(|| DEFAULT_EXPIRED_MESSAGE.to_string()),
            };
        }
        if !SUCCESS_CODES.contains(&c) {
            return Unwrapped::Failure {
                code: c,
                message: msg.unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string()),
            };
        }
    }

    let payload = match body.get("data") {
        Some(d) if !d.is_null() => d.clone(),
        _ => body,
    };

    match serde_json::from_value::<T>(payload) {
        Ok(data) => Unwrapped::Success {
            data,
            code,
            message: msg,
        },
        Err(e) => Unwrapped::Decode {
            message: format!("响应解析失败: {}", e),
        },
    }
}

/// 所有客户端调用的统一返回结构
#[derive(Debug, Clone, Serialize)]
pub struct ApiResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub code: Option<i64>,

    /// 失败时的错误分类，成功时为 None
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
}

impl<T> ApiResult<T> {
    pub fn ok(data: T, code: Option<i64>, message: Option<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message,
            code,
            kind: None,
        }
    }

    pub fn err(code: Option<i64>, message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
            code,
            kind: Some(kind),
        }
    }
}
