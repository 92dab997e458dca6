use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, ClientBuilder, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::common::api::error::ApiError;
use crate::common::api::models::auth::UploadedFile;
use crate::common::api::models::common::{ApiResult, Unwrapped, unwrap_envelope};
use crate::common::config::ApiConfig;
use crate::common::error_handler::{ErrorKind, status_message};
use crate::common::events::{
    self, ClientEvent, EventReceiver, EventSender, LOGIN_PAGE, REDIRECT_DELAY_MS,
    TOAST_DURATION_MS,
};
use crate::common::token::TokenStore;

const NETWORK_FAILURE_MESSAGE: &str = "网络连接失败，请检查网络设置";
const TIMEOUT_MESSAGE: &str = "请求超时，请稍后重试";
const UNAUTHORIZED_MESSAGE: &str = "未授权，请先登录";

/// 自动携带认证状态的客户端
///
/// 所有后端调用走同一条请求路径: 注入 Bearer token、
/// 归一化信封、识别会话过期并发出跳转事件
#[derive(Debug, Clone)]
pub struct MiniClient {
    inner: Client,
    base_url: String,
    app_id: String,
    timeout: Duration,
    token_store: Arc<dyn TokenStore>,
    events: EventSender,
}

impl MiniClient {
    /// 创建客户端，同时返回 UI 事件的消费端
    pub fn new(
        config: &ApiConfig,
        token_store: Arc<dyn TokenStore>,
    ) -> Result<(Self, EventReceiver), ApiError> {
        let timeout = Duration::from_millis(config.timeout_ms);
        let inner = ClientBuilder::new().timeout(timeout).build()?;
        let (tx, rx) = events::channel();

        Ok((
            Self {
                inner,
                base_url: config.base_url.clone(),
                app_id: config.app_id.clone(),
                timeout,
                token_store,
                events: tx,
            },
            rx,
        ))
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token_store(&self) -> &Arc<dyn TokenStore> {
        &self.token_store
    }

    /// 发出一条短暂提示事件，消费端不在时静默丢弃
    pub fn notify(&self, message: impl Into<String>) {
        let _ = self.events.send(ClientEvent::Toast {
            message: message.into(),
            duration_ms: TOAST_DURATION_MS,
        });
    }

    /// 通用请求入口
    ///
    /// 普通失败一律返回带标记的失败结果，只有会话过期返回 Err，
    /// 让链式调用方的控制流被打断
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        query: Option<&[(&str, &str)]>,
        timeout: Option<Duration>,
    ) -> Result<ApiResult<T>, ApiError> {
        let url = format!("{}{}", self.base_url, path);

        let mut builder = self
            .inner
            .request(method, &url)
            .timeout(timeout.unwrap_or(self.timeout));
        if let Some(query) = query {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = builder.json(&body);
        }
        if let Some(token) = self.token_store.get() {
            builder = builder.bearer_auth(token);
        }

        let resp = match builder.send().await {
            Ok(resp) => resp,
            Err(e) => {
                error!("请求失败: {} {}", url, e);
                let message = if e.is_timeout() {
                    TIMEOUT_MESSAGE
                } else {
                    NETWORK_FAILURE_MESSAGE
                };
                self.notify(message);
                return Ok(ApiResult::err(None, message, ErrorKind::Network));
            }
        };

        self.handle_response(resp).await
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<ApiResult<T>, ApiError> {
        self.request(Method::GET, path, None, Some(query), None).await
    }

    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Value,
    ) -> Result<ApiResult<T>, ApiError> {
        self.request(Method::POST, path, Some(body), None, None).await
    }

    pub async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Value,
    ) -> Result<ApiResult<T>, ApiError> {
        self.request(Method::PUT, path, Some(body), None, None).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<ApiResult<T>, ApiError> {
        self.request(Method::DELETE, path, None, None, None).await
    }

    /// 处理响应
    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: Response,
    ) -> Result<ApiResult<T>, ApiError> {
        let status = resp.status();
        let url = resp.url().to_string();

        // 传输层 401 与业务 401 同样处理
        if status == StatusCode::UNAUTHORIZED {
            self.session_expired(UNAUTHORIZED_MESSAGE);
            return Err(ApiError::SessionExpired(UNAUTHORIZED_MESSAGE.to_string()));
        }

        let text = match resp.text().await {
            Ok(text) => text,
            Err(e) => {
                error!("读取响应失败: {} {}", url, e);
                self.notify(NETWORK_FAILURE_MESSAGE);
                return Ok(ApiResult::err(None, NETWORK_FAILURE_MESSAGE, ErrorKind::Network));
            }
        };

        if !status.is_success() {
            // 优先取响应体里的 msg，取不到再查状态码表
            let detail = serde_json::from_str::<Value>(&text)
                .ok()
                .and_then(|v| {
                    v.get("msg")
                        .or_else(|| v.get("message"))
                        .and_then(Value::as_str)
                        .map(str::to_string)
                })
                .unwrap_or_else(|| status_message(status.as_u16()));
            let message = format!("HTTP {}: {}", status.as_u16(), detail);
            self.notify(&message);
            return Ok(ApiResult::err(
                Some(i64::from(status.as_u16())),
                message,
                ErrorKind::Api,
            ));
        }

        let body: Value = match serde_json::from_str(&text) {
            Ok(body) => body,
            Err(e) => {
                error!("响应不是合法 JSON: {} {}", url, e);
                let message = format!("响应解析失败: {}", e);
                self.notify(&message);
                return Ok(ApiResult::err(
                    Some(i64::from(status.as_u16())),
                    message,
                    ErrorKind::Decode,
                ));
            }
        };

        debug!("响应体: {}", body);

        match unwrap_envelope::<T>(body) {
            Unwrapped::Success {
                data,
                code,
                message,
            } => Ok(ApiResult::ok(
                data,
                code.or_else(|| Some(i64::from(status.as_u16()))),
                message,
            )),
            Unwrapped::Failure { code, message } => {
                self.notify(&message);
                Ok(ApiResult::err(Some(code), message, ErrorKind::Api))
            }
            Unwrapped::Expired { message } => {
                self.session_expired(&message);
                Err(ApiError::SessionExpired(message))
            }
            Unwrapped::Decode { message } => {
                error!(
                    "结构匹配失败: {} 期望的结构可能是: {}",
                    message,
                    std::any::type_name::<T>()
                );
                self.notify(&message);
                Ok(ApiResult::err(
                    Some(i64::from(status.as_u16())),
                    message,
                    ErrorKind::Decode,
                ))
            }
        }
    }

    /// 会话过期: 清除 token，提示用户，延迟跳转登录入口页
    ///
    /// 跳转是定时器触发的事件，调用方不等待导航完成
    fn session_expired(&self, message: &str) {
        if let Err(e) = self.token_store.remove() {
            warn!("清除 token 失败: {}", e);
        }

        let _ = self.events.send(ClientEvent::Toast {
            message: message.to_string(),
            duration_ms: TOAST_DURATION_MS,
        });

        let events = self.events.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(REDIRECT_DELAY_MS)).await;
            let _ = events.send(ClientEvent::RedirectToLogin {
                target: LOGIN_PAGE.to_string(),
                delay_ms: REDIRECT_DELAY_MS,
            });
        });
    }

    /// 上传文件到 /file/upload（multipart，携带 Bearer token）
    pub async fn upload_file(&self, path: &Path) -> Result<UploadedFile, ApiError> {
        let url = format!("{}/file/upload", self.base_url);
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("file")
            .to_string();

        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
        let form = reqwest::multipart::Form::new().part("file", part);

        let mut builder = self.inner.post(&url).multipart(form).timeout(self.timeout);
        if let Some(token) = self.token_store.get() {
            builder = builder.bearer_auth(token);
        }

        let resp = builder.send().await?;
        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED {
            self.session_expired(UNAUTHORIZED_MESSAGE);
            return Err(ApiError::SessionExpired(UNAUTHORIZED_MESSAGE.to_string()));
        }
        if !status.is_success() {
            let message = status_message(status.as_u16());
            self.notify(&message);
            return Err(ApiError::Api(i64::from(status.as_u16()), message));
        }

        let body: Value = serde_json::from_str(&resp.text().await?)?;
        match unwrap_envelope::<UploadedFile>(body) {
            Unwrapped::Success { data, .. } => Ok(data),
            Unwrapped::Expired { message } => {
                self.session_expired(&message);
                Err(ApiError::SessionExpired(message))
            }
            Unwrapped::Failure { code, message } => {
                self.notify(&message);
                Err(ApiError::Api(code, message))
            }
            Unwrapped::Decode { message } => Err(ApiError::InvalidResponse(message)),
        }
    }
}
