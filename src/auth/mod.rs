mod errors;
mod platform;

pub use errors::{AuthError, Result};
pub use platform::{PlatformAuth, StaticPlatformAuth, UnsupportedPlatformAuth};

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use crate::common::api::client::MiniClient;
use crate::common::api::error::ApiError;
use crate::common::api::models::auth::{
    LOGIN_TYPE_OPENID, LOGIN_TYPE_PHONE, UpdateUserRequest, WxLoginRequest, WxLoginResponse,
};
use crate::common::api::models::user::User;

pub const WX_MINI_LOGIN: &str = "/auth/wxMiniLogin";
pub const GET_MINI_APP_USER: &str = "/client/wxStudentBind/getMiniAppUser";
pub const UPDATE_MINI_APP_USER: &str = "/client/wxStudentBind/updateMiniAppUser";

/// 认证相关 API
#[derive(Debug, Clone)]
pub struct AuthApi {
    client: Arc<MiniClient>,
}

impl AuthApi {
    pub fn new(client: Arc<MiniClient>) -> Self {
        Self { client }
    }

    /// 微信小程序登录，成功后自动存储 token
    pub async fn wx_login(&self, req: &WxLoginRequest) -> Result<WxLoginResponse> {
        let body = serde_json::to_value(req).map_err(ApiError::from)?;
        let resp = self.client.post::<WxLoginResponse>(WX_MINI_LOGIN, body).await?;

        if resp.success {
            if let Some(data) = resp.data {
                self.client.token_store().set(&data.token)?;
                return Ok(data);
            }
        }
        Err(AuthError::Failed(
            resp.message.unwrap_or_else(|| "登录失败".to_string()),
        ))
    }

    /// 手机号码授权登录，两步交换
    ///
    /// 第一步用手机号 code 换取会话，第二步静默换取 openid；
    /// 第二步失败只记录，不影响主流程
    pub async fn phone_login(
        &self,
        phone_code: &str,
        platform: &dyn PlatformAuth,
    ) -> Result<WxLoginResponse> {
        let app_id = self.client.app_id().to_string();
        if app_id.is_empty() {
            return Err(AuthError::MissingAppId);
        }

        let user_data = self
            .wx_login(&WxLoginRequest {
                app_id: app_id.clone(),
                code: phone_code.to_string(),
                login_type: LOGIN_TYPE_PHONE,
                id: None,
            })
            .await?;

        match platform.login_code().await {
            Ok(code) => {
                let openid_req = WxLoginRequest {
                    app_id,
                    code,
                    login_type: LOGIN_TYPE_OPENID,
                    id: Some(user_data.id),
                };
                if let Err(e) = self.wx_login(&openid_req).await {
                    warn!("获取 openid 失败（不影响登录）: {}", e);
                }
            }
            Err(e) => warn!("获取平台登录 code 失败（不影响登录）: {}", e),
        }

        info!("登录成功: id={}", user_data.id);
        Ok(user_data)
    }

    /// 退出登录，只清除本地 token
    pub fn logout(&self) -> Result<()> {
        self.client.token_store().remove()?;
        Ok(())
    }

    /// 检查登录状态
    pub fn is_logged_in(&self) -> bool {
        self.client.token_store().has()
    }

    /// 获取小程序用户信息
    pub async fn get_mini_app_user(&self) -> Result<User> {
        let app_id = self.client.app_id().to_string();
        if app_id.is_empty() {
            return Err(AuthError::MissingAppId);
        }

        let resp = self
            .client
            .get::<User>(GET_MINI_APP_USER, &[("appId", app_id.as_str())])
            .await?;

        if resp.success {
            if let Some(user) = resp.data {
                return Ok(user);
            }
        }
        Err(AuthError::Failed(
            resp.message.unwrap_or_else(|| "获取用户信息失败".to_string()),
        ))
    }

    /// 更新小程序用户信息，返回后端的不透明字符串
    pub async fn update_mini_app_user(&self, req: &UpdateUserRequest) -> Result<String> {
        let body = serde_json::to_value(req).map_err(ApiError::from)?;
        let resp = self.client.post::<Value>(UPDATE_MINI_APP_USER, body).await?;

        if resp.success {
            let data = resp
                .data
                .map(|v| match v {
                    Value::String(s) => s,
                    other => other.to_string(),
                })
                .unwrap_or_default();
            return Ok(data);
        }
        Err(AuthError::Failed(
            resp.message.unwrap_or_else(|| "更新用户信息失败".to_string()),
        ))
    }
}
