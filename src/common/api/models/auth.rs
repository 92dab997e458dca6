use serde_derive::{Deserialize, Serialize};

/// 登录类型: 1 = 换取手机号, 3 = 换取 openid
pub const LOGIN_TYPE_PHONE: i32 = 1;
pub const LOGIN_TYPE_OPENID: i32 = 3;

/// 微信小程序登录请求体
#[derive(Debug, Clone, Serialize)]
pub struct WxLoginRequest {
    #[serde(rename = "appId")]
    pub app_id: String,

    pub code: String,

    #[serde(rename = "loginType")]
    pub login_type: i32,

    /// loginType = 3 时回传的用户 id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

/// 登录接口返回的会话数据
#[derive(Debug, Clone, Deserialize)]
pub struct WxLoginResponse {
    pub id: i64,

    pub name: String,

    pub phone: String,

    pub token: String,
}

/// 用户信息更新请求体
#[derive(Debug, Clone, Serialize)]
pub struct UpdateUserRequest {
    #[serde(rename = "appId")]
    pub app_id: String,

    #[serde(rename = "nickName")]
    pub nick_name: String,

    #[serde(rename = "avatarUrl")]
    pub avatar_url: String,
}

/// /file/upload 成功后的文件描述
#[derive(Debug, Clone, Deserialize)]
pub struct UploadedFile {
    pub name: String,
    pub url: String,
}
