use std::sync::{Arc, Mutex};

use crate::auth::{AuthApi, AuthError, PlatformAuth, Result};
use crate::common::api::client::MiniClient;
use crate::common::api::models::auth::UpdateUserRequest;
use crate::common::api::models::user::User;

/// 会话状态
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserState {
    pub user: Option<User>,
    pub is_logged_in: bool,
    pub loading: bool,
    pub error: Option<String>,
}

/// 用户信息的局部更新，只合并 Some 的字段
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub nick_name: Option<String>,
    pub avatar_url: Option<String>,
    pub token: Option<String>,
}

/// 状态机的全部迁移
#[derive(Debug, Clone, PartialEq)]
pub enum UserAction {
    LoginStart,
    LoginSuccess(User),
    LoginFailure(String),
    Logout,
    UpdateUser(UserPatch),
    ClearError,
}

/// 纯函数 reducer，每次迁移整体替换状态
pub fn reduce(state: &UserState, action: UserAction) -> UserState {
    match action {
        UserAction::LoginStart => UserState {
            loading: true,
            error: None,
            ..state.clone()
        },
        UserAction::LoginSuccess(user) => UserState {
            user: Some(user),
            is_logged_in: true,
            loading: false,
            error: None,
        },
        UserAction::LoginFailure(message) => UserState {
            loading: false,
            error: Some(message),
            ..state.clone()
        },
        UserAction::Logout => UserState {
            user: None,
            is_logged_in: false,
            error: None,
            // loading 保持原样
            loading: state.loading,
        },
        UserAction::UpdateUser(patch) => {
            let Some(user) = state.user.as_ref() else {
                // 没有用户时局部更新是空操作
                return state.clone();
            };
            let mut user = user.clone();
            if let Some(name) = patch.name {
                user.name = name;
            }
            if let Some(phone) = patch.phone {
                user.phone = phone;
            }
            if let Some(nick_name) = patch.nick_name {
                user.nick_name = Some(nick_name);
            }
            if let Some(avatar_url) = patch.avatar_url {
                user.avatar_url = Some(avatar_url);
            }
            if let Some(token) = patch.token {
                user.token = Some(token);
            }
            UserState {
                user: Some(user),
                ..state.clone()
            }
        }
        UserAction::ClearError => UserState {
            error: None,
            ..state.clone()
        },
    }
}

/// 用户会话容器
///
/// 显式持有并注入，不做全局单例；所有状态变化都经由 reducer
pub struct UserStore {
    state: Mutex<UserState>,
    api: AuthApi,
    client: Arc<MiniClient>,
    platform: Arc<dyn PlatformAuth>,
}

impl UserStore {
    pub fn new(client: Arc<MiniClient>, platform: Arc<dyn PlatformAuth>) -> Self {
        Self {
            state: Mutex::new(UserState::default()),
            api: AuthApi::new(Arc::clone(&client)),
            client,
            platform,
        }
    }

    /// 当前状态快照
    pub fn state(&self) -> UserState {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn dispatch(&self, action: UserAction) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        *state = reduce(&state, action);
    }

    /// 微信手机号码登录（传入 getPhoneNumber 返回的 code）
    pub async fn wx_login(&self, phone_code: &str) -> Result<User> {
        self.dispatch(UserAction::LoginStart);

        match self.api.phone_login(phone_code, self.platform.as_ref()).await {
            Ok(data) => {
                let user = User {
                    id: data.id,
                    name: data.name,
                    phone: data.phone,
                    token: Some(data.token),
                    ..User::default()
                };
                self.dispatch(UserAction::LoginSuccess(user.clone()));
                self.client.notify("登录成功");
                Ok(user)
            }
            Err(e) => {
                self.dispatch(UserAction::LoginFailure(e.to_string()));
                Err(e)
            }
        }
    }

    /// 检查登录状态：只看本地 token，不改状态也不拉取用户
    pub fn check_login_status(&self) -> bool {
        self.api.is_logged_in()
    }

    /// 获取用户完整信息（重启后恢复会话的路径）
    pub async fn fetch_user_info(&self) -> Result<User> {
        let user = self.api.get_mini_app_user().await?;
        self.dispatch(UserAction::LoginSuccess(user.clone()));
        Ok(user)
    }

    /// 更新头像和昵称
    pub async fn update_user_profile(&self, nick_name: &str, avatar_url: &str) -> Result<()> {
        if nick_name.trim().is_empty() {
            return Err(AuthError::Validation("请输入昵称".to_string()));
        }

        let req = UpdateUserRequest {
            app_id: self.client.app_id().to_string(),
            nick_name: nick_name.to_string(),
            avatar_url: avatar_url.to_string(),
        };
        self.api.update_mini_app_user(&req).await?;

        self.dispatch(UserAction::UpdateUser(UserPatch {
            nick_name: Some(nick_name.to_string()),
            avatar_url: Some(avatar_url.to_string()),
            ..UserPatch::default()
        }));
        self.client.notify("更新成功");
        Ok(())
    }

    /// 退出登录
    pub fn logout(&self) -> Result<()> {
        self.api.logout()?;
        self.dispatch(UserAction::Logout);
        self.client.notify("已退出登录");
        Ok(())
    }

    /// 局部更新用户信息
    pub fn update_user(&self, patch: UserPatch) {
        self.dispatch(UserAction::UpdateUser(patch));
    }

    /// 清除错误
    pub fn clear_error(&self) {
        self.dispatch(UserAction::ClearError);
    }
}
