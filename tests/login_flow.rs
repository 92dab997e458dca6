//! 会话容器的端到端流程测试（wiremock 模拟后端）
//!
//! 覆盖: 手机号登录两步交换、openid 失败静默、会话恢复、
//! 资料更新合并、本地校验、登出与登录状态检查


use std::sync::Arc;

use fixtures::{TEST_APP_ID, build_client};
use miniapp_client::auth::{
    AuthError, PlatformAuth, StaticPlatformAuth, UnsupportedPlatformAuth,
};
use miniapp_client::common::api::models::user::User;
use miniapp_client::common::token::{MemoryTokenStore, TokenStore};
use miniapp_client::store::{UserAction, UserStore};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LOGIN_PATH: &str = "/auth/wxMiniLogin";
const USER_PATH: &str = "/client/wxStudentBind/getMiniAppUser";
const UPDATE_PATH: &str = "/client/wxStudentBind/updateMiniAppUser";

fn login_envelope(token: &str) -> serde_json::Value {
    json!({
        "code": 0,
        "msg": null,
        "data": { "id": 1, "name": "A", "phone": "13800000000", "token": token }
    })
}

fn make_store(
    server: &MockServer,
    token_store: Arc<MemoryTokenStore>,
    platform: Arc<dyn PlatformAuth>,
) -> UserStore {
    let (client, _events) = build_client(&server.uri(), token_store);
    UserStore::new(client, platform)
}

#[tokio::test]
async fn phone_login_persists_token_and_updates_state() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_envelope("T1")))
        .mount(&server)
        .await;

    let token_store = Arc::new(MemoryTokenStore::new());
    let store = make_store(
        &server,
        Arc::clone(&token_store),
        Arc::new(UnsupportedPlatformAuth),
    );

    let user = store.wx_login("abc").await.unwrap();
    assert_eq!(user.id, 1);

    let state = store.state();
    assert!(state.is_logged_in);
    assert!(!state.loading);
    assert!(state.error.is_none());
    assert_eq!(state.user.unwrap().id, 1);

    // token 已落入存储
    assert_eq!(token_store.get(), Some("T1".to_string()));

    // 平台不支持静默登录，只应有一次登录请求
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn openid_exchange_carries_user_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_envelope("T1")))
        .expect(2)
        .mount(&server)
        .await;

    let token_store = Arc::new(MemoryTokenStore::new());
    let store = make_store(
        &server,
        token_store,
        Arc::new(StaticPlatformAuth::new("wx-openid-code")),
    );

    store.wx_login("abc").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);

    let second: serde_json::Value = serde_json::from_slice(&requests[1].body).unwrap();
    assert_eq!(second["loginType"], 3);
    assert_eq!(second["code"], "wx-openid-code");
    assert_eq!(second["id"], 1);
    assert_eq!(second["appId"], TEST_APP_ID);
}

#[tokio::test]
async fn openid_failure_does_not_fail_login() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .and(body_partial_json(json!({ "loginType": 1 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_envelope("T1")))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .and(body_partial_json(json!({ "loginType": 3 })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "code": 500, "msg": "openid 交换失败", "data": null })),
        )
        .mount(&server)
        .await;

    let token_store = Arc::new(MemoryTokenStore::new());
    let store = make_store(
        &server,
        Arc::clone(&token_store),
        Arc::new(StaticPlatformAuth::new("wx-openid-code")),
    );

    // 第二步失败被吞掉，登录仍然成功
    let user = store.wx_login("abc").await.unwrap();
    assert_eq!(user.id, 1);
    assert!(store.state().is_logged_in);
    assert_eq!(token_store.get(), Some("T1".to_string()));
}

#[tokio::test]
async fn login_failure_dispatches_error_and_propagates() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "code": 500, "msg": "验证码无效", "data": null })),
        )
        .mount(&server)
        .await;

    let token_store = Arc::new(MemoryTokenStore::new());
    let store = make_store(
        &server,
        Arc::clone(&token_store),
        Arc::new(UnsupportedPlatformAuth),
    );

    let err = store.wx_login("bad").await.unwrap_err();
    assert!(matches!(err, AuthError::Failed(_)));

    let state = store.state();
    assert!(!state.is_logged_in);
    assert!(!state.loading);
    assert_eq!(state.error.as_deref(), Some("验证码无效"));
    assert!(token_store.get().is_none());
}

#[tokio::test]
async fn fetch_user_info_rehydrates_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(USER_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "msg": null,
            "data": {
                "id": 1, "name": "A", "phone": "13800000000",
                "nickName": "小明", "avatarUrl": "https://cdn/a.png",
                "appId": TEST_APP_ID, "wxOpenid": "oABC"
            }
        })))
        .mount(&server)
        .await;

    // 存储里有 token 但内存里还没有 user（进程重启后的情形）
    let token_store = Arc::new(MemoryTokenStore::with_token("T1"));
    let store = make_store(&server, token_store, Arc::new(UnsupportedPlatformAuth));
    assert!(store.check_login_status());
    assert!(store.state().user.is_none());

    let user = store.fetch_user_info().await.unwrap();
    assert_eq!(user.nick_name.as_deref(), Some("小明"));

    let state = store.state();
    assert!(state.is_logged_in);
    assert_eq!(state.user.unwrap().wx_openid.as_deref(), Some("oABC"));
}

#[tokio::test]
async fn fetch_user_info_failure_leaves_state_untouched() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(USER_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "code": 500, "msg": "查无此人", "data": null })),
        )
        .mount(&server)
        .await;

    let token_store = Arc::new(MemoryTokenStore::with_token("T1"));
    let store = make_store(&server, token_store, Arc::new(UnsupportedPlatformAuth));

    let before = store.state();
    let err = store.fetch_user_info().await.unwrap_err();
    assert!(matches!(err, AuthError::Failed(_)));
    assert_eq!(store.state(), before);
}

#[tokio::test]
async fn update_profile_merges_into_existing_user() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(UPDATE_PATH))
        .and(body_partial_json(
            json!({ "appId": TEST_APP_ID, "nickName": "小明" }),
        ))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "code": 0, "msg": null, "data": "ok" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let token_store = Arc::new(MemoryTokenStore::with_token("T1"));
    let store = make_store(&server, token_store, Arc::new(UnsupportedPlatformAuth));
    store.dispatch(UserAction::LoginSuccess(User {
        id: 1,
        name: "A".to_string(),
        phone: "13800000000".to_string(),
        ..User::default()
    }));

    store
        .update_user_profile("小明", "https://cdn/new.png")
        .await
        .unwrap();

    let user = store.state().user.unwrap();
    assert_eq!(user.nick_name.as_deref(), Some("小明"));
    assert_eq!(user.avatar_url.as_deref(), Some("https://cdn/new.png"));
    assert_eq!(user.id, 1);
}

#[tokio::test]
async fn update_profile_rejects_empty_nickname_without_request() {
    let server = MockServer::start().await;

    let token_store = Arc::new(MemoryTokenStore::with_token("T1"));
    let store = make_store(&server, token_store, Arc::new(UnsupportedPlatformAuth));

    let before = store.state();
    let err = store.update_user_profile("   ", "").await.unwrap_err();
    assert!(matches!(err, AuthError::Validation(_)));
    assert_eq!(store.state(), before);

    // 校验失败不应触发任何网络请求
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn logout_clears_token_and_state() {
    let server = MockServer::start().await;

    let token_store = Arc::new(MemoryTokenStore::with_token("T1"));
    let store = make_store(
        &server,
        Arc::clone(&token_store),
        Arc::new(UnsupportedPlatformAuth),
    );
    store.dispatch(UserAction::LoginSuccess(User {
        id: 1,
        name: "A".to_string(),
        phone: "13800000000".to_string(),
        ..User::default()
    }));

    store.logout().unwrap();

    assert!(token_store.get().is_none());
    let state = store.state();
    assert!(state.user.is_none());
    assert!(!state.is_logged_in);
}

#[tokio::test]
async fn check_login_status_is_idempotent() {
    let server = MockServer::start().await;

    let token_store = Arc::new(MemoryTokenStore::with_token("T1"));
    let store = make_store(
        &server,
        Arc::clone(&token_store),
        Arc::new(UnsupportedPlatformAuth),
    );

    let before = store.state();
    for _ in 0..3 {
        assert!(store.check_login_status());
    }
    // 只读检查不改状态
    assert_eq!(store.state(), before);

    store.logout().unwrap();
    for _ in 0..3 {
        assert!(!store.check_login_status());
    }
}
