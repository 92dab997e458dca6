use std::sync::Arc;

use clap::Parser;
use tracing::debug;

use miniapp_client::auth::{PlatformAuth, Result, StaticPlatformAuth, UnsupportedPlatformAuth};
use miniapp_client::common::api::client::MiniClient;
use miniapp_client::common::api::models::user::User;
use miniapp_client::common::config::ApiConfig;
use miniapp_client::common::events::{ClientEvent, EventReceiver};
use miniapp_client::common::logger::PrettyLogger;
use miniapp_client::common::token::FileTokenStore;
use miniapp_client::common::utils::mask_phone;
use miniapp_client::store::UserStore;

mod cli;

/// 渲染数据层发出的 UI 事件（toast / 跳转）
async fn render_events(mut events: EventReceiver) {
    while let Some(event) = events.recv().await {
        match event {
            ClientEvent::Toast { message, .. } => PrettyLogger::toast(message),
            ClientEvent::RedirectToLogin { target, .. } => {
                PrettyLogger::warning(format!("会话失效，请到登录入口重新登录: {}", target));
            }
        }
    }
}

fn show_user(user: &User) {
    PrettyLogger::separator();
    PrettyLogger::user_status(&user.name, mask_phone(&user.phone));
    if let Some(nick_name) = &user.nick_name {
        PrettyLogger::info(format!("昵称: {}", nick_name));
    }
    if let Some(avatar_url) = &user.avatar_url {
        PrettyLogger::info(format!("头像: {}", avatar_url));
    }
    PrettyLogger::separator();
}

async fn run(command: cli::Command, store: &UserStore, client: &MiniClient) -> Result<()> {
    match command {
        cli::Command::Login { code, .. } => {
            let user = store.wx_login(&code).await?;
            PrettyLogger::success(format!("登录成功: {}", user.name));

            // 登录成功后拉取完整信息，失败不影响登录结果
            match store.fetch_user_info().await {
                Ok(user) => show_user(&user),
                Err(e) => debug!("获取用户信息失败: {}", e),
            }
        }
        cli::Command::Status => {
            if store.check_login_status() {
                PrettyLogger::user_status("已登录", "本地存有有效 token");
            } else {
                PrettyLogger::user_status("未登录", "请先执行 login");
            }
        }
        cli::Command::Info => {
            if !store.check_login_status() {
                PrettyLogger::warning("未登录，请先执行 login");
                return Ok(());
            }
            let user = store.fetch_user_info().await?;
            show_user(&user);
        }
        cli::Command::Update {
            nickname,
            avatar_url,
        } => {
            store.update_user_profile(&nickname, &avatar_url).await?;
            PrettyLogger::success("用户信息已更新");
        }
        cli::Command::Upload { file } => {
            let uploaded = client.upload_file(&file).await?;
            PrettyLogger::success(format!("上传成功: {} -> {}", uploaded.name, uploaded.url));
        }
        cli::Command::Logout => {
            store.logout()?;
            PrettyLogger::success("已退出登录");
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args = cli::Cli::parse();
    let config = ApiConfig::from_env();
    debug!("后端地址: {}", config.base_url);

    let token_store = Arc::new(FileTokenStore::new(args.storage_dir.join("storage.json")));
    let (client, events) = MiniClient::new(&config, token_store)?;
    let client = Arc::new(client);

    let events_task = tokio::spawn(render_events(events));

    // 登录命令带 openid code 时才具备静默登录能力
    let platform: Arc<dyn PlatformAuth> = match &args.command {
        cli::Command::Login {
            openid_code: Some(code),
            ..
        } => Arc::new(StaticPlatformAuth::new(code.as_str())),
        _ => Arc::new(UnsupportedPlatformAuth),
    };
    let store = UserStore::new(Arc::clone(&client), platform);

    let outcome = run(args.command, &store, &client).await;

    if let Err(e) = &outcome {
        let info = e.error_info();
        PrettyLogger::error(&info.message);
        debug!("错误分类: {:?} code: {:?}", info.kind, info.code);
    }

    // 丢掉所有发送端，等事件（包括延迟的跳转提示）渲染完
    drop(store);
    drop(client);
    let _ = events_task.await;

    if outcome.is_err() {
        std::process::exit(1);
    }
    Ok(())
}
