use std::env;

use tracing::warn;
use url::Url;

/// 兜底的后端地址
const DEFAULT_BASE_URL: &str = "http://8.155.61.172:8080";

/// 默认超时时间 30 秒
const DEFAULT_TIMEOUT_MS: u64 = 30000;

/// 单个业务模块的开关配置，核心逻辑不读取，原样透传
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ModuleConfig {
    pub use_mock: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Modules {
    pub auth: ModuleConfig,
    pub student: ModuleConfig,
    pub report: ModuleConfig,
}

/// API 配置
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_ms: u64,
    pub app_id: String,
    pub use_mock: bool,
    pub modules: Modules,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            app_id: String::new(),
            use_mock: false,
            modules: Modules::default(),
        }
    }
}

impl ApiConfig {
    /// 从环境变量读取配置，缺省项用默认值
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(base_url) = env::var("MINIAPP_API_BASE_URL") {
            if Url::parse(&base_url).is_ok() {
                config.base_url = base_url;
            } else {
                warn!("MINIAPP_API_BASE_URL 不是合法 URL，使用默认地址: {}", base_url);
            }
        }

        if let Ok(timeout) = env::var("MINIAPP_TIMEOUT_MS") {
            match timeout.parse::<u64>() {
                Ok(ms) if ms > 0 => config.timeout_ms = ms,
                _ => warn!("MINIAPP_TIMEOUT_MS 非法，使用默认超时: {}", timeout),
            }
        }

        if let Ok(app_id) = env::var("MINIAPP_APP_ID") {
            config.app_id = app_id;
        }

        config
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = app_id.into();
        self
    }
}
