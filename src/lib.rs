pub mod auth;
pub mod common;
pub mod store;

pub use common::api::client::MiniClient;
pub use common::api::models::common::ApiResult;
pub use common::config::ApiConfig;
pub use common::events::ClientEvent;
pub use store::UserStore;
