pub mod api {
    pub mod models {
        pub mod auth;
        pub mod common;
        pub mod user;
    }
    pub mod client;
    pub mod error;
}

pub mod config;
pub mod error_handler;
pub mod events;
pub mod logger;
pub mod token;
pub mod utils;
