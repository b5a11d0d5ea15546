rust_i18n::i18n!("locales", fallback = "fr");

pub mod cli;
pub mod config;
pub mod middleware;
pub mod observability;
pub mod routes;
pub mod template;
pub mod visitor;

pub use config::Config;
pub use routes::AppState;
