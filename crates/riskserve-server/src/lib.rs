pub mod app;
pub mod cli;
pub mod config;
pub mod pages;
pub mod routes;
pub mod state;

pub use app::{build_app, run_server};
pub use config::ServerConfig;
pub use state::AppState;
