use config::Config;
use sqlx::PgPool;

pub mod common;
pub mod config;
pub mod error;
pub mod mailer;
pub mod middleware;
pub mod utils;

pub mod routes;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Config,
    pub http: reqwest::Client,
}
