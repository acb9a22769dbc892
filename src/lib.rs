pub mod actions;
pub mod app;
pub mod auth;
pub mod board;
pub mod checkins;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod reflections;
pub mod resolver;
pub mod seeder;
pub mod state;
pub mod stats;
pub mod storage;
pub mod store;
pub mod streak;
pub mod ui;

#[cfg(test)]
mod testing;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::{LocalStore, Schema};
pub use store::RowStore;
