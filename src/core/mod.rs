pub mod config;
pub mod error;
pub mod logging;
pub mod retry;
pub mod utils;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
