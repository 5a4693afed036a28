pub mod app;
pub mod common;
pub mod config;
pub mod error;
pub mod map;
pub mod pipeline;

pub use error::AppError;
