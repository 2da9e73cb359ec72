//! 工具模块 - 日志与文件工具
//!
//! - [`logger`] - tracing subscriber setup
//! - [`fs`] - atomic file replacement used by the JSON stores

pub mod fs;
pub mod logger;

pub use shared::error::{AppError, AppResult, ErrorCategory, ErrorCode};
