//! 核心模块 - 配置与运行状态
//!
//! - [`Config`] - 环境变量配置
//! - [`TillState`] - ledger + credentials wired to the work dir

pub mod config;
pub mod state;

pub use config::Config;
pub use state::TillState;
