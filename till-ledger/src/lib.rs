//! Till Ledger - 点单台账
//!
//! # 架构概述
//!
//! 单进程、单会话的收银核心：库存、当前订单、结账，以及它的持久化协作者。
//!
//! - **订单** (`orders`): `OrderLedger`, pending order, checkout with rollback
//! - **目录** (`catalog`): JSON item catalog
//! - **销售记录** (`sales`): append-only redb sales log + CSV export
//! - **凭证** (`secrets`): argon2 manager password, first-run password
//! - **报表** (`reports`): period summaries, low stock
//!
//! # 模块结构
//!
//! ```text
//! till-ledger/src/
//! ├── core/          # 配置、状态
//! ├── orders/        # 台账、待结订单、金额
//! ├── catalog/       # 商品目录存储
//! ├── sales/         # 销售日志 (redb)
//! ├── secrets/       # 密码与首次运行口令
//! ├── reports/       # 汇总报表
//! └── utils/         # 日志、文件工具
//! ```

// Audit logging macro - target "audit", written to audit/ log files
#[macro_export]
macro_rules! audit_log {
    ($action:expr, $resource:expr) => {
        ::tracing::info!(
            target: "audit",
            action = %$action,
            resource = %$resource,
            "AUDIT"
        );
    };
    ($action:expr, $resource:expr, $details:expr) => {
        ::tracing::info!(
            target: "audit",
            action = %$action,
            resource = %$resource,
            details = %$details,
            "AUDIT"
        );
    };
}

// Security logging macro - target "security"
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr $(, $key:ident = $value:expr)* $(,)?) => {
        ::tracing::info!(
            target: "security",
            level = $level,
            event = $event
            $(, $key = %$value)*,
            "SECURITY"
        );
    };
}

pub mod catalog;
pub mod core;
pub mod orders;
pub mod reports;
pub mod sales;
pub mod secrets;
pub mod utils;

// Re-export 公共类型
pub use catalog::{CatalogStore, JsonCatalogStore};
pub use core::{Config, TillState};
pub use orders::{LedgerError, LedgerResult, OrderLedger};
pub use sales::{SalesLog, SalesStorage};
pub use secrets::{CredentialService, JsonSecretsStore, SecretsStore};
pub use utils::{AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{cleanup_old_logs, init_logger, init_logger_with_file};

/// Create the work dir and start logging
///
/// `.env` must already be loaded, since `config` was read from the environment.
pub fn setup_environment(config: &Config) -> anyhow::Result<()> {
    std::fs::create_dir_all(&config.work_dir)?;

    let log_path = config.log_dir();
    let log_dir = log_path.to_string_lossy();
    let file_dir = config.log_to_file.then_some(&*log_dir);
    init_logger_with_file(&config.log_level, config.log_json, file_dir)?;

    tracing::debug!(
        environment = %config.environment,
        work_dir = %config.work_dir,
        "Environment ready"
    );
    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
 _____ _ _ _
|_   _(_) | |
  | |  _| | |
  | | | | | |
  |_| |_|_|_|  ledger
    "#
    );
}
