use crate::catalog::JsonCatalogStore;
use crate::core::Config;
use crate::orders::OrderLedger;
use crate::sales::SalesStorage;
use crate::secrets::{CredentialService, JsonSecretsStore};
use anyhow::Context;

/// Everything a till session needs, opened from one work dir
///
/// 单会话进程：state 由调用方独占持有，不做并发保护
pub struct TillState {
    pub config: Config,
    pub ledger: OrderLedger,
    pub credentials: CredentialService,
}

impl TillState {
    /// Open the catalog, sales log and secrets under `config.work_dir`
    ///
    /// Creates the work dir if needed. The catalog may be missing (empty
    /// inventory); an unreadable sales database is fatal.
    pub fn initialize(config: &Config) -> anyhow::Result<Self> {
        std::fs::create_dir_all(&config.work_dir)
            .with_context(|| format!("Failed to create work dir {}", config.work_dir))?;

        let sales_path = config.sales_db_path();
        let sales = SalesStorage::open(&sales_path)
            .with_context(|| format!("Failed to open sales log {}", sales_path.display()))?;

        let catalog = JsonCatalogStore::new(config.catalog_path());
        let ledger = OrderLedger::open(Box::new(catalog), Box::new(sales));

        let secrets = JsonSecretsStore::new(config.secrets_path());
        let credentials = CredentialService::new(Box::new(secrets));

        tracing::info!(
            work_dir = %config.work_dir,
            items = ledger.inventory().len(),
            "Till state initialized"
        );

        Ok(Self {
            config: config.clone(),
            ledger,
            credentials,
        })
    }
}
