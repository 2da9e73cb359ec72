use shared::models::SummaryPeriod;
use till_ledger::{Config, TillState, print_banner, reports, setup_environment};

fn main() -> anyhow::Result<()> {
    // 1. .env 需在读取配置前加载
    dotenv::dotenv().ok();
    let config = Config::from_env();

    // 2. 工作目录与日志
    setup_environment(&config)?;
    print_banner();
    tracing::info!("Till ledger starting...");

    // 3. 打开目录、销售日志与凭证
    let state = TillState::initialize(&config)?;

    // 4. 首次运行：生成管理员密码，仅显示一次
    if state.credentials.ensure_initialized()? {
        tracing::info!("Manager password generated");
    }
    if let Some(password) = state.credentials.consume_first_run_password()? {
        println!("First-run manager password (shown once): {password}");
    }

    // 5. 启动报告
    for low in state.ledger.low_stock_items(config.low_stock_threshold) {
        tracing::warn!(item = %low.item, quantity = low.quantity, "Low stock");
    }
    let today = reports::sales_summary(
        state.ledger.sales_log(),
        SummaryPeriod::Daily,
        chrono::Utc::now(),
    )?;
    tracing::info!(
        income = %today.total_income,
        items = today.total_items,
        orders = today.orders_count,
        "Today's sales"
    );

    Ok(())
}
