use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::journal;
use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::formatting::kcal;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Limit { value } = cmd {
        let pool = DbPool::open_ready(&cfg.database)?;
        let mut store = journal::open(&pool.conn, cfg);

        match value {
            Some(v) => {
                let previous = store.daily_limit();
                store.set_daily_limit(*v)?;
                ttlog_soft(
                    &pool.conn,
                    "limit",
                    &store.day().format("%Y-%m-%d").to_string(),
                    &format!("{} -> {}", previous, v),
                );
                success(format!("Daily limit set to {}", kcal(u64::from(*v))));
            }
            None => info(format!(
                "Daily limit for {}: {}",
                store.day().format("%Y-%m-%d"),
                kcal(u64::from(store.daily_limit()))
            )),
        }
    }

    Ok(())
}
