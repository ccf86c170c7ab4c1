use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::{history, report};
use crate::db::SqliteKv;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Days { json } = cmd {
        let pool = DbPool::open_ready(&cfg.database)?;
        let kv = SqliteKv::new(&pool.conn);
        let keys = kv.keys_with_prefix(&format!("{}:", cfg.namespace))?;
        let days = history::summaries(&kv, &keys, &cfg.namespace, cfg.default_daily_limit);

        if *json {
            println!("{}", serde_json::to_string_pretty(&days)?);
        } else {
            print!("{}", report::render_history(&days));
        }
    }

    Ok(())
}
