use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::{journal, report};
use crate::db::pool::DbPool;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { day, json } = cmd {
        let date = journal::resolve_day(day.as_deref())?;
        let pool = DbPool::open_ready(&cfg.database)?;
        let state = journal::load(&pool.conn, cfg, date);

        if *json {
            println!("{}", serde_json::to_string_pretty(&state)?);
        } else {
            print!("{}", report::render_day(date, &state));
        }
    }

    Ok(())
}
