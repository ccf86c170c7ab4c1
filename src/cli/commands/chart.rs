use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::{journal, report};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::ChartData;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Chart { day } = cmd {
        let date = journal::resolve_day(day.as_deref())?;
        let pool = DbPool::open_ready(&cfg.database)?;
        let state = journal::load(&pool.conn, cfg, date);

        print!("{}", report::render_chart(date, &ChartData::from_state(&state)));
    }

    Ok(())
}
