use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::add::{AddLogic, AddRequest};
use crate::core::journal;
use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::formatting::kcal as fmt_kcal;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        name,
        kcal,
        protein,
        carbs,
        fat,
        description,
        details,
    } = cmd
    {
        let req = AddRequest {
            name,
            kcal,
            protein: *protein,
            carbs: *carbs,
            fat: *fat,
            description: description.as_deref(),
            details: details.as_deref(),
        };

        let pool = DbPool::open_ready(&cfg.database)?;
        let mut store = journal::open(&pool.conn, cfg);
        let entry = AddLogic::apply(&mut store, &req)?;

        ttlog_soft(
            &pool.conn,
            "add",
            &entry.id,
            &format!("{} {} kcal", entry.name, entry.kcal),
        );

        success(format!(
            "Added {} ({}) at {}, id {}",
            entry.name,
            fmt_kcal(u64::from(entry.kcal)),
            entry.clock_label(),
            entry.id
        ));
        println!(
            "Today: {} / {}",
            fmt_kcal(store.total_kcal()),
            fmt_kcal(u64::from(store.daily_limit()))
        );
    }

    Ok(())
}
