use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::del::DeleteLogic;
use crate::core::journal;
use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id, force } = cmd {
        let pool = DbPool::open_ready(&cfg.database)?;
        let mut store = journal::open(&pool.conn, cfg);

        let Some(target) = store.entries().iter().find(|e| &e.id == id).cloned() else {
            info(format!("No entry with id {} today.", id));
            return Ok(());
        };

        let prompt = format!(
            "Delete {} ({} kcal) recorded at {}? This action is irreversible.",
            target.name,
            target.kcal,
            target.clock_label()
        );
        if !*force && !ask_confirmation(&prompt) {
            info("Operation cancelled.");
            return Ok(());
        }

        match DeleteLogic::apply(&mut store, id) {
            Some(removed) => {
                ttlog_soft(
                    &pool.conn,
                    "del",
                    &removed.id,
                    &format!("{} {} kcal", removed.name, removed.kcal),
                );
                success(format!("Entry {} ({}) has been deleted.", removed.id, removed.name));
            }
            None => info(format!("No entry with id {} today.", id)),
        }
    }

    Ok(())
}
