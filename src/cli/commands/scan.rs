use crate::analyzer::{GroqAnalyzer, ImagePayload};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::journal;
use crate::core::scan::ScanLogic;
use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use crate::utils::formatting::kcal;
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Scan { image, details } = cmd {
        let path = expand_tilde(image);
        let payload = ImagePayload::from_path(&path)?;

        let analyzer = GroqAnalyzer::from_config(&cfg.analyzer)
            .map_err(|e| AppError::Other(format!("cannot build analyzer: {e}")))?;

        let pool = DbPool::open_ready(&cfg.database)?;
        let mut store = journal::open(&pool.conn, cfg);

        println!("🔍 Analyzing {}…", path.display());

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let outcome = runtime.block_on(ScanLogic::apply(
            &mut store,
            &analyzer,
            &payload,
            details.as_deref(),
        ));
        let entry = &outcome.entry;

        ttlog_soft(
            &pool.conn,
            "scan",
            &entry.id,
            &match &outcome.fallback_reason {
                Some(reason) => format!("fallback {} kcal: {}", entry.kcal, reason),
                None => format!("{} {} kcal", entry.name, entry.kcal),
            },
        );

        match &outcome.fallback_reason {
            Some(reason) => {
                warning(format!(
                    "Could not analyze this photo ({reason}). A default estimate of {} was recorded; \
                     try again with a clearer photo, or remove it with `mealjournal del {}`.",
                    kcal(u64::from(entry.kcal)),
                    entry.id
                ));
            }
            None => {
                success(format!(
                    "{}: {}, id {}",
                    entry.name,
                    kcal(u64::from(entry.kcal)),
                    entry.id
                ));
                if let Some(r) = &entry.reasoning {
                    println!("   {}", r);
                }
            }
        }

        println!(
            "Today: {} / {}",
            kcal(store.total_kcal()),
            kcal(u64::from(store.daily_limit()))
        );
    }

    Ok(())
}
