use crate::config::Config;
use crate::errors::{AppError, AppResult};
use std::fs;
use std::path::Path;
use std::process::Command;

pub struct ConfigLogic;

impl ConfigLogic {
    /// Print the file as written, or the effective defaults when there is
    /// no file yet.
    pub fn print(path: &Path, cfg: &Config) -> AppResult<()> {
        if path.exists() {
            let content =
                fs::read_to_string(path).map_err(|e| AppError::ConfigLoad(e.to_string()))?;
            println!("{}", content);
        } else {
            println!("# {} not found, showing defaults", path.display());
            println!("{}", serde_yaml::to_string(cfg)?);
        }
        Ok(())
    }

    /// Open the file in `editor`, then in the platform default if that fails.
    pub fn edit(path: &Path, editor: Option<&str>) -> AppResult<String> {
        let default_editor = default_editor();
        let requested = editor.map(str::to_string).unwrap_or_else(|| default_editor.clone());

        if run_editor(&requested, path) {
            return Ok(requested);
        }

        tracing::warn!(editor = %requested, fallback = %default_editor, "editor failed");
        if requested != default_editor && run_editor(&default_editor, path) {
            return Ok(default_editor);
        }

        Err(AppError::Config(format!(
            "failed to edit {} with '{}'",
            path.display(),
            requested
        )))
    }
}

fn default_editor() -> String {
    std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        })
}

fn run_editor(editor: &str, path: &Path) -> bool {
    matches!(Command::new(editor).arg(path).status(), Ok(s) if s.success())
}
