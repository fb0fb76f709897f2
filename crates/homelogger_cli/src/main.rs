//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `homelogger_core` linkage and configuration end-to-end.
//! - Open the configured note store and report how many live notes exist.
//!
//! Settings come from `HOMELOGGER_DB_PATH`, `HOMELOGGER_LOG_LEVEL` and
//! `HOMELOGGER_LOG_DIR`.

use homelogger_core::db::open_db;
use homelogger_core::{
    core_version, init_logging, logging_status, ping, CoreConfig, NoteFilter, NoteService,
    SqliteNoteRepository,
};
use log::error;
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("homelogger_core ping={}", ping());
    println!("homelogger_core version={}", core_version());

    let config = CoreConfig::from_env();
    if let Err(err) = init_logging(config.log_level.as_str(), &config.log_dir) {
        eprintln!("logging init failed: {err}");
        return ExitCode::FAILURE;
    }
    if let Some(status) = logging_status() {
        println!(
            "homelogger_core log_level={} log_dir={}",
            status.level.as_str(),
            status.log_dir.display()
        );
    }

    match count_notes(&config) {
        Ok(count) => {
            println!("homelogger_core db={}", config.db_path.display());
            println!("homelogger_core notes={count}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("event=cli_probe module=cli status=error error={err}");
            eprintln!("note store probe failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn count_notes(config: &CoreConfig) -> Result<usize, Box<dyn std::error::Error>> {
    let conn = open_db(&config.db_path)?;
    let repo = SqliteNoteRepository::try_new(&conn)?;
    let service = NoteService::new(repo);
    Ok(service.list_notes(NoteFilter::all())?.len())
}
