use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::EnvFilter;

pub const LOG_ENV: &str = "WORDRUSH_LOG";
pub const LOG_FILE: &str = "wordrush.log";

/// Send tracing output to `<dir>/wordrush.log`; the terminal belongs to the UI.
///
/// Keep the returned guard alive for the whole run or buffered lines are lost.
/// Returns `None` (logging off) when the directory cannot be created.
pub fn init(dir: &Path) -> Option<WorkerGuard> {
    if let Err(err) = std::fs::create_dir_all(dir) {
        eprintln!("wordrush: logging disabled, cannot create {}: {err}", dir.display());
        return None;
    }

    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .with_env_var(LOG_ENV)
        .from_env_lossy();

    let appender = tracing_appender::rolling::never(dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(false)
        .with_writer(writer)
        .try_init()
        .is_ok();

    installed.then_some(guard)
}
