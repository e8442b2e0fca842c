pub mod export;
pub mod import;
pub mod play;
pub mod portfolio;
pub mod stats;
pub mod unit;
pub mod units;

use colored::Colorize;
use philo_core::{AppConfig, ContentStore, FileStore, NotificationKind, Session};
use tracing::debug;

/// Open the saved session under the configured data directory.
fn open_session(config: &AppConfig) -> Session {
    let path = config.state_path();
    debug!(path = %path.display(), "opening session");
    Session::open(FileStore::new(path), config)
}

/// Load the built-in lesson catalog.
fn load_content() -> Result<ContentStore, String> {
    ContentStore::builtin().map_err(|e| format!("failed to load lessons: {e}"))
}

/// Print and clear pending toasts and achievement banners.
fn print_notifications(session: &mut Session) {
    for note in session.drain_notifications() {
        match note.kind {
            NotificationKind::Toast => println!("  {} {}", "»".green(), note.text),
            NotificationKind::Achievement => {
                println!("  {} {}", "★".yellow(), note.to_string().yellow().bold());
            }
        }
    }
}
