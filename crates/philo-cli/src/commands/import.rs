use std::fs;
use std::path::Path;

use philo_core::AppConfig;

pub fn run(config: &AppConfig, file: &Path) -> Result<(), String> {
    let text = fs::read_to_string(file)
        .map_err(|e| format!("failed to read {}: {e}", file.display()))?;

    let mut session = super::open_session(config);
    session.drain_notifications();
    let result = session.import(&text);
    super::print_notifications(&mut session);
    result.map_err(|e| format!("{}: {e}", file.display()))?;

    let state = session.state();
    println!(
        "  Score {} | {} activities | {} achievements | {} entries",
        state.total_score,
        state.games_completed,
        state.achievements,
        state.portfolio.len()
    );
    Ok(())
}
