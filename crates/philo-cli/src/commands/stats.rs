use colored::Colorize;
use philo_core::AppConfig;

fn line(label: &str, value: impl std::fmt::Display) {
    println!("  {}{value}", format!("{label:<22}").bold());
}

pub fn run(config: &AppConfig) -> Result<(), String> {
    let session = super::open_session(config);
    let state = session.state();

    line("Unit", state.unit);
    line("Total score", state.total_score);
    line("Activities completed", state.games_completed);
    line("Achievements", state.achievements);
    line("Portfolio entries", state.portfolio.len());
    Ok(())
}
