use philo_core::{AppConfig, UnitId};

pub fn run(config: &AppConfig, unit: &str) -> Result<(), String> {
    let unit: UnitId = unit.parse().map_err(|e| format!("{e}"))?;
    let mut session = super::open_session(config);
    session.drain_notifications();
    session.select_unit(unit);
    session
        .save()
        .map_err(|e| format!("failed to save session: {e}"))?;
    super::print_notifications(&mut session);
    Ok(())
}
