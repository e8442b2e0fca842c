use comfy_table::{ContentArrangement, Table};
use philo_core::AppConfig;

pub fn run(config: &AppConfig) -> Result<(), String> {
    let session = super::open_session(config);
    let portfolio = &session.state().portfolio;

    if portfolio.is_empty() {
        println!("  No activities recorded yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Date", "Unit", "Module", "Result"]);

    for entry in portfolio.entries() {
        table.add_row(vec![
            entry.timestamp.format("%Y-%m-%d %H:%M").to_string(),
            entry.unit.to_string(),
            entry
                .module()
                .map_or_else(|| entry.module_name().to_string(), |m| m.title().to_string()),
            entry.outcome.summary(),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} entries", portfolio.len());
    Ok(())
}
