use std::fs;
use std::path::{Path, PathBuf};

use philo_core::AppConfig;
use philo_core::config::export_file_name;

pub fn run(config: &AppConfig, output: Option<&Path>, stdout: bool) -> Result<(), String> {
    let session = super::open_session(config);
    let doc = session.export();
    let json = doc
        .to_json_pretty()
        .map_err(|e| format!("failed to serialize portfolio: {e}"))?;

    if stdout {
        println!("{json}");
        return Ok(());
    }

    let path = output.map_or_else(|| PathBuf::from(export_file_name()), Path::to_path_buf);
    fs::write(&path, json).map_err(|e| format!("failed to write {}: {e}", path.display()))?;
    println!(
        "  Exported {} entries to {}",
        doc.portfolio.len(),
        path.display()
    );
    Ok(())
}
