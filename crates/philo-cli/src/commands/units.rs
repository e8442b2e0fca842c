use comfy_table::{ContentArrangement, Table};

pub fn run() -> Result<(), String> {
    let content = super::load_content()?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Unit", "Objective", "Readings", "Quiz", "Stories"]);

    for (id, unit) in content.units() {
        table.add_row(vec![
            id.to_string(),
            unit.objective.clone(),
            unit.readings.len().to_string(),
            unit.quiz.len().to_string(),
            unit.stories.len().to_string(),
        ]);
    }

    println!("{table}");
    Ok(())
}
