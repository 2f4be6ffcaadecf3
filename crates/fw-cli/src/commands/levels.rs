use std::path::Path;

use comfy_table::{ContentArrangement, Table};

pub fn run(config: Option<&Path>) -> Result<(), String> {
    let config = super::load_config(config)?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Key", "Level", "Name", "Scale"]);

    for (i, level) in config.levels.levels().iter().enumerate() {
        let key = if i < 9 {
            (i + 1).to_string()
        } else {
            "—".to_string()
        };
        table.add_row(vec![
            key,
            level.id.clone(),
            level.name.clone(),
            format!("{:.2}", level.scale),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} levels, closest first", config.levels.len());
    Ok(())
}
