use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

pub fn run(config: Option<&Path>) -> Result<(), String> {
    let config = super::load_config(config)?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Era", "Name", "From", "To", "Policies"]);

    for era in config.eras.eras() {
        let policies = if era.policies.is_empty() {
            "—".to_string()
        } else {
            era.policies.join(", ")
        };
        table.add_row(vec![
            era.id.clone(),
            era.name.clone(),
            era.start.to_string(),
            era.end.to_string(),
            policies,
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} eras", config.eras.len());

    for (first, last) in config.eras.gaps() {
        println!("  {} no era covers {first} to {last}", "GAP".yellow().bold());
    }
    Ok(())
}
