use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use serde::Serialize;

use fw_core::{Ownership, SimDate};
use fw_simulation::{SimEventKind, Simulation, SimulationMetrics};

#[derive(Serialize)]
struct Report<'a> {
    date: SimDate,
    era: &'a str,
    era_progress: f64,
    days: u64,
    seed: u64,
    metrics: &'a SimulationMetrics,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    events: Vec<EventLine>,
}

#[derive(Serialize)]
struct EventLine {
    date: SimDate,
    description: String,
}

pub fn run(
    config: Option<&Path>,
    days: u64,
    seed: Option<u64>,
    json: bool,
    events: bool,
) -> Result<(), String> {
    let mut config = super::load_config(config)?;
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    config.validate().map_err(|e| e.to_string())?;

    let mut sim = Simulation::generate(&config.world, config.eras.clone(), &config.sim_config())
        .map_err(|e| format!("simulation init failed: {e}"))?;
    sim.run(days);
    tracing::debug!(days, seed = config.seed, events = sim.events().len(), "headless run finished");

    if json {
        let report = Report {
            date: sim.current_date(),
            era: &sim.current_era().id,
            era_progress: sim.clock().era_progress(),
            days,
            seed: config.seed,
            metrics: sim.metrics(),
            events: if events {
                sim.events()
                    .events()
                    .iter()
                    .map(|e| EventLine {
                        date: e.date,
                        description: e.description.clone(),
                    })
                    .collect()
            } else {
                Vec::new()
            },
        };
        let out = serde_json::to_string_pretty(&report)
            .map_err(|e| format!("failed to serialize report: {e}"))?;
        println!("{out}");
        return Ok(());
    }

    print_summary(&sim, days, config.seed);
    if events {
        print_events(&sim);
    }
    print_farms(&sim);
    Ok(())
}

fn print_summary(sim: &Simulation, days: u64, seed: u64) {
    let era = sim.current_era();
    println!(
        "  {} {}",
        "Simulation".bold(),
        format!("({days} days, seed={seed})").dimmed()
    );
    println!("  Date: {}", sim.current_date());
    println!(
        "  Era:  {} {}",
        era.name.bold(),
        super::format_bar(sim.clock().era_progress())
    );
    if !era.description.is_empty() {
        println!("        {}", era.description.dimmed());
    }
    println!();

    let m = sim.metrics();
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec!["Grain today".to_string(), format!("{:.1}", m.total_grain_today)]);
    table.add_row(vec!["Livestock".to_string(), format!("{:.0}", m.total_livestock_est)]);
    table.add_row(vec!["Avg morale".to_string(), format!("{:.2}", m.avg_morale)]);
    table.add_row(vec!["Displaced".to_string(), m.displaced_count.to_string()]);
    table.add_row(vec!["Collectivized".to_string(), m.farms_collectivized.to_string()]);
    table.add_row(vec![
        "Grain requisitioned".to_string(),
        format!("{:.1}", m.grain_requisitioned),
    ]);
    println!("{table}");
    println!();
}

fn print_events(sim: &Simulation) {
    println!("  {}", "Event Log".bold().underline());
    println!();
    for event in sim.events().events() {
        let date = format!("[{}]", event.date).dimmed();
        let desc = match event.kind {
            SimEventKind::EraEntered { .. } => event.description.cyan().bold(),
            SimEventKind::DateUncovered { .. } => event.description.yellow(),
            SimEventKind::FarmCollectivized { .. } => event.description.magenta(),
            SimEventKind::PersonDisplaced { .. } => event.description.red(),
        };
        println!("  {date} {desc}");
    }
    if sim.events().is_empty() {
        println!("  {}", "(no events)".dimmed());
    }
    println!();
}

fn print_farms(sim: &Simulation) {
    let world = sim.world();
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Farm", "Mode", "Area", "Mech", "Famine risk", "30-day yield"]);

    for farm in world.farms() {
        let mode = match farm.ownership {
            Ownership::Private => "private".green(),
            Ownership::Collective => "collective".magenta(),
        };
        table.add_row(vec![
            farm.id().to_string(),
            mode.to_string(),
            format!("{:.0} ha", farm.land_area),
            format!("{:.2}", farm.mechanization_level),
            super::format_bar(farm.famine_risk()),
            format!("{:.1}", farm.sum_last_30_day_yield()),
        ]);
    }
    println!("  {}", "Farms".bold().underline());
    println!();
    println!("{table}");
}
