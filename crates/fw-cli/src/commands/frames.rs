use std::path::Path;

use colored::Colorize;

use fw_session::{FrameScheduler, RenderState, Session};

pub fn run(
    config: Option<&Path>,
    frames: u64,
    dt: f64,
    fast: bool,
    level: Option<&str>,
) -> Result<(), String> {
    let config = super::load_config(config)?;
    let mut session = Session::new(&config).map_err(|e| e.to_string())?;
    if let Some(level) = level {
        if config.levels.position(level).is_none() {
            return Err(format!("unknown level '{level}'"));
        }
        session.request_level(level);
    }

    let mut scheduler = FrameScheduler::new(config.scheduler);
    scheduler.set_fast(fast);
    let days = scheduler.run(&mut session, frames, dt);
    tracing::debug!(frames = scheduler.frames(), days, "frame run finished");
    let state = RenderState::capture(&session);

    println!(
        "  {} {}",
        "Frames".bold(),
        format!("({frames} x {dt}s, fast={fast})").dimmed()
    );
    println!("  Days advanced: {days}");
    println!("  Level: {}", state.level_label);
    let (x, y) = session.camera().position();
    println!("  Camera: ({x:.1}, {y:.1})");
    println!();
    for line in &state.hud {
        println!("  {line}");
    }
    Ok(())
}
