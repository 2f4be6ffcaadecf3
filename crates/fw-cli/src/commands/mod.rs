pub mod config;
pub mod eras;
pub mod frames;
pub mod levels;
pub mod simulate;

use std::path::Path;

use fw_session::SessionConfig;

/// Load the session config from a file, or fall back to the defaults.
fn load_config(path: Option<&Path>) -> Result<SessionConfig, String> {
    match path {
        Some(path) => SessionConfig::load(path).map_err(|e| e.to_string()),
        None => Ok(SessionConfig::default()),
    }
}

/// A progress bar of ten cells for a value in `[0, 1]`.
fn format_bar(val: f64) -> String {
    let val = if val.is_nan() { 0.0 } else { val.clamp(0.0, 1.0) };
    let filled = (val * 10.0).round() as usize;
    let empty = 10_usize.saturating_sub(filled);
    format!("[{}{}] {:>3.0}%", "#".repeat(filled), "-".repeat(empty), val * 100.0)
}
