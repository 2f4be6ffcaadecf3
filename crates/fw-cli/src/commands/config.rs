use fw_session::SessionConfig;

pub fn run() -> Result<(), String> {
    let toml = SessionConfig::default()
        .to_toml()
        .map_err(|e| e.to_string())?;
    print!("{toml}");
    Ok(())
}
