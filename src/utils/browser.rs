use anyhow::{Context, Result};
use std::process::Command;

/// Otevře dashboard v defaultním prohlížeči podle OS
pub fn open_browser(url: &str) -> Result<()> {
    let (program, args): (&str, Vec<&str>) = if cfg!(target_os = "macos") {
        ("open", vec![url])
    } else if cfg!(target_os = "windows") {
        ("cmd", vec!["/C", "start", url])
    } else {
        ("xdg-open", vec![url])
    };

    Command::new(program)
        .args(&args)
        .spawn()
        .with_context(|| format!("Failed to launch {}", program))?;

    tracing::info!("Opened browser: {}", url);
    Ok(())
}
