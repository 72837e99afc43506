use anyhow::Result;
use colored::Colorize;

use crate::config::{ConfigStore, describe_timeout};
use crate::output::print_success;

pub fn show(store: &ConfigStore, profile: &str) -> Result<()> {
    let cfg = store.load_profile(profile)?;
    println!("{}: {}", "Profile".cyan(), profile);
    println!("{}: {}", "File".cyan(), store.path().display());
    println!(
        "{}: {}",
        "Server".cyan(),
        cfg.server.as_deref().unwrap_or("(not set)")
    );
    println!(
        "{}: {}",
        "Token".cyan(),
        if cfg.token.is_some() { "(set)" } else { "(not set)" }
    );
    println!(
        "{}: {}",
        "Format".cyan(),
        cfg.format.as_deref().unwrap_or("json")
    );
    println!("{}: {}", "Timeout".cyan(), describe_timeout(&cfg));
    Ok(())
}

pub fn set(store: &ConfigStore, profile: &str, key: &str, value: &str) -> Result<()> {
    let mut cfg = store.load_profile(profile)?;
    cfg.set(key, value)?;
    store.save_profile(profile, &cfg)?;
    let shown = if key == "token" { "***" } else { value };
    print_success(&format!("Set {key} = {shown}"));
    Ok(())
}
