use std::path::Path;

use colored::Colorize;
use rg_core::{JsonFileStore, SwitchStore};

pub fn run(data: &Path) -> Result<(), String> {
    let switches = JsonFileStore::new(data)
        .load()
        .map_err(|e| format!("cannot read {}: {e}", data.display()))?;

    if switches.is_empty() {
        println!("No misfire switches stored.");
        return Ok(());
    }

    println!("  {} group{}", switches.len(), if switches.len() == 1 { "" } else { "s" });
    for (group, enabled) in &switches {
        let state = if *enabled { "on".green() } else { "off".dimmed() };
        println!("  {group}: misfire {state}");
    }
    Ok(())
}
