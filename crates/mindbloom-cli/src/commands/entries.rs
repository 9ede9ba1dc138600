use chrono::Local;
use mindbloom_core::{Config, Result};

pub fn run(json: bool) -> Result<()> {
    let config = Config::load()?;
    let garden = super::open_garden(&config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(garden.entries())?);
        return Ok(());
    }

    if garden.entries().is_empty() {
        println!("No check-ins yet.");
        return Ok(());
    }
    for entry in garden.entries().iter().rev() {
        let factors: Vec<_> = entry.factors.iter().map(|f| f.label()).collect();
        print!(
            "{}  {}",
            entry.timestamp.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
            entry.mood
        );
        if !factors.is_empty() {
            print!("  [{}]", factors.join(", "));
        }
        if !entry.note.is_empty() {
            print!("  {}", entry.note);
        }
        println!();
    }
    Ok(())
}
