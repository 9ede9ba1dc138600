use chrono::{Local, Timelike};
use mindbloom_core::mood::greeting;
use mindbloom_core::{Config, Result};

pub fn run() -> Result<()> {
    let config = Config::load()?;
    let garden = super::open_garden(&config)?;

    let summary = garden.summary();
    let mut json = serde_json::to_value(&summary)?;
    if let Some(obj) = json.as_object_mut() {
        obj.insert("greeting".into(), greeting(Local::now().hour()).into());
    }
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
