use mindbloom_core::{Config, Result};

pub fn run() -> Result<()> {
    let config = Config::load()?;
    let garden = super::open_garden(&config)?;

    let flowers: Vec<_> = garden
        .flowers()
        .iter()
        .map(|flower| {
            let mut value = serde_json::to_value(flower)?;
            if let Some(obj) = value.as_object_mut() {
                obj.insert("color".into(), flower.mood.petal_color().hex().into());
                obj.insert("accent".into(), flower.mood.accent_color().hex().into());
                obj.insert("blooming".into(), flower.is_blooming().into());
            }
            Ok(value)
        })
        .collect::<Result<_, serde_json::Error>>()?;
    println!("{}", serde_json::to_string_pretty(&flowers)?);
    Ok(())
}
