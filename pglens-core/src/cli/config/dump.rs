use crate::conf::load_or_default;
use serde::Serialize;
use std::path::PathBuf;

pub fn dump(path: Option<PathBuf>, json: bool, yaml: bool) -> anyhow::Result<()> {
    let cfg = load_or_default(path.as_deref())?;

    if json {
        dump_json(&cfg)?;
    } else if yaml {
        dump_yaml(&cfg)?;
    } else {
        // default: toml, the format the file is written in
        dump_toml(&cfg)?;
    }

    Ok(())
}

fn dump_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    println!("{s}");
    Ok(())
}

fn dump_yaml<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let s = serde_yaml::to_string(value)?;
    println!("{s}");
    Ok(())
}

fn dump_toml<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let s = toml::to_string_pretty(value)?;
    println!("{s}");
    Ok(())
}
