use crate::conf::AnalysisConfig;
use anyhow::{Context, Result, bail};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

const HEADER: &str = "\
# pglens configuration
#
# Every key is optional; removed keys fall back to the values below.
# Advisories fire when a count is strictly greater than its threshold.

";

pub fn init(path: PathBuf) -> Result<()> {
    // Refuse to overwrite an existing file
    if path.exists() {
        bail!("{} already exists", path.display());
    }

    write_file(&path, &default_config_toml()?)?;

    println!("✔ Wrote default config to {}", path.display());
    println!();
    println!("Next steps:");
    println!("  pglens config check {}", path.display());
    println!(
        "  pglens analyze --config {} /var/log/postgresql/postgresql.log",
        path.display()
    );

    Ok(())
}

/// The default configuration as commented TOML
pub fn default_config_toml() -> Result<String> {
    let body = toml::to_string_pretty(&AnalysisConfig::default())
        .context("failed to render default config")?;
    Ok(format!("{HEADER}{body}"))
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    let mut f =
        fs::File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    f.write_all(contents.as_bytes())?;
    Ok(())
}
