//! Material point driver
//!
//! Usage: `material-driver <input.json>`; prints the committed step records
//! as JSON on stdout.

use anyhow::{bail, Context, Result};

use fem_constitutive::driver::run_file;

fn main() -> Result<()> {
    env_logger::init();

    let Some(path) = std::env::args().nth(1) else {
        bail!("usage: material-driver <input.json>");
    };
    let records = run_file(&path).with_context(|| format!("failed to run {}", path))?;
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}
