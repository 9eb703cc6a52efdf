//! Clean the public directory

use anyhow::Result;
use std::fs;

use crate::Starlog;

/// Remove all generated output
pub fn run(app: &Starlog) -> Result<()> {
    if app.public_dir.exists() {
        fs::remove_dir_all(&app.public_dir)?;
        tracing::info!("Deleted: {:?}", app.public_dir);
    }
    Ok(())
}
