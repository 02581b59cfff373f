//! Audio summary output.

use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Write synthesized speech to `path`, creating parent directories.
#[instrument(level = "info", skip_all, fields(path = %path.display(), bytes = audio.len()))]
pub async fn write_audio(path: &Path, audio: &[u8]) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    fs::write(path, audio).await?;
    info!("Wrote audio summary");
    Ok(())
}
