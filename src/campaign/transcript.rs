//! Plain-text transcript export

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::store::models::CampaignRun;

/// Render one `[ROLE] content` block per message, separated by blank lines
pub fn export_text(run: &CampaignRun) -> String {
    run.transcript
        .iter()
        .map(|msg| format!("[{}] {}", msg.role.as_str().to_uppercase(), msg.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn export_file_name(run_id: &str) -> String {
    format!("transcript-{}.txt", run_id)
}

/// Write the transcript to `output`, or to `transcript-<id>.txt` in the
/// current directory when no path is given
pub fn write_export(run: &CampaignRun, output: Option<&Path>) -> Result<PathBuf> {
    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(export_file_name(&run.id)));

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(&path, export_text(run))
        .with_context(|| format!("Failed to write transcript to {:?}", path))?;

    tracing::info!("Exported {} messages to {:?}", run.transcript.len(), path);
    Ok(path)
}
