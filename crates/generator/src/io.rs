use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use ghflow_types::Workflow;

use crate::options::RenderOptions;
use crate::render::render;

/// Renders `workflow` and writes it to `output`, creating missing parent directories.
///
/// # Errors
///
/// Returns an error if rendering fails or the file cannot be written.
pub fn write_workflow(workflow: &Workflow, options: &RenderOptions, output: &Path) -> Result<()> {
    let text = render(workflow, options).context("render workflow")?;
    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).with_context(|| format!("create dir {}", parent.display()))?;
    }

    fs::write(output, &text).with_context(|| format!("write {}", output.display()))?;
    info!(bytes = text.len(), path = %output.display(), "wrote workflow");
    Ok(())
}
