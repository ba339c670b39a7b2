use std::path::Path;

use anyhow::{Context, Result};
use tokio::fs;

/// Replace `path` with `content` through a sibling tmp file and a rename,
/// readers never observe a half written file.
pub async fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("cannot create directory '{}'", parent.display()))?;
    }
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, content)
        .await
        .with_context(|| format!("cannot write '{}'", tmp.display()))?;
    fs::rename(&tmp, path)
        .await
        .with_context(|| format!("cannot replace '{}'", path.display()))?;
    Ok(())
}
