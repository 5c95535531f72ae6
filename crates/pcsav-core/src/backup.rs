use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;
use zip::CompressionMethod;
use zip::write::FileOptions;

use crate::error::BackupError;
use crate::picker::{Confirm, Confirmation};

// Zip backup of a career directory (non-destructive), written next to it
pub fn backup_career(dir: &Path) -> Result<PathBuf, BackupError> {
    if !dir.is_dir() {
        return Err(BackupError::NotADirectory(dir.to_path_buf()));
    }
    let parent = dir.parent().unwrap_or(Path::new("."));
    let name = dir.file_name().and_then(|s| s.to_str()).unwrap_or("career");
    let ts = chrono::Local::now().format("%Y%m%d-%H%M%S");
    let dest = parent.join(format!("{}_{}.zip", name, ts));

    let file = fs::File::create(&dest)?;
    let mut zip = zip::ZipWriter::new(file);
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o644);
    for entry in WalkDir::new(dir).min_depth(1) {
        let entry = entry?;
        let path = entry.path();
        let Ok(rel) = path.strip_prefix(dir) else {
            continue;
        };
        let name = rel.to_string_lossy().replace('\\', "/");
        if entry.file_type().is_dir() {
            zip.add_directory(name, options)?;
        } else {
            zip.start_file(name, options)?;
            zip.write_all(&fs::read(path)?)?;
        }
    }
    zip.finish()?;
    tracing::info!(dir = %dir.display(), archive = %dest.display(), "backed up career");
    Ok(dest)
}

/// Confirmation that archives a career once its deletion is confirmed.
///
/// A failed archive answers no, so the career is kept.
pub struct BackupBeforeDelete<C> {
    inner: C,
    pub archive: Option<PathBuf>,
    pub error: Option<BackupError>,
}

impl<C: Confirm> BackupBeforeDelete<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            archive: None,
            error: None,
        }
    }
}

impl<C: Confirm> Confirm for BackupBeforeDelete<C> {
    fn confirm(&mut self, request: Confirmation<'_>) -> bool {
        if !self.inner.confirm(request) {
            return false;
        }
        let Confirmation::DeleteCareer(dir) = request else {
            return true;
        };
        match backup_career(dir) {
            Ok(zip) => {
                self.archive = Some(zip);
                true
            }
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "backup failed, keeping career");
                self.error = Some(e);
                false
            }
        }
    }
}
