//! File and career removal with per-item accounting.
//!
//! Removal is not transactional. A career delete removes save files one by one
//! and only then tries the directory, so the report must say exactly which
//! files went away and which did not.

use std::fs;
use std::path::{Path, PathBuf};

use crate::layout::RepositoryLayout;
use crate::saves::save_files;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteReport {
    pub removed: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
    pub directory_removed: bool,
    pub error: Option<String>,
}

impl DeleteReport {
    pub fn items_removed(&self) -> usize {
        self.removed.len()
    }

    pub fn is_complete(&self) -> bool {
        self.error.is_none() && self.failed.is_empty()
    }
}

pub fn delete_save_file(path: &Path) -> DeleteReport {
    let mut report = DeleteReport::default();
    match fs::remove_file(path) {
        Ok(()) => {
            tracing::info!(path = %path.display(), "deleted save");
            report.removed.push(path.to_path_buf());
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to delete save");
            report.error = Some(format!("error removing the file: {}", e));
            report.failed.push((path.to_path_buf(), e.to_string()));
        }
    }
    report
}

/// Remove every save file of `career`, then the directory if it is left empty.
pub fn delete_career_dir(layout: &RepositoryLayout, career: &Path) -> DeleteReport {
    let saves = save_files(layout, career).into_iter().map(|(p, _)| p);
    delete_career_files(career, saves)
}

/// Remove `saves`, then `career` only if every one of them went away.
pub fn delete_career_files(
    career: &Path,
    saves: impl IntoIterator<Item = PathBuf>,
) -> DeleteReport {
    let mut report = DeleteReport::default();
    for path in saves {
        match fs::remove_file(&path) {
            Ok(()) => report.removed.push(path),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to delete save");
                report.failed.push((path, e.to_string()));
            }
        }
    }

    if !report.failed.is_empty() {
        report.error = Some(format!(
            "{} save file(s) could not be removed; directory kept",
            report.failed.len()
        ));
    } else {
        match fs::remove_dir(career) {
            Ok(()) => report.directory_removed = true,
            Err(e) => {
                tracing::warn!(dir = %career.display(), error = %e, "failed to remove career directory");
                report.error = Some(format!("error removing the directory: {}", e));
            }
        }
    }
    tracing::info!(
        dir = %career.display(),
        removed = report.items_removed(),
        failed = report.failed.len(),
        directory_removed = report.directory_removed,
        "deleted career"
    );
    report
}
