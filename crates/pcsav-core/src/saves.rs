use std::path::{Path, PathBuf};
use std::time::SystemTime;

use walkdir::WalkDir;

use crate::layout::RepositoryLayout;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveEntry {
    pub path: PathBuf,
    /// Set only for `Save_dddd` style names.
    pub sequence: Option<u32>,
    pub modified: SystemTime,
}

impl SaveEntry {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveListing {
    pub entries: Vec<SaveEntry>,
    /// Highest sequence number in use, 0 when none.
    pub highest: u32,
}

impl SaveListing {
    pub fn next_sequence(&self) -> u32 {
        self.highest + 1
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.iter().any(|e| e.path == path)
    }
}

/// Save files directly inside `dir`, in directory enumeration order.
pub(crate) fn save_files(layout: &RepositoryLayout, dir: &Path) -> Vec<(PathBuf, SystemTime)> {
    let mut out = Vec::new();
    if !dir.is_dir() {
        return out;
    }
    for e in WalkDir::new(dir).min_depth(1).max_depth(1).into_iter().flatten() {
        let p = e.path();
        if !layout.is_save_file(p) {
            continue;
        }
        let modified = e
            .metadata()
            .ok()
            .and_then(|m| m.modified().ok())
            .unwrap_or(SystemTime::UNIX_EPOCH);
        out.push((p.to_path_buf(), modified));
    }
    out
}

/// Newest first; equal times fall back to path order.
pub(crate) fn sort_newest_first<T>(items: &mut [T], key: impl Fn(&T) -> (SystemTime, &Path)) {
    items.sort_by(|a, b| {
        let (ta, pa) = key(a);
        let (tb, pb) = key(b);
        tb.cmp(&ta).then_with(|| pa.cmp(pb))
    });
}

pub fn scan_saves(layout: &RepositoryLayout, career: &Path) -> SaveListing {
    let mut listing = SaveListing::default();
    for (path, modified) in save_files(layout, career) {
        let sequence = path
            .file_stem()
            .and_then(|s| s.to_str())
            .and_then(|s| layout.parse_sequence(s));
        if let Some(n) = sequence {
            listing.highest = listing.highest.max(n);
        }
        listing.entries.push(SaveEntry {
            path,
            sequence,
            modified,
        });
    }
    sort_newest_first(&mut listing.entries, |e| (e.modified, e.path.as_path()));
    tracing::debug!(
        career = %career.display(),
        count = listing.entries.len(),
        highest = listing.highest,
        "scanned saves"
    );
    listing
}
