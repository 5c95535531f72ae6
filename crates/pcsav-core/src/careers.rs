use std::path::{Path, PathBuf};
use std::time::SystemTime;

use walkdir::WalkDir;

use crate::layout::RepositoryLayout;
use crate::model::RecordSummary;
use crate::naming::{self, CareerNameToken};
use crate::probe::{RecordReader, probe};
use crate::saves::{save_files, sort_newest_first};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CareerEntry {
    pub path: PathBuf,
    pub token: Option<CareerNameToken>,
    pub summary: Option<RecordSummary>,
    pub modified: SystemTime,
}

impl CareerEntry {
    pub fn dir_name(&self) -> String {
        self.path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Record first name, then decoded name, then the directory name itself.
    pub fn display_name(&self) -> String {
        let from_record = self.summary.as_ref().map(|s| s.first_name.as_str());
        let from_token = self.token.as_ref().map(|t| t.raw_name.as_str());
        match from_record.into_iter().chain(from_token).find(|s| !s.is_empty()) {
            Some(s) => s.to_string(),
            None => {
                let dir = self.dir_name();
                if dir.is_empty() {
                    self.path.display().to_string()
                } else {
                    dir
                }
            }
        }
    }

    /// `Soldier, 2013-03-15` for careers with a decodable name.
    pub fn detail(&self) -> Option<String> {
        self.token
            .as_ref()
            .map(|t| format!("{}, {}", t.class, t.created_on.format("%Y-%m-%d")))
    }
}

pub fn scan_careers(layout: &RepositoryLayout, reader: &dyn RecordReader) -> Vec<CareerEntry> {
    let mut out = Vec::new();
    if !layout.root.is_dir() {
        return out;
    }
    for e in WalkDir::new(&layout.root)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .flatten()
    {
        if !e.file_type().is_dir() {
            continue;
        }
        if let Some(entry) = read_career(layout, reader, e.path()) {
            out.push(entry);
        }
    }
    sort_newest_first(&mut out, |c| (c.modified, c.path.as_path()));
    tracing::debug!(root = %layout.root.display(), count = out.len(), "scanned careers");
    out
}

fn read_career(
    layout: &RepositoryLayout,
    reader: &dyn RecordReader,
    dir: &Path,
) -> Option<CareerEntry> {
    let mut files = save_files(layout, dir);
    if files.is_empty() {
        tracing::debug!(dir = %dir.display(), "skipping directory without saves");
        return None;
    }
    // Probe only the newest save.
    sort_newest_first(&mut files, |(p, t)| (*t, p.as_path()));
    let summary = files.first().and_then(|(p, _)| probe(reader, p).ok());

    let token = dir
        .file_name()
        .and_then(|s| s.to_str())
        .and_then(naming::decode);
    if token.is_none() {
        tracing::debug!(dir = %dir.display(), "career name did not decode");
    }
    let modified = dir
        .metadata()
        .and_then(|m| m.modified())
        .unwrap_or(SystemTime::UNIX_EPOCH);
    Some(CareerEntry {
        path: dir.to_path_buf(),
        token,
        summary,
        modified,
    })
}
