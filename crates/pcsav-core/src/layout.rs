use std::path::{Path, PathBuf};

pub const DEFAULT_EXTENSION: &str = "pcsav";
pub const DEFAULT_SAVE_PREFIX: &str = "Save_";
/// Digits in a save file's sequence suffix.
pub const SEQUENCE_WIDTH: usize = 4;
pub const MAX_SEQUENCE: u32 = 9999;

/// Where the repository lives and how its save files are named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLayout {
    pub root: PathBuf,
    /// Save file extension without the dot, matched case-insensitively.
    pub extension: String,
    pub save_prefix: String,
}

impl RepositoryLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: DEFAULT_EXTENSION.to_string(),
            save_prefix: DEFAULT_SAVE_PREFIX.to_string(),
        }
    }

    pub fn with_extension(mut self, ext: impl Into<String>) -> Self {
        self.extension = ext.into().trim_start_matches('.').to_string();
        self
    }

    pub fn is_save_file(&self, p: &Path) -> bool {
        p.is_file()
            && p.extension()
                .and_then(|s| s.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case(&self.extension))
    }

    pub fn save_file_name(&self, sequence: u32) -> String {
        format!(
            "{}{:0width$}.{}",
            self.save_prefix,
            sequence,
            self.extension,
            width = SEQUENCE_WIDTH
        )
    }

    /// Sequence number of a save file stem, e.g. `Save_0012` → 12.
    pub fn parse_sequence(&self, stem: &str) -> Option<u32> {
        let digits = stem.strip_prefix(self.save_prefix.as_str())?;
        if digits.len() != SEQUENCE_WIDTH || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok()
    }
}
