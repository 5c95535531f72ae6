//! pcsav-core: career/save repository indexing and picking
//!
//! The filesystem is the index:
//! - `naming`: career directory names <-> identity metadata
//! - `careers` / `saves`: scans of the two directory levels, newest first
//! - `probe`: readable-or-not peek at save records for display
//! - `picker`: selection state machine, target path allocation, deletion
//!
pub mod backup;
pub mod careers;
pub mod error;
pub mod json;
pub mod layout;
pub mod model;
pub mod naming;
pub mod picker;
pub mod probe;
pub mod remove;
pub mod saves;

pub use careers::{CareerEntry, scan_careers};
pub use error::{BackupError, PickerError, ReadError, Unreadable};
pub use layout::RepositoryLayout;
pub use model::{Guid, Origin, PlayerClass, RecordSummary, Reputation};
pub use naming::CareerNameToken;
pub use picker::{
    AcceptOutcome, Answer, CareerChoice, Confirm, Confirmation, Outcome, PickerMode,
    PickerState, SaveChoice, SavePicker, Target,
};
pub use probe::{JsonSummaryReader, NoReader, RecordReader, probe};
pub use remove::DeleteReport;
pub use saves::{SaveEntry, SaveListing, scan_saves};
