//! Career/save picker.
//!
//! Drives selection over the two listings, computes the target path on
//! accept, and performs confirmed deletions. Every listing is re-read from
//! disk when it is needed; selections are plain paths into the latest scan.
//!
//! In save mode two extra choices exist: a new career (listed after the most
//! recent existing career) and a new save (listed first under any career).

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::careers::{CareerEntry, scan_careers};
use crate::error::{PickerError, Result};
use crate::layout::{MAX_SEQUENCE, RepositoryLayout};
use crate::model::RecordSummary;
use crate::naming;
use crate::probe::RecordReader;
use crate::remove::{DeleteReport, delete_career_dir, delete_save_file};
use crate::saves::{SaveListing, scan_saves};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerMode {
    Load,
    Save,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CareerChoice {
    Existing(PathBuf),
    New,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveChoice {
    Existing(PathBuf),
    New,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub path: PathBuf,
    pub exists: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Accepted(Target),
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerState {
    NoCareerSelected,
    CareerSelected(CareerChoice),
    SaveSelected(CareerChoice, SaveChoice),
    Closed(Outcome),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcceptOutcome {
    Accepted(Target),
    /// Overwrite was not confirmed; the selection is unchanged.
    Declined,
}

/// Destructive steps that need the caller's consent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation<'a> {
    Overwrite(&'a Path),
    DeleteCareer(&'a Path),
    DeleteSave(&'a Path),
}

pub trait Confirm {
    fn confirm(&mut self, request: Confirmation<'_>) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(Confirmation<'_>) -> bool,
{
    fn confirm(&mut self, request: Confirmation<'_>) -> bool {
        self(request)
    }
}

/// Fixed answer to every confirmation.
#[derive(Debug, Clone, Copy)]
pub struct Answer(pub bool);

impl Confirm for Answer {
    fn confirm(&mut self, _request: Confirmation<'_>) -> bool {
        self.0
    }
}

pub struct SavePicker<R> {
    layout: RepositoryLayout,
    mode: PickerMode,
    reader: R,
    record: Option<RecordSummary>,
    today: Option<NaiveDate>,
    careers: Vec<CareerEntry>,
    saves: SaveListing,
    state: PickerState,
}

impl<R: RecordReader> SavePicker<R> {
    pub fn new(layout: RepositoryLayout, mode: PickerMode, reader: R) -> Self {
        Self {
            layout,
            mode,
            reader,
            record: None,
            today: None,
            careers: Vec::new(),
            saves: SaveListing::default(),
            state: PickerState::NoCareerSelected,
        }
    }

    /// Record whose player metadata names a new career.
    pub fn with_record(mut self, record: RecordSummary) -> Self {
        self.record = Some(record);
        self
    }

    /// Fix the creation date used for new career names.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.today = Some(date);
        self
    }

    pub fn layout(&self) -> &RepositoryLayout {
        &self.layout
    }
    pub fn mode(&self) -> PickerMode {
        self.mode
    }
    pub fn state(&self) -> &PickerState {
        &self.state
    }
    pub fn careers(&self) -> &[CareerEntry] {
        &self.careers
    }
    pub fn saves(&self) -> &SaveListing {
        &self.saves
    }

    pub fn selected_career(&self) -> Option<&CareerChoice> {
        match &self.state {
            PickerState::CareerSelected(c) | PickerState::SaveSelected(c, _) => Some(c),
            _ => None,
        }
    }

    pub fn selected_save(&self) -> Option<&SaveChoice> {
        match &self.state {
            PickerState::SaveSelected(_, s) => Some(s),
            _ => None,
        }
    }

    /// Career choices in display order.
    pub fn career_choices(&self) -> Vec<CareerChoice> {
        let mut out: Vec<CareerChoice> = self
            .careers
            .iter()
            .map(|c| CareerChoice::Existing(c.path.clone()))
            .collect();
        if self.mode == PickerMode::Save {
            out.insert(out.len().min(1), CareerChoice::New);
        }
        out
    }

    /// Save choices in display order for the selected career.
    pub fn save_choices(&self) -> Vec<SaveChoice> {
        let mut out = Vec::with_capacity(self.saves.entries.len() + 1);
        if self.mode == PickerMode::Save {
            out.push(SaveChoice::New);
        }
        out.extend(
            self.saves
                .entries
                .iter()
                .map(|s| SaveChoice::Existing(s.path.clone())),
        );
        out
    }

    pub fn open(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.careers = scan_careers(&self.layout, &self.reader);
        self.saves = SaveListing::default();
        let first = self.career_choices().into_iter().next();
        match first {
            Some(choice) => self.select_career(choice),
            None => {
                self.state = PickerState::NoCareerSelected;
                Ok(())
            }
        }
    }

    pub fn refresh(&mut self) -> Result<()> {
        self.open()
    }

    pub fn select_career(&mut self, choice: CareerChoice) -> Result<()> {
        self.ensure_open()?;
        match &choice {
            CareerChoice::Existing(p) => {
                if !self.careers.iter().any(|c| &c.path == p) {
                    return Err(PickerError::UnknownEntry(p.clone()));
                }
                self.saves = scan_saves(&self.layout, p);
            }
            CareerChoice::New => {
                if self.mode != PickerMode::Save {
                    return Err(PickerError::SaveModeOnly);
                }
                self.saves = SaveListing::default();
            }
        }
        self.state = match self.save_choices().into_iter().next() {
            Some(save) => PickerState::SaveSelected(choice, save),
            None => PickerState::CareerSelected(choice),
        };
        Ok(())
    }

    pub fn select_save(&mut self, choice: SaveChoice) -> Result<()> {
        self.ensure_open()?;
        let career = self
            .selected_career()
            .cloned()
            .ok_or(PickerError::NothingSelected)?;
        match &choice {
            SaveChoice::Existing(p) if !self.saves.contains(p) => {
                return Err(PickerError::UnknownEntry(p.clone()));
            }
            SaveChoice::New if self.mode != PickerMode::Save => {
                return Err(PickerError::SaveModeOnly);
            }
            _ => {}
        }
        self.state = PickerState::SaveSelected(career, choice);
        Ok(())
    }

    pub fn can_accept(&self) -> bool {
        matches!(self.state, PickerState::SaveSelected(..))
    }

    pub fn can_delete_save(&self) -> bool {
        matches!(self.selected_save(), Some(SaveChoice::Existing(_)))
    }

    pub fn can_delete_career(&self) -> bool {
        matches!(self.selected_career(), Some(CareerChoice::Existing(_)))
    }

    /// Path the accept action would produce for the current selection.
    pub fn target(&self) -> Result<Target> {
        let (career, save) = match &self.state {
            PickerState::Closed(_) => return Err(PickerError::Closed),
            PickerState::SaveSelected(c, s) => (c, s),
            _ => return Err(PickerError::NothingSelected),
        };
        if let SaveChoice::Existing(p) = save {
            return Ok(Target {
                path: p.clone(),
                exists: true,
            });
        }
        if self.mode == PickerMode::Load {
            return Err(PickerError::LoadRequiresExistingSave);
        }
        let (dir, sequence) = match career {
            CareerChoice::Existing(dir) => (dir.clone(), self.saves.next_sequence()),
            CareerChoice::New => {
                let r = self.record.as_ref().ok_or(PickerError::MissingRecord)?;
                let today = self
                    .today
                    .unwrap_or_else(|| chrono::Local::now().date_naive());
                let name = naming::encode(
                    &r.first_name,
                    r.origin,
                    r.reputation,
                    r.class_id,
                    &r.fingerprint,
                    today,
                );
                let dir = self.layout.root.join(name);
                // Same player on the same day encodes to an existing career.
                let sequence = if dir.is_dir() {
                    scan_saves(&self.layout, &dir).next_sequence()
                } else {
                    0
                };
                (dir, sequence)
            }
        };
        if sequence > MAX_SEQUENCE {
            return Err(PickerError::SequenceExhausted(dir));
        }
        let path = dir.join(self.layout.save_file_name(sequence));
        let exists = path.exists();
        Ok(Target { path, exists })
    }

    pub fn accept(&mut self, confirm: &mut dyn Confirm) -> Result<AcceptOutcome> {
        let target = self.target()?;
        if self.mode == PickerMode::Save
            && target.exists
            && !confirm.confirm(Confirmation::Overwrite(&target.path))
        {
            return Ok(AcceptOutcome::Declined);
        }
        tracing::info!(path = %target.path.display(), exists = target.exists, "accepted");
        self.state = PickerState::Closed(Outcome::Accepted(target.clone()));
        Ok(AcceptOutcome::Accepted(target))
    }

    /// `None` when the caller declined.
    pub fn delete_career(&mut self, confirm: &mut dyn Confirm) -> Result<Option<DeleteReport>> {
        self.ensure_open()?;
        let Some(CareerChoice::Existing(dir)) = self.selected_career().cloned() else {
            return Err(PickerError::NothingSelected);
        };
        if !confirm.confirm(Confirmation::DeleteCareer(&dir)) {
            return Ok(None);
        }
        let report = delete_career_dir(&self.layout, &dir);
        self.open()?;
        Ok(Some(report))
    }

    /// `None` when the caller declined.
    pub fn delete_save(&mut self, confirm: &mut dyn Confirm) -> Result<Option<DeleteReport>> {
        self.ensure_open()?;
        let (career, path) = match &self.state {
            PickerState::SaveSelected(c, SaveChoice::Existing(p)) => (c.clone(), p.clone()),
            _ => return Err(PickerError::NothingSelected),
        };
        if !confirm.confirm(Confirmation::DeleteSave(&path)) {
            return Ok(None);
        }
        let report = delete_save_file(&path);
        self.select_career(career)?;
        Ok(Some(report))
    }

    pub fn cancel(&mut self) {
        self.state = PickerState::Closed(Outcome::Cancelled);
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        match &self.state {
            PickerState::Closed(o) => Some(o),
            _ => None,
        }
    }

    fn ensure_open(&self) -> Result<()> {
        match self.state {
            PickerState::Closed(_) => Err(PickerError::Closed),
            _ => Ok(()),
        }
    }
}
