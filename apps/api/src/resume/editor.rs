use serde::Serialize;
use thiserror::Error;

use crate::resume::document::{EntryDraft, EntryKind, TimelineEntry};
use crate::schema::entry::validate_entry;
use crate::schema::ValidationErrors;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error("invalid entry: {0}")]
    Invalid(ValidationErrors),

    #[error("no {kind:?} entry at index {index} ({len} present)")]
    OutOfRange {
        kind: EntryKind,
        index: usize,
        len: usize,
    },
}

/// Replacement sequence for one collection, handed to the owning document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryChange {
    pub kind: EntryKind,
    pub entries: Vec<TimelineEntry>,
}

/// Owns one timeline collection plus the entry currently being typed.
#[derive(Debug, Clone, Serialize)]
pub struct EntryEditor {
    kind: EntryKind,
    entries: Vec<TimelineEntry>,
    draft: EntryDraft,
}

impl EntryEditor {
    pub fn new(kind: EntryKind, entries: Vec<TimelineEntry>) -> Self {
        Self {
            kind,
            entries,
            draft: EntryDraft::default(),
        }
    }

    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    pub fn draft(&self) -> &EntryDraft {
        &self.draft
    }

    pub fn set_draft(&mut self, draft: EntryDraft) {
        self.draft = draft;
    }

    pub fn set_draft_description(&mut self, description: String) {
        self.draft.description = description;
    }

    /// Replaces the owned sequence, e.g. after the document was re-parsed from markdown.
    pub fn reset(&mut self, entries: Vec<TimelineEntry>) {
        self.entries = entries;
    }

    /// Validates `candidate` under this editor's kind and appends it.
    ///
    /// On success the draft is cleared; on failure the candidate is kept as the draft so it
    /// can be corrected.
    pub fn add(&mut self, candidate: EntryDraft) -> Result<EntryChange, EditorError> {
        match validate_entry(self.kind, &candidate) {
            Ok(entry) => {
                self.entries.push(entry);
                self.draft = EntryDraft::default();
                Ok(self.change())
            }
            Err(errors) => {
                self.draft = candidate;
                Err(EditorError::Invalid(errors))
            }
        }
    }

    /// Commits the current draft.
    pub fn add_draft(&mut self) -> Result<EntryChange, EditorError> {
        self.add(self.draft.clone())
    }

    /// Deletes by position. No confirmation, no undo.
    pub fn remove(&mut self, index: usize) -> Result<EntryChange, EditorError> {
        if index >= self.entries.len() {
            return Err(EditorError::OutOfRange {
                kind: self.kind,
                index,
                len: self.entries.len(),
            });
        }
        self.entries.remove(index);
        Ok(self.change())
    }

    fn change(&self) -> EntryChange {
        EntryChange {
            kind: self.kind,
            entries: self.entries.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(title: &str) -> EntryDraft {
        EntryDraft {
            title: title.into(),
            organization: "State University".into(),
            start_date: "2015-09".into(),
            end_date: "2019-06".into(),
            description: "Graduated with first class honours".into(),
            current: false,
        }
    }

    #[test]
    fn test_add_appends_and_clears_draft() {
        let mut editor = EntryEditor::new(EntryKind::Education, vec![]);
        editor.set_draft(candidate("BSc Physics"));
        let change = editor.add_draft().unwrap();
        assert_eq!(change.kind, EntryKind::Education);
        assert_eq!(change.entries.len(), 1);
        assert_eq!(change.entries[0].title, "BSc Physics");
        assert_eq!(editor.draft(), &EntryDraft::default());
    }

    #[test]
    fn test_change_is_full_replacement_sequence() {
        let mut editor = EntryEditor::new(EntryKind::Education, vec![]);
        editor.add(candidate("BSc Physics")).unwrap();
        let change = editor.add(candidate("MSc Physics")).unwrap();
        let titles: Vec<_> = change.entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["BSc Physics", "MSc Physics"]);
    }

    #[test]
    fn test_invalid_add_keeps_draft_and_sequence() {
        let mut editor = EntryEditor::new(EntryKind::Experience, vec![]);
        let mut bad = candidate("Engineer");
        bad.description = "short".into();
        let err = editor.add(bad.clone()).unwrap_err();
        match err {
            EditorError::Invalid(errors) => assert!(errors.has("description")),
            other => panic!("unexpected {other:?}"),
        }
        assert!(editor.entries().is_empty());
        assert_eq!(editor.draft(), &bad);
    }

    #[test]
    fn test_remove_by_index() {
        let mut editor = EntryEditor::new(EntryKind::Education, vec![]);
        editor.add(candidate("BSc Physics")).unwrap();
        editor.add(candidate("MSc Physics")).unwrap();
        let change = editor.remove(0).unwrap();
        assert_eq!(change.entries.len(), 1);
        assert_eq!(change.entries[0].title, "MSc Physics");
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut editor = EntryEditor::new(EntryKind::Project, vec![]);
        assert_eq!(
            editor.remove(0),
            Err(EditorError::OutOfRange {
                kind: EntryKind::Project,
                index: 0,
                len: 0
            })
        );
    }

    #[test]
    fn test_improved_description_lands_in_draft() {
        let mut editor = EntryEditor::new(EntryKind::Education, vec![]);
        editor.set_draft(candidate("BSc Physics"));
        editor.set_draft_description("Improved text".into());
        assert_eq!(editor.draft().description, "Improved text");
        assert_eq!(editor.draft().title, "BSc Physics");
    }
}
