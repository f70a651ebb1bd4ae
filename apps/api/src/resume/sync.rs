//! Keeps the structured resume form and the markdown document consistent.
//!
//! Exactly one representation is authoritative at a time. While the form is authoritative
//! every structured edit regenerates the markdown. While the markdown is authoritative the
//! raw text passes through untouched and the form is frozen. Switching back to the form
//! reverse-parses the markdown. A failed parse silently keeps the previous form, and the
//! markdown stays authoritative so the hand-edited text is never overwritten.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::resume::document::{ContactInfo, EntryKind, ResumeDocument, TimelineEntry};
use crate::resume::editor::EntryChange;
use crate::resume::markdown::{parse_document, render_document};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Authority {
    Form,
    Markdown,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    #[error("the structured form is read-only while markdown is being edited")]
    FormNotAuthoritative,

    #[error("the markdown is read-only while the structured form is being edited")]
    MarkdownNotAuthoritative,
}

/// A single structured edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEdit {
    ContactInfo(ContactInfo),
    Summary(String),
    Skills(String),
    Entries {
        kind: EntryKind,
        entries: Vec<TimelineEntry>,
    },
}

impl From<EntryChange> for FormEdit {
    fn from(change: EntryChange) -> Self {
        FormEdit::Entries {
            kind: change.kind,
            entries: change.entries,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResumeSynchronizer {
    authority: Authority,
    /// Display name for the contact heading; owned by the user profile, not the form.
    name: String,
    form: ResumeDocument,
    markdown: String,
}

impl ResumeSynchronizer {
    /// Starts markdown-authoritative when a non-empty persisted document exists.
    pub fn new(name: impl Into<String>, persisted: Option<String>) -> Self {
        let name = name.into();
        match persisted.filter(|md| !md.trim().is_empty()) {
            Some(markdown) => Self {
                authority: Authority::Markdown,
                name,
                form: ResumeDocument::default(),
                markdown,
            },
            None => Self {
                authority: Authority::Form,
                name,
                form: ResumeDocument::default(),
                markdown: String::new(),
            },
        }
    }

    pub fn authority(&self) -> Authority {
        self.authority
    }

    pub fn form(&self) -> &ResumeDocument {
        &self.form
    }

    pub fn markdown(&self) -> &str {
        &self.markdown
    }

    /// Applies a structured edit and regenerates the markdown.
    pub fn apply(&mut self, edit: FormEdit) -> Result<&str, SyncError> {
        if self.authority != Authority::Form {
            return Err(SyncError::FormNotAuthoritative);
        }
        match edit {
            FormEdit::ContactInfo(contact) => self.form.contact_info = contact,
            FormEdit::Summary(summary) => self.form.summary = summary,
            FormEdit::Skills(skills) => self.form.skills = skills,
            FormEdit::Entries { kind, entries } => self.form.replace_entries(kind, entries),
        }
        self.regenerate();
        Ok(self.markdown.as_str())
    }

    /// Replaces the markdown verbatim.
    pub fn edit_markdown(&mut self, markdown: String) -> Result<(), SyncError> {
        if self.authority != Authority::Markdown {
            return Err(SyncError::MarkdownNotAuthoritative);
        }
        self.markdown = markdown;
        Ok(())
    }

    pub fn switch_to_markdown(&mut self) {
        self.authority = Authority::Markdown;
    }

    /// Reverse-parses the markdown into the form, then regenerates the markdown from it.
    ///
    /// Returns `false` when the markdown does not parse. Nothing changes in that case: the
    /// previous form is kept and the markdown remains authoritative.
    pub fn switch_to_form(&mut self) -> bool {
        if self.authority == Authority::Form {
            return true;
        }
        match parse_document(&self.markdown) {
            Ok(parsed) => {
                self.form = parsed.document;
                self.authority = Authority::Form;
                self.regenerate();
                true
            }
            Err(e) => {
                debug!("Keeping markdown authoritative, it did not parse: {e}");
                false
            }
        }
    }

    fn regenerate(&mut self) {
        self.markdown = render_document(&self.name, &self.form);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::resume::fixtures::*;

    fn populated() -> ResumeSynchronizer {
        let doc = valid_document();
        let mut sync = ResumeSynchronizer::new("Jane Doe", None);
        sync.apply(FormEdit::ContactInfo(doc.contact_info)).unwrap();
        sync.apply(FormEdit::Summary(doc.summary)).unwrap();
        sync.apply(FormEdit::Skills(doc.skills)).unwrap();
        for kind in EntryKind::ALL {
            let entries = valid_document().entries(kind).to_vec();
            sync.apply(FormEdit::Entries { kind, entries }).unwrap();
        }
        sync
    }

    #[test]
    fn test_initial_state_without_persisted_document() {
        let sync = ResumeSynchronizer::new("Jane", None);
        assert_eq!(sync.authority(), Authority::Form);
        assert_eq!(sync.markdown(), "");
    }

    #[test]
    fn test_initial_state_with_persisted_document() {
        let sync = ResumeSynchronizer::new("Jane", Some("## Skills\n\nRust".into()));
        assert_eq!(sync.authority(), Authority::Markdown);
        assert_eq!(sync.markdown(), "## Skills\n\nRust");
    }

    #[test]
    fn test_blank_persisted_document_starts_form_authoritative() {
        let sync = ResumeSynchronizer::new("Jane", Some("  \n".into()));
        assert_eq!(sync.authority(), Authority::Form);
    }

    #[test]
    fn test_structured_edit_regenerates_markdown() {
        let mut sync = ResumeSynchronizer::new("Jane", None);
        let md = sync.apply(FormEdit::Skills("Rust, Go, SQL".into())).unwrap();
        assert_eq!(md, "## Skills\n\nRust, Go, SQL");
        sync.apply(FormEdit::Skills(String::new())).unwrap();
        assert_eq!(sync.markdown(), "");
    }

    #[test]
    fn test_markdown_passes_through_unmodified() {
        let mut sync = populated();
        sync.switch_to_markdown();
        let raw = "## Skills\n\n  Rust ,Go  \n\n\n".to_string();
        sync.edit_markdown(raw.clone()).unwrap();
        assert_eq!(sync.markdown(), raw);
    }

    #[test]
    fn test_edits_to_non_authoritative_side_rejected() {
        let mut sync = ResumeSynchronizer::new("Jane", None);
        assert_eq!(
            sync.edit_markdown("x".into()),
            Err(SyncError::MarkdownNotAuthoritative)
        );
        sync.switch_to_markdown();
        assert_eq!(
            sync.apply(FormEdit::Summary("x".into())).map(str::to_string),
            Err(SyncError::FormNotAuthoritative)
        );
    }

    #[test]
    fn test_switch_back_reparses_conforming_markdown() {
        let mut sync = populated();
        sync.switch_to_markdown();
        let edited = sync.markdown().replace("Rust, PostgreSQL, Kubernetes", "Rust, Go, Kafka");
        sync.edit_markdown(edited).unwrap();
        sync.switch_to_form();
        assert_eq!(sync.authority(), Authority::Form);
        assert_eq!(sync.form().skills, "Rust, Go, Kafka");
        assert_eq!(sync.form().experience, valid_document().experience);
    }

    #[test]
    fn test_failed_reparse_keeps_previous_form_and_markdown() {
        let mut sync = populated();
        let before = sync.form().clone();
        sync.switch_to_markdown();
        let custom = "# Completely custom\n\nfree text".to_string();
        sync.edit_markdown(custom.clone()).unwrap();

        assert!(!sync.switch_to_form());
        assert_eq!(sync.authority(), Authority::Markdown);
        assert_eq!(sync.form(), &before);
        assert_eq!(sync.markdown(), custom);

        // Still editable, and a later conforming edit switches normally.
        sync.edit_markdown(render_document("Jane Doe", &before)).unwrap();
        assert!(sync.switch_to_form());
        assert_eq!(sync.authority(), Authority::Form);
        assert_eq!(sync.form(), &before);
    }

    #[test]
    fn test_unparseable_persisted_markdown_survives_switch() {
        let saved = "## Hobbies\n\nClimbing, chess".to_string();
        let mut sync = ResumeSynchronizer::new("Jane Doe", Some(saved.clone()));
        assert!(!sync.switch_to_form());
        assert_eq!(sync.authority(), Authority::Markdown);
        assert_eq!(sync.markdown(), saved);
        assert_eq!(sync.form(), &ResumeDocument::default());
    }

    #[test]
    fn test_rendered_markdown_with_heading_like_description_switches_back() {
        let mut sync = populated();
        let mut entry = valid_document().experience[0].clone();
        entry.description = format!("{}\n### Highlights\n- Led the migration", entry.description);
        sync.apply(FormEdit::Entries {
            kind: EntryKind::Experience,
            entries: vec![entry.clone()],
        })
        .unwrap();
        let md = sync.markdown().to_string();

        sync.switch_to_markdown();
        assert!(sync.switch_to_form());
        assert_eq!(sync.form().experience, vec![entry]);
        assert_eq!(sync.markdown(), md);
    }

    #[test]
    fn test_persisted_markdown_populates_form_on_first_switch() {
        let md = render_document("Jane Doe", &valid_document());
        let mut sync = ResumeSynchronizer::new("Jane Doe", Some(md.clone()));
        assert!(sync.switch_to_form());
        assert_eq!(sync.form(), &valid_document());
        assert_eq!(sync.markdown(), md);
    }

    #[test]
    fn test_switching_to_current_authority_is_noop() {
        let mut sync = populated();
        let md = sync.markdown().to_string();
        assert!(sync.switch_to_form());
        assert_eq!(sync.markdown(), md);
    }
}
