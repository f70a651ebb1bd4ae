//! In-progress resume editing state, one per open editor.
//!
//! A session bundles the synchronizer, one entry editor per timeline collection and the
//! gateways for its two remote actions (save, improve). Sessions live in a
//! [`SessionRegistry`], each behind its own async mutex. Network calls run with the lock
//! released and settle back into the session afterwards.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::gateway::{ActionState, RemoteAction};
use crate::models::resume::ResumeRow;
use crate::resume::document::{ContactInfo, EntryDraft, EntryKind, ResumeDocument, TimelineEntry};
use crate::resume::editor::EntryEditor;
use crate::resume::store::ResumeStore;
use crate::resume::sync::{Authority, FormEdit, ResumeSynchronizer, SyncError};
use crate::schema::resume::validate_resume;

#[derive(Debug)]
pub struct ResumeSession {
    id: Uuid,
    user_id: Uuid,
    sync: ResumeSynchronizer,
    experience: EntryEditor,
    education: EntryEditor,
    projects: EntryEditor,
    save: RemoteAction<ResumeRow>,
    improve: RemoteAction<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EditorSnapshot {
    pub entries: Vec<TimelineEntry>,
    pub draft: EntryDraft,
}

impl From<&EntryEditor> for EditorSnapshot {
    fn from(editor: &EntryEditor) -> Self {
        EditorSnapshot {
            entries: editor.entries().to_vec(),
            draft: editor.draft().clone(),
        }
    }
}

/// Everything the editor screen renders.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub user_id: Uuid,
    pub authority: Authority,
    pub markdown: String,
    pub form: ResumeDocument,
    pub experience: EditorSnapshot,
    pub education: EditorSnapshot,
    pub projects: EditorSnapshot,
    pub save: ActionState<ResumeRow>,
    pub improve: ActionState<String>,
}

impl ResumeSession {
    pub fn open(user_id: Uuid, name: impl Into<String>, persisted: Option<String>) -> Self {
        let sync = ResumeSynchronizer::new(name, persisted);
        let form = sync.form().clone();
        Self {
            id: Uuid::new_v4(),
            user_id,
            experience: EntryEditor::new(EntryKind::Experience, form.experience),
            education: EntryEditor::new(EntryKind::Education, form.education),
            projects: EntryEditor::new(EntryKind::Project, form.projects),
            sync,
            save: RemoteAction::new(),
            improve: RemoteAction::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    #[cfg(test)]
    pub fn authority(&self) -> Authority {
        self.sync.authority()
    }

    #[cfg(test)]
    pub fn markdown(&self) -> &str {
        self.sync.markdown()
    }

    pub fn editor(&self, kind: EntryKind) -> &EntryEditor {
        match kind {
            EntryKind::Experience => &self.experience,
            EntryKind::Education => &self.education,
            EntryKind::Project => &self.projects,
        }
    }

    fn editor_mut(&mut self, kind: EntryKind) -> &mut EntryEditor {
        match kind {
            EntryKind::Experience => &mut self.experience,
            EntryKind::Education => &mut self.education,
            EntryKind::Project => &mut self.projects,
        }
    }

    fn require_form(&self) -> Result<(), SyncError> {
        match self.sync.authority() {
            Authority::Form => Ok(()),
            Authority::Markdown => Err(SyncError::FormNotAuthoritative),
        }
    }

    pub fn apply(&mut self, edit: FormEdit) -> Result<(), SyncError> {
        self.sync.apply(edit).map(|_| ())
    }

    pub fn edit_markdown(&mut self, markdown: String) -> Result<(), SyncError> {
        self.sync.edit_markdown(markdown)
    }

    /// Switching to the form re-reads the entry collections from the re-parsed document.
    /// Markdown that does not parse leaves the session markdown-authoritative.
    pub fn set_authority(&mut self, authority: Authority) {
        match authority {
            Authority::Markdown => self.sync.switch_to_markdown(),
            Authority::Form => {
                if !self.sync.switch_to_form() {
                    return;
                }
                for kind in EntryKind::ALL {
                    let entries = self.sync.form().entries(kind).to_vec();
                    self.editor_mut(kind).reset(entries);
                }
            }
        }
    }

    pub fn set_draft(&mut self, kind: EntryKind, draft: EntryDraft) {
        self.editor_mut(kind).set_draft(draft);
    }

    /// Commits `candidate`, or the stored draft when `None`, and regenerates the markdown.
    pub fn add_entry(&mut self, kind: EntryKind, candidate: Option<EntryDraft>) -> Result<(), AppError> {
        self.require_form()?;
        let editor = self.editor_mut(kind);
        let change = match candidate {
            Some(draft) => editor.add(draft)?,
            None => editor.add_draft()?,
        };
        self.sync.apply(change.into())?;
        Ok(())
    }

    pub fn remove_entry(&mut self, kind: EntryKind, index: usize) -> Result<(), AppError> {
        self.require_form()?;
        let change = self.editor_mut(kind).remove(index)?;
        self.sync.apply(change.into())?;
        Ok(())
    }

    /// The text to persist. A form-authoritative document must pass full resume validation;
    /// hand-edited markdown is stored as typed but must not be blank.
    pub fn save_payload(&self) -> Result<String, AppError> {
        match self.sync.authority() {
            Authority::Form => {
                validate_resume(self.sync.form())?;
            }
            Authority::Markdown => {
                if self.sync.markdown().trim().is_empty() {
                    return Err(AppError::Validation("Resume content cannot be empty".into()));
                }
            }
        }
        Ok(self.sync.markdown().to_string())
    }

    pub fn save_action(&self) -> RemoteAction<ResumeRow> {
        self.save.clone()
    }

    pub fn improve_action(&self) -> RemoteAction<String> {
        self.improve.clone()
    }

    /// Description of the current draft, the input to the improve action.
    pub fn draft_description(&self, kind: EntryKind) -> Result<String, AppError> {
        let description = self.editor(kind).draft().description.trim();
        if description.is_empty() {
            return Err(AppError::Validation(
                "Enter a description before asking for improvements".into(),
            ));
        }
        Ok(description.to_string())
    }

    pub fn set_draft_description(&mut self, kind: EntryKind, description: String) {
        self.editor_mut(kind).set_draft_description(description);
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id,
            user_id: self.user_id,
            authority: self.sync.authority(),
            markdown: self.sync.markdown().to_string(),
            form: self.sync.form().clone(),
            experience: EditorSnapshot::from(&self.experience),
            education: EditorSnapshot::from(&self.education),
            projects: EditorSnapshot::from(&self.projects),
            save: self.save.snapshot(),
            improve: self.improve.snapshot(),
        }
    }
}

/// Applies the contact, summary and skills parts of a form patch, in that order.
pub fn apply_form_fields(
    session: &mut ResumeSession,
    contact_info: Option<ContactInfo>,
    summary: Option<String>,
    skills: Option<String>,
) -> Result<(), SyncError> {
    session.require_form()?;
    if let Some(contact) = contact_info {
        session.apply(FormEdit::ContactInfo(contact))?;
    }
    if let Some(summary) = summary {
        session.apply(FormEdit::Summary(summary))?;
    }
    if let Some(skills) = skills {
        session.apply(FormEdit::Skills(skills))?;
    }
    Ok(())
}

pub type SessionHandle = Arc<Mutex<ResumeSession>>;

#[derive(Debug)]
struct RegistryEntry {
    handle: SessionHandle,
    last_touched: Instant,
}

/// Open sessions by id. Cloning shares the map.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<Uuid, RegistryEntry>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, session: ResumeSession) -> SessionHandle {
        let id = session.id();
        let handle = Arc::new(Mutex::new(session));
        let entry = RegistryEntry {
            handle: Arc::clone(&handle),
            last_touched: Instant::now(),
        };
        self.sessions.write().await.insert(id, entry);
        handle
    }

    /// Looks up a session owned by `user_id` and marks it as recently used.
    /// Someone else's session is reported as missing.
    pub async fn get(&self, id: Uuid, user_id: Uuid) -> Result<SessionHandle, AppError> {
        let not_found = || AppError::NotFound(format!("Resume session {id} not found"));
        let handle = self
            .sessions
            .read()
            .await
            .get(&id)
            .map(|entry| Arc::clone(&entry.handle))
            .ok_or_else(not_found)?;
        if handle.lock().await.user_id() != user_id {
            return Err(not_found());
        }
        if let Some(entry) = self.sessions.write().await.get_mut(&id) {
            entry.last_touched = Instant::now();
        }
        Ok(handle)
    }

    pub async fn remove(&self, id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        self.get(id, user_id).await?;
        self.sessions.write().await.remove(&id);
        info!("Closed resume session {id}");
        Ok(())
    }

    /// Drops sessions not looked up for `max_idle`. A session whose handle is still held
    /// by a running request is kept. Returns how many were dropped.
    pub async fn evict_idle(&self, max_idle: Duration) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| {
            Arc::strong_count(&entry.handle) > 1
                || now.duration_since(entry.last_touched) < max_idle
        });
        before - sessions.len()
    }

    /// Sweeps idle sessions on a fixed period for the life of the process.
    pub fn spawn_idle_sweeper(&self, max_idle: Duration) -> JoinHandle<()> {
        let registry = self.clone();
        let period = (max_idle / 4).clamp(Duration::from_secs(1), Duration::from_secs(60));
        tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let evicted = registry.evict_idle(max_idle).await;
                if evicted > 0 {
                    info!("Evicted {evicted} idle resume sessions");
                }
            }
        })
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// Persists the session's document through its save gateway.
///
/// The payload is taken under the lock; the write itself runs with the lock released.
pub async fn save_session(
    store: &dyn ResumeStore,
    handle: &SessionHandle,
) -> Result<ResumeRow, AppError> {
    let (user_id, content, action) = {
        let session = handle.lock().await;
        (session.user_id(), session.save_payload()?, session.save_action())
    };
    let row = action.run(store.save(user_id, &content)).await?;
    info!("Saved resume for user {user_id} ({} bytes)", row.content.len());
    Ok(row)
}
