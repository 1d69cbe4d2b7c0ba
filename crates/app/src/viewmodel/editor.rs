//! Log editor overlay: writing, polishing and saving a note

use std::future::Future;

use edulog_core::{ActivityRecord, LocalStorage, Student};
use edulog_net::{RelayProgress, SyncJob, SyncOutcome};
use tracing::{debug, error, info};

use super::{Controller, Overlay};
use crate::toast::Severity;

/// What saving the editor will do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    /// Create a record for a student of the class open at the time
    New { class_id: String },
    /// Replace the content of an existing record
    Edit { record_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    pub student: Student,
    pub class_name: String,
    pub mode: EditorMode,
    pub content: String,
    pub polishing: bool,
    session: u64,
}

impl EditorState {
    pub fn is_edit(&self) -> bool {
        matches!(self.mode, EditorMode::Edit { .. })
    }

    /// Save is disabled while polishing or with blank content
    pub fn can_save(&self) -> bool {
        !self.polishing && !self.content.trim().is_empty()
    }

    pub fn can_polish(&self) -> bool {
        self.can_save()
    }
}

/// An in-flight polish request, tied to the editor session that started it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolishTicket {
    pub session: u64,
    pub text: String,
}

impl<S: LocalStorage + Clone> Controller<S> {
    pub fn editor(&self) -> Option<&EditorState> {
        match &self.overlay {
            Overlay::Editor(editor) => Some(editor),
            _ => None,
        }
    }

    fn editor_mut(&mut self) -> Option<&mut EditorState> {
        match &mut self.overlay {
            Overlay::Editor(editor) => Some(editor),
            _ => None,
        }
    }

    fn open_editor(&mut self, student: Student, class_name: String, mode: EditorMode, content: String) {
        self.editor_session += 1;
        self.overlay = Overlay::Editor(EditorState {
            student,
            class_name,
            mode,
            content,
            polishing: false,
            session: self.editor_session,
        });
    }

    /// Open a blank note for a student of the selected class
    pub fn open_student(&mut self, student_id: &str) {
        let Some(class) = self.active_class() else {
            return;
        };
        let Some(student) = class.find_student(student_id).cloned() else {
            return;
        };
        let (class_id, class_name) = (class.id.clone(), class.name.clone());
        self.open_editor(student, class_name, EditorMode::New { class_id }, String::new());
    }

    /// Reopen a saved record with its content preloaded
    pub fn open_record(&mut self, record_id: &str) {
        let Some(record) = self.records.get(record_id) else {
            return;
        };
        let (student, class_name, content) =
            (record.student(), record.class_name.clone(), record.content.clone());
        let mode = EditorMode::Edit {
            record_id: record_id.to_string(),
        };
        self.open_editor(student, class_name, mode, content);
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        if let Some(editor) = self.editor_mut() {
            if !editor.polishing {
                editor.content = content.into();
            }
        }
    }

    /// Close the editor. An outstanding polish result will be dropped.
    pub fn close_editor(&mut self) {
        if self.editor().is_some() {
            self.overlay = Overlay::None;
        }
    }

    /// Persist the note and close the editor.
    ///
    /// Returns the sync job to run afterwards, if this save should be
    /// mirrored. The local write has completed by the time this returns.
    pub fn save(&mut self) -> Option<SyncJob> {
        let editor = self.editor()?.clone();
        if !editor.can_save() {
            return None;
        }

        let (record, is_edit) = match &editor.mode {
            EditorMode::New { class_id } => {
                let record = ActivityRecord::new(
                    &editor.student,
                    class_id.clone(),
                    editor.class_name.clone(),
                    editor.content.clone(),
                );
                if let Err(e) = self.records.add(record.clone()) {
                    error!(error = %e, "Failed to save record");
                    self.notify("저장 실패", Severity::Error);
                    return None;
                }
                self.notify("임시 저장되었습니다.", Severity::Success);
                (record, false)
            }
            EditorMode::Edit { record_id } => {
                if let Err(e) = self.records.update(record_id, &editor.content) {
                    error!(error = %e, "Failed to update record");
                    self.notify("저장 실패", Severity::Error);
                    return None;
                }
                let record = self.records.get(record_id)?.clone();
                self.notify("기록이 수정되었습니다.", Severity::Success);
                (record, true)
            }
        };
        info!(record_id = %record.id, is_edit, "Record saved");
        self.overlay = Overlay::None;

        let class = match &editor.mode {
            EditorMode::New { class_id } => self.classes.iter().find(|c| &c.id == class_id),
            EditorMode::Edit { .. } => None,
        };
        SyncJob::plan(&self.settings, class, &record, is_edit)
    }

    /// Report a finished sync. The local record is left as is either way.
    pub fn finish_sync(&mut self, outcome: SyncOutcome) {
        self.syncing = false;
        match outcome {
            SyncOutcome::Delivered => self.notify("구글 시트 전송 완료", Severity::Success),
            SyncOutcome::Failed(_) => self.notify("시트 전송 실패", Severity::Error),
        }
    }

    /// Delivery of `job`, detached from the controller so input keeps flowing
    pub fn sync_task(&mut self, job: SyncJob) -> impl Future<Output = SyncOutcome> {
        self.syncing = true;
        let client = self.sync_client.clone();
        async move { client.push(&job).await }
    }

    /// Save, then mirror the record if the save calls for it
    pub async fn save_and_sync(&mut self) -> Option<SyncOutcome> {
        let job = self.save()?;
        let outcome = self.sync_task(job).await;
        self.finish_sync(outcome.clone());
        Some(outcome)
    }

    /// Mark the editor busy and hand out the text to polish
    pub fn begin_polish(&mut self) -> Option<PolishTicket> {
        let editor = self.editor_mut()?;
        if !editor.can_polish() {
            return None;
        }
        editor.polishing = true;
        Some(PolishTicket {
            session: editor.session,
            text: editor.content.clone(),
        })
    }

    /// Apply a polish result if the editor that asked for it is still open
    pub fn finish_polish(&mut self, ticket: PolishTicket, polished: String) {
        match self.editor_mut() {
            Some(editor) if editor.session == ticket.session => {
                editor.content = polished;
                editor.polishing = false;
            }
            _ => {
                debug!(session = ticket.session, "Dropping stale polish result");
                return;
            }
        }
        self.notify("AI 변환 완료", Severity::Success);
    }

    /// Start a polish of the editor content.
    ///
    /// The returned future holds no borrow of the controller; its result goes
    /// back through [`Controller::finish_polish`] with the ticket.
    pub fn polish_task<P>(&mut self, on_progress: P) -> Option<(PolishTicket, impl Future<Output = String>)>
    where
        P: FnMut(RelayProgress),
    {
        let ticket = self.begin_polish()?;
        let relay = self.relay.clone();
        let api_key = self.settings.api_key.clone();
        let text = ticket.text.clone();
        let task = async move { relay.polish(&text, &api_key, on_progress).await };
        Some((ticket, task))
    }

    /// Rewrite the editor content through the relay
    pub async fn polish<P>(&mut self, on_progress: P)
    where
        P: FnMut(RelayProgress),
    {
        let Some((ticket, task)) = self.polish_task(on_progress) else {
            return;
        };
        let polished = task.await;
        self.finish_polish(ticket, polished);
    }
}
