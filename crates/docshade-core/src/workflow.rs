//! Upload workflow controller
//!
//! Single-session state machine:
//!
//! ```text
//! Idle --(valid file)--> Selecting --(submit)--> Submitting
//! Submitting --(session id)--> AwaitingResult
//! Submitting --(upload failed)--> Idle
//! AwaitingResult --(completed)--> Succeeded --> Idle
//! AwaitingResult --(error / unknown / transport)--> Failed --> Idle
//! ```
//!
//! `submit` drives one session to completion and always hands control back
//! in `Idle`, also when its future is dropped mid-flight; nothing is retried
//! automatically. `submit` borrows the controller mutably, so a second
//! submission cannot start while one is active.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use crate::constants::REMINDER_DELAY;
use crate::error::{ClientError, ClientResult};
use crate::hooks::{ChannelConnector, DocumentBackend, DownloadSink, SessionChannel};
use crate::ledger::Ledger;
use crate::models::{ChannelEvent, DocumentRecord, PdfFile, SessionId, UploadPhase, UploadSession};
use crate::notify::{self, Notification, NotificationId, Notifier};
use crate::scheduler::{ScheduledNotification, Scheduler};
use crate::validation::{validate_pdf, MISSING_FILE_MESSAGE};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowOutcome {
    /// Artifact saved and recorded in the ledger.
    Completed(DocumentRecord),
    /// Channel closed before any terminal status arrived.
    ClosedWithoutResult,
}

pub struct UploadController {
    backend: Arc<dyn DocumentBackend>,
    connector: Arc<dyn ChannelConnector>,
    ledger: Ledger,
    notifier: Arc<dyn Notifier>,
    scheduler: Arc<dyn Scheduler>,
    sink: Arc<dyn DownloadSink>,
    reminder_delay: Duration,
    session: UploadSession,
    validation_error: Option<String>,
    reminders: Vec<ScheduledNotification>,
    pending_notice: Option<NotificationId>,
}

/// Live submission. Dropping it dismisses the pending notification and puts
/// the session back to `Idle`.
struct ActiveSubmission<'a> {
    controller: &'a mut UploadController,
    finished: bool,
}

impl Drop for ActiveSubmission<'_> {
    fn drop(&mut self) {
        let controller = &mut *self.controller;
        if !self.finished {
            tracing::warn!(
                phase = %controller.session.phase,
                session_id = ?controller.session.session_id,
                "Submission abandoned before a result"
            );
        }
        if let Some(id) = controller.pending_notice.take() {
            controller.notifier.dismiss(id);
        }
        controller.session.reset();
    }
}

impl UploadController {
    pub fn new(
        backend: Arc<dyn DocumentBackend>,
        connector: Arc<dyn ChannelConnector>,
        ledger: Ledger,
        notifier: Arc<dyn Notifier>,
        scheduler: Arc<dyn Scheduler>,
        sink: Arc<dyn DownloadSink>,
    ) -> Self {
        Self {
            backend,
            connector,
            ledger,
            notifier,
            scheduler,
            sink,
            reminder_delay: REMINDER_DELAY,
            session: UploadSession::default(),
            validation_error: None,
            reminders: Vec::new(),
            pending_notice: None,
        }
    }

    pub fn with_reminder_delay(mut self, delay: Duration) -> Self {
        self.reminder_delay = delay;
        self
    }

    pub fn phase(&self) -> UploadPhase {
        self.session.phase
    }

    pub fn session_id(&self) -> Option<&SessionId> {
        self.session.session_id.as_ref()
    }

    pub fn selected_file(&self) -> Option<&PdfFile> {
        self.session.selected_file.as_ref()
    }

    /// Inline message from the last failed validation, if any.
    pub fn validation_error(&self) -> Option<&str> {
        self.validation_error.as_deref()
    }

    /// Valid ledger entries, pruning expired ones.
    pub fn documents(&self) -> Vec<DocumentRecord> {
        self.ledger.load()
    }

    /// Pick a file. Invalid picks keep the current phase and record the
    /// inline message; the user can pick again right away.
    pub fn select_file(&mut self, file: Option<PdfFile>) -> ClientResult<()> {
        if let Err(e) = validate_pdf(file.as_ref()) {
            self.validation_error = Some(e.to_string());
            return Err(e);
        }

        if let Some(f) = &file {
            tracing::debug!(file_name = %f.file_name, size = f.size(), "File selected");
        }
        self.validation_error = None;
        self.session.selected_file = file;
        self.session.phase = UploadPhase::Selecting;
        Ok(())
    }

    /// Submit the selected file and follow its session to a terminal event.
    pub async fn submit(&mut self) -> ClientResult<WorkflowOutcome> {
        let file = match self.session.selected_file.take() {
            Some(file) => file,
            None => {
                self.validation_error = Some(MISSING_FILE_MESSAGE.to_string());
                return Err(ClientError::Validation(MISSING_FILE_MESSAGE.to_string()));
            }
        };
        if let Err(e) = validate_pdf(Some(&file)) {
            self.validation_error = Some(e.to_string());
            self.session.selected_file = Some(file);
            return Err(e);
        }
        self.validation_error = None;

        let mut active = ActiveSubmission {
            controller: self,
            finished: false,
        };
        let result = active.controller.run(file).await;
        active.finished = true;
        result
    }

    /// Cancel every reminder that has not fired yet.
    pub fn cancel_reminders(&mut self) {
        for reminder in self.reminders.drain(..) {
            reminder.cancel();
        }
    }

    pub fn pending_reminders(&self) -> usize {
        self.reminders.iter().filter(|r| !r.is_finished()).count()
    }

    async fn run(&mut self, file: PdfFile) -> ClientResult<WorkflowOutcome> {
        self.session.phase = UploadPhase::Submitting;
        tracing::info!(file_name = %file.file_name, size = file.size(), "Submitting document");

        let session_id = match self.backend.submit(&file).await {
            Ok(id) => id,
            Err(e) => {
                tracing::error!(file_name = %file.file_name, error = %e, "Upload failed");
                self.notifier.show(Notification::error(notify::UPLOAD_FAILED));
                return Err(e);
            }
        };

        self.session.session_id = Some(session_id.clone());
        self.session.phase = UploadPhase::AwaitingResult;
        tracing::info!(session_id = %session_id, "Upload accepted, awaiting result");

        let mut channel = match self.connector.connect(&session_id).await {
            Ok(channel) => channel,
            Err(e) => {
                tracing::error!(session_id = %session_id, error = %e, "Failed to open status channel");
                self.notifier.show(Notification::error(notify::CONNECTION_FAILED));
                return Err(e);
            }
        };

        let result = self.track(&session_id, channel.as_mut()).await;
        channel.close().await;

        tracing::debug!(session_id = %session_id, ok = result.is_ok(), "Session finished");
        result
    }

    async fn track(
        &mut self,
        session_id: &SessionId,
        channel: &mut dyn SessionChannel,
    ) -> ClientResult<WorkflowOutcome> {
        let result = loop {
            let event = channel.next_event().await.unwrap_or(ChannelEvent::Closed);
            tracing::debug!(session_id = %session_id, event = ?event, "Channel event");

            match event {
                ChannelEvent::Opened => {
                    if self.pending_notice.is_none() {
                        self.pending_notice = Some(
                            self.notifier
                                .show(Notification::info(notify::PROCESSING_PENDING)),
                        );
                    }
                }
                ChannelEvent::Completed {
                    download_link,
                    file_name,
                } => {
                    self.session.phase = UploadPhase::Succeeded;
                    break self.complete(session_id, download_link, file_name).await;
                }
                ChannelEvent::IncompleteResult => {
                    self.session.phase = UploadPhase::Failed;
                    tracing::warn!(session_id = %session_id, "Completion frame without download link or file name");
                    self.notifier.show(Notification::error(notify::DOWNLOAD_FAILED));
                    break Err(ClientError::Channel(
                        "completion frame missing download link or file name".to_string(),
                    ));
                }
                ChannelEvent::Failed => {
                    self.session.phase = UploadPhase::Failed;
                    tracing::warn!(session_id = %session_id, "Backend reported processing failure");
                    self.notifier
                        .show(Notification::error(notify::PROCESSING_FAILED));
                    break Err(ClientError::Channel("document processing failed".to_string()));
                }
                ChannelEvent::UnknownStatus(status) => {
                    self.session.phase = UploadPhase::Failed;
                    tracing::warn!(session_id = %session_id, status = %status, "Unknown session status");
                    self.notifier.show(Notification::unknown_status(&status));
                    break Err(ClientError::Channel(format!("unknown status: {}", status)));
                }
                ChannelEvent::TransportError(reason) => {
                    self.session.phase = UploadPhase::Failed;
                    tracing::error!(session_id = %session_id, error = %reason, "Status channel error");
                    self.notifier
                        .show(Notification::error(notify::CONNECTION_FAILED));
                    break Err(ClientError::Channel(reason));
                }
                ChannelEvent::Closed => {
                    tracing::info!(session_id = %session_id, "Status channel closed before a result");
                    break Ok(WorkflowOutcome::ClosedWithoutResult);
                }
            }
        };

        if let Some(id) = self.pending_notice.take() {
            self.notifier.dismiss(id);
        }
        result
    }

    async fn complete(
        &mut self,
        session_id: &SessionId,
        download_link: String,
        file_name: String,
    ) -> ClientResult<WorkflowOutcome> {
        let data = match self.backend.fetch_artifact(&download_link).await {
            Ok(data) => data,
            Err(e) => {
                tracing::error!(session_id = %session_id, url = %download_link, error = %e, "Artifact retrieval failed");
                self.notifier.show(Notification::error(notify::DOWNLOAD_FAILED));
                return Err(e);
            }
        };

        let saved_to = match self.sink.save(&file_name, &data) {
            Ok(path) => path,
            Err(e) => {
                tracing::error!(session_id = %session_id, file_name = %file_name, error = %e, "Saving artifact failed");
                self.notifier.show(Notification::error(notify::DOWNLOAD_FAILED));
                return Err(e);
            }
        };
        tracing::info!(
            session_id = %session_id,
            file_name = %file_name,
            path = %saved_to.display(),
            bytes = data.len(),
            "Processed document saved"
        );

        let record = DocumentRecord::new(&file_name, &download_link, Utc::now().timestamp_millis());
        if let Err(e) = self.ledger.record(record.clone()) {
            tracing::warn!(error = %e, "Failed to persist ledger entry");
        }

        self.notifier
            .show(Notification::success(notify::PROCESSING_COMPLETED));

        self.reminders.retain(|r| !r.is_finished());
        self.reminders.push(self.scheduler.schedule(
            self.reminder_delay,
            Notification::info(notify::DOWNLOAD_WINDOW_REMINDER),
        ));

        Ok(WorkflowOutcome::Completed(record))
    }
}
