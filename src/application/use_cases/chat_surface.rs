use tracing::{debug, warn};

use crate::application::ChatTransport;
use crate::domain::{
    AttachedFile, ChatSettings, CompletionRequest, DomainError, Message, Transcript,
};

/// Assistant message shown when a submission fails for any reason.
pub const FALLBACK_REPLY: &str = "Something went wrong. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceState {
    Idle,
    Composing,
    Submitting,
    Resolved,
    Failed,
}

/// Where an attachment came from. All sources feed the same pending list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachSource {
    Picker,
    Drop,
    Paste,
}

#[derive(Debug, Clone)]
pub enum ClipboardItem {
    Text(String),
    File(AttachedFile),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing was sent because the input was blank.
    Blocked,
    Resolved,
    Failed,
}

/// View-model of the chat screen: transcript, composing input, and pending
/// attachments.
///
/// A submission goes through [`ChatSurface::begin_submit`], which records the
/// user message and clears the input, and [`ChatSurface::finish_submit`], which
/// records exactly one assistant message. [`ChatSurface::submit`] runs both
/// around a [`ChatTransport`] call.
pub struct ChatSurface {
    transcript: Transcript,
    input: String,
    pending_files: Vec<AttachedFile>,
    state: SurfaceState,
    in_flight: usize,
    settings: ChatSettings,
}

impl ChatSurface {
    pub fn new() -> Self {
        Self::with_transcript(Transcript::new())
    }

    pub fn with_transcript(transcript: Transcript) -> Self {
        Self {
            transcript,
            input: String::new(),
            pending_files: Vec::new(),
            state: SurfaceState::Idle,
            in_flight: 0,
            settings: ChatSettings::default(),
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn pending_files(&self) -> &[AttachedFile] {
        &self.pending_files
    }

    pub fn state(&self) -> SurfaceState {
        self.state
    }

    pub fn settings(&self) -> &ChatSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut ChatSettings {
        &mut self.settings
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.refresh_composing();
    }

    pub fn type_char(&mut self, c: char) {
        self.input.push(c);
        self.refresh_composing();
    }

    pub fn type_str(&mut self, text: &str) {
        self.input.push_str(text);
        self.refresh_composing();
    }

    pub fn attach(&mut self, files: Vec<AttachedFile>, source: AttachSource) {
        for file in &files {
            debug!(
                "Attached {:?} file: {} ({} bytes, type {:?})",
                source,
                file.name(),
                file.size(),
                file.mime_type()
            );
        }
        self.pending_files.extend(files);
        self.refresh_composing();
    }

    /// Clipboard paste: files join the pending attachments, text lands in the input.
    pub fn paste(&mut self, items: Vec<ClipboardItem>) {
        let mut files = Vec::new();
        for item in items {
            match item {
                ClipboardItem::Text(text) => self.input.push_str(&text),
                ClipboardItem::File(file) => files.push(file),
            }
        }
        self.attach(files, AttachSource::Paste);
    }

    /// Remove a pending attachment. Out-of-range indices are ignored.
    pub fn remove_file(&mut self, index: usize) -> Option<AttachedFile> {
        if index >= self.pending_files.len() {
            return None;
        }
        let removed = self.pending_files.remove(index);
        self.refresh_composing();
        Some(removed)
    }

    /// Sending requires non-blank text. Attachments alone do not count.
    pub fn can_send(&self) -> bool {
        !self.input.trim().is_empty()
    }

    /// Enter key. With the soft-newline modifier held a newline is inserted;
    /// otherwise the current input is submitted.
    pub fn on_enter(&mut self, soft_newline: bool) -> Option<CompletionRequest> {
        if soft_newline {
            self.type_char('\n');
            return None;
        }
        self.begin_submit()
    }

    /// Record the user message and hand back the request to send.
    ///
    /// Returns `None` without touching the transcript when the input is blank.
    pub fn begin_submit(&mut self) -> Option<CompletionRequest> {
        if !self.can_send() {
            warn!("Cannot send without a message.");
            return None;
        }

        let message = std::mem::take(&mut self.input);
        let files = std::mem::take(&mut self.pending_files);

        self.transcript
            .push(Message::user(message.clone(), files.clone()));
        self.in_flight += 1;
        self.state = SurfaceState::Submitting;

        Some(CompletionRequest::new(message).with_files(files))
    }

    /// Record the assistant side of a submission started with `begin_submit`.
    pub fn finish_submit(&mut self, result: Result<String, DomainError>) -> SubmitOutcome {
        self.in_flight = self.in_flight.saturating_sub(1);

        let (message, outcome) = match result {
            Ok(text) => (Message::assistant(text), SubmitOutcome::Resolved),
            Err(e) => {
                warn!("Error fetching assistant message: {e}");
                (Message::assistant(FALLBACK_REPLY), SubmitOutcome::Failed)
            }
        };
        self.transcript.push(message);

        if self.in_flight == 0 {
            self.state = match outcome {
                SubmitOutcome::Failed => SurfaceState::Failed,
                _ => SurfaceState::Resolved,
            };
        }

        outcome
    }

    pub async fn submit(&mut self, transport: &dyn ChatTransport) -> SubmitOutcome {
        let Some(request) = self.begin_submit() else {
            return SubmitOutcome::Blocked;
        };
        let result = transport.send(&request).await;
        self.finish_submit(result)
    }

    fn refresh_composing(&mut self) {
        if self.in_flight > 0 {
            return;
        }
        self.state = if self.input.is_empty() && self.pending_files.is_empty() {
            SurfaceState::Idle
        } else {
            SurfaceState::Composing
        };
    }
}

impl Default for ChatSurface {
    fn default() -> Self {
        Self::new()
    }
}
