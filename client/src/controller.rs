use crate::api_service::ApiService;
use crate::error::{ClientError, Result, ValidationError};
use crate::file_picker::SelectedFile;
use crate::models::*;
use crate::state::{Control, UiState};
use std::sync::Arc;
use tokio::sync::watch;

pub const UPLOADING_STATUS: &str = "Uploading and indexing...";
pub const ASKING_STATUS: &str = "Retrieving answer...";
pub const HEALTH_STATUS: &str = "Checking backend...";

/// Mediates between UI events and the backend.
///
/// Upload must succeed before questions can be asked, and only one request
/// is ever outstanding: every operation takes `&mut self` and refuses to
/// start while the state is busy. Each transition publishes a fresh
/// [`UiState`] snapshot to subscribers.
pub struct Controller {
    api: Arc<ApiService>,
    state: UiState,
    selected: Option<Arc<SelectedFile>>,
    updates: watch::Sender<UiState>,
}

impl Controller {
    pub fn new(api: Arc<ApiService>) -> Self {
        let state = UiState::default();
        let (updates, _) = watch::channel(state.clone());

        Self {
            api,
            state,
            selected: None,
            updates,
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn subscribe(&self) -> watch::Receiver<UiState> {
        self.updates.subscribe()
    }

    /// Picker change event. `None` clears the selection.
    pub fn select_file(&mut self, file: Option<SelectedFile>) -> Result<()> {
        self.ensure_enabled(Control::FilePicker)?;

        self.state.selected_file = file.as_ref().map(SelectedFile::summary);
        self.selected = file.map(Arc::new);
        self.publish();
        Ok(())
    }

    /// Question input change event.
    pub fn set_question(&mut self, text: impl Into<String>) -> Result<()> {
        self.ensure_enabled(Control::QuestionInput)?;

        self.state.question = text.into();
        self.publish();
        Ok(())
    }

    pub async fn upload(&mut self) -> Result<UploadResponse> {
        self.ensure_enabled(Control::Upload)?;
        self.state.clear_messages();

        let file = match validate_upload(self.selected.as_ref()).map(Arc::clone) {
            Ok(file) => file,
            Err(e) => {
                log::debug!("Upload rejected locally: {}", e);
                self.state.upload_status = e.to_string();
                self.publish();
                return Err(e.into());
            }
        };

        let api = Arc::clone(&self.api);
        let mut busy = self.begin(|state| state.upload_status = UPLOADING_STATUS.to_string());

        let result = api.upload_pdf(&file).await;
        match &result {
            Ok(response) => {
                if let Some(message) = &response.message {
                    log::info!("Backend: {}", message);
                }
                log::info!("{} indexed into {} chunks", file.name, response.chunks);
                let state = busy.state();
                state.ready = true;
                state.upload_status = format!(
                    "PDF ready. Indexed {} chunks. You can ask questions now.",
                    response.chunks
                );
            }
            Err(e) => {
                log::warn!("Upload of {} failed: {}", file.name, e);
                // A failed re-upload keeps an earlier document askable.
                let state = busy.state();
                state.upload_status.clear();
                state.error = e.to_string();
            }
        }

        result
    }

    pub async fn ask(&mut self) -> Result<AskResponse> {
        if self.state.busy {
            return Err(ClientError::Busy);
        }
        self.state.clear_messages();

        let question = match validate_question(self.state.ready, &self.state.question).map(str::to_string) {
            Ok(question) => question,
            Err(e) => {
                log::debug!("Question rejected locally: {}", e);
                self.state.error = e.to_string();
                self.publish();
                return Err(e.into());
            }
        };

        let api = Arc::clone(&self.api);
        let mut busy = self.begin(|state| state.ask_status = ASKING_STATUS.to_string());

        let result = api.ask(&question).await;
        let state = busy.state();
        state.ask_status.clear();
        match &result {
            Ok(response) => state.answer = response.answer.clone(),
            Err(e) => {
                log::warn!("Question failed: {}", e);
                state.error = e.to_string();
            }
        }

        result
    }

    pub async fn health(&mut self) -> Result<HealthResponse> {
        if self.state.busy {
            return Err(ClientError::Busy);
        }
        self.state.clear_messages();

        let api = Arc::clone(&self.api);
        let mut busy = self.begin(|state| state.ask_status = HEALTH_STATUS.to_string());

        let result = api.health().await;
        let state = busy.state();
        match &result {
            Ok(response) => {
                state.ask_status = format!("Backend at {} is {}.", api.api_base(), response.status)
            }
            Err(e) => {
                log::warn!("Health check failed: {}", e);
                state.ask_status.clear();
                state.error = e.to_string();
            }
        }

        result
    }

    fn ensure_enabled(&self, control: Control) -> Result<()> {
        if self.state.busy {
            return Err(ClientError::Busy);
        }
        if !self.state.controls().is_enabled(control) {
            return Err(ClientError::Disabled(control));
        }
        Ok(())
    }

    fn begin(&mut self, update: impl FnOnce(&mut UiState)) -> BusyGuard<'_> {
        self.state.busy = true;
        update(&mut self.state);
        self.publish();

        BusyGuard {
            state: &mut self.state,
            updates: &self.updates,
        }
    }

    fn publish(&self) {
        self.updates.send_replace(self.state.clone());
    }
}

/// Holds the busy flag for one request and clears it when dropped, so the
/// controls come back even if the request future is abandoned.
struct BusyGuard<'a> {
    state: &'a mut UiState,
    updates: &'a watch::Sender<UiState>,
}

impl BusyGuard<'_> {
    fn state(&mut self) -> &mut UiState {
        &mut *self.state
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.state.busy = false;
        self.updates.send_replace(self.state.clone());
    }
}

fn validate_upload(selected: Option<&Arc<SelectedFile>>) -> std::result::Result<&Arc<SelectedFile>, ValidationError> {
    let file = selected.ok_or(ValidationError::NoFileSelected)?;
    if !file.is_pdf() {
        return Err(ValidationError::NotPdf);
    }
    Ok(file)
}

fn validate_question(ready: bool, question: &str) -> std::result::Result<&str, ValidationError> {
    if !ready {
        return Err(ValidationError::NotUploaded);
    }
    let question = question.trim();
    if question.is_empty() {
        return Err(ValidationError::EmptyQuestion);
    }
    Ok(question)
}
