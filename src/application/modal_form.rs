// Reusable modal form: open/close, file preview, validation and multipart submit
use crate::application::records_api::{NEW_RECORD_PATH, RESIDENTS_PATH, RecordsApi};
use crate::domain::form::FileUpload;
use crate::presentation::layout::{ADD_RESIDENT_MODAL, NEW_RECORD_MODAL, RECORD_TYPE_FIELD};
use crate::presentation::page::{ModalView, SharedPage, lock};
use crate::presentation::toast::Toaster;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// What happens after the server accepts a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuccessAction {
    /// Hard-reload the page.
    Reload,
    /// Leave it to the owner to re-fetch the dashboard.
    RefreshDashboard,
}

#[derive(Debug, Clone)]
pub struct RequiredField {
    pub name: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct ModalFormConfig {
    pub modal_id: String,
    pub endpoint: String,
    pub required: Vec<RequiredField>,
    pub busy_label: Option<String>,
    pub success: SuccessAction,
    pub success_message: Option<String>,
    pub failure_message: String,
    pub transport_failure_message: String,
    pub lock_body_scroll: bool,
}

impl ModalFormConfig {
    pub fn new_record() -> Self {
        Self {
            modal_id: NEW_RECORD_MODAL.to_string(),
            endpoint: NEW_RECORD_PATH.to_string(),
            required: vec![RequiredField {
                name: RECORD_TYPE_FIELD.to_string(),
                message: "Please select a record type".to_string(),
            }],
            busy_label: Some("Creating...".to_string()),
            success: SuccessAction::RefreshDashboard,
            success_message: Some("Record created successfully!".to_string()),
            failure_message: "Failed to create record".to_string(),
            transport_failure_message: "An unexpected error occurred. Please try again.".to_string(),
            lock_body_scroll: false,
        }
    }

    pub fn add_resident() -> Self {
        Self {
            modal_id: ADD_RESIDENT_MODAL.to_string(),
            endpoint: RESIDENTS_PATH.to_string(),
            required: Vec::new(),
            busy_label: None,
            success: SuccessAction::Reload,
            success_message: None,
            failure_message: "Error adding resident".to_string(),
            transport_failure_message: "Error adding resident".to_string(),
            lock_body_scroll: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Client-side validation failed; nothing was sent.
    Rejected(String),
    /// A submission is already in flight.
    Busy,
    Created(Option<String>),
    Failed(String),
}

impl SubmitOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self, SubmitOutcome::Created(_))
    }
}

struct Submitting<'a>(&'a AtomicBool);

impl<'a> Submitting<'a> {
    fn claim(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for Submitting<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct ModalForm {
    config: ModalFormConfig,
    api: Arc<dyn RecordsApi>,
    page: SharedPage,
    toaster: Toaster,
    submitting: AtomicBool,
}

impl ModalForm {
    pub fn new(config: ModalFormConfig, api: Arc<dyn RecordsApi>, page: SharedPage, toaster: Toaster) -> Self {
        Self {
            config,
            api,
            page,
            toaster,
            submitting: AtomicBool::new(false),
        }
    }

    pub fn id(&self) -> &str {
        &self.config.modal_id
    }

    pub fn is_open(&self) -> bool {
        self.with_modal(|modal| modal.visible).unwrap_or(false)
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    /// Run `f` against this form's modal. `None` when the page has no such modal.
    pub fn with_modal<R>(&self, f: impl FnOnce(&mut ModalView) -> R) -> Option<R> {
        let mut page = lock(&self.page);
        match page.modal_mut(&self.config.modal_id) {
            Some(modal) => Some(f(modal)),
            None => {
                tracing::error!("Modal {} not found", self.config.modal_id);
                None
            }
        }
    }

    pub fn open(&self) {
        tracing::debug!("Opening modal {}", self.config.modal_id);
        if self.with_modal(|modal| modal.visible = true).is_some() && self.config.lock_body_scroll {
            lock(&self.page).body_scroll_locked = true;
        }
    }

    /// Hide the modal, reset the form and put every field set back to hidden/disabled.
    pub fn close(&self) {
        self.with_modal(|modal| {
            modal.visible = false;
            modal.reset_form();
            modal.show_fieldset_for("");
        });
        if self.config.lock_body_scroll {
            lock(&self.page).body_scroll_locked = false;
        }
    }

    /// Click handler on the modal element; only a click on the backdrop itself closes it.
    pub fn backdrop_click(&self, on_backdrop: bool) {
        if on_backdrop {
            self.close();
        }
    }

    pub fn set_value(&self, name: &str, value: &str) -> bool {
        self.with_modal(|modal| modal.set_value(name, value))
            .unwrap_or(false)
    }

    /// Keep the file for submission and render it into the preview image.
    pub async fn attach_file(&self, file: FileUpload) {
        let encoded = file.clone();
        let preview = match tokio::task::spawn_blocking(move || encoded.to_data_url()).await {
            Ok(url) => url,
            Err(e) => {
                tracing::error!("Could not read {} for preview: {}", file.file_name, e);
                return;
            }
        };

        self.with_modal(|modal| {
            modal.file = Some(file);
            modal.preview_src = Some(preview);
        });
    }

    pub fn drag_over(&self) {
        self.with_modal(|modal| modal.dragging = true);
    }

    pub fn drag_leave(&self) {
        self.with_modal(|modal| modal.dragging = false);
    }

    /// Only the first dropped file is used.
    pub async fn drop_files(&self, files: Vec<FileUpload>) {
        self.drag_leave();
        if let Some(file) = files.into_iter().next() {
            self.attach_file(file).await;
        }
    }

    pub async fn submit(&self) -> SubmitOutcome {
        let Some(_submitting) = Submitting::claim(&self.submitting) else {
            tracing::debug!("Submit ignored, {} is already submitting", self.config.modal_id);
            return SubmitOutcome::Busy;
        };

        let Some(form) = self.with_modal(|modal| modal.collect()) else {
            return SubmitOutcome::Failed(self.config.failure_message.clone());
        };

        for required in &self.config.required {
            if form.get(&required.name).unwrap_or_default().is_empty() {
                self.toaster.error(required.message.clone());
                return SubmitOutcome::Rejected(required.message.clone());
            }
        }

        let original_label = self
            .with_modal(|modal| {
                let label = modal.submit.label.clone();
                if let Some(busy) = &self.config.busy_label {
                    modal.submit.label = busy.clone();
                }
                modal.submit.disabled = true;
                label
            })
            .unwrap_or_default();

        let outcome = match self.api.submit_form(&self.config.endpoint, &form).await {
            Ok(reply) if reply.success => {
                let message = reply.message.or_else(|| self.config.success_message.clone());
                tracing::info!("Submitted {} to {}", self.config.modal_id, self.config.endpoint);
                if let Some(message) = &message {
                    self.toaster.success(message.clone());
                }
                self.close();
                if self.config.success == SuccessAction::Reload {
                    lock(&self.page).reload();
                }
                SubmitOutcome::Created(message)
            }
            Ok(reply) => {
                let message = reply.error.unwrap_or_else(|| self.config.failure_message.clone());
                tracing::warn!("{} rejected by server: {}", self.config.endpoint, message);
                self.toaster.error(message.clone());
                SubmitOutcome::Failed(message)
            }
            Err(e) => {
                tracing::error!("Error submitting {}: {}", self.config.modal_id, e);
                let message = self.config.transport_failure_message.clone();
                self.toaster.error(message.clone());
                SubmitOutcome::Failed(message)
            }
        };

        self.with_modal(|modal| {
            modal.submit.label = original_label;
            modal.submit.disabled = false;
        });
        outcome
    }
}
