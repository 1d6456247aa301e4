// UI events and the dispatcher that routes them to the controllers
use crate::application::dashboard_controller::DashboardController;
use crate::application::modal_form::ModalForm;
use crate::domain::form::FileUpload;
use crate::presentation::layout::NEW_RECORD_MODAL;
use crate::presentation::page::lock;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiEvent {
    Refresh,
    NewRecord,
    Search {
        query: String,
    },
    /// Delegated click on any control, with the heading of its panel.
    Click {
        text: String,
        #[serde(default)]
        panel: Option<String>,
    },
    ViewResident {
        id: i64,
    },
    Visibility {
        hidden: bool,
    },
    OpenModal {
        modal: String,
    },
    RecordTypeChanged {
        value: String,
    },
    Input {
        modal: String,
        name: String,
        value: String,
    },
    FileSelected {
        modal: String,
        file: FileUpload,
    },
    DragOver {
        modal: String,
    },
    DragLeave {
        modal: String,
    },
    Drop {
        modal: String,
        files: Vec<FileUpload>,
    },
    Submit {
        modal: String,
    },
    Close {
        modal: String,
    },
    BackdropClick {
        modal: String,
        on_backdrop: bool,
    },
}

/// Listener table: one dashboard controller plus standalone modal forms.
pub struct EventRouter {
    controller: Arc<DashboardController>,
    forms: Vec<ModalForm>,
}

impl EventRouter {
    pub fn new(controller: Arc<DashboardController>) -> Self {
        Self {
            controller,
            forms: Vec::new(),
        }
    }

    pub fn with_form(mut self, form: ModalForm) -> Self {
        self.forms.push(form);
        self
    }

    pub fn controller(&self) -> &Arc<DashboardController> {
        &self.controller
    }

    fn form(&self, modal: &str) -> Option<&ModalForm> {
        if modal == NEW_RECORD_MODAL {
            return Some(self.controller.new_record_modal().form());
        }
        let form = self.forms.iter().find(|form| form.id() == modal);
        if form.is_none() {
            tracing::warn!("No modal form registered for {}", modal);
        }
        form
    }

    pub async fn dispatch(&self, event: UiEvent) {
        tracing::debug!("Dispatching {:?}", event);
        let controller = &self.controller;

        match event {
            UiEvent::Refresh => controller.handle_refresh().await,
            UiEvent::NewRecord => controller.show_new_record_modal().await,
            UiEvent::Search { query } => {
                controller.handle_search(&query).await;
            }
            UiEvent::Click { text, panel } => {
                controller.handle_click(&text, panel.as_deref());
            }
            UiEvent::ViewResident { id } => controller.view_resident(id),
            UiEvent::Visibility { hidden } => {
                lock(controller.page()).hidden = hidden;
            }
            UiEvent::OpenModal { modal } if modal == NEW_RECORD_MODAL => {
                controller.show_new_record_modal().await
            }
            UiEvent::OpenModal { modal } => {
                if let Some(form) = self.form(&modal) {
                    form.open();
                }
            }
            UiEvent::RecordTypeChanged { value } => {
                controller.new_record_modal().change_record_type(&value).await
            }
            UiEvent::Input { modal, name, value } => {
                if let Some(form) = self.form(&modal) {
                    form.set_value(&name, &value);
                }
            }
            UiEvent::FileSelected { modal, file } => {
                if let Some(form) = self.form(&modal) {
                    form.attach_file(file).await;
                }
            }
            UiEvent::DragOver { modal } => {
                if let Some(form) = self.form(&modal) {
                    form.drag_over();
                }
            }
            UiEvent::DragLeave { modal } => {
                if let Some(form) = self.form(&modal) {
                    form.drag_leave();
                }
            }
            UiEvent::Drop { modal, files } => {
                if let Some(form) = self.form(&modal) {
                    form.drop_files(files).await;
                }
            }
            UiEvent::Submit { modal } if modal == NEW_RECORD_MODAL => {
                controller.submit_new_record().await;
            }
            UiEvent::Submit { modal } => {
                if let Some(form) = self.form(&modal) {
                    form.submit().await;
                }
            }
            UiEvent::Close { modal } => {
                if let Some(form) = self.form(&modal) {
                    form.close();
                }
            }
            UiEvent::BackdropClick { modal, on_backdrop } => {
                if let Some(form) = self.form(&modal) {
                    form.backdrop_click(on_backdrop);
                }
            }
        }
    }
}
