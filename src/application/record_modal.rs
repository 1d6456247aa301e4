// New-record modal: record-type field sets on top of the shared modal form
use crate::application::modal_form::{ModalForm, ModalFormConfig, SubmitOutcome};
use crate::application::records_api::RecordsApi;
use crate::presentation::layout::{RECORD_TYPE_FIELD, RESIDENT_SELECT_FIELD};
use crate::presentation::page::{SelectOption, SharedPage};
use crate::presentation::toast::Toaster;
use std::sync::Arc;

const CLEARANCE_TYPE: &str = "clearance";

pub struct NewRecordModal {
    form: ModalForm,
    api: Arc<dyn RecordsApi>,
}

impl NewRecordModal {
    pub fn new(api: Arc<dyn RecordsApi>, page: SharedPage, toaster: Toaster) -> Self {
        let form = ModalForm::new(ModalFormConfig::new_record(), api.clone(), page, toaster);
        Self { form, api }
    }

    pub fn form(&self) -> &ModalForm {
        &self.form
    }

    pub fn selected_type(&self) -> String {
        self.form
            .with_modal(|modal| modal.value(RECORD_TYPE_FIELD).unwrap_or_default().to_string())
            .unwrap_or_default()
    }

    /// Reveal the modal and load its selection controls.
    pub async fn open(&self) {
        self.form.open();
        if self.selected_type() == CLEARANCE_TYPE {
            futures::join!(self.load_record_types(), self.load_residents());
        } else {
            self.load_record_types().await;
        }
    }

    pub fn close(&self) {
        self.form.close();
    }

    /// Show and enable only the field set of `record_type`.
    pub async fn change_record_type(&self, record_type: &str) {
        self.form.with_modal(|modal| {
            modal.set_value(RECORD_TYPE_FIELD, record_type);
            modal.show_fieldset_for(record_type);
        });

        if record_type == CLEARANCE_TYPE {
            self.load_residents().await;
        }
    }

    pub async fn load_record_types(&self) {
        match self.api.record_types().await {
            Ok(types) => {
                let options = types
                    .into_iter()
                    .map(|t| SelectOption::new(t.value, t.label))
                    .collect();
                self.form.with_modal(|modal| {
                    modal.set_options(RECORD_TYPE_FIELD, "Select Record Type", options)
                });
            }
            Err(e) => tracing::error!("Error loading record types: {}", e),
        }
    }

    pub async fn load_residents(&self) {
        match self.api.residents().await {
            Ok(residents) => {
                let options = residents
                    .iter()
                    .map(|r| SelectOption::new(r.id.to_string(), r.label()))
                    .collect();
                self.form.with_modal(|modal| {
                    modal.set_options(RESIDENT_SELECT_FIELD, "Select Resident", options)
                });
            }
            Err(e) => tracing::error!("Error loading residents: {}", e),
        }
    }

    pub async fn submit(&self) -> SubmitOutcome {
        self.form.submit().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::MockApi;
    use crate::presentation::layout::{NEW_RECORD_MODAL, dashboard_page};
    use crate::presentation::page::{lock, shared};
    use crate::presentation::toast::DEFAULT_TOAST_TTL;
    use std::sync::atomic::Ordering;

    fn modal(api: Arc<MockApi>) -> (NewRecordModal, SharedPage) {
        let page = shared(dashboard_page());
        let toaster = Toaster::new(page.clone(), DEFAULT_TOAST_TTL);
        (NewRecordModal::new(api, page.clone(), toaster), page)
    }

    #[tokio::test]
    async fn test_open_loads_record_types() {
        let api = Arc::new(MockApi::default());
        let (modal, page) = modal(api.clone());

        modal.open().await;

        let page = lock(&page);
        let view = page.modal(NEW_RECORD_MODAL).unwrap();
        assert!(view.visible);
        let options = &view.field(RECORD_TYPE_FIELD).unwrap().options;
        assert_eq!(options.len(), 5);
        assert_eq!(options[0].label, "Select Record Type");
        assert_eq!(api.record_types_calls.load(Ordering::SeqCst), 1);
        assert_eq!(api.residents_calls.load(Ordering::SeqCst), 0);
        drop(page);

        modal.close();
        modal.open().await;
        assert_eq!(api.record_types_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_clearance_type_loads_residents() {
        let api = Arc::new(MockApi::default());
        let (modal, page) = modal(api.clone());
        modal.open().await;

        modal.change_record_type("blotter").await;
        assert_eq!(api.residents_calls.load(Ordering::SeqCst), 0);

        modal.change_record_type("clearance").await;
        assert_eq!(api.residents_calls.load(Ordering::SeqCst), 1);

        let page = lock(&page);
        let view = page.modal(NEW_RECORD_MODAL).unwrap();
        assert!(view.fieldset("clearanceFields").unwrap().visible);
        assert!(!view.fieldset("blotterFields").unwrap().visible);
        let residents = &view.field(RESIDENT_SELECT_FIELD).unwrap().options;
        assert_eq!(residents[0].label, "Select Resident");
        assert_eq!(residents[1], SelectOption::new("4", "Maria Santos - Purok 1"));
    }

    #[tokio::test]
    async fn test_close_hides_all_fieldsets() {
        let api = Arc::new(MockApi::default());
        let (modal, page) = modal(api);
        modal.open().await;
        modal.change_record_type("household").await;
        modal.form().set_value("headName", "Jose Rizal");

        modal.close();

        let page = lock(&page);
        let view = page.modal(NEW_RECORD_MODAL).unwrap();
        assert!(!view.visible);
        assert!(view.fieldsets.iter().all(|set| !set.visible));
        assert!(view.fieldsets.iter().flat_map(|set| set.fields.iter()).all(|f| f.disabled && f.value.is_empty()));
        assert_eq!(view.value(RECORD_TYPE_FIELD), Some(""));
    }
}
