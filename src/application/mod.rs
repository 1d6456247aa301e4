// Application layer - Controllers and the API they consume
pub mod dashboard_controller;
pub mod modal_form;
pub mod record_modal;
pub mod records_api;

#[cfg(test)]
pub(crate) mod test_support;
