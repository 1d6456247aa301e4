// In-memory RecordsApi used by the controller and form tests
use crate::application::records_api::{ApiError, RecordsApi, SubmitReply};
use crate::domain::dashboard::DashboardSnapshot;
use crate::domain::form::FormSubmission;
use crate::domain::records::{RecordType, ResidentOption, SearchResults};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

pub struct MockApi {
    snapshot: Mutex<Option<DashboardSnapshot>>,
    gate: Mutex<Option<Arc<Notify>>>,
    submit_reply: Mutex<Result<SubmitReply, String>>,
    submissions: Mutex<Vec<(String, FormSubmission)>>,
    searches: Mutex<Vec<String>>,
    search_fails: AtomicBool,
    pub dashboard_calls: AtomicUsize,
    pub residents_calls: AtomicUsize,
    pub record_types_calls: AtomicUsize,
}

impl Default for MockApi {
    fn default() -> Self {
        Self {
            snapshot: Mutex::new(Some(DashboardSnapshot::default())),
            gate: Mutex::new(None),
            submit_reply: Mutex::new(Ok(SubmitReply::ok(None))),
            submissions: Mutex::new(Vec::new()),
            searches: Mutex::new(Vec::new()),
            search_fails: AtomicBool::new(false),
            dashboard_calls: AtomicUsize::new(0),
            residents_calls: AtomicUsize::new(0),
            record_types_calls: AtomicUsize::new(0),
        }
    }
}

impl MockApi {
    pub fn with_snapshot(snapshot: DashboardSnapshot) -> Self {
        let api = Self::default();
        api.set_snapshot(Some(snapshot));
        api
    }

    /// `None` makes the dashboard endpoint answer 500.
    pub fn set_snapshot(&self, snapshot: Option<DashboardSnapshot>) {
        *self.snapshot.lock().unwrap() = snapshot;
    }

    /// Hold every dashboard request until the returned gate is notified.
    pub fn gate_dashboard(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn set_submit_reply(&self, reply: Result<SubmitReply, ApiError>) {
        *self.submit_reply.lock().unwrap() = reply.map_err(|e| e.to_string());
    }

    pub fn fail_searches(&self) {
        self.search_fails.store(true, Ordering::SeqCst);
    }

    pub fn dashboard_calls(&self) -> usize {
        self.dashboard_calls.load(Ordering::SeqCst)
    }

    pub fn submissions(&self) -> Vec<(String, FormSubmission)> {
        self.submissions.lock().unwrap().clone()
    }

    pub fn searches(&self) -> Vec<String> {
        self.searches.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecordsApi for MockApi {
    async fn dashboard_stats(&self) -> Result<DashboardSnapshot, ApiError> {
        self.dashboard_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        let snapshot = self.snapshot.lock().unwrap().clone();
        snapshot.ok_or(ApiError::Status(500))
    }

    async fn search(&self, query: &str) -> Result<SearchResults, ApiError> {
        self.searches.lock().unwrap().push(query.to_string());
        if self.search_fails.load(Ordering::SeqCst) {
            return Err(ApiError::Status(500));
        }
        Ok(SearchResults::default())
    }

    async fn residents(&self) -> Result<Vec<ResidentOption>, ApiError> {
        self.residents_calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![ResidentOption {
            id: 4,
            first_name: "Maria".to_string(),
            last_name: "Santos".to_string(),
            address: Some("Purok 1".to_string()),
        }])
    }

    async fn record_types(&self) -> Result<Vec<RecordType>, ApiError> {
        self.record_types_calls.fetch_add(1, Ordering::SeqCst);
        Ok(["resident", "household", "blotter", "clearance"]
            .iter()
            .map(|value| RecordType {
                value: value.to_string(),
                label: format!("New {value}"),
            })
            .collect())
    }

    async fn submit_form(&self, path: &str, form: &FormSubmission) -> Result<SubmitReply, ApiError> {
        self.submissions
            .lock()
            .unwrap()
            .push((path.to_string(), form.clone()));
        self.submit_reply
            .lock()
            .unwrap()
            .clone()
            .map_err(ApiError::Transport)
    }
}
