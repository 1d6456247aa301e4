// Dashboard controller - Keeps the page regions in sync with the records API
use crate::application::modal_form::SubmitOutcome;
use crate::application::record_modal::NewRecordModal;
use crate::application::records_api::RecordsApi;
use crate::domain::dashboard::{ClearanceSummary, DashboardSnapshot, DashboardStats};
use crate::domain::records::{Blotter, Resident, SearchResults};
use crate::presentation::page::{SharedPage, lock};
use crate::presentation::render;
use crate::presentation::toast::{DEFAULT_TOAST_TTL, Toaster};
use chrono::Local;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

pub const DASHBOARD_ERROR: &str = "Failed to load dashboard data";
pub const BUSY_REFRESH_LABEL: &str = "⏳ Loading...";

#[derive(Debug, Clone)]
pub struct ControllerSettings {
    pub refresh_interval: Duration,
    pub toast_ttl: Duration,
    pub search_min_chars: usize,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            refresh_interval: Duration::from_secs(5 * 60),
            toast_ttl: DEFAULT_TOAST_TTL,
            search_min_chars: 2,
        }
    }
}

/// Receives every rendered snapshot (e.g. a charting widget).
pub trait ChartSink: Send + Sync {
    fn update_data(&self, snapshot: &DashboardSnapshot);
}

/// Where a navigation click leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    Residents,
    Blotters,
    Clearances,
}

impl NavTarget {
    pub fn path(&self) -> &'static str {
        match self {
            NavTarget::Residents => "/residents",
            NavTarget::Blotters => "/blotter",
            NavTarget::Clearances => "/clearances",
        }
    }

    /// Match a clicked control by its text and the heading of its panel.
    pub fn from_click(text: &str, panel_heading: Option<&str>) -> Option<Self> {
        if text.contains("View all") {
            let heading = panel_heading?;
            if heading.contains("Residents") {
                return Some(NavTarget::Residents);
            }
            if heading.contains("Blotters") {
                return Some(NavTarget::Blotters);
            }
        }
        if text.contains("Manage") {
            return Some(NavTarget::Clearances);
        }
        None
    }
}

/// Claim on the single in-flight dashboard request. Shows the loading
/// overlay while held and releases both the overlay and the flag on drop.
struct InFlight<'a> {
    flag: &'a AtomicBool,
    page: &'a SharedPage,
}

impl<'a> InFlight<'a> {
    fn claim(flag: &'a AtomicBool, page: &'a SharedPage) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        lock(page).show_overlay();
        Some(Self { flag, page })
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        lock(self.page).hide_overlay();
        self.flag.store(false, Ordering::Release);
    }
}

pub struct DashboardController {
    api: Arc<dyn RecordsApi>,
    page: SharedPage,
    toaster: Toaster,
    settings: ControllerSettings,
    charts: Option<Arc<dyn ChartSink>>,
    new_record: NewRecordModal,
    loading: AtomicBool,
    refresh_task: Mutex<Option<JoinHandle<()>>>,
}

impl DashboardController {
    pub fn new(api: Arc<dyn RecordsApi>, page: SharedPage, settings: ControllerSettings) -> Self {
        let toaster = Toaster::new(page.clone(), settings.toast_ttl);
        let new_record = NewRecordModal::new(api.clone(), page.clone(), toaster.clone());
        Self {
            api,
            page,
            toaster,
            settings,
            charts: None,
            new_record,
            loading: AtomicBool::new(false),
            refresh_task: Mutex::new(None),
        }
    }

    pub fn with_charts(mut self, charts: Arc<dyn ChartSink>) -> Self {
        self.charts = Some(charts);
        self
    }

    pub fn page(&self) -> &SharedPage {
        &self.page
    }

    pub fn toaster(&self) -> &Toaster {
        &self.toaster
    }

    pub fn new_record_modal(&self) -> &NewRecordModal {
        &self.new_record
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    /// Start polling and load the first snapshot.
    pub async fn init(self: &Arc<Self>) {
        self.start_auto_refresh();
        self.fetch_dashboard_data().await;
    }

    /// Fetch and render one snapshot. Returns `false` without touching the
    /// network when a fetch is already in flight.
    pub async fn fetch_dashboard_data(&self) -> bool {
        let Some(_in_flight) = InFlight::claim(&self.loading, &self.page) else {
            tracing::debug!("Dashboard fetch already in flight, skipping");
            return false;
        };

        match self.api.dashboard_stats().await {
            Ok(snapshot) => self.update_dashboard(&snapshot),
            Err(e) => {
                tracing::error!("Error fetching dashboard data: {}", e);
                self.toaster.error(DASHBOARD_ERROR);
            }
        }
        true
    }

    pub fn update_dashboard(&self, snapshot: &DashboardSnapshot) {
        self.update_statistics(&snapshot.stats);
        self.update_recent_residents(&snapshot.recent_residents);
        self.update_open_blotters(&snapshot.open_blotters);
        self.update_clearance_summary(&snapshot.clearance_summary);

        if let Some(charts) = &self.charts {
            charts.update_data(snapshot);
        }
        tracing::debug!(
            "Rendered dashboard: {} residents, {} open blotters",
            snapshot.recent_residents.len(),
            snapshot.open_blotters.len()
        );
    }

    pub fn update_statistics(&self, stats: &DashboardStats) {
        render::render_statistics(&mut lock(&self.page), stats);
    }

    pub fn update_recent_residents(&self, residents: &[Resident]) {
        render::render_recent_residents(&mut lock(&self.page), residents);
    }

    pub fn update_open_blotters(&self, blotters: &[Blotter]) {
        let today = Local::now().date_naive();
        render::render_open_blotters(&mut lock(&self.page), blotters, today);
    }

    pub fn update_clearance_summary(&self, summary: &ClearanceSummary) {
        render::render_clearance_summary(&mut lock(&self.page), summary);
    }

    /// Refresh button: busy label while fetching, then back to the original label.
    pub async fn handle_refresh(&self) {
        if self.is_loading() {
            return;
        }

        let original = {
            let mut page = lock(&self.page);
            let button = &mut page.refresh_button;
            let original = std::mem::replace(&mut button.label, BUSY_REFRESH_LABEL.to_string());
            button.disabled = true;
            button.loading = true;
            original
        };

        self.fetch_dashboard_data().await;

        let mut page = lock(&self.page);
        page.refresh_button.label = original;
        page.refresh_button.disabled = false;
        page.refresh_button.loading = false;
    }

    /// One request per call once the query is long enough. Results are only logged.
    pub async fn handle_search(&self, query: &str) -> Option<SearchResults> {
        if query.chars().count() < self.settings.search_min_chars {
            return None;
        }

        match self.api.search(query).await {
            Ok(results) => {
                tracing::info!(
                    "Search results for {:?}: {} residents, {} blotters",
                    query,
                    results.residents.len(),
                    results.blotters.len()
                );
                Some(results)
            }
            Err(e) => {
                tracing::error!("Search error: {}", e);
                None
            }
        }
    }

    /// Delegated click handler. Returns the navigation it triggered, if any.
    pub fn handle_click(&self, text: &str, panel_heading: Option<&str>) -> Option<NavTarget> {
        let target = NavTarget::from_click(text, panel_heading)?;
        lock(&self.page).navigate(target.path());
        Some(target)
    }

    pub fn view_resident(&self, id: i64) {
        lock(&self.page).navigate(format!("/residents/{id}"));
    }

    pub fn start_auto_refresh(self: &Arc<Self>) {
        let period = self.settings.refresh_interval;
        if period.is_zero() {
            tracing::error!("Refresh interval must be non-zero, auto-refresh disabled");
            return;
        }
        let controller = Arc::downgrade(self);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                let Some(controller) = controller.upgrade() else {
                    break;
                };
                controller.auto_refresh_tick().await;
            }
        });

        let previous = self
            .refresh_task
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .replace(handle);
        if let Some(previous) = previous {
            previous.abort();
        }
    }

    pub fn stop_auto_refresh(&self) {
        let task = self
            .refresh_task
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        if let Some(task) = task {
            task.abort();
        }
    }

    /// Timer body: skipped while the page is hidden or a fetch is in flight.
    pub async fn auto_refresh_tick(&self) -> bool {
        let hidden = lock(&self.page).hidden;
        if hidden {
            tracing::debug!("Page hidden, skipping auto-refresh");
            return false;
        }
        if self.is_loading() {
            tracing::debug!("Fetch in flight, skipping auto-refresh");
            return false;
        }
        self.fetch_dashboard_data().await
    }

    pub async fn show_new_record_modal(&self) {
        self.new_record.open().await;
    }

    pub fn hide_new_record_modal(&self) {
        self.new_record.close();
    }

    /// Submit the new-record form and re-fetch the dashboard after a creation.
    pub async fn submit_new_record(&self) -> SubmitOutcome {
        let outcome = self.new_record.submit().await;
        if outcome.is_created() {
            self.fetch_dashboard_data().await;
        }
        outcome
    }
}

impl Drop for DashboardController {
    fn drop(&mut self) {
        self.stop_auto_refresh();
    }
}
