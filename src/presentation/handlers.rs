// HTTP request handlers of the preview server
use crate::presentation::app_state::AppState;
use crate::presentation::events::UiEvent;
use crate::presentation::page::lock;
use axum::{Json, extract::State, response::Html};
use std::sync::Arc;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Current state of the synchronized dashboard
pub async fn render_page(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(lock(&state.page).render_html())
}

/// Feed one UI event to the controllers and return the resulting page
pub async fn dispatch_event(State(state): State<Arc<AppState>>, Json(event): Json<UiEvent>) -> Html<String> {
    state.events.dispatch(event).await;
    Html(lock(&state.page).render_html())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dashboard_controller::{ControllerSettings, DashboardController};
    use crate::application::test_support::MockApi;
    use crate::domain::dashboard::{ClearanceSummary, DashboardSnapshot};
    use crate::presentation::events::EventRouter;
    use crate::presentation::layout::dashboard_page;
    use crate::presentation::page::shared;

    fn state(api: Arc<MockApi>) -> Arc<AppState> {
        let page = shared(dashboard_page());
        let controller = Arc::new(DashboardController::new(api, page.clone(), ControllerSettings::default()));
        Arc::new(AppState {
            page,
            events: EventRouter::new(controller),
        })
    }

    #[tokio::test]
    async fn test_dispatch_returns_rendered_page() {
        let snapshot = DashboardSnapshot {
            clearance_summary: ClearanceSummary::new(3, 0),
            ..Default::default()
        };
        let api = Arc::new(MockApi::with_snapshot(snapshot));
        let state = state(api.clone());

        let Html(html) = dispatch_event(State(state.clone()), Json(UiEvent::Refresh)).await;

        assert_eq!(api.dashboard_calls(), 1);
        assert!(html.contains("No residents found"));
        assert!(html.contains("No Open Cases"));
        assert!(html.contains("<span class=\"badge info\">Pending</span>"));
        assert!(!html.contains("loading-overlay"));

        let Html(again) = render_page(State(state)).await;
        assert_eq!(html, again);
    }

    #[tokio::test]
    async fn test_modal_event_changes_rendered_page() {
        let state = state(Arc::new(MockApi::default()));
        let Html(before) = render_page(State(state.clone())).await;
        assert!(before.contains("<button class=\"refresh-btn\">↻ Refresh</button>"));
        assert!(!before.contains("id=\"newRecordModal\""));

        let Html(after) = dispatch_event(State(state), Json(UiEvent::NewRecord)).await;

        assert!(after.contains("<div class=\"modal\" id=\"newRecordModal\">"));
        assert!(after.contains("<button class=\"submit-btn\">Create Record</button>"));
    }

    #[tokio::test]
    async fn test_health_check() {
        assert_eq!(health_check().await, "ok");
    }
}
