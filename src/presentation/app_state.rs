// Application state for the preview server handlers
use crate::presentation::events::EventRouter;
use crate::presentation::page::SharedPage;

pub struct AppState {
    pub page: SharedPage,
    pub events: EventRouter,
}
