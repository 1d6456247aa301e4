// Presentation layer - Page model, renderers, UI events and the preview server
pub mod app_state;
pub mod events;
pub mod handlers;
pub mod layout;
pub mod page;
pub mod render;
pub mod toast;
