// Transient notifications that dismiss themselves after a fixed delay
use crate::presentation::page::{SharedPage, ToastKind, lock};
use std::time::Duration;

pub const DEFAULT_TOAST_TTL: Duration = Duration::from_secs(5);

#[derive(Clone)]
pub struct Toaster {
    page: SharedPage,
    ttl: Duration,
}

impl Toaster {
    pub fn new(page: SharedPage, ttl: Duration) -> Self {
        Self { page, ttl }
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(ToastKind::Error, message.into());
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(ToastKind::Success, message.into());
    }

    /// Must be called from within a tokio runtime; the dismissal runs as a spawned task.
    fn show(&self, kind: ToastKind, message: String) {
        tracing::debug!("Showing {:?} toast: {}", kind, message);
        let id = lock(&self.page).push_toast(kind, message);

        let page = self.page.clone();
        let ttl = self.ttl;
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            lock(&page).dismiss_toast(id);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::page::{Page, shared};

    #[tokio::test(start_paused = true)]
    async fn test_toast_dismisses_after_ttl() {
        let page = shared(Page::default());
        let toaster = Toaster::new(page.clone(), DEFAULT_TOAST_TTL);

        toaster.error("Failed to load dashboard data");
        assert_eq!(lock(&page).toasts.len(), 1);
        assert_eq!(lock(&page).toasts[0].kind, ToastKind::Error);

        tokio::time::sleep(Duration::from_millis(4_900)).await;
        assert_eq!(lock(&page).toasts.len(), 1);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(lock(&page).toasts.is_empty());
    }
}
