// Dashboard domain model
use super::records::{Blotter, Resident};
use serde::{Deserialize, Serialize};

/// One fetched, self-contained dashboard state payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    #[serde(default)]
    pub stats: DashboardStats,
    #[serde(default)]
    pub recent_residents: Vec<Resident>,
    #[serde(default)]
    pub open_blotters: Vec<Blotter>,
    #[serde(default)]
    pub clearance_summary: ClearanceSummary,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub total_residents: Option<i64>,
    #[serde(default)]
    pub total_households: Option<i64>,
    #[serde(default)]
    pub active_blotters: Option<i64>,
    #[serde(default)]
    pub clearances_issued_month: Option<i64>,
    #[serde(default)]
    pub new_residents_week: Option<i64>,
    #[serde(default)]
    pub new_households_week: Option<i64>,
    #[serde(default)]
    pub blotters_due_today: Option<i64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearanceSummary {
    #[serde(default)]
    pub pending: i64,
    #[serde(default)]
    pub processed_today: i64,
}

/// A badge label together with its modifier class (empty for none).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub label: String,
    pub class: String,
}

impl Badge {
    pub fn new(label: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            class: class.into(),
        }
    }

    /// Full `class` attribute value, e.g. `badge success`.
    pub fn class_attr(&self) -> String {
        if self.class.is_empty() {
            "badge".to_string()
        } else {
            format!("badge {}", self.class)
        }
    }
}

impl ClearanceSummary {
    pub fn new(pending: i64, processed_today: i64) -> Self {
        Self {
            pending,
            processed_today,
        }
    }

    pub fn sub_text(&self) -> String {
        format!(
            "Pending: {} · Processed today: {}",
            self.pending, self.processed_today
        )
    }

    pub fn pending_badge(&self) -> Badge {
        if self.pending > 0 {
            Badge::new("Pending", "info")
        } else {
            Badge::new("All Clear", "success")
        }
    }

    pub fn processed_badge(&self) -> Badge {
        if self.processed_today > 0 {
            Badge::new("On track", "success")
        } else {
            Badge::new("No activity", "")
        }
    }
}
