// Domain layer - Records, dashboard snapshots and their display rules
pub mod dashboard;
pub mod format;
pub mod form;
pub mod records;
