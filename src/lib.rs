// Dashboard synchronization and record forms for the barangay records app
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
