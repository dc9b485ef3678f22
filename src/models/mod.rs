pub mod dashboard;
pub mod period;
pub mod record;
pub mod task;
