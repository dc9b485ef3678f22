pub mod period;
pub mod rolling;
pub mod today;
