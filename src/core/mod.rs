pub mod calculator;
pub mod del;
pub mod import;
pub mod log;
pub mod logic;
pub mod session;
