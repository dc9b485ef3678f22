pub mod initialize;
pub mod log;
pub(crate) mod row;
pub mod store;

pub use store::LogStore;
