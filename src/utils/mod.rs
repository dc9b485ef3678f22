pub mod clock;
pub mod colors;
pub mod date;
pub mod excel;
pub mod formatting;
pub mod logging;
pub mod path;
pub mod table;
pub mod time;

pub use formatting::{format_axis, format_hm, format_progress};
