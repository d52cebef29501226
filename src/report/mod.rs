mod format;

pub use format::{format_amount, format_percent, truncate};
