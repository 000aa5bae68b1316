pub mod error;
pub mod format;

pub use error::{CostError, Result};
pub use format::format_cost;
