pub mod types;
pub mod parser;
pub mod filter;

pub use types::*;
pub use parser::{parse_history, FIELD_SEPARATOR, RECORD_SEPARATOR};
pub use filter::filter_history;
