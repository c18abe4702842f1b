pub mod types;
pub mod parser;

pub use types::*;
pub use parser::{parse_file_blame, parse_line_attribution};
