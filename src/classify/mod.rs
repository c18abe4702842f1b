//! Pure heuristics over blame metadata: how old a line is, and whether the
//! commit that last touched it looks like a bug fix.

pub mod age;
pub mod bugfix;

pub use age::{relative_age, AgeTier};
pub use bugfix::{is_bug_fix, BUG_FIX_KEYWORDS};
