mod date;
mod money;
mod summary;
mod transaction;

pub use date::*;
pub use money::*;
pub use summary::*;
pub use transaction::*;
