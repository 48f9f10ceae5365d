pub mod import;
pub mod symbol;
pub mod types;

pub use import::*;
pub use symbol::*;
pub use types::*;
