//! Symbol table assembly
//!
//! - **`builder`**: drives the function table and name resolver, optionally
//!   on a worker pool
//! - **`table`**: the resulting [`SymbolTable`] with address lookup

pub mod builder;
pub mod table;

pub use builder::{build, BuildFailure};
pub use table::{Symbol, SymbolTable};
