//! CLI command implementations.

pub mod batch;
pub mod raw;
pub mod search;
pub mod serve;

pub use batch::BatchCommand;
pub use raw::RawCommand;
pub use search::SearchCommand;
pub use serve::ServeCommand;
