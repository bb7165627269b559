//! Result source implementations

pub mod memory;
pub mod table;

pub use memory::MemorySource;
pub use table::TableSource;
