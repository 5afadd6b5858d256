pub mod filter;
pub mod json;

pub use filter::MemoryFilter;
pub use json::JsonStore;
