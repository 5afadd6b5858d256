pub mod ask;
pub mod config;
pub mod memory;

pub use ask::AskCommand;
pub use config::ConfigCommand;
pub use memory::MemoryCommand;
