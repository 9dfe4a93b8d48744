//! Application layer - Use cases and orchestration

pub mod manage_config;
pub mod receipt;
pub mod registry;

pub use manage_config::ConfigService;
pub use receipt::generate_receipt;
pub use registry::Registry;
