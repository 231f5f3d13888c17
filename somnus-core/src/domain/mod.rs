// somnus-core/src/domain/mod.rs

pub mod cleaning;
pub mod error;
pub mod exploration;
pub mod modeling;
pub mod partition;
pub mod table;

// Handy re-exports to keep imports short elsewhere
pub use error::DomainError;
pub use partition::SplitView;
