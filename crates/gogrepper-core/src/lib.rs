// Core modules
pub mod config;
pub mod error;
pub mod pattern;
pub mod request;
pub mod session;
pub mod workspace;

// Re-export commonly used types
pub use error::{GogrepError, Result};
pub use pattern::ParsedPattern;
pub use request::{SearchMode, SearchRequest, SearchScope};
pub use session::{InstallAttemptState, Session};
