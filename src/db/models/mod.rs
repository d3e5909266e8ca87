// Sub-modules organized by functional domain
pub mod api;
pub mod dashboard;
pub mod project;
pub mod status_history;
pub mod user;

// Re-export so that `use crate::db::models::Project` keeps working
pub use api::*;
pub use dashboard::*;
pub use project::*;
pub use status_history::*;
pub use user::*;
