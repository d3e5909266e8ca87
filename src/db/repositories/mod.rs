pub mod projects;
pub mod status_history;
pub mod users;

pub use projects::ProjectsRepo;
pub use status_history::StatusHistoryRepo;
pub use users::UsersRepo;
