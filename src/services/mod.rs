pub mod auth_service;
pub mod context;
pub mod dashboard_service;
pub mod projects_service;
pub mod seed_service;

pub use auth_service::AuthService;
pub use context::RequestContext;
pub use dashboard_service::DashboardService;
pub use projects_service::ProjectsService;
pub use seed_service::SeedService;
