pub mod admin;
pub mod health;
pub mod redirect;

pub use admin::bookmark_routes;
pub use health::{HealthService, health_routes};
pub use redirect::{RedirectService, redirect_routes};
