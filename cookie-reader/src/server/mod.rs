pub mod handler;
pub mod service;

pub use handler::CookieRoutes;
pub use service::CookieSvc;
