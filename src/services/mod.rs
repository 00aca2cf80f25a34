pub mod auth_service;
pub mod draw_service;
pub mod user_service;

pub use auth_service::*;
pub use draw_service::*;
pub use user_service::*;
