pub mod jwt;
pub mod middleware;
pub mod routes;
pub mod validation;

pub use middleware::AuthUser;
pub use routes::routes;
