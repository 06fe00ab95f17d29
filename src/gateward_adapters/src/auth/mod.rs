pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, JwtAuthConfig, TokenAuthError, generate_auth_token, validate_auth_token};
pub use middleware::{AuthzState, authenticate, authorize};
