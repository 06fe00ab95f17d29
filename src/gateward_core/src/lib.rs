pub mod authz;
pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    email::{Email, EmailError},
    password::{Password, PasswordError},
    permission::Permission,
    reset_token::{ResetToken, ResetTokenError},
    role::{Role, UnknownRole},
    user::{IdentityClaim, NewUser, User, UserError},
};

pub use authz::{AuthzError, PermissionOptions, PermissionRegistry, check_permissions};

pub use ports::{
    repositories::{UserStore, UserStoreError},
    services::EmailClient,
};

/// How long an issued reset token stays consumable.
pub const RESET_TOKEN_TTL_SECONDS: i64 = 3600;
