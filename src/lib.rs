//! # Gateward - Authentication & Authorization Gate Library
//!
//! This is a facade crate that re-exports all public APIs from the gateward
//! components: the bearer-token authentication gate, the role/permission
//! authorization gate, and the password-reset token lifecycle.
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Password`, `Role`, `Permission`,
//!   `ResetToken`, `User`, etc.
//! - **Authorization**: `PermissionRegistry`, `PermissionOptions`,
//!   `check_permissions`
//! - **Repository traits**: `UserStore`, `EmailClient`
//! - **Use cases**: `RequestPasswordResetUseCase`, `SetPasswordUseCase`
//! - **Adapters**: `PostgresUserStore`, `HashMapUserStore`,
//!   `PostmarkEmailClient`, the JWT codec, and the axum guards
//! - **Service**: `AuthService` - the composition root for the reset routes

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use gateward_core::*;
}

// Re-export most commonly used core types at the root level
pub use gateward_core::{
    AuthzError, Email, IdentityClaim, NewUser, Password, Permission, PermissionOptions,
    PermissionRegistry, ResetToken, Role, User, UserError, check_permissions,
};

// ============================================================================
// Repository Traits (Ports)
// ============================================================================

/// Repository trait definitions
pub mod repositories {
    pub use gateward_core::{UserStore, UserStoreError};
}

// Re-export repository traits at root level
pub use gateward_core::{EmailClient, UserStore, UserStoreError};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use gateward_application::*;
}

// Re-export use cases at root level
pub use gateward_application::{RequestPasswordResetUseCase, SetPasswordUseCase};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// HTTP route handlers
    pub mod http {
        pub use gateward_adapters::http::*;
    }

    /// Persistence implementations
    pub mod persistence {
        pub use gateward_adapters::persistence::*;
    }

    /// Email client implementations
    pub mod email {
        pub use gateward_adapters::email::*;
    }

    /// JWT codec and request guards
    pub mod auth {
        pub use gateward_adapters::auth::*;
    }

    /// Configuration
    pub mod config {
        pub use gateward_adapters::config::*;
    }
}

// Re-export commonly used adapters at root level
pub use gateward_adapters::{
    auth::{AuthzState, Claims, JwtAuthConfig, authenticate, authorize},
    email::{MockEmailClient, PostmarkEmailClient},
    persistence::{HashMapUserStore, PostgresUserStore},
};

// ============================================================================
// Auth Service (Main Entry Point)
// ============================================================================

/// Main auth service
pub use gateward_auth_service::{AuthService, configure_postgresql, get_postgres_pool};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing repository traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use http;
