use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use thiserror::Error;

use crate::domain::{permission::Permission, role::Role};

static EMPTY_GRANTS: LazyLock<HashSet<Permission>> = LazyLock::new(HashSet::new);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("Forbidden")]
    Forbidden,
    #[error("Insufficient permissions: missing '{missing}'")]
    InsufficientPermission { missing: Permission },
}

/// Declarative constraints for one protected route, defined at startup
/// and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct PermissionOptions {
    pub roles: Option<Vec<Role>>,
    pub permissions: Option<Vec<Permission>>,
}

impl PermissionOptions {
    pub fn allow_roles(roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            roles: Some(roles.into_iter().collect()),
            permissions: None,
        }
    }

    pub fn require_permissions(permissions: impl IntoIterator<Item = Permission>) -> Self {
        Self {
            roles: None,
            permissions: Some(permissions.into_iter().collect()),
        }
    }

    pub fn with_permissions(mut self, permissions: impl IntoIterator<Item = Permission>) -> Self {
        self.permissions = Some(permissions.into_iter().collect());
        self
    }
}

/// Role → permission map, loaded once at process start and shared
/// read-only from then on.
#[derive(Debug, Clone)]
pub struct PermissionRegistry {
    grants: HashMap<Role, HashSet<Permission>>,
}

impl PermissionRegistry {
    pub fn empty() -> Self {
        Self {
            grants: HashMap::new(),
        }
    }

    pub fn grant(mut self, role: Role, permissions: impl IntoIterator<Item = Permission>) -> Self {
        self.grants.entry(role).or_default().extend(permissions);
        self
    }

    /// Permissions held by a role. A role without an entry holds the
    /// empty set; that is a valid configuration, not an error.
    pub fn permissions_for(&self, role: Role) -> &HashSet<Permission> {
        self.grants.get(&role).unwrap_or(&EMPTY_GRANTS)
    }
}

impl Default for PermissionRegistry {
    fn default() -> Self {
        Self::empty()
            .grant(
                Role::Admin,
                [
                    Permission::from("create:item"),
                    Permission::from("read:item"),
                    Permission::from("update:item"),
                    Permission::from("delete:item"),
                    Permission::from("manage:users"),
                ],
            )
            .grant(
                Role::Moderator,
                [
                    Permission::from("create:item"),
                    Permission::from("read:item"),
                    Permission::from("update:item"),
                    Permission::from("delete:item"),
                ],
            )
            .grant(Role::User, [Permission::from("read:item")])
    }
}

/// Decide allow/deny for an authenticated role against a route's
/// constraints.
///
/// The role check runs strictly before the permission check: when both
/// constraints are configured and the role already fails, the denial is
/// `Forbidden` and the permission set is never consulted. An empty
/// `roles` list constrains nothing, and an empty `permissions` list
/// passes trivially.
pub fn check_permissions(
    options: &PermissionOptions,
    registry: &PermissionRegistry,
    role: Role,
) -> Result<(), AuthzError> {
    if let Some(allowed) = &options.roles {
        if !allowed.is_empty() && !allowed.contains(&role) {
            return Err(AuthzError::Forbidden);
        }
    }

    if let Some(required) = &options.permissions {
        let granted = registry.permissions_for(role);
        if let Some(missing) = required.iter().find(|perm| !granted.contains(*perm)) {
            return Err(AuthzError::InsufficientPermission {
                missing: missing.clone(),
            });
        }
    }

    Ok(())
}
