//! Lookup of security types by key.

use std::collections::HashMap;
use std::sync::Arc;

use tracker_database::store::{ProjectRoleStore, UserDirectory};

use super::{
    AssigneeSecurityType, GroupSecurityType, ProjectLeadSecurityType, ProjectRoleSecurityType,
    ReporterSecurityType, SecurityType, SingleUserSecurityType,
};

/// Security types available to permission schemes and to issue security
/// schemes. The two sets are registered separately; the built-in types are
/// valid in both.
#[derive(Clone, Default)]
pub struct SecurityTypeRegistry {
    permission_types: HashMap<&'static str, Arc<dyn SecurityType>>,
    issue_security_types: HashMap<&'static str, Arc<dyn SecurityType>>,
}

impl std::fmt::Debug for SecurityTypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut permission: Vec<_> = self.permission_types.keys().collect();
        let mut issue_security: Vec<_> = self.issue_security_types.keys().collect();
        permission.sort();
        issue_security.sort();
        f.debug_struct("SecurityTypeRegistry")
            .field("permission_types", &permission)
            .field("issue_security_types", &issue_security)
            .finish()
    }
}

impl SecurityTypeRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in types, registered for both scheme families.
    pub fn standard(
        directory: Arc<dyn UserDirectory>,
        roles: Arc<dyn ProjectRoleStore>,
    ) -> Self {
        let types: [Arc<dyn SecurityType>; 6] = [
            Arc::new(GroupSecurityType::new(directory)),
            Arc::new(ProjectRoleSecurityType::new(roles)),
            Arc::new(SingleUserSecurityType),
            Arc::new(ProjectLeadSecurityType),
            Arc::new(ReporterSecurityType),
            Arc::new(AssigneeSecurityType),
        ];

        let mut registry = Self::new();
        for ty in types {
            registry.register_permission_type(ty.clone());
            registry.register_issue_security_type(ty);
        }
        registry
    }

    /// Register a type usable in permission schemes. Replaces any type with the same key.
    pub fn register_permission_type(&mut self, ty: Arc<dyn SecurityType>) -> &mut Self {
        self.permission_types.insert(ty.key(), ty);
        self
    }

    /// Register a type usable in issue security schemes.
    pub fn register_issue_security_type(&mut self, ty: Arc<dyn SecurityType>) -> &mut Self {
        self.issue_security_types.insert(ty.key(), ty);
        self
    }

    /// Type for a permission scheme entity.
    pub fn permission_type(&self, key: &str) -> Option<Arc<dyn SecurityType>> {
        self.permission_types.get(key).cloned()
    }

    /// Type for an issue security level grant.
    pub fn issue_security_type(&self, key: &str) -> Option<Arc<dyn SecurityType>> {
        self.issue_security_types.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeDirectory, FakeRoles};

    #[test]
    fn test_standard_registry_knows_builtin_keys() {
        let registry = SecurityTypeRegistry::standard(
            Arc::new(FakeDirectory::default()),
            Arc::new(FakeRoles::default()),
        );
        for key in ["group", "projectrole", "user", "lead", "reporter", "assignee"] {
            assert!(registry.permission_type(key).is_some(), "{key}");
            assert!(registry.issue_security_type(key).is_some(), "{key}");
        }
        assert!(registry.permission_type("sd.customer.portal.only").is_none());
    }

    #[test]
    fn test_families_are_separate() {
        let mut registry = SecurityTypeRegistry::new();
        registry.register_issue_security_type(Arc::new(ReporterSecurityType));
        assert!(registry.issue_security_type("reporter").is_some());
        assert!(registry.permission_type("reporter").is_none());
    }
}
