//! 角色权限策略
//!
//! 所有授权判断都经过 [`is_allowed`]，路由层通过
//! [`require_permission`](super::require_permission) 中间件调用。
//!
//! | 资源 | 读 | 新建 | 修改 | 删除 |
//! |------|----|------|------|------|
//! | Menu | 所有角色 | ADMIN, MANAGER | ADMIN, MANAGER | ADMIN, MANAGER |
//! | Order | 所有角色 | 所有角色 | 所有角色 | ADMIN, MANAGER (+ 创建者，在处理器中判断) |
//! | Profile | 所有角色 | - | - | - |

use shared::models::Role;
use std::fmt;

/// 受保护的资源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Menu,
    Order,
    Profile,
}

/// 操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Resource::Menu => "menu",
            Resource::Order => "orders",
            Resource::Profile => "profile",
        })
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::Read => "read",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
        })
    }
}

/// 角色是否允许对资源执行操作
pub fn is_allowed(role: Role, resource: Resource, action: Action) -> bool {
    match (resource, action) {
        (Resource::Menu, Action::Read) => true,
        (Resource::Menu, _) => role.is_manager_or_above(),
        (Resource::Order, Action::Delete) => role.is_manager_or_above(),
        (Resource::Order, _) => true,
        (Resource::Profile, Action::Read) => true,
        (Resource::Profile, _) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROLES: [Role; 3] = [Role::Admin, Role::Manager, Role::Staff];
    const WRITES: [Action; 3] = [Action::Create, Action::Update, Action::Delete];

    #[test]
    fn test_menu_reads_open_to_all() {
        for role in ROLES {
            assert!(is_allowed(role, Resource::Menu, Action::Read));
        }
    }

    #[test]
    fn test_menu_writes_need_manager() {
        for action in WRITES {
            assert!(is_allowed(Role::Admin, Resource::Menu, action));
            assert!(is_allowed(Role::Manager, Resource::Menu, action));
            assert!(!is_allowed(Role::Staff, Resource::Menu, action));
        }
    }

    #[test]
    fn test_orders() {
        for role in ROLES {
            assert!(is_allowed(role, Resource::Order, Action::Read));
            assert!(is_allowed(role, Resource::Order, Action::Create));
            assert!(is_allowed(role, Resource::Order, Action::Update));
        }
        assert!(is_allowed(Role::Manager, Resource::Order, Action::Delete));
        assert!(!is_allowed(Role::Staff, Resource::Order, Action::Delete));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}:{}", Resource::Menu, Action::Update), "menu:update");
    }
}
