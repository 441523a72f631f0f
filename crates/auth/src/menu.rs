//! Permission-checked navigation tree.
//!
//! The menu is a static tree of labeled nodes, each optionally gated by a
//! permission. Visibility is resolved per principal: a leaf is visible when
//! its gate passes; a branch is visible when its own gate passes and at
//! least one child survives.

use serde::{Deserialize, Serialize};

use crate::{Permission, Principal};

/// One node in the navigation tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub label: String,
    /// `None` means visible to everyone who can see the parent.
    pub permission: Option<Permission>,
    pub children: Vec<MenuItem>,
}

impl MenuItem {
    pub fn leaf(label: impl Into<String>, permission: &'static str) -> Self {
        Self {
            label: label.into(),
            permission: Some(Permission::new(permission)),
            children: Vec::new(),
        }
    }

    pub fn open_leaf(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            permission: None,
            children: Vec::new(),
        }
    }

    pub fn branch(label: impl Into<String>, children: Vec<MenuItem>) -> Self {
        Self {
            label: label.into(),
            permission: None,
            children,
        }
    }

    fn allowed(&self, principal: &Principal) -> bool {
        match &self.permission {
            None => true,
            Some(required) => principal.has_permission(required),
        }
    }

    /// The subtree visible to `principal`, or `None` if this node vanishes.
    fn visible_for(&self, principal: &Principal) -> Option<MenuItem> {
        if !self.allowed(principal) {
            return None;
        }
        if self.children.is_empty() {
            return Some(self.clone());
        }

        let children: Vec<MenuItem> = self
            .children
            .iter()
            .filter_map(|c| c.visible_for(principal))
            .collect();
        if children.is_empty() {
            return None;
        }
        Some(MenuItem {
            label: self.label.clone(),
            permission: self.permission.clone(),
            children,
        })
    }
}

/// The full navigation tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuTree {
    pub items: Vec<MenuItem>,
}

impl MenuTree {
    /// The default school ERP navigation.
    pub fn school_default() -> Self {
        Self {
            items: vec![
                MenuItem::open_leaf("Dashboard"),
                MenuItem::branch(
                    "Students",
                    vec![
                        MenuItem::leaf("Biodata", "students.read"),
                        MenuItem::leaf("Register Student", "students.write"),
                        MenuItem::leaf("Student Ledger", "reports.read"),
                    ],
                ),
                MenuItem::branch(
                    "Fees",
                    vec![
                        MenuItem::leaf("Generate Fee Batch", "fees.post"),
                        MenuItem::leaf("Receive Fee", "fees.receive"),
                    ],
                ),
                MenuItem::branch(
                    "Accounts",
                    vec![
                        MenuItem::leaf("Chart of Accounts", "accounts.read"),
                        MenuItem::leaf("Journal Voucher", "vouchers.post"),
                        MenuItem::leaf("Approvals", "vouchers.approve"),
                    ],
                ),
                MenuItem::branch(
                    "HR",
                    vec![MenuItem::leaf("Payroll", "payroll.run")],
                ),
                MenuItem::branch(
                    "Inventory",
                    vec![MenuItem::leaf("Stock Items", "inventory.read")],
                ),
                MenuItem::branch(
                    "Administration",
                    vec![
                        MenuItem::leaf("Data Import", "import.run"),
                        MenuItem::leaf("Audit Log", "admin.audit"),
                        MenuItem::leaf("Users & Roles", "admin.users"),
                    ],
                ),
            ],
        }
    }

    /// Filter the tree down to what `principal` may see.
    pub fn visible_for(&self, principal: &Principal) -> Vec<MenuItem> {
        self.items
            .iter()
            .filter_map(|item| item.visible_for(principal))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{authenticate, Role, User};

    fn principal_for(role: Role) -> Principal {
        let users = vec![User::new("u", "U", "pw", vec![role])];
        authenticate(&users, "u", "pw").unwrap()
    }

    fn labels(items: &[MenuItem]) -> Vec<&str> {
        items.iter().map(|i| i.label.as_str()).collect()
    }

    #[test]
    fn admin_sees_the_whole_tree() {
        let menu = MenuTree::school_default();
        let visible = menu.visible_for(&principal_for(Role::admin()));
        assert_eq!(visible.len(), menu.items.len());
    }

    #[test]
    fn clerk_sees_only_read_sections() {
        let menu = MenuTree::school_default();
        let visible = menu.visible_for(&principal_for(Role::clerk()));
        let top = labels(&visible);
        assert!(top.contains(&"Dashboard"));
        assert!(top.contains(&"Students"));
        assert!(!top.contains(&"Fees"));
        assert!(!top.contains(&"Administration"));
    }

    #[test]
    fn branches_without_visible_children_vanish() {
        let menu = MenuTree::school_default();
        let visible = menu.visible_for(&principal_for(Role::registrar()));
        // Registrar has no accounting permissions at all.
        assert!(!labels(&visible).contains(&"Accounts"));
        // But keeps the student section with all three leaves.
        let students = visible.iter().find(|i| i.label == "Students").unwrap();
        assert_eq!(students.children.len(), 3);
    }

    #[test]
    fn ungated_leaves_are_always_visible() {
        let menu = MenuTree::school_default();
        let visible = menu.visible_for(&principal_for(Role::new("janitor")));
        assert_eq!(labels(&visible), vec!["Dashboard"]);
    }
}
