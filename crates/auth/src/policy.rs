//! Role-to-permission policy for the school deployments.

use crate::{Permission, Role};

/// Permissions granted by a role.
///
/// Unknown roles grant nothing; the admin role grants the wildcard.
pub fn permissions_for_role(role: &Role) -> Vec<Permission> {
    let perms: &[&'static str] = match role.as_str() {
        "admin" => &["*"],
        "accountant" => &[
            "students.read",
            "fees.post",
            "fees.receive",
            "vouchers.post",
            "vouchers.approve",
            "vouchers.delete",
            "accounts.read",
            "accounts.write",
            "reports.read",
            "payroll.run",
            "inventory.read",
        ],
        "registrar" => &[
            "students.read",
            "students.write",
            "reports.read",
            "import.run",
        ],
        "clerk" => &["students.read", "reports.read", "inventory.read"],
        _ => &[],
    };

    perms.iter().map(|p| Permission::new(*p)).collect()
}
