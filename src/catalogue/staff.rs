//! Employee hierarchy: departments containing developers and designers.

use std::convert::Infallible;
use std::fmt;

use crate::catalogue::Describe;
use crate::domain::{Capability, Hierarchy, HierarchyResult, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Developer,
    Designer,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Developer => write!(f, "Developer"),
            Role::Designer => write!(f, "Designer"),
        }
    }
}

impl Capability<Describe> for Role {
    type Output = String;
    type Error = Infallible;

    fn perform(&self, label: &str, _op: &Describe) -> Result<String, Infallible> {
        Ok(format!("{}: {}", self, label))
    }
}

/// Container decoration used when departments announce themselves.
pub fn department_heading(label: &str) -> String {
    format!("Department: {}", label)
}

/// Company → Development (Alice, Bob), Design (Charlie, David).
///
/// Returns the company root.
pub fn company(h: &mut Hierarchy<Role>) -> HierarchyResult<NodeId> {
    let company = h.new_container("Company");
    for (department, members) in [
        (
            "Development",
            [("Alice", Role::Developer), ("Bob", Role::Designer)],
        ),
        (
            "Design",
            [("Charlie", Role::Developer), ("David", Role::Designer)],
        ),
    ] {
        let dept = h.new_container(department);
        for (name, role) in members {
            let member = h.new_leaf(name, role);
            h.attach(dept, member)?;
        }
        h.attach(company, dept)?;
    }
    Ok(company)
}
