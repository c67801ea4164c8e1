//! Read-only projections pairing employees with regions, counts or suppliers.

use super::employee::{Employee, Region};
use super::product::Supplier;
use serde::{Deserialize, Serialize};

/// One employee reachable from one region through a territory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRegion {
    pub employee: Employee,
    pub region: Region,
}

/// Head count for one value of `Employees.Region`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeesInRegion {
    /// `None` groups employees with no region set.
    pub region: Option<String>,
    pub employee_amount: i64,
}

/// One employee paired with one supplier of a product the employee ordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSuppliers {
    pub employee: Employee,
    pub supplier: Supplier,
}
