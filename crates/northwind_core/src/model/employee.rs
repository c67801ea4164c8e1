//! Employee, territory and region records.

use super::{limit_text, require_text, ValidationError};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub type EmployeeId = i64;
pub type RegionId = i64;
/// Northwind territory ids are postal-code-like text, e.g. `"01581"`.
pub type TerritoryId = String;

const LAST_NAME_MAX: usize = 20;
const FIRST_NAME_MAX: usize = 10;
const TITLE_MAX: usize = 30;
const TITLE_OF_COURTESY_MAX: usize = 25;

/// Row of `Employees` plus the territories it is associated with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub employee_id: EmployeeId,
    pub last_name: String,
    pub first_name: String,
    pub title: Option<String>,
    pub title_of_courtesy: Option<String>,
    pub birth_date: Option<NaiveDateTime>,
    pub hire_date: Option<NaiveDateTime>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub home_phone: Option<String>,
    pub extension: Option<String>,
    pub photo: Option<Vec<u8>>,
    pub notes: Option<String>,
    /// Self-reference to the manager's `employee_id`.
    pub reports_to: Option<EmployeeId>,
    pub photo_path: Option<String>,
    /// Only written by inserts; reads leave it empty.
    pub territories: Vec<Territory>,
}

impl Employee {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            employee_id: 0,
            last_name: last_name.into(),
            first_name: first_name.into(),
            title: None,
            title_of_courtesy: None,
            birth_date: None,
            hire_date: None,
            address: None,
            city: None,
            region: None,
            postal_code: None,
            country: None,
            home_phone: None,
            extension: None,
            photo: None,
            notes: None,
            reports_to: None,
            photo_path: None,
            territories: Vec::new(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("Employee", "last_name", &self.last_name, LAST_NAME_MAX)?;
        require_text("Employee", "first_name", &self.first_name, FIRST_NAME_MAX)?;
        limit_text("Employee", "title", self.title.as_deref(), TITLE_MAX)?;
        limit_text(
            "Employee",
            "title_of_courtesy",
            self.title_of_courtesy.as_deref(),
            TITLE_OF_COURTESY_MAX,
        )
    }
}

/// Row of `Territories`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Territory {
    pub territory_id: TerritoryId,
    pub territory_description: Option<String>,
    pub region_id: Option<RegionId>,
}

impl Territory {
    /// Creates a reference to a territory by id, as used for employee inserts.
    pub fn new(territory_id: impl Into<TerritoryId>) -> Self {
        Self {
            territory_id: territory_id.into(),
            territory_description: None,
            region_id: None,
        }
    }
}

/// Row of `Regions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub region_id: RegionId,
    pub region_description: String,
}
