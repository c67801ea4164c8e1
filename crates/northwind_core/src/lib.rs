//! Data-access layer over the Northwind sample schema.
//! This crate owns every SQL statement issued against the Northwind tables.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use config::{ConfigError, ConnectionConfig};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::employee::{Employee, EmployeeId, Region, RegionId, Territory, TerritoryId};
pub use model::product::{Category, CategoryId, Product, ProductId, Supplier, SupplierId};
pub use model::projection::{EmployeeRegion, EmployeeSuppliers, EmployeesInRegion};
pub use model::{OrderId, ValidationError};
pub use repo::{
    NorthwindReadRepository, NorthwindWriteRepository, RepoError, RepoResult,
    SqliteNorthwindRepository,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
