//! Northwind repository contracts, error type and connection plumbing.
//!
//! # Responsibility
//! - Declare the read-only and writable query contracts.
//! - Open one connection per operation from the stored configuration.
//! - Wrap multi-statement writes in a transaction when configured.
//!
//! # Invariants
//! - The repository stores configuration only, never a live connection.
//! - With `atomic_writes`, a failed write leaves no partial rows behind.

use crate::config::{ConfigError, ConnectionConfig};
use crate::db::{open_with_config, DbError};
use crate::model::employee::{Employee, EmployeeId};
use crate::model::product::{Category, Product, ProductId};
use crate::model::projection::{EmployeeRegion, EmployeeSuppliers, EmployeesInRegion};
use crate::model::ValidationError;
use log::{error, info};
use rusqlite::{Connection, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Tables every repository operation may touch.
pub const REQUIRED_TABLES: &[&str] = &[
    "Categories",
    "Suppliers",
    "Products",
    "Regions",
    "Territories",
    "Employees",
    "EmployeeTerritories",
    "Orders",
    "Order Details",
];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for Northwind queries and writes.
#[derive(Debug)]
pub enum RepoError {
    Config(ConfigError),
    Db(DbError),
    Validation(ValidationError),
    /// Target database lacks a Northwind table.
    MissingRequiredTable(&'static str),
    /// Persisted row cannot be mapped to a record.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "northwind repository requires table `{table}`")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted northwind data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::MissingRequiredTable(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<ConfigError> for RepoError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Read-only queries over joined Northwind views.
pub trait NorthwindReadRepository {
    /// Every product joined with its category and supplier.
    fn products_with_category_and_suppliers(&self) -> RepoResult<Vec<Product>>;
    /// Distinct employee/region pairs reachable through employee territories.
    fn employees_with_region(&self) -> RepoResult<Vec<EmployeeRegion>>;
    /// Employee head count grouped by `Employees.Region`.
    fn employee_count_by_region(&self) -> RepoResult<Vec<EmployeesInRegion>>;
    /// One pair per order line linking an employee to a product's supplier.
    fn employees_with_suppliers(&self) -> RepoResult<Vec<EmployeeSuppliers>>;
}

/// Mutating operations over the Northwind schema.
pub trait NorthwindWriteRepository {
    /// Inserts an employee and links the territories that exist.
    fn add_employee_with_territories(&self, employee: &Employee) -> RepoResult<EmployeeId>;
    /// Moves every product of `current_category` to `new_category`.
    fn change_products_category(
        &self,
        current_category: &Category,
        new_category: &Category,
    ) -> RepoResult<usize>;
    /// Inserts products, creating missing categories and suppliers first.
    fn add_products_with_suppliers_and_categories(
        &self,
        products: &[Product],
    ) -> RepoResult<Vec<ProductId>>;
    /// Swaps `order_product` for `same_product` on lines of unshipped orders.
    fn replace_product_while_order_not_shipped(
        &self,
        order_product: &Product,
        same_product: &Product,
    ) -> RepoResult<usize>;
}

/// SQLite-backed Northwind repository.
#[derive(Debug, Clone)]
pub struct SqliteNorthwindRepository {
    config: ConnectionConfig,
}

impl SqliteNorthwindRepository {
    /// Creates a repository after checking the target database once.
    ///
    /// # Errors
    /// - Returns `Db` when the database cannot be opened or migrated.
    /// - Returns `MissingRequiredTable` when a Northwind table is absent.
    pub fn try_new(config: ConnectionConfig) -> RepoResult<Self> {
        let conn = open_with_config(&config)?;
        ensure_northwind_connection_ready(&conn)?;
        Ok(Self { config })
    }

    /// Parses `connection_string` and creates a repository from it.
    pub fn from_connection_string(connection_string: &str) -> RepoResult<Self> {
        Self::try_new(ConnectionConfig::parse(connection_string)?)
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    fn connect(&self) -> RepoResult<Connection> {
        Ok(open_with_config(&self.config)?)
    }

    /// Runs one read on a fresh connection and logs the row count.
    pub(crate) fn run_read<T>(
        &self,
        op: &'static str,
        work: impl FnOnce(&Connection) -> RepoResult<Vec<T>>,
    ) -> RepoResult<Vec<T>> {
        let started_at = Instant::now();
        let result = self.connect().and_then(|conn| work(&conn));
        match &result {
            Ok(rows) => info!(
                "event=repo_op module=repo op={} status=ok rows={} duration_ms={}",
                op,
                rows.len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => log_failure(op, started_at, err),
        }
        result
    }

    /// Runs one write on a fresh connection, inside a transaction when
    /// `atomic_writes` is set.
    pub(crate) fn run_write<T>(
        &self,
        op: &'static str,
        work: impl FnOnce(&Connection) -> RepoResult<T>,
    ) -> RepoResult<T> {
        let started_at = Instant::now();
        let result = self
            .connect()
            .and_then(|mut conn| execute_write(&mut conn, self.config.atomic_writes, work));
        match &result {
            Ok(_) => info!(
                "event=repo_op module=repo op={} status=ok atomic={} duration_ms={}",
                op,
                self.config.atomic_writes,
                started_at.elapsed().as_millis()
            ),
            Err(err) => log_failure(op, started_at, err),
        }
        result
    }
}

fn execute_write<T>(
    conn: &mut Connection,
    atomic: bool,
    work: impl FnOnce(&Connection) -> RepoResult<T>,
) -> RepoResult<T> {
    if !atomic {
        return work(conn);
    }

    // Dropping an uncommitted transaction rolls it back.
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let value = work(&tx)?;
    tx.commit()?;
    Ok(value)
}

fn log_failure(op: &str, started_at: Instant, err: &RepoError) {
    error!(
        "event=repo_op module=repo op={} status=error duration_ms={} error={}",
        op,
        started_at.elapsed().as_millis(),
        err
    );
}

fn ensure_northwind_connection_ready(conn: &Connection) -> RepoResult<()> {
    for &table in REQUIRED_TABLES {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
