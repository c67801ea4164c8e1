#![allow(dead_code)]

use northwind_core::db::open_with_config;
use northwind_core::{ConnectionConfig, SqliteNorthwindRepository};
use rusqlite::Connection;
use tempfile::TempDir;

/// Creates a migrated, empty Northwind database in a temp dir.
pub fn empty_repo() -> (TempDir, SqliteNorthwindRepository) {
    empty_repo_with_options("")
}

/// Like `empty_repo`, appending extra `key=value;` options to the connection string.
pub fn empty_repo_with_options(options: &str) -> (TempDir, SqliteNorthwindRepository) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("northwind.db");
    let connection_string = format!("Data Source={};{options}", path.display());
    let repo = SqliteNorthwindRepository::from_connection_string(&connection_string).unwrap();
    (dir, repo)
}

/// Creates a database holding the catalog, staff and order fixtures.
pub fn seeded_repo() -> (TempDir, SqliteNorthwindRepository) {
    seeded_repo_with_options("")
}

pub fn seeded_repo_with_options(options: &str) -> (TempDir, SqliteNorthwindRepository) {
    let (dir, repo) = empty_repo_with_options(options);
    let conn = connect(repo.config());
    seed_catalog(&conn);
    seed_staff(&conn);
    seed_orders(&conn);
    (dir, repo)
}

pub fn connect(config: &ConnectionConfig) -> Connection {
    open_with_config(config).unwrap()
}

/// Categories 1-3, suppliers 1-3, products 1-5 fully linked and product 6
/// without a category.
pub fn seed_catalog(conn: &Connection) {
    conn.execute_batch(
        "INSERT INTO Categories (CategoryID, CategoryName, Description) VALUES
            (1, 'Beverages', 'Soft drinks, coffees, teas, beers, and ales'),
            (2, 'Condiments', 'Sweet and savory sauces, relishes, spreads, and seasonings'),
            (3, 'Seafood', 'Seaweed and fish');
         INSERT INTO Suppliers (SupplierID, CompanyName, ContactName, City, Country) VALUES
            (1, 'Exotic Liquids', 'Charlotte Cooper', 'London', 'UK'),
            (2, 'New Orleans Cajun Delights', 'Shelley Burke', 'New Orleans', 'USA'),
            (3, 'Tokyo Traders', 'Yoshi Nagase', 'Tokyo', 'Japan');
         INSERT INTO Products
            (ProductID, ProductName, SupplierID, CategoryID, QuantityPerUnit, UnitPrice, UnitsInStock, Discontinued)
         VALUES
            (1, 'Chai', 1, 1, '10 boxes x 20 bags', 18.0, 39, 0),
            (2, 'Chang', 1, 1, '24 - 12 oz bottles', 19.0, 17, 0),
            (3, 'Aniseed Syrup', 1, 2, '12 - 550 ml bottles', 10.0, 13, 0),
            (4, 'Chef Anton''s Cajun Seasoning', 2, 2, '48 - 6 oz jars', 22.0, 53, 1),
            (5, 'Ikura', 3, 3, '12 - 200 ml jars', 31.0, 31, 0),
            (6, 'Loose Leaf Sampler', 1, NULL, NULL, 5.0, 0, 0);",
    )
    .unwrap();
}

/// Regions 1-3, four territories, employees 1-4.
///
/// Employee 1 covers two territories of region 1, employee 2 covers one
/// territory in region 1 and one in region 2, employee 3 has no territory,
/// employee 4 covers region 3.
pub fn seed_staff(conn: &Connection) {
    conn.execute_batch(
        "INSERT INTO Regions (RegionID, RegionDescription) VALUES
            (1, 'Eastern'),
            (2, 'Western'),
            (3, 'Northern');
         INSERT INTO Territories (TerritoryID, TerritoryDescription, RegionID) VALUES
            ('01581', 'Westboro', 1),
            ('01730', 'Bedford', 1),
            ('98004', 'Bellevue', 2),
            ('48084', 'Troy', 3);
         INSERT INTO Employees (EmployeeID, LastName, FirstName, Title, BirthDate, HireDate, City, Region, ReportsTo) VALUES
            (1, 'Davolio', 'Nancy', 'Sales Representative', '1948-12-08 00:00:00', '1992-05-01 00:00:00', 'Seattle', 'WA', NULL),
            (2, 'Fuller', 'Andrew', 'Vice President, Sales', '1952-02-19 00:00:00', '1992-08-14 00:00:00', 'Tacoma', 'WA', NULL),
            (3, 'Leverling', 'Janet', 'Sales Representative', '1963-08-30 00:00:00', '1992-04-01 00:00:00', 'Kirkland', NULL, 2),
            (4, 'Buchanan', 'Steven', 'Sales Manager', '1955-03-04 00:00:00', '1993-10-17 00:00:00', 'London', 'UK', 2);
         INSERT INTO EmployeeTerritories (EmployeeID, TerritoryID) VALUES
            (1, '01581'),
            (1, '01730'),
            (2, '01581'),
            (2, '98004'),
            (4, '48084');",
    )
    .unwrap();
}

/// Order 10248 is shipped, orders 10249 and 10250 are not.
pub fn seed_orders(conn: &Connection) {
    conn.execute_batch(
        "INSERT INTO Orders (OrderID, EmployeeID, OrderDate, ShippedDate, ShipCity) VALUES
            (10248, 1, '1996-07-04 00:00:00', '1996-07-16 00:00:00', 'Reims'),
            (10249, 1, '1996-07-05 00:00:00', NULL, 'Münster'),
            (10250, 2, '1996-07-08 00:00:00', NULL, 'Rio de Janeiro');
         INSERT INTO \"Order Details\" (OrderID, ProductID, UnitPrice, Quantity, Discount) VALUES
            (10248, 1, 14.0, 12, 0),
            (10248, 5, 9.8, 10, 0),
            (10249, 1, 14.0, 9, 0),
            (10249, 4, 18.6, 40, 0),
            (10250, 2, 7.7, 10, 0);",
    )
    .unwrap();
}

pub fn count(conn: &Connection, sql: &str) -> i64 {
    conn.query_row(sql, [], |row| row.get(0)).unwrap()
}
