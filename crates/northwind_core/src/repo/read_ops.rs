//! Read-only Northwind queries.
//!
//! # Invariants
//! - Each query executes exactly once and maps rows eagerly.
//! - Results are ordered by primary keys so repeated reads are stable.
//! - Employee/region pairs are deduplicated only by the outer `DISTINCT`.

use crate::model::projection::{EmployeeRegion, EmployeeSuppliers, EmployeesInRegion};
use crate::model::product::Product;
use crate::repo::northwind_repo::{NorthwindReadRepository, RepoResult, SqliteNorthwindRepository};
use crate::repo::row_decode::{
    decode_category, decode_employee, decode_product, decode_region, decode_supplier,
    CATEGORY_COLUMNS, EMPLOYEE_COLUMNS, PRODUCT_COLUMNS, REGION_COLUMNS, SUPPLIER_COLUMNS,
};

impl NorthwindReadRepository for SqliteNorthwindRepository {
    fn products_with_category_and_suppliers(&self) -> RepoResult<Vec<Product>> {
        self.run_read("products_with_category_and_suppliers", |conn| {
            let sql = format!(
                "SELECT {PRODUCT_COLUMNS}, {CATEGORY_COLUMNS}, {SUPPLIER_COLUMNS}
                 FROM Products AS p
                 INNER JOIN Categories AS c ON p.CategoryID = c.CategoryID
                 INNER JOIN Suppliers AS s ON p.SupplierID = s.SupplierID
                 ORDER BY p.ProductID ASC;"
            );
            let mut stmt = conn.prepare(&sql)?;
            let mut rows = stmt.query([])?;
            let mut products = Vec::new();
            while let Some(row) = rows.next()? {
                let mut product = decode_product(row)?;
                product.category = Some(decode_category(row)?);
                product.supplier = Some(decode_supplier(row)?);
                products.push(product);
            }
            Ok(products)
        })
    }

    fn employees_with_region(&self) -> RepoResult<Vec<EmployeeRegion>> {
        self.run_read("employees_with_region", |conn| {
            let sql = format!(
                "SELECT DISTINCT res.* FROM (
                    SELECT {EMPLOYEE_COLUMNS}, {REGION_COLUMNS}
                    FROM Employees AS e
                    INNER JOIN EmployeeTerritories AS et ON et.EmployeeID = e.EmployeeID
                    INNER JOIN Territories AS t ON et.TerritoryID = t.TerritoryID
                    INNER JOIN Regions AS r ON t.RegionID = r.RegionID
                 ) AS res
                 ORDER BY res.employee_id ASC, res.region_id ASC;"
            );
            let mut stmt = conn.prepare(&sql)?;
            let mut rows = stmt.query([])?;
            let mut pairs = Vec::new();
            while let Some(row) = rows.next()? {
                pairs.push(EmployeeRegion {
                    employee: decode_employee(row)?,
                    region: decode_region(row)?,
                });
            }
            Ok(pairs)
        })
    }

    fn employee_count_by_region(&self) -> RepoResult<Vec<EmployeesInRegion>> {
        self.run_read("employee_count_by_region", |conn| {
            let mut stmt = conn.prepare(
                "SELECT
                    Region AS region,
                    COUNT(EmployeeID) AS employee_amount
                 FROM Employees
                 GROUP BY Region
                 ORDER BY Region ASC;",
            )?;
            let mut rows = stmt.query([])?;
            let mut counts = Vec::new();
            while let Some(row) = rows.next()? {
                counts.push(EmployeesInRegion {
                    region: row.get("region")?,
                    employee_amount: row.get("employee_amount")?,
                });
            }
            Ok(counts)
        })
    }

    fn employees_with_suppliers(&self) -> RepoResult<Vec<EmployeeSuppliers>> {
        self.run_read("employees_with_suppliers", |conn| {
            let sql = format!(
                "SELECT {EMPLOYEE_COLUMNS}, {SUPPLIER_COLUMNS}
                 FROM Employees AS e
                 INNER JOIN Orders AS o ON e.EmployeeID = o.EmployeeID
                 INNER JOIN \"Order Details\" AS od ON o.OrderID = od.OrderID
                 INNER JOIN Products AS p ON od.ProductID = p.ProductID
                 INNER JOIN Suppliers AS s ON p.SupplierID = s.SupplierID
                 ORDER BY e.EmployeeID ASC, o.OrderID ASC, p.ProductID ASC;"
            );
            let mut stmt = conn.prepare(&sql)?;
            let mut rows = stmt.query([])?;
            let mut pairs = Vec::new();
            while let Some(row) = rows.next()? {
                pairs.push(EmployeeSuppliers {
                    employee: decode_employee(row)?,
                    supplier: decode_supplier(row)?,
                });
            }
            Ok(pairs)
        })
    }
}
