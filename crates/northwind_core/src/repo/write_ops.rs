//! Mutating Northwind operations.
//!
//! # Invariants
//! - Referenced rows are resolved or inserted before the dependent row.
//! - Generated ids come from `last_insert_rowid()` on the same connection.
//! - Territories that do not exist are skipped and logged at `warn`.
//! - Products whose category or supplier cannot be resolved are skipped and
//!   logged at `warn`.

use crate::model::employee::{Employee, EmployeeId, TerritoryId};
use crate::model::product::{Category, CategoryId, Product, ProductId, Supplier, SupplierId};
use crate::model::OrderId;
use crate::repo::northwind_repo::{
    NorthwindWriteRepository, RepoResult, SqliteNorthwindRepository,
};
use log::{debug, info, warn};
use rusqlite::{named_params, params, Connection, OptionalExtension};

impl NorthwindWriteRepository for SqliteNorthwindRepository {
    fn add_employee_with_territories(&self, employee: &Employee) -> RepoResult<EmployeeId> {
        employee.validate()?;

        self.run_write("add_employee_with_territories", |conn| {
            let employee_id = insert_employee(conn, employee)?;

            let mut linked = 0usize;
            for territory in &employee.territories {
                if !territory_exists(conn, &territory.territory_id)? {
                    warn!(
                        "event=territory_skipped module=repo employee_id={} territory_id={} reason=not_found",
                        employee_id, territory.territory_id
                    );
                    continue;
                }
                linked += conn.execute(
                    "INSERT OR IGNORE INTO EmployeeTerritories (EmployeeID, TerritoryID)
                     VALUES (?1, ?2);",
                    params![employee_id, territory.territory_id.as_str()],
                )?;
            }

            info!(
                "event=employee_added module=repo employee_id={} territories_requested={} territories_linked={}",
                employee_id,
                employee.territories.len(),
                linked
            );
            Ok(employee_id)
        })
    }

    fn change_products_category(
        &self,
        current_category: &Category,
        new_category: &Category,
    ) -> RepoResult<usize> {
        self.run_write("change_products_category", |conn| {
            let changed = conn.execute(
                "UPDATE Products
                 SET CategoryID = ?1
                 WHERE CategoryID = ?2;",
                params![new_category.category_id, current_category.category_id],
            )?;
            debug!(
                "event=products_recategorized module=repo from_category_id={} to_category_id={} changed={}",
                current_category.category_id, new_category.category_id, changed
            );
            Ok(changed)
        })
    }

    fn add_products_with_suppliers_and_categories(
        &self,
        products: &[Product],
    ) -> RepoResult<Vec<ProductId>> {
        for product in products {
            product.validate()?;
        }

        self.run_write("add_products_with_suppliers_and_categories", |conn| {
            let mut inserted = Vec::with_capacity(products.len());
            for product in products {
                let category_id = resolve_category(conn, product)?;
                let supplier_id = resolve_supplier(conn, product)?;

                match (supplier_id, category_id) {
                    (Some(supplier_id), Some(category_id)) => {
                        inserted.push(insert_product(conn, product, supplier_id, category_id)?);
                    }
                    _ => warn!(
                        "event=product_skipped module=repo product_name={} has_category={} has_supplier={}",
                        product.product_name,
                        category_id.is_some(),
                        supplier_id.is_some()
                    ),
                }
            }

            info!(
                "event=products_added module=repo requested={} inserted={}",
                products.len(),
                inserted.len()
            );
            Ok(inserted)
        })
    }

    fn replace_product_while_order_not_shipped(
        &self,
        order_product: &Product,
        same_product: &Product,
    ) -> RepoResult<usize> {
        self.run_write("replace_product_while_order_not_shipped", |conn| {
            let order_ids = unshipped_orders_with_product(conn, order_product.product_id)?;

            let mut changed = 0usize;
            for order_id in &order_ids {
                changed += conn.execute(
                    "UPDATE \"Order Details\"
                     SET ProductID = ?1
                     WHERE OrderID = ?2
                       AND ProductID = ?3;",
                    params![same_product.product_id, order_id, order_product.product_id],
                )?;
            }

            debug!(
                "event=order_lines_replaced module=repo from_product_id={} to_product_id={} orders={} lines={}",
                order_product.product_id,
                same_product.product_id,
                order_ids.len(),
                changed
            );
            Ok(changed)
        })
    }
}

fn insert_employee(conn: &Connection, employee: &Employee) -> RepoResult<EmployeeId> {
    conn.execute(
        "INSERT INTO Employees (
            LastName,
            FirstName,
            Title,
            TitleOfCourtesy,
            BirthDate,
            HireDate,
            Address,
            City,
            Region,
            PostalCode,
            Country,
            HomePhone,
            Extension,
            Photo,
            Notes,
            ReportsTo,
            PhotoPath
        ) VALUES (
            :last_name,
            :first_name,
            :title,
            :title_of_courtesy,
            :birth_date,
            :hire_date,
            :address,
            :city,
            :region,
            :postal_code,
            :country,
            :home_phone,
            :extension,
            :photo,
            :notes,
            :reports_to,
            :photo_path
        );",
        named_params! {
            ":last_name": employee.last_name,
            ":first_name": employee.first_name,
            ":title": employee.title,
            ":title_of_courtesy": employee.title_of_courtesy,
            ":birth_date": employee.birth_date,
            ":hire_date": employee.hire_date,
            ":address": employee.address,
            ":city": employee.city,
            ":region": employee.region,
            ":postal_code": employee.postal_code,
            ":country": employee.country,
            ":home_phone": employee.home_phone,
            ":extension": employee.extension,
            ":photo": employee.photo,
            ":notes": employee.notes,
            ":reports_to": employee.reports_to,
            ":photo_path": employee.photo_path,
        },
    )?;
    Ok(conn.last_insert_rowid())
}

fn territory_exists(conn: &Connection, territory_id: &TerritoryId) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM Territories
            WHERE TerritoryID = ?1
        );",
        [territory_id.as_str()],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

/// Matches the attached category by name, inserting it when absent.
/// Without an attached category the product's own `category_id` is kept.
fn resolve_category(conn: &Connection, product: &Product) -> RepoResult<Option<CategoryId>> {
    let Some(category) = &product.category else {
        return Ok(product.category_id);
    };

    let existing = conn
        .query_row(
            "SELECT CategoryID
             FROM Categories
             WHERE CategoryName = ?1
             ORDER BY CategoryID ASC
             LIMIT 1;",
            [category.category_name.as_str()],
            |row| row.get::<_, CategoryId>(0),
        )
        .optional()?;

    match existing {
        Some(category_id) => Ok(Some(category_id)),
        None => insert_category(conn, category).map(Some),
    }
}

fn insert_category(conn: &Connection, category: &Category) -> RepoResult<CategoryId> {
    conn.execute(
        "INSERT INTO Categories (CategoryName, Description, Picture)
         VALUES (?1, ?2, ?3);",
        params![
            category.category_name.as_str(),
            category.description.as_deref(),
            category.picture.as_deref(),
        ],
    )?;
    let category_id = conn.last_insert_rowid();
    debug!(
        "event=category_inserted module=repo category_id={} category_name={}",
        category_id, category.category_name
    );
    Ok(category_id)
}

/// Matches the attached supplier by contact name, inserting it when absent.
/// A supplier without a contact name never matches an existing row.
/// Without an attached supplier the product's own `supplier_id` is kept.
fn resolve_supplier(conn: &Connection, product: &Product) -> RepoResult<Option<SupplierId>> {
    let Some(supplier) = &product.supplier else {
        return Ok(product.supplier_id);
    };

    let existing = conn
        .query_row(
            "SELECT SupplierID
             FROM Suppliers
             WHERE ContactName = ?1
             ORDER BY SupplierID ASC
             LIMIT 1;",
            [supplier.contact_name.as_deref()],
            |row| row.get::<_, SupplierId>(0),
        )
        .optional()?;

    match existing {
        Some(supplier_id) => Ok(Some(supplier_id)),
        None => insert_supplier(conn, supplier).map(Some),
    }
}

fn insert_supplier(conn: &Connection, supplier: &Supplier) -> RepoResult<SupplierId> {
    conn.execute(
        "INSERT INTO Suppliers (
            CompanyName,
            ContactName,
            ContactTitle,
            Address,
            City,
            Region,
            PostalCode,
            Country,
            Phone,
            Fax,
            HomePage
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11);",
        params![
            supplier.company_name.as_str(),
            supplier.contact_name.as_deref(),
            supplier.contact_title.as_deref(),
            supplier.address.as_deref(),
            supplier.city.as_deref(),
            supplier.region.as_deref(),
            supplier.postal_code.as_deref(),
            supplier.country.as_deref(),
            supplier.phone.as_deref(),
            supplier.fax.as_deref(),
            supplier.home_page.as_deref(),
        ],
    )?;
    let supplier_id = conn.last_insert_rowid();
    debug!(
        "event=supplier_inserted module=repo supplier_id={} company_name={}",
        supplier_id, supplier.company_name
    );
    Ok(supplier_id)
}

fn insert_product(
    conn: &Connection,
    product: &Product,
    supplier_id: SupplierId,
    category_id: CategoryId,
) -> RepoResult<ProductId> {
    conn.execute(
        "INSERT INTO Products (
            ProductName,
            SupplierID,
            CategoryID,
            QuantityPerUnit,
            UnitPrice,
            UnitsInStock,
            UnitsOnOrder,
            ReorderLevel,
            Discontinued
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
        params![
            product.product_name.as_str(),
            supplier_id,
            category_id,
            product.quantity_per_unit.as_deref(),
            product.unit_price,
            product.units_in_stock,
            product.units_on_order,
            product.reorder_level,
            bool_to_int(product.discontinued),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn unshipped_orders_with_product(
    conn: &Connection,
    product_id: ProductId,
) -> RepoResult<Vec<OrderId>> {
    let mut stmt = conn.prepare(
        "SELECT od.OrderID
         FROM Orders AS o
         INNER JOIN \"Order Details\" AS od ON o.OrderID = od.OrderID
         WHERE o.ShippedDate IS NULL
           AND od.ProductID = ?1
         ORDER BY od.OrderID ASC;",
    )?;
    let mut rows = stmt.query([product_id])?;
    let mut order_ids = Vec::new();
    while let Some(row) = rows.next()? {
        order_ids.push(row.get(0)?);
    }
    Ok(order_ids)
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
