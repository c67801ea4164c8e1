//! Aliased column lists and named-column row decoders.
//!
//! Joined queries select each entity through its column list so that every
//! column carries an entity prefix (`product_`, `category_`, `supplier_`,
//! `employee_`, `region_`). Decoders read those names, never positions.
//!
//! Table aliases are fixed: `p` Products, `c` Categories, `s` Suppliers,
//! `e` Employees, `r` Regions.

use crate::model::employee::{Employee, Region};
use crate::model::product::{Category, Product, Supplier};
use crate::repo::northwind_repo::{RepoError, RepoResult};
use rusqlite::Row;

pub(crate) const PRODUCT_COLUMNS: &str = "p.ProductID AS product_id,
    p.ProductName AS product_name,
    p.SupplierID AS product_supplier_id,
    p.CategoryID AS product_category_id,
    p.QuantityPerUnit AS product_quantity_per_unit,
    p.UnitPrice AS product_unit_price,
    p.UnitsInStock AS product_units_in_stock,
    p.UnitsOnOrder AS product_units_on_order,
    p.ReorderLevel AS product_reorder_level,
    p.Discontinued AS product_discontinued";

pub(crate) const CATEGORY_COLUMNS: &str = "c.CategoryID AS category_id,
    c.CategoryName AS category_name,
    c.Description AS category_description,
    c.Picture AS category_picture";

pub(crate) const SUPPLIER_COLUMNS: &str = "s.SupplierID AS supplier_id,
    s.CompanyName AS supplier_company_name,
    s.ContactName AS supplier_contact_name,
    s.ContactTitle AS supplier_contact_title,
    s.Address AS supplier_address,
    s.City AS supplier_city,
    s.Region AS supplier_region,
    s.PostalCode AS supplier_postal_code,
    s.Country AS supplier_country,
    s.Phone AS supplier_phone,
    s.Fax AS supplier_fax,
    s.HomePage AS supplier_home_page";

pub(crate) const EMPLOYEE_COLUMNS: &str = "e.EmployeeID AS employee_id,
    e.LastName AS employee_last_name,
    e.FirstName AS employee_first_name,
    e.Title AS employee_title,
    e.TitleOfCourtesy AS employee_title_of_courtesy,
    e.BirthDate AS employee_birth_date,
    e.HireDate AS employee_hire_date,
    e.Address AS employee_address,
    e.City AS employee_city,
    e.Region AS employee_region,
    e.PostalCode AS employee_postal_code,
    e.Country AS employee_country,
    e.HomePhone AS employee_home_phone,
    e.Extension AS employee_extension,
    e.Photo AS employee_photo,
    e.Notes AS employee_notes,
    e.ReportsTo AS employee_reports_to,
    e.PhotoPath AS employee_photo_path";

pub(crate) const REGION_COLUMNS: &str = "r.RegionID AS region_id,
    r.RegionDescription AS region_description";

/// Decodes the `product_*` columns. Relations are left empty.
pub(crate) fn decode_product(row: &Row<'_>) -> RepoResult<Product> {
    let discontinued = match row.get::<_, i64>("product_discontinued")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid discontinued value `{other}` in Products.Discontinued"
            )));
        }
    };

    Ok(Product {
        product_id: row.get("product_id")?,
        product_name: row.get("product_name")?,
        supplier_id: row.get("product_supplier_id")?,
        category_id: row.get("product_category_id")?,
        quantity_per_unit: row.get("product_quantity_per_unit")?,
        unit_price: row.get("product_unit_price")?,
        units_in_stock: row.get("product_units_in_stock")?,
        units_on_order: row.get("product_units_on_order")?,
        reorder_level: row.get("product_reorder_level")?,
        discontinued,
        category: None,
        supplier: None,
    })
}

pub(crate) fn decode_category(row: &Row<'_>) -> RepoResult<Category> {
    Ok(Category {
        category_id: row.get("category_id")?,
        category_name: row.get("category_name")?,
        description: row.get("category_description")?,
        picture: row.get("category_picture")?,
    })
}

pub(crate) fn decode_supplier(row: &Row<'_>) -> RepoResult<Supplier> {
    Ok(Supplier {
        supplier_id: row.get("supplier_id")?,
        company_name: row.get("supplier_company_name")?,
        contact_name: row.get("supplier_contact_name")?,
        contact_title: row.get("supplier_contact_title")?,
        address: row.get("supplier_address")?,
        city: row.get("supplier_city")?,
        region: row.get("supplier_region")?,
        postal_code: row.get("supplier_postal_code")?,
        country: row.get("supplier_country")?,
        phone: row.get("supplier_phone")?,
        fax: row.get("supplier_fax")?,
        home_page: row.get("supplier_home_page")?,
    })
}

/// Decodes the `employee_*` columns. `territories` is left empty.
pub(crate) fn decode_employee(row: &Row<'_>) -> RepoResult<Employee> {
    Ok(Employee {
        employee_id: row.get("employee_id")?,
        last_name: row.get("employee_last_name")?,
        first_name: row.get("employee_first_name")?,
        title: row.get("employee_title")?,
        title_of_courtesy: row.get("employee_title_of_courtesy")?,
        birth_date: row.get("employee_birth_date")?,
        hire_date: row.get("employee_hire_date")?,
        address: row.get("employee_address")?,
        city: row.get("employee_city")?,
        region: row.get("employee_region")?,
        postal_code: row.get("employee_postal_code")?,
        country: row.get("employee_country")?,
        home_phone: row.get("employee_home_phone")?,
        extension: row.get("employee_extension")?,
        photo: row.get("employee_photo")?,
        notes: row.get("employee_notes")?,
        reports_to: row.get("employee_reports_to")?,
        photo_path: row.get("employee_photo_path")?,
        territories: Vec::new(),
    })
}

pub(crate) fn decode_region(row: &Row<'_>) -> RepoResult<Region> {
    Ok(Region {
        region_id: row.get("region_id")?,
        region_description: row.get("region_description")?,
    })
}
