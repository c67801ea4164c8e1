//! Product catalog records: products, categories and suppliers.

use super::{limit_text, require_text, ValidationError};
use serde::{Deserialize, Serialize};

pub type ProductId = i64;
pub type CategoryId = i64;
pub type SupplierId = i64;

const PRODUCT_NAME_MAX: usize = 40;
const QUANTITY_PER_UNIT_MAX: usize = 20;
const CATEGORY_NAME_MAX: usize = 15;
const COMPANY_NAME_MAX: usize = 40;
const CONTACT_NAME_MAX: usize = 30;

/// Row of `Products`, optionally carrying its joined category and supplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: ProductId,
    pub product_name: String,
    /// `None` until a supplier is resolved or inserted.
    pub supplier_id: Option<SupplierId>,
    /// `None` until a category is resolved or inserted.
    pub category_id: Option<CategoryId>,
    pub quantity_per_unit: Option<String>,
    pub unit_price: Option<f64>,
    pub units_in_stock: Option<i64>,
    pub units_on_order: Option<i64>,
    pub reorder_level: Option<i64>,
    pub discontinued: bool,
    /// Populated by joined reads; used as the lookup key on bulk inserts.
    pub category: Option<Category>,
    /// Populated by joined reads; used as the lookup key on bulk inserts.
    pub supplier: Option<Supplier>,
}

impl Product {
    /// Creates an unsaved product with no pricing, stock or relations.
    pub fn new(product_name: impl Into<String>) -> Self {
        Self {
            product_id: 0,
            product_name: product_name.into(),
            supplier_id: None,
            category_id: None,
            quantity_per_unit: None,
            unit_price: None,
            units_in_stock: None,
            units_on_order: None,
            reorder_level: None,
            discontinued: false,
            category: None,
            supplier: None,
        }
    }

    /// Attaches a category record used for lookup-or-insert on write.
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Attaches a supplier record used for lookup-or-insert on write.
    pub fn with_supplier(mut self, supplier: Supplier) -> Self {
        self.supplier = Some(supplier);
        self
    }

    /// Checks the product and any attached category/supplier.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("Product", "product_name", &self.product_name, PRODUCT_NAME_MAX)?;
        limit_text(
            "Product",
            "quantity_per_unit",
            self.quantity_per_unit.as_deref(),
            QUANTITY_PER_UNIT_MAX,
        )?;
        if let Some(category) = &self.category {
            category.validate()?;
        }
        if let Some(supplier) = &self.supplier {
            supplier.validate()?;
        }
        Ok(())
    }
}

/// Row of `Categories`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub category_id: CategoryId,
    /// Unique lookup key for bulk product inserts.
    pub category_name: String,
    pub description: Option<String>,
    pub picture: Option<Vec<u8>>,
}

impl Category {
    pub fn new(category_name: impl Into<String>) -> Self {
        Self {
            category_id: 0,
            category_name: category_name.into(),
            description: None,
            picture: None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text(
            "Category",
            "category_name",
            &self.category_name,
            CATEGORY_NAME_MAX,
        )
    }
}

/// Row of `Suppliers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    pub supplier_id: SupplierId,
    pub company_name: String,
    /// Lookup key for bulk product inserts.
    pub contact_name: Option<String>,
    pub contact_title: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub phone: Option<String>,
    pub fax: Option<String>,
    pub home_page: Option<String>,
}

impl Supplier {
    pub fn new(company_name: impl Into<String>, contact_name: impl Into<String>) -> Self {
        Self {
            supplier_id: 0,
            company_name: company_name.into(),
            contact_name: Some(contact_name.into()),
            contact_title: None,
            address: None,
            city: None,
            region: None,
            postal_code: None,
            country: None,
            phone: None,
            fax: None,
            home_page: None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text(
            "Supplier",
            "company_name",
            &self.company_name,
            COMPANY_NAME_MAX,
        )?;
        limit_text(
            "Supplier",
            "contact_name",
            self.contact_name.as_deref(),
            CONTACT_NAME_MAX,
        )
    }
}
