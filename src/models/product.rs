use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::FromSqliteRow;
use crate::format;

const LOW_STOCK_THRESHOLD: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    Protein,
    Supplements,
    EnergyDrinks,
    Apparel,
    Accessories,
}

impl ProductCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::Protein => "protein",
            ProductCategory::Supplements => "supplements",
            ProductCategory::EnergyDrinks => "energy_drinks",
            ProductCategory::Apparel => "apparel",
            ProductCategory::Accessories => "accessories",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "protein" => ProductCategory::Protein,
            "energy_drinks" => ProductCategory::EnergyDrinks,
            "apparel" => ProductCategory::Apparel,
            "accessories" => ProductCategory::Accessories,
            _ => ProductCategory::Supplements,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProductCategory::Protein => "Protein",
            ProductCategory::Supplements => "Supplements",
            ProductCategory::EnergyDrinks => "Energy Drinks",
            ProductCategory::Apparel => "Apparel",
            ProductCategory::Accessories => "Accessories",
        }
    }
}

pub const PRODUCT_CATEGORIES: &[ProductCategory] = &[
    ProductCategory::Protein,
    ProductCategory::Supplements,
    ProductCategory::EnergyDrinks,
    ProductCategory::Apparel,
    ProductCategory::Accessories,
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    pub category: ProductCategory,
    pub stock: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn price_display(&self) -> String {
        format::price(self.price_cents)
    }

    pub fn out_of_stock(&self) -> bool {
        self.stock == 0
    }

    pub fn low_stock(&self) -> bool {
        self.stock > 0 && self.stock < LOW_STOCK_THRESHOLD
    }
}

impl FromSqliteRow for Product {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let category: String = row.get("category")?;
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            description: row.get("description")?,
            price_cents: row.get("price_cents")?,
            category: ProductCategory::parse(&category),
            stock: row.get("stock")?,
            is_active: row.get("is_active")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }
}

/// Shared shape of the add and edit product forms. Checkboxes submit no
/// value when unchecked, hence the optional `is_active`.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    pub category: ProductCategory,
    pub stock: i64,
    pub is_active: Option<String>,
}

impl ProductForm {
    pub fn active(&self) -> bool {
        self.is_active.is_some()
    }
}
