//! Catalog products.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use souq_core::table::{CellValue, TableRow};
use souq_core::{ActiveStatus, LocalizedText, Price, ProductId, row_fields};

/// A product listed in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: LocalizedText,
    pub sku: String,
    /// Category slug.
    pub category: String,
    pub price: Price,
    pub stock: i32,
    pub status: ActiveStatus,
    pub created_on: NaiveDate,
}

row_fields! {
    /// Columns a product row exposes.
    pub enum ProductField {
        Id => "id",
        Name => "name",
        NameAr => "name_ar",
        Sku => "sku",
        Category => "category",
        Price => "price",
        Stock => "stock",
        Status => "status",
        CreatedOn => "created_on",
    }
}

impl TableRow for Product {
    type Field = ProductField;

    fn cell(&self, field: &ProductField) -> CellValue {
        match field {
            ProductField::Id => self.id.as_i32().into(),
            ProductField::Name => (&self.name.en).into(),
            ProductField::NameAr => (&self.name.ar).into(),
            ProductField::Sku => (&self.sku).into(),
            ProductField::Category => (&self.category).into(),
            ProductField::Price => self.price.into(),
            ProductField::Stock => self.stock.into(),
            ProductField::Status => self.status.as_str().into(),
            ProductField::CreatedOn => self.created_on.into(),
        }
    }

    fn fields(&self) -> Vec<ProductField> {
        ProductField::ALL.to_vec()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use souq_core::CurrencyCode;
    use souq_core::table::matches_search;

    fn dates() -> Product {
        Product {
            id: ProductId::new(7),
            name: LocalizedText::new("Sukkari Dates", "تمر سكري"),
            sku: "DT-SUK-1KG".to_string(),
            category: "dates".to_string(),
            price: Price::new(Decimal::new(4500, 2), CurrencyCode::SAR),
            stock: 120,
            status: ActiveStatus::Active,
            created_on: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
        }
    }

    #[test]
    fn test_cells_are_typed() {
        let product = dates();
        assert_eq!(product.cell(&ProductField::Price), CellValue::Number(45.0));
        assert_eq!(product.cell(&ProductField::Stock), CellValue::Number(120.0));
        assert_eq!(
            product.cell(&ProductField::CreatedOn),
            CellValue::Text("2026-01-05".to_string())
        );
        assert_eq!(product.cell(&ProductField::Status).display_string(), "active");
    }

    #[test]
    fn test_search_covers_both_names() {
        let product = dates();
        assert!(matches_search(&product, "sukkari"));
        assert!(matches_search(&product, "سكري"));
        assert!(!matches_search(&product, "coffee"));
    }
}
