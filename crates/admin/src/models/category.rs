//! Product categories.

use serde::{Deserialize, Serialize};
use souq_core::table::{CellValue, TableRow};
use souq_core::{ActiveStatus, CategoryId, LocalizedText, row_fields};

/// A storefront category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: LocalizedText,
    pub slug: String,
    pub product_count: u32,
    pub status: ActiveStatus,
}

row_fields! {
    pub enum CategoryField {
        Id => "id",
        Name => "name",
        NameAr => "name_ar",
        Slug => "slug",
        ProductCount => "product_count",
        Status => "status",
    }
}

impl TableRow for Category {
    type Field = CategoryField;

    fn cell(&self, field: &CategoryField) -> CellValue {
        match field {
            CategoryField::Id => self.id.as_i32().into(),
            CategoryField::Name => (&self.name.en).into(),
            CategoryField::NameAr => (&self.name.ar).into(),
            CategoryField::Slug => (&self.slug).into(),
            CategoryField::ProductCount => self.product_count.into(),
            CategoryField::Status => self.status.as_str().into(),
        }
    }

    fn fields(&self) -> Vec<CategoryField> {
        CategoryField::ALL.to_vec()
    }
}
