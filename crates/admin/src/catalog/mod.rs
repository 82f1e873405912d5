//! In-memory store catalog.
//!
//! The admin panel serves its tables from a [`Catalog`] held in application
//! state. It is loaded once at startup, from `SOUQ_SEED_PATH` when set or
//! from the built-in sample catalog otherwise, and only changes through row
//! deletes.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use souq_core::LocalizedText;
use souq_core::table::TableRow;
use thiserror::Error;

use crate::components::DataTableConfig;
use crate::components::data_table::{
    affiliates_table_config, categories_table_config, orders_table_config, plans_table_config,
    products_table_config, wholesalers_table_config,
};
use crate::models::{Affiliate, Category, Order, Plan, Product, Wholesaler};

const SAMPLE_CATALOG: &str = include_str!("../../seed/sample.yaml");

/// Errors from catalog loading and lookups.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("unknown resource: {0}")]
    UnknownResource(String),
    #[error("{resource} {id} not found")]
    RowNotFound { resource: &'static str, id: i32 },
    #[error("duplicate id {id} in {resource}")]
    DuplicateId { resource: &'static str, id: i32 },
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog data: {0}")]
    Seed(String),
}

impl CatalogError {
    /// Whether the error means "no such thing" rather than a broken catalog.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::UnknownResource(_) | Self::RowNotFound { .. })
    }
}

/// A table the admin panel can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Products,
    Categories,
    Orders,
    Affiliates,
    Wholesalers,
    Plans,
}

impl Resource {
    pub const ALL: [Self; 6] = [
        Self::Products,
        Self::Categories,
        Self::Orders,
        Self::Affiliates,
        Self::Wholesalers,
        Self::Plans,
    ];

    /// Path segment naming this resource.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::Categories => "categories",
            Self::Orders => "orders",
            Self::Affiliates => "affiliates",
            Self::Wholesalers => "wholesalers",
            Self::Plans => "plans",
        }
    }

    /// Page title.
    #[must_use]
    pub fn title(&self) -> LocalizedText {
        match self {
            Self::Products => LocalizedText::new("Products", "المنتجات"),
            Self::Categories => LocalizedText::new("Categories", "التصنيفات"),
            Self::Orders => LocalizedText::new("Orders", "الطلبات"),
            Self::Affiliates => LocalizedText::new("Affiliates", "المسوّقون"),
            Self::Wholesalers => LocalizedText::new("Wholesalers", "تجار الجملة"),
            Self::Plans => LocalizedText::new("Subscription plans", "باقات الاشتراك"),
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Resource {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|resource| resource.as_str() == s)
            .ok_or_else(|| CatalogError::UnknownResource(s.to_string()))
    }
}

/// Every table's rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Catalog {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    pub orders: Vec<Order>,
    pub affiliates: Vec<Affiliate>,
    pub wholesalers: Vec<Wholesaler>,
    pub plans: Vec<Plan>,
}

impl Catalog {
    /// Parse a YAML catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Seed` for malformed YAML and
    /// `CatalogError::DuplicateId` when two rows of a table share an id.
    pub fn from_yaml(text: &str) -> Result<Self, CatalogError> {
        let catalog: Self =
            serde_yaml::from_str(text).map_err(|e| CatalogError::Seed(e.to_string()))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Read a YAML catalog from disk.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Io` if the file cannot be read, otherwise as
    /// [`Catalog::from_yaml`].
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&text)
    }

    /// The built-in sample catalog.
    ///
    /// # Errors
    ///
    /// Only if the bundled sample data is malformed.
    pub fn sample() -> Result<Self, CatalogError> {
        Self::from_yaml(SAMPLE_CATALOG)
    }

    /// Number of rows in `resource`'s table.
    #[must_use]
    pub fn len(&self, resource: Resource) -> usize {
        match resource {
            Resource::Products => self.products.len(),
            Resource::Categories => self.categories.len(),
            Resource::Orders => self.orders.len(),
            Resource::Affiliates => self.affiliates.len(),
            Resource::Wholesalers => self.wholesalers.len(),
            Resource::Plans => self.plans.len(),
        }
    }

    /// Rows of `R`'s table, in catalog order.
    #[must_use]
    pub fn rows<R: AdminResource>(&self) -> &[R] {
        R::rows(self)
    }

    /// The row of `R`'s table with `id`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::RowNotFound` if no row has that id.
    pub fn find<R: AdminResource>(&self, id: i32) -> Result<&R, CatalogError> {
        R::rows(self)
            .iter()
            .find(|row| row.id() == id)
            .ok_or(CatalogError::RowNotFound {
                resource: R::RESOURCE.as_str(),
                id,
            })
    }

    /// Remove and return the row of `R`'s table with `id`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::RowNotFound` if no row has that id.
    pub fn remove<R: AdminResource>(&mut self, id: i32) -> Result<R, CatalogError> {
        let rows = R::rows_mut(self);
        let position = rows
            .iter()
            .position(|row| row.id() == id)
            .ok_or(CatalogError::RowNotFound {
                resource: R::RESOURCE.as_str(),
                id,
            })?;
        Ok(rows.remove(position))
    }

    fn validate(&self) -> Result<(), CatalogError> {
        check_unique_ids::<Product>(self)?;
        check_unique_ids::<Category>(self)?;
        check_unique_ids::<Order>(self)?;
        check_unique_ids::<Affiliate>(self)?;
        check_unique_ids::<Wholesaler>(self)?;
        check_unique_ids::<Plan>(self)
    }
}

fn check_unique_ids<R: AdminResource>(catalog: &Catalog) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for row in R::rows(catalog) {
        if !seen.insert(row.id()) {
            return Err(CatalogError::DuplicateId {
                resource: R::RESOURCE.as_str(),
                id: row.id(),
            });
        }
    }
    Ok(())
}

/// A typed catalog row that can back an admin table.
pub trait AdminResource: TableRow + Serialize + Clone + Send + Sync + 'static {
    const RESOURCE: Resource;

    fn id(&self) -> i32;

    fn rows(catalog: &Catalog) -> &[Self];

    fn rows_mut(catalog: &mut Catalog) -> &mut Vec<Self>;

    /// Columns and chrome of this resource's table.
    fn table_config() -> DataTableConfig<Self::Field>;
}

macro_rules! admin_resource {
    ($row:ty, $resource:ident, $table:ident, $config:ident) => {
        impl AdminResource for $row {
            const RESOURCE: Resource = Resource::$resource;

            fn id(&self) -> i32 {
                self.id.as_i32()
            }

            fn rows(catalog: &Catalog) -> &[Self] {
                &catalog.$table
            }

            fn rows_mut(catalog: &mut Catalog) -> &mut Vec<Self> {
                &mut catalog.$table
            }

            fn table_config() -> DataTableConfig<Self::Field> {
                $config()
            }
        }
    };
}

admin_resource!(Product, Products, products, products_table_config);
admin_resource!(Category, Categories, categories, categories_table_config);
admin_resource!(Order, Orders, orders, orders_table_config);
admin_resource!(Affiliate, Affiliates, affiliates, affiliates_table_config);
admin_resource!(Wholesaler, Wholesalers, wholesalers, wholesalers_table_config);
admin_resource!(Plan, Plans, plans, plans_table_config);

/// Call a generic function with the row type behind a runtime [`Resource`].
///
/// `for_resource!(resource, render(catalog, &query))` expands to a match
/// calling `render::<Product>(..)`, `render::<Order>(..)`, and so on.
macro_rules! for_resource {
    ($resource:expr, $func:ident ( $($arg:expr),* $(,)? )) => {
        match $resource {
            $crate::catalog::Resource::Products => $func::<$crate::models::Product>($($arg),*),
            $crate::catalog::Resource::Categories => $func::<$crate::models::Category>($($arg),*),
            $crate::catalog::Resource::Orders => $func::<$crate::models::Order>($($arg),*),
            $crate::catalog::Resource::Affiliates => $func::<$crate::models::Affiliate>($($arg),*),
            $crate::catalog::Resource::Wholesalers => {
                $func::<$crate::models::Wholesaler>($($arg),*)
            }
            $crate::catalog::Resource::Plans => $func::<$crate::models::Plan>($($arg),*),
        }
    };
}

pub(crate) use for_resource;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_catalog_loads() {
        let catalog = Catalog::sample().unwrap();
        for resource in Resource::ALL {
            assert!(catalog.len(resource) > 0, "{resource} is empty");
        }
    }

    #[test]
    fn test_resource_parse() {
        assert_eq!("orders".parse::<Resource>().unwrap(), Resource::Orders);
        let err = "coupons".parse::<Resource>().unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_find_and_remove() {
        let mut catalog = Catalog::sample().unwrap();
        let before = catalog.len(Resource::Products);

        let honey = catalog.find::<Product>(5).unwrap();
        assert_eq!(honey.sku, "HN-SDR-500");

        let removed = catalog.remove::<Product>(5).unwrap();
        assert_eq!(removed.sku, "HN-SDR-500");
        assert_eq!(catalog.len(Resource::Products), before - 1);
        assert!(matches!(
            catalog.remove::<Product>(5),
            Err(CatalogError::RowNotFound { resource: "products", id: 5 })
        ));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let yaml = r#"
categories:
  - { id: 1, name: { en: "Dates", ar: "تمور" }, slug: dates, product_count: 0, status: active }
  - { id: 1, name: { en: "Tea", ar: "شاي" }, slug: tea, product_count: 0, status: active }
"#;
        assert!(matches!(
            Catalog::from_yaml(yaml),
            Err(CatalogError::DuplicateId { resource: "categories", id: 1 })
        ));
    }

    #[test]
    fn test_unknown_table_rejected() {
        let err = Catalog::from_yaml("coupons: []").unwrap_err();
        assert!(matches!(err, CatalogError::Seed(_)));
    }

    #[test]
    fn test_missing_tables_default_to_empty() {
        let catalog = Catalog::from_yaml("plans: []").unwrap();
        assert_eq!(catalog, Catalog::default());
    }
}
