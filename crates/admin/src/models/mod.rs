//! Domain models for admin.
//!
//! One typed row per catalog resource, each with a field enum declared via
//! [`souq_core::row_fields!`] so table columns are checked against the row
//! shape at compile time.

pub mod affiliate;
pub mod category;
pub mod order;
pub mod plan;
pub mod product;
pub mod session;
pub mod wholesaler;

pub use affiliate::{Affiliate, AffiliateField};
pub use category::{Category, CategoryField};
pub use order::{Order, OrderField};
pub use plan::{Plan, PlanField};
pub use product::{Product, ProductField};
pub use session::{CurrentAdmin, keys as session_keys};
pub use wholesaler::{Wholesaler, WholesalerField};
