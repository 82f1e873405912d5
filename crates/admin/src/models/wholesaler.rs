//! Wholesale accounts.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use souq_core::table::{CellValue, TableRow};
use souq_core::{ActiveStatus, Email, WholesalerId, row_fields};

/// A business buying at wholesale prices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wholesaler {
    pub id: WholesalerId,
    pub company: String,
    pub contact: String,
    pub email: Email,
    pub city: String,
    /// Discount off retail, in percent.
    pub discount_rate: Decimal,
    pub status: ActiveStatus,
}

row_fields! {
    pub enum WholesalerField {
        Id => "id",
        Company => "company",
        Contact => "contact",
        Email => "email",
        City => "city",
        DiscountRate => "discount_rate",
        Status => "status",
    }
}

impl TableRow for Wholesaler {
    type Field = WholesalerField;

    fn cell(&self, field: &WholesalerField) -> CellValue {
        match field {
            WholesalerField::Id => self.id.as_i32().into(),
            WholesalerField::Company => (&self.company).into(),
            WholesalerField::Contact => (&self.contact).into(),
            WholesalerField::Email => self.email.as_str().into(),
            WholesalerField::City => (&self.city).into(),
            WholesalerField::DiscountRate => self.discount_rate.into(),
            WholesalerField::Status => self.status.as_str().into(),
        }
    }

    fn fields(&self) -> Vec<WholesalerField> {
        WholesalerField::ALL.to_vec()
    }
}
