//! Affiliate partners.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use souq_core::table::{CellValue, TableRow};
use souq_core::{ActiveStatus, AffiliateId, Email, Price, row_fields};

/// A partner earning commission on referred sales.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Affiliate {
    pub id: AffiliateId,
    pub name: String,
    pub email: Email,
    /// Referral code customers enter at checkout.
    pub code: String,
    /// Commission in percent.
    pub commission_rate: Decimal,
    pub total_sales: Price,
    pub status: ActiveStatus,
}

row_fields! {
    pub enum AffiliateField {
        Id => "id",
        Name => "name",
        Email => "email",
        Code => "code",
        CommissionRate => "commission_rate",
        TotalSales => "total_sales",
        Status => "status",
    }
}

impl TableRow for Affiliate {
    type Field = AffiliateField;

    fn cell(&self, field: &AffiliateField) -> CellValue {
        match field {
            AffiliateField::Id => self.id.as_i32().into(),
            AffiliateField::Name => (&self.name).into(),
            AffiliateField::Email => self.email.as_str().into(),
            AffiliateField::Code => (&self.code).into(),
            AffiliateField::CommissionRate => self.commission_rate.into(),
            AffiliateField::TotalSales => self.total_sales.into(),
            AffiliateField::Status => self.status.as_str().into(),
        }
    }

    fn fields(&self) -> Vec<AffiliateField> {
        AffiliateField::ALL.to_vec()
    }
}
