//! Subscription plans (monthly boxes and the like).

use serde::{Deserialize, Serialize};
use souq_core::table::{CellValue, TableRow};
use souq_core::{ActiveStatus, BillingInterval, LocalizedText, PlanId, Price, row_fields};

/// A recurring subscription offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub id: PlanId,
    pub name: LocalizedText,
    pub price: Price,
    pub interval: BillingInterval,
    pub subscribers: u32,
    pub status: ActiveStatus,
}

row_fields! {
    pub enum PlanField {
        Id => "id",
        Name => "name",
        NameAr => "name_ar",
        Price => "price",
        Interval => "interval",
        Subscribers => "subscribers",
        Status => "status",
    }
}

impl TableRow for Plan {
    type Field = PlanField;

    fn cell(&self, field: &PlanField) -> CellValue {
        match field {
            PlanField::Id => self.id.as_i32().into(),
            PlanField::Name => (&self.name.en).into(),
            PlanField::NameAr => (&self.name.ar).into(),
            PlanField::Price => self.price.into(),
            PlanField::Interval => self.interval.as_str().into(),
            PlanField::Subscribers => self.subscribers.into(),
            PlanField::Status => self.status.as_str().into(),
        }
    }

    fn fields(&self) -> Vec<PlanField> {
        PlanField::ALL.to_vec()
    }
}
