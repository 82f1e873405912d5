//! Customer orders.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use souq_core::table::{CellValue, TableRow};
use souq_core::{Email, OrderId, OrderStatus, Price, row_fields};

/// A placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Human-facing order number (e.g. `SQ-1042`).
    pub number: String,
    pub customer: String,
    pub email: Email,
    pub items: u32,
    pub total: Price,
    pub status: OrderStatus,
    pub placed_on: NaiveDate,
}

row_fields! {
    pub enum OrderField {
        Id => "id",
        Number => "number",
        Customer => "customer",
        Email => "email",
        Items => "items",
        Total => "total",
        Status => "status",
        PlacedOn => "placed_on",
    }
}

impl TableRow for Order {
    type Field = OrderField;

    fn cell(&self, field: &OrderField) -> CellValue {
        match field {
            OrderField::Id => self.id.as_i32().into(),
            OrderField::Number => (&self.number).into(),
            OrderField::Customer => (&self.customer).into(),
            OrderField::Email => self.email.as_str().into(),
            OrderField::Items => self.items.into(),
            OrderField::Total => self.total.into(),
            OrderField::Status => self.status.as_str().into(),
            OrderField::PlacedOn => self.placed_on.into(),
        }
    }

    fn fields(&self) -> Vec<OrderField> {
        OrderField::ALL.to_vec()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use souq_core::CurrencyCode;
    use souq_core::table::RowField;

    #[test]
    fn test_field_keys_round_trip() {
        for field in OrderField::ALL {
            assert_eq!(OrderField::from_key(field.key()), Some(*field));
        }
        assert_eq!(OrderField::from_key("shipping"), None);
    }

    #[test]
    fn test_status_cell_uses_wire_name() {
        let order = Order {
            id: OrderId::new(1),
            number: "SQ-1001".to_string(),
            customer: "Noura Al-Harbi".to_string(),
            email: Email::parse("noura@example.sa").unwrap(),
            items: 2,
            total: Price::new(Decimal::new(18900, 2), CurrencyCode::SAR),
            status: OrderStatus::Shipped,
            placed_on: NaiveDate::from_ymd_opt(2026, 2, 14).unwrap(),
        };
        assert_eq!(order.cell(&OrderField::Status).display_string(), "shipped");
        assert_eq!(order.cell(&OrderField::Total).as_number(), Some(189.0));
    }
}
