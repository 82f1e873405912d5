//! Status enums for catalog entities and admin users.

use serde::{Deserialize, Serialize};

/// Lifecycle of an order, from checkout to delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    Refunded,
}

impl OrderStatus {
    /// Stable lowercase name, as shown in tables.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
            Self::Refunded => "refunded",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a product, category, affiliate, or wholesaler is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActiveStatus {
    #[default]
    Active,
    Inactive,
    Archived,
}

impl ActiveStatus {
    /// Stable lowercase name, as shown in tables.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Archived => "archived",
        }
    }
}

impl std::fmt::Display for ActiveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Billing cycle of a subscription plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BillingInterval {
    #[default]
    Monthly,
    Quarterly,
    Yearly,
}

impl BillingInterval {
    /// Stable lowercase name, as shown in tables.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
        }
    }
}

impl std::fmt::Display for BillingInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Admin role with different permission levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    /// Full access, including store configuration.
    SuperAdmin,
    /// Can edit and delete catalog entries.
    Admin,
    /// Read-only access to store data.
    Viewer,
}

impl AdminRole {
    /// Whether this role may remove catalog entries.
    #[must_use]
    pub const fn can_delete(&self) -> bool {
        matches!(self, Self::SuperAdmin | Self::Admin)
    }
}

impl std::fmt::Display for AdminRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SuperAdmin => write!(f, "super_admin"),
            Self::Admin => write!(f, "admin"),
            Self::Viewer => write!(f, "viewer"),
        }
    }
}

impl std::str::FromStr for AdminRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "super_admin" => Ok(Self::SuperAdmin),
            "admin" => Ok(Self::Admin),
            "viewer" => Ok(Self::Viewer),
            _ => Err(format!("invalid admin role: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_role_roundtrip() {
        for role in [AdminRole::SuperAdmin, AdminRole::Admin, AdminRole::Viewer] {
            assert_eq!(role.to_string().parse::<AdminRole>().unwrap(), role);
        }
        assert!("owner".parse::<AdminRole>().is_err());
    }

    #[test]
    fn test_viewer_cannot_delete() {
        assert!(!AdminRole::Viewer.can_delete());
        assert!(AdminRole::Admin.can_delete());
    }

    #[test]
    fn test_status_serde_matches_display() {
        let json = serde_json::to_string(&OrderStatus::Shipped).unwrap();
        assert_eq!(json, format!("\"{}\"", OrderStatus::Shipped));
        let json = serde_json::to_string(&ActiveStatus::Inactive).unwrap();
        assert_eq!(json, "\"inactive\"");
    }
}
