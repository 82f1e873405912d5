//! Data table component types.
//!
//! These types define the configuration for the catalog tables in the admin
//! panel: which columns a resource shows, their bilingual labels, and the
//! copy shown around the table.

use serde::Serialize;
use souq_core::LocalizedText;
use souq_core::table::{Align, Column, RowAction, RowField};

use crate::models::{
    AffiliateField, CategoryField, OrderField, PlanField, ProductField, WholesalerField,
};

/// Configuration for a data table.
#[derive(Debug, Clone)]
pub struct DataTableConfig<F: RowField> {
    /// Unique table identifier.
    pub table_id: &'static str,
    /// Column definitions, in display order.
    pub columns: Vec<Column<F>>,
    /// Actions offered per row.
    pub actions: Vec<RowAction>,
    /// Search placeholder text.
    pub search_placeholder: LocalizedText,
    /// Title for empty state.
    pub empty_title: LocalizedText,
}

/// Table chrome handed to clients alongside the rendered rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableChrome {
    pub table_id: &'static str,
    pub search_placeholder: String,
    pub empty_title: String,
    pub actions: Vec<RowAction>,
}

impl<F: RowField> DataTableConfig<F> {
    /// Create a new data table configuration.
    #[must_use]
    pub fn new(table_id: &'static str) -> Self {
        Self {
            table_id,
            columns: vec![],
            actions: vec![RowAction::Edit, RowAction::Delete],
            search_placeholder: LocalizedText::new("Search...", "بحث..."),
            empty_title: LocalizedText::new("No items found", "لا توجد عناصر"),
        }
    }

    /// Add a column.
    #[must_use]
    pub fn column(mut self, column: Column<F>) -> Self {
        self.columns.push(column);
        self
    }

    /// Set search placeholder.
    #[must_use]
    pub fn search_placeholder(mut self, en: &str, ar: &str) -> Self {
        self.search_placeholder = LocalizedText::new(en, ar);
        self
    }

    /// Set empty state title.
    #[must_use]
    pub fn empty_state(mut self, en: &str, ar: &str) -> Self {
        self.empty_title = LocalizedText::new(en, ar);
        self
    }

    /// Localized chrome for one request.
    #[must_use]
    pub fn chrome(&self, locale: souq_core::Locale) -> TableChrome {
        TableChrome {
            table_id: self.table_id,
            search_placeholder: self.search_placeholder.get(locale).to_string(),
            empty_title: self.empty_title.get(locale).to_string(),
            actions: self.actions.clone(),
        }
    }
}

fn label(en: &str, ar: &str) -> LocalizedText {
    LocalizedText::new(en, ar)
}

/// Build the products table configuration.
#[must_use]
pub fn products_table_config() -> DataTableConfig<ProductField> {
    DataTableConfig::new("products")
        .column(Column::text(ProductField::Name, label("Product", "المنتج")))
        .column(Column::text(ProductField::NameAr, label("Arabic name", "الاسم بالعربية")))
        .column(Column::text(ProductField::Sku, label("SKU", "رمز المنتج")))
        .column(Column::text(ProductField::Category, label("Category", "التصنيف")))
        .column(Column::number(ProductField::Price, label("Price", "السعر")))
        .column(Column::number(ProductField::Stock, label("Stock", "المخزون")))
        .column(
            Column::text(ProductField::Status, label("Status", "الحالة")).align(Align::Center),
        )
        .column(Column::date(ProductField::CreatedOn, label("Created", "تاريخ الإضافة")))
        .search_placeholder("Search products by name or SKU...", "ابحث عن منتج بالاسم أو الرمز...")
        .empty_state("No products found", "لا توجد منتجات")
}

/// Build the categories table configuration.
#[must_use]
pub fn categories_table_config() -> DataTableConfig<CategoryField> {
    DataTableConfig::new("categories")
        .column(Column::text(CategoryField::Name, label("Category", "التصنيف")))
        .column(Column::text(CategoryField::NameAr, label("Arabic name", "الاسم بالعربية")))
        .column(Column::text(CategoryField::Slug, label("Slug", "المعرّف")))
        .column(Column::number(CategoryField::ProductCount, label("Products", "المنتجات")))
        .column(
            Column::text(CategoryField::Status, label("Status", "الحالة")).align(Align::Center),
        )
        .search_placeholder("Search categories...", "ابحث في التصنيفات...")
        .empty_state("No categories found", "لا توجد تصنيفات")
}

/// Build the orders table configuration.
#[must_use]
pub fn orders_table_config() -> DataTableConfig<OrderField> {
    DataTableConfig::new("orders")
        .column(Column::text(OrderField::Number, label("Order", "الطلب")))
        .column(Column::text(OrderField::Customer, label("Customer", "العميل")))
        .column(Column::text(OrderField::Email, label("Email", "البريد الإلكتروني")))
        .column(Column::number(OrderField::Items, label("Items", "القطع")))
        .column(Column::number(OrderField::Total, label("Total", "الإجمالي")))
        .column(Column::text(OrderField::Status, label("Status", "الحالة")).align(Align::Center))
        .column(Column::date(OrderField::PlacedOn, label("Placed", "تاريخ الطلب")))
        .search_placeholder("Search orders by number or customer...", "ابحث برقم الطلب أو اسم العميل...")
        .empty_state("No orders found", "لا توجد طلبات")
}

/// Build the affiliates table configuration.
#[must_use]
pub fn affiliates_table_config() -> DataTableConfig<AffiliateField> {
    DataTableConfig::new("affiliates")
        .column(Column::text(AffiliateField::Name, label("Affiliate", "المسوّق")))
        .column(Column::text(AffiliateField::Email, label("Email", "البريد الإلكتروني")))
        .column(Column::text(AffiliateField::Code, label("Code", "الرمز")))
        .column(Column::number(AffiliateField::CommissionRate, label("Commission %", "العمولة ٪")))
        .column(Column::number(AffiliateField::TotalSales, label("Sales", "المبيعات")))
        .column(
            Column::text(AffiliateField::Status, label("Status", "الحالة")).align(Align::Center),
        )
        .search_placeholder("Search affiliates...", "ابحث في المسوّقين...")
        .empty_state("No affiliates found", "لا يوجد مسوّقون")
}

/// Build the wholesalers table configuration.
#[must_use]
pub fn wholesalers_table_config() -> DataTableConfig<WholesalerField> {
    DataTableConfig::new("wholesalers")
        .column(Column::text(WholesalerField::Company, label("Company", "الشركة")))
        .column(Column::text(WholesalerField::Contact, label("Contact", "المسؤول")))
        .column(Column::text(WholesalerField::Email, label("Email", "البريد الإلكتروني")))
        .column(Column::text(WholesalerField::City, label("City", "المدينة")))
        .column(Column::number(WholesalerField::DiscountRate, label("Discount %", "الخصم ٪")))
        .column(
            Column::text(WholesalerField::Status, label("Status", "الحالة")).align(Align::Center),
        )
        .search_placeholder("Search wholesalers...", "ابحث في تجار الجملة...")
        .empty_state("No wholesalers found", "لا يوجد تجار جملة")
}

/// Build the subscription plans table configuration.
#[must_use]
pub fn plans_table_config() -> DataTableConfig<PlanField> {
    DataTableConfig::new("plans")
        .column(Column::text(PlanField::Name, label("Plan", "الباقة")))
        .column(Column::text(PlanField::NameAr, label("Arabic name", "الاسم بالعربية")))
        .column(Column::number(PlanField::Price, label("Price", "السعر")))
        .column(Column::text(PlanField::Interval, label("Billing", "الفوترة")))
        .column(Column::number(PlanField::Subscribers, label("Subscribers", "المشتركون")))
        .column(Column::text(PlanField::Status, label("Status", "الحالة")).align(Align::Center))
        .search_placeholder("Search plans...", "ابحث في الباقات...")
        .empty_state("No plans found", "لا توجد باقات")
}
