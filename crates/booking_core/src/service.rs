//! Read-only catalog reference data.
//!
//! Catalog entries are never created or mutated by the core; they are
//! supplied to the shell at construction time.

use serde::{Deserialize, Serialize};

/// A browsable service category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceCategory {
    pub id: String,
    pub name: String,
    pub image: String,
    pub available_count: u32,
    pub slug: String,
}

/// Billing unit attached to a service price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceUnit {
    Guest,
    Group,
    Session,
    Hour,
}

/// A bookable catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceItem {
    pub id: String,
    pub category_id: String,
    pub title: String,
    pub provider_name: String,
    pub price: f64,
    pub price_unit: PriceUnit,
    pub rating: f64,
    pub review_count: u32,
    pub image: String,
    #[serde(default)]
    pub is_popular: bool,
}
