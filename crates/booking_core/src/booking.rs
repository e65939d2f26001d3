//! Booking records appended to the session ledger.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::service::ServiceItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
}

/// A confirmed service booking.
///
/// Constructed only by the booking flow on confirmation; the ledger is
/// append-only for the lifetime of the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub service_id: String,
    pub service_title: String,
    pub provider_name: String,
    pub date: String,
    pub time: String,
    pub notes: String,
    pub total_price: f64,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// Build a confirmed booking for one service from the entered
    /// date, time and notes.
    pub fn confirmed(
        service: &ServiceItem,
        date: impl Into<String>,
        time: impl Into<String>,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            service_id: service.id.clone(),
            service_title: service.title.clone(),
            provider_name: service.provider_name.clone(),
            date: date.into(),
            time: time.into(),
            notes: notes.into(),
            total_price: service.price,
            status: BookingStatus::Confirmed,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::PriceUnit;

    fn sample_service() -> ServiceItem {
        ServiceItem {
            id: "p1".to_string(),
            category_id: "photo".to_string(),
            title: "Portraits in the park".to_string(),
            provider_name: "by Tia".to_string(),
            price: 48.0,
            price_unit: PriceUnit::Guest,
            rating: 4.96,
            review_count: 45,
            image: "portraits.jpg".to_string(),
            is_popular: true,
        }
    }

    #[test]
    fn test_confirmed_booking_copies_service_fields() {
        let service = sample_service();
        let booking = Booking::confirmed(&service, "2026-09-01", "14:30", "Gate code 4411");

        assert_eq!(booking.service_id, "p1");
        assert_eq!(booking.service_title, service.title);
        assert_eq!(booking.provider_name, service.provider_name);
        assert_eq!(booking.total_price, 48.0);
        assert_eq!(booking.status, BookingStatus::Confirmed);
    }

    #[test]
    fn test_bookings_get_distinct_ids() {
        let service = sample_service();
        let a = Booking::confirmed(&service, "2026-09-01", "14:30", "");
        let b = Booking::confirmed(&service, "2026-09-01", "14:30", "");
        assert_ne!(a.id, b.id);
    }
}
