//! booking_core - Core domain types for the booking marketplace
//!
//! This crate provides the foundational types used across all booking-related crates:
//! - `user` - UserRole, UserProfile, AuthSession
//! - `service` - ServiceCategory, ServiceItem catalog types
//! - `booking` - Booking records and their status

pub mod booking;
pub mod service;
pub mod user;

// Re-export commonly used types
pub use booking::{Booking, BookingStatus};
pub use service::{PriceUnit, ServiceCategory, ServiceItem};
pub use user::{AuthSession, UserProfile, UserRole};
