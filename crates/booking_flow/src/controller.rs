//! Booking flow controller.

use std::time::Duration;

use booking_core::{Booking, ServiceItem};
use chrono::{Local, NaiveDate};
use tokio::time::sleep;
use tracing::debug;

use crate::machine::{BookingFlowEvent, BookingMachine, BookingStep};

/// Form field values for one booking session.
#[derive(Debug, Clone, Default)]
pub struct BookingForm {
    /// ISO date (`YYYY-MM-DD`), today or later.
    pub date: String,
    /// Preferred time (`HH:MM`).
    pub time: String,
    pub notes: String,
}

/// Controller for one booking modal session, scoped to one fixed service
/// chosen before the modal opened.
pub struct BookingFlowController {
    service: ServiceItem,
    machine: BookingMachine,
    pub form: BookingForm,
    error: Option<String>,
    /// Stand-in for the backend call a real deployment would make.
    confirm_delay: Duration,
    confirming: bool,
}

impl BookingFlowController {
    pub fn new(service: ServiceItem) -> Self {
        Self {
            service,
            machine: BookingMachine::new(),
            form: BookingForm::default(),
            error: None,
            confirm_delay: Duration::from_millis(400),
            confirming: false,
        }
    }

    pub fn with_confirm_delay(mut self, delay: Duration) -> Self {
        self.confirm_delay = delay;
        self
    }

    pub fn step(&self) -> BookingStep {
        self.machine.step()
    }

    pub fn service(&self) -> &ServiceItem {
        &self.service
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The review total is always the service price.
    pub fn total_price(&self) -> f64 {
        self.service.price
    }

    /// Whether "Continue" is enabled: date and time must both be present.
    pub fn can_continue(&self) -> bool {
        !self.form.date.is_empty() && !self.form.time.is_empty()
    }

    /// Validate the form and advance to the review step.
    pub fn continue_to_review(&mut self) {
        if self.machine.step() != BookingStep::Form || !self.can_continue() {
            return;
        }
        match NaiveDate::parse_from_str(&self.form.date, "%Y-%m-%d") {
            Ok(date) if date >= Local::now().date_naive() => {
                self.error = None;
                self.machine.handle_event(BookingFlowEvent::ContinueRequested);
            }
            Ok(_) => {
                self.error = Some("The booking date must be today or later".to_string());
            }
            Err(_) => {
                self.error = Some("Please pick a valid date".to_string());
            }
        }
    }

    /// Back from review, preserving entered values.
    pub fn back_to_form(&mut self) {
        self.machine.handle_event(BookingFlowEvent::BackRequested);
    }

    /// Confirm the reviewed booking.
    ///
    /// Only legal from the review step, and a no-op while a confirm is
    /// already in flight. Returns the Booking for the shell to commit;
    /// this controller never touches the ledger itself.
    pub async fn confirm(&mut self) -> Option<Booking> {
        if self.machine.step() != BookingStep::Review || self.confirming {
            return None;
        }
        self.confirming = true;
        sleep(self.confirm_delay).await;
        self.confirming = false;

        let booking = Booking::confirmed(
            &self.service,
            self.form.date.clone(),
            self.form.time.clone(),
            self.form.notes.clone(),
        );
        debug!(service_id = %self.service.id, booking_id = %booking.id, "booking confirmed");
        self.machine.handle_event(BookingFlowEvent::Confirmed);
        Some(booking)
    }

    /// Reset the transient state so a later session starts fresh.
    pub fn reset(&mut self) {
        self.form = BookingForm::default();
        self.error = None;
        self.confirming = false;
        self.machine.handle_event(BookingFlowEvent::Closed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use booking_core::{BookingStatus, PriceUnit};

    fn sample_service() -> ServiceItem {
        ServiceItem {
            id: "p1".to_string(),
            category_id: "photo".to_string(),
            title: "Luxury fashion and portrait sessions".to_string(),
            provider_name: "by Allie".to_string(),
            price: 450.0,
            price_unit: PriceUnit::Group,
            rating: 5.0,
            review_count: 12,
            image: "luxury.jpg".to_string(),
            is_popular: false,
        }
    }

    fn controller() -> BookingFlowController {
        BookingFlowController::new(sample_service()).with_confirm_delay(Duration::ZERO)
    }

    #[test]
    fn test_continue_disabled_until_date_and_time_present() {
        let mut c = controller();
        assert!(!c.can_continue());

        c.form.date = "2999-06-01".to_string();
        assert!(!c.can_continue());

        c.form.time = "14:30".to_string();
        assert!(c.can_continue());

        c.form.date.clear();
        assert!(!c.can_continue());
    }

    #[test]
    fn test_continue_with_empty_fields_stays_on_form() {
        let mut c = controller();
        c.continue_to_review();
        assert_eq!(c.step(), BookingStep::Form);
    }

    #[test]
    fn test_past_date_is_rejected_inline() {
        let mut c = controller();
        c.form.date = "2000-01-01".to_string();
        c.form.time = "14:30".to_string();
        c.continue_to_review();
        assert_eq!(c.step(), BookingStep::Form);
        assert!(c.error().is_some());
    }

    #[test]
    fn test_unparseable_date_is_rejected_inline() {
        let mut c = controller();
        c.form.date = "next tuesday".to_string();
        c.form.time = "14:30".to_string();
        c.continue_to_review();
        assert_eq!(c.step(), BookingStep::Form);
        assert!(c.error().is_some());
    }

    #[test]
    fn test_today_is_accepted() {
        let mut c = controller();
        c.form.date = Local::now().date_naive().format("%Y-%m-%d").to_string();
        c.form.time = "09:00".to_string();
        c.continue_to_review();
        assert_eq!(c.step(), BookingStep::Review);
        assert!(c.error().is_none());
    }

    #[test]
    fn test_back_preserves_entered_values() {
        let mut c = controller();
        c.form.date = "2999-06-01".to_string();
        c.form.time = "14:30".to_string();
        c.form.notes = "Gate code 4411".to_string();
        c.continue_to_review();
        c.back_to_form();

        assert_eq!(c.step(), BookingStep::Form);
        assert_eq!(c.form.date, "2999-06-01");
        assert_eq!(c.form.time, "14:30");
        assert_eq!(c.form.notes, "Gate code 4411");
    }

    #[tokio::test]
    async fn test_confirm_builds_exactly_one_confirmed_booking() {
        let mut c = controller();
        c.form.date = "2999-06-01".to_string();
        c.form.time = "14:30".to_string();
        c.form.notes = "Rooftop".to_string();
        c.continue_to_review();

        let booking = c.confirm().await.expect("booking from review");
        assert_eq!(booking.service_id, "p1");
        assert_eq!(booking.total_price, 450.0);
        assert_eq!(booking.status, BookingStatus::Confirmed);
        assert_eq!(booking.date, "2999-06-01");
        assert_eq!(booking.time, "14:30");
        assert_eq!(booking.notes, "Rooftop");
        assert_eq!(c.step(), BookingStep::Success);

        // Success is terminal for the session.
        assert!(c.confirm().await.is_none());
    }

    #[tokio::test]
    async fn test_confirm_from_form_is_a_no_op() {
        let mut c = controller();
        c.form.date = "2999-06-01".to_string();
        c.form.time = "14:30".to_string();
        assert!(c.confirm().await.is_none());
        assert_eq!(c.step(), BookingStep::Form);
    }

    #[tokio::test]
    async fn test_reset_starts_the_next_session_fresh() {
        let mut c = controller();
        c.form.date = "2999-06-01".to_string();
        c.form.time = "14:30".to_string();
        c.continue_to_review();
        c.confirm().await.unwrap();

        c.reset();
        assert_eq!(c.step(), BookingStep::Form);
        assert!(c.form.date.is_empty());
        assert!(c.form.time.is_empty());
        assert!(c.form.notes.is_empty());
    }
}
