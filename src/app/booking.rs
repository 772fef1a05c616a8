//! Viewing requests made from a listing's detail page, and their follow-up.

use crate::domain::{Appointment, AppointmentStatus, MarketplaceError, NewAppointment, Result};
use crate::session::SessionContext;
use crate::storage::Storage;
use chrono::NaiveDate;

/// What the buyer fills in on the booking form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewingRequest {
    pub listing_id: String,
    pub date: NaiveDate,
    /// `HH:MM`, 24-hour clock.
    pub time: String,
    pub notes: Option<String>,
}

/// Books a viewing for the signed-in user.
///
/// The buyer is the session identity and the seller is the listing's seller. The
/// request starts out pending.
///
/// # Errors
///
/// - [`MarketplaceError::Unauthenticated`] without an active session
/// - [`MarketplaceError::NotFound`] if the listing does not exist
/// - [`MarketplaceError::Validation`] for a malformed time
pub fn book_viewing(
    store: &mut dyn Storage,
    session: &SessionContext,
    request: ViewingRequest,
) -> Result<Appointment> {
    let _span = tracing::debug_span!("book_viewing", listing_id = %request.listing_id).entered();

    let buyer = session.require()?;
    let listing = store
        .listing(&request.listing_id)?
        .ok_or_else(|| MarketplaceError::not_found("listing", &request.listing_id))?;

    let input = NewAppointment::viewing(&listing, buyer, request.date, request.time, request.notes)?;
    let appointment = store.create_appointment(input)?;

    tracing::debug!(appointment_id = %appointment.id, buyer_id = %buyer.id, "viewing requested");
    Ok(appointment)
}

/// Moves one of the user's appointments to a new status.
///
/// Either party may act on it. Only open requests change: pending ones can be
/// confirmed or cancelled, confirmed ones completed or cancelled.
///
/// # Errors
///
/// - [`MarketplaceError::Unauthenticated`] without an active session
/// - [`MarketplaceError::NotFound`] if the user takes no part in that appointment
/// - [`MarketplaceError::Validation`] if the status change is not allowed
pub fn set_appointment_status(
    store: &mut dyn Storage,
    session: &SessionContext,
    id: &str,
    status: AppointmentStatus,
) -> Result<Appointment> {
    let user = session.require()?;
    let _span = tracing::debug_span!("set_appointment_status",
        appointment_id = %id,
        status = status.as_str()
    ).entered();

    let current = store
        .appointments_for_user(&user.id)?
        .into_iter()
        .find(|a| a.id == id)
        .ok_or_else(|| MarketplaceError::not_found("appointment", id))?;

    if !current.status.can_move_to(status) {
        return Err(MarketplaceError::validation(
            "status",
            format!("cannot move from {} to {}", current.status.as_str(), status.as_str()),
        ));
    }
    store.update_appointment_status(id, status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AppointmentStatus, SessionIdentity};
    use crate::storage::MemoryStorage;

    fn request(listing_id: &str) -> ViewingRequest {
        ViewingRequest {
            listing_id: listing_id.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 4, 2).unwrap(),
            time: "10:30".to_string(),
            notes: Some("Can I bring a mechanic?".to_string()),
        }
    }

    fn emily() -> SessionContext {
        SessionContext::signed_in(SessionIdentity {
            id: "user-2".to_string(),
            name: "Emily Jones".to_string(),
            email: "emily@example.com".to_string(),
        })
    }

    #[test]
    fn anonymous_booking_is_refused() {
        let mut store = MemoryStorage::seeded();
        let err = book_viewing(&mut store, &SessionContext::anonymous(), request("car-2")).unwrap_err();
        assert!(matches!(err, MarketplaceError::Unauthenticated));
        assert_eq!(store.appointments_for_user("user-2").unwrap().len(), 1);
    }

    #[test]
    fn booking_links_buyer_and_seller() {
        let mut store = MemoryStorage::seeded();
        let appointment = book_viewing(&mut store, &emily(), request("car-2")).unwrap();

        assert_eq!(appointment.id, "appointment-2");
        assert_eq!(appointment.buyer_id, "user-2");
        assert_eq!(appointment.status, AppointmentStatus::Pending);

        let seller = store.listing("car-2").unwrap().unwrap().seller_id;
        assert_eq!(appointment.seller_id, seller);
    }

    #[test]
    fn missing_listing_is_not_found() {
        let mut store = MemoryStorage::seeded();
        let err = book_viewing(&mut store, &emily(), request("car-99")).unwrap_err();
        assert!(matches!(err, MarketplaceError::NotFound { entity: "listing", .. }));
    }

    #[test]
    fn either_party_can_move_an_open_request() {
        let mut store = MemoryStorage::seeded();
        let booked = book_viewing(&mut store, &emily(), request("car-1")).unwrap();

        let john = SessionContext::signed_in(SessionIdentity {
            id: "user-1".to_string(),
            name: "John Smith".to_string(),
            email: "john@example.com".to_string(),
        });
        let confirmed = set_appointment_status(&mut store, &john, &booked.id, AppointmentStatus::Confirmed).unwrap();
        assert_eq!(confirmed.status, AppointmentStatus::Confirmed);

        let cancelled = set_appointment_status(&mut store, &emily(), &booked.id, AppointmentStatus::Cancelled).unwrap();
        assert_eq!(cancelled.status, AppointmentStatus::Cancelled);

        let err = set_appointment_status(&mut store, &john, &booked.id, AppointmentStatus::Confirmed).unwrap_err();
        assert!(matches!(err, MarketplaceError::Validation { field: "status", .. }));
    }

    #[test]
    fn strangers_and_anonymous_users_cannot_change_status() {
        let mut store = MemoryStorage::seeded();
        let err = set_appointment_status(
            &mut store,
            &SessionContext::anonymous(),
            "appointment-1",
            AppointmentStatus::Cancelled,
        )
        .unwrap_err();
        assert!(matches!(err, MarketplaceError::Unauthenticated));

        let stranger = SessionContext::signed_in(SessionIdentity {
            id: "user-7".to_string(),
            name: "David Johnson".to_string(),
            email: "david@example.com".to_string(),
        });
        let err = set_appointment_status(&mut store, &stranger, "appointment-1", AppointmentStatus::Cancelled)
            .unwrap_err();
        assert!(matches!(err, MarketplaceError::NotFound { entity: "appointment", .. }));

        let unchanged = store.appointments_for_user("user-2").unwrap();
        assert_eq!(unchanged[0].status, AppointmentStatus::Confirmed);
    }
}
