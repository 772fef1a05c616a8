//! Viewing appointments and completed sale transactions.
//!
//! Both reference a listing by id plus a buyer and a seller. Lookups by user match
//! either party and return an empty vector, never an error, when nothing matches.

use super::account::SessionIdentity;
use super::error::{MarketplaceError, Result};
use super::listing::Listing;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle of a viewing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether a request in this status may move to `next`.
    ///
    /// A pending request can be confirmed or cancelled; a confirmed one can be
    /// completed or cancelled. Completed and cancelled are final.
    #[must_use]
    pub const fn can_move_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed | Self::Cancelled)
                | (Self::Confirmed, Self::Completed | Self::Cancelled)
        )
    }
}

impl FromStr for AppointmentStatus {
    type Err = MarketplaceError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(MarketplaceError::validation(
                "status",
                format!("unknown value '{other}'"),
            )),
        }
    }
}

/// A scheduled viewing of a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub listing_id: String,
    pub buyer_id: String,
    pub buyer_name: String,
    pub seller_id: String,
    pub date: NaiveDate,
    /// Local time of day as `HH:MM`.
    pub time: String,
    pub status: AppointmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Appointment {
    /// True if `user_id` is the buyer or the seller.
    #[must_use]
    pub fn involves(&self, user_id: &str) -> bool {
        self.buyer_id == user_id || self.seller_id == user_id
    }
}

/// Input for a viewing request. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAppointment {
    pub listing_id: String,
    pub buyer_id: String,
    pub buyer_name: String,
    pub seller_id: String,
    pub date: NaiveDate,
    pub time: String,
    pub status: AppointmentStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewAppointment {
    /// Builds a pending viewing request of `listing` by the session holder.
    ///
    /// # Errors
    ///
    /// Returns [`MarketplaceError::Validation`] if `time` is not a `HH:MM` clock time.
    pub fn viewing(
        listing: &Listing,
        buyer: &SessionIdentity,
        date: NaiveDate,
        time: impl Into<String>,
        notes: Option<String>,
    ) -> Result<Self> {
        let time = time.into();
        if chrono::NaiveTime::parse_from_str(&time, "%H:%M").is_err() {
            return Err(MarketplaceError::validation(
                "time",
                format!("expected HH:MM, got '{time}'"),
            ));
        }

        Ok(Self {
            listing_id: listing.id.clone(),
            buyer_id: buyer.id.clone(),
            buyer_name: buyer.name.clone(),
            seller_id: listing.seller_id.clone(),
            date,
            time,
            status: AppointmentStatus::Pending,
            notes: notes.filter(|n| !n.trim().is_empty()),
        })
    }

    #[must_use]
    pub fn into_appointment(self, id: String) -> Appointment {
        Appointment {
            id,
            listing_id: self.listing_id,
            buyer_id: self.buyer_id,
            buyer_name: self.buyer_name,
            seller_id: self.seller_id,
            date: self.date,
            time: self.time,
            status: self.status,
            notes: self.notes,
        }
    }
}

/// Splits appointments into `(upcoming, past)` relative to `today`.
///
/// An appointment dated today counts as upcoming. Input order is preserved within
/// each half.
#[must_use]
pub fn partition_upcoming(
    appointments: Vec<Appointment>,
    today: NaiveDate,
) -> (Vec<Appointment>, Vec<Appointment>) {
    appointments.into_iter().partition(|a| a.date >= today)
}

/// Outcome of a completed sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Completed,
    Refunded,
    Disputed,
}

impl TransactionStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Refunded => "refunded",
            Self::Disputed => "disputed",
        }
    }
}

/// A sale between two users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub listing_id: String,
    pub buyer_id: String,
    pub buyer_name: String,
    pub seller_id: String,
    pub seller_name: String,
    pub price: u64,
    pub date: NaiveDate,
    pub status: TransactionStatus,
}

impl Transaction {
    /// True if `user_id` is the buyer or the seller.
    #[must_use]
    pub fn involves(&self, user_id: &str) -> bool {
        self.buyer_id == user_id || self.seller_id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn appointment(id: &str, date: NaiveDate) -> Appointment {
        Appointment {
            id: id.to_string(),
            listing_id: "car-1".to_string(),
            buyer_id: "user-2".to_string(),
            buyer_name: "Emily Jones".to_string(),
            seller_id: "user-1".to_string(),
            date,
            time: "14:00".to_string(),
            status: AppointmentStatus::Confirmed,
            notes: None,
        }
    }

    #[test]
    fn involves_either_party() {
        let a = appointment("appointment-1", NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert!(a.involves("user-1"));
        assert!(a.involves("user-2"));
        assert!(!a.involves("user-3"));
    }

    #[test]
    fn today_counts_as_upcoming() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let yesterday = today.pred_opt().unwrap();
        let (upcoming, past) = partition_upcoming(
            vec![appointment("a", yesterday), appointment("b", today)],
            today,
        );
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].id, "b");
        assert_eq!(past[0].id, "a");
    }

    #[test]
    fn status_wire_names() {
        let json = serde_json::to_string(&AppointmentStatus::Cancelled).unwrap();
        assert_eq!(json, "\"cancelled\"");
        assert_eq!(AppointmentStatus::default().as_str(), "pending");
    }

    #[test]
    fn only_open_requests_change_status() {
        use AppointmentStatus::{Cancelled, Completed, Confirmed, Pending};
        assert!(Pending.can_move_to(Confirmed));
        assert!(Pending.can_move_to(Cancelled));
        assert!(!Pending.can_move_to(Completed));
        assert!(Confirmed.can_move_to(Completed));
        assert!(!Cancelled.can_move_to(Confirmed));
        assert!(!Completed.can_move_to(Cancelled));
        assert_eq!("confirmed".parse::<AppointmentStatus>().unwrap(), Confirmed);
        assert!("done".parse::<AppointmentStatus>().is_err());
    }
}
