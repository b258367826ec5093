use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// Whether the booking still holds one of the trip's slots
    pub fn holds_slot(&self) -> bool {
        !matches!(self, BookingStatus::Cancelled)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            other => Err(format!(
                "invalid status {:?}: must be one of pending, confirmed, cancelled",
                other
            )),
        }
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct NewBooking {
    pub trip_id: i64,
    #[serde(with = "booking_date")]
    pub booking_date: NaiveDate,
}

#[derive(Debug, Serialize, Clone)]
pub struct StatusUpdate {
    pub status: BookingStatus,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Booking {
    pub id: i64,
    pub user_id: i64,
    pub trip_id: i64,
    pub booking_date: String,
    pub status: BookingStatus,
}

/// A booking joined with its trip, as returned to the booking's owner
#[derive(Debug, Deserialize, Clone)]
pub struct UserBooking {
    pub id: i64,
    pub user_id: i64,
    pub trip_id: i64,
    pub booking_date: String,
    pub status: BookingStatus,
    pub title: String,
    #[serde(deserialize_with = "crate::models::trip::decimal")]
    pub price: f64,
    #[serde(deserialize_with = "crate::models::trip::text")]
    pub duration: String,
    pub description: String,
}

/// A booking joined with its user and trip, admin listing only
#[derive(Debug, Deserialize, Clone)]
pub struct AdminBooking {
    pub id: i64,
    pub user_id: i64,
    pub trip_id: i64,
    pub booking_date: String,
    pub status: BookingStatus,
    pub name: String,
    pub email: String,
    pub title: String,
    #[serde(deserialize_with = "crate::models::trip::decimal")]
    pub price: f64,
}

mod booking_date {
    use chrono::NaiveDate;
    use serde::Serializer;

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format("%Y-%m-%d").to_string())
    }
}
