use serde::Deserialize;
use serde_json::Value;

/// `{success, message, data, error}` wrapper the backend puts around every non-204 body
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
    pub error: Option<String>,
}

// API Response wrappers
pub type AuthResponse = ApiEnvelope<crate::models::AuthData>;
pub type TripResponse = ApiEnvelope<crate::models::Trip>;
pub type TripsResponse = ApiEnvelope<Vec<crate::models::Trip>>;
pub type BookingResponse = ApiEnvelope<crate::models::Booking>;
pub type UserBookingResponse = ApiEnvelope<crate::models::UserBooking>;
pub type UserBookingsResponse = ApiEnvelope<Vec<crate::models::UserBooking>>;
pub type AdminBookingsResponse = ApiEnvelope<Vec<crate::models::AdminBooking>>;
pub type ContactResponse = ApiEnvelope<crate::models::Contact>;
pub type ContactsResponse = ApiEnvelope<Vec<crate::models::Contact>>;

/// Raw status/body pair, what the manual request path prints
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The envelope's `error` text, if the body carries one
    pub fn error_message(&self) -> Option<&str> {
        self.body.get("error").and_then(Value::as_str)
    }
}
