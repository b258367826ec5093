// Endpoint table: method, path, body and auth requirement for every API call
use reqwest::Method;
use serde_json::Value;

use crate::error::ApiError;
use crate::models::*;

/// One HTTP request, ready for `TravelMateClient::execute`
#[derive(Debug, Clone, PartialEq)]
pub struct RequestPlan {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
    pub requires_auth: bool,
}

impl RequestPlan {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            requires_auth: false,
        }
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn authed(mut self) -> Self {
        self.requires_auth = true;
        self
    }

    fn with_json<T: serde::Serialize>(self, payload: &T) -> Result<Self, ApiError> {
        Ok(self.with_body(serde_json::to_value(payload)?))
    }

    // Authentication
    pub fn register(payload: &RegisterRequest) -> Result<Self, ApiError> {
        Self::new(Method::POST, "/auth/register").with_json(payload)
    }

    pub fn login(payload: &LoginRequest) -> Result<Self, ApiError> {
        Self::new(Method::POST, "/auth/login").with_json(payload)
    }

    // Trips
    pub fn list_trips() -> Self {
        Self::new(Method::GET, "/trips")
    }

    pub fn get_trip(trip_id: i64) -> Self {
        Self::new(Method::GET, format!("/trips/{}", trip_id))
    }

    pub fn create_trip(trip: &NewTrip) -> Result<Self, ApiError> {
        Self::new(Method::POST, "/trips").with_json(trip).map(Self::authed)
    }

    /// An update with no fields is refused here; the server would answer 400
    pub fn update_trip(trip_id: i64, update: &TripUpdate) -> Result<Self, ApiError> {
        if update.is_empty() {
            return Err(ApiError::Validation(
                "no fields to update - set at least one of title, description, available_slots, duration, price".to_string(),
            ));
        }
        Self::new(Method::PATCH, format!("/trips/{}", trip_id))
            .with_json(update)
            .map(Self::authed)
    }

    pub fn delete_trip(trip_id: i64) -> Self {
        Self::new(Method::DELETE, format!("/trips/{}", trip_id)).authed()
    }

    // Bookings
    pub fn create_booking(booking: &NewBooking) -> Result<Self, ApiError> {
        Self::new(Method::POST, "/bookings").with_json(booking).map(Self::authed)
    }

    pub fn list_bookings() -> Self {
        Self::new(Method::GET, "/bookings").authed()
    }

    pub fn get_booking(booking_id: i64) -> Self {
        Self::new(Method::GET, format!("/bookings/{}", booking_id)).authed()
    }

    pub fn list_all_bookings() -> Self {
        Self::new(Method::GET, "/admin/bookings").authed()
    }

    pub fn update_booking_status(booking_id: i64, status: BookingStatus) -> Result<Self, ApiError> {
        Self::new(Method::PATCH, format!("/bookings/{}/status", booking_id))
            .with_json(&StatusUpdate { status })
            .map(Self::authed)
    }

    pub fn delete_booking(booking_id: i64) -> Self {
        Self::new(Method::DELETE, format!("/bookings/{}", booking_id)).authed()
    }

    // Contact form
    pub fn submit_contact(contact: &NewContact) -> Result<Self, ApiError> {
        Self::new(Method::POST, "/contacts").with_json(contact)
    }

    pub fn list_contacts() -> Self {
        Self::new(Method::GET, "/admin/contacts").authed()
    }

    pub fn get_contact(contact_id: i64) -> Self {
        Self::new(Method::GET, format!("/admin/contacts/{}", contact_id)).authed()
    }

    pub fn mark_contact_read(contact_id: i64) -> Self {
        Self::new(Method::PATCH, format!("/admin/contacts/{}/read", contact_id)).authed()
    }

    pub fn delete_contact(contact_id: i64) -> Self {
        Self::new(Method::DELETE, format!("/admin/contacts/{}", contact_id)).authed()
    }
}
