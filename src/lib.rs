// TravelMate API client library
// Typed access to the trips/bookings service plus the CLI plumbing around it

pub mod models;
pub mod client;
pub mod commands;
pub mod session;
pub mod error;
pub mod debug;
pub mod config;
pub mod verbosity;

// Re-export commonly used types
pub use models::{
    auth::AuthData,
    trip::{Trip, NewTrip, TripUpdate},
    booking::{Booking, BookingStatus, NewBooking, UserBooking, AdminBooking},
    contact::{Contact, NewContact},
    responses::*,
};

pub use client::{RequestPlan, TravelMateClient};
pub use config::TravelMateConfig;
pub use error::ApiError;
pub use reqwest::Method;

// Constants
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";
pub const AUTH_TOKEN_FILE: &str = "AUTH_TOKEN";
pub const CONFIG_FILE: &str = "travelmate.toml";
