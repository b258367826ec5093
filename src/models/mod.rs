// Models module - request bodies and response payloads for the TravelMate API

pub mod auth;
pub mod trip;
pub mod booking;
pub mod contact;
pub mod responses;

// Re-export all models for easier imports
pub use auth::*;
pub use trip::*;
pub use booking::*;
pub use contact::*;
pub use responses::*;
