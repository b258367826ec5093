// Client module - TravelMate API client and its endpoint table
pub mod api;
pub mod endpoints;

pub use api::TravelMateClient;
pub use endpoints::RequestPlan;
