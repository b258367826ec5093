// Walk through the API against a local server: login, trips, bookings
use travelmate_cc::session::{decode_claims, load_token_if_present, save_token};
use travelmate_cc::{ApiError, BookingStatus, NewBooking, NewTrip, TravelMateClient, TripUpdate, AUTH_TOKEN_FILE};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🧭 TravelMate API exploration");

    let mut client = TravelMateClient::local(load_token_if_present(AUTH_TOKEN_FILE)?)?;
    client.set_api_logging(true);

    // Log in with the demo account, registering it on first run
    if client.token().is_none() {
        let auth = match client.login("naomi@example.com", "password123").await {
            Ok(auth) => auth,
            Err(e) if e.is_unauthorized() => {
                println!("📝 No account yet - registering");
                client.register("Naomi", "naomi@example.com", "password123").await?
            }
            Err(e) => return Err(e.into()),
        };
        save_token(AUTH_TOKEN_FILE, &auth.token)?;
        client.set_token(auth.token);
    }

    if let Some(token) = client.token() {
        let claims = decode_claims(token)?;
        println!("✅ Signed in as {} ({})", claims.email, claims.role);
        if claims.is_expired() {
            println!("⚠️  Saved token has expired - delete {} and rerun", AUTH_TOKEN_FILE);
            return Ok(());
        }
    }

    let trips = client.list_trips().await?;
    println!("🧳 {} trips available", trips.len());
    for trip in &trips {
        println!("   #{} {} - {:.2} ({} slots)", trip.id, trip.title, trip.price, trip.available_slots);
    }

    // Admin-only: creating and editing trips
    let new_trip = NewTrip {
        title: "Explore Paris".to_string(),
        description: "A week-long trip to explore the city of lights.".to_string(),
        available_slots: 20,
        duration: "7".to_string(),
        price: 1500.00,
    };
    match client.create_trip(&new_trip).await {
        Ok(trip) => {
            println!("✅ Created trip #{}", trip.id);
            let discount = TripUpdate {
                price: Some(1400.00),
                ..Default::default()
            };
            let updated = client.update_trip(trip.id, &discount).await?;
            println!("💰 {} now costs {:.2}", updated.title, updated.price);
        }
        Err(ApiError::Status { status: 401, message }) => {
            println!("⚠️  Skipping trip management: {}", message);
        }
        Err(e) => return Err(e.into()),
    }

    let Some(trip) = trips.iter().find(|t| !t.is_sold_out()) else {
        println!("⚠️  No trip with free slots to book");
        return Ok(());
    };

    let booking_date = chrono::Utc::now().date_naive() + chrono::Duration::days(30);
    let booking = client
        .create_booking(&NewBooking { trip_id: trip.id, booking_date })
        .await?;
    println!("📅 Booked {} for {} (booking #{}, {})", trip.title, booking.booking_date, booking.id, booking.status);

    for booking in client.list_bookings().await? {
        println!("   #{} {} on {} - {}", booking.id, booking.title, booking.booking_date, booking.status);
    }

    match client.update_booking_status(booking.id, BookingStatus::Confirmed).await {
        Ok(updated) => println!("✅ Booking #{} is now {}", updated.id, updated.status),
        Err(e) if e.is_unauthorized() => println!("⚠️  Only admins can confirm bookings"),
        Err(e) => return Err(e.into()),
    }

    client.delete_booking(booking.id).await?;
    println!("🗑️  Deleted booking #{}", booking.id);

    println!("🎯 Exploration complete - see api_debug.log for the full exchange");
    Ok(())
}
