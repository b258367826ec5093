// Command-line surface: argument definitions, request planning and output
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use reqwest::Method;
use serde_json::Value;
use std::path::PathBuf;

pub use crate::client::RequestPlan;
use crate::client::TravelMateClient;
use crate::config::TravelMateConfig;
use crate::error::ApiError;
use crate::models::*;
use crate::session;
use crate::{debug_info, v_debug, v_error, v_info, v_summary};

#[derive(Parser, Debug)]
#[command(name = "travelmate", version, about = "Command-line client for the TravelMate trips and bookings API")]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, global = true, default_value = crate::CONFIG_FILE)]
    pub config: PathBuf,

    /// Override the API base URL from the config file
    #[arg(long, global = true, env = "TRAVELMATE_API_URL")]
    pub base_url: Option<String>,

    /// Bearer token to use instead of the saved token file
    #[arg(long, global = true, env = "TRAVELMATE_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// More status output (-vv for full)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only print the response
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Ask for approval before every API call
    #[arg(long, global = true)]
    pub debug: bool,

    /// Trace every API call to stderr
    #[arg(long, global = true)]
    pub full_debug: bool,

    /// Append requests and responses to the API log file
    #[arg(long, global = true)]
    pub log_api: bool,

    /// Print the body as compact JSON
    #[arg(long, global = true)]
    pub raw: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Register a new account and save its token
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "TRAVELMATE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Log in and save the returned token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "TRAVELMATE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the saved token
    Logout,
    /// Show who the current token belongs to and when it expires
    Whoami,
    #[command(subcommand)]
    Trips(TripCommand),
    #[command(subcommand)]
    Bookings(BookingCommand),
    #[command(subcommand)]
    Contacts(ContactCommand),
    /// Send an arbitrary request, e.g. `request GET /trips`
    Request {
        method: String,
        path: String,
        /// JSON request body
        #[arg(long)]
        json: Option<String>,
        /// Leave the Authorization header off even when a token is available
        #[arg(long)]
        anonymous: bool,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum TripCommand {
    /// List all trips
    List,
    /// Show one trip
    Get { id: i64 },
    /// Create a trip (admin)
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long = "slots")]
        available_slots: i64,
        #[arg(long)]
        duration: String,
        #[arg(long)]
        price: f64,
    },
    /// Change some fields of a trip (admin)
    Update {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long = "slots")]
        available_slots: Option<i64>,
        #[arg(long)]
        duration: Option<String>,
        #[arg(long)]
        price: Option<f64>,
    },
    /// Delete a trip (admin)
    Delete { id: i64 },
}

#[derive(Subcommand, Debug, Clone)]
pub enum BookingCommand {
    /// Book a trip for a date (YYYY-MM-DD)
    Create {
        #[arg(long = "trip")]
        trip_id: i64,
        #[arg(long = "date")]
        booking_date: NaiveDate,
    },
    /// List your bookings
    List,
    /// Show one of your bookings
    Get { id: i64 },
    /// List every booking (admin)
    All,
    /// Set a booking's status (admin)
    Status { id: i64, status: BookingStatus },
    /// Delete one of your bookings
    Delete { id: i64 },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ContactCommand {
    /// Send a message through the contact form
    Submit {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
    },
    /// List contact messages (admin)
    List,
    /// Show one contact message (admin)
    Get { id: i64 },
    /// Mark a contact message as read (admin)
    Read { id: i64 },
    /// Delete a contact message (admin)
    Delete { id: i64 },
}

impl Command {
    /// Resolve the command to its request; `None` for commands that never hit the network
    pub fn plan(&self) -> Result<Option<RequestPlan>, ApiError> {
        let plan = match self {
            Command::Register { name, email, password } => RequestPlan::register(&RegisterRequest {
                name: name.clone(),
                email: email.clone(),
                password: password.clone(),
            })?,
            Command::Login { email, password } => RequestPlan::login(&LoginRequest {
                email: email.clone(),
                password: password.clone(),
            })?,
            Command::Logout | Command::Whoami => return Ok(None),
            Command::Trips(trip) => trip.plan()?,
            Command::Bookings(booking) => booking.plan()?,
            Command::Contacts(contact) => contact.plan()?,
            Command::Request { method, path, json, .. } => {
                let method = Method::from_bytes(method.trim().to_uppercase().as_bytes())
                    .map_err(|_| ApiError::Validation(format!("invalid HTTP method {:?}", method)))?;
                let mut plan = RequestPlan::new(method, path.clone());
                if let Some(json) = json {
                    plan = plan.with_body(serde_json::from_str(json)?);
                }
                plan
            }
        };
        Ok(Some(plan))
    }

    fn saves_token(&self) -> bool {
        matches!(self, Command::Register { .. } | Command::Login { .. })
    }
}

impl TripCommand {
    fn plan(&self) -> Result<RequestPlan, ApiError> {
        match self {
            TripCommand::List => Ok(RequestPlan::list_trips()),
            TripCommand::Get { id } => Ok(RequestPlan::get_trip(*id)),
            TripCommand::Create { title, description, available_slots, duration, price } => {
                RequestPlan::create_trip(&NewTrip {
                    title: title.clone(),
                    description: description.clone(),
                    available_slots: *available_slots,
                    duration: duration.clone(),
                    price: *price,
                })
            }
            TripCommand::Update { id, title, description, available_slots, duration, price } => {
                let update = TripUpdate {
                    title: title.clone(),
                    description: description.clone(),
                    available_slots: *available_slots,
                    duration: duration.clone(),
                    price: *price,
                };
                if update.is_empty() {
                    return Err(ApiError::Validation(
                        "no fields to update - pass at least one of --title, --description, --slots, --duration, --price".to_string(),
                    ));
                }
                RequestPlan::update_trip(*id, &update)
            }
            TripCommand::Delete { id } => Ok(RequestPlan::delete_trip(*id)),
        }
    }
}

impl BookingCommand {
    fn plan(&self) -> Result<RequestPlan, ApiError> {
        match self {
            BookingCommand::Create { trip_id, booking_date } => RequestPlan::create_booking(&NewBooking {
                trip_id: *trip_id,
                booking_date: *booking_date,
            }),
            BookingCommand::List => Ok(RequestPlan::list_bookings()),
            BookingCommand::Get { id } => Ok(RequestPlan::get_booking(*id)),
            BookingCommand::All => Ok(RequestPlan::list_all_bookings()),
            BookingCommand::Status { id, status } => RequestPlan::update_booking_status(*id, *status),
            BookingCommand::Delete { id } => Ok(RequestPlan::delete_booking(*id)),
        }
    }
}

impl ContactCommand {
    fn plan(&self) -> Result<RequestPlan, ApiError> {
        match self {
            ContactCommand::Submit { name, email, message } => RequestPlan::submit_contact(&NewContact {
                name: name.clone(),
                email: email.clone(),
                message: message.clone(),
            }),
            ContactCommand::List => Ok(RequestPlan::list_contacts()),
            ContactCommand::Get { id } => Ok(RequestPlan::get_contact(*id)),
            ContactCommand::Read { id } => Ok(RequestPlan::mark_contact_read(*id)),
            ContactCommand::Delete { id } => Ok(RequestPlan::delete_contact(*id)),
        }
    }
}

impl Cli {
    /// Effective verbosity: flags win over the config file
    pub fn verbosity(&self, configured: u8) -> u8 {
        if self.quiet {
            0
        } else if self.verbose > 0 {
            self.verbose.saturating_add(1).min(crate::verbosity::MAX_VERBOSITY)
        } else {
            configured.min(crate::verbosity::MAX_VERBOSITY)
        }
    }
}

pub async fn run(cli: Cli) -> Result<(), ApiError> {
    let mut config = TravelMateConfig::load_or_create(&cli.config)?;
    if let Some(base_url) = &cli.base_url {
        config.api.base_url = base_url.clone();
    }
    if cli.log_api {
        config.logging.api_logging = true;
    }
    config.validate()?;

    crate::verbosity::set_verbosity_level(cli.verbosity(config.logging.verbosity));
    crate::debug::set_full_debug(cli.full_debug);
    config.print_summary();

    if matches!(cli.command, Command::Logout) {
        if session::clear_token(&config.auth.token_file)? {
            v_summary!("👋 Removed token file {}", config.auth.token_file);
        } else {
            v_summary!("👋 No token file at {}", config.auth.token_file);
        }
        return Ok(());
    }

    let token = match &cli.token {
        Some(token) => Some(token.clone()),
        None => saved_token(&config.auth.token_file),
    };

    if matches!(cli.command, Command::Whoami) {
        let token = token.ok_or(ApiError::MissingToken)?;
        return print_claims(&session::decode_claims(&token)?);
    }

    let Some(plan) = cli.command.plan()? else {
        return Ok(());
    };

    let mut client = TravelMateClient::new(&config.api.base_url, token)?.with_timeout(config.timeout());
    client.set_debug_mode(cli.debug);
    client.set_api_logging(config.logging.api_logging);
    client.set_api_log_path(&config.logging.api_log_file);
    if let Command::Request { anonymous: true, .. } = &cli.command {
        client.clear_token();
    }

    debug_info!("Sending {} {}", plan.method, client.url(&plan.path));
    let response = client.execute(&plan).await?;
    print_response(&response, cli.raw)?;

    if !response.is_success() {
        let message = response.error_message().unwrap_or("request failed").to_string();
        return Err(ApiError::Status { status: response.status, message });
    }

    if cli.command.saves_token() {
        store_session(&response, &config.auth.token_file)?;
    }
    summarize(&cli.command, &response.body);
    Ok(())
}

/// Status code, then the body; the only thing written to stdout
pub fn print_response(response: &ApiResponse, raw: bool) -> Result<(), ApiError> {
    println!("{}", response.status);
    if raw {
        println!("{}", serde_json::to_string(&response.body)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&response.body)?);
    }
    Ok(())
}

/// Token from the token file; a blank or unreadable file counts as no token
fn saved_token(token_file: &str) -> Option<String> {
    match session::load_token_if_present(token_file) {
        Ok(token) => token,
        Err(e) => {
            v_info!("⚠️  Ignoring token file {}: {}", token_file, e);
            None
        }
    }
}

fn store_session(response: &ApiResponse, token_file: &str) -> Result<(), ApiError> {
    let envelope: AuthResponse = serde_json::from_value(response.body.clone())?;
    match envelope.data {
        Some(auth) => {
            session::save_token(token_file, &auth.token)?;
            v_info!("🔑 Signed in as {} <{}> ({}) - token saved to {}", auth.name, auth.email, auth.role, token_file);
            Ok(())
        }
        None => Err(ApiError::UnexpectedResponse("auth response did not include a token".to_string())),
    }
}

fn print_claims(claims: &session::TokenClaims) -> Result<(), ApiError> {
    println!("user id: {}", claims.user_id);
    println!("email:   {}", claims.email);
    println!("role:    {}", claims.role);
    if let Some(issued) = claims.issued_at() {
        println!("issued:  {}", issued.format("%Y-%m-%d %H:%M:%S UTC"));
    }
    match claims.expires_at() {
        Some(expiry) if claims.is_expired() => {
            println!("expires: {} (EXPIRED)", expiry.format("%Y-%m-%d %H:%M:%S UTC"));
            v_error!("⚠️  Token has expired - run `login` again");
        }
        Some(expiry) => println!("expires: {}", expiry.format("%Y-%m-%d %H:%M:%S UTC")),
        None => println!("expires: never"),
    }
    Ok(())
}

/// Human-readable recap on stderr for listing commands
fn summarize(command: &Command, body: &Value) {
    let result = match command {
        Command::Trips(TripCommand::List) => serde_json::from_value::<TripsResponse>(body.clone()).map(|r| {
            let trips = r.data.unwrap_or_default();
            v_info!("🧳 {} trips", trips.len());
            for trip in &trips {
                let availability = if trip.is_sold_out() {
                    "sold out".to_string()
                } else {
                    format!("{} slots left", trip.available_slots)
                };
                v_info!("   #{} {} - {:.2} - {} - {}", trip.id, trip.title, trip.price, trip.duration, availability);
            }
        }),
        Command::Bookings(BookingCommand::List) => {
            serde_json::from_value::<UserBookingsResponse>(body.clone()).map(|r| {
                let bookings = r.data.unwrap_or_default();
                v_info!("📅 {} bookings", bookings.len());
                for booking in &bookings {
                    v_info!("   #{} {} on {} - {}", booking.id, booking.title, booking.booking_date, booking.status);
                }
            })
        }
        Command::Bookings(BookingCommand::All) => {
            serde_json::from_value::<AdminBookingsResponse>(body.clone()).map(|r| {
                let bookings = r.data.unwrap_or_default();
                v_info!("📅 {} bookings", bookings.len());
                for booking in &bookings {
                    v_info!(
                        "   #{} {} <{}> - {} on {} - {}",
                        booking.id, booking.name, booking.email, booking.title, booking.booking_date, booking.status
                    );
                }
            })
        }
        Command::Contacts(ContactCommand::List) => {
            serde_json::from_value::<ContactsResponse>(body.clone()).map(|r| {
                let contacts = r.data.unwrap_or_default();
                let unread = contacts.iter().filter(|c| !c.read.unwrap_or(false)).count();
                v_info!("✉️  {} messages ({} unread)", contacts.len(), unread);
            })
        }
        _ => Ok(()),
    };

    if let Err(e) = result {
        v_debug!("Could not summarize response: {}", e);
    }
}
