use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs::OpenOptions;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use super::endpoints::RequestPlan;
use crate::error::ApiError;
use crate::models::*;
use crate::{debug_api_call, v_error, DEFAULT_API_BASE_URL};

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_API_LOG_FILE: &str = "api_debug.log";

/// Where debug-mode approvals are read from (stdin when unset)
type ApprovalInput = Arc<Mutex<Box<dyn BufRead + Send>>>;

#[derive(Clone)]
pub struct TravelMateClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
    timeout: Duration,
    debug_mode: bool,
    api_logging: bool,
    api_log_path: PathBuf,
    approval_input: Option<ApprovalInput>,
}

impl TravelMateClient {
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        let mut travel_client = TravelMateClient {
            client,
            base_url: normalize_base_url(base_url),
            token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
            debug_mode: false,
            api_logging: false,
            api_log_path: PathBuf::from(DEFAULT_API_LOG_FILE),
            approval_input: None,
        };
        if let Some(token) = token {
            travel_client.set_token(token);
        }
        Ok(travel_client)
    }

    /// Client against the local development server
    pub fn local(token: Option<String>) -> Result<Self, ApiError> {
        Self::new(DEFAULT_API_BASE_URL, token)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn set_token(&mut self, token: String) {
        let token = token.trim().to_string();
        self.token = if token.is_empty() { None } else { Some(token) };
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }

    pub fn set_debug_mode(&mut self, debug: bool) {
        self.debug_mode = debug;
    }

    pub fn set_api_logging(&mut self, logging: bool) {
        self.api_logging = logging;
    }

    pub fn set_api_log_path(&mut self, path: impl AsRef<Path>) {
        self.api_log_path = path.as_ref().to_path_buf();
    }

    /// Read debug-mode answers from `input` instead of stdin
    pub fn set_approval_input(&mut self, input: impl BufRead + Send + 'static) {
        let input: Box<dyn BufRead + Send> = Box::new(input);
        self.approval_input = Some(Arc::new(Mutex::new(input)));
    }

    /// Resolve an API path against the base URL; absolute URLs pass through
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        let path = path.trim_start_matches('/');
        let base_has_api = self.base_url.ends_with("/api");
        // Accept both "trips" and "/api/trips" when the base already ends in /api
        let path = match path.strip_prefix("api/") {
            Some(rest) if base_has_api => rest,
            _ if base_has_api && path == "api" => "",
            _ => path,
        };
        if path.is_empty() {
            self.base_url.clone()
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn request_approval(&self, method: &Method, url: &str, body: Option<&str>) -> Result<bool, ApiError> {
        if !self.debug_mode {
            return Ok(true);
        }

        eprintln!("\n🐛 DEBUG API CALL:");
        eprintln!("   {} {}", method, url);
        if let Some(body) = body {
            eprintln!("   Body: {}", body);
        }
        eprint!("   Approve? (y/n): ");
        io::stderr().flush()?;

        let mut answer = String::new();
        match &self.approval_input {
            Some(input) => {
                let mut input = input.lock().unwrap_or_else(PoisonError::into_inner);
                input.read_line(&mut answer)?;
            }
            None => {
                io::stdin().lock().read_line(&mut answer)?;
            }
        }

        Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
    }

    fn log_api_call(&self, method: &Method, url: &str, body: Option<&str>, status: u16, response_body: &str) {
        if !self.api_logging {
            return;
        }
        if let Err(e) = self.append_api_log(method, url, body, status, response_body) {
            v_error!("⚠️  Could not write API log {}: {}", self.api_log_path.display(), e);
        }
    }

    fn append_api_log(&self, method: &Method, url: &str, body: Option<&str>, status: u16, response_body: &str) -> io::Result<()> {
        let mut log = OpenOptions::new().create(true).append(true).open(&self.api_log_path)?;
        writeln!(log)?;
        writeln!(log, "=== API CALL [{}] ===", chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC"))?;
        writeln!(log, "Method: {}", method)?;
        writeln!(log, "URL: {}", url)?;
        writeln!(log, "Request Body: {}", body.unwrap_or("None"))?;
        writeln!(log, "Response Status: {}", status)?;
        writeln!(log, "Response Body: {}", response_body)?;
        writeln!(log, "{}", "=".repeat(40))
    }

    /// Send one request and hand back the status and decoded body, whatever the status.
    /// Fails only on transport errors or a successful response that is not JSON.
    pub async fn send(&self, method: Method, path: &str, body: Option<&Value>) -> Result<ApiResponse, ApiError> {
        let url = self.url(path);
        let body_text = body.map(|b| b.to_string());

        match &body_text {
            Some(text) => debug_api_call!(method, url, text),
            None => debug_api_call!(method, url),
        }

        if !self.request_approval(&method, &url, body_text.as_deref())? {
            return Err(ApiError::NotApproved);
        }

        let mut request = self.client.request(method.clone(), &url).timeout(self.timeout);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let response_text = response.text().await?;
        self.log_api_call(&method, &url, body_text.as_deref(), status, &response_text);

        let body = if response_text.trim().is_empty() {
            Value::Null
        } else {
            match serde_json::from_str(&response_text) {
                Ok(value) => value,
                Err(_) if !(200..300).contains(&status) => Value::String(response_text),
                Err(e) => return Err(e.into()),
            }
        };

        Ok(ApiResponse { status, body })
    }

    /// Send a planned request; refuses auth-only endpoints when no token is set
    pub async fn execute(&self, plan: &RequestPlan) -> Result<ApiResponse, ApiError> {
        if plan.requires_auth && self.token.is_none() {
            return Err(ApiError::MissingToken);
        }
        self.send(plan.method.clone(), &plan.path, plan.body.as_ref()).await
    }

    async fn call<T: DeserializeOwned>(&self, plan: RequestPlan) -> Result<T, ApiError> {
        let response = check_status(self.execute(&plan).await?)?;
        let envelope: ApiEnvelope<T> = serde_json::from_value(response.body)?;
        into_data(envelope)
    }

    async fn call_empty(&self, plan: RequestPlan) -> Result<(), ApiError> {
        check_status(self.execute(&plan).await?)?;
        Ok(())
    }

    // Authentication
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<AuthData, ApiError> {
        let payload = RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        self.call(RequestPlan::register(&payload)?).await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthData, ApiError> {
        let payload = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.call(RequestPlan::login(&payload)?).await
    }

    // Trip operations
    pub async fn list_trips(&self) -> Result<Vec<Trip>, ApiError> {
        self.call(RequestPlan::list_trips()).await
    }

    pub async fn get_trip(&self, trip_id: i64) -> Result<Trip, ApiError> {
        self.call(RequestPlan::get_trip(trip_id)).await
    }

    pub async fn create_trip(&self, trip: &NewTrip) -> Result<Trip, ApiError> {
        self.call(RequestPlan::create_trip(trip)?).await
    }

    pub async fn update_trip(&self, trip_id: i64, update: &TripUpdate) -> Result<Trip, ApiError> {
        self.call(RequestPlan::update_trip(trip_id, update)?).await
    }

    pub async fn delete_trip(&self, trip_id: i64) -> Result<(), ApiError> {
        self.call_empty(RequestPlan::delete_trip(trip_id)).await
    }

    // Booking operations
    pub async fn create_booking(&self, booking: &NewBooking) -> Result<Booking, ApiError> {
        self.call(RequestPlan::create_booking(booking)?).await
    }

    pub async fn list_bookings(&self) -> Result<Vec<UserBooking>, ApiError> {
        self.call(RequestPlan::list_bookings()).await
    }

    pub async fn get_booking(&self, booking_id: i64) -> Result<UserBooking, ApiError> {
        self.call(RequestPlan::get_booking(booking_id)).await
    }

    pub async fn list_all_bookings(&self) -> Result<Vec<AdminBooking>, ApiError> {
        self.call(RequestPlan::list_all_bookings()).await
    }

    pub async fn update_booking_status(&self, booking_id: i64, status: BookingStatus) -> Result<Booking, ApiError> {
        self.call(RequestPlan::update_booking_status(booking_id, status)?).await
    }

    pub async fn delete_booking(&self, booking_id: i64) -> Result<(), ApiError> {
        self.call_empty(RequestPlan::delete_booking(booking_id)).await
    }

    // Contact form operations
    pub async fn submit_contact(&self, contact: &NewContact) -> Result<Contact, ApiError> {
        self.call(RequestPlan::submit_contact(contact)?).await
    }

    pub async fn list_contacts(&self) -> Result<Vec<Contact>, ApiError> {
        self.call(RequestPlan::list_contacts()).await
    }

    pub async fn get_contact(&self, contact_id: i64) -> Result<Contact, ApiError> {
        self.call(RequestPlan::get_contact(contact_id)).await
    }

    pub async fn mark_contact_read(&self, contact_id: i64) -> Result<Contact, ApiError> {
        self.call(RequestPlan::mark_contact_read(contact_id)).await
    }

    pub async fn delete_contact(&self, contact_id: i64) -> Result<(), ApiError> {
        self.call_empty(RequestPlan::delete_contact(contact_id)).await
    }
}

fn normalize_base_url(base_url: &str) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}

fn check_status(response: ApiResponse) -> Result<ApiResponse, ApiError> {
    if response.is_success() {
        return Ok(response);
    }
    let message = match response.error_message() {
        Some(message) => message.to_string(),
        None => match &response.body {
            Value::Null => "empty response".to_string(),
            Value::String(text) => text.clone(),
            other => other.to_string(),
        },
    };
    Err(ApiError::Status { status: response.status, message })
}

fn into_data<T>(envelope: ApiEnvelope<T>) -> Result<T, ApiError> {
    match envelope.data {
        Some(data) => Ok(data),
        None => Err(ApiError::UnexpectedResponse(
            envelope
                .error
                .or(envelope.message)
                .unwrap_or_else(|| "response did not include data".to_string()),
        )),
    }
}
