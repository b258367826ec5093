mod support;

use clap::Parser;
use serde_json::json;
use std::path::Path;
use support::{bearer, TestServer, ADMIN_TOKEN, USER_TOKEN};
use travelmate_cc::commands::{run, BookingCommand, Cli, Command, RequestPlan, TripCommand};
use travelmate_cc::config::TravelMateConfig;
use travelmate_cc::{ApiError, BookingStatus, Method, NewBooking};

fn parse(args: &[&str]) -> Cli {
    let mut argv = vec!["travelmate"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).expect("arguments should parse")
}

fn plan(args: &[&str]) -> RequestPlan {
    parse(args)
        .command
        .plan()
        .expect("plan should build")
        .expect("command should send a request")
}

/// Config in `dir` pointing at `base_url`, with the token file alongside it
fn write_config(dir: &Path, base_url: &str) -> (String, std::path::PathBuf) {
    let mut config = TravelMateConfig::default();
    config.api.base_url = base_url.to_string();
    config.api.timeout_seconds = 5;
    config.auth.token_file = dir.join("AUTH_TOKEN").to_string_lossy().to_string();
    config.logging.verbosity = 0;

    let path = dir.join("travelmate.toml");
    config.save(&path).expect("save config");
    (path.to_string_lossy().to_string(), dir.join("AUTH_TOKEN"))
}

#[test]
fn test_trip_commands_plan_expected_requests() {
    assert_eq!(plan(&["trips", "list"]), RequestPlan {
        method: Method::GET,
        path: "/trips".to_string(),
        body: None,
        requires_auth: false,
    });

    let create = plan(&[
        "trips", "create",
        "--title", "Explore Paris",
        "--description", "A week-long trip to explore the city of lights.",
        "--slots", "20",
        "--duration", "7",
        "--price", "1500.00",
    ]);
    assert_eq!(create.method, Method::POST);
    assert_eq!(create.path, "/trips");
    assert!(create.requires_auth);
    assert_eq!(
        create.body,
        Some(json!({
            "title": "Explore Paris",
            "description": "A week-long trip to explore the city of lights.",
            "available_slots": 20,
            "duration": "7",
            "price": 1500.0
        }))
    );

    let update = plan(&["trips", "update", "1", "--price", "1400"]);
    assert_eq!(update.method, Method::PATCH);
    assert_eq!(update.path, "/trips/1");
    assert_eq!(update.body, Some(json!({"price": 1400.0})));

    let delete = plan(&["trips", "delete", "1"]);
    assert_eq!((delete.method, delete.path.as_str(), delete.requires_auth), (Method::DELETE, "/trips/1", true));
}

#[test]
fn test_commands_share_the_client_endpoint_table() {
    let booking_date = chrono::NaiveDate::from_ymd_opt(2025, 1, 13).unwrap();
    assert_eq!(
        plan(&["bookings", "create", "--trip", "2", "--date", "2025-01-13"]),
        RequestPlan::create_booking(&NewBooking { trip_id: 2, booking_date }).unwrap()
    );
    assert_eq!(
        plan(&["bookings", "status", "5", "pending"]),
        RequestPlan::update_booking_status(5, BookingStatus::Pending).unwrap()
    );
    assert_eq!(plan(&["contacts", "get", "4"]), RequestPlan::get_contact(4));
    assert_eq!(plan(&["trips", "get", "9"]), RequestPlan::get_trip(9));
}

#[test]
fn test_trip_update_needs_a_field() {
    let cli = parse(&["trips", "update", "1"]);
    assert!(matches!(cli.command.plan(), Err(ApiError::Validation(_))));
}

#[test]
fn test_booking_commands_plan_expected_requests() {
    let create = plan(&["bookings", "create", "--trip", "2", "--date", "2025-01-13"]);
    assert_eq!(create.path, "/bookings");
    assert_eq!(create.body, Some(json!({"trip_id": 2, "booking_date": "2025-01-13"})));
    assert!(create.requires_auth);

    assert_eq!(plan(&["bookings", "all"]).path, "/admin/bookings");
    assert_eq!(plan(&["bookings", "get", "3"]).path, "/bookings/3");

    let status = plan(&["bookings", "status", "1", "confirmed"]);
    assert_eq!(status.method, Method::PATCH);
    assert_eq!(status.path, "/bookings/1/status");
    assert_eq!(status.body, Some(json!({"status": "confirmed"})));

    match parse(&["bookings", "status", "1", "cancelled"]).command {
        Command::Bookings(BookingCommand::Status { id, status }) => {
            assert_eq!(id, 1);
            assert_eq!(status, BookingStatus::Cancelled);
        }
        other => panic!("unexpected command {:?}", other),
    }
}

#[test]
fn test_invalid_arguments_are_rejected_by_the_parser() {
    for args in [
        vec!["travelmate", "bookings", "status", "1", "approved"],
        vec!["travelmate", "bookings", "create", "--trip", "2", "--date", "13/01/2025"],
        vec!["travelmate", "trips", "get", "one"],
        vec!["travelmate", "trips", "list", "-v", "--quiet"],
    ] {
        assert!(Cli::try_parse_from(args.iter().copied()).is_err(), "{:?} should not parse", args);
    }
}

#[test]
fn test_contact_and_auth_plans() {
    let submit = plan(&["contacts", "submit", "--name", "Naomi", "--email", "naomi@example.com", "--message", "Hi"]);
    assert_eq!(submit.path, "/contacts");
    assert!(!submit.requires_auth);
    assert_eq!(submit.body, Some(json!({"name": "Naomi", "email": "naomi@example.com", "message": "Hi"})));

    let read = plan(&["contacts", "read", "4"]);
    assert_eq!((read.method, read.path.as_str()), (Method::PATCH, "/admin/contacts/4/read"));

    let login = plan(&["login", "--email", "naomi@example.com", "--password", "password123"]);
    assert_eq!(login.path, "/auth/login");
    assert_eq!(login.body, Some(json!({"email": "naomi@example.com", "password": "password123"})));

    assert_eq!(parse(&["whoami"]).command.plan().unwrap(), None);
    assert_eq!(parse(&["logout"]).command.plan().unwrap(), None);
}

#[test]
fn test_raw_request_plan() {
    let raw = plan(&["request", "patch", "/trips/1", "--json", r#"{"price": 1400.00}"#]);
    assert_eq!(raw.method, Method::PATCH);
    assert_eq!(raw.path, "/trips/1");
    assert_eq!(raw.body, Some(json!({"price": 1400.0})));

    let bad_json = parse(&["request", "POST", "/trips", "--json", "{price"]);
    assert!(matches!(bad_json.command.plan(), Err(ApiError::Json(_))));

    let bad_method = parse(&["request", "GE T", "/trips"]);
    assert!(matches!(bad_method.command.plan(), Err(ApiError::Validation(_))));
}

#[test]
fn test_verbosity_flags_override_config() {
    assert_eq!(parse(&["trips", "list"]).verbosity(1), 1);
    assert_eq!(parse(&["trips", "list", "-q"]).verbosity(2), 0);
    assert_eq!(parse(&["-v", "trips", "list"]).verbosity(0), 2);
    assert_eq!(parse(&["trips", "list", "-vvv"]).verbosity(0), 2);
    assert!(matches!(parse(&["trips", "list"]).command, Command::Trips(TripCommand::List)));
}

#[tokio::test]
async fn test_login_saves_token_and_logout_removes_it() {
    let server = TestServer::start().await;
    server.respond("POST", "/auth/login", 200, json!({
        "success": true,
        "message": "Login successful",
        "data": {"id": 1, "name": "Naomi", "email": "naomi@example.com", "role": "admin", "token": ADMIN_TOKEN}
    }));

    let dir = tempfile::tempdir().unwrap();
    let (config_path, token_path) = write_config(dir.path(), server.base_url());

    let cli = parse(&["--config", config_path.as_str(), "login", "--email", "naomi@example.com", "--password", "password123"]);
    run(cli).await.expect("login should succeed");

    let saved = std::fs::read_to_string(&token_path).expect("token file written");
    assert_eq!(saved.trim(), ADMIN_TOKEN);

    let cli = parse(&["--config", config_path.as_str(), "logout"]);
    run(cli).await.expect("logout should succeed");
    assert!(!token_path.exists());
}

#[tokio::test]
async fn test_saved_token_is_sent_with_admin_commands() {
    let server = TestServer::start().await;
    server.respond("DELETE", "/trips/1", 204, serde_json::Value::Null);

    let dir = tempfile::tempdir().unwrap();
    let (config_path, token_path) = write_config(dir.path(), server.base_url());
    std::fs::write(&token_path, ADMIN_TOKEN).unwrap();

    run(parse(&["--config", config_path.as_str(), "trips", "delete", "1"]))
        .await
        .expect("delete should succeed");

    let request = server.last_request();
    assert_eq!(request.method, "DELETE");
    assert_eq!(request.path, "/api/trips/1");
    assert_eq!(request.authorization, bearer(ADMIN_TOKEN));
}

#[tokio::test]
async fn test_token_flag_overrides_saved_token() {
    let server = TestServer::start().await;
    server.respond("GET", "/bookings", 200, json!({"success": true, "data": []}));

    let dir = tempfile::tempdir().unwrap();
    let (config_path, token_path) = write_config(dir.path(), server.base_url());
    std::fs::write(&token_path, ADMIN_TOKEN).unwrap();

    run(parse(&["--config", config_path.as_str(), "--token", USER_TOKEN, "bookings", "list"]))
        .await
        .expect("list should succeed");

    assert_eq!(server.last_request().authorization, bearer(USER_TOKEN));
}

#[tokio::test]
async fn test_error_status_fails_the_command() {
    let server = TestServer::start().await;
    server.respond("POST", "/bookings", 400, json!({
        "success": false,
        "error": "No available slots for this trip"
    }));

    let dir = tempfile::tempdir().unwrap();
    let (config_path, _) = write_config(dir.path(), server.base_url());

    let cli = parse(&[
        "--config", config_path.as_str(), "--token", USER_TOKEN,
        "bookings", "create", "--trip", "2", "--date", "2025-01-13",
    ]);
    match run(cli).await {
        Err(ApiError::Status { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "No available slots for this trip");
        }
        other => panic!("expected a status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_admin_command_without_token_never_hits_the_server() {
    let server = TestServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let (config_path, _) = write_config(dir.path(), server.base_url());

    let result = run(parse(&["--config", config_path.as_str(), "bookings", "all"])).await;

    assert!(matches!(result, Err(ApiError::MissingToken)));
    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn test_base_url_flag_overrides_config() {
    let server = TestServer::start().await;
    server.respond("GET", "/trips", 200, json!({"success": true, "data": []}));

    let dir = tempfile::tempdir().unwrap();
    let (config_path, _) = write_config(dir.path(), "http://127.0.0.1:9/api");

    run(parse(&["--config", config_path.as_str(), "--base-url", server.base_url(), "--raw", "trips", "list"]))
        .await
        .expect("list should go to the overriding server");

    assert_eq!(server.last_request().path, "/api/trips");
}

#[tokio::test]
async fn test_blank_token_file_counts_as_logged_out() {
    let server = TestServer::start().await;
    server.respond("GET", "/trips", 200, json!({"success": true, "data": []}));
    server.respond("POST", "/auth/login", 200, json!({
        "success": true,
        "data": {"id": 2, "name": "Kaleab", "email": "kaleab@example.com", "role": "user", "token": USER_TOKEN}
    }));

    let dir = tempfile::tempdir().unwrap();
    let (config_path, token_path) = write_config(dir.path(), server.base_url());
    std::fs::write(&token_path, "\n").unwrap();

    run(parse(&["--config", config_path.as_str(), "trips", "list"]))
        .await
        .expect("public endpoint should not need a token");
    assert_eq!(server.last_request().authorization, None);

    let result = run(parse(&["--config", config_path.as_str(), "bookings", "list"])).await;
    assert!(matches!(result, Err(ApiError::MissingToken)));
    assert!(matches!(
        run(parse(&["--config", config_path.as_str(), "whoami"])).await,
        Err(ApiError::MissingToken)
    ));

    run(parse(&["--config", config_path.as_str(), "login", "--email", "kaleab@example.com", "--password", "password123"]))
        .await
        .expect("login should replace the blank token file");
    assert_eq!(std::fs::read_to_string(&token_path).unwrap().trim(), USER_TOKEN);

    std::fs::write(&token_path, "\n").unwrap();
    run(parse(&["--config", config_path.as_str(), "logout"]))
        .await
        .expect("logout should remove a blank token file");
    assert!(!token_path.exists());
    assert_eq!(server.requests().len(), 2);
}
