use anyhow::{Context, Result};
use axum::{
    extract::{Form, Query, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use journey_cli::{router, JourneyService};
use journey_crm::CrmSettings;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;

const GOOD_PASSWORD: &str = "hunter2TOKEN";
const ACCESS_TOKEN: &str = "00Dstub!token";

struct Upstream {
    base_url: String,
}

async fn spawn(app: Router, listener: tokio::net::TcpListener) {
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });
}

async fn bind_local() -> Result<(tokio::net::TcpListener, String)> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    Ok((listener, format!("http://{addr}")))
}

async fn stub_token(
    State(upstream): State<Arc<Upstream>>,
    Form(form): Form<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    if form.get("grant_type").map(String::as_str) != Some("password") {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "unsupported_grant_type", "error_description": "grant type not supported"})),
        );
    }
    if form.get("password").map(String::as_str) != Some(GOOD_PASSWORD) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "invalid_grant", "error_description": "authentication failure"})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({
            "access_token": ACCESS_TOKEN,
            "instance_url": upstream.base_url,
            "token_type": "Bearer",
            "issued_at": "1700000000000"
        })),
    )
}

fn page(records: Vec<Value>) -> Json<Value> {
    Json(json!({"totalSize": records.len(), "done": true, "records": records}))
}

async fn stub_query(
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    let authorized = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {ACCESS_TOKEN}"));
    if !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!([{"message": "Session expired or invalid", "errorCode": "INVALID_SESSION_ID"}])),
        );
    }

    let soql = params.get("q").cloned().unwrap_or_default();
    if soql.contains("FROM Contact ") {
        if soql.contains("Id = '003xyz'") {
            return (
                StatusCode::OK,
                page(vec![json!({
                    "attributes": {"type": "Contact"},
                    "Id": "003xyz",
                    "Name": "Ada Lovelace",
                    "Email": "ada@example.com",
                    "Account": {"Name": "Analytical Engines"}
                })]),
            );
        }
        return (StatusCode::OK, page(Vec::new()));
    }
    if soql.contains("FROM Task ") {
        return (
            StatusCode::OK,
            page(vec![
                json!({
                    "Id": "00T1",
                    "Subject": "Follow up",
                    "ActivityDate": "2024-03-10",
                    "Description": "Discussed renewal pricing",
                    "Type": "Call",
                    "Status": "Completed",
                    "CallType": "Outbound"
                }),
                json!({
                    "Id": "00T2",
                    "Subject": "Send contract",
                    "ActivityDate": null,
                    "Description": null,
                    "Type": "Task",
                    "Status": "Not Started",
                    "CallType": null
                }),
            ]),
        );
    }
    if soql.contains("FROM Event ") {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!([{"message": "upstream hiccup", "errorCode": "UNKNOWN_EXCEPTION"}])),
        );
    }
    if soql.contains("FROM EmailMessage ") && soql.contains("LIKE '%ada@example.com%'") {
        return (
            StatusCode::OK,
            page(vec![json!({
                "Id": "02s1",
                "Subject": "Welcome aboard",
                "MessageDate": "2024-02-01T09:00:00.000+0000",
                "TextBody": "Thanks for signing up",
                "Status": "Sent"
            })]),
        );
    }
    (StatusCode::BAD_REQUEST, Json(json!([{"errorCode": "MALFORMED_QUERY"}])))
}

async fn spawn_upstream() -> Result<String> {
    let (listener, base_url) = bind_local().await?;
    let app = Router::new()
        .route("/services/oauth2/token", post(stub_token))
        .route("/services/data/v59.0/query/", get(stub_query))
        .with_state(Arc::new(Upstream {
            base_url: base_url.clone(),
        }));
    spawn(app, listener).await;
    Ok(base_url)
}

fn settings(login_url: &str, password: &str) -> CrmSettings {
    CrmSettings {
        client_id: Some("3MVG9stubclient".to_string()),
        client_secret: Some("stubsecret".to_string()),
        username: Some("svc@example.com".to_string()),
        password: Some(password.to_string()),
        login_url: login_url.to_string(),
        ..CrmSettings::default()
    }
}

async fn spawn_service(settings: CrmSettings) -> Result<String> {
    let (listener, base_url) = bind_local().await?;
    let service = Arc::new(JourneyService::new(settings, reqwest::Client::new()));
    spawn(router(service), listener).await;
    Ok(base_url)
}

async fn post_journey(base_url: &str, body: Value) -> Result<(StatusCode, Value)> {
    let response = reqwest::Client::new()
        .post(format!("{base_url}/journey"))
        .json(&body)
        .send()
        .await
        .context("journey request failed")?;
    let status = StatusCode::from_u16(response.status().as_u16())?;
    Ok((status, response.json().await?))
}

#[tokio::test]
async fn journey_merges_surviving_sources_chronologically() -> Result<()> {
    let upstream = spawn_upstream().await?;
    let service = spawn_service(settings(&upstream, GOOD_PASSWORD)).await?;

    let (status, body) = post_journey(&service, json!({"contactId": "003xyz"})).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let journey = &body["journey"];
    assert_eq!(journey["journeyTitle"], "Ada Lovelace's Journey");
    assert_eq!(journey["theme"]["groundColor"], "#f5f5f7");

    let events = journey["events"].as_array().context("events array")?;
    let types: Vec<&str> = events.iter().filter_map(|e| e["type"].as_str()).collect();
    assert_eq!(types, vec!["start", "SUPPORT", "EMAIL", "PHONE_CALL", "end"]);

    let xs: Vec<i64> = events
        .iter()
        .filter_map(|e| e["position"][0].as_i64())
        .collect();
    assert_eq!(xs, vec![-10, -6, -2, 2, 6]);

    assert_eq!(events[1]["description"], "Send contract");
    assert_eq!(events[1]["sentiment"], "neutral");
    assert_eq!(events[1]["data"]["Date"], "No date");
    assert_eq!(events[2]["description"], "Welcome aboard - Thanks for signing up");
    assert_eq!(events[2]["data"]["Type"], "Email");
    assert_eq!(events[2]["data"]["Date"], "2/1/2024");
    assert_eq!(
        events[3],
        json!({
            "type": "PHONE_CALL",
            "position": [2, 0, 0],
            "eventDuration": 2.5,
            "sentiment": "happy",
            "description": "Follow up - Discussed renewal pricing",
            "data": {
                "Type": "Call",
                "Status": "Completed",
                "Date": "3/10/2024",
                "Call Type": "Outbound"
            }
        })
    );
    assert_eq!(events[4]["description"], "The journey continues...");
    Ok(())
}

#[tokio::test]
async fn unknown_contact_reports_not_found() -> Result<()> {
    let upstream = spawn_upstream().await?;
    let service = spawn_service(settings(&upstream, GOOD_PASSWORD)).await?;

    let (status, body) = post_journey(&service, json!({"contactId": "003nobody"})).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"success": false, "error": "Contact not found"}));
    Ok(())
}

#[tokio::test]
async fn missing_contact_id_is_rejected() -> Result<()> {
    let upstream = spawn_upstream().await?;
    let service = spawn_service(settings(&upstream, GOOD_PASSWORD)).await?;

    let (status, body) = post_journey(&service, json!({})).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"success": false, "error": "Contact ID is required"}));
    Ok(())
}

#[tokio::test]
async fn malformed_body_is_a_failure_payload() -> Result<()> {
    let service = spawn_service(CrmSettings::default()).await?;

    let response = reqwest::Client::new()
        .post(format!("{service}/journey"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await?;
    assert_eq!(response.status().as_u16(), 500);
    let body: Value = response.json().await?;
    assert_eq!(body["success"], false);
    assert!(body["error"]
        .as_str()
        .is_some_and(|e| e.starts_with("Invalid JSON request")));
    Ok(())
}

#[tokio::test]
async fn missing_settings_name_every_key() -> Result<()> {
    let service = spawn_service(CrmSettings::default()).await?;

    let (status, body) = post_journey(&service, json!({"contactId": "003xyz"})).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({
            "success": false,
            "error": "Missing Salesforce environment variables: SF_CLIENT_ID, SF_CLIENT_SECRET, SF_USERNAME, SF_PASSWORD"
        })
    );
    Ok(())
}

#[tokio::test]
async fn auth_endpoint_returns_token_on_success() -> Result<()> {
    let upstream = spawn_upstream().await?;
    let service = spawn_service(settings(&upstream, GOOD_PASSWORD)).await?;

    let response = reqwest::Client::new()
        .post(format!("{service}/auth"))
        .send()
        .await?;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await?;
    assert_eq!(
        body,
        json!({
            "success": true,
            "access_token": ACCESS_TOKEN,
            "instance_url": upstream,
            "token_type": "Bearer"
        })
    );
    Ok(())
}

#[tokio::test]
async fn auth_rejection_is_still_http_200() -> Result<()> {
    let upstream = spawn_upstream().await?;
    let service = spawn_service(settings(&upstream, "wrong")).await?;

    let response = reqwest::Client::new()
        .post(format!("{service}/auth"))
        .send()
        .await?;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await?;
    assert_eq!(body["success"], false);
    assert_eq!(
        body["error"],
        "Salesforce authentication failed: Invalid username, password, or security token. Make sure your password includes the security token at the end."
    );
    assert!(body["timestamp"].as_str().is_some());

    let (status, journey) = post_journey(&service, json!({"contactId": "003xyz"})).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(journey["success"], false);
    Ok(())
}

#[tokio::test]
async fn preflight_is_empty_and_cors_open() -> Result<()> {
    let service = spawn_service(CrmSettings::default()).await?;

    for path in ["/auth", "/journey"] {
        let response = reqwest::Client::new()
            .request(reqwest::Method::OPTIONS, format!("{service}{path}"))
            .send()
            .await?;
        assert_eq!(response.status().as_u16(), 200);
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-methods")
                .and_then(|v| v.to_str().ok()),
            Some("GET, POST, OPTIONS")
        );
        assert!(response.text().await?.is_empty());
    }
    Ok(())
}

#[tokio::test]
async fn health_reports_ok() -> Result<()> {
    let service = spawn_service(CrmSettings::default()).await?;

    let body: Value = reqwest::get(format!("{service}/health")).await?.json().await?;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "journey");
    Ok(())
}
