use super::common::*;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::workflows::payroll::memory::InMemoryConfigurationStore;
use crate::workflows::payroll::router::{delete_history_handler, payroll_router};
use crate::workflows::payroll::service::PayrollService;

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).expect("serializable")))
        .expect("request builds")
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).expect("request builds")
}

#[tokio::test]
async fn calculate_route_runs_the_engine() {
    let router = payroll_router(Arc::new(seeded_service()));

    let payload = json!({
        "kpiConfigs": [
            { "id": 1, "platform": "Tim", "name": "Total Omset Tim", "bobot": 50,
              "target": 1000000, "isCurrency": true },
            { "id": 2, "platform": "Tim", "name": "Tiket Selesai", "bobot": 50, "target": 10 }
        ],
        "bonusSchemes": [
            { "id": 1, "name": "Entry", "threshold": 500000, "multiplier": 2 }
        ],
        "kpiIndicators": [
            { "id": 1, "name": "Good", "threshold": 80, "color": "bg-blue-500" }
        ],
        "realisasiInputs": { "1": "Rp 1.000.000", "2": "10" },
        "bonusCalculationMethod": "OMSET_BASED"
    });

    let response = router
        .oneshot(json_request("POST", "/api/v1/calculate", payload))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["grandTotalPoin"], json!(100.0));
    assert_eq!(body["activeMultiplier"], json!(2.0));
    assert_eq!(body["finalBonus"], json!(200000.0));
    assert_eq!(body["kpiIndicator"]["name"], json!("Good"));
    assert_eq!(body["omsetIndicator"]["name"], json!("Entry"));
    assert_eq!(body["details"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn calculate_route_reports_unmatched_tiers_as_na() {
    let router = payroll_router(Arc::new(seeded_service()));

    let payload = json!({
        "kpiConfigs": [
            { "id": 7, "platform": "Tim", "name": "Tiket Selesai", "bobot": 10, "target": 10 }
        ],
        "kpiIndicators": [
            { "id": 1, "name": "Good", "threshold": 80, "color": "bg-blue-500" }
        ],
        "realisasiInputs": { "7": "1" },
        "bonusCalculationMethod": "NON_SALES"
    });

    let response = router
        .oneshot(json_request("POST", "/api/v1/calculate", payload))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(
        body["kpiIndicator"],
        json!({ "name": "N/A", "color": "bg-slate-400" })
    );
    assert_eq!(body["omsetIndicator"], json!({ "name": "N/A" }));
    assert_eq!(body["finalBonus"], json!(0.0));
}

#[tokio::test]
async fn division_calculate_route_returns_not_found_for_unknown_division() {
    let router = payroll_router(Arc::new(seeded_service()));

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/divisions/999/calculate",
            json!({ "realisasiInputs": {} }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = read_json_body(response).await;
    assert!(body["error"]
        .as_str()
        .unwrap_or_default()
        .contains("999"));
}

#[tokio::test]
async fn division_calculate_route_uses_stored_configuration() {
    let service = Arc::new(seeded_service());
    let admin = division_id(&service, "Admin Support");
    let router = payroll_router(service);

    let response = router
        .oneshot(json_request(
            "POST",
            &format!("/api/v1/divisions/{}/calculate", admin.0),
            json!({ "realisasiInputs": { "30": "2", "31": "99", "32": "95", "33": "50" } }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["kpiIndicator"]["name"], json!("Excellent"));
    assert_eq!(body["finalBonus"], json!(0.0));
}

#[tokio::test]
async fn division_routes_create_and_list() {
    let (service, _, _) = build_service();
    let router = payroll_router(Arc::new(service));

    let created = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/divisions",
            json!({ "name": "Tim Gudang", "bonusCalculationMethod": "POINTS_BASED" }),
        ))
        .await
        .expect("route executes");
    assert_eq!(created.status(), StatusCode::CREATED);
    let division = read_json_body(created).await;
    assert_eq!(division["bonusCalculationMethod"], json!("POINTS_BASED"));
    assert_eq!(division["costKeywords"].as_array().map(Vec::len), Some(5));

    let duplicate = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/divisions",
            json!({ "name": "Tim Gudang" }),
        ))
        .await
        .expect("route executes");
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);

    let listed = router
        .oneshot(get("/api/v1/divisions"))
        .await
        .expect("route executes");
    assert_eq!(listed.status(), StatusCode::OK);
    let body = read_json_body(listed).await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn cost_keywords_route_replaces_keywords() {
    let service = Arc::new(seeded_service());
    let advertiser = division_id(&service, "Advertiser MP");
    let router = payroll_router(service);

    let response = router
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/divisions/{}/cost-keywords", advertiser.0),
            json!({ "keywords": ["biaya", "ongkir"] }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["costKeywords"], json!(["biaya", "ongkir"]));
}

#[tokio::test]
async fn listing_routes_filter_by_division() {
    let service = Arc::new(seeded_service());
    let kreatif = division_id(&service, "Tim Kreatif");
    let router = payroll_router(service);

    let kpis = router
        .clone()
        .oneshot(get(&format!("/api/v1/kpis?division_id={}", kreatif.0)))
        .await
        .expect("route executes");
    assert_eq!(kpis.status(), StatusCode::OK);
    let body = read_json_body(kpis).await;
    let rows = body.as_array().expect("array body");
    assert_eq!(rows.len(), 4);
    assert!(rows
        .iter()
        .all(|row| row["divisionId"] == json!(kreatif.0)));
    assert_eq!(rows[2]["pointCapping"], json!("capped"));

    let employees = router
        .clone()
        .oneshot(get(&format!("/api/v1/employees?division_id={}", kreatif.0)))
        .await
        .expect("route executes");
    let body = read_json_body(employees).await;
    assert_eq!(body.as_array().map(Vec::len), Some(2));

    let schemes = router
        .clone()
        .oneshot(get("/api/v1/schemes"))
        .await
        .expect("route executes");
    let body = read_json_body(schemes).await;
    assert_eq!(body.as_array().map(Vec::len), Some(9));

    let indicators = router
        .oneshot(get(&format!("/api/v1/indicators?division_id={}", kreatif.0)))
        .await
        .expect("route executes");
    let body = read_json_body(indicators).await;
    assert_eq!(body.as_array().map(Vec::len), Some(5));
}

#[tokio::test]
async fn listing_routes_ignore_blank_filters() {
    let service = Arc::new(seeded_service());
    service
        .record_history(history_request(None, Some("Tim Kreatif"), 301, "Oktober", 2025))
        .expect("saved");
    let router = payroll_router(service);

    let employees = router
        .clone()
        .oneshot(get("/api/v1/employees?division_id="))
        .await
        .expect("route executes");
    assert_eq!(employees.status(), StatusCode::OK);
    let body = read_json_body(employees).await;
    assert_eq!(body.as_array().map(Vec::len), Some(6));

    let history = router
        .clone()
        .oneshot(get(
            "/api/v1/history?division_id=&division_name=&employee_id=&period_month=&period_year=",
        ))
        .await
        .expect("route executes");
    assert_eq!(history.status(), StatusCode::OK);
    let body = read_json_body(history).await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));

    let malformed = router
        .oneshot(get("/api/v1/kpis?division_id=abc"))
        .await
        .expect("route executes");
    assert_eq!(malformed.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_kpi_route_accepts_flattened_payload() {
    let service = Arc::new(seeded_service());
    let admin = division_id(&service, "Admin Support");
    let router = payroll_router(service);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/kpis",
            json!({
                "divisionId": admin.0,
                "platform": "Dukungan",
                "name": "Kepuasan Pelanggan",
                "bobot": 10,
                "target": 4.5
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json_body(response).await;
    assert_eq!(body["type"], json!("higher_is_better"));
    assert_eq!(body["pointCapping"], json!("uncapped"));
    assert!(body["id"].as_u64().unwrap_or_default() > 33);
}

#[tokio::test]
async fn history_routes_record_list_and_conflict() {
    let router = payroll_router(Arc::new(seeded_service()));
    let entry = serde_json::to_value(history_request(
        None,
        Some("Tim Kreatif"),
        301,
        "Oktober",
        2025,
    ))
    .expect("serializable");

    let created = router
        .clone()
        .oneshot(json_request("POST", "/api/v1/history", entry.clone()))
        .await
        .expect("route executes");
    assert_eq!(created.status(), StatusCode::CREATED);
    let saved = read_json_body(created).await;
    assert_eq!(saved["employeeId"], json!(301));

    let duplicate = router
        .clone()
        .oneshot(json_request("POST", "/api/v1/history", entry))
        .await
        .expect("route executes");
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);

    let listed = router
        .oneshot(get(
            "/api/v1/history?division_name=Tim%20Kreatif&period_year=2025",
        ))
        .await
        .expect("route executes");
    assert_eq!(listed.status(), StatusCode::OK);
    let body = read_json_body(listed).await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn history_route_requires_division() {
    let router = payroll_router(Arc::new(seeded_service()));
    let entry = serde_json::to_value(history_request(None, None, 301, "Oktober", 2025))
        .expect("serializable");

    let response = router
        .oneshot(json_request("POST", "/api/v1/history", entry))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_history_route_returns_no_content_then_not_found() {
    let service = Arc::new(seeded_service());
    let saved = service
        .record_history(history_request(None, Some("Admin Support"), 401, "Oktober", 2025))
        .expect("saved");
    let router = payroll_router(service);

    let uri = format!("/api/v1/history/{}", saved.id.0);
    let deleted = router
        .clone()
        .oneshot(
            Request::delete(uri.as_str())
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let again = router
        .oneshot(
            Request::delete(uri.as_str())
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_history_handler_maps_store_failure_to_internal_error() {
    let service = Arc::new(PayrollService::new(
        Arc::new(InMemoryConfigurationStore::default()),
        Arc::new(UnavailableHistory),
    ));

    let response = delete_history_handler::<InMemoryConfigurationStore, UnavailableHistory>(
        State(service),
        Path(1),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
