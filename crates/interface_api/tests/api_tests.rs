//! HTTP API tests against the in-memory store

use axum::http::{header, HeaderValue, StatusCode};
use axum_test::TestServer;
use rust_decimal_macros::dec;
use serde_json::json;

use core_kernel::Timezone;
use interface_api::dto::cars::{CarResponse, InsuranceValidityResponse};
use interface_api::dto::claims::ClaimResponse;
use interface_api::dto::history::CarHistoryResponse;
use interface_api::error::ErrorResponse;
use interface_api::handlers::health::{HealthResponse, ReadinessResponse};
use interface_api::{create_router, AppState};
use test_utils::{date, MockStore};

async fn server() -> (TestServer, MockStore) {
    let store = MockStore::seeded().await;
    let state = AppState::new(
        store.vehicles.clone(),
        store.policies.clone(),
        store.claims.clone(),
        Timezone::default(),
    );
    let server = TestServer::new(create_router(state)).unwrap();
    (server, store)
}

mod health {
    use super::*;

    #[tokio::test]
    async fn test_health() {
        let (server, _) = server().await;

        let body: HealthResponse = server.get("/health").await.json();
        assert_eq!(body.status, "healthy");
    }

    #[tokio::test]
    async fn test_ready_when_storage_healthy() {
        let (server, _) = server().await;

        let response = server.get("/health/ready").await;
        response.assert_status_ok();
        let body: ReadinessResponse = response.json();
        assert_eq!(body.adapters.len(), 3);
    }

    #[tokio::test]
    async fn test_not_ready_when_storage_down() {
        let (server, store) = server().await;
        store.set_unavailable(true);

        let response = server.get("/health/ready").await;
        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(response.json::<ReadinessResponse>().status, "not_ready");
    }

    #[tokio::test]
    async fn test_cors_and_request_id_headers() {
        let (server, _) = server().await;

        let response = server
            .get("/api/cars")
            .add_header(header::ORIGIN, HeaderValue::from_static("https://garage.example"))
            .await;

        response.assert_status_ok();
        let headers = response.headers();
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(&HeaderValue::from_static("*"))
        );
        assert!(headers.contains_key("x-request-id"));
    }
}

mod cars {
    use super::*;

    #[tokio::test]
    async fn test_list_cars_with_owners() {
        let (server, _) = server().await;

        let cars: Vec<CarResponse> = server.get("/api/cars").await.json();
        assert_eq!(cars.len(), 3);
        assert_eq!(cars[0].id, 1);
        assert_eq!(cars[0].vin, "VIN12345");
        assert_eq!(cars[0].year, 2018);
        assert_eq!(cars[0].owner_name, "Ana Pop");
        assert_eq!(cars[2].owner_email, None);
    }

    #[tokio::test]
    async fn test_valid_inside_policy() {
        let (server, _) = server().await;

        let body: InsuranceValidityResponse = server
            .get("/api/cars/1/insurance-valid")
            .add_query_param("date", "2024-06-01")
            .await
            .json();

        assert_eq!(
            body,
            InsuranceValidityResponse {
                car_id: 1,
                date: "2024-06-01".to_string(),
                valid: true,
            }
        );
    }

    #[tokio::test]
    async fn test_boundaries_are_inclusive() {
        let (server, _) = server().await;

        for (day, expected) in [("2023-12-31", false), ("2024-01-01", true), ("2024-12-31", true)] {
            let body: InsuranceValidityResponse = server
                .get("/api/cars/1/insurance-valid")
                .add_query_param("date", day)
                .await
                .json();
            assert_eq!(body.valid, expected, "date {}", day);
        }
    }

    #[tokio::test]
    async fn test_uninsured_car_is_not_valid() {
        let (server, _) = server().await;

        let body: InsuranceValidityResponse = server
            .get("/api/cars/3/insurance-valid")
            .add_query_param("date", "2024-06-01")
            .await
            .json();
        assert!(!body.valid);
    }

    #[tokio::test]
    async fn test_malformed_date_is_bad_request() {
        let (server, _) = server().await;

        let response = server
            .get("/api/cars/1/insurance-valid")
            .add_query_param("date", "01/06/2024")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert_eq!(body.error, "bad_request");
        assert_eq!(body.message, "Invalid date format. Use YYYY-MM-DD.");
    }

    #[tokio::test]
    async fn test_missing_date_is_bad_request() {
        let (server, _) = server().await;

        server
            .get("/api/cars/1/insurance-valid")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_out_of_range_dates_are_bad_request() {
        let (server, _) = server().await;

        let early = server
            .get("/api/cars/1/insurance-valid")
            .add_query_param("date", "1899-12-31")
            .await;
        early.assert_status(StatusCode::BAD_REQUEST);
        assert!(early.json::<ErrorResponse>().message.contains("1900"));

        let late = server
            .get("/api/cars/1/insurance-valid")
            .add_query_param("date", "2999-01-01")
            .await;
        late.assert_status(StatusCode::BAD_REQUEST);
        assert!(late.json::<ErrorResponse>().message.contains("10 years"));
    }

    #[tokio::test]
    async fn test_unknown_car_is_not_found() {
        let (server, _) = server().await;

        let response = server
            .get("/api/cars/9999/insurance-valid")
            .add_query_param("date", "2024-06-01")
            .await;

        response.assert_status_not_found();
        assert_eq!(response.json::<ErrorResponse>().error, "not_found");
    }

    #[tokio::test]
    async fn test_storage_down_is_service_unavailable() {
        let (server, store) = server().await;
        store.set_unavailable(true);

        let response = server.get("/api/cars").await;
        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(response.json::<ErrorResponse>().error, "service_unavailable");
    }
}

mod claims {
    use super::*;

    #[tokio::test]
    async fn test_create_claim() {
        let (server, _) = server().await;

        let response = server
            .post("/api/cars/1/claims")
            .json(&json!({
                "claim_date": "2024-03-15",
                "description": "Rear bumper damage",
                "amount": "1250.50"
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let claim: ClaimResponse = response.json();
        assert!(claim.id > 0);
        assert_eq!(claim.car_id, 1);
        assert_eq!(claim.claim_date, date(2024, 3, 15));
        assert_eq!(claim.amount, dec!(1250.50));
    }

    #[tokio::test]
    async fn test_claim_for_unknown_car_is_not_found() {
        let (server, store) = server().await;

        let response = server
            .post("/api/cars/9999/claims")
            .json(&json!({ "claim_date": "2024-03-15", "amount": 10 }))
            .await;

        response.assert_status_not_found();
        assert_eq!(store.claims.len().await, 0);
    }

    #[tokio::test]
    async fn test_negative_amount_is_unprocessable() {
        let (server, _) = server().await;

        let response = server
            .post("/api/cars/1/claims")
            .json(&json!({ "claim_date": "2024-03-15", "amount": -5 }))
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response.json::<ErrorResponse>().error, "validation_error");
    }

    #[tokio::test]
    async fn test_amount_beyond_storage_precision_is_unprocessable() {
        let (server, store) = server().await;

        let response = server
            .post("/api/cars/1/claims")
            .json(&json!({ "claim_date": "2024-03-15", "amount": "100000000000.00" }))
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response.json::<ErrorResponse>().error, "validation_error");
        assert_eq!(store.claims.len().await, 0);
    }

    #[tokio::test]
    async fn test_claim_for_non_numeric_car_id_is_bad_request() {
        let (server, store) = server().await;

        let response = server
            .post("/api/cars/VIN12345/claims")
            .json(&json!({ "claim_date": "2024-03-15", "amount": 10 }))
            .await;

        response.assert_status_bad_request();
        assert_eq!(response.json::<ErrorResponse>().error, "bad_request");
        assert_eq!(store.claims.len().await, 0);
    }

    #[tokio::test]
    async fn test_missing_field_is_unprocessable() {
        let (server, _) = server().await;

        let response = server
            .post("/api/cars/1/claims")
            .json(&json!({ "description": "no date" }))
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }
}

mod history {
    use super::*;

    #[tokio::test]
    async fn test_history_orders_policies_and_claims() {
        let (server, _) = server().await;

        for (day, amount) in [("2024-03-15", 500), ("2023-12-01", 120)] {
            server
                .post("/api/cars/1/claims")
                .json(&json!({ "claim_date": day, "amount": amount }))
                .await
                .assert_status(StatusCode::CREATED);
        }

        let history: CarHistoryResponse = server.get("/api/cars/1/history").await.json();
        assert_eq!(history.car_id, 1);
        assert_eq!(history.vin, "VIN12345");

        let order: Vec<_> = history
            .timeline
            .iter()
            .map(|item| (item.kind.as_str(), item.event_date))
            .collect();
        assert_eq!(
            order,
            vec![
                ("Claim", date(2023, 12, 1)),
                ("Policy", date(2024, 1, 1)),
                ("Claim", date(2024, 3, 15)),
                ("Policy", date(2025, 1, 1)),
            ]
        );
    }

    #[tokio::test]
    async fn test_history_items_are_flattened() {
        let (server, _) = server().await;

        let body: serde_json::Value = server.get("/api/cars/1/history").await.json();
        let first = &body["timeline"][0];

        assert_eq!(first["type"], "Policy");
        assert_eq!(first["event_date"], "2024-01-01");
        assert_eq!(first["policy_end_date"], "2024-12-31");
        assert_eq!(first["policy_provider"], "Allianz");
        assert!(first.get("claim_amount").is_none());
    }

    #[tokio::test]
    async fn test_history_of_unknown_car_is_not_found() {
        let (server, _) = server().await;

        server.get("/api/cars/9999/history").await.assert_status_not_found();
    }

    #[tokio::test]
    async fn test_non_numeric_car_id_is_bad_request() {
        let (server, _) = server().await;

        let response = server.get("/api/cars/abc/history").await;

        response.assert_status_bad_request();
        let body: ErrorResponse = response.json();
        assert_eq!(body.error, "bad_request");
        assert!(body.message.contains("abc"));
    }
}
