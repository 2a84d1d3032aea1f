//! Shared helpers for router integration tests.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use chrono::Duration;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use teatrack_axum::{AxumContext, Hs256Verifier, ServerConfig, create_router};
use teatrack_core::UserId;
use teatrack_db::TestDb;

pub const SECRET: &str = "integration-secret";

/// A router over a fresh in-memory database.
pub struct TestApp {
    pub router: Router,
    pub verifier: Hs256Verifier,
    _db: TestDb,
}

impl TestApp {
    pub async fn new() -> Self {
        let db = TestDb::new().await.unwrap();
        let verifier = Hs256Verifier::new(SECRET).unwrap();
        let ctx = AxumContext::new(db.app_core(), verifier.clone());
        let config = ServerConfig::with_defaults().with_jwt_secret(SECRET);

        Self {
            router: create_router(ctx, &config),
            verifier,
            _db: db,
        }
    }

    pub fn token(&self, user: &str) -> String {
        self.verifier
            .issue(&UserId::new(user).unwrap(), Duration::hours(1))
            .unwrap()
    }

    /// Send a request and return status plus the body parsed as JSON
    /// (or `Value::Null` when the body is empty or not JSON).
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None, None).await
    }

    /// Create a profile for `user` and return its id.
    pub async fn create_profile(&self, user: &str, price: Value) -> i64 {
        let token = self.token(user);
        let (status, body) = self
            .send(
                Method::POST,
                "/api/profile",
                Some(&token),
                Some(profile_body(price)),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {body}");
        body["id"].as_i64().unwrap()
    }
}

/// A complete, valid create body with the given `pricePerKilo`.
pub fn profile_body(price: Value) -> Value {
    json!({
        "factoryName": "Nilgiri Estates",
        "ownerName": "R. Kumar",
        "contactNumber": "0423-555-0101",
        "address": "Coonoor, Nilgiris",
        "commodityType": "Tea",
        "pricePerKilo": price,
        "effectiveDate": "2024-05-01",
        "operatingHours": "8am - 5pm"
    })
}
