//! # Gateway Flows
//!
//! Both listeners driven in process over one set of ledgers: operators book
//! and update on the admin side, customers follow along on the public side.

#[cfg(test)]
mod tests {
    use crate::fixtures::Harness;
    use axum::body::{to_bytes, Body};
    use axum::extract::ConnectInfo;
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use hs_05_api_gateway::{
        admin_router, public_router, AppState, GatewayConfig, StaticTokenIdentityProvider,
    };
    use serde_json::{json, Value};
    use std::net::SocketAddr;
    use std::sync::Arc;
    use tower::ServiceExt;

    const ADMIN_KEY: &str = "ops-key";

    struct Listeners {
        harness: Harness,
        public: Router,
        admin: Router,
    }

    fn listeners() -> Listeners {
        let harness = Harness::new();
        let state = AppState {
            shipments: harness.shipments.clone(),
            quotes: harness.quotes.clone(),
        };
        let mut config = GatewayConfig::default();
        config.admin.api_key = Some(ADMIN_KEY.into());
        let identity = Arc::new(StaticTokenIdentityProvider::new([
            ("tok-u", "u"),
            ("tok-v", "v"),
        ]));

        Listeners {
            public: public_router(state.clone(), identity, &config),
            admin: admin_router(state, &config),
            harness,
        }
    }

    fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    fn operator(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
        let mut req = request(method, uri, Some(ADMIN_KEY), body);
        req.extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 41000))));
        req
    }

    async fn call(router: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let response = router.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn booking(owner: &str) -> Value {
        json!({
            "owner": owner,
            "sender_name": "Acme Exports",
            "sender_address": "1 Harbour Rd, Shanghai",
            "recipient_name": "Rotterdam Imports BV",
            "recipient_address": "Wilhelminakade 1, Rotterdam",
            "origin_port": "Shanghai",
            "destination_port": "Rotterdam",
            "vessel": "MV Heritage Star",
            "weight": "1200.50",
            "dimensions": "40ft container",
            "cargo_type": "Container",
            "estimated_delivery": "2024-10-01T00:00:00Z"
        })
    }

    #[tokio::test]
    async fn test_operator_books_and_customer_tracks() {
        let l = listeners();

        let (status, shipment) =
            call(&l.admin, operator("POST", "/admin/shipments", Some(booking("u")))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(shipment["tracking_number"], "HS00000001");
        assert_eq!(shipment["status"], "pending");
        assert_eq!(shipment["weight"], "1200.50");

        let (status, update) = call(
            &l.admin,
            operator(
                "POST",
                "/admin/shipments/HS00000001/updates",
                Some(json!({"status": "in_transit", "location": "Singapore Port"})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(update["sequence"], 0);

        let (status, tracked) =
            call(&l.public, request("GET", "/track/HS00000001", Some("tok-u"), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(tracked["shipment"]["status"], "in_transit");
        assert_eq!(tracked["updates"][0]["location"], "Singapore Port");

        let (status, mine) =
            call(&l.public, request("GET", "/user/shipments", Some("tok-u"), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(mine.as_array().unwrap().len(), 1);

        let (status, theirs) =
            call(&l.public, request("GET", "/user/shipments", Some("tok-v"), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(theirs.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_other_customer_gets_plain_not_found() {
        let l = listeners();
        call(&l.admin, operator("POST", "/admin/shipments", Some(booking("u")))).await;

        let (foreign_status, foreign) =
            call(&l.public, request("GET", "/track/HS00000001", Some("tok-v"), None)).await;
        let (missing_status, missing) =
            call(&l.public, request("GET", "/track/HS12345678", Some("tok-v"), None)).await;

        assert_eq!(foreign_status, StatusCode::NOT_FOUND);
        assert_eq!(missing_status, StatusCode::NOT_FOUND);
        assert_eq!(foreign, missing);
        assert_eq!(foreign["kind"], "not_found");
    }

    #[tokio::test]
    async fn test_quote_round_trip_between_listeners() {
        let l = listeners();
        let submission = json!({
            "company_name": "Acme Ltd",
            "contact_name": "Jane Doe",
            "email": "jane@acme.example",
            "phone": "+44 20 7946 0000",
            "service_type": "air_freight",
            "cargo_type": "hazardous",
            "origin_port": "Felixstowe",
            "destination_port": "Singapore",
            "cargo_description": "Lithium batteries",
            "weight": "300",
            "dimensions": "4 pallets",
            "preferred_shipping_date": "2024-10-01"
        });

        let (status, created) =
            call(&l.public, request("POST", "/quote", Some("tok-u"), Some(submission))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["quote_number"], "HQ00000001");

        let (status, priced) = call(
            &l.admin,
            operator(
                "POST",
                "/admin/quotes/HQ00000001/process",
                Some(json!({"quoted_price": "7420.00"})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(priced["is_processed"], true);

        let (status, seen) =
            call(&l.public, request("GET", "/quote/HQ00000001", Some("tok-u"), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(seen["quoted_price"], "7420.00");

        let (status, again) = call(
            &l.admin,
            operator(
                "POST",
                "/admin/quotes/HQ00000001/process",
                Some(json!({"quoted_price": "1.00"})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(again["kind"], "already_processed");
    }

    #[tokio::test]
    async fn test_customer_token_not_accepted_on_admin_listener() {
        let l = listeners();
        let mut req = request("POST", "/admin/shipments", Some("tok-u"), Some(booking("u")));
        req.extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 41000))));

        let (status, body) = call(&l.admin, req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["kind"], "unauthorized");
        assert!(l.harness.shipment_repo.is_empty());
    }

    #[tokio::test]
    async fn test_admin_routes_absent_from_public_listener() {
        let l = listeners();
        let (status, _) = call(
            &l.public,
            request("POST", "/admin/shipments", Some("tok-u"), Some(booking("u"))),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(l.harness.shipment_repo.is_empty());
    }

    #[tokio::test]
    async fn test_validation_errors_list_fields() {
        let l = listeners();
        let mut bad = booking("u");
        bad["weight"] = json!("0");
        bad["origin_port"] = json!("");

        let (status, body) = call(&l.admin, operator("POST", "/admin/shipments", Some(bad))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], "validation_error");
        let fields: Vec<&str> = body["fields"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["field"].as_str().unwrap())
            .collect();
        assert!(fields.contains(&"weight"));
        assert!(fields.contains(&"origin_port"));
    }

    #[tokio::test]
    async fn test_vessel_detach_reports_count() {
        let l = listeners();
        call(&l.admin, operator("POST", "/admin/shipments", Some(booking("u")))).await;
        call(&l.admin, operator("POST", "/admin/shipments", Some(booking("v")))).await;

        let (status, body) = call(
            &l.admin,
            operator("POST", "/admin/vessels/MV%20Heritage%20Star/detach", None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["cleared"], 2);

        let (_, tracked) =
            call(&l.public, request("GET", "/track/HS00000002", Some("tok-v"), None)).await;
        assert_eq!(tracked["shipment"]["vessel"], Value::Null);
    }
}
