#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use serde_json::json;
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use learnhub_api::{ApiClient, Error, IdRef, RawComboRef, Session};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup(session: Session) -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = ApiClient::with_client(reqwest::Client::new(), base_url, session);
    (server, client)
}

fn ok_envelope(data: serde_json::Value) -> serde_json::Value {
    json!({ "success": true, "message": "ok", "data": data })
}

// ── Order tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_my_orders_sends_bearer_token() {
    let (server, client) = setup(Session::bearer("tok-123")).await;

    let envelope = ok_envelope(json!([{
        "_id": "ord1",
        "planType": "single",
        "paymentStatus": "approved",
        "isActive": true,
        "courseId": "c1",
        "startDate": "2024-01-01T00:00:00Z",
        "endDate": "2025-01-01T00:00:00Z"
    }]));

    Mock::given(method("GET"))
        .and(path("/api/orders/my"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&envelope))
        .mount(&server)
        .await;

    let orders = client.my_orders().await.unwrap();

    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].plan_type, "single");
    assert_eq!(orders[0].payment_status, "approved");
    assert!(orders[0].is_active);
    assert_eq!(orders[0].course_id.as_ref().unwrap().id(), "c1");
}

#[tokio::test]
async fn test_orders_with_duck_typed_references() {
    let (server, client) = setup(Session::bearer("tok")).await;

    // One order with a populated course document, one with a populated
    // combo document -- both shapes the backend actually emits.
    let envelope = ok_envelope(json!([
        {
            "_id": "ord1",
            "planType": "single",
            "paymentStatus": "approved",
            "isActive": true,
            "courseId": { "_id": "c1", "title": "Algebra I" },
            "endDate": null
        },
        {
            "_id": "ord2",
            "planType": "combo",
            "paymentStatus": "approved",
            "isActive": true,
            "comboId": { "_id": "cmb1", "courses": ["c3", { "_id": "c4" }] },
            "endDate": null
        }
    ]));

    Mock::given(method("GET"))
        .and(path("/api/orders/my"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&envelope))
        .mount(&server)
        .await;

    let orders = client.my_orders().await.unwrap();

    assert_eq!(orders[0].course_id.as_ref().unwrap().id(), "c1");
    match orders[1].combo_id.as_ref().unwrap() {
        RawComboRef::Doc(doc) => {
            assert_eq!(doc.id, "cmb1");
            let ids: Vec<&str> = doc.courses.as_ref().unwrap().iter().map(IdRef::id).collect();
            assert_eq!(ids, ["c3", "c4"]);
        }
        RawComboRef::Id(_) => panic!("expected populated combo document"),
    }
}

// ── Catalog tests ───────────────────────────────────────────────────

#[tokio::test]
async fn test_list_courses_anonymous() {
    let (server, client) = setup(Session::Anonymous).await;

    let envelope = ok_envelope(json!([
        { "_id": "c1", "title": "Algebra I", "isPublished": true, "isAdminApproved": true },
        { "_id": "c2", "title": "Drafts 101", "isPublished": false, "isAdminApproved": false }
    ]));

    Mock::given(method("GET"))
        .and(path("/api/courses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&envelope))
        .mount(&server)
        .await;

    let courses = client.list_courses().await.unwrap();

    assert_eq!(courses.len(), 2);
    assert_eq!(courses[0].title, "Algebra I");
    assert!(courses[0].is_published);
    assert!(!courses[1].is_admin_approved);
}

#[tokio::test]
async fn test_get_combo() {
    let (server, client) = setup(Session::Anonymous).await;

    let envelope = ok_envelope(json!({
        "_id": "cmb1",
        "title": "Science Starter Pack",
        "courses": ["c3", "c4"],
        "durationMonths": 12,
        "price": 99.0
    }));

    Mock::given(method("GET"))
        .and(path("/api/combos/cmb1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&envelope))
        .mount(&server)
        .await;

    let combo = client.get_combo("cmb1").await.unwrap();

    assert_eq!(combo.title, "Science Starter Pack");
    assert_eq!(combo.duration_months, Some(12));
    assert_eq!(combo.courses.len(), 2);
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_success_false_surfaces_as_api_error() {
    let (server, client) = setup(Session::bearer("tok")).await;

    let envelope = json!({
        "success": false,
        "message": "failed to load orders",
        "data": null
    });

    Mock::given(method("GET"))
        .and(path("/api/orders/my"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&envelope))
        .mount(&server)
        .await;

    let result = client.my_orders().await;

    match result {
        Err(Error::Api { ref message, .. }) => {
            assert!(
                message.contains("failed to load"),
                "expected backend message, got: {message}"
            );
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_expired_session() {
    let (server, client) = setup(Session::bearer("stale")).await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.my_orders().await;
    assert!(matches!(result, Err(Error::SessionExpired)));
}

#[tokio::test]
async fn test_anonymous_hitting_protected_endpoint() {
    let (server, client) = setup(Session::Anonymous).await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.my_orders().await;

    match result {
        Err(Error::Authentication { ref message }) => {
            assert!(message.contains("signed-in"), "got: {message}");
        }
        other => panic!("expected Authentication error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_a_decode_error() {
    let (server, client) = setup(Session::Anonymous).await;

    Mock::given(method("GET"))
        .and(path("/api/courses"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway error</html>"))
        .mount(&server)
        .await;

    let result = client.list_courses().await;
    assert!(matches!(result, Err(Error::Deserialization { .. })));
}
