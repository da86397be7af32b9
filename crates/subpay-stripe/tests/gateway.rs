//! Gateway operation tests against a mock Stripe server.
//!
//! These tests pin down which endpoint each operation hits, what the form
//! bodies carry, and that local validation failures never reach the
//! network.

use std::collections::BTreeMap;

use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use subpay_stripe::{
    CancelSubscription, CreateCustomer, CreatePrice, CreateProduct, StripeClient, StripeConfig,
    StripeError,
};

/// Build a client pointed at the mock server.
fn test_client(server: &MockServer) -> StripeClient {
    let config = StripeConfig::new("sk_test_key").with_api_base(server.uri());
    StripeClient::new(config).expect("client should build")
}

fn customer_body(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "object": "customer",
        "email": "jo@example.com",
        "name": "Jo Doe",
        "created": 1_704_067_200,
    })
}

fn subscription_body(id: &str, status: &str, cancel_at_period_end: bool) -> serde_json::Value {
    json!({
        "id": id,
        "object": "subscription",
        "customer": "cus_1",
        "status": status,
        "current_period_start": 1_704_067_200,
        "current_period_end": 1_706_745_600,
        "cancel_at_period_end": cancel_at_period_end,
        "plan": { "id": "plan_basic", "amount": 9999, "currency": "usd", "interval": "month" },
    })
}

// ============================================================================
// Customers and products
// ============================================================================

#[tokio::test]
async fn create_customer_posts_name_email_and_metadata() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/customers"))
        .and(body_string_contains("name=Jo+Doe"))
        .and(body_string_contains("email=jo%40example.com"))
        .and(body_string_contains("metadata%5Buser_id%5D=u_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(customer_body("cus_1")))
        .expect(1)
        .mount(&server)
        .await;

    let customer = test_client(&server)
        .create_customer(CreateCustomer {
            name: "Jo Doe".to_string(),
            email: "jo@example.com".to_string(),
            metadata: BTreeMap::from([("user_id".to_string(), "u_1".to_string())]),
        })
        .await
        .expect("create_customer should succeed");

    assert_eq!(customer.id, "cus_1");

    // The secret key rides along as HTTP basic auth.
    let requests = server.received_requests().await.unwrap();
    let auth = requests[0]
        .headers
        .get("authorization")
        .expect("authorization header")
        .to_str()
        .unwrap();
    assert!(auth.starts_with("Basic "));
}

#[tokio::test]
async fn create_customer_omits_empty_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/customers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(customer_body("cus_2")))
        .expect(1)
        .mount(&server)
        .await;

    test_client(&server)
        .create_customer(CreateCustomer::default())
        .await
        .expect("create_customer should succeed");

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].body.is_empty());
}

#[tokio::test]
async fn get_customer_returns_none_on_404() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/customers/cus_missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {
                "type": "invalid_request_error",
                "message": "No such customer: cus_missing",
                "code": "resource_missing",
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let found = test_client(&server)
        .get_customer("cus_missing")
        .await
        .expect("404 should not be an error");
    assert!(found.is_none());
}

#[tokio::test]
async fn create_product_posts_to_products() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/products"))
        .and(body_string_contains("name=Pro+plan"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "prod_1",
            "object": "product",
            "name": "Pro plan",
            "active": true,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let product = test_client(&server)
        .create_product(CreateProduct {
            name: "Pro plan".to_string(),
            ..CreateProduct::default()
        })
        .await
        .expect("create_product should succeed");

    assert_eq!(product.id, "prod_1");
    assert!(product.active);
}

// ============================================================================
// Prices
// ============================================================================

#[tokio::test]
async fn create_price_posts_recurring_interval_and_product() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/prices"))
        .and(body_string_contains("currency=usd"))
        .and(body_string_contains("unit_amount=9999"))
        .and(body_string_contains("recurring%5Binterval%5D=month"))
        .and(body_string_contains("product=prod_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "price_1",
            "object": "price",
            "currency": "usd",
            "unit_amount": 9999,
            "recurring": { "interval": "month" },
            "product": "prod_1",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let price = test_client(&server)
        .create_price(CreatePrice {
            product: Some("prod_1".to_string()),
            ..CreatePrice::default()
        })
        .await
        .expect("create_price should succeed");

    assert_eq!(price.id, "price_1");
    assert_eq!(price.recurring.unwrap().interval, "month");
}

#[tokio::test]
async fn create_price_without_product_never_hits_the_network() {
    let server = MockServer::start().await;

    let err = test_client(&server)
        .create_price(CreatePrice::default())
        .await
        .unwrap_err();

    assert!(matches!(err, StripeError::InvalidArgument(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_price_with_empty_product_never_hits_the_network() {
    let server = MockServer::start().await;

    let err = test_client(&server)
        .create_price(CreatePrice {
            product: Some(String::new()),
            ..CreatePrice::default()
        })
        .await
        .unwrap_err();

    assert!(matches!(err, StripeError::InvalidArgument(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

// ============================================================================
// Credential handling
// ============================================================================

#[tokio::test]
async fn empty_secret_fails_before_any_request() {
    let server = MockServer::start().await;

    let result = StripeClient::new(StripeConfig::new("").with_api_base(server.uri()));
    assert!(matches!(result, Err(StripeError::Configuration(_))));

    assert!(server.received_requests().await.unwrap().is_empty());
}

// ============================================================================
// Subscriptions
// ============================================================================

#[tokio::test]
async fn list_active_subscriptions_queries_by_customer_and_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/subscriptions"))
        .and(query_param("customer", "cus_1"))
        .and(query_param("status", "active"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "data": [subscription_body("sub_1", "active", false)],
            "has_more": false,
            "url": "/v1/subscriptions",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let subscriptions = test_client(&server)
        .list_active_subscriptions("cus_1")
        .await
        .expect("list should succeed");

    assert_eq!(subscriptions.data.len(), 1);
    assert_eq!(subscriptions.data[0].id, "sub_1");
    assert!(!subscriptions.has_more);
}

#[tokio::test]
async fn immediate_cancel_deletes_the_subscription() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1/subscriptions/sub_1"))
        .and(body_string_contains("cancellation_details%5Bcomment%5D=too+pricey"))
        .and(body_string_contains("cancellation_details%5Bfeedback%5D=too_expensive"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(subscription_body("sub_1", "canceled", false)),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/subscriptions/sub_1"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let subscription = test_client(&server)
        .cancel_subscription(
            "sub_1",
            CancelSubscription {
                reason: "too pricey".to_string(),
                feedback: "too_expensive".to_string(),
                at_period_end: false,
            },
        )
        .await
        .expect("cancel should succeed");

    assert_eq!(subscription.status, "canceled");
}

#[tokio::test]
async fn deferred_cancel_updates_the_subscription() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/subscriptions/sub_1"))
        .and(body_string_contains("cancel_at_period_end=true"))
        .and(body_string_contains("cancellation_details%5Bfeedback%5D=other"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(subscription_body("sub_1", "active", true)),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v1/subscriptions/sub_1"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let subscription = test_client(&server)
        .cancel_subscription(
            "sub_1",
            CancelSubscription {
                at_period_end: true,
                ..CancelSubscription::default()
            },
        )
        .await
        .expect("cancel should succeed");

    assert_eq!(subscription.status, "active");
    assert!(subscription.cancel_at_period_end);
}

// ============================================================================
// Error surfacing
// ============================================================================

#[tokio::test]
async fn api_errors_surface_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/customers"))
        .respond_with(ResponseTemplate::new(402).set_body_json(json!({
            "error": {
                "type": "card_error",
                "message": "Your card was declined.",
                "code": "card_declined",
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = test_client(&server)
        .create_customer(CreateCustomer::default())
        .await
        .unwrap_err();

    match err {
        StripeError::Api {
            status,
            error_type,
            message,
            code,
        } => {
            assert_eq!(status, 402);
            assert_eq!(error_type, "card_error");
            assert_eq!(message, "Your card was declined.");
            assert_eq!(code.as_deref(), Some("card_declined"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn unparseable_error_bodies_become_unknown() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/customers"))
        .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
        .expect(1)
        .mount(&server)
        .await;

    let err = test_client(&server)
        .create_customer(CreateCustomer::default())
        .await
        .unwrap_err();

    match err {
        StripeError::Api {
            status, error_type, ..
        } => {
            assert_eq!(status, 500);
            assert_eq!(error_type, "unknown");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}
