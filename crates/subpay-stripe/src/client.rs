//! Stripe API client implementation.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::Client;
use secrecy::ExposeSecret;

use subpay_core::{CheckoutPlan, SubscriptionSummary};

use crate::config::StripeConfig;
use crate::error::StripeError;
use crate::params::{CancelSubscription, CreateCustomer, CreatePrice, CreateProduct};
use crate::types::{
    CheckoutSession, Customer, Price, Product, StripeErrorResponse, StripeList, Subscription,
};

/// Placeholder Stripe substitutes with the real session ID on redirect.
pub const SESSION_ID_PLACEHOLDER: &str = "session_id={CHECKOUT_SESSION_ID}";

/// Stripe API client.
///
/// Each instance owns its credential, so concurrent callers with different
/// keys simply hold different clients. Every operation issues a single
/// request and surfaces Stripe's response as-is; there are no retries and
/// no idempotency keys.
#[derive(Debug, Clone)]
pub struct StripeClient {
    client: Client,
    config: StripeConfig,
}

impl StripeClient {
    /// Create a client from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StripeError::Configuration`] if the secret key is empty or
    /// the HTTP client cannot be built. Nothing is sent over the network.
    pub fn new(config: StripeConfig) -> Result<Self, StripeError> {
        if config.secret_key.expose_secret().is_empty() {
            return Err(StripeError::Configuration(
                "Stripe secret key is empty".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                StripeError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self { client, config })
    }

    /// Create a client from the process environment.
    ///
    /// Reads `STRIPE_SECRET_KEY` (and optionally `STRIPE_API_BASE`) at call
    /// time, so a rotated key is picked up by the next construction.
    ///
    /// # Errors
    ///
    /// Returns [`StripeError::Configuration`] if the key is absent or empty.
    pub fn from_env() -> Result<Self, StripeError> {
        Self::new(StripeConfig::from_env()?)
    }

    /// Create a new Stripe customer.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or Stripe rejects it.
    pub async fn create_customer(&self, params: CreateCustomer) -> Result<Customer, StripeError> {
        let mut form: Vec<(String, String)> = Vec::new();
        if !params.name.is_empty() {
            form.push(("name".to_string(), params.name));
        }
        if !params.email.is_empty() {
            form.push(("email".to_string(), params.email));
        }
        push_metadata(&mut form, &params.metadata);

        let response = self
            .client
            .post(format!("{}/v1/customers", self.config.api_base))
            .basic_auth(self.config.secret_key.expose_secret(), Option::<&str>::None)
            .form(&form)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Get a customer by ID.
    ///
    /// Returns `Ok(None)` if the customer does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or Stripe rejects it.
    pub async fn get_customer(&self, customer_id: &str) -> Result<Option<Customer>, StripeError> {
        let response = self
            .client
            .get(format!("{}/v1/customers/{customer_id}", self.config.api_base))
            .basic_auth(self.config.secret_key.expose_secret(), Option::<&str>::None)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        self.handle_response(response).await.map(Some)
    }

    /// Create a new product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or Stripe rejects it.
    pub async fn create_product(&self, params: CreateProduct) -> Result<Product, StripeError> {
        let mut form: Vec<(String, String)> = Vec::new();
        if !params.name.is_empty() {
            form.push(("name".to_string(), params.name));
        }
        push_metadata(&mut form, &params.metadata);

        let response = self
            .client
            .post(format!("{}/v1/products", self.config.api_base))
            .basic_auth(self.config.secret_key.expose_secret(), Option::<&str>::None)
            .form(&form)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Create a recurring price for a product.
    ///
    /// # Errors
    ///
    /// Returns [`StripeError::InvalidArgument`] without issuing a request
    /// when `params.product` is missing or empty; otherwise errors from the
    /// request itself.
    pub async fn create_price(&self, params: CreatePrice) -> Result<Price, StripeError> {
        let Some(product) = params.product.filter(|p| !p.is_empty()) else {
            return Err(StripeError::InvalidArgument(
                "a product ID is required to create a price".to_string(),
            ));
        };

        let mut form = vec![
            ("currency".to_string(), params.currency),
            ("unit_amount".to_string(), params.unit_amount.to_string()),
            ("recurring[interval]".to_string(), params.interval),
            ("product".to_string(), product),
        ];
        push_metadata(&mut form, &params.metadata);

        let response = self
            .client
            .post(format!("{}/v1/prices", self.config.api_base))
            .basic_auth(self.config.secret_key.expose_secret(), Option::<&str>::None)
            .form(&form)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Start a subscription Checkout session.
    ///
    /// The success URL is rewritten to carry Stripe's session ID placeholder
    /// exactly once, so the redirect after completion identifies the session
    /// no matter whether the caller already appended it.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or Stripe rejects it.
    pub async fn start_checkout_session(
        &self,
        customer_id: &str,
        price_id: &str,
        success_url: &str,
        cancel_url: &str,
    ) -> Result<CheckoutSession, StripeError> {
        let success_url = with_session_placeholder(success_url);

        tracing::debug!(
            customer_id = %customer_id,
            price_id = %price_id,
            "Creating Stripe checkout session"
        );

        let form = [
            ("mode", "subscription".to_string()),
            ("customer", customer_id.to_string()),
            ("success_url", success_url),
            ("cancel_url", cancel_url.to_string()),
            ("line_items[0][price]", price_id.to_string()),
            ("line_items[0][quantity]", "1".to_string()),
        ];

        let response = self
            .client
            .post(format!("{}/v1/checkout/sessions", self.config.api_base))
            .basic_auth(self.config.secret_key.expose_secret(), Option::<&str>::None)
            .form(&form)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Retrieve a Checkout session by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or Stripe rejects it.
    pub async fn get_checkout_session(
        &self,
        session_id: &str,
    ) -> Result<CheckoutSession, StripeError> {
        let response = self
            .client
            .get(format!(
                "{}/v1/checkout/sessions/{session_id}",
                self.config.api_base
            ))
            .basic_auth(self.config.secret_key.expose_secret(), Option::<&str>::None)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Retrieve a subscription by ID.
    ///
    /// Use [`SubscriptionSummary::from`] on the result for the normalized
    /// view.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or Stripe rejects it.
    pub async fn get_subscription(
        &self,
        subscription_id: &str,
    ) -> Result<Subscription, StripeError> {
        let response = self
            .client
            .get(format!(
                "{}/v1/subscriptions/{subscription_id}",
                self.config.api_base
            ))
            .basic_auth(self.config.secret_key.expose_secret(), Option::<&str>::None)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// List a customer's active subscriptions.
    ///
    /// Returns the raw list; when several subscriptions are active, picking
    /// one is the caller's concern.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or Stripe rejects it.
    pub async fn list_active_subscriptions(
        &self,
        customer_id: &str,
    ) -> Result<StripeList<Subscription>, StripeError> {
        let response = self
            .client
            .get(format!("{}/v1/subscriptions", self.config.api_base))
            .basic_auth(self.config.secret_key.expose_secret(), Option::<&str>::None)
            .query(&[("customer", customer_id), ("status", "active")])
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Cancel a subscription, immediately or at period end.
    ///
    /// Deferred cancellation (`at_period_end`) updates the subscription so
    /// it lapses when the paid period runs out; immediate cancellation
    /// deletes it outright. Both record the cancellation comment and
    /// feedback.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or Stripe rejects it.
    pub async fn cancel_subscription(
        &self,
        subscription_id: &str,
        params: CancelSubscription,
    ) -> Result<Subscription, StripeError> {
        let url = format!(
            "{}/v1/subscriptions/{subscription_id}",
            self.config.api_base
        );

        tracing::debug!(
            subscription_id = %subscription_id,
            at_period_end = %params.at_period_end,
            "Canceling Stripe subscription"
        );

        let mut form = vec![
            ("cancellation_details[comment]", params.reason),
            ("cancellation_details[feedback]", params.feedback),
        ];

        let request = if params.at_period_end {
            form.push(("cancel_at_period_end", "true".to_string()));
            self.client.post(&url)
        } else {
            self.client.delete(&url)
        };

        let response = request
            .basic_auth(self.config.secret_key.expose_secret(), Option::<&str>::None)
            .form(&form)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Resolve a completed Checkout session into a [`CheckoutPlan`].
    ///
    /// Fetches the session, follows its customer and subscription
    /// references, fetches the subscription, and merges the plan ID with
    /// the normalized subscription fields.
    ///
    /// # Errors
    ///
    /// Returns [`StripeError::InvalidArgument`] when the session carries no
    /// customer or subscription, or the subscription carries no plan; fetch
    /// errors propagate unchanged. No partial record is ever produced.
    pub async fn resolve_checkout_plan(
        &self,
        session_id: &str,
    ) -> Result<CheckoutPlan, StripeError> {
        let session = self.get_checkout_session(session_id).await?;

        let Some(customer_id) = session.customer.filter(|c| !c.is_empty()) else {
            return Err(StripeError::InvalidArgument(format!(
                "checkout session {session_id} has no customer"
            )));
        };
        let Some(subscription_id) = session.subscription.filter(|s| !s.is_empty()) else {
            return Err(StripeError::InvalidArgument(format!(
                "checkout session {session_id} has no subscription"
            )));
        };

        let subscription = self.get_subscription(&subscription_id).await?;
        let Some(plan) = subscription.plan.as_ref() else {
            return Err(StripeError::InvalidArgument(format!(
                "subscription {subscription_id} has no plan"
            )));
        };

        tracing::debug!(
            session_id = %session_id,
            subscription_id = %subscription_id,
            plan_id = %plan.id,
            "Resolved checkout session"
        );

        Ok(CheckoutPlan {
            customer_id,
            plan_id: plan.id.clone(),
            subscription_id,
            subscription: SubscriptionSummary::from(&subscription),
        })
    }

    /// Handle API response and convert errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, StripeError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        // Try to parse Stripe's error envelope
        let error_body: Result<StripeErrorResponse, _> = response.json().await;

        match error_body {
            Ok(stripe_error) => Err(StripeError::Api {
                status: status.as_u16(),
                error_type: stripe_error.error.error_type,
                message: stripe_error.error.message,
                code: stripe_error.error.code,
            }),
            Err(_) => Err(StripeError::Api {
                status: status.as_u16(),
                error_type: "unknown".to_string(),
                message: format!("HTTP {status}"),
                code: None,
            }),
        }
    }
}

/// Ensure the success URL carries the session ID placeholder exactly once.
fn with_session_placeholder(success_url: &str) -> String {
    if success_url.contains(SESSION_ID_PLACEHOLDER) {
        return success_url.to_string();
    }

    let separator = if success_url.contains('?') { '&' } else { '?' };
    format!("{success_url}{separator}{SESSION_ID_PLACEHOLDER}")
}

/// Append `metadata[key]=value` pairs to a request form.
fn push_metadata(form: &mut Vec<(String, String)>, metadata: &BTreeMap<String, String>) {
    for (key, value) in metadata {
        form.push((format!("metadata[{key}]"), value.clone()));
    }
}
