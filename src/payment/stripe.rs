use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;

use super::{AuthorizeRequest, PaymentError, PaymentGateway, PaymentIntent};
use crate::config::PaymentConfig;

/// Stripe REST adapter. Every call is bounded by the configured timeout.
#[derive(Clone)]
pub struct StripeGateway {
    client: Client,
    api_base: String,
    secret_key: String,
}

#[derive(Deserialize)]
struct StripeObject {
    id: String,
}

#[derive(Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Deserialize)]
struct StripeErrorDetail {
    message: Option<String>,
}

impl StripeGateway {
    pub fn new(config: &PaymentConfig) -> Result<Self, PaymentError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            secret_key: config.secret_key.clone(),
        })
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.client
            .post(format!("{}{}", self.api_base, path))
            .bearer_auth(&self.secret_key)
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.client
            .get(format!("{}{}", self.api_base, path))
            .bearer_auth(&self.secret_key)
    }

    async fn send(request: RequestBuilder) -> Result<Response, PaymentError> {
        let response = request.send().await.map_err(|err| {
            if err.is_timeout() {
                PaymentError::Timeout
            } else {
                PaymentError::Transport(err)
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<StripeErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error.message)
            .unwrap_or_else(|| "unknown error".to_string());
        Err(PaymentError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_customer(&self, email: &str) -> Result<String, PaymentError> {
        let request = self.post("/v1/customers").form(&[("email", email)]);
        let customer: StripeObject = Self::send(request).await?.json().await?;
        Ok(customer.id)
    }

    async fn attach_payment_method(
        &self,
        customer_id: &str,
        payment_method_id: &str,
    ) -> Result<(), PaymentError> {
        let request = self
            .post(&format!("/v1/payment_methods/{payment_method_id}/attach"))
            .form(&[("customer", customer_id)]);
        Self::send(request).await?;
        Ok(())
    }

    async fn authorize(&self, request: AuthorizeRequest) -> Result<PaymentIntent, PaymentError> {
        let amount = request.amount.to_string();
        let form = [
            ("amount", amount.as_str()),
            ("currency", request.currency.as_str()),
            ("customer", request.customer_id.as_str()),
            ("payment_method", request.payment_method_id.as_str()),
            ("off_session", "true"),
            ("confirm", "true"),
            ("capture_method", "manual"),
        ];
        let mut builder = self.post("/v1/payment_intents").form(&form);
        if let Some(key) = request.idempotency_key.as_deref() {
            builder = builder.header("Idempotency-Key", key);
        }
        let intent = Self::send(builder).await?.json().await?;
        Ok(intent)
    }

    async fn capture(&self, intent_id: &str) -> Result<PaymentIntent, PaymentError> {
        let request = self.post(&format!("/v1/payment_intents/{intent_id}/capture"));
        let intent = Self::send(request).await?.json().await?;
        Ok(intent)
    }

    async fn cancel(&self, intent_id: &str) -> Result<PaymentIntent, PaymentError> {
        let request = self.post(&format!("/v1/payment_intents/{intent_id}/cancel"));
        let intent = Self::send(request).await?.json().await?;
        Ok(intent)
    }

    async fn retrieve(&self, intent_id: &str) -> Result<PaymentIntent, PaymentError> {
        let request = self.get(&format!("/v1/payment_intents/{intent_id}"));
        let intent = Self::send(request).await?.json().await?;
        Ok(intent)
    }
}
