#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};
use std::time::Duration;

use async_trait::async_trait;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, Set};
use tokio::sync::OnceCell;
use uuid::Uuid;
use wellness_marketplace_api::{
    config::{AppConfig, PaymentConfig},
    db::{create_orm_conn, create_pool, run_migrations},
    entity::{products, users},
    middleware::auth::{AuthUser, ROLE_ADMIN, ROLE_USER},
    payment::{AuthorizeRequest, IntentStatus, PaymentError, PaymentGateway, PaymentIntent},
    services::{auth_service::hash_password, product_service::discounted_price},
    state::AppState,
};

static MIGRATED: OnceCell<()> = OnceCell::const_new();

/// How the fake processor answers `authorize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizeBehavior {
    Succeed,
    Decline,
    Hang,
    EmptyIntent,
}

/// In-memory processor. Intents move through the same states the real one
/// reports: a captured intent cannot be canceled or captured again, and a
/// canceled one cannot be captured.
pub struct FakeGateway {
    authorize_behavior: Mutex<AuthorizeBehavior>,
    capture_status: Mutex<IntentStatus>,
    capture_delay: Mutex<Duration>,
    intents: Mutex<HashMap<String, IntentStatus>>,
    last_amount: Mutex<Option<i64>>,
    last_idempotency_key: Mutex<Option<String>>,
    pub authorize_calls: AtomicUsize,
    pub capture_calls: AtomicUsize,
    pub cancel_calls: AtomicUsize,
}

impl FakeGateway {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            authorize_behavior: Mutex::new(AuthorizeBehavior::Succeed),
            capture_status: Mutex::new(IntentStatus::Succeeded),
            capture_delay: Mutex::new(Duration::ZERO),
            intents: Mutex::new(HashMap::new()),
            last_amount: Mutex::new(None),
            last_idempotency_key: Mutex::new(None),
            authorize_calls: AtomicUsize::new(0),
            capture_calls: AtomicUsize::new(0),
            cancel_calls: AtomicUsize::new(0),
        })
    }

    pub fn set_authorize(&self, behavior: AuthorizeBehavior) {
        *self.authorize_behavior.lock().unwrap() = behavior;
    }

    pub fn set_capture_status(&self, status: IntentStatus) {
        *self.capture_status.lock().unwrap() = status;
    }

    /// The capture takes effect at once; only the reply is held back.
    pub fn set_capture_delay(&self, delay: Duration) {
        *self.capture_delay.lock().unwrap() = delay;
    }

    /// Record an intent as captured, as if an earlier capture call went through.
    pub fn mark_captured(&self, intent_id: &str) {
        self.intents
            .lock()
            .unwrap()
            .insert(intent_id.to_string(), IntentStatus::Succeeded);
    }

    pub fn intent_status(&self, intent_id: &str) -> Option<IntentStatus> {
        self.intents.lock().unwrap().get(intent_id).copied()
    }

    pub fn last_amount(&self) -> Option<i64> {
        *self.last_amount.lock().unwrap()
    }

    pub fn last_idempotency_key(&self) -> Option<String> {
        self.last_idempotency_key.lock().unwrap().clone()
    }

    pub fn authorize_count(&self) -> usize {
        self.authorize_calls.load(Ordering::SeqCst)
    }

    pub fn capture_count(&self) -> usize {
        self.capture_calls.load(Ordering::SeqCst)
    }

    pub fn cancel_count(&self) -> usize {
        self.cancel_calls.load(Ordering::SeqCst)
    }
}

fn rejected(message: &str) -> PaymentError {
    PaymentError::Rejected {
        status: 400,
        message: message.to_string(),
    }
}

#[async_trait]
impl PaymentGateway for FakeGateway {
    async fn create_customer(&self, _email: &str) -> Result<String, PaymentError> {
        Ok(format!("cus_{}", Uuid::new_v4().simple()))
    }

    async fn attach_payment_method(
        &self,
        _customer_id: &str,
        _payment_method_id: &str,
    ) -> Result<(), PaymentError> {
        Ok(())
    }

    async fn authorize(&self, request: AuthorizeRequest) -> Result<PaymentIntent, PaymentError> {
        self.authorize_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_amount.lock().unwrap() = Some(request.amount);
        *self.last_idempotency_key.lock().unwrap() = request.idempotency_key.clone();
        let behavior = *self.authorize_behavior.lock().unwrap();
        match behavior {
            AuthorizeBehavior::Succeed => {
                let id = format!("pi_{}", Uuid::new_v4().simple());
                self.intents
                    .lock()
                    .unwrap()
                    .insert(id.clone(), IntentStatus::RequiresCapture);
                Ok(PaymentIntent {
                    id,
                    status: IntentStatus::RequiresCapture,
                })
            }
            AuthorizeBehavior::Decline => Err(PaymentError::Rejected {
                status: 402,
                message: "Your card was declined.".into(),
            }),
            AuthorizeBehavior::Hang => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(PaymentIntent {
                    id: "pi_too_late".into(),
                    status: IntentStatus::RequiresCapture,
                })
            }
            AuthorizeBehavior::EmptyIntent => Ok(PaymentIntent {
                id: String::new(),
                status: IntentStatus::RequiresCapture,
            }),
        }
    }

    async fn capture(&self, intent_id: &str) -> Result<PaymentIntent, PaymentError> {
        self.capture_calls.fetch_add(1, Ordering::SeqCst);
        let outcome = {
            let mut intents = self.intents.lock().unwrap();
            match intents.get(intent_id).copied() {
                Some(IntentStatus::Succeeded) => {
                    Err(rejected("This PaymentIntent has already been captured."))
                }
                Some(IntentStatus::Canceled) => {
                    Err(rejected("This PaymentIntent has been canceled."))
                }
                _ => {
                    let status = *self.capture_status.lock().unwrap();
                    intents.insert(intent_id.to_string(), status);
                    Ok(PaymentIntent {
                        id: intent_id.to_string(),
                        status,
                    })
                }
            }
        };

        let delay = *self.capture_delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        outcome
    }

    async fn cancel(&self, intent_id: &str) -> Result<PaymentIntent, PaymentError> {
        self.cancel_calls.fetch_add(1, Ordering::SeqCst);
        let mut intents = self.intents.lock().unwrap();
        match intents.get(intent_id).copied() {
            Some(IntentStatus::Succeeded) => {
                Err(rejected("This PaymentIntent has already been captured."))
            }
            Some(IntentStatus::Canceled) => Err(rejected("This PaymentIntent is already canceled.")),
            _ => {
                intents.insert(intent_id.to_string(), IntentStatus::Canceled);
                Ok(PaymentIntent {
                    id: intent_id.to_string(),
                    status: IntentStatus::Canceled,
                })
            }
        }
    }

    async fn retrieve(&self, intent_id: &str) -> Result<PaymentIntent, PaymentError> {
        let status = self
            .intent_status(intent_id)
            .unwrap_or(IntentStatus::RequiresCapture);
        Ok(PaymentIntent {
            id: intent_id.to_string(),
            status,
        })
    }
}

/// `None` when no database is configured; callers skip in that case.
pub fn database_url() -> Option<String> {
    match std::env::var("TEST_DATABASE_URL").or_else(|_| std::env::var("DATABASE_URL")) {
        Ok(url) => Some(url),
        Err(_) => {
            eprintln!("Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration tests.");
            None
        }
    }
}

pub async fn setup_state(
    database_url: &str,
    gateway: Arc<FakeGateway>,
) -> anyhow::Result<AppState> {
    let pool = create_pool(database_url).await?;
    let orm = create_orm_conn(database_url).await?;
    MIGRATED
        .get_or_try_init(|| async { run_migrations(&orm).await })
        .await?;

    let config = AppConfig {
        database_url: database_url.to_string(),
        host: "127.0.0.1".into(),
        port: 0,
        jwt_secret: "test-secret".into(),
        payment: PaymentConfig {
            secret_key: String::new(),
            api_base: "http://127.0.0.1:9".into(),
            currency: "usd".into(),
            timeout: Duration::from_millis(300),
        },
        delivery_fee: 0.0,
    };

    Ok(AppState {
        pool,
        orm,
        config: Arc::new(config),
        payments: gateway,
    })
}

fn unique_email(prefix: &str) -> String {
    format!("{prefix}-{}@example.com", Uuid::new_v4().simple())
}

async fn insert_user(
    state: &AppState,
    role: &str,
    payment_customer_id: Option<String>,
) -> anyhow::Result<AuthUser> {
    let user = users::ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(unique_email(role)),
        password_hash: Set(hash_password("secret123")?),
        first_name: Set("Test".into()),
        last_name: Set(role.to_string()),
        role: Set(role.to_string()),
        has_clinical_data: Set(false),
        has_digestive_history: Set(false),
        has_diet_data: Set(false),
        has_goals_data: Set(false),
        is_partner: Set(false),
        payment_customer_id: Set(payment_customer_id),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(AuthUser {
        user_id: user.id,
        role: user.role,
    })
}

pub async fn create_user(state: &AppState) -> anyhow::Result<AuthUser> {
    insert_user(state, ROLE_USER, None).await
}

pub async fn create_customer(state: &AppState) -> anyhow::Result<AuthUser> {
    let customer = format!("cus_{}", Uuid::new_v4().simple());
    insert_user(state, ROLE_USER, Some(customer)).await
}

pub async fn create_admin(state: &AppState) -> anyhow::Result<AuthUser> {
    insert_user(state, ROLE_ADMIN, None).await
}

pub async fn create_product(
    state: &AppState,
    price: f64,
    discount: Option<f64>,
) -> anyhow::Result<products::Model> {
    let product = products::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(format!("Test product {}", Uuid::new_v4().simple())),
        description: Set(Some("integration test product".into())),
        category: Set("Test".into()),
        image_url: Set(None),
        price: Set(price),
        discount: Set(discount),
        discounted_price: Set(discounted_price(price, discount)),
        is_visible: Set(true),
        total_sell: Set(0),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;
    Ok(product)
}
