mod common;

use common::FakeGateway;
use jsonwebtoken::{DecodingKey, Validation, decode};
use uuid::Uuid;
use wellness_marketplace_api::{
    dto::auth::{Claims, LoginRequest, RegisterRequest},
    error::AppError,
    middleware::auth::AuthUser,
    services::auth_service,
};

fn register_request(email: &str) -> RegisterRequest {
    RegisterRequest {
        email: email.into(),
        password: "correct horse".into(),
        first_name: "Ada".into(),
        last_name: "Walker".into(),
    }
}

#[tokio::test]
async fn register_login_and_read_back_the_caller() -> anyhow::Result<()> {
    let Some(url) = common::database_url() else {
        return Ok(());
    };
    let state = common::setup_state(&url, FakeGateway::new()).await?;
    let email = format!("Walker-{}@Example.com", Uuid::new_v4().simple());

    let user = auth_service::register_user(&state, register_request(&email))
        .await?
        .data
        .expect("user");
    assert_eq!(user.email, email.to_lowercase());
    assert!(!user.has_clinical_data && !user.is_partner && !user.has_payment_customer);

    // E-mails compare case-insensitively.
    let err = auth_service::register_user(&state, register_request(&email.to_uppercase()))
        .await
        .expect_err("duplicate e-mail");
    assert!(matches!(err, AppError::Conflict(_)));

    let err = auth_service::login_user(
        &state,
        LoginRequest {
            email: email.clone(),
            password: "wrong".into(),
        },
    )
    .await
    .expect_err("bad password");
    assert!(matches!(err, AppError::BadRequest(_)));

    let token = auth_service::login_user(
        &state,
        LoginRequest {
            email: email.clone(),
            password: "correct horse".into(),
        },
    )
    .await?
    .data
    .expect("token")
    .token;
    let raw = token.strip_prefix("Bearer ").expect("bearer prefix");
    let claims = decode::<Claims>(
        raw,
        &DecodingKey::from_secret(state.config.jwt_secret.as_bytes()),
        &Validation::default(),
    )?
    .claims;
    assert_eq!(claims.sub, user.id.to_string());
    assert_eq!(claims.role, "user");

    let caller = AuthUser {
        user_id: user.id,
        role: claims.role,
    };
    let me = auth_service::get_me(&state, &caller)
        .await?
        .data
        .expect("me");
    assert_eq!(me.id, user.id);
    Ok(())
}
