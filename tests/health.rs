mod common;

use axum::extract::State;
use common::FakeGateway;
use wellness_marketplace_api::routes::health::health_check;

#[tokio::test]
async fn health_check_reports_database_round_trip() -> anyhow::Result<()> {
    let Some(url) = common::database_url() else {
        return Ok(());
    };
    let state = common::setup_state(&url, FakeGateway::new()).await?;

    let response = health_check(State(state)).await;
    assert_eq!(response.0.message, "Health check");

    let data = response.0.data.expect("health data");
    assert_eq!(data.status, "ok");
    assert_eq!(data.database, "ok");
    Ok(())
}
