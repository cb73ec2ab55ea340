mod common;

use common::FakeGateway;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use uuid::Uuid;
use wellness_marketplace_api::{
    dto::health_profile::{
        BaseProfileRequest, GiHistoryRequest, GoalsMotivationRequest, MedicationInput,
        NutritionProfileRequest, SectionOutcome,
    },
    entity::{
        medications::{Column as MedicationCol, Entity as Medications},
        nutrition_profiles::DietType,
        users::{self, Entity as Users},
    },
    error::AppError,
    middleware::auth::AuthUser,
    services::health_profile_service,
    state::AppState,
};

fn medication(name: &str) -> MedicationInput {
    MedicationInput {
        name: name.into(),
        dosage: "5mg".into(),
        frequency: "twice daily".into(),
        start_date: None,
    }
}

fn base(medications: Option<Vec<MedicationInput>>) -> BaseProfileRequest {
    BaseProfileRequest {
        height: Some(180.0),
        weight: Some(81.0),
        primary_diagnosis: Some("IBS".into()),
        diagnosis_date: None,
        medications,
    }
}

async fn flags(state: &AppState, user: &AuthUser) -> anyhow::Result<users::Model> {
    let model = Users::find_by_id(user.user_id)
        .one(&state.orm)
        .await?
        .expect("user row");
    Ok(model)
}

async fn medication_names(state: &AppState, profile_id: Uuid) -> anyhow::Result<Vec<String>> {
    let mut names: Vec<String> = Medications::find()
        .filter(MedicationCol::ProfileId.eq(profile_id))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|m| m.name)
        .collect();
    names.sort();
    Ok(names)
}

#[tokio::test]
async fn base_profile_computes_bmi_and_replaces_medications_only_when_given() -> anyhow::Result<()>
{
    let Some(url) = common::database_url() else {
        return Ok(());
    };
    let state = common::setup_state(&url, FakeGateway::new()).await?;
    let user = common::create_user(&state).await?;

    let first = health_profile_service::upsert_base_profile(
        &state,
        &user,
        base(Some(vec![medication("A"), medication("B")])),
    )
    .await?
    .data
    .expect("profile");
    assert_eq!(first.profile.bmi, Some(25.0));
    assert_eq!(first.medication_update, SectionOutcome::Applied);
    let profile_id = first.profile.id;
    assert_eq!(medication_names(&state, profile_id).await?, vec!["A", "B"]);

    let u = flags(&state, &user).await?;
    assert!(u.has_clinical_data);
    assert!(!u.has_digestive_history && !u.has_diet_data && !u.has_goals_data);

    // Empty list keeps what is stored.
    let second = health_profile_service::upsert_base_profile(&state, &user, base(Some(vec![])))
        .await?
        .data
        .expect("profile");
    assert_eq!(second.profile.id, profile_id);
    assert_eq!(second.medication_update, SectionOutcome::Skipped);
    assert_eq!(medication_names(&state, profile_id).await?, vec!["A", "B"]);

    // A new list replaces the whole set, and repeating it changes nothing.
    for _ in 0..2 {
        health_profile_service::upsert_base_profile(&state, &user, base(Some(vec![medication("C")])))
            .await?;
        assert_eq!(medication_names(&state, profile_id).await?, vec!["C"]);
    }

    // Without both measurements BMI is cleared.
    let partial = BaseProfileRequest {
        weight: None,
        ..base(None)
    };
    let third = health_profile_service::upsert_base_profile(&state, &user, partial)
        .await?
        .data
        .expect("profile");
    assert_eq!(third.profile.bmi, None);
    assert_eq!(medication_names(&state, profile_id).await?, vec!["C"]);
    Ok(())
}

#[tokio::test]
async fn sections_are_independent_and_flags_track_submissions() -> anyhow::Result<()> {
    let Some(url) = common::database_url() else {
        return Ok(());
    };
    let state = common::setup_state(&url, FakeGateway::new()).await?;
    let user = common::create_user(&state).await?;

    let profile_id = health_profile_service::upsert_base_profile(&state, &user, base(None))
        .await?
        .data
        .expect("profile")
        .profile
        .id;

    health_profile_service::upsert_nutrition_profile(
        &state,
        &user,
        profile_id,
        NutritionProfileRequest {
            diet_type: Some(DietType::Vegetarian),
            water: Some(8),
            ..Default::default()
        },
    )
    .await?;

    health_profile_service::upsert_gi_history(
        &state,
        &user,
        profile_id,
        GiHistoryRequest {
            bloating: Some(3),
            past_issues: Some("reflux".into()),
            ..Default::default()
        },
    )
    .await?;

    let u = flags(&state, &user).await?;
    assert!(u.has_clinical_data && u.has_digestive_history && u.has_diet_data);
    assert!(!u.has_goals_data);

    // Re-submitting one section replaces it and leaves the others alone.
    health_profile_service::upsert_gi_history(
        &state,
        &user,
        profile_id,
        GiHistoryRequest {
            bloating: Some(1),
            ..Default::default()
        },
    )
    .await?;

    let detail = health_profile_service::get_health_profile(&state, &user, user.user_id)
        .await?
        .data
        .expect("detail");
    let gi = detail.gi_history.expect("gi history");
    assert_eq!(gi.bloating, Some(1));
    assert_eq!(gi.past_issues, None);
    let nutrition = detail.nutrition_profile.expect("nutrition");
    assert_eq!(nutrition.diet_type, Some(DietType::Vegetarian));
    assert_eq!(nutrition.water, Some(8));
    assert!(detail.goals_motivation.is_none());

    health_profile_service::upsert_goals_motivation(
        &state,
        &user,
        profile_id,
        GoalsMotivationRequest {
            secondary_goals: vec!["sleep".into(), "energy".into()],
            accepts_terms: true,
            ..Default::default()
        },
    )
    .await?;

    let u = flags(&state, &user).await?;
    assert!(u.has_clinical_data && u.has_digestive_history && u.has_diet_data && u.has_goals_data);

    let goals = health_profile_service::get_health_profile(&state, &user, user.user_id)
        .await?
        .data
        .expect("detail")
        .goals_motivation
        .expect("goals");
    assert_eq!(goals.secondary_goals, vec!["sleep", "energy"]);
    assert!(goals.accepts_terms);

    let audit_rows: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM audit_logs WHERE user_id = $1 AND action = 'gi_history_upsert'",
    )
    .bind(user.user_id)
    .fetch_one(&state.pool)
    .await?;
    assert_eq!(audit_rows.0, 2);
    Ok(())
}

#[tokio::test]
async fn sections_require_an_existing_profile_owned_by_the_caller() -> anyhow::Result<()> {
    let Some(url) = common::database_url() else {
        return Ok(());
    };
    let state = common::setup_state(&url, FakeGateway::new()).await?;
    let owner = common::create_user(&state).await?;
    let stranger = common::create_user(&state).await?;
    let admin = common::create_admin(&state).await?;

    let err = health_profile_service::upsert_gi_history(
        &state,
        &owner,
        Uuid::new_v4(),
        GiHistoryRequest::default(),
    )
    .await
    .expect_err("no such profile");
    assert!(matches!(err, AppError::NotFound("Health profile")));

    let profile_id = health_profile_service::upsert_base_profile(&state, &owner, base(None))
        .await?
        .data
        .expect("profile")
        .profile
        .id;

    let err = health_profile_service::upsert_nutrition_profile(
        &state,
        &stranger,
        profile_id,
        NutritionProfileRequest::default(),
    )
    .await
    .expect_err("not the owner");
    assert!(matches!(err, AppError::Forbidden));
    assert!(!flags(&state, &owner).await?.has_diet_data);

    let err = health_profile_service::get_health_profile(&state, &stranger, owner.user_id)
        .await
        .expect_err("not the owner");
    assert!(matches!(err, AppError::Forbidden));

    let detail = health_profile_service::get_health_profile(&state, &admin, owner.user_id)
        .await?
        .data
        .expect("admin can read");
    assert_eq!(detail.profile.id, profile_id);

    let profiles = wellness_marketplace_api::entity::health_profiles::Entity::find()
        .filter(
            wellness_marketplace_api::entity::health_profiles::Column::UserId.eq(owner.user_id),
        )
        .count(&state.orm)
        .await?;
    assert_eq!(profiles, 1);
    Ok(())
}
