mod common;

use chrono::{Duration, Utc};
use common::FakeGateway;
use uuid::Uuid;
use wellness_marketplace_api::{
    dto::{
        appointments::CreateAppointmentRequest,
        blogs::{CreateBlogRequest, UpdateBlogRequest},
        partners::CreatePartnerRequest,
    },
    entity::appointments::AppointmentStatus,
    error::AppError,
    middleware::auth::AuthUser,
    models::Partner,
    services::{appointment_service, blog_service, partner_service},
    state::AppState,
};

fn blog_request(content: &str) -> CreateBlogRequest {
    CreateBlogRequest {
        title: "Fibre and the microbiome".into(),
        content: content.into(),
        author: Some("Editorial".into()),
        category: Some("Nutrition".into()),
        image_url: None,
    }
}

async fn open_partner(state: &AppState, owner: &AuthUser) -> anyhow::Result<Partner> {
    let partner = partner_service::create_partner(
        state,
        owner,
        CreatePartnerRequest {
            title: "Dietitian".into(),
            profile_photo: None,
            phone_number: None,
            price_per_consultation: 45.0,
            available_day_start: "Monday".into(),
            available_day_end: "Thursday".into(),
            available_time: Vec::new(),
        },
    )
    .await?
    .data
    .expect("partner");
    Ok(partner)
}

fn booking(partner_id: Uuid, patient_id: Option<Uuid>, days_ahead: i64) -> CreateAppointmentRequest {
    CreateAppointmentRequest {
        partner_id,
        patient_id,
        date: Utc::now().date_naive() + Duration::days(days_ahead),
        time_slot: "10:00-10:30".into(),
    }
}

#[tokio::test]
async fn admins_publish_and_edit_blogs_with_reading_stats() -> anyhow::Result<()> {
    let Some(url) = common::database_url() else {
        return Ok(());
    };
    let state = common::setup_state(&url, FakeGateway::new()).await?;
    let admin = common::create_admin(&state).await?;
    let reader = common::create_user(&state).await?;

    let err = blog_service::create_blog(&state, &reader, blog_request("short"))
        .await
        .expect_err("readers cannot publish");
    assert!(matches!(err, AppError::Forbidden));

    let err = blog_service::create_blog(&state, &admin, blog_request("   "))
        .await
        .expect_err("empty content");
    assert!(matches!(err, AppError::BadRequest(_)));

    let long = vec!["kefir"; 250].join(" ");
    let blog = blog_service::create_blog(&state, &admin, blog_request(&long))
        .await?
        .data
        .expect("blog");
    assert_eq!(blog.word_count, 250);
    assert_eq!(blog.reading_time, 2);

    let updated = blog_service::update_blog(
        &state,
        &admin,
        blog.id,
        UpdateBlogRequest {
            content: Some("Three short words".into()),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("blog");
    assert_eq!(updated.word_count, 3);
    assert_eq!(updated.reading_time, 1);
    assert_eq!(updated.title, blog.title);
    assert!(updated.updated_at >= blog.updated_at);

    let listed = blog_service::list_blogs(&state).await?.data.expect("blogs");
    assert!(listed.items.iter().any(|b| b.id == blog.id));

    let fetched = blog_service::get_blog(&state, blog.id).await?.data.expect("blog");
    assert_eq!(fetched.content, "Three short words");

    blog_service::delete_blog(&state, &admin, blog.id).await?;
    let err = blog_service::get_blog(&state, blog.id)
        .await
        .expect_err("deleted");
    assert!(matches!(err, AppError::NotFound("Blog")));

    let err = blog_service::delete_blog(&state, &admin, blog.id)
        .await
        .expect_err("already deleted");
    assert!(matches!(err, AppError::NotFound("Blog")));

    let err = blog_service::update_blog(&state, &admin, Uuid::new_v4(), UpdateBlogRequest::default())
        .await
        .expect_err("unknown blog");
    assert!(matches!(err, AppError::NotFound("Blog")));
    Ok(())
}

#[tokio::test]
async fn booking_starts_pending_and_checks_partner_and_patient() -> anyhow::Result<()> {
    let Some(url) = common::database_url() else {
        return Ok(());
    };
    let state = common::setup_state(&url, FakeGateway::new()).await?;
    let owner = common::create_user(&state).await?;
    let patient = common::create_user(&state).await?;
    let admin = common::create_admin(&state).await?;
    let partner = open_partner(&state, &owner).await?;

    let appointment =
        appointment_service::create_appointment(&state, &patient, booking(partner.id, None, 3))
            .await?
            .data
            .expect("appointment");
    assert_eq!(appointment.status, AppointmentStatus::Pending);
    assert_eq!(appointment.patient_id, patient.user_id);
    assert_eq!(appointment.partner_id, partner.id);

    let err = appointment_service::create_appointment(
        &state,
        &patient,
        booking(Uuid::new_v4(), None, 3),
    )
    .await
    .expect_err("unknown partner");
    assert!(matches!(err, AppError::NotFound("Partner")));

    let err = appointment_service::create_appointment(
        &state,
        &admin,
        booking(partner.id, Some(Uuid::new_v4()), 3),
    )
    .await
    .expect_err("unknown patient");
    assert!(matches!(err, AppError::NotFound("Patient")));

    let err = appointment_service::create_appointment(
        &state,
        &patient,
        booking(partner.id, Some(owner.user_id), 3),
    )
    .await
    .expect_err("booking for someone else");
    assert!(matches!(err, AppError::Forbidden));

    let err =
        appointment_service::create_appointment(&state, &patient, booking(partner.id, None, -1))
            .await
            .expect_err("past date");
    assert!(matches!(err, AppError::BadRequest(_)));

    // Admins book on a patient's behalf.
    appointment_service::create_appointment(
        &state,
        &admin,
        booking(partner.id, Some(patient.user_id), 1),
    )
    .await?;

    let listed = appointment_service::list_partner_appointments(&state, &owner, partner.id)
        .await?
        .data
        .expect("appointments");
    assert_eq!(listed.items.len(), 2);
    assert!(listed.items[0].date <= listed.items[1].date);

    let err = appointment_service::list_partner_appointments(&state, &patient, partner.id)
        .await
        .expect_err("not the partner");
    assert!(matches!(err, AppError::Forbidden));
    Ok(())
}
