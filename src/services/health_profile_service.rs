//! Health-profile intake.
//!
//! The intake form is submitted in four independent sections: the clinical base
//! profile (with medications) and three child sections keyed on the profile.
//! Every section write is one transaction that also flips the section's
//! completion flag on the owning user, so a flag is only ever true for a section
//! whose row was actually committed.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, Iterable, ModelTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::{Expr, OnConflict};
use uuid::Uuid;

use crate::{
    audit,
    dto::health_profile::{
        BaseProfileRequest, BaseProfileUpsert, GiHistoryRequest, GoalsMotivationRequest,
        HealthProfileDetail, MedicationInput, NutritionProfileRequest, SectionOutcome,
    },
    entity::{
        gi_histories::{self, Entity as GiHistories},
        goals_motivations::{self, Entity as GoalsMotivations},
        health_profiles::{self, Column as ProfileCol, Entity as HealthProfiles},
        medications::{self, Column as MedicationCol, Entity as Medications},
        nutrition_profiles::{self, Entity as NutritionProfiles},
        users::{Column as UserCol, Entity as Users},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{GiHistory, GoalsMotivation, HealthProfile, Medication, NutritionProfile},
    response::{ApiResponse, Meta},
    state::AppState,
};

/// The four intake sections, each owning one completion flag on `users`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeSection {
    Clinical,
    DigestiveHistory,
    Nutrition,
    Goals,
}

impl IntakeSection {
    pub fn flag_column(self) -> UserCol {
        match self {
            IntakeSection::Clinical => UserCol::HasClinicalData,
            IntakeSection::DigestiveHistory => UserCol::HasDigestiveHistory,
            IntakeSection::Nutrition => UserCol::HasDietData,
            IntakeSection::Goals => UserCol::HasGoalsData,
        }
    }

    fn action(self) -> &'static str {
        match self {
            IntakeSection::Clinical => "health_profile_upsert",
            IntakeSection::DigestiveHistory => "gi_history_upsert",
            IntakeSection::Nutrition => "nutrition_profile_upsert",
            IntakeSection::Goals => "goals_motivation_upsert",
        }
    }
}

/// What to do with the stored medication list, decided once from the request.
#[derive(Debug, Clone)]
pub enum MedicationUpdate {
    Replace(Vec<MedicationInput>),
    Keep,
}

impl MedicationUpdate {
    pub fn from_request(medications: Option<Vec<MedicationInput>>) -> Self {
        match medications {
            Some(list) if !list.is_empty() => MedicationUpdate::Replace(list),
            _ => MedicationUpdate::Keep,
        }
    }
}

/// BMI from centimetres and kilograms, rounded to one decimal.
/// Only computed when both measurements are present and positive.
pub fn compute_bmi(height_cm: Option<f64>, weight_kg: Option<f64>) -> Option<f64> {
    match (height_cm, weight_kg) {
        (Some(h), Some(w)) if h > 0.0 && w > 0.0 => {
            let meters = h / 100.0;
            let bmi = w / (meters * meters);
            Some((bmi * 10.0).round() / 10.0)
        }
        _ => None,
    }
}

async fn mark_section_complete(
    txn: &DatabaseTransaction,
    user_id: Uuid,
    section: IntakeSection,
) -> AppResult<()> {
    Users::update_many()
        .col_expr(section.flag_column(), Expr::value(true))
        .filter(UserCol::Id.eq(user_id))
        .exec(txn)
        .await?;
    Ok(())
}

/// Load a profile inside the transaction and check the caller may write to it.
async fn load_writable_profile(
    txn: &DatabaseTransaction,
    user: &AuthUser,
    profile_id: Uuid,
) -> AppResult<health_profiles::Model> {
    let profile = HealthProfiles::find_by_id(profile_id)
        .one(txn)
        .await?
        .ok_or(AppError::NotFound("Health profile"))?;
    if profile.user_id != user.user_id {
        return Err(AppError::Forbidden);
    }
    Ok(profile)
}

async fn replace_medications(
    txn: &DatabaseTransaction,
    profile_id: Uuid,
    update: MedicationUpdate,
) -> AppResult<SectionOutcome> {
    let list = match update {
        MedicationUpdate::Replace(list) => list,
        MedicationUpdate::Keep => return Ok(SectionOutcome::Skipped),
    };

    Medications::delete_many()
        .filter(MedicationCol::ProfileId.eq(profile_id))
        .exec(txn)
        .await?;

    let rows = list.into_iter().map(|m| medications::ActiveModel {
        id: Set(Uuid::new_v4()),
        profile_id: Set(profile_id),
        name: Set(m.name),
        dosage: Set(m.dosage),
        frequency: Set(m.frequency),
        start_date: Set(m.start_date),
    });
    Medications::insert_many(rows).exec(txn).await?;

    Ok(SectionOutcome::Applied)
}

pub async fn upsert_base_profile(
    state: &AppState,
    user: &AuthUser,
    payload: BaseProfileRequest,
) -> AppResult<ApiResponse<BaseProfileUpsert>> {
    let medication_update = MedicationUpdate::from_request(payload.medications);
    let bmi = compute_bmi(payload.height, payload.weight);

    let txn = state.orm.begin().await?;

    if Users::find_by_id(user.user_id).one(&txn).await?.is_none() {
        return Err(AppError::NotFound("User"));
    }

    let profile = HealthProfiles::insert(health_profiles::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.user_id),
        height: Set(payload.height),
        weight: Set(payload.weight),
        bmi: Set(bmi),
        primary_diagnosis: Set(payload.primary_diagnosis),
        diagnosis_date: Set(payload.diagnosis_date),
        created_at: NotSet,
        updated_at: Set(Utc::now().into()),
    })
    .on_conflict(
        OnConflict::column(ProfileCol::UserId)
            .update_columns([
                ProfileCol::Height,
                ProfileCol::Weight,
                ProfileCol::Bmi,
                ProfileCol::PrimaryDiagnosis,
                ProfileCol::DiagnosisDate,
                ProfileCol::UpdatedAt,
            ])
            .to_owned(),
    )
    .exec_with_returning(&txn)
    .await?;

    let medication_outcome = replace_medications(&txn, profile.id, medication_update).await?;
    mark_section_complete(&txn, user.user_id, IntakeSection::Clinical).await?;

    let medications = Medications::find()
        .filter(MedicationCol::ProfileId.eq(profile.id))
        .order_by_asc(MedicationCol::Name)
        .all(&txn)
        .await?
        .into_iter()
        .map(Medication::from)
        .collect();

    txn.commit().await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        IntakeSection::Clinical.action(),
        "health_profiles",
        serde_json::json!({ "profile_id": profile.id, "medications": medication_outcome }),
    )
    .await;

    Ok(ApiResponse::success(
        "You have successfully saved your health profile",
        BaseProfileUpsert {
            profile: HealthProfile::from(profile),
            medications,
            medication_update: medication_outcome,
        },
        Some(Meta::empty()),
    ))
}

pub async fn upsert_gi_history(
    state: &AppState,
    user: &AuthUser,
    profile_id: Uuid,
    payload: GiHistoryRequest,
) -> AppResult<ApiResponse<GiHistory>> {
    let txn = state.orm.begin().await?;
    let profile = load_writable_profile(&txn, user, profile_id).await?;

    let row = GiHistories::insert(gi_histories::ActiveModel {
        id: Set(Uuid::new_v4()),
        profile_id: Set(profile.id),
        past_issues: Set(payload.past_issues),
        onset_date: Set(payload.onset_date),
        treatment_received: Set(payload.treatment_received),
        family_conditions: Set(payload.family_conditions),
        other_relevant_conditions: Set(payload.other_relevant_conditions),
        relationship_degree: Set(payload.relationship_degree),
        surgery_type: Set(payload.surgery_type),
        surgery_outcome: Set(payload.surgery_outcome),
        surgery_date: Set(payload.surgery_date),
        bowel_movement_freq: Set(payload.bowel_movement_freq),
        bristol_stool_scale: Set(payload.bristol_stool_scale),
        bloating: Set(payload.bloating),
        gas: Set(payload.gas),
        abdominal_pain: Set(payload.abdominal_pain),
        digestive_difficulty: Set(payload.digestive_difficulty),
        diagnosed_intolerances: Set(payload.diagnosed_intolerances),
        certified_allergies: Set(payload.certified_allergies),
        tests_performed: Set(payload.tests_performed),
        updated_at: Set(Utc::now().into()),
    })
    .on_conflict(
        OnConflict::column(gi_histories::Column::ProfileId)
            .update_columns(gi_histories::Column::iter().filter(|c| {
                !matches!(c, gi_histories::Column::Id | gi_histories::Column::ProfileId)
            }))
            .to_owned(),
    )
    .exec_with_returning(&txn)
    .await?;

    mark_section_complete(&txn, profile.user_id, IntakeSection::DigestiveHistory).await?;
    txn.commit().await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        IntakeSection::DigestiveHistory.action(),
        "gi_histories",
        serde_json::json!({ "profile_id": profile.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "You have successfully saved your GI history",
        GiHistory::from(row),
        Some(Meta::empty()),
    ))
}

pub async fn upsert_nutrition_profile(
    state: &AppState,
    user: &AuthUser,
    profile_id: Uuid,
    payload: NutritionProfileRequest,
) -> AppResult<ApiResponse<NutritionProfile>> {
    let txn = state.orm.begin().await?;
    let profile = load_writable_profile(&txn, user, profile_id).await?;

    let row = NutritionProfiles::insert(nutrition_profiles::ActiveModel {
        id: Set(Uuid::new_v4()),
        profile_id: Set(profile.id),
        diet_type: Set(payload.diet_type),
        other_diet_type: Set(payload.other_diet_type),
        vegetables: Set(payload.vegetables),
        animal_proteins: Set(payload.animal_proteins),
        fruits: Set(payload.fruits),
        plant_proteins: Set(payload.plant_proteins),
        whole_grains: Set(payload.whole_grains),
        dairy_products: Set(payload.dairy_products),
        water: Set(payload.water),
        alcohol: Set(payload.alcohol),
        breakfast_time: Set(payload.breakfast_time),
        lunch_time: Set(payload.lunch_time),
        dinner_time: Set(payload.dinner_time),
        snack_time: Set(payload.snack_time),
        physical_activity_type: Set(payload.physical_activity_type),
        physical_activity_frequency: Set(payload.physical_activity_frequency),
        physical_activity_duration: Set(payload.physical_activity_duration),
        sleep_duration: Set(payload.sleep_duration),
        sleep_quality: Set(payload.sleep_quality),
        specific_sleep_issues: Set(payload.specific_sleep_issues),
        stress_level: Set(payload.stress_level),
        smoking_status: Set(payload.smoking_status),
        smoking_amount: Set(payload.smoking_amount),
        antibiotics_name: Set(payload.antibiotics_name),
        is_recently_on_antibiotics: Set(payload.is_recently_on_antibiotics),
        antibiotics_end_date: Set(payload.antibiotics_end_date),
        probiotics_name: Set(payload.probiotics_name),
        probiotics_minerals: Set(payload.probiotics_minerals),
        prebiotics_name: Set(payload.prebiotics_name),
        vitamins_name: Set(payload.vitamins_name),
        other_supplements: Set(payload.other_supplements),
        updated_at: Set(Utc::now().into()),
    })
    .on_conflict(
        OnConflict::column(nutrition_profiles::Column::ProfileId)
            .update_columns(nutrition_profiles::Column::iter().filter(|c| {
                !matches!(
                    c,
                    nutrition_profiles::Column::Id | nutrition_profiles::Column::ProfileId
                )
            }))
            .to_owned(),
    )
    .exec_with_returning(&txn)
    .await?;

    mark_section_complete(&txn, profile.user_id, IntakeSection::Nutrition).await?;
    txn.commit().await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        IntakeSection::Nutrition.action(),
        "nutrition_profiles",
        serde_json::json!({ "profile_id": profile.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "You have successfully saved your nutrition profile",
        NutritionProfile::from(row),
        Some(Meta::empty()),
    ))
}

pub async fn upsert_goals_motivation(
    state: &AppState,
    user: &AuthUser,
    profile_id: Uuid,
    payload: GoalsMotivationRequest,
) -> AppResult<ApiResponse<GoalsMotivation>> {
    let txn = state.orm.begin().await?;
    let profile = load_writable_profile(&txn, user, profile_id).await?;

    let row = GoalsMotivations::insert(goals_motivations::ActiveModel {
        id: Set(Uuid::new_v4()),
        profile_id: Set(profile.id),
        preventive_wellness: Set(payload.preventive_wellness),
        digestive_optimization: Set(payload.digestive_optimization),
        weight_management: Set(payload.weight_management),
        sports_performance: Set(payload.sports_performance),
        stress_balance: Set(payload.stress_balance),
        post_antibiotic_recovery: Set(payload.post_antibiotic_recovery),
        immune_support: Set(payload.immune_support),
        womens_health: Set(payload.womens_health),
        active_longevity: Set(payload.active_longevity),
        cardiovascular_health: Set(payload.cardiovascular_health),
        skin_health: Set(payload.skin_health),
        urinary_tract_wellness: Set(payload.urinary_tract_wellness),
        secondary_goals: Set(serde_json::to_value(payload.secondary_goals)?),
        intervention_priorities: Set(serde_json::to_value(payload.intervention_priorities)?),
        dietary: Set(serde_json::to_value(payload.dietary)?),
        supplementation: Set(serde_json::to_value(payload.supplementation)?),
        potential_obstacles: Set(serde_json::to_value(payload.potential_obstacles)?),
        support_needed: Set(serde_json::to_value(payload.support_needed)?),
        notes: Set(payload.notes),
        authorizes_data_processing: Set(payload.authorizes_data_processing),
        consents_personalized_service: Set(payload.consents_personalized_service),
        accepts_terms: Set(payload.accepts_terms),
        updated_at: Set(Utc::now().into()),
    })
    .on_conflict(
        OnConflict::column(goals_motivations::Column::ProfileId)
            .update_columns(goals_motivations::Column::iter().filter(|c| {
                !matches!(
                    c,
                    goals_motivations::Column::Id | goals_motivations::Column::ProfileId
                )
            }))
            .to_owned(),
    )
    .exec_with_returning(&txn)
    .await?;

    mark_section_complete(&txn, profile.user_id, IntakeSection::Goals).await?;
    txn.commit().await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        IntakeSection::Goals.action(),
        "goals_motivations",
        serde_json::json!({ "profile_id": profile.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "You have successfully saved your goals and motivation",
        GoalsMotivation::try_from(row)?,
        Some(Meta::empty()),
    ))
}

pub async fn get_health_profile(
    state: &AppState,
    user: &AuthUser,
    user_id: Uuid,
) -> AppResult<ApiResponse<HealthProfileDetail>> {
    user.ensure_owner_or_admin(user_id)?;

    let profile = HealthProfiles::find()
        .filter(ProfileCol::UserId.eq(user_id))
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound("Health profile"))?;

    let medications = profile
        .find_related(Medications)
        .order_by_asc(MedicationCol::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Medication::from)
        .collect();
    let gi_history = profile
        .find_related(GiHistories)
        .one(&state.orm)
        .await?
        .map(GiHistory::from);
    let nutrition_profile = profile
        .find_related(NutritionProfiles)
        .one(&state.orm)
        .await?
        .map(NutritionProfile::from);
    let goals_motivation = profile
        .find_related(GoalsMotivations)
        .one(&state.orm)
        .await?
        .map(GoalsMotivation::try_from)
        .transpose()?;

    Ok(ApiResponse::success(
        "Health profile",
        HealthProfileDetail {
            profile: HealthProfile::from(profile),
            medications,
            gi_history,
            nutrition_profile,
            goals_motivation,
        },
        Some(Meta::empty()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn medication(name: &str) -> MedicationInput {
        MedicationInput {
            name: name.into(),
            dosage: "10mg".into(),
            frequency: "daily".into(),
            start_date: None,
        }
    }

    #[test]
    fn bmi_uses_height_in_metres_and_one_decimal() {
        assert_eq!(compute_bmi(Some(180.0), Some(81.0)), Some(25.0));
        assert_eq!(compute_bmi(Some(165.0), Some(60.0)), Some(22.0));
        assert_eq!(compute_bmi(Some(170.0), Some(65.5)), Some(22.7));
    }

    #[test]
    fn bmi_is_unset_without_both_measurements() {
        assert_eq!(compute_bmi(None, Some(70.0)), None);
        assert_eq!(compute_bmi(Some(170.0), None), None);
        assert_eq!(compute_bmi(Some(0.0), Some(70.0)), None);
    }

    #[test]
    fn empty_or_missing_medication_list_keeps_existing_rows() {
        assert!(matches!(
            MedicationUpdate::from_request(None),
            MedicationUpdate::Keep
        ));
        assert!(matches!(
            MedicationUpdate::from_request(Some(vec![])),
            MedicationUpdate::Keep
        ));
        match MedicationUpdate::from_request(Some(vec![medication("a"), medication("b")])) {
            MedicationUpdate::Replace(list) => assert_eq!(list.len(), 2),
            MedicationUpdate::Keep => panic!("expected replacement"),
        }
    }

    #[test]
    fn each_section_owns_a_distinct_flag() {
        let flags = [
            IntakeSection::Clinical,
            IntakeSection::DigestiveHistory,
            IntakeSection::Nutrition,
            IntakeSection::Goals,
        ]
        .map(|s| format!("{:?}", s.flag_column()));
        for (i, a) in flags.iter().enumerate() {
            for b in flags.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
