use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::nutrition_profiles::DietType;
use crate::models::{GiHistory, GoalsMotivation, HealthProfile, Medication, NutritionProfile};

/// Clinical base section. BMI is derived server-side and never read from the body.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct BaseProfileRequest {
    /// Centimetres.
    pub height: Option<f64>,
    /// Kilograms.
    pub weight: Option<f64>,
    pub primary_diagnosis: Option<String>,
    pub diagnosis_date: Option<NaiveDate>,
    /// When present and non-empty, replaces every stored medication.
    pub medications: Option<Vec<MedicationInput>>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct MedicationInput {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub start_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SectionOutcome {
    Applied,
    Skipped,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BaseProfileUpsert {
    pub profile: HealthProfile,
    pub medications: Vec<Medication>,
    pub medication_update: SectionOutcome,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthProfileDetail {
    pub profile: HealthProfile,
    pub medications: Vec<Medication>,
    pub gi_history: Option<GiHistory>,
    pub nutrition_profile: Option<NutritionProfile>,
    pub goals_motivation: Option<GoalsMotivation>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct GiHistoryRequest {
    pub past_issues: Option<String>,
    pub onset_date: Option<NaiveDate>,
    pub treatment_received: Option<String>,
    pub family_conditions: Option<String>,
    pub other_relevant_conditions: Option<String>,
    pub relationship_degree: Option<String>,
    pub surgery_type: Option<String>,
    pub surgery_outcome: Option<String>,
    pub surgery_date: Option<NaiveDate>,
    pub bowel_movement_freq: Option<String>,
    pub bristol_stool_scale: Option<i32>,
    pub bloating: Option<i32>,
    pub gas: Option<i32>,
    pub abdominal_pain: Option<i32>,
    pub digestive_difficulty: Option<i32>,
    pub diagnosed_intolerances: Option<String>,
    pub certified_allergies: Option<String>,
    pub tests_performed: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct NutritionProfileRequest {
    pub diet_type: Option<DietType>,
    pub other_diet_type: Option<String>,
    pub vegetables: Option<i32>,
    pub animal_proteins: Option<i32>,
    pub fruits: Option<i32>,
    pub plant_proteins: Option<i32>,
    pub whole_grains: Option<i32>,
    pub dairy_products: Option<i32>,
    pub water: Option<i32>,
    pub alcohol: Option<i32>,
    pub breakfast_time: Option<String>,
    pub lunch_time: Option<String>,
    pub dinner_time: Option<String>,
    pub snack_time: Option<String>,
    pub physical_activity_type: Option<String>,
    pub physical_activity_frequency: Option<i32>,
    pub physical_activity_duration: Option<i32>,
    pub sleep_duration: Option<f64>,
    pub sleep_quality: Option<i32>,
    pub specific_sleep_issues: Option<String>,
    pub stress_level: Option<i32>,
    pub smoking_status: Option<bool>,
    pub smoking_amount: Option<i32>,
    pub antibiotics_name: Option<String>,
    pub is_recently_on_antibiotics: Option<bool>,
    pub antibiotics_end_date: Option<NaiveDate>,
    pub probiotics_name: Option<String>,
    pub probiotics_minerals: Option<String>,
    pub prebiotics_name: Option<String>,
    pub vitamins_name: Option<String>,
    pub other_supplements: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct GoalsMotivationRequest {
    pub preventive_wellness: Option<String>,
    pub digestive_optimization: Option<String>,
    pub weight_management: Option<String>,
    pub sports_performance: Option<String>,
    pub stress_balance: Option<String>,
    pub post_antibiotic_recovery: Option<String>,
    pub immune_support: Option<String>,
    pub womens_health: Option<String>,
    pub active_longevity: Option<String>,
    pub cardiovascular_health: Option<String>,
    pub skin_health: Option<String>,
    pub urinary_tract_wellness: Option<String>,
    #[serde(default)]
    pub secondary_goals: Vec<String>,
    #[serde(default)]
    pub intervention_priorities: Vec<String>,
    #[serde(default)]
    pub dietary: Vec<String>,
    #[serde(default)]
    pub supplementation: Vec<String>,
    #[serde(default)]
    pub potential_obstacles: Vec<String>,
    #[serde(default)]
    pub support_needed: Vec<String>,
    pub notes: Option<String>,
    #[serde(default)]
    pub authorizes_data_processing: bool,
    #[serde(default)]
    pub consents_personalized_service: bool,
    #[serde(default)]
    pub accepts_terms: bool,
}
