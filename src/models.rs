use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::{
    appointments::{self, AppointmentStatus},
    blogs, cart_items, gi_histories, goals_motivations, health_profiles, medications,
    nutrition_profiles::{self, DietType},
    orders::{self, PaymentStatus},
    partners, products, users,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub has_clinical_data: bool,
    pub has_digestive_history: bool,
    pub has_diet_data: bool,
    pub has_goals_data: bool,
    pub is_partner: bool,
    pub has_payment_customer: bool,
    pub created_at: DateTime<Utc>,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            first_name: model.first_name,
            last_name: model.last_name,
            role: model.role,
            has_clinical_data: model.has_clinical_data,
            has_digestive_history: model.has_digestive_history,
            has_diet_data: model.has_diet_data,
            has_goals_data: model.has_goals_data,
            is_partner: model.is_partner,
            has_payment_customer: model.payment_customer_id.is_some(),
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub image_url: Option<String>,
    pub price: f64,
    pub discount: Option<f64>,
    pub discounted_price: Option<f64>,
    pub is_visible: bool,
    pub total_sell: i32,
    pub created_at: DateTime<Utc>,
}

impl From<products::Model> for Product {
    fn from(model: products::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            category: model.category,
            image_url: model.image_url,
            price: model.price,
            discount: model.discount,
            discounted_price: model.discounted_price,
            is_visible: model.is_visible,
            total_sell: model.total_sell,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CartItem {
    pub id: Uuid,
    pub product_id: Uuid,
    pub user_id: Uuid,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
}

impl From<cart_items::Model> for CartItem {
    fn from(model: cart_items::Model) -> Self {
        Self {
            id: model.id,
            product_id: model.product_id,
            user_id: model.user_id,
            quantity: model.quantity,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

/// One entry of an order's line-item snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub serial_number: String,
    pub products: Vec<LineItem>,
    pub total_price: f64,
    pub delivery_fee: f64,
    pub is_confirmed: bool,
    pub payment_status: PaymentStatus,
    pub payment_method: Option<String>,
    pub mobile_number: Option<String>,
    pub country: Option<String>,
    pub address: Option<String>,
    pub apartment: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<orders::Model> for Order {
    type Error = serde_json::Error;

    fn try_from(model: orders::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            user_id: model.user_id,
            serial_number: model.serial_number,
            products: serde_json::from_value(model.products)?,
            total_price: model.total_price,
            delivery_fee: model.delivery_fee,
            is_confirmed: model.is_confirmed,
            payment_status: model.payment_status,
            payment_method: model.payment_method,
            mobile_number: model.mobile_number,
            country: model.country,
            address: model.address,
            apartment: model.apartment,
            city: model.city,
            state: model.state,
            zip_code: model.zip_code,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailableTime {
    pub available_time_start: String,
    pub available_time_end: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Partner {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub profile_photo: Option<String>,
    pub phone_number: Option<String>,
    pub price_per_consultation: f64,
    pub available_day_start: String,
    pub available_day_end: String,
    pub available_time: Vec<AvailableTime>,
    pub is_visible: bool,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<partners::Model> for Partner {
    type Error = serde_json::Error;

    fn try_from(model: partners::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            user_id: model.user_id,
            title: model.title,
            profile_photo: model.profile_photo,
            phone_number: model.phone_number,
            price_per_consultation: model.price_per_consultation,
            available_day_start: model.available_day_start,
            available_day_end: model.available_day_end,
            available_time: serde_json::from_value(model.available_time)?,
            is_visible: model.is_visible,
            created_at: model.created_at.with_timezone(&Utc),
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Appointment {
    pub id: Uuid,
    pub partner_id: Uuid,
    pub patient_id: Uuid,
    pub date: NaiveDate,
    pub time_slot: String,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
}

impl From<appointments::Model> for Appointment {
    fn from(model: appointments::Model) -> Self {
        Self {
            id: model.id,
            partner_id: model.partner_id,
            patient_id: model.patient_id,
            date: model.date,
            time_slot: model.time_slot,
            status: model.status,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Blog {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub word_count: i32,
    pub reading_time: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<blogs::Model> for Blog {
    fn from(model: blogs::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            content: model.content,
            author: model.author,
            category: model.category,
            image_url: model.image_url,
            word_count: model.word_count,
            reading_time: model.reading_time,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Medication {
    pub id: Uuid,
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub start_date: Option<NaiveDate>,
}

impl From<medications::Model> for Medication {
    fn from(model: medications::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            dosage: model.dosage,
            frequency: model.frequency,
            start_date: model.start_date,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub bmi: Option<f64>,
    pub primary_diagnosis: Option<String>,
    pub diagnosis_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<health_profiles::Model> for HealthProfile {
    fn from(model: health_profiles::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            height: model.height,
            weight: model.weight,
            bmi: model.bmi,
            primary_diagnosis: model.primary_diagnosis,
            diagnosis_date: model.diagnosis_date,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GiHistory {
    pub id: Uuid,
    pub profile_id: Uuid,
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
    pub updated_at: DateTime<Utc>,
}

impl From<gi_histories::Model> for GiHistory {
    fn from(model: gi_histories::Model) -> Self {
        Self {
            id: model.id,
            profile_id: model.profile_id,
            past_issues: model.past_issues,
            onset_date: model.onset_date,
            treatment_received: model.treatment_received,
            family_conditions: model.family_conditions,
            other_relevant_conditions: model.other_relevant_conditions,
            relationship_degree: model.relationship_degree,
            surgery_type: model.surgery_type,
            surgery_outcome: model.surgery_outcome,
            surgery_date: model.surgery_date,
            bowel_movement_freq: model.bowel_movement_freq,
            bristol_stool_scale: model.bristol_stool_scale,
            bloating: model.bloating,
            gas: model.gas,
            abdominal_pain: model.abdominal_pain,
            digestive_difficulty: model.digestive_difficulty,
            diagnosed_intolerances: model.diagnosed_intolerances,
            certified_allergies: model.certified_allergies,
            tests_performed: model.tests_performed,
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NutritionProfile {
    pub id: Uuid,
    pub profile_id: Uuid,
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
    pub updated_at: DateTime<Utc>,
}

impl From<nutrition_profiles::Model> for NutritionProfile {
    fn from(model: nutrition_profiles::Model) -> Self {
        Self {
            id: model.id,
            profile_id: model.profile_id,
            diet_type: model.diet_type,
            other_diet_type: model.other_diet_type,
            vegetables: model.vegetables,
            animal_proteins: model.animal_proteins,
            fruits: model.fruits,
            plant_proteins: model.plant_proteins,
            whole_grains: model.whole_grains,
            dairy_products: model.dairy_products,
            water: model.water,
            alcohol: model.alcohol,
            breakfast_time: model.breakfast_time,
            lunch_time: model.lunch_time,
            dinner_time: model.dinner_time,
            snack_time: model.snack_time,
            physical_activity_type: model.physical_activity_type,
            physical_activity_frequency: model.physical_activity_frequency,
            physical_activity_duration: model.physical_activity_duration,
            sleep_duration: model.sleep_duration,
            sleep_quality: model.sleep_quality,
            specific_sleep_issues: model.specific_sleep_issues,
            stress_level: model.stress_level,
            smoking_status: model.smoking_status,
            smoking_amount: model.smoking_amount,
            antibiotics_name: model.antibiotics_name,
            is_recently_on_antibiotics: model.is_recently_on_antibiotics,
            antibiotics_end_date: model.antibiotics_end_date,
            probiotics_name: model.probiotics_name,
            probiotics_minerals: model.probiotics_minerals,
            prebiotics_name: model.prebiotics_name,
            vitamins_name: model.vitamins_name,
            other_supplements: model.other_supplements,
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GoalsMotivation {
    pub id: Uuid,
    pub profile_id: Uuid,
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
    pub secondary_goals: Vec<String>,
    pub intervention_priorities: Vec<String>,
    pub dietary: Vec<String>,
    pub supplementation: Vec<String>,
    pub potential_obstacles: Vec<String>,
    pub support_needed: Vec<String>,
    pub notes: Option<String>,
    pub authorizes_data_processing: bool,
    pub consents_personalized_service: bool,
    pub accepts_terms: bool,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<goals_motivations::Model> for GoalsMotivation {
    type Error = serde_json::Error;

    fn try_from(model: goals_motivations::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            profile_id: model.profile_id,
            preventive_wellness: model.preventive_wellness,
            digestive_optimization: model.digestive_optimization,
            weight_management: model.weight_management,
            sports_performance: model.sports_performance,
            stress_balance: model.stress_balance,
            post_antibiotic_recovery: model.post_antibiotic_recovery,
            immune_support: model.immune_support,
            womens_health: model.womens_health,
            active_longevity: model.active_longevity,
            cardiovascular_health: model.cardiovascular_health,
            skin_health: model.skin_health,
            urinary_tract_wellness: model.urinary_tract_wellness,
            secondary_goals: serde_json::from_value(model.secondary_goals)?,
            intervention_priorities: serde_json::from_value(model.intervention_priorities)?,
            dietary: serde_json::from_value(model.dietary)?,
            supplementation: serde_json::from_value(model.supplementation)?,
            potential_obstacles: serde_json::from_value(model.potential_obstacles)?,
            support_needed: serde_json::from_value(model.support_needed)?,
            notes: model.notes,
            authorizes_data_processing: model.authorizes_data_processing,
            consents_personalized_service: model.consents_personalized_service,
            accepts_terms: model.accepts_terms,
            updated_at: model.updated_at.with_timezone(&Utc),
        })
    }
}
