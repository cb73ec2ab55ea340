use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum DietType {
    #[sea_orm(string_value = "Omnivore")]
    Omnivore,
    #[sea_orm(string_value = "Vegetarian")]
    Vegetarian,
    #[sea_orm(string_value = "Vegan")]
    Vegan,
    #[sea_orm(string_value = "Other")]
    Other,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "nutrition_profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
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
    pub antibiotics_end_date: Option<Date>,
    pub probiotics_name: Option<String>,
    pub probiotics_minerals: Option<String>,
    pub prebiotics_name: Option<String>,
    pub vitamins_name: Option<String>,
    pub other_supplements: Option<String>,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::health_profiles::Entity",
        from = "Column::ProfileId",
        to = "super::health_profiles::Column::Id",
        on_delete = "Cascade"
    )]
    HealthProfiles,
}

impl Related<super::health_profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HealthProfiles.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
