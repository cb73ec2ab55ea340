use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "gi_histories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub profile_id: Uuid,
    pub past_issues: Option<String>,
    pub onset_date: Option<Date>,
    pub treatment_received: Option<String>,
    pub family_conditions: Option<String>,
    pub other_relevant_conditions: Option<String>,
    pub relationship_degree: Option<String>,
    pub surgery_type: Option<String>,
    pub surgery_outcome: Option<String>,
    pub surgery_date: Option<Date>,
    pub bowel_movement_freq: Option<String>,
    pub bristol_stool_scale: Option<i32>,
    pub bloating: Option<i32>,
    pub gas: Option<i32>,
    pub abdominal_pain: Option<i32>,
    pub digestive_difficulty: Option<i32>,
    pub diagnosed_intolerances: Option<String>,
    pub certified_allergies: Option<String>,
    pub tests_performed: Option<String>,
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
