use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "goals_motivations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
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
    // JSON string arrays
    pub secondary_goals: Json,
    pub intervention_priorities: Json,
    pub dietary: Json,
    pub supplementation: Json,
    pub potential_obstacles: Json,
    pub support_needed: Json,
    pub notes: Option<String>,
    pub authorizes_data_processing: bool,
    pub consents_personalized_service: bool,
    pub accepts_terms: bool,
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
