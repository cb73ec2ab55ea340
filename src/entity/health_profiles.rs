use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "health_profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_id: Uuid,
    /// Centimetres.
    pub height: Option<f64>,
    /// Kilograms.
    pub weight: Option<f64>,
    pub bmi: Option<f64>,
    pub primary_diagnosis: Option<String>,
    pub diagnosis_date: Option<Date>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    Users,
    #[sea_orm(has_many = "super::medications::Entity")]
    Medications,
    #[sea_orm(has_one = "super::gi_histories::Entity")]
    GiHistories,
    #[sea_orm(has_one = "super::nutrition_profiles::Entity")]
    NutritionProfiles,
    #[sea_orm(has_one = "super::goals_motivations::Entity")]
    GoalsMotivations,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::medications::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Medications.def()
    }
}

impl Related<super::gi_histories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GiHistories.def()
    }
}

impl Related<super::nutrition_profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::NutritionProfiles.def()
    }
}

impl Related<super::goals_motivations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GoalsMotivations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
