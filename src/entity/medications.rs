use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "medications")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub profile_id: Uuid,
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub start_date: Option<Date>,
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
