use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A business partner. `discount` is derived from cumulative sales and
/// rewritten on every save; it is never accepted from callers.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "partners")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(indexed)]
    pub company_name: String,
    pub type_id: Option<i32>,
    pub director_full_name: String,
    pub phone: String,
    pub rating: f64,
    pub discount: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    CompanyType,
    Sale,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::CompanyType => Entity::belongs_to(super::company_types::Entity)
                .from(Column::TypeId)
                .to(super::company_types::Column::Id)
                .into(),
            Self::Sale => Entity::has_many(super::partner_sales::Entity).into(),
        }
    }
}

impl Related<super::company_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CompanyType.def()
    }
}

impl Related<super::partner_sales::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sale.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
