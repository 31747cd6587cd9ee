use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One recorded sale. Rows are appended by the upstream sales pipeline;
/// this service only reads them.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "partner_sales")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub product_id: i32,
    #[sea_orm(indexed)]
    pub partner_id: i32,
    pub quantity: i32,
    pub date_of_sale: Date,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Partner,
    Product,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Partner => Entity::belongs_to(super::partners::Entity)
                .from(Column::PartnerId)
                .to(super::partners::Column::Id)
                .into(),
            Self::Product => Entity::belongs_to(super::products::Entity)
                .from(Column::ProductId)
                .to(super::products::Column::Id)
                .into(),
        }
    }
}

impl Related<super::partners::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Partner.def()
    }
}

impl Related<super::products::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
