//! Reference data for fresh databases: the well-known company types and a
//! starter product catalog. Both tables are maintained externally in
//! production, so seeding only touches empty tables.

use anyhow::Result;
use entity::{company_types, products};
use platform_db::DbPool;
use sea_orm::{ActiveValue::Set, EntityTrait, PaginatorTrait};
use tracing::info;

const COMPANY_TYPES: &[&str] = &["ЗАО", "ООО", "ПАО", "ОАО"];

const PRODUCTS: &[&str] = &[
    "Паркетная доска Ясень темный",
    "Инженерная доска Дуб Французская елка",
    "Ламинат Дуб дымчато-белый 33 класс",
    "Ламинат Дуб серый 32 класс",
    "Пробковое напольное клеевое покрытие 31 класс",
];

pub async fn run(pool: &DbPool) -> Result<()> {
    if company_types::Entity::find().count(pool).await? == 0 {
        let rows = COMPANY_TYPES.iter().map(|name| company_types::ActiveModel {
            name: Set((*name).to_string()),
            ..Default::default()
        });
        company_types::Entity::insert_many(rows).exec(pool).await?;
        info!(count = COMPANY_TYPES.len(), "company types installed");
    } else {
        info!("company types already present, skipping");
    }

    if products::Entity::find().count(pool).await? == 0 {
        let rows = PRODUCTS.iter().map(|description| products::ActiveModel {
            description: Set((*description).to_string()),
            ..Default::default()
        });
        products::Entity::insert_many(rows).exec(pool).await?;
        info!(count = PRODUCTS.len(), "products installed");
    } else {
        info!("products already present, skipping");
    }

    Ok(())
}
