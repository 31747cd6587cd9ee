//! Partner repository: every read and write the presentation layer may
//! perform, expressed as plain functions over an injected connection.

use chrono::Utc;
use entity::{company_types, partner_sales, partners, products};
use platform_api::{ApiError, ApiResult};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    FromQueryResult, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
    TransactionTrait,
    prelude::{Date, DateTimeWithTimeZone},
};

use crate::discount::compute_discount;

/// Client-supplied partner fields. There is no discount field: the stored
/// value is derived from sales history on every save.
#[derive(Clone, Debug, Default)]
pub struct PartnerDraft {
    pub company_name: String,
    pub type_id: Option<i32>,
    pub director_full_name: String,
    pub phone: String,
    pub rating: String,
}

#[derive(Debug)]
struct ValidDraft {
    company_name: String,
    type_id: i32,
    director_full_name: String,
    phone: String,
    rating: f64,
}

impl PartnerDraft {
    fn validate(self) -> ApiResult<ValidDraft> {
        let company_name = required("Company name", &self.company_name)?;
        let director_full_name = required("Director full name", &self.director_full_name)?;
        let phone = required("Phone", &self.phone)?;
        let type_id = self
            .type_id
            .ok_or_else(|| ApiError::validation("Company type is required"))?;
        let rating = self
            .rating
            .trim()
            .parse::<f64>()
            .map_err(|_| ApiError::validation("Rating must be a number"))?;
        Ok(ValidDraft {
            company_name,
            type_id,
            director_full_name,
            phone,
            rating,
        })
    }
}

fn required(field: &str, value: &str) -> ApiResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// One row of the sale history projection. Product and partner come through
/// left joins, so either may be absent on damaged reference data.
#[derive(Clone, Debug, FromQueryResult)]
pub struct SaleRecord {
    pub description: Option<String>,
    pub quantity: i32,
    pub company_name: Option<String>,
    pub date_of_sale: Date,
}

#[derive(Debug, FromQueryResult)]
struct SalesTotal {
    total: Option<i64>,
}

/// Total quantity sold to the partner currently named `company_name`.
/// Returns 0 when no sales match.
pub async fn total_sales_for<C: ConnectionTrait>(db: &C, company_name: &str) -> ApiResult<i64> {
    let row = partner_sales::Entity::find()
        .join(JoinType::LeftJoin, partner_sales::Relation::Partner.def())
        .filter(partners::Column::CompanyName.eq(company_name))
        .select_only()
        .column_as(partner_sales::Column::Quantity.sum(), "total")
        .into_model::<SalesTotal>()
        .one(db)
        .await
        .map_err(db_error)?;
    Ok(row.and_then(|r| r.total).unwrap_or(0))
}

/// Create a partner, or fully replace the row at `existing_id`. The discount
/// read and the write share one transaction so the stored discount always
/// matches the sales total it was computed from.
pub async fn save_partner<C>(
    db: &C,
    draft: PartnerDraft,
    existing_id: Option<i32>,
) -> ApiResult<partners::Model>
where
    C: ConnectionTrait + TransactionTrait,
{
    let valid = draft.validate()?;
    let txn = db.begin().await.map_err(db_error)?;
    let total = total_sales_for(&txn, &valid.company_name).await?;
    let discount = compute_discount(total);
    let now: DateTimeWithTimeZone = Utc::now().into();

    let model = match existing_id {
        None => {
            let active = partners::ActiveModel {
                company_name: Set(valid.company_name),
                type_id: Set(Some(valid.type_id)),
                director_full_name: Set(valid.director_full_name),
                phone: Set(valid.phone),
                rating: Set(valid.rating),
                discount: Set(discount),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            };
            let insert = partners::Entity::insert(active)
                .exec(&txn)
                .await
                .map_err(db_error)?;
            partners::Entity::find_by_id(insert.last_insert_id)
                .one(&txn)
                .await
                .map_err(db_error)?
                .ok_or_else(|| {
                    ApiError::internal(anyhow::anyhow!("inserted partner row is missing"))
                })?
        }
        Some(id) => {
            let existing = partners::Entity::find_by_id(id)
                .one(&txn)
                .await
                .map_err(db_error)?
                .ok_or(ApiError::NotFound)?;
            let mut active: partners::ActiveModel = existing.into();
            active.company_name = Set(valid.company_name);
            active.type_id = Set(Some(valid.type_id));
            active.director_full_name = Set(valid.director_full_name);
            active.phone = Set(valid.phone);
            active.rating = Set(valid.rating);
            active.discount = Set(discount);
            active.updated_at = Set(now);
            active.update(&txn).await.map_err(db_error)?
        }
    };

    txn.commit().await.map_err(db_error)?;
    tracing::info!(partner_id = model.id, discount, "partner saved");
    Ok(model)
}

/// Partners with their company type, unknown types included (left join).
/// Ordered by id, which is insertion order for store-assigned identifiers.
pub async fn list_partners<C: ConnectionTrait>(
    db: &C,
) -> ApiResult<Vec<(partners::Model, Option<company_types::Model>)>> {
    partners::Entity::find()
        .find_also_related(company_types::Entity)
        .order_by_asc(partners::Column::Id)
        .all(db)
        .await
        .map_err(db_error)
}

/// Sale history, newest first.
pub async fn list_history<C: ConnectionTrait>(db: &C) -> ApiResult<Vec<SaleRecord>> {
    partner_sales::Entity::find()
        .join(JoinType::LeftJoin, partner_sales::Relation::Product.def())
        .join(JoinType::LeftJoin, partner_sales::Relation::Partner.def())
        .select_only()
        .column_as(products::Column::Description, "description")
        .column(partner_sales::Column::Quantity)
        .column_as(partners::Column::CompanyName, "company_name")
        .column(partner_sales::Column::DateOfSale)
        .order_by_desc(partner_sales::Column::DateOfSale)
        .order_by_desc(partner_sales::Column::Id)
        .into_model::<SaleRecord>()
        .all(db)
        .await
        .map_err(db_error)
}

pub async fn list_company_types<C: ConnectionTrait>(
    db: &C,
) -> ApiResult<Vec<company_types::Model>> {
    company_types::Entity::find()
        .order_by_asc(company_types::Column::Id)
        .all(db)
        .await
        .map_err(db_error)
}

pub(crate) fn db_error(err: DbErr) -> ApiError {
    tracing::error!(error = %err, "store operation failed");
    ApiError::internal(anyhow::Error::new(err))
}
