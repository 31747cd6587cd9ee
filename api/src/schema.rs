//! GraphQL contract over the repository. Resolvers validate nothing
//! themselves and surface repository errors verbatim.

use std::sync::Arc;

use async_graphql::{
    Context, EmptySubscription, ErrorExtensions, InputObject, Object, Schema, SimpleObject,
};
use chrono::NaiveDate;
use entity::{company_types, partners};
use platform_api::internal_error;
use sea_orm::{DatabaseConnection, EntityTrait};
use tracing::instrument;

use crate::repository::{self, PartnerDraft, SaleRecord};
use crate::report;

pub type SchemaType = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(db: Arc<DatabaseConnection>) -> SchemaType {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(db)
        .finish()
}

pub struct QueryRoot;
pub struct MutationRoot;

#[derive(Clone, Debug, SimpleObject)]
#[graphql(name = "Partner")]
pub struct PartnerNode {
    pub id: i32,
    #[graphql(name = "companyName")]
    pub company_name: String,
    #[graphql(name = "typeId")]
    pub type_id: Option<i32>,
    /// Company type name; empty when the type is unset or unknown.
    #[graphql(name = "typeName")]
    pub type_name: String,
    #[graphql(name = "directorFullName")]
    pub director_full_name: String,
    pub phone: String,
    pub rating: f64,
    pub discount: i32,
}

impl PartnerNode {
    fn from_model(model: partners::Model, type_name: Option<String>) -> Self {
        Self {
            id: model.id,
            company_name: model.company_name,
            type_id: model.type_id,
            type_name: type_name.unwrap_or_default(),
            director_full_name: model.director_full_name,
            phone: model.phone,
            rating: model.rating,
            discount: model.discount,
        }
    }
}

#[derive(Clone, Debug, SimpleObject)]
#[graphql(name = "CompanyType")]
pub struct CompanyTypeNode {
    pub id: i32,
    pub name: String,
}

impl From<company_types::Model> for CompanyTypeNode {
    fn from(model: company_types::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

#[derive(Clone, Debug, SimpleObject)]
#[graphql(name = "SaleRecord")]
pub struct SaleRecordNode {
    pub description: String,
    pub quantity: i32,
    #[graphql(name = "companyName")]
    pub company_name: String,
    #[graphql(name = "dateOfSale")]
    pub date_of_sale: NaiveDate,
}

impl From<SaleRecord> for SaleRecordNode {
    fn from(record: SaleRecord) -> Self {
        Self {
            description: record.description.unwrap_or_default(),
            quantity: record.quantity,
            company_name: record.company_name.unwrap_or_default(),
            date_of_sale: record.date_of_sale,
        }
    }
}

#[derive(Clone, Debug, SimpleObject)]
#[graphql(name = "ReportSummary")]
pub struct ReportSummaryNode {
    pub path: String,
    pub pages: i32,
    pub rows: i32,
}

impl From<report::ReportSummary> for ReportSummaryNode {
    fn from(summary: report::ReportSummary) -> Self {
        Self {
            path: summary.path.display().to_string(),
            pages: summary.pages as i32,
            rows: summary.rows as i32,
        }
    }
}

/// Partner fields as entered in the form. No discount field: the stored
/// discount is always derived from sales history.
#[derive(Clone, Debug, InputObject)]
pub struct PartnerInput {
    #[graphql(name = "companyName")]
    pub company_name: String,
    #[graphql(name = "typeId")]
    pub type_id: Option<i32>,
    #[graphql(name = "directorFullName")]
    pub director_full_name: String,
    pub phone: String,
    pub rating: String,
}

impl From<PartnerInput> for PartnerDraft {
    fn from(input: PartnerInput) -> Self {
        Self {
            company_name: input.company_name,
            type_id: input.type_id,
            director_full_name: input.director_full_name,
            phone: input.phone,
            rating: input.rating,
        }
    }
}

#[Object]
impl QueryRoot {
    /// Partners joined with their company type.
    #[instrument(name = "graphql.partners", skip_all)]
    async fn partners(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<PartnerNode>> {
        let db = database(ctx)?;
        let rows = repository::list_partners(db.as_ref())
            .await
            .map_err(|err| err.extend())?;
        Ok(rows
            .into_iter()
            .map(|(partner, kind)| PartnerNode::from_model(partner, kind.map(|k| k.name)))
            .collect())
    }

    /// Sale history, newest first.
    #[instrument(name = "graphql.history", skip_all)]
    async fn history(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<SaleRecordNode>> {
        let db = database(ctx)?;
        let rows = repository::list_history(db.as_ref())
            .await
            .map_err(|err| err.extend())?;
        Ok(rows.into_iter().map(SaleRecordNode::from).collect())
    }

    #[instrument(name = "graphql.company_types", skip_all)]
    async fn company_types(
        &self,
        ctx: &Context<'_>,
    ) -> async_graphql::Result<Vec<CompanyTypeNode>> {
        let db = database(ctx)?;
        let rows = repository::list_company_types(db.as_ref())
            .await
            .map_err(|err| err.extend())?;
        Ok(rows.into_iter().map(CompanyTypeNode::from).collect())
    }

    #[instrument(name = "graphql.version", skip_all)]
    async fn version(&self) -> async_graphql::Result<String> {
        Ok(env!("CARGO_PKG_VERSION").to_string())
    }
}

#[Object]
impl MutationRoot {
    /// Validate the input, recompute the discount from cumulative sales, and
    /// insert a partner (no `id`) or fully replace the row at `id`.
    #[instrument(name = "graphql.save_partner", skip_all)]
    async fn save_partner(
        &self,
        ctx: &Context<'_>,
        input: PartnerInput,
        id: Option<i32>,
    ) -> async_graphql::Result<PartnerNode> {
        let db = database(ctx)?;
        let saved = repository::save_partner(db.as_ref(), input.into(), id)
            .await
            .map_err(|err| err.extend())?;
        let type_name = match saved.type_id {
            Some(type_id) => company_types::Entity::find_by_id(type_id)
                .one(db.as_ref())
                .await
                .map_err(internal_error)?
                .map(|k| k.name),
            None => None,
        };
        Ok(PartnerNode::from_model(saved, type_name))
    }

    /// One-shot report export; overwrites the previous document.
    #[instrument(name = "graphql.generate_report", skip_all)]
    async fn generate_report(&self, ctx: &Context<'_>) -> async_graphql::Result<ReportSummaryNode> {
        let db = database(ctx)?;
        let summary = report::generate(db.as_ref())
            .await
            .map_err(|err| err.extend())?;
        Ok(summary.into())
    }
}

fn database(ctx: &Context<'_>) -> async_graphql::Result<Arc<DatabaseConnection>> {
    ctx.data::<Arc<DatabaseConnection>>()
        .cloned()
        .map_err(|_| internal_error(anyhow::anyhow!("missing database connection")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_graphql::Request;
    use serde_json::json;

    #[tokio::test]
    async fn version_query_answers_without_touching_the_store() {
        let schema = build_schema(Arc::new(DatabaseConnection::default()));
        let response = schema.execute(Request::new("{ version }")).await;
        assert!(response.errors.is_empty());
        let body = response.data.into_json().unwrap();
        assert_eq!(body, json!({"version": env!("CARGO_PKG_VERSION")}));
    }
}
