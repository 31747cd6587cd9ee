//! One-shot sale-history report: a paginated plain-text document written to
//! a fixed path, overwriting any previous export.

use std::fs;
use std::path::{Path, PathBuf};

use platform_api::{ApiError, ApiResult};
use sea_orm::ConnectionTrait;

use crate::repository::{self, SaleRecord};

/// Output location, relative to the working directory.
pub const REPORT_FILE: &str = "partner_product_report.txt";

const REPORT_TITLE: &str = "Отчет по продукции партнеров";
const REPORT_RULE: &str = "-----------------------------------";

// Vertical cursor model. Page one renders the two header lines at 800/780
// and starts the body at 750; later pages start the body at 800. Each row
// advances the cursor by 20, and a row that would land below the 50-unit
// bottom margin opens a new page instead.
const PAGE_TOP: i32 = 800;
const FIRST_BODY_TOP: i32 = 750;
const LINE_STEP: i32 = 20;
const BOTTOM_MARGIN: i32 = 50;

#[derive(Clone, Debug)]
pub struct ReportSummary {
    pub path: PathBuf,
    pub pages: usize,
    pub rows: usize,
}

fn format_row(record: &SaleRecord) -> String {
    format!(
        "Продукция: {}, Количество: {}, Партнер: {}, Дата: {}",
        record.description.as_deref().unwrap_or(""),
        record.quantity,
        record.company_name.as_deref().unwrap_or(""),
        record.date_of_sale,
    )
}

/// Lay the rows out into pages.
pub fn render_pages(records: &[SaleRecord]) -> Vec<String> {
    let mut pages = Vec::new();
    let mut lines = vec![REPORT_TITLE.to_string(), REPORT_RULE.to_string()];
    let mut cursor = FIRST_BODY_TOP;
    for record in records {
        if cursor < BOTTOM_MARGIN {
            pages.push(std::mem::take(&mut lines).join("\n"));
            cursor = PAGE_TOP;
        }
        lines.push(format_row(record));
        cursor -= LINE_STEP;
    }
    pages.push(lines.join("\n"));
    pages
}

/// Export the report to [`REPORT_FILE`].
pub async fn generate<C: ConnectionTrait>(db: &C) -> ApiResult<ReportSummary> {
    generate_to(db, Path::new(REPORT_FILE)).await
}

pub async fn generate_to<C: ConnectionTrait>(db: &C, path: &Path) -> ApiResult<ReportSummary> {
    let records = repository::list_history(db).await?;
    let pages = render_pages(&records);
    let document = pages.join("\u{0c}\n");
    fs::write(path, document).map_err(|err| ApiError::internal(anyhow::Error::new(err)))?;
    tracing::info!(
        path = %path.display(),
        pages = pages.len(),
        rows = records.len(),
        "report written"
    );
    Ok(ReportSummary {
        path: path.to_path_buf(),
        pages: pages.len(),
        rows: records.len(),
    })
}
