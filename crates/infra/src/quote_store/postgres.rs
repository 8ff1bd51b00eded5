use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use roofline_catalog::SolutionId;
use roofline_core::{Money, QuoteId, RoofArea};
use roofline_quotes::QuoteLead;

use super::{QuoteStore, QuoteStoreError};
use crate::db::is_unavailable;

const UNIQUE_VIOLATION: &str = "23505";

const LEAD_COLUMNS: &str = "id, customer_name, phone, city, solution_id, solution_title, \
                            area, total_cash, total_installments, created_at";

#[derive(Debug, Clone)]
pub struct PostgresQuoteStore {
    pool: PgPool,
}

impl PostgresQuoteStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_sqlx_error(err: sqlx::Error) -> QuoteStoreError {
    match err {
        ref e if is_unavailable(e) => QuoteStoreError::Unavailable(e.to_string()),
        e @ (sqlx::Error::ColumnDecode { .. } | sqlx::Error::ColumnNotFound(_)) => {
            QuoteStoreError::Decode(e.to_string())
        }
        e => QuoteStoreError::Query(e.to_string()),
    }
}

fn to_db_total(total: Money) -> Result<i64, QuoteStoreError> {
    i64::try_from(total.units())
        .map_err(|_| QuoteStoreError::Query(format!("total {} exceeds BIGINT", total.units())))
}

fn from_db_total(raw: i64) -> Result<Money, QuoteStoreError> {
    u64::try_from(raw)
        .map(Money::new)
        .map_err(|_| QuoteStoreError::Decode(format!("negative total {raw}")))
}

fn lead_from_row(row: &PgRow) -> Result<QuoteLead, QuoteStoreError> {
    let id: Uuid = row.try_get("id").map_err(map_sqlx_error)?;
    let solution_id: String = row.try_get("solution_id").map_err(map_sqlx_error)?;
    let area: f64 = row.try_get("area").map_err(map_sqlx_error)?;
    let total_cash: i64 = row.try_get("total_cash").map_err(map_sqlx_error)?;
    let total_installments: i64 = row.try_get("total_installments").map_err(map_sqlx_error)?;

    Ok(QuoteLead {
        id: QuoteId::from_uuid(id),
        customer_name: row.try_get("customer_name").map_err(map_sqlx_error)?,
        phone: row.try_get("phone").map_err(map_sqlx_error)?,
        city: row.try_get("city").map_err(map_sqlx_error)?,
        solution_id: SolutionId::parse(&solution_id)
            .map_err(|e| QuoteStoreError::Decode(e.to_string()))?,
        solution_title: row.try_get("solution_title").map_err(map_sqlx_error)?,
        area: RoofArea::new(area).map_err(|e| QuoteStoreError::Decode(e.to_string()))?,
        total_cash: from_db_total(total_cash)?,
        total_installments: from_db_total(total_installments)?,
        created_at: row.try_get("created_at").map_err(map_sqlx_error)?,
    })
}

#[async_trait]
impl QuoteStore for PostgresQuoteStore {
    #[instrument(skip(self, lead), fields(quote_id = %lead.id), err)]
    async fn append(&self, lead: &QuoteLead) -> Result<(), QuoteStoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO quote_leads (
                id, customer_name, phone, city, solution_id, solution_title,
                area, total_cash, total_installments, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(*lead.id.as_uuid())
        .bind(&lead.customer_name)
        .bind(&lead.phone)
        .bind(&lead.city)
        .bind(lead.solution_id.as_str())
        .bind(&lead.solution_title)
        .bind(lead.area.square_meters())
        .bind(to_db_total(lead.total_cash)?)
        .bind(to_db_total(lead.total_installments)?)
        .bind(lead.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db)) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                Err(QuoteStoreError::Duplicate(lead.id))
            }
            Err(e) => Err(map_sqlx_error(e)),
        }
    }

    #[instrument(skip(self), err)]
    async fn recent(&self, limit: usize) -> Result<Vec<QuoteLead>, QuoteStoreError> {
        let sql = format!(
            "SELECT {LEAD_COLUMNS} FROM quote_leads ORDER BY created_at DESC, id DESC LIMIT $1"
        );
        let rows = sqlx::query(&sql)
            .bind(i64::try_from(limit).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        rows.iter().map(lead_from_row).collect()
    }

    #[instrument(skip(self, id), fields(quote_id = %id), err)]
    async fn get(&self, id: &QuoteId) -> Result<Option<QuoteLead>, QuoteStoreError> {
        let sql = format!("SELECT {LEAD_COLUMNS} FROM quote_leads WHERE id = $1");
        let row = sqlx::query(&sql)
            .bind(*id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row.as_ref().map(lead_from_row).transpose()
    }
}
