//! `SQLite` implementation of [`SubstationRepository`].

use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, QueryBuilder, Row, Sqlite, SqlitePool};

use substations_app::ports::SubstationRepository;
use substations_domain::catalog::SubstationType;
use substations_domain::error::RegistryError;
use substations_domain::id::SubstationId;
use substations_domain::listing::{SubstationFilter, fold};
use substations_domain::substation::{NewSubstation, Substation};

use crate::error::StorageError;

/// Wrapper for converting database rows into domain types without polluting
/// domain structs with database concerns.
struct Wrapper(Substation);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let address: String = row.try_get("address")?;
        let kind: String = row.try_get("type")?;
        let apartments_count: i64 = row.try_get("apartments_count")?;
        let power: f64 = row.try_get("power")?;
        let last_repair_date: String = row.try_get("last_repair_date")?;

        let apartments_count = u32::try_from(apartments_count)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let last_repair_date = NaiveDate::parse_from_str(&last_repair_date, DATE_FORMAT)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(Substation {
            id: SubstationId::new(id),
            address,
            kind: SubstationType::from_stored(kind),
            apartments_count,
            power,
            last_repair_date,
        }))
    }
}

const DATE_FORMAT: &str = "%Y-%m-%d";

const INSERT: &str = r"
    INSERT INTO substations (address, address_folded, type, apartments_count, power, last_repair_date)
    VALUES (?, ?, ?, ?, ?, ?)
    RETURNING id
";

const SELECT_COUNT: &str = "SELECT COUNT(*) FROM substations";
const SELECT_ROWS: &str =
    "SELECT id, address, type, apartments_count, power, last_repair_date FROM substations";

/// Escape `LIKE` metacharacters with `!` so the term matches literally.
fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        match c {
            '!' | '%' | '_' => {
                out.push('!');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// Append the `WHERE` clause for `filter`, binding every user value.
fn push_filter(query: &mut QueryBuilder<'_, Sqlite>, filter: &SubstationFilter) {
    let mut separator = " WHERE ";
    if let Some(term) = &filter.search {
        query
            .push(separator)
            .push("address_folded LIKE ")
            .push_bind(format!("%{}%", escape_like(term.folded())))
            .push(" ESCAPE '!'");
        separator = " AND ";
    }
    if let Some(kind) = &filter.kind {
        query
            .push(separator)
            .push("type = ")
            .push_bind(kind.as_str().to_owned());
    }
}

/// `SQLite`-backed substation repository.
#[derive(Clone)]
pub struct SqliteSubstationRepository {
    pool: SqlitePool,
}

impl SqliteSubstationRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl SubstationRepository for SqliteSubstationRepository {
    async fn insert(&self, substation: NewSubstation) -> Result<Substation, RegistryError> {
        let id: i64 = sqlx::query_scalar(INSERT)
            .bind(&substation.address)
            .bind(fold(&substation.address))
            .bind(substation.kind.as_str())
            .bind(i64::from(substation.apartments_count))
            .bind(substation.power)
            .bind(substation.last_repair_date.format(DATE_FORMAT).to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(substation.with_id(SubstationId::new(id)))
    }

    async fn count(&self, filter: &SubstationFilter) -> Result<u64, RegistryError> {
        let mut query = QueryBuilder::<Sqlite>::new(SELECT_COUNT);
        push_filter(&mut query, filter);

        let total: i64 = query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(u64::try_from(total).unwrap_or_default())
    }

    async fn page(
        &self,
        filter: &SubstationFilter,
        limit: u32,
        offset: u64,
    ) -> Result<Vec<Substation>, RegistryError> {
        let mut query = QueryBuilder::<Sqlite>::new(SELECT_ROWS);
        push_filter(&mut query, filter);
        query
            .push(" ORDER BY id DESC LIMIT ")
            .push_bind(i64::from(limit))
            .push(" OFFSET ")
            .push_bind(i64::try_from(offset).unwrap_or(i64::MAX));

        let rows: Vec<Wrapper> = query
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }
}
