//! Customer search across the customers and phones tables.

use domain::models::{CustomerSearch, SearchResult};
use sqlx::PgPool;
use tracing::debug;

use crate::entities::CustomerEntity;
use crate::metrics::QueryTimer;

/// Single search entry point combining optional criteria.
#[derive(Clone)]
pub struct CustomerSearchRepository {
    pool: PgPool,
}

impl CustomerSearchRepository {
    /// Creates a new CustomerSearchRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Finds customers matching every provided criterion, ordered by ID.
    ///
    /// An absent criterion places no constraint on its field, so an empty
    /// search returns all customers. The phone criterion matches customers
    /// owning at least one phone with exactly that number.
    pub async fn find_customers(
        &self,
        search: &CustomerSearch,
    ) -> Result<SearchResult, sqlx::Error> {
        let timer = QueryTimer::new("find_customers");

        let entities = sqlx::query_as::<_, CustomerEntity>(
            r#"
            SELECT c.cus_id, c.name, c.surname, c.e_mail
            FROM customers c
            WHERE ($1::text IS NULL OR c.name = $1)
              AND ($2::text IS NULL OR c.surname = $2)
              AND ($3::text IS NULL OR c.e_mail = $3)
              AND ($4::text IS NULL OR EXISTS (
                    SELECT 1
                    FROM phones p
                    WHERE p.cus_id = c.cus_id AND p.phone_num = $4
                  ))
            ORDER BY c.cus_id
            "#,
        )
        .bind(&search.name)
        .bind(&search.surname)
        .bind(&search.e_mail)
        .bind(&search.phone)
        .fetch_all(&self.pool)
        .await?;

        let result = SearchResult {
            customers: entities.into_iter().map(Into::into).collect(),
        };

        debug!(count = result.count(), "Customer search completed");
        timer.finish(if result.is_empty() { "empty" } else { "found" });
        Ok(result)
    }
}
