//! Phone repository for database operations.

use domain::models::{Phone, PhoneAddOutcome, PhoneDeleteOutcome};
use shared::validation::validate_phone_number;
use sqlx::{Connection, PgConnection, PgPool};
use tracing::{info, warn};
use validator::ValidationErrors;

use crate::entities::PhoneEntity;
use crate::error::{ConstraintViolation, StoreError};
use crate::metrics::QueryTimer;

/// Repository for phone database operations.
#[derive(Clone)]
pub struct PhoneRepository {
    pool: PgPool,
}

impl PhoneRepository {
    /// Creates a new PhoneRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Records a phone number for a customer.
    ///
    /// An unknown customer and an already recorded number are reported as
    /// outcomes; the store is left unchanged in both cases.
    pub async fn add_phone(
        &self,
        cus_id: i32,
        phone_num: &str,
    ) -> Result<PhoneAddOutcome, StoreError> {
        validate_phone_field(phone_num)?;
        let timer = QueryTimer::new("add_phone");

        let mut conn = self.pool.acquire().await?;
        let outcome = insert_phone(&mut *conn, cus_id, phone_num).await?;

        timer.finish(phone_outcome_label(&outcome));
        Ok(outcome)
    }

    /// Deletes one phone number of a customer.
    pub async fn delete_phone(
        &self,
        cus_id: i32,
        phone_num: &str,
    ) -> Result<PhoneDeleteOutcome, StoreError> {
        let timer = QueryTimer::new("delete_phone");
        let mut tx = self.pool.begin().await?;

        // One row per existing customer; phone_id is NULL when the number is not on file
        let row = sqlx::query_as::<_, (i32, Option<i32>)>(
            r#"
            SELECT c.cus_id, p.phone_id
            FROM customers c
            LEFT JOIN phones p ON p.cus_id = c.cus_id AND p.phone_num = $2
            WHERE c.cus_id = $1
            "#,
        )
        .bind(cus_id)
        .bind(phone_num)
        .fetch_optional(&mut *tx)
        .await?;

        let outcome = match row {
            None => {
                warn!(cus_id, "No customer to delete a phone from");
                PhoneDeleteOutcome::CustomerNotFound { cus_id }
            }
            Some((_, None)) => {
                warn!(cus_id, phone_num, "Customer has no such phone number");
                PhoneDeleteOutcome::PhoneNotFound {
                    cus_id,
                    phone_num: phone_num.to_string(),
                }
            }
            Some((_, Some(phone_id))) => {
                sqlx::query("DELETE FROM phones WHERE phone_id = $1")
                    .bind(phone_id)
                    .execute(&mut *tx)
                    .await?;
                info!(cus_id, phone_num, "Phone number deleted");
                PhoneDeleteOutcome::Deleted {
                    cus_id,
                    phone_num: phone_num.to_string(),
                }
            }
        };

        tx.commit().await?;
        timer.finish(match &outcome {
            PhoneDeleteOutcome::Deleted { .. } => "deleted",
            PhoneDeleteOutcome::CustomerNotFound { .. } => "customer_not_found",
            PhoneDeleteOutcome::PhoneNotFound { .. } => "phone_not_found",
        });
        Ok(outcome)
    }

    /// Lists the phones of a customer in insertion order.
    pub async fn list_for_customer(&self, cus_id: i32) -> Result<Vec<Phone>, sqlx::Error> {
        let entities = sqlx::query_as::<_, PhoneEntity>(
            r#"
            SELECT phone_id, cus_id, phone_num
            FROM phones
            WHERE cus_id = $1
            ORDER BY phone_id
            "#,
        )
        .bind(cus_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entities.into_iter().map(Into::into).collect())
    }
}

/// Inserts one phone inside its own (sub)transaction on `conn`.
///
/// On a transaction this opens a savepoint, so a rejected phone never
/// aborts the surrounding work. Only constraint violations are recovered;
/// any other failure is returned as an error.
pub(crate) async fn insert_phone(
    conn: &mut PgConnection,
    cus_id: i32,
    phone_num: &str,
) -> Result<PhoneAddOutcome, sqlx::Error> {
    let mut tx = conn.begin().await?;

    let inserted = sqlx::query_as::<_, PhoneEntity>(
        r#"
        INSERT INTO phones (cus_id, phone_num)
        VALUES ($1, $2)
        RETURNING phone_id, cus_id, phone_num
        "#,
    )
    .bind(cus_id)
    .bind(phone_num)
    .fetch_one(&mut *tx)
    .await;

    match inserted {
        Ok(entity) => {
            tx.commit().await?;
            info!(cus_id, phone_num, "Customer phone number added");
            Ok(PhoneAddOutcome::Added(entity.into()))
        }
        Err(err) => match ConstraintViolation::of(&err) {
            Some(ConstraintViolation::ForeignKey) => {
                tx.rollback().await?;
                warn!(cus_id, "No customer for phone number");
                Ok(PhoneAddOutcome::CustomerNotFound { cus_id })
            }
            Some(ConstraintViolation::Unique) => {
                tx.rollback().await?;
                warn!(cus_id, phone_num, "Phone number already recorded for customer");
                Ok(PhoneAddOutcome::Duplicate {
                    cus_id,
                    phone_num: phone_num.to_string(),
                })
            }
            None => Err(err),
        },
    }
}

pub(crate) fn phone_outcome_label(outcome: &PhoneAddOutcome) -> &'static str {
    match outcome {
        PhoneAddOutcome::Added(_) => "added",
        PhoneAddOutcome::CustomerNotFound { .. } => "customer_not_found",
        PhoneAddOutcome::Duplicate { .. } => "duplicate",
    }
}

fn validate_phone_field(phone_num: &str) -> Result<(), ValidationErrors> {
    validate_phone_number(phone_num).map_err(|err| {
        let mut errors = ValidationErrors::new();
        errors.add("phone_num", err);
        errors
    })
}
