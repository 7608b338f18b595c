//! Schema initialization.
//!
//! Creates the customers and phones tables with their constraints and
//! indexes. Every statement is guarded with `IF NOT EXISTS`, so running the
//! initializer again leaves the schema unchanged.

use sqlx::PgPool;
use tracing::info;

/// Advisory lock key held while the schema is created.
const SCHEMA_LOCK_KEY: i64 = 0x6375_7374_6f6d_6572;

const SCHEMA_STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS customers (
        cus_id SERIAL PRIMARY KEY,
        name VARCHAR(50) NOT NULL,
        surname VARCHAR(100) NOT NULL,
        e_mail VARCHAR(100) NOT NULL,
        UNIQUE (name, surname, e_mail)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_cus_name ON customers (name)",
    "CREATE INDEX IF NOT EXISTS idx_cus_surname ON customers (surname)",
    "CREATE INDEX IF NOT EXISTS idx_cus_email ON customers (e_mail)",
    r#"
    CREATE TABLE IF NOT EXISTS phones (
        cus_id INTEGER REFERENCES customers (cus_id),
        phone_id SERIAL PRIMARY KEY,
        phone_num VARCHAR(100) NOT NULL,
        UNIQUE (cus_id, phone_num)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_phone_num ON phones (phone_num)",
];

/// Ensures both tables and their indexes exist.
///
/// Concurrent callers serialize on a transaction-scoped advisory lock.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(SCHEMA_LOCK_KEY)
        .execute(&mut *tx)
        .await?;

    for statement in SCHEMA_STATEMENTS {
        sqlx::query(*statement).execute(&mut *tx).await?;
    }

    tx.commit().await?;
    info!("Schema ensured");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statements_are_idempotent() {
        for statement in SCHEMA_STATEMENTS {
            assert!(
                statement.contains("IF NOT EXISTS"),
                "statement is not guarded: {}",
                statement
            );
        }
    }

    #[test]
    fn test_customers_table_created_before_phones() {
        let customers = SCHEMA_STATEMENTS
            .iter()
            .position(|s| s.contains("TABLE IF NOT EXISTS customers"));
        let phones = SCHEMA_STATEMENTS
            .iter()
            .position(|s| s.contains("TABLE IF NOT EXISTS phones"));
        assert!(customers.is_some());
        assert!(customers < phones);
    }
}
