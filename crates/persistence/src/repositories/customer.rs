//! Customer repository for database operations.

use domain::models::{
    Customer, CustomerAddOutcome, CustomerDeleteOutcome, CustomerSearch, CustomerUpdate,
    CustomerUpdateOutcome, NewCustomer, SearchResult,
};
use sqlx::PgPool;
use tracing::{info, warn};
use validator::Validate;

use super::phone::insert_phone;
use super::search::CustomerSearchRepository;
use crate::entities::CustomerEntity;
use crate::error::{is_unique_violation, StoreError};
use crate::metrics::QueryTimer;

/// Repository for customer database operations.
///
/// Every mutating operation runs in a single transaction, phones included.
#[derive(Clone)]
pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates a customer and records its phones.
    ///
    /// If a customer with the same name, surname and e-mail exists, nothing
    /// is inserted and a duplicate is reported. Each phone is recorded
    /// independently: a rejected phone is reported in the outcome and does not
    /// undo the customer or its other phones.
    pub async fn add_customer(
        &self,
        request: &NewCustomer,
    ) -> Result<CustomerAddOutcome, StoreError> {
        request.validate()?;
        let timer = QueryTimer::new("add_customer");
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_scalar::<_, i32>(
            r#"
            SELECT cus_id
            FROM customers
            WHERE name = $1 AND surname = $2 AND e_mail = $3
            "#,
        )
        .bind(&request.name)
        .bind(&request.surname)
        .bind(&request.e_mail)
        .fetch_optional(&mut *tx)
        .await?;

        if let Some(cus_id) = existing {
            tx.rollback().await?;
            warn!(cus_id, "Customer with the same name, surname and e-mail exists");
            timer.finish("duplicate");
            return Ok(duplicate(request));
        }

        let inserted = sqlx::query_as::<_, CustomerEntity>(
            r#"
            INSERT INTO customers (name, surname, e_mail)
            VALUES ($1, $2, $3)
            RETURNING cus_id, name, surname, e_mail
            "#,
        )
        .bind(&request.name)
        .bind(&request.surname)
        .bind(&request.e_mail)
        .fetch_one(&mut *tx)
        .await;

        // A concurrent writer may have inserted the same triple after our check
        let customer: Customer = match inserted {
            Ok(entity) => entity.into(),
            Err(err) if is_unique_violation(&err) => {
                tx.rollback().await?;
                warn!("Customer inserted concurrently with the same name, surname and e-mail");
                timer.finish("duplicate");
                return Ok(duplicate(request));
            }
            Err(err) => return Err(err.into()),
        };

        let mut phones = Vec::with_capacity(request.phones.len());
        for phone_num in &request.phones {
            phones.push(insert_phone(&mut *tx, customer.cus_id, phone_num).await?);
        }

        tx.commit().await?;
        info!(cus_id = customer.cus_id, phones = phones.len(), "Customer added");
        timer.finish("added");

        Ok(CustomerAddOutcome::Added { customer, phones })
    }

    /// Applies a partial update to a customer.
    ///
    /// Fields absent from `update` keep their stored values. A non-empty
    /// phone list replaces every phone of the customer.
    pub async fn update_customer(
        &self,
        cus_id: i32,
        update: &CustomerUpdate,
    ) -> Result<CustomerUpdateOutcome, StoreError> {
        update.validate()?;
        let timer = QueryTimer::new("update_customer");
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, CustomerEntity>(
            r#"
            SELECT cus_id, name, surname, e_mail
            FROM customers
            WHERE cus_id = $1
            FOR UPDATE
            "#,
        )
        .bind(cus_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(current) = current else {
            tx.rollback().await?;
            warn!(cus_id, "No customer to update");
            timer.finish("not_found");
            return Ok(CustomerUpdateOutcome::NotFound { cus_id });
        };

        let merged = update.apply_to(&current.into());

        let updated = sqlx::query_as::<_, CustomerEntity>(
            r#"
            UPDATE customers
            SET name = $1, surname = $2, e_mail = $3
            WHERE cus_id = $4
            RETURNING cus_id, name, surname, e_mail
            "#,
        )
        .bind(&merged.name)
        .bind(&merged.surname)
        .bind(&merged.e_mail)
        .bind(cus_id)
        .fetch_one(&mut *tx)
        .await;

        let customer: Customer = match updated {
            Ok(entity) => entity.into(),
            Err(err) if is_unique_violation(&err) => {
                tx.rollback().await?;
                warn!(cus_id, "Update collides with another customer");
                timer.finish("conflict");
                return Ok(CustomerUpdateOutcome::Conflict { cus_id });
            }
            Err(err) => return Err(err.into()),
        };

        let phones = match update.replacement_phones() {
            Some(replacement) => {
                let removed = sqlx::query("DELETE FROM phones WHERE cus_id = $1")
                    .bind(cus_id)
                    .execute(&mut *tx)
                    .await?
                    .rows_affected();

                let mut outcomes = Vec::with_capacity(replacement.len());
                for phone_num in replacement {
                    outcomes.push(insert_phone(&mut *tx, cus_id, phone_num).await?);
                }
                info!(cus_id, removed, added = outcomes.len(), "Customer phones replaced");
                Some(outcomes)
            }
            None => None,
        };

        tx.commit().await?;
        info!(cus_id, "Customer data changed");
        timer.finish("updated");

        Ok(CustomerUpdateOutcome::Updated { customer, phones })
    }

    /// Deletes a customer together with all of its phones.
    pub async fn delete_customer(
        &self,
        cus_id: i32,
    ) -> Result<CustomerDeleteOutcome, StoreError> {
        let timer = QueryTimer::new("delete_customer");
        let mut tx = self.pool.begin().await?;

        let exists = sqlx::query_scalar::<_, i32>(
            "SELECT cus_id FROM customers WHERE cus_id = $1 FOR UPDATE",
        )
        .bind(cus_id)
        .fetch_optional(&mut *tx)
        .await?;

        if exists.is_none() {
            tx.rollback().await?;
            warn!(cus_id, "No customer to delete");
            timer.finish("not_found");
            return Ok(CustomerDeleteOutcome::NotFound { cus_id });
        }

        let phones_removed = sqlx::query("DELETE FROM phones WHERE cus_id = $1")
            .bind(cus_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        sqlx::query("DELETE FROM customers WHERE cus_id = $1")
            .bind(cus_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        info!(cus_id, phones_removed, "Customer deleted");
        timer.finish("deleted");

        Ok(CustomerDeleteOutcome::Deleted {
            cus_id,
            phones_removed,
        })
    }

    /// Finds a customer by ID.
    pub async fn find_by_id(&self, cus_id: i32) -> Result<Option<Customer>, sqlx::Error> {
        let entity = sqlx::query_as::<_, CustomerEntity>(
            r#"
            SELECT cus_id, name, surname, e_mail
            FROM customers
            WHERE cus_id = $1
            "#,
        )
        .bind(cus_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }

    /// Searches customers; see [`CustomerSearchRepository::find_customers`].
    pub async fn find_customers(
        &self,
        search: &CustomerSearch,
    ) -> Result<SearchResult, sqlx::Error> {
        CustomerSearchRepository::new(self.pool.clone())
            .find_customers(search)
            .await
    }
}

fn duplicate(request: &NewCustomer) -> CustomerAddOutcome {
    CustomerAddOutcome::Duplicate {
        name: request.name.clone(),
        surname: request.surname.clone(),
        e_mail: request.e_mail.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_carries_triple() {
        let request = NewCustomer::new("John", "Johnson", "a@b.c").with_phones(["+1"]);
        assert_eq!(
            duplicate(&request),
            CustomerAddOutcome::Duplicate {
                name: "John".to_string(),
                surname: "Johnson".to_string(),
                e_mail: "a@b.c".to_string(),
            }
        );
    }
}
