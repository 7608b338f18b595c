//! Common test utilities for integration tests.
//!
//! These helpers connect to a real PostgreSQL database given by
//! `TEST_DATABASE_URL`. When the variable is unset the tests return early.

#![allow(dead_code)]

use domain::models::{Customer, CustomerAddOutcome, NewCustomer};
use persistence::{DatabaseConfig, Store};
use uuid::Uuid;

/// Customer ID that no test ever creates.
pub const MISSING_CUS_ID: i32 = i32::MAX;

/// Connects to the test database and ensures the schema exists.
pub async fn test_store() -> Option<Store> {
    let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
        eprintln!("TEST_DATABASE_URL not set, skipping database test");
        return None;
    };

    let config = DatabaseConfig {
        url,
        max_connections: 2,
        min_connections: 0,
        connect_timeout_secs: 30,
        idle_timeout_secs: 600,
    };

    let store = Store::connect(&config)
        .await
        .expect("Failed to connect to test database");
    store
        .ensure_schema()
        .await
        .expect("Failed to create schema");
    Some(store)
}

/// Generate a unique email for testing.
pub fn unique_email() -> String {
    format!("test_{}@example.com", Uuid::new_v4())
}

/// Generate a unique value with a readable prefix (at most 45 characters).
pub fn unique_name(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4().simple())
        .chars()
        .take(45)
        .collect()
}

/// Creates a customer with the given phones and returns it.
pub async fn create_customer(store: &Store, name: &str, phones: &[&str]) -> Customer {
    let request =
        NewCustomer::new(name, "Tester", unique_email()).with_phones(phones.iter().copied());
    match store.customers().add_customer(&request).await.unwrap() {
        CustomerAddOutcome::Added { customer, .. } => customer,
        other => panic!("Expected customer to be added, got {:?}", other),
    }
}

/// Returns the phone numbers of a customer, sorted.
pub async fn phone_numbers(store: &Store, cus_id: i32) -> Vec<String> {
    let mut numbers: Vec<String> = store
        .phones()
        .list_for_customer(cus_id)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.phone_num)
        .collect();
    numbers.sort();
    numbers
}

/// Counts phone rows of a customer directly in the table.
pub async fn count_phone_rows(store: &Store, cus_id: i32) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM phones WHERE cus_id = $1")
        .bind(cus_id)
        .fetch_one(store.pool())
        .await
        .unwrap()
}
