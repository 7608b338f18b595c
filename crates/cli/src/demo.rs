//! Example session exercising every operation.
//!
//! Re-running the demo against the same database is safe: customers that
//! already exist are looked up instead of created.

use anyhow::{Context, Result};
use domain::models::{CustomerAddOutcome, CustomerSearch, CustomerUpdate, NewCustomer};
use persistence::Store;

use crate::report::{OutputFormat, Report};

/// Serial IDs start at 1, so no customer ever has this ID.
const UNKNOWN_CUS_ID: i32 = 0;

fn section(number: u32, title: &str) {
    println!("#{} {}", number, title);
}

fn show(report: &impl Report, format: OutputFormat) -> Result<()> {
    println!("{}", report.render(format)?);
    Ok(())
}

/// Adds the customer, or resolves its ID if it already exists.
async fn add_or_find(store: &Store, request: &NewCustomer, format: OutputFormat) -> Result<i32> {
    let outcome = store.customers().add_customer(request).await?;
    show(&outcome, format)?;

    if let CustomerAddOutcome::Added { customer, .. } = &outcome {
        return Ok(customer.cus_id);
    }

    let search = CustomerSearch::default()
        .name(request.name.as_str())
        .surname(request.surname.as_str())
        .e_mail(request.e_mail.as_str());
    let found = store.search().find_customers(&search).await?;
    found
        .customers
        .first()
        .map(|c| c.cus_id)
        .context("duplicate customer vanished before lookup")
}

pub async fn run(store: &Store, format: OutputFormat) -> Result<()> {
    section(1, "Creating structures.");
    store.ensure_schema().await?;
    println!("Structures created successfully.");

    section(2, "Customers adding.");
    let john = NewCustomer::new("John", "Johnson", "a@b.c")
        .with_phones(["+7-953-405-76-45", "3324562"]);
    let john_id = add_or_find(store, &john, format).await?;
    add_or_find(store, &john, format).await?;
    let jackson_id = add_or_find(
        store,
        &NewCustomer::new("Jane", "Jackson", "d@e.f").with_phones(["+7-952-305-37-88", "3325739"]),
        format,
    )
    .await?;
    add_or_find(
        store,
        &NewCustomer::new("Jane", "Robinson", "g@h.i").with_phones(["3329236"]),
        format,
    )
    .await?;

    section(3, "Phone number adding.");
    let phones = store.phones();
    show(&phones.add_phone(UNKNOWN_CUS_ID, "+7-953-768-64-11").await?, format)?;
    show(&phones.add_phone(john_id, "+7-953-405-76-45").await?, format)?;
    show(&phones.add_phone(john_id, "+7-953-768-64-11").await?, format)?;

    section(4, "Customer changing.");
    let customers = store.customers();
    show(
        &customers
            .update_customer(UNKNOWN_CUS_ID, &CustomerUpdate::default())
            .await?,
        format,
    )?;
    let update = CustomerUpdate::default()
        .surname("Johnson")
        .phones(["+7-952-305-37-88", "3324562"]);
    show(&customers.update_customer(jackson_id, &update).await?, format)?;

    section(5, "Phone deleting.");
    show(&phones.delete_phone(UNKNOWN_CUS_ID, "").await?, format)?;
    show(&phones.delete_phone(john_id, "123").await?, format)?;
    show(&phones.delete_phone(john_id, "+7-953-405-76-45").await?, format)?;

    section(6, "Customer deleting.");
    show(&customers.delete_customer(UNKNOWN_CUS_ID).await?, format)?;
    show(&customers.delete_customer(john_id).await?, format)?;

    section(7, "Customer searching.");
    let search = store.search();
    let searches = [
        CustomerSearch::default().name("Sigizmund").surname("Zilberstein"),
        CustomerSearch::default().name("Jane"),
        CustomerSearch::default().name("Jane").phone("+7-952-305-37-88"),
    ];
    for criteria in &searches {
        show(&search.find_customers(criteria).await?, format)?;
    }

    Ok(())
}
