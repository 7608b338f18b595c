//! Command line surface.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use domain::models::{CustomerSearch, CustomerUpdate, NewCustomer};
use persistence::Store;

use crate::demo;
use crate::report::{OutputFormat, Report};

#[derive(Debug, Parser)]
#[command(author, version, about = "Manage customers and their phone numbers", long_about = None)]
pub struct Cli {
    /// Report format
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create the tables and indexes if absent
    InitSchema,

    /// Add a customer with optional phone numbers
    AddCustomer {
        #[arg(long)]
        name: String,
        #[arg(long)]
        surname: String,
        #[arg(long)]
        e_mail: String,
        /// Phone number; repeat for several
        #[arg(long = "phone")]
        phones: Vec<String>,
    },

    /// Change a customer; omitted fields keep their values
    UpdateCustomer {
        cus_id: i32,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        surname: Option<String>,
        #[arg(long)]
        e_mail: Option<String>,
        /// Replacement phone number; repeat for several. Replaces all phones.
        #[arg(long = "phone")]
        phones: Vec<String>,
    },

    /// Delete a customer and all of its phones
    DeleteCustomer { cus_id: i32 },

    /// Add a phone number to a customer
    AddPhone { cus_id: i32, phone: String },

    /// Delete a phone number of a customer
    DeletePhone { cus_id: i32, phone: String },

    /// Search customers; every given criterion must match
    Find(FindArgs),

    /// Replay the example session
    Demo,
}

#[derive(Debug, Args)]
pub struct FindArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub surname: Option<String>,
    #[arg(long)]
    pub e_mail: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
}

impl From<FindArgs> for CustomerSearch {
    fn from(args: FindArgs) -> Self {
        Self {
            name: args.name,
            surname: args.surname,
            e_mail: args.e_mail,
            phone: args.phone,
        }
    }
}

fn print(report: &impl Report, format: OutputFormat) -> Result<()> {
    println!("{}", report.render(format)?);
    Ok(())
}

/// Runs one command against the store.
///
/// The schema is ensured first, so every command works on an empty database.
pub async fn run(store: &Store, command: Command, format: OutputFormat) -> Result<()> {
    store.ensure_schema().await?;

    match command {
        Command::InitSchema => {
            println!("Structures created successfully.");
        }
        Command::AddCustomer {
            name,
            surname,
            e_mail,
            phones,
        } => {
            let request = NewCustomer::new(name, surname, e_mail).with_phones(phones);
            print(&store.customers().add_customer(&request).await?, format)?;
        }
        Command::UpdateCustomer {
            cus_id,
            name,
            surname,
            e_mail,
            phones,
        } => {
            let update = CustomerUpdate {
                name,
                surname,
                e_mail,
                phones: Some(phones),
            };
            print(
                &store.customers().update_customer(cus_id, &update).await?,
                format,
            )?;
        }
        Command::DeleteCustomer { cus_id } => {
            print(&store.customers().delete_customer(cus_id).await?, format)?;
        }
        Command::AddPhone { cus_id, phone } => {
            print(&store.phones().add_phone(cus_id, &phone).await?, format)?;
        }
        Command::DeletePhone { cus_id, phone } => {
            print(&store.phones().delete_phone(cus_id, &phone).await?, format)?;
        }
        Command::Find(args) => {
            let search = CustomerSearch::from(args);
            print(&store.search().find_customers(&search).await?, format)?;
        }
        Command::Demo => demo::run(store, format).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add_customer() {
        let cli = Cli::parse_from([
            "customer-directory",
            "add-customer",
            "--name",
            "John",
            "--surname",
            "Johnson",
            "--e-mail",
            "a@b.c",
            "--phone",
            "+1",
            "--phone",
            "+2",
        ]);

        match cli.command {
            Command::AddCustomer {
                name,
                surname,
                e_mail,
                phones,
            } => {
                assert_eq!(name, "John");
                assert_eq!(surname, "Johnson");
                assert_eq!(e_mail, "a@b.c");
                assert_eq!(phones, vec!["+1", "+2"]);
            }
            other => panic!("Unexpected command: {:?}", other),
        }
        assert_eq!(cli.output, OutputFormat::Text);
    }

    #[test]
    fn test_parse_update_customer_partial() {
        let cli = Cli::parse_from([
            "customer-directory",
            "update-customer",
            "2",
            "--surname",
            "Johnson",
            "--output",
            "json",
        ]);

        match cli.command {
            Command::UpdateCustomer {
                cus_id,
                name,
                surname,
                e_mail,
                phones,
            } => {
                assert_eq!(cus_id, 2);
                assert_eq!(name, None);
                assert_eq!(surname.as_deref(), Some("Johnson"));
                assert_eq!(e_mail, None);
                assert!(phones.is_empty());
            }
            other => panic!("Unexpected command: {:?}", other),
        }
        assert_eq!(cli.output, OutputFormat::Json);
    }

    #[test]
    fn test_find_args_to_search() {
        let cli = Cli::parse_from([
            "customer-directory",
            "find",
            "--name",
            "Jane",
            "--phone",
            "+1",
        ]);
        let Command::Find(args) = cli.command else {
            panic!("Expected find command");
        };

        let search = CustomerSearch::from(args);
        assert_eq!(search, CustomerSearch::default().name("Jane").phone("+1"));
    }

    #[test]
    fn test_parse_phone_commands() {
        let cli = Cli::parse_from(["customer-directory", "delete-phone", "1", "123"]);
        assert!(matches!(
            cli.command,
            Command::DeletePhone { cus_id: 1, ref phone } if phone == "123"
        ));
    }
}
