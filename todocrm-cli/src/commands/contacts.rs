//! Contact commands

use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use todocrm_core::{ContactChanges, ContactRepo, NewContact};

use super::{print_envelope, DbArgs};

#[derive(Parser, Debug)]
pub struct ContactsArgs {
    #[command(flatten)]
    pub db: DbArgs,

    #[command(subcommand)]
    pub command: ContactsCommand,
}

/// Optional contact details
#[derive(Args, Debug, Default)]
pub struct ContactDetails {
    /// Phone number
    #[arg(long)]
    pub phone: Option<String>,
    /// Company name
    #[arg(long)]
    pub company: Option<String>,
    /// Free-form notes (max 1000 characters)
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ContactsCommand {
    /// List all contacts, newest first
    List,
    /// Create a contact
    Add {
        /// Contact name
        #[arg(long)]
        name: String,
        /// Contact email (stored lowercased)
        #[arg(long)]
        email: String,
        #[command(flatten)]
        details: ContactDetails,
    },
    /// Change fields of an existing contact; an empty optional value clears it
    Update {
        /// Contact id
        id: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New email
        #[arg(long)]
        email: Option<String>,
        #[command(flatten)]
        details: ContactDetails,
    },
    /// Delete a contact
    Delete {
        /// Contact id
        id: String,
    },
}

pub async fn run_contacts(args: ContactsArgs) -> Result<ExitCode> {
    let db = args.db.open()?;
    let repo = ContactRepo::new(&db);

    match args.command {
        ContactsCommand::List => print_envelope(&repo.list().await),
        ContactsCommand::Add {
            name,
            email,
            details,
        } => {
            let input = NewContact {
                phone: details.phone,
                company: details.company,
                notes: details.notes,
                ..NewContact::new(name, email)
            };
            print_envelope(&repo.create(&input).await)
        }
        ContactsCommand::Update {
            id,
            name,
            email,
            details,
        } => {
            let changes = ContactChanges {
                name,
                email,
                phone: details.phone,
                company: details.company,
                notes: details.notes,
            };
            print_envelope(&repo.update(&id, &changes).await)
        }
        ContactsCommand::Delete { id } => print_envelope(&repo.delete(&id).await),
    }
}
