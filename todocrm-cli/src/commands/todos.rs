//! Todo commands
//!
//!   todocrm todos list
//!   todocrm todos add "Buy milk"
//!   todocrm todos update <ID> --completed true
//!   todocrm todos delete <ID>

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use todocrm_core::{NewTodo, TodoChanges, TodoRepo};

use super::{print_envelope, DbArgs};

#[derive(Parser, Debug)]
pub struct TodosArgs {
    #[command(flatten)]
    pub db: DbArgs,

    #[command(subcommand)]
    pub command: TodosCommand,
}

#[derive(Subcommand, Debug)]
pub enum TodosCommand {
    /// List all todos, newest first
    List,
    /// Create a todo (not completed, shown on the front page)
    Add {
        /// Todo title
        title: String,
    },
    /// Change fields of an existing todo
    Update {
        /// Todo id
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// Mark completed (true/false)
        #[arg(long)]
        completed: Option<bool>,
        /// Show on the front page (true/false)
        #[arg(long)]
        show_on_front: Option<bool>,
    },
    /// Delete a todo
    Delete {
        /// Todo id
        id: String,
    },
}

pub async fn run_todos(args: TodosArgs) -> Result<ExitCode> {
    let db = args.db.open()?;
    let repo = TodoRepo::new(&db);

    match args.command {
        TodosCommand::List => print_envelope(&repo.list().await),
        TodosCommand::Add { title } => print_envelope(&repo.create(&NewTodo::new(title)).await),
        TodosCommand::Update {
            id,
            title,
            completed,
            show_on_front,
        } => {
            let changes = TodoChanges {
                title,
                completed,
                show_on_front,
            };
            print_envelope(&repo.update(&id, &changes).await)
        }
        TodosCommand::Delete { id } => print_envelope(&repo.delete(&id).await),
    }
}
