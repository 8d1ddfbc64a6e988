//! Category commands.

use anyhow::Result;
use clap::Subcommand;

use crate::app_state::AppState;
use crate::cli::output::{OutputFormat, alert, print_table_header, print_table_row};

/// `matchday categories ...`
#[derive(Debug, Subcommand)]
pub enum CategoriesCommand {
    /// List sport categories
    List,

    /// Create a category
    Create {
        /// Category name
        name: String,
    },
}

/// Runs a category command.
///
/// # Errors
///
/// Returns the alert text of the failed action.
pub async fn run(command: CategoriesCommand, state: &AppState, output: OutputFormat) -> Result<()> {
    match command {
        CategoriesCommand::List => list(state, output).await,
        CategoriesCommand::Create { name } => create(state, output, &name).await,
    }
}

async fn list(state: &AppState, output: OutputFormat) -> Result<()> {
    let categories = state
        .categories
        .list_categories()
        .await
        .map_err(alert("Failed to load categories"))?;

    if output.is_text() {
        if categories.is_empty() {
            println!("No categories found");
            return Ok(());
        }
        print_table_header(&[("ID", 6), ("NAME", 30)]);
        for category in &categories {
            let id = category.id.map_or_else(|| "-".to_string(), |id| id.to_string());
            print_table_row(&[(&id, 6), (&category.category_name, 30)]);
        }
    } else {
        output.print_value(&categories)?;
    }
    Ok(())
}

async fn create(state: &AppState, output: OutputFormat, name: &str) -> Result<()> {
    let category = state
        .categories
        .create_category(name)
        .await
        .map_err(alert("Failed to create category"))?;

    if output.is_text() {
        println!("Created category: {}", category.category_name);
    } else {
        output.print_value(&category)?;
    }
    Ok(())
}
