//! Session and account commands.

use anyhow::Result;
use clap::Args;

use crate::app_state::AppState;
use crate::cli::output::{OutputFormat, alert, print_field, print_table_header, print_table_row};
use crate::service::SignUpForm;

/// Arguments of `matchday login`.
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Account username
    #[arg(long, short)]
    pub username: String,

    /// Account password
    #[arg(long, short, env = "MATCHDAY_PASSWORD", hide_env_values = true)]
    pub password: String,
}

/// Arguments of `matchday signup`.
#[derive(Debug, Args)]
pub struct SignUpArgs {
    /// Desired username
    #[arg(long, short)]
    pub username: String,

    /// Contact email
    #[arg(long, short)]
    pub email: String,

    /// Password
    #[arg(long, short, env = "MATCHDAY_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Password again
    #[arg(long)]
    pub confirm_password: String,

    /// Optional phone number
    #[arg(long)]
    pub phone: Option<String>,

    /// Log in right after the account is created
    #[arg(long)]
    pub login: bool,
}

/// `matchday login`
///
/// # Errors
///
/// Returns the alert text of the failed login.
pub async fn login(state: &AppState, output: OutputFormat, args: LoginArgs) -> Result<()> {
    let account_id = state
        .accounts
        .login(&args.username, &args.password)
        .await
        .map_err(alert("Login failed. Please try again."))?;

    if output.is_text() {
        println!("Logged in as {} (account {account_id})", args.username.trim());
    } else {
        output.print_value(&state.sessions.current()?)?;
    }
    Ok(())
}

/// `matchday logout`
///
/// # Errors
///
/// Returns an error if the session file cannot be written.
pub fn logout(state: &AppState) -> Result<()> {
    state.accounts.logout()?;
    println!("Logged out");
    Ok(())
}

/// `matchday whoami`
///
/// # Errors
///
/// Returns the alert text of the failed lookup.
pub async fn whoami(state: &AppState, output: OutputFormat) -> Result<()> {
    let account = state
        .accounts
        .profile()
        .await
        .map_err(alert("Failed to load profile"))?;

    if output.is_text() {
        print_field("ID", &account.id.to_string());
        print_field("Username", &account.username);
        print_field("Email", &account.email);
        if let Some(phone) = &account.phone_number {
            print_field("Phone", phone);
        }
    } else {
        output.print_value(&account)?;
    }
    Ok(())
}

/// `matchday signup`
///
/// # Errors
///
/// Returns the validation or server message.
pub async fn sign_up(state: &AppState, output: OutputFormat, args: SignUpArgs) -> Result<()> {
    let form = SignUpForm {
        username: args.username,
        email: args.email,
        password: args.password,
        confirm_password: args.confirm_password,
        phone_number: args.phone,
    };
    let password = form.password.clone();

    let account = state
        .accounts
        .sign_up(form)
        .await
        .map_err(alert("Registration failed. Please try again."))?;

    if output.is_text() {
        println!("Created account {} ({})", account.username, account.id);
    } else {
        output.print_value(&account)?;
    }

    if args.login {
        state
            .accounts
            .login(&account.username, &password)
            .await
            .map_err(alert("Login failed. Please try again."))?;
        if output.is_text() {
            println!("Logged in as {}", account.username);
        }
    }
    Ok(())
}

/// `matchday accounts`
///
/// # Errors
///
/// Returns the alert text of the failed listing.
pub async fn list_accounts(state: &AppState, output: OutputFormat) -> Result<()> {
    let accounts = state
        .accounts
        .list_accounts()
        .await
        .map_err(alert("Failed to load accounts"))?;

    if output.is_text() {
        if accounts.is_empty() {
            println!("No accounts found");
            return Ok(());
        }
        print_table_header(&[("ID", 6), ("USERNAME", 20), ("EMAIL", 30)]);
        for account in &accounts {
            print_table_row(&[
                (&account.id.to_string(), 6),
                (&account.username, 20),
                (&account.email, 30),
            ]);
        }
    } else {
        output.print_value(&accounts)?;
    }
    Ok(())
}
