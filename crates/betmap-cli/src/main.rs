//! betmap CLI - a terminal client for the betmap betting-tracker API.
//!
//! This binary drives the auth session from the command line: log in and
//! out, create accounts, run email verification and password recovery,
//! and inspect the account behind the stored session.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use betmap_core::api::{ApiClient, ApiError};
use betmap_core::auth::{forms, AuthForm, CredentialStore, FormMode, SessionStore};
use betmap_core::config::Config;

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn print_usage() {
    eprintln!("Usage: betmap <command>");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  login [--remember]             Log in and store the session tokens");
    eprintln!("  logout                         Log out and clear the stored session");
    eprintln!("  status                         Show whether a session is stored");
    eprintln!("  whoami                         Show the authenticated account");
    eprintln!("  register                       Create a new account");
    eprintln!("  verify-email <token>           Confirm an email address");
    eprintln!("  resend-verification <email>    Send a fresh verification mail");
    eprintln!("  forgot-password <email>        Start password recovery");
    eprintln!("  reset-password <token>         Set a new password with a recovery token");
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();
    info!("betmap CLI starting");

    let args: Vec<String> = std::env::args().collect();
    let command = match args.get(1) {
        Some(command) => command.as_str(),
        None => {
            print_usage();
            return Ok(());
        }
    };

    let mut config = Config::load()?;
    let mut session = SessionStore::new(config.data_dir()?);
    let _ = session.load();
    let mut client = ApiClient::new(config.api_base_url(), session)?;

    match command {
        "login" => cmd_login(&mut client, &mut config, &args).await?,
        "logout" => {
            client.logout().await?;
            println!("Logged out.");
        }
        "status" => cmd_status(&client),
        "whoami" => cmd_whoami(&mut client).await?,
        "register" => cmd_register(&client).await?,
        "verify-email" => {
            let token = require_arg(&args, "verify-email <token>")?;
            run_message_command(client.verify_email(token).await);
        }
        "resend-verification" => {
            let email = require_arg(&args, "resend-verification <email>")?;
            run_message_command(client.resend_verification(email).await);
        }
        "forgot-password" => {
            let email = require_arg(&args, "forgot-password <email>")?;
            cmd_forgot_password(&client, email).await?;
        }
        "reset-password" => {
            let token = require_arg(&args, "reset-password <token>")?;
            cmd_reset_password(&client, token).await?;
        }
        _ => print_usage(),
    }

    Ok(())
}

async fn cmd_login(client: &mut ApiClient, config: &mut Config, args: &[String]) -> Result<()> {
    let remember = args.iter().any(|arg| arg == "--remember");

    let username = prompt("Email", config.last_username.as_deref())?;
    let password = if CredentialStore::has_credentials(&username) {
        info!("Using stored credentials from keychain");
        CredentialStore::get_password(&username)?
    } else {
        prompt("Password", None)?
    };

    let mut form = AuthForm::new(FormMode::Login);
    form.email = username.clone();
    form.password = password.clone();
    if let Err(e) = form.validate() {
        eprintln!("{e}");
        return Ok(());
    }

    match client.login(&username, &password).await {
        Ok(tokens) => {
            println!("Logged in. Access token expires in {}s.", tokens.expires_in);
            config.last_username = Some(username.clone());
            config.save()?;
            if remember {
                if let Err(e) = CredentialStore::store(&username, &password) {
                    warn!(error = %e, "Failed to store credentials in keychain");
                }
            }
        }
        Err(e) => eprintln!("Login failed: {e}"),
    }
    Ok(())
}

fn cmd_status(client: &ApiClient) {
    if client.is_authenticated() {
        // Local check only; the token may have expired server-side
        println!("Session tokens stored. Run `betmap whoami` to validate them.");
    } else {
        println!("Not logged in.");
    }
}

async fn cmd_whoami(client: &mut ApiClient) -> Result<()> {
    match client.current_user().await {
        Ok(user) => {
            println!("{} <{}>", user.full_name(), user.email);
            if !user.is_verified {
                println!("Email not verified yet.");
            }
            if let Some(expires) = user.trial_expires_at {
                println!("Trial expires {}.", expires.format("%b %d, %Y"));
            }
        }
        Err(ApiError::SessionExpired) => {
            eprintln!("Session expired. Run `betmap login` to sign in again.");
        }
        Err(e) => eprintln!("Error: {e}"),
    }
    Ok(())
}

async fn cmd_register(client: &ApiClient) -> Result<()> {
    let mut form = AuthForm::new(FormMode::Register);
    form.email = prompt("Email", None)?;
    form.password = prompt("Password", None)?;
    form.confirm_password = prompt("Confirm password", None)?;
    form.first_name = prompt("First name (optional)", Some(""))?;
    form.last_name = prompt("Last name (optional)", Some(""))?;

    if let Err(e) = form.validate() {
        eprintln!("{e}");
        return Ok(());
    }

    match client.register(&form.register_data()).await {
        Ok(response) => println!("{}", response.message),
        Err(e) => eprintln!("Registration failed: {e}"),
    }
    Ok(())
}

async fn cmd_forgot_password(client: &ApiClient, email: &str) -> Result<()> {
    let mut form = AuthForm::new(FormMode::ForgotPassword);
    form.email = email.to_string();
    if let Err(e) = form.validate() {
        eprintln!("{e}");
        return Ok(());
    }

    run_message_command(client.forgot_password(email).await);
    Ok(())
}

async fn cmd_reset_password(client: &ApiClient, token: &str) -> Result<()> {
    let new_password = prompt("New password", None)?;
    let confirm = prompt("Confirm new password", None)?;

    if let Err(e) = forms::validate_password_reset(&new_password, &confirm) {
        eprintln!("{e}");
        return Ok(());
    }

    run_message_command(client.reset_password(token, &new_password).await);
    Ok(())
}

/// Print the server message for the single-message endpoints
fn run_message_command(result: Result<betmap_core::models::MessageResponse, ApiError>) {
    match result {
        Ok(response) => println!("{}", response.message),
        Err(e) => eprintln!("Error: {e}"),
    }
}

fn require_arg<'a>(args: &'a [String], usage: &str) -> Result<&'a str> {
    args.get(2)
        .map(String::as_str)
        .ok_or_else(|| anyhow::anyhow!("Usage: betmap {}", usage))
}

/// Prompt on stdout and read one trimmed line from stdin; an empty answer
/// falls back to the default when one is shown.
fn prompt(label: &str, default: Option<&str>) -> Result<String> {
    let mut stdout = io::stdout();
    match default {
        Some(value) if !value.is_empty() => write!(stdout, "{} [{}]: ", label, value)?,
        _ => write!(stdout, "{}: ", label)?,
    }
    stdout.flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read input")?;

    let value = line.trim();
    if value.is_empty() {
        Ok(default.unwrap_or_default().to_string())
    } else {
        Ok(value.to_string())
    }
}
