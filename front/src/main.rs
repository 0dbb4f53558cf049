use abi::{expand_path, Config, DEFAULT_CONFIG_PATH};
use anyhow::{bail, Context, Result};
use booking::CountPolicy;
use booking_front::{App, AuthForm, Route, SearchDraft};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Terminal front-end for the hotel booking backend.
#[derive(Debug, Parser)]
#[command(name = "booking-front", version)]
struct Cli {
    /// config file (YAML)
    #[arg(long, env = "BOOKING_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Search availability for a date range
    Search {
        #[arg(long)]
        checkin: String,
        #[arg(long)]
        checkout: String,
        #[arg(long, default_value_t = 1)]
        adults: u32,
        #[arg(long, default_value_t = 0)]
        children: u32,
        #[arg(long)]
        room_type: Option<String>,
        /// only count records flagged as available
        #[arg(long)]
        available_only: bool,
    },
    /// List every availability record
    Availability {
        #[arg(long)]
        available_only: bool,
    },
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "BOOKING_PASSWORD")]
        password: String,
    },
    Register {
        #[arg(long)]
        email: String,
        #[arg(long, env = "BOOKING_PASSWORD")]
        password: String,
        #[arg(long)]
        first_name: String,
        #[arg(long, default_value = "")]
        last_name: String,
    },
    Logout,
    /// Show the session as the navbar sees it
    Whoami,
}

fn policy(available_only: bool) -> CountPolicy {
    if available_only {
        CountPolicy::AvailableOnly
    } else {
        CountPolicy::AllRecords
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let path = expand_path(&cli.config)?;
    let config = Config::load_or_default(&path)
        .with_context(|| format!("failed to load config {}", path.display()))?
        .with_env_overrides();
    let mut app = App::from_config(&config).context("failed to start booking front")?;

    match cli.command {
        Command::Search {
            checkin,
            checkout,
            adults,
            children,
            room_type,
            available_only,
        } => {
            app.search.draft = SearchDraft {
                check_in: checkin,
                check_out: checkout,
                adults,
                children,
                room_type,
            };
            app.search.policy = policy(available_only);
            app.submit_search().await;
            println!("{}", app.render());
            if let Some(err) = app.search.error() {
                bail!("{err}");
            }
        }
        Command::Availability { available_only } => {
            app.search.policy = policy(available_only);
            app.load_all_availability().await;
            println!("{}", app.render());
            if let Some(err) = app.search.error() {
                bail!("{err}");
            }
        }
        Command::Login { email, password } => {
            app.navigate(Route::Login);
            app.auth = AuthForm::login(email, password);
            if !app.submit_auth().await {
                println!("{}", app.render());
                bail!("{}", app.auth.error().unwrap_or_default());
            }
            println!("{}", app.render());
        }
        Command::Register {
            email,
            password,
            first_name,
            last_name,
        } => {
            app.navigate(Route::Login);
            app.auth = AuthForm::register(email, password, first_name, last_name);
            if !app.submit_auth().await {
                println!("{}", app.render());
                bail!("{}", app.auth.error().unwrap_or_default());
            }
            println!("{}", app.render());
        }
        Command::Logout => {
            app.logout().context("failed to clear stored token")?;
            println!("{}", app.render());
        }
        Command::Whoami => {
            let state = app.state();
            println!("{}", app.layout.nav.view(&state));
            // only the token survives a restart; the profile needs a new login
            if state.user().is_none() && state.token().is_some() {
                println!("stored token found, log in again to load the profile");
            }
        }
    }
    Ok(())
}
