use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use securflow_gate::api::ApiClient;
use securflow_gate::billing::{AccessPolicy, PlanTier, VoucherCode};
use securflow_gate::config::{load_config, GateConfig, LogFormat, ObservabilityConfig};
use securflow_gate::gate::{Gate, GatePolicy, GateScope, SessionState, Verdict};
use securflow_gate::observability::init_logging;
use securflow_gate::shield::Ruleset;

#[derive(Parser)]
#[command(name = "gate-cli")]
#[command(about = "Operator CLI for the SecurFlow gate and backend API", long_about = None)]
struct Cli {
    /// Backend API base URL (overrides `api.base_url`).
    #[arg(short, long)]
    url: Option<String>,

    /// Access token for authenticated commands.
    #[arg(short, long)]
    token: Option<String>,

    /// Gate configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log requests to stderr.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the gate for a path offline
    Check {
        path: String,
        /// Treat the request as carrying a session cookie
        #[arg(long)]
        session: bool,
    },
    /// Log in and print the access token
    Login {
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Revoke the current token
    Logout,
    /// Show the current user with effective plan and capabilities
    Profile,
    /// List hubs
    Hubs,
    /// List devices of a hub
    Devices { hub_id: String },
    /// Show the event log of a hub
    Logs {
        hub_id: String,
        #[arg(long, default_value_t = 100)]
        limit: u32,
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },
    /// Show billing history
    Billing,
    /// Redeem a voucher code
    Redeem { code: String },
    /// Start a checkout session for a paid plan
    Checkout { plan: String },
    /// List notifications
    Notifications,
    /// Show unread notification count
    Unread,
    /// Mark one notification as read
    MarkRead { id: i64 },
    /// Mark all notifications as read
    MarkAllRead,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GateConfig::default(),
    };

    let logging = ObservabilityConfig {
        log_level: if cli.verbose { "debug" } else { "warn" }.to_string(),
        log_format: LogFormat::Compact,
        ..config.observability.clone()
    };
    init_logging(&logging)?;

    if let Commands::Check { path, session } = &cli.command {
        return check(&config, path, SessionState::from(*session));
    }

    let mut api = ApiClient::new(
        cli.url.as_deref().unwrap_or(&config.api.base_url),
        std::time::Duration::from_secs(config.api.timeout_secs),
    )?;
    api.set_token(cli.token.clone());

    match cli.command {
        Commands::Check { .. } => {}
        Commands::Login { username, password } => {
            print_json(&api.login(&username, &password).await?)?;
        }
        Commands::Logout => {
            api.logout().await?;
            println!("Logged out");
        }
        Commands::Profile => {
            let profile = api.profile().await?;
            let now = chrono::Utc::now();
            let policy = AccessPolicy::from_config(&config.billing);
            print_json(&json!({
                "profile": profile,
                "effective_plan": profile.subscription.effective_plan(now),
                "capabilities": policy.granted(&profile.subscription, now),
            }))?;
        }
        Commands::Hubs => print_json(&api.list_hubs().await?)?,
        Commands::Devices { hub_id } => print_json(&api.hub_devices(&hub_id).await?)?,
        Commands::Logs { hub_id, limit, offset } => {
            print_json(&api.hub_logs(&hub_id, limit, offset).await?)?
        }
        Commands::Billing => print_json(&api.billing_history().await?)?,
        Commands::Redeem { code } => {
            let code = VoucherCode::parse(&code)?;
            print_json(&api.redeem_voucher(&code).await?)?;
        }
        Commands::Checkout { plan } => {
            let plan: PlanTier = plan.parse()?;
            if !plan.is_purchasable() {
                return Err(format!("plan `{}` cannot be purchased", plan).into());
            }
            print_json(&api.create_checkout_session(plan).await?)?;
        }
        Commands::Notifications => print_json(&api.notifications().await?)?,
        Commands::Unread => print_json(&api.notification_summary().await?)?,
        Commands::MarkRead { id } => print_json(&api.mark_notification_read(id).await?)?,
        Commands::MarkAllRead => {
            api.mark_all_notifications_read().await?;
            println!("All notifications marked as read");
        }
    }

    Ok(())
}

fn check(config: &GateConfig, path: &str, session: SessionState) -> Result<(), Box<dyn std::error::Error>> {
    let scope = GateScope::from_config(&config.gate);
    if !scope.applies(path) {
        return print_json(&json!({ "path": path, "in_scope": false, "verdict": "pass" }));
    }

    let ruleset = Arc::new(Ruleset::from_config(&config.shield)?);
    let gate = Gate::new(ruleset, GatePolicy::from_config(&config.gate));

    let verdict = gate.evaluate(path, session);
    let (category, location) = match verdict {
        Verdict::Reject(category) => (Some(category), None),
        Verdict::RedirectToLogin => (None, Some(&config.gate.login_path)),
        Verdict::RedirectToDashboard => (None, Some(&config.gate.dashboard_path)),
        Verdict::PassThrough => (None, None),
    };

    print_json(&json!({
        "path": path,
        "in_scope": true,
        "session": session.is_present(),
        "verdict": verdict.label(),
        "category": category,
        "location": location,
    }))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
