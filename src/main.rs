use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use aoa_client::config::{self, DEFAULT_CONFIG_PATH};
use aoa_client::models::Decision;
use aoa_client::router::Navigation;
use aoa_client::startup;
use aoa_client::state::AppState;
use aoa_client::utils::init_logging;
use clap::{Args, Parser, Subcommand};
use serde_json::{Value, json};

#[derive(Parser, Debug)]
#[command(name = "aoa-client", about = "Approval ops agent client")]
struct Cli {
    #[arg(long, env = "AOA_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and keep the token for later commands.
    Login {
        username: String,
        #[arg(long, env = "AOA_PASSWORD")]
        password: String,
    },
    Logout,
    Whoami,
    Health,
    Requests(RequestsCommand),
    Stats,
    /// Show which view a path would render for the current session.
    Navigate { path: String },
    /// Print the configuration JSON schema.
    Schema,
}

#[derive(Args, Debug)]
struct RequestsCommand {
    #[command(subcommand)]
    command: RequestsSubcommand,
}

#[derive(Subcommand, Debug)]
enum RequestsSubcommand {
    List,
    Show {
        id: i64,
    },
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        input: String,
    },
    Plan {
        id: i64,
    },
    /// Approve or reject a request.
    Decide {
        id: i64,
        /// `approve` or `reject`
        decision: Decision,
        #[arg(long)]
        comment: Option<String>,
    },
    Execute {
        id: i64,
    },
}

type CliResult = Result<Value, Box<dyn std::error::Error>>;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Command::Schema = cli.command {
        return match config::print_schema() {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("{}", e);
                ExitCode::FAILURE
            }
        };
    }

    match run(cli).await {
        Ok(output) => {
            match serde_json::to_string_pretty(&output) {
                Ok(text) => println!("{}", text),
                Err(_) => println!("{}", output),
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> CliResult {
    let config = config::load_config(&cli.config)?;
    init_logging(&config.logging)?;
    let state = startup::build(Arc::new(config))?;

    match cli.command {
        Command::Login { username, password } => {
            state.api.login(&username, &password).await?;
            Ok(whoami(&state))
        }
        Command::Logout => {
            state.api.logout();
            Ok(whoami(&state))
        }
        Command::Whoami => Ok(whoami(&state)),
        Command::Health => Ok(state.api.health().await?),
        Command::Stats => Ok(state.api.stats().await?),
        Command::Requests(requests) => run_requests(&state, requests.command).await,
        Command::Navigate { path } => Ok(navigation_json(state.router.navigate(&path))),
        Command::Schema => Ok(Value::Null),
    }
}

async fn run_requests(state: &AppState, command: RequestsSubcommand) -> CliResult {
    let api = &state.api;
    let output = match command {
        RequestsSubcommand::List => api.list_requests().await?,
        RequestsSubcommand::Show { id } => serde_json::to_value(api.request_detail(id).await?)?,
        RequestsSubcommand::Create { title, input } => {
            serde_json::to_value(api.create_request(&title, &input).await?)?
        }
        RequestsSubcommand::Plan { id } => api.plan(id).await?,
        RequestsSubcommand::Decide {
            id,
            decision,
            comment,
        } => serde_json::to_value(api.decide(id, decision, comment.as_deref()).await?)?,
        RequestsSubcommand::Execute { id } => api.execute(id).await?,
    };
    Ok(output)
}

fn whoami(state: &AppState) -> Value {
    json!({
        "username": state.session.get_username(),
        "authenticated": state.session.is_authenticated(),
    })
}

fn navigation_json(navigation: Navigation) -> Value {
    match navigation {
        Navigation::Render {
            path,
            route,
            params,
            redirects,
        } => json!({
            "outcome": "render",
            "path": path,
            "view": route.component.0,
            "params": params,
            "redirects": redirects,
        }),
        Navigation::NotFound { path } => json!({ "outcome": "not_found", "path": path }),
        Navigation::RedirectLoop { path } => json!({ "outcome": "redirect_loop", "path": path }),
    }
}
