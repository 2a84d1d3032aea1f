//! CLI entry point - the composition root.
//!
//! Loads `.env`, parses arguments, initialises logging and dispatches to
//! handlers. Database-backed commands get a `CliContext` from bootstrap.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use teatrack_cli::handlers::serve::ServeArgs;
use teatrack_cli::{Cli, CliConfig, Commands, bootstrap, exit_code_for, handlers};

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = CliConfig::with_defaults().with_database_path(cli.database.clone());

    match command {
        Commands::Serve {
            port,
            jwt_secret,
            cors_origins,
            request_timeout_secs,
        } => {
            let args = ServeArgs {
                port,
                jwt_secret,
                cors_origins,
                request_timeout_secs,
                database: cli.database,
            };
            handlers::serve::execute(args).await?;
        }
        Commands::List => {
            let ctx = bootstrap(&config).await?;
            handlers::list::execute(&ctx).await?;
        }
        Commands::Show { id } => {
            let ctx = bootstrap(&config).await?;
            handlers::show::execute(&ctx, id).await?;
        }
        Commands::History { id } => {
            let ctx = bootstrap(&config).await?;
            handlers::history::execute(&ctx, id).await?;
        }
        Commands::Token {
            user,
            ttl_hours,
            jwt_secret,
        } => {
            let secret = jwt_secret.or_else(|| std::env::var("JWT_SECRET").ok());
            handlers::token::execute(&user, ttl_hours, secret.as_deref())?;
        }
        Commands::Paths => {
            handlers::paths::execute()?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables before parsing so clap's `env` fallbacks see them
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            let code = u8::try_from(exit_code_for(&err)).unwrap_or(1);
            ExitCode::from(code)
        }
    }
}
