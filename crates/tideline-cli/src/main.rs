use anyhow::Result;
use clap::Parser;
use tideline_cli::cli::{Cli, Commands, ConfigCommands, StateCommands};
use tideline_cli::commands;
use tideline_cli::config::{self, ConfigStore, Overrides};
use tideline_cli::output::print_error;
use tideline_provider::Provider;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    tideline_cli::init_tracing(&cli.log_level);

    let store = ConfigStore::default_location()?;
    let profile_name = &cli.profile;
    let profile = store.load_profile(profile_name)?;
    let format = cli.format.or(profile.output_format()).unwrap_or_default();

    match &cli.command {
        Commands::Config(args) => match &args.command {
            ConfigCommands::Show => commands::config::show(&store, profile_name)?,
            ConfigCommands::Set(set) => {
                commands::config::set(&store, profile_name, &set.key, &set.value)?;
            }
        },
        Commands::State(args) => match &args.command {
            StateCommands::Show => commands::state::show(&cli.state, format)?,
        },
        Commands::Plan => {
            let provider = make_provider(&cli, &profile)?;
            commands::apply::plan(&provider, &cli.file, &cli.state, format)?;
        }
        Commands::Apply => {
            let provider = make_provider(&cli, &profile)?;
            commands::apply::apply(&provider, &cli.file, &cli.state).await?;
        }
        Commands::Refresh => {
            let provider = make_provider(&cli, &profile)?;
            commands::refresh::refresh(&provider, &cli.state).await?;
        }
        Commands::Import(args) => {
            let provider = make_provider(&cli, &profile)?;
            commands::import::import(&provider, &cli.state, args.kind, &args.name, &args.id)
                .await?;
        }
        Commands::Destroy => {
            let provider = make_provider(&cli, &profile)?;
            commands::destroy::destroy(&provider, &cli.state).await?;
        }
        Commands::Get(args) => {
            let provider = make_provider(&cli, &profile)?;
            commands::lookup::get(&provider, args.kind, &args.id, format).await?;
        }
        Commands::List(args) => {
            let provider = make_provider(&cli, &profile)?;
            commands::lookup::list(&provider, args.kind, format).await?;
        }
    }

    Ok(())
}

fn make_provider(cli: &Cli, profile: &config::ProfileConfig) -> Result<Provider> {
    let overrides = Overrides {
        server: cli.server.clone(),
        token: cli.token.clone(),
        timeout: cli.timeout,
    };
    let client = config::resolve_client(&overrides, profile)?;
    let mut provider = Provider::new();
    provider.configure(&client)?;
    Ok(provider)
}
