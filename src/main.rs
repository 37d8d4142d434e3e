use clap::Parser;

use dealsight::adapter::inbound::cli::command::{Cli, ColorChoice, Commands, ConfigCommand};
use dealsight::adapter::inbound::cli::output::{self, OutputConfig};
use dealsight::adapter::inbound::cli::{check, config, recommend, score};
use dealsight::error::Result;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose));
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {}
    }

    if let Err(e) = run(cli.command).await {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Score(args) => score::execute(&args.deals, &args.config).await,
        Commands::Recommend(args) => recommend::execute(&args.deals, &args.config).await,
        Commands::Check(args) => check::execute(&args.config).await,
        Commands::Config(ConfigCommand::Init { path, force }) => config::execute_init(&path, force),
        Commands::Config(ConfigCommand::Show(args)) => config::execute_show(&args.config),
        Commands::Config(ConfigCommand::Validate(args)) => config::execute_validate(&args.config),
    }
}
