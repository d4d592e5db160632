use clap::Parser;

use oddsflow::cli::command::{Cli, ColorChoice, Commands, ConfigCommand};
use oddsflow::cli::{self, output};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let args = Cli::parse();
    match args.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {}
    }
    output::configure(output::OutputConfig::new(args.json, args.quiet, args.verbose));

    let result = match &args.command {
        Commands::Run(run_args) => cli::run::execute(run_args).await,
        Commands::Show(show_args) => cli::show::execute(show_args),
        Commands::Config(command) => match command {
            ConfigCommand::Init(init_args) => cli::config::init(init_args),
            ConfigCommand::Show(path_args) => cli::config::show(path_args),
            ConfigCommand::Validate(path_args) => cli::config::validate(path_args),
        },
    };

    if let Err(error) = result {
        output::error(&error.to_string());
        std::process::exit(1);
    }
}
