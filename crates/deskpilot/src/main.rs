use std::io;

use clap::CommandFactory;
use clap::Parser;
use clap_complete::generate;

use deskpilot::CliError;
use deskpilot::commands::Cli;
use deskpilot::commands::Commands;
use deskpilot::commands::RecipesCommand;
use deskpilot::commands::RecordingsCommand;
use deskpilot::handlers;
use deskpilot::telemetry::init_tracing;
use deskpilot_daemon::AgentConfig;
use deskpilot_daemon::RecipeStore;

fn main() {
    let cli = Cli::parse();

    let mut config = AgentConfig::from_env();
    if let Some(home) = &cli.home {
        config = config.with_base_dir(home);
    }
    let _telemetry = init_tracing("warn", config.log_file.as_deref());

    if let Err(e) = run(cli, &config) {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli, config: &AgentConfig) -> Result<(), CliError> {
    let store = RecipeStore::from_config(config);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Recipes(RecipesCommand::List { json }) => {
            handlers::handle_recipes_list(&store, json, &mut out)
        }
        Commands::Recipes(RecipesCommand::Show { name }) => {
            handlers::handle_recipes_show(&store, &name, &mut out)
        }
        Commands::Recipes(RecipesCommand::Delete { name }) => {
            handlers::handle_recipes_delete(&store, &name, &mut out)
        }
        Commands::Recipes(RecipesCommand::Import { file }) => {
            handlers::handle_recipes_import(&store, &file, &mut out)
        }
        Commands::Recordings(RecordingsCommand::List) => {
            handlers::handle_recordings_list(&store, &mut out)
        }
        Commands::Recordings(RecordingsCommand::Show { name }) => {
            handlers::handle_recordings_show(&store, &name, &mut out)
        }
        Commands::Recordings(RecordingsCommand::Convert { name, recipe_name }) => {
            handlers::handle_recordings_convert(&store, &name, recipe_name.as_deref(), &mut out)
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "deskpilot", &mut out);
            Ok(())
        }
    }
}
