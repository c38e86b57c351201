use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
pub use clap_complete::Shell;

const LONG_ABOUT: &str = r#"deskpilot manages the recipes and recordings of a deskpilot agent.

A recording is a capture of the commands an agent ran between
recordingStart and recordingStop. A recipe is a named, replayable sequence
of commands whose string parameters may contain {{placeholders}}.

FILES:
    <home>/recipes/<name>.json
    <home>/recordings/<name>-<YYYYMMDDTHHMMSS>.json

    <home> defaults to $DESKPILOT_HOME, then ~/.deskpilot.

EXAMPLES:
    # Turn the latest capture into a recipe
    deskpilot recordings list
    deskpilot recordings convert login-20240601T083005 --name login

    # Share recipes between machines
    deskpilot recipes show login > login.json
    deskpilot recipes import login.json

    # Script against the library
    deskpilot recipes list --json"#;

#[derive(Parser, Debug)]
#[command(name = "deskpilot")]
#[command(author, version)]
#[command(about = "Manage deskpilot recipes and recordings")]
#[command(long_about = LONG_ABOUT)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Base directory holding recipes/ and recordings/
    #[arg(long, global = true, env = "DESKPILOT_HOME")]
    pub home: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inspect and edit the recipe library
    #[command(subcommand)]
    Recipes(RecipesCommand),

    /// Inspect captured recordings
    #[command(subcommand)]
    Recordings(RecordingsCommand),

    /// Generate shell completion scripts
    #[command(long_about = r#"Generate shell completion scripts.

INSTALLATION:
    # Bash
    deskpilot completions bash > ~/.local/share/bash-completion/completions/deskpilot

    # Zsh
    deskpilot completions zsh > ~/.zfunc/_deskpilot

    # Fish
    deskpilot completions fish > ~/.config/fish/completions/deskpilot.fish"#)]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum RecipesCommand {
    /// List saved recipes
    #[command(alias = "ls")]
    List {
        /// Print summaries as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a recipe as JSON
    Show { name: String },

    /// Delete a recipe
    #[command(alias = "rm")]
    Delete { name: String },

    /// Validate a recipe file and add it to the library
    Import { file: PathBuf },
}

#[derive(Subcommand, Debug)]
pub enum RecordingsCommand {
    /// List recordings, newest first
    #[command(alias = "ls")]
    List,

    /// Print a recording as JSON
    Show {
        /// Recording file stem, as printed by `recordings list`
        name: String,
    },

    /// Save the successful steps of a recording as a recipe
    Convert {
        /// Recording file stem
        name: String,

        /// Recipe name (default: the recording's name)
        #[arg(long = "name", value_name = "RECIPE")]
        recipe_name: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_recipes_list_json_flag() {
        let cli = Cli::try_parse_from(["deskpilot", "recipes", "list", "--json"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Recipes(RecipesCommand::List { json: true })
        ));
    }

    #[test]
    fn test_home_is_global() {
        let cli = Cli::try_parse_from(["deskpilot", "recordings", "ls", "--home", "/srv/dp"]).unwrap();
        assert_eq!(cli.home, Some(PathBuf::from("/srv/dp")));
        assert!(matches!(cli.command, Commands::Recordings(RecordingsCommand::List)));
    }

    #[test]
    fn test_convert_takes_optional_recipe_name() {
        let cli = Cli::try_parse_from([
            "deskpilot",
            "recordings",
            "convert",
            "demo-20240601T083005",
            "--name",
            "demo",
        ])
        .unwrap();
        let Commands::Recordings(RecordingsCommand::Convert { name, recipe_name }) = cli.command
        else {
            panic!("Expected Convert command, got {:?}", cli.command);
        };
        assert_eq!(name, "demo-20240601T083005");
        assert_eq!(recipe_name.as_deref(), Some("demo"));
    }

    #[test]
    fn test_completions_shell() {
        let cli = Cli::try_parse_from(["deskpilot", "completions", "zsh"]).unwrap();
        let Commands::Completions { shell } = cli.command else {
            panic!("Expected Completions command, got {:?}", cli.command);
        };
        assert!(matches!(shell, Shell::Zsh));
    }

    #[test]
    fn test_show_requires_name() {
        assert!(Cli::try_parse_from(["deskpilot", "recipes", "show"]).is_err());
    }
}
