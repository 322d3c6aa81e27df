mod config;
mod generate_cmd;
mod tui;

#[cfg(test)]
mod test_util;

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use launchpad_core::answers::{Channel, Customer, Goal, Tone};

use config::LaunchpadConfig;
use generate_cmd::GenerateOptions;

#[derive(Parser)]
#[command(
    name = "launchpad",
    version,
    about = "Turn a few answers about your business into three marketing plans"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer the questions interactively (default)
    Wizard {
        /// Directory `marketing-plan.txt` is exported to
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Generate plans from an answers file without the TUI
    Generate {
        /// Path to the answers TOML file
        #[arg(long)]
        answers: PathBuf,
        /// Plan to print or export (1-3)
        #[arg(long)]
        plan: Option<usize>,
        /// Print all three plans as JSON
        #[arg(long, conflicts_with = "export")]
        json: bool,
        /// Write the selected plan to `marketing-plan.txt`
        #[arg(long)]
        export: bool,
        /// Directory to export to (implies --export)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// List the accepted values for answers-file choice fields
    Options,
    /// Write a default config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Print shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Execute the `launchpad init` command: write config file.
fn cmd_init(force: bool) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let cfg = config::ConfigFile::default();
    config::save_config_to(&cfg, &path)?;

    println!("Config written to {}", path.display());
    println!("  synthesis.latency_ms = {}", cfg.synthesis.latency_ms);
    println!();
    println!("Next: run `launchpad` to start the wizard.");

    Ok(())
}

/// Execute the `launchpad options` command.
fn cmd_options() {
    print_choices("main_customers", Customer::ALL.iter().map(|c| c.label()));
    print_choices("main_goal", Goal::ALL.iter().map(|g| g.label()));
    print_choices("tone", Tone::ALL.iter().map(|t| t.label()));
    print_choices("channels (up to 3)", Channel::ALL.iter().map(|c| c.label()));
}

fn print_choices<'a>(field: &str, labels: impl Iterator<Item = &'a str>) {
    println!("{field}:");
    for label in labels {
        println!("  {label}");
    }
    println!();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never mix with plan output or the TUI.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Wizard { output: None }) {
        Commands::Wizard { output } => {
            let resolved = LaunchpadConfig::resolve(output.as_deref())?;
            tui::run_wizard(resolved).await?;
        }
        Commands::Generate {
            answers,
            plan,
            json,
            export,
            output,
        } => {
            let resolved = LaunchpadConfig::resolve(output.as_deref())?;
            let options = GenerateOptions {
                plan,
                json,
                export: export || output.is_some(),
            };
            generate_cmd::run_generate(&answers, &options, &resolved).await?;
        }
        Commands::Options => cmd_options(),
        Commands::Init { force } => cmd_init(force)?,
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "launchpad", &mut std::io::stdout());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_wizard() {
        let cli = Cli::try_parse_from(["launchpad"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn generate_flags_parse() {
        let cli = Cli::try_parse_from([
            "launchpad",
            "generate",
            "--answers",
            "answers.toml",
            "--plan",
            "2",
            "--output",
            "out",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Generate {
                answers,
                plan,
                json,
                export,
                output,
            }) => {
                assert_eq!(answers, PathBuf::from("answers.toml"));
                assert_eq!(plan, Some(2));
                assert!(!json);
                assert!(!export);
                assert_eq!(output, Some(PathBuf::from("out")));
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn json_and_export_conflict() {
        let result = Cli::try_parse_from([
            "launchpad",
            "generate",
            "--answers",
            "a.toml",
            "--json",
            "--export",
        ]);
        assert!(result.is_err());
    }
}
