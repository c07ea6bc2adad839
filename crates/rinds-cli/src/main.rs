mod cmd_check;
mod cmd_eval;
mod tracing_init;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use rinds_config::RindsConfig;

use crate::tracing_init::init_tracing;

#[derive(Parser)]
#[command(
    name = "rinds",
    about = "Rule evaluation for notice and onboarding triggers"
)]
struct Cli {
    /// Path to rinds.toml config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a rule file; exits 0 when satisfied, 1 otherwise
    Eval {
        /// JSON rule file: one rule object or an array of rules (all must hold)
        #[arg(short, long)]
        rule: PathBuf,
        /// Override the clock, e.g. "2024-03-01 09:00:00"
        #[arg(long)]
        now: Option<String>,
    },
    /// Lint a rule file without evaluating it
    Check {
        /// JSON rule file
        #[arg(short, long)]
        rule: PathBuf,
        /// Override evaluator.max_depth
        #[arg(long)]
        max_depth: Option<usize>,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    if run(cli)? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// Run one command and report whether it succeeded. The log file guard is
/// dropped on return, which flushes buffered file output.
fn run(cli: Cli) -> Result<bool> {
    let (config, base_dir) = load_config(cli.config.as_deref())?;
    let _guard = init_tracing(&config.logging, &base_dir)?;

    match cli.command {
        Commands::Eval { rule, now } => cmd_eval::run(config, &base_dir, &rule, now.as_deref()),
        Commands::Check { rule, max_depth } => cmd_check::run(config, &base_dir, &rule, max_depth),
    }
}

/// Load `rinds.toml` when given, defaults otherwise. The base directory for
/// relative paths is the config file's parent, or the working directory.
fn load_config(path: Option<&Path>) -> Result<(RindsConfig, PathBuf)> {
    match path {
        Some(path) => {
            let config_path = path
                .canonicalize()
                .map_err(|e| anyhow::anyhow!("config path '{}': {e}", path.display()))?;
            let config = RindsConfig::load(&config_path)?;
            let base_dir = config_path
                .parent()
                .map(Path::to_path_buf)
                .ok_or_else(|| anyhow::anyhow!("config path has no parent directory"))?;
            Ok((config, base_dir))
        }
        None => Ok((RindsConfig::default(), std::env::current_dir()?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsatisfied_eval_flushes_file_log() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("rinds.toml");
        let rule = dir.path().join("rule.json");
        std::fs::write(
            &config,
            "[logging]\nlevel = \"info\"\nfile = \"logs/rinds.log\"\n",
        )
        .unwrap();
        std::fs::write(&rule, r#"{ "type": "plugins_activated" }"#).unwrap();

        let cli = Cli {
            config: Some(config),
            command: Commands::Eval { rule, now: None },
        };
        assert!(!run(cli).unwrap());

        let log = std::fs::read_to_string(dir.path().join("logs/rinds.log")).unwrap();
        assert!(log.contains("[rule] invalid rule"), "{log}");
        assert!(log.contains("evaluated rule file"), "{log}");
        assert!(log.contains("satisfied=false"), "{log}");
    }

    #[test]
    fn missing_config_is_error() {
        let err = load_config(Some(Path::new("/nonexistent/rinds.toml"))).unwrap_err();
        assert!(err.to_string().contains("config path"), "{err}");
    }
}
