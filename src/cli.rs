use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Octavia planner - resolve role parameters into a resource catalog
#[derive(Parser)]
#[command(name = "octavia-planner")]
#[command(about = "Plans the Octavia API and database roles for a target platform")]
#[command(version)]
pub struct Cli {
    /// Print catalogs as JSON instead of resource blocks
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Plan the API role
    Plan {
        /// OS family of the target host (Debian, RedHat)
        #[arg(short, long, required_unless_present = "facts")]
        os_family: Option<String>,

        /// JSON facts file; its `osfamily` is used when --os-family is absent
        #[arg(long)]
        facts: Option<PathBuf>,

        /// JSON parameters file
        #[arg(short, long)]
        params: Option<PathBuf>,

        /// Override a single parameter (repeatable), e.g. --set enabled=false
        #[arg(short = 's', long = "set", value_name = "KEY=VALUE")]
        overrides: Vec<String>,
    },
    /// Plan the PostgreSQL database role
    Database {
        /// Database password (hashed before output)
        #[arg(long)]
        password: String,

        /// Database name
        #[arg(long)]
        dbname: Option<String>,

        /// Database owner
        #[arg(long)]
        user: Option<String>,

        /// Database encoding
        #[arg(long)]
        encoding: Option<String>,

        /// Privileges granted to the owner
        #[arg(long)]
        privileges: Option<String>,
    },
    /// Validate a parameters file against every supported platform
    Validate {
        /// Path to JSON parameters file
        params: PathBuf,
    },
    /// List supported platforms and their package/service names
    Platforms,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
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
    fn test_parse_plan_with_overrides() {
        let cli = Cli::try_parse_from([
            "octavia-planner",
            "--json",
            "plan",
            "--os-family",
            "Debian",
            "--set",
            "enabled=false",
            "-s",
            "sync_db=true",
        ])
        .unwrap();

        assert!(cli.json);
        match cli.command {
            Commands::Plan {
                os_family,
                overrides,
                params,
                facts,
            } => {
                assert_eq!(os_family.as_deref(), Some("Debian"));
                assert_eq!(overrides, vec!["enabled=false", "sync_db=true"]);
                assert!(params.is_none());
                assert!(facts.is_none());
            }
            _ => panic!("expected plan command"),
        }
    }

    #[test]
    fn test_plan_requires_platform_source() {
        assert!(Cli::try_parse_from(["octavia-planner", "plan"]).is_err());
        assert!(Cli::try_parse_from(["octavia-planner", "plan", "--facts", "f.json"]).is_ok());
    }

    #[test]
    fn test_database_requires_password() {
        assert!(Cli::try_parse_from(["octavia-planner", "database"]).is_err());
    }
}
