//! Octavia planner - command line entry point
//!
//! Resolves parameters for the requested role, plans the catalog and prints
//! it. Any resolution error exits with status 1 before anything is printed.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use octavia_planner::cli::{Cli, Commands};
use octavia_planner::{
    plan, plan_database_role, resolve, Catalog, DatabaseInput, OsFamily, PlatformDefaults,
    PlatformFacts, RoleInput,
};
use strum::IntoEnumIterator;

/// Initialize tracing; `OCTAVIA_LOG` overrides the default `info` filter.
fn init_logger() {
    use tracing::level_filters::LevelFilter;

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("OCTAVIA_LOG")
                .from_env_lossy(),
        )
        .init();
}

fn main() {
    init_logger();

    let cli = Cli::parse_args();
    debug!("CLI arguments parsed");

    if let Err(e) = run(cli) {
        error!("{:#}", e);
        eprintln!("✗ {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Plan {
            os_family,
            facts,
            params,
            overrides,
        } => {
            let os_family = match (os_family, facts) {
                (Some(family), _) => family,
                (None, Some(path)) => {
                    PlatformFacts::load_from_file(&path)
                        .with_context(|| format!("Failed to load facts from {:?}", path))?
                        .os_family
                }
                (None, None) => anyhow::bail!("either --os-family or --facts is required"),
            };
            let input = load_input(params.as_deref(), &overrides)?;

            info!("Planning API role for osfamily {}", os_family);
            let resolved = resolve(&input, &os_family).context("Failed to resolve parameters")?;
            print_catalog(&plan(&resolved), cli.json)?;
        }
        Commands::Database {
            password,
            dbname,
            user,
            encoding,
            privileges,
        } => {
            let input = DatabaseInput {
                password,
                dbname,
                user,
                encoding,
                privileges,
            };
            info!("Planning PostgreSQL database role");
            let catalog =
                plan_database_role(&input).context("Failed to resolve database parameters")?;
            print_catalog(&catalog, cli.json)?;
        }
        Commands::Validate { params } => {
            info!("Validating parameters file: {:?}", params);
            let input = RoleInput::load_from_file(&params)
                .with_context(|| format!("Failed to load parameters from {:?}", params))?;
            for family in OsFamily::iter() {
                resolve(&input, &family.to_string())
                    .with_context(|| format!("Parameters are invalid on {family}"))?;
            }
            println!("✓ Parameters file is valid: {:?}", params);
        }
        Commands::Platforms => {
            let platforms: Vec<&PlatformDefaults> =
                OsFamily::iter().map(PlatformDefaults::for_family).collect();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&platforms)?);
            } else {
                for p in platforms {
                    println!(
                        "{:<8} package={:<24} service={}",
                        p.os_family, p.package_name, p.service_name
                    );
                }
            }
        }
    }

    Ok(())
}

/// Load the parameters file (if any) and apply `--set` overrides on top.
fn load_input(path: Option<&Path>, overrides: &[String]) -> Result<RoleInput> {
    let mut input = match path {
        Some(path) => RoleInput::load_from_file(path)
            .with_context(|| format!("Failed to load parameters from {:?}", path))?,
        None => RoleInput::new(),
    };
    for assignment in overrides {
        input
            .apply_override(assignment)
            .with_context(|| format!("Invalid override '{assignment}'"))?;
    }
    Ok(input)
}

fn print_catalog(catalog: &Catalog, json: bool) -> Result<()> {
    if json {
        let out =
            serde_json::to_string_pretty(catalog).context("Failed to serialize catalog")?;
        println!("{out}");
    } else {
        print!("{catalog}");
    }
    Ok(())
}
