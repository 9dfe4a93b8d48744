use bursar::application::{generate_receipt, ConfigService, Registry};
use bursar::cli::{format_student, format_student_table, Cli, Commands};
use bursar::domain::format_amount;
use bursar::error::BursarError;
use bursar::infrastructure::{Config, FlatFileStore};
use chrono::Local;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = run(cli);

    match result {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn run(cli: Cli) -> Result<(), BursarError> {
    let cwd = std::env::current_dir()?;

    match cli.command {
        Commands::Register { id, name, amount } => {
            let mut registry = open_registry(&cwd, cli.data_file)?;
            let student = registry.register_student(&id, &name, &amount)?;
            println!("Registered {}", format_student(&student));
        }
        Commands::Pay { id, amount } => {
            let mut registry = open_registry(&cwd, cli.data_file)?;
            let total = registry.add_payment(&id, &amount)?;
            println!("Payment added. Total paid: {}", format_amount(total));
        }
        Commands::List => {
            let registry = open_registry(&cwd, cli.data_file)?;
            println!("{}", format_student_table(registry.list_all()).trim_end());
        }
        Commands::Show { id } => {
            let registry = open_registry(&cwd, cli.data_file)?;
            let student = registry
                .find_by_id(&id)
                .ok_or_else(|| BursarError::NotFound(id.trim().to_string()))?;
            println!("{}", format_student(student));
        }
        Commands::Receipt { id } => {
            let registry = open_registry(&cwd, cli.data_file)?;
            let path = generate_receipt(&registry, &id, Local::now())?;
            println!("Receipt saved as: {}", path.display());
        }
        Commands::Config { key, value, list } => {
            run_config(ConfigService::new(cwd), key, value, list)?;
        }
    }

    Ok(())
}

/// Load the registry for this directory.
/// A load failure is returned before anything can overwrite the data file.
fn open_registry(cwd: &Path, data_file: Option<PathBuf>) -> Result<Registry<FlatFileStore>, BursarError> {
    let config = Config::resolve(cwd)?.with_overrides(data_file, None);
    Registry::open(FlatFileStore::from_config(&config, cwd))
}

fn run_config(
    service: ConfigService,
    key: Option<String>,
    value: Option<String>,
    list: bool,
) -> Result<(), BursarError> {
    if list {
        let config = service.list()?;
        println!("data_file = {}", config.data_file.display());
        println!("receipt_dir = {}", config.receipt_dir.display());
    } else if let Some(k) = key {
        if let Some(v) = value {
            service.set(&k, &v)?;
            println!("Set {} = {}", k, v);
        } else {
            println!("{}", service.get(&k)?);
        }
    } else {
        println!("Usage: bursar config [--list | <key> [<value>]]");
        println!("Valid keys: data_file, receipt_dir");
    }
    Ok(())
}
