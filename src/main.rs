use clap::Parser;
use schema_sampler::adapters::{Repl, SchemaSession};
use schema_sampler::cli::{Cli, Command};
use schema_sampler::config::Settings;
use schema_sampler::domain::names::INVALID_NAME_WARNING;
use schema_sampler::domain::{check_name, NameCheck};
use std::io::{self, Write};
use tracing::info;

fn main() -> anyhow::Result<()> {
    // Parse command-line arguments
    let cli = Cli::parse();

    // Load configuration with CLI overrides
    let settings = Settings::new_with_cli(&cli)?;

    // Logs go to stderr so stdout stays clean for copied documents
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(settings.logging.max_level().unwrap_or(tracing::Level::INFO))
        .init();

    info!(
        config = %cli.config.display(),
        profile = ?settings.profile,
        "Starting schema-sampler"
    );

    match cli.command() {
        Command::Repl => {
            let stdin = io::stdin();
            let session = SchemaSession::from_settings(&settings);
            Repl::new(stdin.lock(), io::stdout(), session, settings.export.clone()).run()?;
        }
        Command::Types => {
            let mut out = io::stdout().lock();
            for field_type in settings.profile.types() {
                writeln!(out, "{}", field_type.label())?;
            }
        }
        Command::CheckName { names } => {
            let mut out = io::stdout().lock();
            for name in names {
                match check_name(&name) {
                    NameCheck::Valid => writeln!(out, "{:?}: valid", name)?,
                    NameCheck::Empty => {
                        writeln!(out, "{:?}: empty, omitted from the sample", name)?
                    }
                    NameCheck::Invalid => writeln!(out, "{:?}: {}", name, INVALID_NAME_WARNING)?,
                }
            }
        }
    }

    Ok(())
}
