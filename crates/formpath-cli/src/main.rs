//! Formpath CLI: the `formpath` command.

mod cli;
mod commands;
mod support;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn init_logging(log_level: &str) {
    // stderr only; stdout carries command output.
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);
    let config = support::load_config_or_exit(cli.config.as_deref());

    match cli.command {
        Commands::Flatten { document, json } => commands::flatten::run(document, &config, json),

        Commands::Validate { proposal, json } => commands::validate::run(proposal, json),

        Commands::Diff {
            proposal,
            previous,
            json,
        } => commands::diff::run(proposal, previous, json),

        Commands::Redact { proposal, out } => commands::redact::run(proposal, out),

        Commands::SearchSection {
            proposal,
            section,
            question,
            answer_type,
            answer,
            json,
        } => commands::search_section::run(commands::search_section::Args {
            proposal,
            section,
            question,
            answer_type,
            answer,
            json,
        }),

        Commands::Questions { schema, json } => commands::questions::run(schema, json),

        Commands::HelpPage {
            schema,
            audience,
            latest_version,
            application_type,
            json,
        } => commands::help_page::run(
            commands::help_page::Args {
                schema,
                audience,
                latest_version,
                application_type,
                json,
            },
            &config,
        ),

        Commands::Tenure {
            proposal,
            section,
            json,
        } => commands::tenure::run(proposal, section, &config, json),
    }
}
