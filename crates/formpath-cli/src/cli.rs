use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "formpath",
    about = "Formpath: flatten, validate, diff, search, and redact schema-driven form documents",
    version
)]
pub struct Cli {
    /// Path to a formpath.toml config file
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Flatten a JSON document into dotted key paths
    Flatten {
        /// Path to the JSON document
        document: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Report required answers left blank in a proposal
    Validate {
        /// Path to the proposal JSON
        proposal: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show labelled answer changes against the previous application
    Diff {
        /// Path to the current proposal JSON
        proposal: String,

        /// Path to the previous proposal JSON (default: the proposal's previous_data)
        #[arg(long)]
        previous: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Strip answers pre-filled from layer lookups
    Redact {
        /// Path to the proposal JSON
        proposal: String,

        /// Write the redacted proposal here instead of stdout
        #[arg(long)]
        out: Option<String>,
    },

    /// Find answers to one question within one schema section
    SearchSection {
        /// Path to the proposal JSON
        proposal: String,

        /// Section label (spaces ignored)
        #[arg(long)]
        section: String,

        /// Question label
        #[arg(long)]
        question: String,

        /// Answer type of the question (e.g. text, checkbox)
        #[arg(long, default_value = "text")]
        answer_type: String,

        /// Option label for checkboxes, search text otherwise
        #[arg(long)]
        answer: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the question labels of a schema
    Questions {
        /// Path to the schema JSON
        schema: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render the help page for a schema
    HelpPage {
        /// Path to the schema JSON
        schema: String,

        /// Audience: external or assessor
        #[arg(long, default_value = "external")]
        audience: String,

        /// Latest stored help page version
        #[arg(long)]
        latest_version: Option<u32>,

        /// Application type (default: from config)
        #[arg(long)]
        application_type: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Summarize the ticked tenure options of a proposal
    Tenure {
        /// Path to the proposal JSON
        proposal: String,

        /// Tenure section name (default: from config)
        #[arg(long)]
        section: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
