use clap::{Parser, Subcommand};

pub mod commands;

#[derive(Parser)]
#[command(name = "jira-ws")]
#[command(about = "Create, edit and inspect Jira workflow schemes")]
#[command(long_about = "jira-ws talks to the Jira REST resource /workflowscheme. Connection settings come from \
                       jira-ws.toml, JIRA_WS_* environment variables or a .env file.")]
pub struct Cli {
    /// Override the configured Jira base URL
    #[arg(long, global = true, help = "Jira site root, e.g. https://example.atlassian.net")]
    pub base_url: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Work with workflow schemes
    #[command(name = "workflow-scheme", subcommand)]
    WorkflowScheme(SchemeCommands),
}

#[derive(Subcommand)]
pub enum SchemeCommands {
    /// Fetch a workflow scheme
    Get {
        /// Workflow scheme id
        id: String,
        /// Return the scheme's draft if one exists
        #[arg(long)]
        draft: bool,
        /// Fields to include, comma separated
        #[arg(long, value_delimiter = ',')]
        fields: Option<Vec<String>>,
        /// Fields to expand, comma separated
        #[arg(long, value_delimiter = ',')]
        expand: Option<Vec<String>>,
    },
    /// Create a workflow scheme from a JSON document
    Create {
        /// JSON file with the scheme representation, `-` for stdin
        #[arg(long, short = 'f')]
        file: String,
    },
    /// Update a workflow scheme from a JSON document
    Edit {
        /// Workflow scheme id
        id: String,
        /// JSON file with the fields to change, `-` for stdin
        #[arg(long, short = 'f')]
        file: String,
        /// Edit the draft when the scheme is in use by a project (the file must hold a JSON object)
        #[arg(long)]
        update_draft: bool,
    },
    /// Print the request that `get` would send, without sending it
    Url {
        /// Workflow scheme id
        id: String,
        #[arg(long)]
        draft: bool,
    },
}
