use anyhow::Result;
use clap::Parser;

use jira_workflow_scheme::cli::commands::workflow_scheme::{
    CreateSchemeCommand, EditSchemeCommand, GetSchemeCommand, UrlCommand,
};
use jira_workflow_scheme::cli::commands::Command;
use jira_workflow_scheme::cli::{Cli, Commands, SchemeCommands};
use jira_workflow_scheme::{config, init_telemetry};

fn main() {
    if let Err(err) = run() {
        eprintln!("❌ {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = config()?.clone();
    if let Some(base_url) = cli.base_url {
        settings.jira.base_url = base_url;
    }

    let level = if cli.verbose {
        "debug"
    } else {
        settings.observability.log_level.as_str()
    };
    init_telemetry(level, settings.observability.json_logs)?;

    let jira = settings.jira;
    tokio::runtime::Runtime::new()?.block_on(async {
        match cli.command {
            Commands::WorkflowScheme(SchemeCommands::Get { id, draft, fields, expand }) => {
                GetSchemeCommand::new(jira, id)
                    .with_draft(draft)
                    .with_fields(fields)
                    .with_expand(expand)
                    .execute()
                    .await
            }
            Commands::WorkflowScheme(SchemeCommands::Create { file }) => {
                CreateSchemeCommand { config: jira, file }.execute().await
            }
            Commands::WorkflowScheme(SchemeCommands::Edit { id, file, update_draft }) => {
                EditSchemeCommand {
                    config: jira,
                    id,
                    file,
                    update_draft,
                }
                .execute()
                .await
            }
            Commands::WorkflowScheme(SchemeCommands::Url { id, draft }) => {
                UrlCommand { config: jira, id, draft }.execute().await
            }
        }
    })
}
