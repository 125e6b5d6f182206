//! jtk - a command-line client for Jira Cloud.
//!
//! Issues, transitions, comments, boards, sprints and JQL search over the
//! Jira REST API v3 and Agile API 1.0.

mod api;
mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

use std::io;

use clap::{CommandFactory, Parser};
use clap_complete::generate;

use api::JiraClient;
use cli::{
    BoardCommands, Cli, Commands, CommentCommands, ConfigCommands, IssueCommands,
    SprintCommands, TransitionCommands,
};
use config::Config;
use error::Result;
use output::View;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    if cli.no_color {
        output::disable_color();
    }
    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("Warning: failed to initialize logging: {e}");
    }

    let view = View::stdout(cli.output);
    if let Err(e) = run(cli, view).await {
        tracing::debug!(error = ?e, "Command failed");
        eprintln!("Error: {e}");
        if let Some(action) = e.suggested_action() {
            eprintln!("{action}");
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli, mut view: View) -> Result<()> {
    let view = &mut view;

    match cli.command {
        // Commands that don't need credentials
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "jtk", &mut io::stdout());
        }
        Commands::Config { action } => match action {
            ConfigCommands::Set(args) => commands::config::set(view, args)?,
            ConfigCommands::Show => commands::config::show(view, &Config::load()?)?,
            ConfigCommands::Clear => commands::config::clear(view)?,
            ConfigCommands::Test => commands::config::test(view, &Config::load()?).await?,
        },
        // Commands that talk to Jira
        command => {
            let config = Config::load()?;
            let client = JiraClient::new(&config)?;

            match command {
                Commands::Issues { action } => match action {
                    IssueCommands::Get { key } => commands::issues::get(&client, view, &key).await?,
                    IssueCommands::List(args) => commands::issues::list(&client, view, args).await?,
                    IssueCommands::Create(args) => {
                        commands::issues::create(&client, view, args).await?
                    }
                    IssueCommands::Update(args) => {
                        commands::issues::update(&client, view, args).await?
                    }
                    IssueCommands::Delete { key, force } => {
                        commands::issues::delete(&client, view, &key, force).await?
                    }
                    IssueCommands::Assign {
                        key,
                        account,
                        unassign,
                    } => commands::issues::assign(&client, view, &key, account, unassign).await?,
                    IssueCommands::Meta { key } => {
                        commands::issues::meta(&client, view, &key).await?
                    }
                    IssueCommands::Open { key } => commands::issues::open(&client, view, &key)?,
                },
                Commands::Transitions { action } => match action {
                    TransitionCommands::List { key } => {
                        commands::transitions::list(&client, view, &key).await?
                    }
                    TransitionCommands::Do { key, transition } => {
                        commands::transitions::run(&client, view, &key, &transition).await?
                    }
                },
                Commands::Comments { action } => match action {
                    CommentCommands::List { key } => {
                        commands::comments::list(&client, view, &key).await?
                    }
                    CommentCommands::Add { key, text } => {
                        commands::comments::add(&client, view, &key, &text).await?
                    }
                    CommentCommands::Delete { key, id } => {
                        commands::comments::delete(&client, view, &key, &id).await?
                    }
                },
                Commands::Boards { action } => match action {
                    BoardCommands::List { project, max } => {
                        commands::boards::list(&client, view, project.as_deref(), max).await?
                    }
                    BoardCommands::Get { id } => commands::boards::get(&client, view, id).await?,
                },
                Commands::Sprints { action } => match action {
                    SprintCommands::List { board, state } => {
                        commands::sprints::list(&client, view, board, state.as_deref()).await?
                    }
                    SprintCommands::Get { id } => {
                        commands::sprints::get(&client, view, id).await?
                    }
                    SprintCommands::Issues { id, max } => {
                        commands::sprints::issues(&client, view, id, max).await?
                    }
                    SprintCommands::Current { board } => {
                        commands::sprints::current(&client, view, board).await?
                    }
                },
                Commands::Search(args) => commands::search::run(&client, view, args).await?,
                Commands::Completion { .. } | Commands::Config { .. } => {
                    // Already handled above
                }
            }
        }
    }

    Ok(())
}
