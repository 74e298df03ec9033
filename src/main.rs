use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use is_terminal::IsTerminal;
use kit::areas::repository::Repository;
use kit::artifacts::core::{PagerWriter, should_page};
use kit::artifacts::errors::KitError;
use kit::commands::porcelain::log::LogOptions;
use kit::commands::porcelain::status::StatusOptions;
use minus::Pager;
use std::path::{Path, PathBuf};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable holding the log filter
const LOG_ENV: &str = "KIT_LOG";

#[derive(Parser)]
#[command(
    name = "kit",
    version,
    about = "A minimal local version control system",
    long_about = "kit snapshots a working directory into an immutable object graph. \
    It keeps a single linear history: stage files, commit them, inspect the log, \
    and restore or revert the working tree to any earlier commit.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

COMMANDS:
{subcommands}

OPTIONS:
{options}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Create an empty kit repository",
        long_about = "This command creates the .kit directory in the current directory or at the specified path. \
        Running it inside an existing repository leaves the repository untouched."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<String>,
    },
    #[command(
        name = "add",
        about = "Add file contents to the index",
        long_about = "This command stages the given files, or every file below the given directories, \
        for the next commit. Files whose content did not change are left alone."
    )]
    Add {
        #[arg(index = 1, help = "The files or directories to stage")]
        paths: Vec<String>,
    },
    #[command(
        name = "rm",
        about = "Remove files from the index",
        long_about = "This command marks the given files as untracked. The working tree files are kept."
    )]
    Rm {
        #[arg(index = 1, help = "The files or directories to untrack")]
        paths: Vec<String>,
    },
    #[command(
        name = "commit",
        about = "Record the staged changes",
        long_about = "This command snapshots the staged files into a new commit with the specified message."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(
        name = "log",
        about = "Show the commit history",
        long_about = "This command lists the commits from the current one down to the first one."
    )]
    Log {
        #[arg(long, help = "Show one commit per line")]
        oneline: bool,
    },
    #[command(
        name = "status",
        about = "Show the working tree status",
        long_about = "This command lists the staged and the untracked files."
    )]
    Status {
        #[arg(long, help = "Give the output in a stable, script-friendly format")]
        porcelain: bool,
    },
    #[command(
        name = "checkout",
        about = "Restore the working tree to a commit",
        long_about = "This command replaces the working tree with the snapshot of the given commit. \
        It refuses to run while untracked files exist."
    )]
    Checkout {
        #[arg(index = 1, help = "The commit ID or an unambiguous prefix of it")]
        commit: String,
    },
    #[command(
        name = "revert",
        about = "Return to an earlier commit and discard the newer ones",
        long_about = "This command restores the working tree to the given commit, makes it the current commit \
        and deletes every object only the discarded commits referenced."
    )]
    Revert {
        #[arg(index = 1, help = "The commit ID or an unambiguous prefix of it")]
        commit: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| "warn".into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    // usage errors are reported but do not fail the process
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => {
            error.print()?;
            return Ok(());
        }
    };

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match run(command).await {
        Ok(()) => Ok(()),
        Err(error) => match error.downcast_ref::<KitError>() {
            Some(kit_error) if kit_error.is_reportable() => {
                kit_error.report(&mut std::io::stdout())?;
                Ok(())
            }
            _ => Err(error),
        },
    }
}

async fn run(command: Commands) -> Result<()> {
    let pwd = std::env::current_dir()?;

    match command {
        Commands::Init { path } => {
            let path = path.map(PathBuf::from).unwrap_or(pwd);
            Repository::new(&path.to_string_lossy(), Box::new(std::io::stdout()))?
                .init()
                .await
        }
        Commands::Add { paths } => open(&pwd)?.add(&paths).await,
        Commands::Rm { paths } => open(&pwd)?.rm(&paths).await,
        Commands::Commit { message } => open(&pwd)?.commit(&message).await,
        Commands::Log { oneline } => {
            let options = LogOptions { oneline };

            if should_page() {
                let pager = Pager::new();
                let writer = PagerWriter::new(pager.clone());
                Repository::discover(&pwd, Box::new(writer))?.log(&options)?;
                minus::page_all(pager)?;
                Ok(())
            } else {
                open(&pwd)?.log(&options)
            }
        }
        Commands::Status { porcelain } => open(&pwd)?.status(&StatusOptions { porcelain }).await,
        Commands::Checkout { commit } => open(&pwd)?.checkout(&commit).await,
        Commands::Revert { commit } => open(&pwd)?.revert(&commit).await,
    }
}

fn open(pwd: &Path) -> Result<Repository> {
    Repository::discover(pwd, Box::new(std::io::stdout()))
}
