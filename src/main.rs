use anyhow::Result;
use bitlog::areas::repository::Repository;
use bitlog::artifacts::core::PagerWriter;
use bitlog::artifacts::core::date::parse_since;
use bitlog::commands::plumbing::rev_list::RevListCommandOptions;
use bitlog::commands::porcelain::log::LogOptions;
use bitlog::logging::init_logging;
use bitlog::{CommitDecoration, CommitDisplayFormat};
use clap::{Parser, Subcommand};
use is_terminal::IsTerminal;
use minus::Pager;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "bitlog",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "Commit history and file history for git repositories",
    long_about = "Lists the commits reachable from a revision, newest first, \
    or the commits that changed one file, following it across renames.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[arg(
        short = 'C',
        global = true,
        value_name = "DIR",
        help = "Run as if started in <DIR>"
    )]
    directory: Option<PathBuf>,
    #[arg(
        long = "git-dir",
        env = "GIT_DIR",
        global = true,
        value_name = "PATH",
        help = "Path to the git directory, skipping discovery"
    )]
    git_dir: Option<PathBuf>,
    #[arg(short, long, global = true, help = "Show debug logging on stderr")]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "log",
        about = "Show commit logs",
        long_about = "Shows the commits reachable from REVISION (HEAD by default), newest first. \
        With a path after `--`, shows only the commits where that path's content changed."
    )]
    Log {
        #[arg(index = 1, default_value = "HEAD", help = "Where to start walking")]
        revision: String,
        #[arg(short = 'n', long = "max-count", help = "Limit the number of commits shown")]
        max_count: Option<usize>,
        #[arg(long, value_parser = parse_since, help = "Only commits newer than this date")]
        since: Option<i64>,
        #[arg(long, help = "Shorthand for --format=oneline --abbrev-commit")]
        oneline: bool,
        #[arg(long, value_enum, default_value_t = CommitDisplayFormat::Medium)]
        format: CommitDisplayFormat,
        #[arg(long = "abbrev-commit", help = "Show abbreviated commit ids")]
        abbrev_commit: bool,
        #[arg(long, value_enum, default_value_t = CommitDecoration::Short)]
        decorate: CommitDecoration,
        #[arg(long, requires = "path", help = "Continue listing the file across renames")]
        follow: bool,
        #[arg(long, requires = "path", help = "Keep walking past commits where the path does not exist")]
        force: bool,
        #[arg(index = 2, last = true, help = "Show the history of this file or directory")]
        path: Option<String>,
    },
    #[command(
        name = "rev-list",
        about = "List commit ids in reverse chronological order",
        long_about = "Prints one commit id per line for every commit reachable from REVISION."
    )]
    RevList {
        #[arg(index = 1, default_value = "HEAD")]
        revision: String,
        #[arg(short = 'n', long = "max-count", help = "Limit the number of commits listed")]
        max_count: Option<usize>,
        #[arg(long, value_parser = parse_since, help = "Only commits newer than this date")]
        since: Option<i64>,
    },
}

fn open_repository(cli: &Cli, writer: Box<dyn std::io::Write>) -> Result<Repository> {
    let base = match &cli.directory {
        Some(directory) => directory.clone(),
        None => std::env::current_dir()?,
    };

    match &cli.git_dir {
        Some(git_dir) => Repository::open(&base.join(git_dir), writer),
        None => Repository::discover(&base, writer),
    }
}

fn run(cli: &Cli, writer: Box<dyn std::io::Write>) -> Result<()> {
    let repository = open_repository(cli, writer)?;

    match &cli.command {
        Commands::Log {
            revision,
            max_count,
            since,
            oneline,
            format,
            abbrev_commit,
            decorate,
            follow,
            force,
            path,
        } => repository.log(&LogOptions {
            revision: revision.clone(),
            max_count: *max_count,
            since: *since,
            oneline: *oneline,
            abbrev_commit: *abbrev_commit,
            format: *format,
            decorate: *decorate,
            path: path.clone(),
            follow: *follow,
            force: *force,
        }),
        Commands::RevList {
            revision,
            max_count,
            since,
        } => repository.print_rev_list(&RevListCommandOptions {
            revision: revision.clone(),
            max_count: *max_count,
            since: *since,
        }),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let stdout_is_terminal = std::io::stdout().is_terminal();
    if !stdout_is_terminal {
        colored::control::set_override(false);
    }

    if stdout_is_terminal && std::env::var_os("NO_PAGER").is_none() {
        let pager = Pager::new();
        run(&cli, Box::new(PagerWriter::new(pager.clone())))?;
        minus::page_all(pager)?;
    } else {
        run(&cli, Box::new(std::io::stdout()))?;
    }

    Ok(())
}
