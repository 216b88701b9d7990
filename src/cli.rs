use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::catalog::entry::EntryDraft;
use crate::catalog::query::SELECT_ALL;
use crate::commands::{self, CommandReport};
use crate::logging;

#[derive(Debug, Parser)]
#[command(
    name = "catalog",
    version,
    about = "Manage a GitHub-backed catalog of AI-generated images"
)]
struct Cli {
    /// Print the command report as JSON.
    #[arg(long, global = true)]
    json: bool,
    /// Log sync steps to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct EntryFields {
    #[arg(long)]
    title: String,
    #[arg(long)]
    platform: String,
    #[arg(long = "image-url")]
    image_url: String,
    /// Defaults to today.
    #[arg(long, default_value = "")]
    date: String,
    /// Comma-separated.
    #[arg(long, default_value = "")]
    tags: String,
    #[arg(long)]
    prompt: String,
}

impl From<EntryFields> for EntryDraft {
    fn from(f: EntryFields) -> Self {
        EntryDraft {
            title: f.title,
            platform: f.platform,
            image_url: f.image_url,
            date: f.date,
            tags: f.tags,
            prompt: f.prompt,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the filtered gallery, newest first.
    List {
        #[arg(long, default_value = "")]
        search: String,
        /// Platform name or tag; `all` disables the filter.
        #[arg(long, default_value = SELECT_ALL)]
        filter: String,
        /// Number of pages to show ("load more").
        #[arg(long, default_value_t = 1)]
        pages: usize,
    },
    /// Print the Markdown document of one entry.
    Show { slug: String },
    /// Render an entry's Markdown without saving it.
    Preview(EntryFields),
    /// Add an entry to the repository (or the local directory).
    Add(EntryFields),
    /// Edit an entry; changing the title renames it.
    Edit {
        slug: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        platform: Option<String>,
        #[arg(long = "image-url")]
        image_url: Option<String>,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        tags: Option<String>,
        #[arg(long)]
        prompt: Option<String>,
    },
    /// Delete an entry and its Markdown file.
    Delete { slug: String },
    /// Refresh the local catalog from the repository index.
    Pull,
    /// Check the repository settings against the API.
    Connect,
    /// Save repository settings.
    Configure {
        #[arg(long)]
        owner: Option<String>,
        #[arg(long)]
        repo: Option<String>,
        #[arg(long)]
        branch: Option<String>,
        #[arg(long)]
        token: Option<String>,
        #[arg(long = "api-base")]
        api_base: Option<String>,
    },
    /// Show connection state and resolved paths.
    Status,
}

fn print_report(report: &CommandReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    if let Some(body) = &report.body {
        print!("{body}");
    }
    for detail in &report.details {
        println!("{detail}");
    }
    for issue in &report.issues {
        eprintln!("issue: {issue}");
    }
    Ok(())
}

fn dispatch(command: Command) -> Result<CommandReport> {
    match command {
        Command::List {
            search,
            filter,
            pages,
        } => commands::list::run(&commands::list::ListOptions {
            search,
            filter,
            pages,
        }),
        Command::Show { slug } => commands::show::run(&slug),
        Command::Preview(fields) => commands::preview::run(&fields.into()),
        Command::Add(fields) => commands::add::run(&commands::add::AddOptions {
            draft: fields.into(),
        }),
        Command::Edit {
            slug,
            title,
            platform,
            image_url,
            date,
            tags,
            prompt,
        } => commands::edit::run(&commands::edit::EditOptions {
            slug,
            title,
            platform,
            image_url,
            date,
            tags,
            prompt,
        }),
        Command::Delete { slug } => {
            commands::delete::run(&commands::delete::DeleteOptions { slug })
        }
        Command::Pull => commands::pull::run(),
        Command::Connect => commands::connect::run(),
        Command::Configure {
            owner,
            repo,
            branch,
            token,
            api_base,
        } => commands::configure::run(&commands::configure::ConfigureOptions {
            owner,
            repo,
            branch,
            token,
            api_base,
        }),
        Command::Status => commands::status::run(),
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let report = dispatch(cli.command)?;
    print_report(&report, cli.json)?;
    if !report.ok {
        anyhow::bail!("{} failed", report.command);
    }
    Ok(())
}
