//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use gridshift_assets::AssetValidator;
use gridshift_content::{Collection, ContentKind, Members, Projects, RenderBody, Site};
use gridshift_shared::{Member, Project, SiteConfig, config_file_path, init_config, load_config};
use serde::Serialize;
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Inspect the GridShift portfolio and team content.
#[derive(Parser)]
#[command(
    name = "gridshift",
    version,
    about = "Inspect GridShift site content and validate referenced assets.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Site root containing gridshift.toml and the content directories.
    #[arg(long, env = "GRIDSHIFT_ROOT", default_value = ".", global = true)]
    pub root: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Portfolio projects (Markdown with front-matter).
    Projects {
        #[command(subcommand)]
        action: ContentAction,
    },

    /// Team members (JSON).
    Members {
        #[command(subcommand)]
        action: ContentAction,
    },

    /// Check that every referenced image exists under the public root.
    ValidateAssets {
        /// Print the report as JSON instead of a summary.
        #[arg(long)]
        json: bool,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Operations shared by both content kinds.
#[derive(Subcommand)]
pub(crate) enum ContentAction {
    /// List every public record in listing order.
    List {
        #[arg(long)]
        json: bool,
    },
    /// Show a single record by slug, including drafts and hidden records.
    Show {
        slug: String,

        /// Print the rendered HTML body (projects only).
        #[arg(long, conflicts_with = "json")]
        html: bool,

        #[arg(long)]
        json: bool,
    },
    /// List the records promoted to the home page.
    Featured {
        /// Maximum number of records (defaults to home.featured_limit).
        #[arg(short, long)]
        limit: Option<usize>,

        #[arg(long)]
        json: bool,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Write gridshift.toml with defaults at the site root.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr so stdout stays
/// clean for `--json` output.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "gridshift=warn",
        1 => "gridshift=info",
        2 => "gridshift=debug",
        _ => "gridshift=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<ExitCode> {
    let root = cli.root;
    match cli.command {
        Command::Projects { action } => {
            let config = load_config(&root)?;
            let site = Site::from_config(&config, &root);
            run_content::<Projects>(site.projects(), action, &config)?;
        }
        Command::Members { action } => {
            if matches!(action, ContentAction::Show { html: true, .. }) {
                return Err(eyre!("--html is only available for projects"));
            }
            let config = load_config(&root)?;
            let site = Site::from_config(&config, &root);
            run_content::<Members>(site.members(), action, &config)?;
        }
        Command::ValidateAssets { json } => return cmd_validate_assets(&root, json),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(&root)?,
            ConfigAction::Show => cmd_config_show(&root)?,
        },
    }
    Ok(ExitCode::SUCCESS)
}

// ---------------------------------------------------------------------------
// Content commands
// ---------------------------------------------------------------------------

/// Text rendering of a record for terminal output.
trait Describe {
    fn row(&self) -> String;
    fn detail(&self) -> String;
    /// Rendered body, for kinds that have one.
    fn html(&self) -> Option<String> {
        None
    }
}

impl Describe for Project {
    fn row(&self) -> String {
        format!(
            "{:<32} {:>6} {:<10} {}",
            self.slug,
            self.order,
            self.date.as_deref().unwrap_or("-"),
            self.title
        )
    }

    fn detail(&self) -> String {
        let mut out = format!("{}\n", self.title);
        push_field(&mut out, "slug", Some(&self.slug));
        push_field(&mut out, "id", Some(&self.id));
        push_field(&mut out, "client", self.client.as_deref());
        push_field(&mut out, "category", self.category.as_deref());
        push_field(&mut out, "date", self.date.as_deref());
        push_field(&mut out, "status", self.status.as_deref());
        push_list(&mut out, "technologies", &self.technologies);
        push_list(&mut out, "tags", &self.tags);
        push_list(&mut out, "authors", &self.authors);
        push_field(&mut out, "image", self.image.as_deref());
        push_flags(&mut out, self.draft, self.hidden, self.featured_on_home, self.home_weight, self.order);
        if let Some(summary) = self.summary.as_deref() {
            out.push_str(&format!("\n{summary}\n"));
        }
        if !self.body.is_empty() {
            out.push_str(&format!("\n{}\n", self.body));
        }
        out
    }

    fn html(&self) -> Option<String> {
        Some(self.body_html())
    }
}

impl Describe for Member {
    fn row(&self) -> String {
        format!("{:<32} {:>6} {} ({})", self.slug, self.order, self.name, self.role)
    }

    fn detail(&self) -> String {
        let mut out = format!("{}\n", self.name);
        push_field(&mut out, "slug", Some(&self.slug));
        push_field(&mut out, "id", Some(&self.id));
        push_field(&mut out, "role", Some(&self.role));
        push_field(&mut out, "pronouns", self.pronouns.as_deref());
        push_field(&mut out, "location", self.location.as_deref());
        push_list(&mut out, "skills", &self.skills);
        push_field(&mut out, "image", self.image.as_deref());
        push_flags(&mut out, self.draft, self.hidden, self.featured_on_home, self.home_weight, self.order);
        if let Some(bio) = self.bio.as_deref() {
            out.push_str(&format!("\n{bio}\n"));
        }
        out
    }
}

fn push_field(out: &mut String, name: &str, value: Option<&str>) {
    if let Some(value) = value {
        out.push_str(&format!("  {name:<13} {value}\n"));
    }
}

fn push_list(out: &mut String, name: &str, values: &[String]) {
    if !values.is_empty() {
        out.push_str(&format!("  {name:<13} {}\n", values.join(", ")));
    }
}

fn push_flags(out: &mut String, draft: bool, hidden: bool, featured: bool, weight: f64, order: f64) {
    out.push_str(&format!("  {:<13} {order}\n", "order"));
    if featured {
        out.push_str(&format!("  {:<13} yes (weight {weight})\n", "featured"));
    }
    if draft {
        out.push_str("  draft\n");
    }
    if hidden {
        out.push_str("  hidden\n");
    }
}

fn run_content<K>(collection: &Collection<K>, action: ContentAction, config: &SiteConfig) -> Result<()>
where
    K: ContentKind,
    K::Record: Describe + Serialize,
{
    match action {
        ContentAction::List { json } => {
            let records = collection.list_all()?;
            info!(kind = K::LABEL, count = records.len(), "listing content");
            print_records(&records, json)?;
        }
        ContentAction::Show { slug, html, json } => {
            let record = collection
                .get_one(&slug)
                .ok_or_else(|| eyre!("no {} found for slug '{slug}'", K::LABEL))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else if html {
                let body = record
                    .html()
                    .ok_or_else(|| eyre!("{} records have no body to render", K::LABEL))?;
                println!("{body}");
            } else {
                print!("{}", record.detail());
            }
        }
        ContentAction::Featured { limit, json } => {
            let limit = limit.unwrap_or(config.home.featured_limit);
            let records = collection.list_featured(limit)?;
            print_records(&records, json)?;
        }
    }
    Ok(())
}

fn print_records<T: Describe + Serialize>(records: &[T], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(records)?);
        return Ok(());
    }
    for record in records {
        println!("{}", record.row());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Asset validation
// ---------------------------------------------------------------------------

fn cmd_validate_assets(root: &Path, json: bool) -> Result<ExitCode> {
    let config = load_config(root)?;
    let paths = config.resolve(root);
    let site = Site::new(&paths);

    let projects = site.projects().list_all()?;
    let members = site.members().list_all()?;

    let report = AssetValidator::new(&paths.public_dir).validate(&projects, &members);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{report}");
    }

    Ok(ExitCode::from(report.exit_code()))
}

// ---------------------------------------------------------------------------
// Config commands
// ---------------------------------------------------------------------------

fn cmd_config_init(root: &Path) -> Result<()> {
    let path = init_config(root)?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(root: &Path) -> Result<()> {
    let config = load_config(root)?;
    let path = config_file_path(root);
    if !path.exists() {
        println!("# {} not found, showing defaults", path.display());
    }
    println!("{}", toml::to_string_pretty(&config)?);

    let paths = config.resolve(root);
    println!("# projects: {}", paths.projects_dir.display());
    println!("# members:  {}", paths.members_dir.display());
    println!("# public:   {}", paths.public_dir.display());
    Ok(())
}
