//! CI asset check for the GridShift site.
//!
//! Loads every public project and team member, verifies the images they
//! reference exist under the public root, prints a summary, and exits 1 when
//! any required asset is missing. Takes no arguments; the site root is
//! `$GRIDSHIFT_ROOT` or the current directory.

use std::path::PathBuf;
use std::process::ExitCode;

use color_eyre::eyre::{Result, WrapErr};
use gridshift_assets::AssetValidator;
use gridshift_content::Site;
use gridshift_shared::load_config;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gridshift=warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let root = match std::env::var_os("GRIDSHIFT_ROOT") {
        Some(root) => PathBuf::from(root),
        None => std::env::current_dir().wrap_err("cannot determine current directory")?,
    };

    let config = load_config(&root)?;
    let paths = config.resolve(&root);
    let site = Site::new(&paths);

    let projects = site.projects().list_all()?;
    let members = site.members().list_all()?;
    info!(
        projects = projects.len(),
        members = members.len(),
        public = %paths.public_dir.display(),
        "validating assets"
    );

    let report = AssetValidator::new(paths.public_dir).validate(&projects, &members);
    println!("{report}");

    Ok(ExitCode::from(report.exit_code()))
}
