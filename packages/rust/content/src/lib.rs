//! Content ingestion and selection for the GridShift site.
//!
//! Turns a directory of content files into typed, filtered, ordered lists on
//! demand. There is no process-wide content state: a [`Site`] is a handle on
//! directories, and each call reads them again.
//!
//! Failure policy, identical for both kinds:
//! - missing content directory → [`SiteError::MissingContentDir`](gridshift_shared::SiteError)
//! - malformed file → logged with `warn!` and skipped
//! - unknown slug → `None`

pub mod collection;
pub mod kind;
pub mod select;

pub use collection::Collection;
pub use kind::{ContentKind, Members, Projects};
pub use select::Listed;

use std::path::Path;

use gridshift_shared::{Project, SiteConfig, SitePaths};

/// Both content collections of one site.
#[derive(Debug, Clone)]
pub struct Site {
    projects: Collection<Projects>,
    members: Collection<Members>,
}

impl Site {
    pub fn new(paths: &SitePaths) -> Self {
        Self {
            projects: Collection::new(&paths.projects_dir),
            members: Collection::new(&paths.members_dir),
        }
    }

    /// Collections for the site rooted at `root`.
    pub fn from_config(config: &SiteConfig, root: &Path) -> Self {
        Self::new(&config.resolve(root))
    }

    pub fn projects(&self) -> &Collection<Projects> {
        &self.projects
    }

    pub fn members(&self) -> &Collection<Members> {
        &self.members
    }
}

/// Body rendering for project detail pages.
pub trait RenderBody {
    fn body_html(&self) -> String;
}

impl RenderBody for Project {
    fn body_html(&self) -> String {
        gridshift_markdown::render_html(&self.body)
    }
}
