//! Load-on-demand access to one content directory.
//!
//! Every call re-reads the directory. Nothing is cached between calls, so edits
//! to content files are always visible to the next listing.

use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use gridshift_shared::{Result, SiteError};

use crate::kind::ContentKind;
use crate::select;

/// Handle on the directory holding every record of kind `K`.
#[derive(Debug, Clone)]
pub struct Collection<K> {
    dir: PathBuf,
    _kind: PhantomData<K>,
}

impl<K: ContentKind> Collection<K> {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            _kind: PhantomData,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Every public record, ordered for listing.
    ///
    /// A missing directory is an error. Files that fail to read or parse are
    /// logged and skipped; the rest of the listing still loads.
    #[instrument(skip_all, fields(kind = K::LABEL, dir = %self.dir.display()))]
    pub fn list_all(&self) -> Result<Vec<K::Record>> {
        let files = self.content_files()?;
        let total = files.len();

        let mut records = Vec::with_capacity(total);
        for (slug, path) in files {
            match load::<K>(&slug, &path) {
                Ok(record) => {
                    debug!(%slug, "loaded");
                    records.push(record);
                }
                Err(e) => warn!(path = %path.display(), error = %e, "skipping unreadable content file"),
            }
        }

        let parsed = records.len();
        let listed = select::publish(records);
        info!(
            files = total,
            parsed,
            listed = listed.len(),
            "content listing loaded"
        );

        Ok(listed)
    }

    /// The record stored under `slug`, or `None` if there is no such file or
    /// it does not parse. Drafts and hidden records are returned as-is.
    #[instrument(skip(self), fields(kind = K::LABEL))]
    pub fn get_one(&self, slug: &str) -> Option<K::Record> {
        if !is_plain_slug(slug) {
            debug!("rejecting slug that is not a plain file stem");
            return None;
        }

        let path = self.dir.join(format!("{slug}.{}", K::EXTENSION));
        if !path.is_file() {
            debug!(path = %path.display(), "no content file for slug");
            return None;
        }

        match load::<K>(slug, &path) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "content file failed to parse");
                None
            }
        }
    }

    /// Public records promoted to the home page, heaviest `home_weight` first,
    /// at most `limit` of them. Returns fewer when fewer qualify.
    #[instrument(skip(self), fields(kind = K::LABEL))]
    pub fn list_featured(&self, limit: usize) -> Result<Vec<K::Record>> {
        Ok(select::featured(self.list_all()?, limit))
    }

    /// `(slug, path)` for every file with the kind's extension, sorted by file name.
    fn content_files(&self) -> Result<Vec<(String, PathBuf)>> {
        if !self.dir.is_dir() {
            return Err(SiteError::MissingContentDir {
                kind: K::LABEL,
                path: self.dir.clone(),
            });
        }

        let entries = std::fs::read_dir(&self.dir).map_err(|e| SiteError::io(&self.dir, e))?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| SiteError::io(&self.dir, e))?.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(K::EXTENSION) {
                continue;
            }
            let Some(slug) = path.file_stem().and_then(|s| s.to_str()) else {
                warn!(path = %path.display(), "skipping file with a non UTF-8 name");
                continue;
            };
            files.push((slug.to_string(), path));
        }

        files.sort();
        Ok(files)
    }
}

fn load<K: ContentKind>(slug: &str, path: &Path) -> Result<K::Record> {
    let raw = std::fs::read_to_string(path).map_err(|e| SiteError::io(path, e))?;
    K::parse(slug, &raw)
}

/// A slug must name a file directly inside the content directory.
fn is_plain_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('.')
        && !slug.contains(['/', '\\'])
        && !slug.contains("..")
}
