//! Shared types, error model, and configuration for the GridShift content toolkit.
//!
//! This crate is the foundation depended on by all other GridShift crates.
//! It provides:
//! - [`SiteError`]: the unified error type
//! - Content records ([`Project`], [`Member`], [`MediaItem`])
//! - Configuration ([`SiteConfig`], [`SitePaths`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AssetsConfig, CONFIG_FILE_NAME, ContentConfig, HomeConfig, SiteConfig, SitePaths,
    config_file_path, init_config, load_config, load_config_from,
};
pub use error::{Result, SiteError};
pub use types::{
    Availability, DEFAULT_FEATURED_LIMIT, MediaItem, MediaKind, MediaSource, Member, MemberLinks,
    Project, ProjectLinks, RecordMeta, Seo,
};
