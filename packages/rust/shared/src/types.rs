//! Content records for the GridShift site: portfolio projects and team members.
//!
//! On-disk keys are camelCase (`featuredOnHome`, `ogImage`). Keys a record does
//! not know about are kept in `extra` and serialized back out unchanged.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// How many records the home page promotes when no limit is given.
pub const DEFAULT_FEATURED_LIMIT: usize = 3;

/// Treat an explicit `null` like an absent key for defaulted fields.
///
/// The front-matter dialect turns `tags:` with nothing under it into `null`.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Content is hand-edited, so scalar fields accept the neighbouring scalar
// types instead of rejecting the whole file: `title: 2049` is the string
// "2049", `order: "20"` is 20 and `featuredOnHome: "true"` is true. Arrays
// and objects where a scalar belongs are still an error.

/// A scalar rendered as text; `null` is `None`.
fn scalar_text<E: serde::de::Error>(value: Value) -> std::result::Result<Option<String>, E> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(E::custom(format!("expected text, found {other}"))),
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<String, D::Error> {
    Ok(scalar_text(Value::deserialize(d)?)?.unwrap_or_default())
}

fn lenient_opt_string<'de, D: Deserializer<'de>>(
    d: D,
) -> std::result::Result<Option<String>, D::Error> {
    scalar_text(Value::deserialize(d)?)
}

fn lenient_strings<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Vec<String>, D::Error> {
    match Value::deserialize(d)? {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| scalar_text(item).transpose())
            .collect(),
        other => Err(D::Error::custom(format!("expected a list, found {other}"))),
    }
}

/// Numbers and numeric strings. A non-numeric string counts as unset.
fn lenient_f64<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<f64, D::Error> {
    match Value::deserialize(d)? {
        Value::Null => Ok(0.0),
        Value::Number(n) => Ok(n.as_f64().unwrap_or_default()),
        Value::String(s) => Ok(s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .unwrap_or_default()),
        other => Err(D::Error::custom(format!("expected a number, found {other}"))),
    }
}

/// Booleans, `"true"`/`"false"` in any case, and numbers (non-zero is true).
/// Any other non-empty string is true, so `draft: "yes"` still hides a record.
fn lenient_bool<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<bool, D::Error> {
    match Value::deserialize(d)? {
        Value::Null => Ok(false),
        Value::Bool(b) => Ok(b),
        Value::Number(n) => Ok(n.as_f64().is_some_and(|f| f != 0.0)),
        Value::String(s) => {
            let s = s.trim();
            Ok(!(s.is_empty() || s.eq_ignore_ascii_case("false") || s == "0"))
        }
        other => Err(D::Error::custom(format!("expected true or false, found {other}"))),
    }
}

// ---------------------------------------------------------------------------
// Shared sub-objects
// ---------------------------------------------------------------------------

/// Search/social metadata attached to a record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Open Graph image, a root-relative asset path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,
}

/// Editorial bookkeeping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}

// ---------------------------------------------------------------------------
// Project
// ---------------------------------------------------------------------------

/// External links for a project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_study: Option<String>,
}

/// What a [`MediaItem`] renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Pdf,
}

/// One alternative encoding of a video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaSource {
    pub src: String,
    /// MIME type, e.g. `video/mp4`.
    #[serde(rename = "type")]
    pub mime: String,
}

/// An entry in a project's media section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    /// Still frame shown before a video plays.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub sources: Vec<MediaSource>,
}

/// A portfolio project, parsed from a Markdown file with front-matter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Stable identifier. Falls back to the slug when the file omits it.
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    /// File name minus extension; always set by the loader.
    #[serde(default)]
    pub slug: String,
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub client: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<String>,
    /// ISO date (`YYYY-MM-DD`); compared as a string when sorting.
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub technologies: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub tags: Vec<String>,
    /// Member ids credited on the project.
    #[serde(default, deserialize_with = "lenient_strings")]
    pub authors: Vec<String>,
    /// Primary image, a root-relative asset path.
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub gallery: Vec<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub media: Vec<MediaItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<ProjectLinks>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub draft: bool,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub hidden: bool,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub featured_on_home: bool,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub home_weight: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub order: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo: Option<Seo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<RecordMeta>,
    /// Front-matter keys not modelled above.
    #[serde(flatten, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
    /// Markdown body following the front-matter block.
    #[serde(skip)]
    pub body: String,
}

// ---------------------------------------------------------------------------
// Member
// ---------------------------------------------------------------------------

/// Profile links for a team member.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portfolio: Option<String>,
}

/// Whether a member is taking on new work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    Open,
    Closed,
    Busy,
}

/// A team member, parsed from a JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default)]
    pub slug: String,
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub role: String,
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub pronouns: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub bio: Option<String>,
    /// Portrait, a root-relative asset path.
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<MemberLinks>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<Availability>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub email: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub draft: bool,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub hidden: bool,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub featured_on_home: bool,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub home_weight: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub order: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo: Option<Seo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<RecordMeta>,
    #[serde(flatten, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

impl Project {
    /// Open Graph image path, if one is set.
    pub fn og_image(&self) -> Option<&str> {
        self.seo.as_ref().and_then(|s| s.og_image.as_deref())
    }
}

impl Member {
    /// Open Graph image path, if one is set.
    pub fn og_image(&self) -> Option<&str> {
        self.seo.as_ref().and_then(|s| s.og_image.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn member_from_json() {
        let raw = json!({
            "id": "ali-niavarani",
            "name": "Ali Niavarani",
            "role": "Full-Stack Developer & Team Lead",
            "image": "/content/team/ali-niavarani.jpg",
            "skills": ["React", "TypeScript"],
            "links": { "github": "https://github.com/ali" },
            "availability": "open",
            "order": 10,
            "featuredOnHome": true,
            "homeWeight": 90,
            "seo": { "ogImage": "/content/team/ali-og.jpg" }
        });

        let member: Member = serde_json::from_value(raw).expect("deserialize member");
        assert_eq!(member.name, "Ali Niavarani");
        assert_eq!(member.order, 10.0);
        assert!(member.featured_on_home);
        assert!(!member.draft);
        assert_eq!(member.availability, Some(Availability::Open));
        assert_eq!(member.og_image(), Some("/content/team/ali-og.jpg"));
        assert!(member.extra.is_empty());
    }

    #[test]
    fn unknown_keys_pass_through() {
        let raw = json!({
            "title": "Site",
            "accent": "#ff0055",
            "credits": { "photo": "Sam" }
        });

        let project: Project = serde_json::from_value(raw).expect("deserialize project");
        assert_eq!(project.extra["accent"], json!("#ff0055"));

        let out = serde_json::to_value(&project).expect("serialize");
        assert_eq!(out["credits"]["photo"], json!("Sam"));
        assert_eq!(out["title"], json!("Site"));
    }

    #[test]
    fn null_lists_become_empty() {
        let raw = json!({ "title": "Site", "tags": null, "draft": null });
        let project: Project = serde_json::from_value(raw).expect("deserialize project");
        assert!(project.tags.is_empty());
        assert!(!project.draft);
    }

    #[test]
    fn media_item_with_sources() {
        let raw = json!({
            "type": "video",
            "src": "/content/portfolio/reel.mp4",
            "poster": "/content/portfolio/reel.jpg",
            "sources": [{ "src": "/content/portfolio/reel.webm", "type": "video/webm" }]
        });

        let item: MediaItem = serde_json::from_value(raw).expect("deserialize media");
        assert_eq!(item.kind, MediaKind::Video);
        assert_eq!(item.sources[0].mime, "video/webm");
    }

    #[test]
    fn scalar_fields_accept_neighbouring_types() {
        let raw = json!({
            "title": 2049,
            "client": 1999,
            "order": "20",
            "homeWeight": " 7.5 ",
            "featuredOnHome": "true",
            "hidden": "False",
            "tags": [2024, "web", null, true]
        });

        let project: Project = serde_json::from_value(raw).expect("deserialize project");
        assert_eq!(project.title, "2049");
        assert_eq!(project.client.as_deref(), Some("1999"));
        assert_eq!(project.order, 20.0);
        assert_eq!(project.home_weight, 7.5);
        assert!(project.featured_on_home);
        assert!(!project.hidden);
        assert_eq!(project.tags, ["2024", "web", "true"]);
    }

    #[test]
    fn odd_flag_and_number_strings() {
        let raw = json!({ "title": "X", "draft": "yes", "order": "soon" });
        let project: Project = serde_json::from_value(raw).expect("deserialize project");
        assert!(project.draft);
        assert_eq!(project.order, 0.0);

        let raw = json!({ "title": "X", "order": [1, 2] });
        assert!(serde_json::from_value::<Project>(raw).is_err());
    }

    #[test]
    fn member_requires_name_and_role() {
        let raw = json!({ "id": "x", "name": "No Role" });
        assert!(serde_json::from_value::<Member>(raw).is_err());
    }
}
