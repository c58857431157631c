//! Per-kind file formats: projects are Markdown with front-matter, members are JSON.

use serde_json::{Map, Value};

use gridshift_markdown::parse_document;
use gridshift_shared::{Member, Project, Result, SiteError};

use crate::select::Listed;

/// A kind of content stored one record per file in a single directory.
pub trait ContentKind {
    type Record: Listed;

    /// Singular name used in logs and errors.
    const LABEL: &'static str;
    /// File extension without the dot.
    const EXTENSION: &'static str;

    /// Parse one file's contents. `slug` is the file stem and always wins over
    /// any slug written inside the file.
    fn parse(slug: &str, raw: &str) -> Result<Self::Record>;
}

/// Portfolio projects.
#[derive(Debug, Clone, Copy)]
pub struct Projects;

/// Team members.
#[derive(Debug, Clone, Copy)]
pub struct Members;

impl ContentKind for Projects {
    type Record = Project;

    const LABEL: &'static str = "project";
    const EXTENSION: &'static str = "md";

    fn parse(slug: &str, raw: &str) -> Result<Project> {
        let doc = parse_document(raw)?;
        let mut project: Project = from_fields(slug, doc.data)?;
        project.body = doc.body;
        if project.id.is_empty() {
            project.id = slug.to_string();
        }
        Ok(project)
    }
}

impl ContentKind for Members {
    type Record = Member;

    const LABEL: &'static str = "member";
    const EXTENSION: &'static str = "json";

    fn parse(slug: &str, raw: &str) -> Result<Member> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|e| SiteError::parse(format!("invalid JSON: {e}")))?;
        let Value::Object(fields) = value else {
            return Err(SiteError::parse("expected a JSON object"));
        };

        let mut member: Member = from_fields(slug, fields)?;
        if member.id.is_empty() {
            member.id = slug.to_string();
        }
        Ok(member)
    }
}

/// Deserialize a record from its field map with the slug forced to the file stem.
fn from_fields<T: serde::de::DeserializeOwned>(
    slug: &str,
    mut fields: Map<String, Value>,
) -> Result<T> {
    fields.insert("slug".into(), Value::String(slug.to_string()));
    serde_json::from_value(Value::Object(fields))
        .map_err(|e| SiteError::parse(format!("invalid fields: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_front_matter_round_trip() {
        let raw = "---\nid: \"p1\"\ntitle: \"X\"\norder: 20\ndraft: false\ntags: [\"a\",\"b\"]\n---\nBody text.";
        let project = Projects::parse("p1-file", raw).expect("parse project");

        assert_eq!(project.id, "p1");
        assert_eq!(project.slug, "p1-file");
        assert_eq!(project.title, "X");
        assert_eq!(project.order, 20.0);
        assert!(!project.draft);
        assert_eq!(project.tags, ["a", "b"]);
        assert_eq!(project.body, "Body text.");
    }

    #[test]
    fn project_nested_fields() {
        let raw = r#"---
title: Brand refresh
date: 2025-03-02
featuredOnHome: true
homeWeight: 70
gallery: ["/content/portfolio/a.jpg", "/content/portfolio/b.jpg"]
links:
  site: https://brand.example
  caseStudy: /blog/brand-refresh
seo:
  ogImage: /content/portfolio/brand-og.jpg
media:
  - type: image
    src: /content/portfolio/c.jpg
    caption: Poster
---
Story."#;
        let project = Projects::parse("brand-refresh", raw).expect("parse project");

        assert_eq!(project.id, "brand-refresh");
        assert_eq!(project.date.as_deref(), Some("2025-03-02"));
        assert!(project.featured_on_home);
        assert_eq!(project.home_weight, 70.0);
        assert_eq!(project.gallery.len(), 2);
        let links = project.links.as_ref().expect("links");
        assert_eq!(links.case_study.as_deref(), Some("/blog/brand-refresh"));
        assert_eq!(project.og_image(), Some("/content/portfolio/brand-og.jpg"));
        assert_eq!(project.media[0].caption.as_deref(), Some("Poster"));
    }

    #[test]
    fn file_slug_overrides_written_slug() {
        let raw = "---\ntitle: X\nslug: something-else\n---\n";
        let project = Projects::parse("from-file", raw).expect("parse project");
        assert_eq!(project.slug, "from-file");
    }

    #[test]
    fn project_without_front_matter_fails() {
        assert!(Projects::parse("plain", "# Just a heading").is_err());
    }

    #[test]
    fn project_without_title_fails() {
        let err = Projects::parse("untitled", "---\norder: 1\n---\n").unwrap_err();
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn member_from_json_file() {
        let raw = r#"{ "name": "Sarah Chen", "role": "Creative Director", "order": 9, "slug": "ignored" }"#;
        let member = Members::parse("sarah-chen", raw).expect("parse member");
        assert_eq!(member.id, "sarah-chen");
        assert_eq!(member.slug, "sarah-chen");
        assert_eq!(member.order, 9.0);
    }

    #[test]
    fn member_must_be_an_object() {
        assert!(Members::parse("list", "[1, 2]").is_err());
        assert!(Members::parse("broken", "{ name: ").is_err());
    }
}
