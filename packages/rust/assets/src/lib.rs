//! Asset path validation for content records.
//!
//! Checks that every image a project or member references exists under the
//! public assets root. Root-relative paths (`/content/team/a.jpg`) are mapped
//! onto that root. Missing primary, gallery, and media files are errors; a
//! missing Open Graph image is only a warning. Remote `http(s)` URLs are not
//! files and are skipped.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument};
use url::Url;

use gridshift_shared::{Member, Project};

// ---------------------------------------------------------------------------
// Report types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// One referenced asset that could not be found.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub severity: Severity,
    /// Which reference failed, e.g. `gallery image 2`.
    pub field: String,
    /// The path as written in the content file.
    pub path: String,
    /// Where it was looked for on disk.
    pub resolved: PathBuf,
}

/// Findings for a single project or member.
#[derive(Debug, Clone, Serialize)]
pub struct RecordReport {
    pub kind: &'static str,
    pub id: String,
    /// Project title or member name.
    pub label: String,
    pub findings: Vec<Finding>,
}

impl RecordReport {
    pub fn errors(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warnings(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(&self, severity: Severity) -> usize {
        self.findings.iter().filter(|f| f.severity == severity).count()
    }
}

/// Outcome of a full validation run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AssetReport {
    pub projects_checked: usize,
    pub members_checked: usize,
    pub records: Vec<RecordReport>,
}

impl AssetReport {
    pub fn error_count(&self) -> usize {
        self.records.iter().map(RecordReport::errors).sum()
    }

    pub fn warning_count(&self) -> usize {
        self.records.iter().map(RecordReport::warnings).sum()
    }

    /// True when no required asset is missing. Warnings do not fail a run.
    pub fn passed(&self) -> bool {
        self.error_count() == 0
    }

    /// Process exit status for CI: 1 if any error was found, otherwise 0.
    pub fn exit_code(&self) -> u8 {
        if self.passed() { 0 } else { 1 }
    }
}

impl fmt::Display for AssetReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (heading, kind) in [("Portfolio projects", "project"), ("Team members", "member")] {
            writeln!(f, "{heading}:")?;
            for record in self.records.iter().filter(|r| r.kind == kind) {
                let mark = if record.findings.is_empty() { "ok  " } else { "FAIL" };
                writeln!(f, "  {mark} {} ({})", record.label, record.id)?;
                for finding in &record.findings {
                    let level = match finding.severity {
                        Severity::Error => "error",
                        Severity::Warning => "warning",
                    };
                    writeln!(
                        f,
                        "    {level}: {} not found at {}",
                        finding.field,
                        finding.resolved.display()
                    )?;
                }
            }
            writeln!(f)?;
        }

        writeln!(f, "Summary:")?;
        writeln!(f, "  Projects checked:     {}", self.projects_checked)?;
        writeln!(f, "  Team members checked: {}", self.members_checked)?;
        writeln!(f, "  Errors:               {}", self.error_count())?;
        writeln!(f, "  Warnings:             {}", self.warning_count())?;
        writeln!(f)?;

        if !self.passed() {
            write!(f, "Asset validation FAILED: broken asset references found.")
        } else if self.warning_count() > 0 {
            write!(f, "Asset validation PASSED with warnings: fix the missing SEO images.")
        } else {
            write!(f, "Asset validation PASSED: all assets found.")
        }
    }
}

// ---------------------------------------------------------------------------
// Validator
// ---------------------------------------------------------------------------

/// Resolves asset references against a public root and checks they exist.
#[derive(Debug, Clone)]
pub struct AssetValidator {
    public_root: PathBuf,
}

impl AssetValidator {
    pub fn new(public_root: impl Into<PathBuf>) -> Self {
        Self {
            public_root: public_root.into(),
        }
    }

    pub fn public_root(&self) -> &Path {
        &self.public_root
    }

    /// Map a root-relative asset path onto the public root.
    pub fn resolve(&self, asset: &str) -> PathBuf {
        let relative = asset.strip_prefix('/').unwrap_or(asset);
        self.public_root.join(relative)
    }

    /// Check every project and member, in order.
    #[instrument(skip_all, fields(root = %self.public_root.display()))]
    pub fn validate(&self, projects: &[Project], members: &[Member]) -> AssetReport {
        let mut report = AssetReport {
            projects_checked: projects.len(),
            members_checked: members.len(),
            records: Vec::with_capacity(projects.len() + members.len()),
        };

        report.records.extend(projects.iter().map(|p| self.check_project(p)));
        report.records.extend(members.iter().map(|m| self.check_member(m)));

        info!(
            projects = report.projects_checked,
            members = report.members_checked,
            errors = report.error_count(),
            warnings = report.warning_count(),
            "asset validation complete"
        );
        report
    }

    pub fn check_project(&self, project: &Project) -> RecordReport {
        let mut findings = Vec::new();

        if let Some(image) = project.image.as_deref() {
            self.check(&mut findings, Severity::Error, "main image".into(), image);
        }
        for (i, image) in project.gallery.iter().enumerate() {
            self.check(&mut findings, Severity::Error, format!("gallery image {}", i + 1), image);
        }
        for (i, item) in project.media.iter().enumerate() {
            self.check(&mut findings, Severity::Error, format!("media {} source", i + 1), &item.src);
            if let Some(poster) = item.poster.as_deref() {
                self.check(&mut findings, Severity::Error, format!("media {} poster", i + 1), poster);
            }
        }
        if let Some(og) = project.og_image() {
            self.check(&mut findings, Severity::Warning, "SEO OG image".into(), og);
        }

        RecordReport {
            kind: "project",
            id: project.id.clone(),
            label: project.title.clone(),
            findings,
        }
    }

    pub fn check_member(&self, member: &Member) -> RecordReport {
        let mut findings = Vec::new();

        if let Some(image) = member.image.as_deref() {
            self.check(&mut findings, Severity::Error, "profile image".into(), image);
        }
        if let Some(og) = member.og_image() {
            self.check(&mut findings, Severity::Warning, "SEO OG image".into(), og);
        }

        RecordReport {
            kind: "member",
            id: member.id.clone(),
            label: member.name.clone(),
            findings,
        }
    }

    fn check(&self, findings: &mut Vec<Finding>, severity: Severity, field: String, asset: &str) {
        if asset.is_empty() {
            return;
        }
        if is_remote(asset) {
            debug!(asset, "skipping remote asset");
            return;
        }

        let resolved = self.resolve(asset);
        if resolved.is_file() {
            return;
        }

        debug!(asset, resolved = %resolved.display(), ?severity, "asset missing");
        findings.push(Finding {
            severity,
            field,
            path: asset.to_string(),
            resolved,
        });
    }
}

fn is_remote(asset: &str) -> bool {
    Url::parse(asset).is_ok_and(|u| matches!(u.scheme(), "http" | "https"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn project(fields: serde_json::Value) -> Project {
        let mut project: Project = serde_json::from_value(fields).expect("project");
        project.id = "p1".into();
        project
    }

    fn member(fields: serde_json::Value) -> Member {
        serde_json::from_value(fields).expect("member")
    }

    fn public_root() -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("tempdir");
        let portfolio = dir.path().join("content/portfolio");
        std::fs::create_dir_all(&portfolio).expect("mkdir");
        std::fs::write(portfolio.join("present.jpg"), b"jpg").expect("write");
        std::fs::create_dir_all(dir.path().join("content/team")).expect("mkdir");
        std::fs::write(dir.path().join("content/team/ali.jpg"), b"jpg").expect("write");
        dir
    }

    #[test]
    fn resolve_maps_leading_slash_to_root() {
        let v = AssetValidator::new("/srv/site/public");
        assert_eq!(v.resolve("/content/a.jpg"), PathBuf::from("/srv/site/public/content/a.jpg"));
        assert_eq!(v.resolve("content/a.jpg"), PathBuf::from("/srv/site/public/content/a.jpg"));
    }

    #[test]
    fn missing_main_image_is_one_error() {
        let root = public_root();
        let v = AssetValidator::new(root.path());
        let p = project(json!({ "title": "Missing", "image": "/content/portfolio/missing.jpg" }));

        let report = v.validate(&[p], &[]);
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.warning_count(), 0);
        assert_eq!(report.records[0].findings[0].field, "main image");
        assert!(!report.passed());
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn missing_og_image_is_only_a_warning() {
        let root = public_root();
        let v = AssetValidator::new(root.path());
        let p = project(json!({
            "title": "Present",
            "image": "/content/portfolio/present.jpg",
            "seo": { "ogImage": "/content/portfolio/og-missing.jpg" }
        }));

        let report = v.validate(&[p], &[]);
        assert_eq!(report.error_count(), 0);
        assert_eq!(report.warning_count(), 1);
        assert!(report.passed());
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn gallery_and_media_are_checked() {
        let root = public_root();
        let v = AssetValidator::new(root.path());
        let p = project(json!({
            "title": "Gallery",
            "gallery": ["/content/portfolio/present.jpg", "/content/portfolio/gone.jpg"],
            "media": [
                { "type": "video", "src": "/content/portfolio/reel.mp4", "poster": "/content/portfolio/present.jpg" },
                { "type": "video", "src": "https://cdn.example/reel.mp4" }
            ]
        }));

        let record = v.check_project(&p);
        let fields: Vec<&str> = record.findings.iter().map(|f| f.field.as_str()).collect();
        assert_eq!(fields, ["gallery image 2", "media 1 source"]);
        assert_eq!(record.errors(), 2);
    }

    #[test]
    fn members_are_checked() {
        let root = public_root();
        let v = AssetValidator::new(root.path());
        let ok = member(json!({ "id": "ali", "name": "Ali", "role": "Lead", "image": "/content/team/ali.jpg" }));
        let bad = member(json!({
            "id": "sam",
            "name": "Sam",
            "role": "Dev",
            "image": "/content/team/sam.jpg",
            "seo": { "ogImage": "/content/team/sam-og.jpg" }
        }));

        let report = v.validate(&[], &[ok, bad]);
        assert_eq!(report.members_checked, 2);
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.warning_count(), 1);
        assert!(report.records[0].findings.is_empty());
    }

    #[test]
    fn empty_and_absent_paths_are_ignored() {
        let root = public_root();
        let v = AssetValidator::new(root.path());
        let p = project(json!({ "title": "Bare", "image": "" }));
        assert!(v.check_project(&p).findings.is_empty());
    }

    #[test]
    fn summary_reports_outcome() {
        let root = public_root();
        let v = AssetValidator::new(root.path());

        let clean = v.validate(&[project(json!({ "title": "Clean" }))], &[]);
        let text = clean.to_string();
        assert!(text.contains("ok   Clean (p1)"));
        assert!(text.contains("PASSED: all assets found"));

        let failing = v.validate(
            &[project(json!({ "title": "Broken", "image": "/content/portfolio/missing.jpg" }))],
            &[],
        );
        let text = failing.to_string();
        assert!(text.contains("FAIL Broken (p1)"));
        assert!(text.contains("error: main image not found at"));
        assert!(text.contains("Errors:               1"));
        assert!(text.ends_with("FAILED: broken asset references found."));
    }
}
