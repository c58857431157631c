//! Visibility filtering and ordering rules shared by every content kind.

use std::cmp::Ordering;

use gridshift_shared::{Member, Project};

/// The fields listing and home-page selection depend on.
pub trait Listed {
    fn is_draft(&self) -> bool;
    fn is_hidden(&self) -> bool;
    fn is_featured(&self) -> bool;
    fn order(&self) -> f64;
    fn home_weight(&self) -> f64;
    /// ISO date used to break `order` ties. Kinds without one return `None`.
    fn sort_date(&self) -> Option<&str> {
        None
    }

    /// Whether the record may appear in any public listing.
    fn is_public(&self) -> bool {
        !self.is_draft() && !self.is_hidden()
    }
}

impl Listed for Project {
    fn is_draft(&self) -> bool {
        self.draft
    }
    fn is_hidden(&self) -> bool {
        self.hidden
    }
    fn is_featured(&self) -> bool {
        self.featured_on_home
    }
    fn order(&self) -> f64 {
        self.order
    }
    fn home_weight(&self) -> f64 {
        self.home_weight
    }
    fn sort_date(&self) -> Option<&str> {
        self.date.as_deref()
    }
}

impl Listed for Member {
    fn is_draft(&self) -> bool {
        self.draft
    }
    fn is_hidden(&self) -> bool {
        self.hidden
    }
    fn is_featured(&self) -> bool {
        self.featured_on_home
    }
    fn order(&self) -> f64 {
        self.order
    }
    fn home_weight(&self) -> f64 {
        self.home_weight
    }
}

/// Listing order: `order` descending, then date descending.
///
/// Dates compare as strings, so they must be ISO formatted; a missing date
/// sorts after any present one.
pub fn listing_order<T: Listed>(a: &T, b: &T) -> Ordering {
    b.order().total_cmp(&a.order()).then_with(|| {
        b.sort_date()
            .unwrap_or_default()
            .cmp(a.sort_date().unwrap_or_default())
    })
}

/// Drop drafts and hidden records, then sort for listing.
pub fn publish<T: Listed>(mut records: Vec<T>) -> Vec<T> {
    records.retain(|r| r.is_public());
    records.sort_by(listing_order);
    records
}

/// Featured subset of an already-published listing, heaviest first, at most `limit`.
pub fn featured<T: Listed>(mut listed: Vec<T>, limit: usize) -> Vec<T> {
    listed.retain(|r| r.is_featured());
    listed.sort_by(|a, b| b.home_weight().total_cmp(&a.home_weight()));
    listed.truncate(limit);
    listed
}
