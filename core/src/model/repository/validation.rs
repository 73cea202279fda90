use chrono::{Datelike, Utc};

use crate::model::{Category, Resource};

use super::StoreError;

pub const MIN_YEAR: i32 = 1900;
pub const MAX_RATING: f64 = 10.0;

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

pub fn validate_resource(resource: &Resource) -> Vec<String> {
    let mut errors = Vec::new();
    if is_blank(&resource.title) {
        errors.push("title must not be empty".to_owned());
    }
    if is_blank(&resource.category) {
        errors.push("category must not be empty".to_owned());
    }
    if is_blank(&resource.description) {
        errors.push("description must not be empty".to_owned());
    }
    if !(0.0..=MAX_RATING).contains(&resource.rating) {
        errors.push("rating must be between 0 and 10".to_owned());
    }
    if let Some(year) = resource.year {
        let max_year = Utc::now().year() + 5;
        if !(MIN_YEAR..=max_year).contains(&year) {
            errors.push(format!("year must be between {} and {}", MIN_YEAR, max_year));
        }
    }
    errors
}

pub fn validate_category(category: &Category) -> Vec<String> {
    let mut errors = Vec::new();
    if is_blank(&category.name) {
        errors.push("name must not be empty".to_owned());
    }
    if is_blank(&category.slug) {
        errors.push("slug must not be empty".to_owned());
    } else if !is_valid_slug(&category.slug) {
        errors.push("slug may only contain lowercase letters, digits and hyphens".to_owned());
    }
    errors
}

pub fn ensure_valid(errors: Vec<String>) -> Result<(), StoreError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(StoreError::Validation(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_pattern() {
        assert!(is_valid_slug("sci-fi-2"));
        assert!(!is_valid_slug("Sci-Fi"));
        assert!(!is_valid_slug("sci fi"));
        assert!(!is_valid_slug("科幻"));
        assert!(!is_valid_slug(""));
    }
}
