use crate::{Error, Result};
use confcat_types::Category;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// What to do when distinct values of one category produce the same slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlugPolicy {
    /// Later values get `_2`, `_3`, ... appended.
    #[default]
    Suffix,
    /// Refuse to report the category.
    Error,
    /// Later values reuse the slug and overwrite earlier listings.
    Overwrite,
}

/// Filesystem-safe name for an attribute value.
pub fn slugify(value: &str) -> String {
    value
        .replace('/', "_")
        .replace(' ', "_")
        .replace('&', "and")
        .replace(['(', ')'], "")
        .replace('-', "_")
        .to_lowercase()
}

/// Assign one slug per value, resolving collisions according to `policy`.
///
/// `values` must be distinct; the returned slugs line up with them.
pub fn assign_slugs(category: Category, values: &[&str], policy: SlugPolicy) -> Result<Vec<String>> {
    let mut taken: HashSet<String> = HashSet::new();
    let mut owners: HashMap<String, Vec<String>> = HashMap::new();
    let mut slugs = Vec::with_capacity(values.len());

    for value in values {
        let base = slugify(value);
        owners.entry(base.clone()).or_default().push(value.to_string());

        let slug = if !taken.contains(&base) {
            base
        } else {
            match policy {
                SlugPolicy::Overwrite => {
                    warn!(%category, slug = %base, value, "slug collision, overwriting listing");
                    base
                }
                SlugPolicy::Error => {
                    return Err(Error::SlugCollision {
                        category,
                        values: owners.remove(&base).unwrap_or_default(),
                        slug: base,
                    });
                }
                SlugPolicy::Suffix => {
                    let mut n = 2;
                    let mut candidate = format!("{}_{}", base, n);
                    while taken.contains(&candidate) || values.iter().any(|v| slugify(v) == candidate) {
                        n += 1;
                        candidate = format!("{}_{}", base, n);
                    }
                    warn!(%category, slug = %base, renamed = %candidate, value, "slug collision, suffixing");
                    candidate
                }
            }
        };

        taken.insert(slug.clone());
        slugs.push(slug);
    }

    Ok(slugs)
}
