//! Duplicate image name detection.
//!
//! Two upstream projects can publish images with the same basename
//! (`app:1.0` from two different source repositories). Mirrored into a
//! single flat destination namespace they would collide, so the whole
//! input set is scanned once, before any copy starts, for basenames seen
//! under more than one distinct source namespace. The resulting set is
//! read-only for the rest of the run.

use crate::image::ImageSpec;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};


/// Image basenames that appear under at least two distinct source
/// namespaces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DuplicateSet {
    flagged: HashSet<String>,
}

impl DuplicateSet {
    /// Scans the parsed input set in one forward pass.
    ///
    /// A name is flagged when a later spec with the same basename carries
    /// a namespace different from the first-seen one. Once flagged a name
    /// stays flagged, even if later entries match the original namespace
    /// again. Final membership does not depend on input order.
    ///
    /// # Examples
    ///
    /// ```
    /// use libregsync::{DuplicateSet, ImageSpec};
    ///
    /// let specs = vec![
    ///     ImageSpec::parse("library/nginx:latest").unwrap(),
    ///     ImageSpec::parse("otherorg/nginx:latest").unwrap(),
    /// ];
    /// let duplicates = DuplicateSet::detect(&specs);
    /// assert!(duplicates.is_duplicate("nginx"));
    /// ```
    pub fn detect(specs: &[ImageSpec]) -> Self {
        let mut first_seen: HashMap<&str, &str> = HashMap::new();
        let mut flagged = HashSet::new();

        for spec in specs {
            match first_seen.entry(spec.image_name.as_str()) {
                Entry::Occupied(entry) => {
                    if *entry.get() != spec.source_namespace {
                        flagged.insert(spec.image_name.clone());
                    }
                }
                Entry::Vacant(entry) => {
                    entry.insert(spec.source_namespace.as_str());
                }
            }
        }

        Self { flagged }
    }

    /// Whether `name` needs a disambiguating destination prefix.
    pub fn is_duplicate(&self, name: &str) -> bool {
        self.flagged.contains(name)
    }

    /// Flagged names in sorted order, for logging.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.flagged.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn is_empty(&self) -> bool {
        self.flagged.is_empty()
    }

    pub fn len(&self) -> usize {
        self.flagged.len()
    }
}
