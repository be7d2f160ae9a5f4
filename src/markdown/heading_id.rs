//! Heading anchor generation

use std::collections::HashMap;

/// Turn heading text into a URL-safe anchor name.
///
/// Letters and digits are kept (lower-cased), any run of other characters
/// collapses into a single `-`. Leading and trailing separators are dropped.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Tracks the ids handed out within one document.
#[derive(Debug, Default)]
pub struct HeadingIds {
    used: HashMap<String, usize>,
}

impl HeadingIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an explicit id as taken so generated ids steer around it.
    pub fn reserve(&mut self, id: &str) {
        self.used.entry(id.to_string()).or_insert(0);
    }

    /// Return `base`, or `base-N` with the first free N when `base` is taken.
    pub fn unique(&mut self, base: &str) -> String {
        let Some(&count) = self.used.get(base) else {
            self.used.insert(base.to_string(), 0);
            return base.to_string();
        };

        let mut n = count + 1;
        loop {
            let candidate = format!("{}-{}", base, n);
            if !self.used.contains_key(&candidate) {
                self.used.insert(base.to_string(), n);
                self.used.insert(candidate.clone(), 0);
                return candidate;
            }
            n += 1;
        }
    }
}
