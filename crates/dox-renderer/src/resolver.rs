//! File-based cross-reference resolution.

use std::collections::HashMap;

use crate::delegate::{LinkResolver, Locator};

/// [`LinkResolver`] mapping file identifiers to output file names.
///
/// In-project targets become `{file}{ext}#{anchor}`. Targets with a scope are
/// only reachable when the scope was registered with [`with_tag`](Self::with_tag);
/// their locator is prefixed with the tag's base URL.
///
/// # Example
///
/// ```
/// use dox_renderer::{FileLinkResolver, LinkResolver};
///
/// let resolver = FileLinkResolver::new(".html")
///     .with_tag("stdlib", "https://example.org/std/");
///
/// let local = resolver.resolve(None, "classFoo", Some("a1")).unwrap();
/// assert_eq!(local.href, "classFoo.html#a1");
///
/// let external = resolver.resolve(Some("stdlib"), "vector", None).unwrap();
/// assert_eq!(external.href, "https://example.org/std/vector.html");
/// assert!(resolver.resolve(Some("boost"), "any", None).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct FileLinkResolver {
    file_extension: String,
    tags: HashMap<String, String>,
}

impl FileLinkResolver {
    /// Create a resolver appending `file_extension` (e.g. `".html"`).
    #[must_use]
    pub fn new(file_extension: impl Into<String>) -> Self {
        Self {
            file_extension: file_extension.into(),
            tags: HashMap::new(),
        }
    }

    /// Register an external scope and the base URL its files live under.
    #[must_use]
    pub fn with_tag(mut self, scope: impl Into<String>, base_url: impl Into<String>) -> Self {
        self.tags.insert(scope.into(), base_url.into());
        self
    }

    /// Append the output file extension unless `file` already carries it.
    #[must_use]
    pub fn file_name(&self, file: &str) -> String {
        with_extension(file, &self.file_extension)
    }
}

/// Append `extension` to `file` unless it already ends with it.
pub(crate) fn with_extension(file: &str, extension: &str) -> String {
    if file.ends_with(extension) {
        file.to_owned()
    } else {
        format!("{file}{extension}")
    }
}

impl LinkResolver for FileLinkResolver {
    fn resolve(&self, scope: Option<&str>, file: &str, anchor: Option<&str>) -> Option<Locator> {
        if file.is_empty() {
            return None;
        }

        let (base, external) = match scope {
            Some(scope) => (self.tags.get(scope)?.as_str(), true),
            None => ("", false),
        };

        let mut href = format!("{base}{}", self.file_name(file));
        if let Some(anchor) = anchor.filter(|a| !a.is_empty()) {
            href.push('#');
            href.push_str(anchor);
        }
        Some(Locator { href, external })
    }
}
