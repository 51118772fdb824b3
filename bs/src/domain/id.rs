//! Id generation and resolution
//!
//! All ids use the format: `{6-char-hex}-{kind}-{slug}`
//! Example: `019430-board-to-do`

/// Generate an id from kind and title
pub fn generate_id(kind: &str, title: &str) -> String {
    let uuid = uuid::Uuid::now_v7();
    let hex_prefix = &uuid.to_string()[..6];
    let slug = slugify(title);
    format!("{}-{}-{}", hex_prefix, kind, slug)
}

/// Slugify a title for use in ids
fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        // Strip apostrophes entirely, replace other non-alphanumeric with hyphens
        .filter_map(|c| {
            if c.is_alphanumeric() {
                Some(c)
            } else if c == '\'' || c == '\u{2019}' || c == '\u{2018}' {
                None
            } else {
                Some('-')
            }
        })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Resolution of partial id references (CLI convenience)
pub struct IdResolver<'a> {
    ids: Vec<&'a str>,
}

impl<'a> IdResolver<'a> {
    pub fn new(ids: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    /// Resolve a partial reference to a full id
    ///
    /// Returns:
    /// - Ok(Some(id)) if exactly one match
    /// - Ok(None) if no matches
    /// - Err with candidates if ambiguous
    pub fn resolve(&self, reference: &str) -> Result<Option<&'a str>, Vec<String>> {
        let matches: Vec<&str> = self
            .ids
            .iter()
            .copied()
            .filter(|id| Self::matches(id, reference))
            .collect();

        match matches.len() {
            0 => Ok(None),
            1 => Ok(matches.first().copied()),
            _ => Err(matches.into_iter().map(String::from).collect()),
        }
    }

    /// Check if an id matches a reference
    fn matches(id: &str, reference: &str) -> bool {
        // Exact match
        if id == reference {
            return true;
        }

        // Hex prefix match (first 6 chars)
        if id.starts_with(reference) {
            return true;
        }

        // Slug contains match
        if let Some(slug_start) = id.find('-') {
            let slug_part = &id[slug_start + 1..];
            if slug_part.contains(reference) {
                return true;
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id() {
        let id = generate_id("board", "To do");
        assert!(id.len() > 10);
        assert!(id.contains("-board-"));
        assert!(id.ends_with("to-do"));
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("In Progress"), "in-progress");
        assert_eq!(slugify("Multiple   Spaces"), "multiple-spaces");
        // Apostrophes are stripped, not converted to hyphens
        assert_eq!(slugify("don't stop"), "dont-stop");
    }

    #[test]
    fn test_id_resolver_exact() {
        let ids = ["019430-board-to-do", "019431-board-done"];
        let resolver = IdResolver::new(ids);
        assert_eq!(
            resolver.resolve("019430-board-to-do").unwrap(),
            Some("019430-board-to-do")
        );
    }

    #[test]
    fn test_id_resolver_hex_prefix() {
        let ids = ["019430-board-to-do", "019431-board-done"];
        let resolver = IdResolver::new(ids);
        assert_eq!(resolver.resolve("019431").unwrap(), Some("019431-board-done"));
    }

    #[test]
    fn test_id_resolver_slug_match() {
        let ids = ["019430-board-to-do", "019431-board-done"];
        let resolver = IdResolver::new(ids);
        assert_eq!(resolver.resolve("done").unwrap(), Some("019431-board-done"));
    }

    #[test]
    fn test_id_resolver_ambiguous() {
        let ids = ["019430-task-buy-milk", "019431-task-buy-bread"];
        let resolver = IdResolver::new(ids);
        let result = resolver.resolve("buy");
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().len(), 2);
    }

    #[test]
    fn test_id_resolver_no_match() {
        let resolver = IdResolver::new(["019430-board-to-do"]);
        assert_eq!(resolver.resolve("nonexistent").unwrap(), None);
    }
}
