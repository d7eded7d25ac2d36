//! Package filtering functionality

/// Excludes packages whose name contains a substring, ignoring case
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageFilter {
    needle: Option<String>,
}

impl PackageFilter {
    /// Create a new filter; an empty substring disables filtering
    pub fn new(substring: Option<&str>) -> Self {
        Self {
            needle: substring
                .filter(|s| !s.is_empty())
                .map(|s| s.to_lowercase()),
        }
    }

    /// Check if a package should be left out of the graph
    pub fn should_skip(&self, package: &str) -> bool {
        self.needle
            .as_deref()
            .is_some_and(|needle| package.to_lowercase().contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_filter_skips_nothing() {
        let filter = PackageFilter::new(None);
        assert!(!filter.should_skip("xunit.test"));
    }

    #[test]
    fn test_empty_substring_disables_filter() {
        let filter = PackageFilter::new(Some(""));
        assert_eq!(filter, PackageFilter::new(None));
        assert!(!filter.should_skip("anything"));
    }

    #[test]
    fn test_match_ignores_case() {
        let filter = PackageFilter::new(Some("TEST"));
        assert!(filter.should_skip("LibTest"));
        assert!(filter.should_skip("Microsoft.NET.Test.Sdk"));
        assert!(!filter.should_skip("LibCore"));
    }
}
