use std::collections::HashMap;

use super::LanguagePair;

/// Available translation packages keyed by `(from, to)`.
///
/// Built once per run so a missing translation path is a plain `None`.
#[derive(Debug, Clone, Default)]
pub struct PackageIndex {
    packages: HashMap<(String, String), LanguagePair>,
}

impl PackageIndex {
    pub fn new<I: IntoIterator<Item = LanguagePair>>(packages: I) -> Self {
        let packages = packages
            .into_iter()
            .map(|pair| ((pair.from.clone(), pair.to.clone()), pair))
            .collect();
        Self { packages }
    }

    pub fn lookup(&self, from: &str, to: &str) -> Option<&LanguagePair> {
        self.packages.get(&(from.to_string(), to.to_string()))
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let index = PackageIndex::new(vec![
            LanguagePair::new("en", "pt"),
            LanguagePair::new("en", "pt"),
            LanguagePair::new("pt", "en"),
        ]);
        assert_eq!(index.len(), 2);
        assert_eq!(index.lookup("en", "pt"), Some(&LanguagePair::new("en", "pt")));
        assert!(index.lookup("en", "de").is_none());
        assert!(index.lookup("pt", "pt").is_none());
        assert!(PackageIndex::default().is_empty());
    }
}
