use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use crate::core::error::FilterError;
use crate::parsing::sample_list;

/// Set of sample names declared haploid. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PloidySet {
    names: BTreeSet<String>,
}

/// A haploid sample resolved to its VCF sample column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HaploidSample {
    pub name: String,
    /// 0-based index among the sample columns (first sample after FORMAT is 0)
    pub column: usize,
}

impl PloidySet {
    /// Build a set from sample names
    ///
    /// # Errors
    ///
    /// Returns `FilterError::Configuration` if no names are given.
    pub fn new<I, S>(names: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: BTreeSet<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(FilterError::configuration("haploid sample list is empty"));
        }
        Ok(Self { names })
    }

    /// Load the haploid list from a file, one name per line
    ///
    /// # Errors
    ///
    /// Returns `FilterError::Io` if the file cannot be read, or
    /// `FilterError::Configuration` if it lists no names.
    pub fn load(path: &Path) -> Result<Self, FilterError> {
        sample_list::parse_sample_list_file(path)
    }

    /// Load the haploid list from text, one name per line
    ///
    /// # Errors
    ///
    /// Returns `FilterError::Configuration` if the text lists no names.
    pub fn from_text(text: &str) -> Result<Self, FilterError> {
        sample_list::parse_sample_list_text(text)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Map every haploid name to its sample column, sorted by column.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::Configuration` if a name is not among the VCF
    /// samples, or if it labels more than one column.
    pub fn resolve<S: AsRef<str>>(
        &self,
        sample_names: &[S],
    ) -> Result<Vec<HaploidSample>, FilterError> {
        let mut columns: HashMap<&str, Vec<usize>> = HashMap::new();
        for (column, name) in sample_names.iter().enumerate() {
            let name = name.as_ref();
            if self.names.contains(name) {
                columns.entry(name).or_default().push(column);
            }
        }

        let missing: Vec<&str> = self
            .iter()
            .filter(|name| !columns.contains_key(name))
            .collect();
        if !missing.is_empty() {
            return Err(FilterError::Configuration(format!(
                "haploid sample(s) not found in VCF header: {}",
                missing.join(", ")
            )));
        }

        let mut resolved = Vec::with_capacity(self.names.len());
        for (name, found) in columns {
            if found.len() > 1 {
                return Err(FilterError::Configuration(format!(
                    "haploid sample '{name}' appears in {} sample columns",
                    found.len()
                )));
            }
            resolved.push(HaploidSample {
                name: name.to_string(),
                column: found[0],
            });
        }

        resolved.sort_by_key(|sample| sample.column);
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_set_is_rejected() {
        let result = PloidySet::new(Vec::<String>::new());
        assert!(matches!(result, Err(FilterError::Configuration(_))));
    }

    #[test]
    fn test_duplicates_collapse() {
        let set = PloidySet::new(["m1", "m2", "m1"]).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains("m1"));
        assert!(!set.contains("f1"));
    }

    #[test]
    fn test_from_text() {
        let set = PloidySet::from_text("# males\nm1\n\n  m2  \n").unwrap();
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["m1", "m2"]);
        assert!(!set.is_empty());

        assert!(PloidySet::from_text("# nobody\n\n").is_err());
    }

    #[test]
    fn test_resolve_sorts_by_column() {
        let set = PloidySet::new(["m2", "m1"]).unwrap();
        let resolved = set.resolve(&["f1", "m1", "m2"]).unwrap();
        assert_eq!(
            resolved,
            vec![
                HaploidSample { name: "m1".to_string(), column: 1 },
                HaploidSample { name: "m2".to_string(), column: 2 },
            ]
        );
    }

    #[test]
    fn test_resolve_unknown_sample() {
        let set = PloidySet::new(["m1", "ghost"]).unwrap();
        let err = set.resolve(&["f1", "m1"]).unwrap_err();
        match err {
            FilterError::Configuration(message) => assert!(message.contains("ghost")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_resolve_duplicate_column() {
        let set = PloidySet::new(["m1"]).unwrap();
        let result = set.resolve(&["m1", "f1", "m1"]);
        assert!(matches!(result, Err(FilterError::Configuration(_))));
    }
}
