//! Import requirements and their aggregation.
//!
//! Every type, expression and statement contributes a flat, possibly
//! duplicated stream of [`ImportSpec`]s for the target being rendered. The
//! stream is only deduplicated and ordered here, once per script.

use std::collections::{BTreeMap, BTreeSet};

/// One import requirement.
///
/// What `name` means depends on the target: a symbol imported from the
/// module (Python, TypeScript) or the alias given to it (PHP). `None` means
/// the module itself is imported.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImportSpec {
    pub module: String,
    pub name: Option<String>,
}

impl ImportSpec {
    pub fn module(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            name: None,
        }
    }

    pub fn named(module: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            name: Some(name.into()),
        }
    }
}

/// Imports after deduplication, sorted by module and then by name.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportGroups {
    /// Modules imported as a whole.
    pub modules: Vec<String>,
    /// Modules with the names imported from them.
    pub names: Vec<(String, Vec<String>)>,
}

impl ImportGroups {
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty() && self.names.is_empty()
    }
}

/// Deduplicate and sort a stream of import requirements.
pub fn aggregate(specs: impl IntoIterator<Item = ImportSpec>) -> ImportGroups {
    let mut modules = BTreeSet::new();
    let mut names: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for spec in specs {
        match spec.name {
            None => {
                modules.insert(spec.module);
            }
            Some(name) => {
                names.entry(spec.module).or_default().insert(name);
            }
        }
    }
    ImportGroups {
        modules: modules.into_iter().collect(),
        names: names
            .into_iter()
            .map(|(module, names)| (module, names.into_iter().collect()))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_dedups_and_sorts() {
        let groups = aggregate(vec![
            ImportSpec::named("typing", "Union"),
            ImportSpec::module("abc"),
            ImportSpec::named("typing", "List"),
            ImportSpec::named("module1", "Foo"),
            ImportSpec::named("typing", "List"),
            ImportSpec::module("abc"),
        ]);
        assert_eq!(groups.modules, vec!["abc".to_string()]);
        assert_eq!(
            groups.names,
            vec![
                ("module1".to_string(), vec!["Foo".to_string()]),
                (
                    "typing".to_string(),
                    vec!["List".to_string(), "Union".to_string()]
                ),
            ]
        );
    }

    #[test]
    fn test_aggregate_empty() {
        assert!(aggregate(Vec::new()).is_empty());
    }
}
