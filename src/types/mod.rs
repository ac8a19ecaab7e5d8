mod diff;
mod version;

pub use diff::{diff, Diff, DiffReport};
pub use version::compare_versions;

use std::collections::{hash_map, HashMap};

/// One package entry, either from an upstream index stanza or a manifest line
#[allow(dead_code)]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PkgRecord {
    pub name: String,
    pub version: String,
    pub depends: Vec<String>,
    pub provides: Option<String>,
    pub alternatives: Vec<String>,
    pub license: Option<String>,
    pub section: Option<String>,
    pub cpe_id: Option<String>,
    pub architecture: Option<String>,
    // In bytes, as published by the index
    pub installed_size: Option<u64>,
    pub filename: Option<String>,
    pub size: Option<u64>,
    pub sha256sum: Option<String>,
    pub description: Option<String>,
}

impl PkgRecord {
    pub fn new(name: &str, version: &str) -> Self {
        PkgRecord {
            name: name.to_owned(),
            version: version.to_owned(),
            ..Default::default()
        }
    }
}

/// Name-keyed set of packages from one source
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PkgCollection {
    pkgs: HashMap<String, PkgRecord>,
}

impl PkgCollection {
    pub fn new() -> Self {
        PkgCollection {
            pkgs: HashMap::new(),
        }
    }

    /// Insert a record, replacing any previous record with the same name
    pub fn insert(&mut self, pkg: PkgRecord) -> Option<PkgRecord> {
        self.pkgs.insert(pkg.name.clone(), pkg)
    }

    pub fn get(&self, name: &str) -> Option<&PkgRecord> {
        self.pkgs.get(name)
    }

    pub fn len(&self) -> usize {
        self.pkgs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pkgs.is_empty()
    }

    pub fn iter(&self) -> hash_map::Values<'_, String, PkgRecord> {
        self.pkgs.values()
    }

    /// Overlay `other` on top of this collection. Entries of `other` win on name collision.
    pub fn merge(mut self, other: PkgCollection) -> Self {
        self.pkgs.extend(other.pkgs);
        self
    }
}

impl FromIterator<PkgRecord> for PkgCollection {
    fn from_iter<I: IntoIterator<Item = PkgRecord>>(iter: I) -> Self {
        let mut res = PkgCollection::new();
        for pkg in iter {
            res.insert(pkg);
        }
        res
    }
}

impl<'a> IntoIterator for &'a PkgCollection {
    type Item = &'a PkgRecord;
    type IntoIter = hash_map::Values<'a, String, PkgRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod test {
    use super::{PkgCollection, PkgRecord};

    fn collection(pkgs: &[(&str, &str)]) -> PkgCollection {
        pkgs.iter().map(|(n, v)| PkgRecord::new(n, v)).collect()
    }

    #[test]
    fn last_record_wins() {
        let pkgs = collection(&[("A", "1"), ("B", "1"), ("A", "2")]);
        assert_eq!(pkgs.len(), 2);
        assert_eq!(pkgs.get("A").unwrap().version, "2");
    }

    #[test]
    fn addon_wins_on_merge() {
        let base = collection(&[("A", "1")]);
        let addon = collection(&[("A", "2"), ("B", "1")]);
        let merged = base.merge(addon);
        assert_eq!(merged, collection(&[("A", "2"), ("B", "1")]));
    }

    #[test]
    fn merge_keeps_base_only_entries() {
        let base = collection(&[("A", "1"), ("C", "3")]);
        let merged = base.merge(PkgCollection::new());
        assert_eq!(merged.len(), 2);
        assert!(merged.get("C").is_some());
        assert!(!merged.is_empty());
    }
}
