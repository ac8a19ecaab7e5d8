use super::{PkgCollection, PkgRecord};

/// A package both sides ship, at different versions
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diff {
    pub name: String,
    pub upstream_version: String,
    pub downstream_version: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiffReport {
    pub differences: Vec<Diff>,
    // Packages downstream ships that upstream doesn't know about
    pub downstream_only: Vec<PkgRecord>,
}

impl DiffReport {
    pub fn is_empty(&self) -> bool {
        self.differences.is_empty() && self.downstream_only.is_empty()
    }
}

/// Compare what downstream ships against upstream.
///
/// Versions are compared as plain strings. Packages that only exist upstream
/// are not reported.
pub fn diff(downstream: &PkgCollection, upstream: &PkgCollection) -> DiffReport {
    let mut res = DiffReport::default();
    for pkg in downstream {
        match upstream.get(&pkg.name) {
            Some(up) => {
                if up.version != pkg.version {
                    res.differences.push(Diff {
                        name: pkg.name.clone(),
                        upstream_version: up.version.clone(),
                        downstream_version: pkg.version.clone(),
                    });
                }
            }
            None => res.downstream_only.push(pkg.clone()),
        }
    }

    // Collections are unordered
    res.differences.sort_by(|a, b| a.name.cmp(&b.name));
    res.downstream_only.sort_by(|a, b| a.name.cmp(&b.name));
    res
}

#[cfg(test)]
mod test {
    use super::*;

    fn collection(pkgs: &[(&str, &str)]) -> PkgCollection {
        pkgs.iter().map(|(n, v)| PkgRecord::new(n, v)).collect()
    }

    #[test]
    fn version_mismatch() {
        let downstream = collection(&[("A", "1"), ("B", "2")]);
        let upstream = collection(&[("A", "1"), ("B", "3"), ("C", "9")]);
        let res = diff(&downstream, &upstream);
        assert_eq!(
            res.differences,
            vec![Diff {
                name: "B".to_owned(),
                upstream_version: "3".to_owned(),
                downstream_version: "2".to_owned(),
            }]
        );
        assert!(res.downstream_only.is_empty());
    }

    #[test]
    fn downstream_only() {
        let downstream = collection(&[("zz-local", "1"), ("A", "1"), ("custom", "0.1")]);
        let upstream = collection(&[("A", "1")]);
        let res = diff(&downstream, &upstream);
        assert!(res.differences.is_empty());
        let names: Vec<&str> = res.downstream_only.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["custom", "zz-local"]);
    }

    #[test]
    fn equivalent_versions_still_differ() {
        // Plain string inequality, even if the comparator calls them equal
        let downstream = collection(&[("A", "1.02.0")]);
        let upstream = collection(&[("A", "1.2.0")]);
        let res = diff(&downstream, &upstream);
        assert_eq!(res.differences.len(), 1);
    }

    #[test]
    fn identical_sides() {
        let pkgs = collection(&[("A", "1"), ("B", "2")]);
        assert!(diff(&pkgs, &pkgs).is_empty());
        assert!(diff(&PkgCollection::new(), &pkgs).is_empty());
    }

    #[test]
    fn sorted_by_name() {
        let downstream = collection(&[("c", "1"), ("a", "1"), ("b", "1")]);
        let upstream = collection(&[("c", "2"), ("a", "2"), ("b", "2")]);
        let res = diff(&downstream, &upstream);
        let names: Vec<&str> = res.differences.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }
}
