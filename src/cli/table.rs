/// Show diff results in tables
use crate::types::{compare_versions, Diff, PkgRecord};

use anyhow::Result;
use console::style;
use std::{cmp::Ordering, io::Write};
use tabled::{Alignment, Full, Modify, Style, Table, Tabled};

#[derive(Tabled)]
struct DiffRow {
    #[header("Name")]
    name: String,
    #[header("Upstream")]
    upstream: String,
    #[header("Downstream")]
    downstream: String,
}

#[derive(Tabled)]
struct DownstreamOnlyRow {
    #[header("Name")]
    name: String,
    #[header("Version")]
    version: String,
}

impl From<&Diff> for DiffRow {
    fn from(d: &Diff) -> Self {
        // Upstream is green when it is ahead of the firmware, yellow when behind
        let upstream = match compare_versions(&d.upstream_version, &d.downstream_version) {
            Ordering::Greater => style(&d.upstream_version).green().to_string(),
            Ordering::Less => style(&d.upstream_version).yellow().to_string(),
            Ordering::Equal => d.upstream_version.clone(),
        };
        DiffRow {
            name: style(&d.name).bold().to_string(),
            upstream,
            downstream: d.downstream_version.clone(),
        }
    }
}

fn render<T: Tabled>(rows: &[T]) -> String {
    Table::new(rows)
        .with(Modify::new(Full).with(Alignment::left()))
        .with(Modify::new(Full).with(|s: &str| format!(" {} ", s)))
        .with(Style::psql())
        .to_string()
}

/// Print packages whose versions differ from upstream
pub fn show_differences(out: &mut dyn Write, diffs: &[Diff]) -> Result<()> {
    if diffs.is_empty() {
        writeln!(
            out,
            "All packages shared with upstream are at the {} version.",
            style("same").green().bold()
        )?;
        return Ok(());
    }

    writeln!(
        out,
        "These {} packages {} from upstream:",
        diffs.len(),
        style("differ").yellow().bold()
    )?;
    let rows: Vec<DiffRow> = diffs.iter().map(DiffRow::from).collect();
    writeln!(out, "{}", render(&rows))?;
    Ok(())
}

/// Print packages that upstream doesn't ship
pub fn show_downstream_only(out: &mut dyn Write, pkgs: &[PkgRecord]) -> Result<()> {
    if pkgs.is_empty() {
        writeln!(
            out,
            "Every package in the manifest is {} upstream.",
            style("available").green().bold()
        )?;
        return Ok(());
    }

    writeln!(
        out,
        "These {} packages are {} upstream:",
        pkgs.len(),
        style("missing").red().bold()
    )?;
    let rows: Vec<DownstreamOnlyRow> = pkgs
        .iter()
        .map(|p| DownstreamOnlyRow {
            name: style(&p.name).bold().to_string(),
            version: p.version.clone(),
        })
        .collect();
    writeln!(out, "{}", render(&rows))?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    fn plain(buf: Vec<u8>) -> String {
        console::strip_ansi_codes(&String::from_utf8(buf).unwrap()).to_string()
    }

    #[test]
    fn differences_table() {
        let diffs = vec![
            Diff {
                name: "busybox".to_owned(),
                upstream_version: "1.36.1-r2".to_owned(),
                downstream_version: "1.36.1-r1".to_owned(),
            },
            Diff {
                name: "dnsmasq".to_owned(),
                upstream_version: "2.89-r5".to_owned(),
                downstream_version: "2.90-r1".to_owned(),
            },
        ];
        let mut out = Vec::new();
        show_differences(&mut out, &diffs).unwrap();
        let out = plain(out);
        assert!(out.starts_with("These 2 packages differ from upstream:"));
        for header in ["Name", "Upstream", "Downstream"] {
            assert!(out.contains(header));
        }
        assert!(out.contains("1.36.1-r2"));
        assert!(out.contains("2.90-r1"));
    }

    #[test]
    fn downstream_only_table() {
        let pkgs = vec![PkgRecord::new("my-firmware-tools", "0.3")];
        let mut out = Vec::new();
        show_downstream_only(&mut out, &pkgs).unwrap();
        let out = plain(out);
        assert!(out.starts_with("These 1 packages are missing upstream:"));
        assert!(out.contains("my-firmware-tools"));
        assert!(out.contains("Version"));
    }

    #[test]
    fn empty_sections() {
        let mut out = Vec::new();
        show_differences(&mut out, &[]).unwrap();
        show_downstream_only(&mut out, &[]).unwrap();
        let out = plain(out);
        assert_eq!(out.lines().count(), 2);
        assert!(!out.contains("Name"));
    }
}
