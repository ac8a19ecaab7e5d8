/// Parse firmware manifests, one `<name> - <version>` per line
use crate::{
    error::ParseError,
    types::{PkgCollection, PkgRecord},
};

use std::io::BufRead;

const SEPARATOR: &str = " - ";

/// Names or versions containing " - " themselves can't be expressed and are rejected.
pub fn parse_manifest<R: BufRead>(r: R) -> Result<PkgCollection, ParseError> {
    let mut res = PkgCollection::new();

    for (idx, line) in r.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let parts: Vec<&str> = trimmed.split(SEPARATOR).map(str::trim).collect();
        match parts.as_slice() {
            [name, version] if !name.is_empty() && !version.is_empty() => {
                res.insert(PkgRecord::new(name, version));
            }
            _ => {
                return Err(ParseError::InvalidManifestLine {
                    line_no: idx + 1,
                    line: trimmed.to_owned(),
                })
            }
        }
    }

    Ok(res)
}
