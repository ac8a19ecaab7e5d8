/// Parse opkg style package indices (`Packages` files)
use crate::{error::ParseError, types::PkgRecord};

use nom::{
    bytes::complete::take_while1,
    character::complete::{char, space0},
    combinator::rest,
    IResult,
};
use std::io::BufRead;

/// Parse one `Key: Value` line
fn parse_field(i: &str) -> IResult<&str, (&str, &str)> {
    let (i, key) = take_while1(|c: char| c != ':')(i)?;
    let (i, _) = char(':')(i)?;
    let (i, _) = space0(i)?;
    let (i, value) = rest(i)?;

    Ok((i, (key.trim_end(), value.trim_end())))
}

/// Fields of one package entry, with the line each field started on
#[derive(Default)]
struct Stanza {
    start: usize,
    fields: Vec<(String, String, usize)>,
}

impl Stanza {
    fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn push(&mut self, key: &str, value: &str, line_no: usize) {
        if self.fields.is_empty() {
            self.start = line_no;
        }
        self.fields.push((key.to_owned(), value.to_owned(), line_no));
    }

    /// Append a continuation line to the last field
    fn extend(&mut self, line: &str) -> bool {
        match self.fields.last_mut() {
            Some((_, value, _)) => {
                value.push('\n');
                value.push_str(line.trim());
                true
            }
            None => false,
        }
    }

    fn take(&mut self) -> Stanza {
        std::mem::take(self)
    }
}

/// Parse a whole package index.
///
/// Entries end at a blank line or at the next `Package:` line. Any malformed
/// line fails the whole index.
pub fn parse_index<R: BufRead>(r: R) -> Result<Vec<PkgRecord>, ParseError> {
    let mut res = Vec::new();
    let mut stanza = Stanza::default();

    for (idx, line) in r.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;

        if line.trim().is_empty() {
            if !stanza.is_empty() {
                res.push(stanza_to_pkgrecord(stanza.take())?);
            }
            continue;
        }

        if line.starts_with(' ') || line.starts_with('\t') {
            if !stanza.extend(&line) {
                return Err(ParseError::MalformedLine { line_no, line });
            }
            continue;
        }

        let (key, value) = match parse_field(&line) {
            Ok((_, field)) => field,
            Err(_) => return Err(ParseError::MalformedLine { line_no, line }),
        };
        // A new Package line starts a new entry even without a blank line
        if key == "Package" && !stanza.is_empty() {
            res.push(stanza_to_pkgrecord(stanza.take())?);
        }
        stanza.push(key, value, line_no);
    }

    if !stanza.is_empty() {
        res.push(stanza_to_pkgrecord(stanza)?);
    }

    Ok(res)
}

fn stanza_to_pkgrecord(stanza: Stanza) -> Result<PkgRecord, ParseError> {
    let mut name = None;
    let mut version = None;
    let mut pkg = PkgRecord::default();

    for (key, value, line_no) in stanza.fields {
        match key.as_str() {
            "Package" => name = Some(value),
            "Version" => version = Some(value),
            "Depends" => pkg.depends = parse_list(&value),
            "Provides" => pkg.provides = Some(value),
            "Alternatives" => pkg.alternatives = parse_list(&value),
            "License" => pkg.license = Some(value),
            "Section" => pkg.section = Some(value),
            "CPE-ID" => pkg.cpe_id = Some(value),
            "Architecture" => pkg.architecture = Some(value),
            "Installed-Size" => {
                pkg.installed_size = Some(parse_int("Installed-Size", value, line_no)?)
            }
            "Filename" => pkg.filename = Some(value),
            "Size" => pkg.size = Some(parse_int("Size", value, line_no)?),
            "SHA256sum" => pkg.sha256sum = Some(value),
            "Description" => pkg.description = Some(value),
            _ => (),
        }
    }

    pkg.name = name.ok_or(ParseError::MissingField {
        line_no: stanza.start,
        field: "Package",
    })?;
    pkg.version = version.ok_or(ParseError::MissingField {
        line_no: stanza.start,
        field: "Version",
    })?;

    Ok(pkg)
}

fn parse_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|x| !x.is_empty())
        .map(str::to_owned)
        .collect()
}

fn parse_int(field: &'static str, value: String, line_no: usize) -> Result<u64, ParseError> {
    match value.parse() {
        Ok(n) => Ok(n),
        Err(_) => Err(ParseError::MalformedField {
            line_no,
            field,
            value,
        }),
    }
}
