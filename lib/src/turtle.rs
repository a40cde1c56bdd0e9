//! Minimal Turtle writing helpers: statements built from fixed templates, literal rendering and
//! document output. Nothing here parses or validates Turtle.

use crate::consts::{LABEL_LANGUAGE, PREFIXES, XSD_NAMESPACE};
use crate::options::Preamble;
use crate::sanitize::is_clean;
use anyhow::Result;
use log::info;
use oxigraph::model::{Literal, NamedNodeRef};
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Prefixed name in the default namespace, e.g. `:Region_11`.
pub fn local(name: &str) -> String {
    debug_assert!(is_clean(name), "{name:?} is not a sanitized local name");
    format!(":{name}")
}

/// A plain string literal with Turtle escaping applied.
pub fn string_literal(value: &str) -> String {
    Literal::new_simple_literal(value).to_string()
}

/// A literal tagged with the label language (`"..."@fr`).
pub fn label_literal(value: &str) -> String {
    Literal::new_language_tagged_literal_unchecked(value, LABEL_LANGUAGE).to_string()
}

/// A typed literal. Datatypes in the xsd namespace are written as `xsd:` prefixed names.
pub fn typed_literal(value: &str, datatype: NamedNodeRef<'_>) -> String {
    let lexical = string_literal(value);
    match datatype.as_str().strip_prefix(XSD_NAMESPACE) {
        Some(name) => format!("{lexical}^^xsd:{name}"),
        None => format!("{lexical}^^{datatype}"),
    }
}

/// One subject with its predicate-object pairs, rendered as a single Turtle statement.
///
/// The rendered text starts with an empty line and ends with ` .\n`; each additional pair goes on
/// its own indented line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    subject: String,
    pairs: Vec<(String, String)>,
}

impl Statement {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            pairs: Vec::new(),
        }
    }

    /// Adds an `a <class>` pair.
    pub fn a(self, class: &str) -> Self {
        self.with("a", local(class))
    }

    pub fn with(mut self, predicate: impl Into<String>, object: impl Into<String>) -> Self {
        self.pairs.push((predicate.into(), object.into()));
        self
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "\n{}", self.subject)?;
        for (i, (predicate, object)) in self.pairs.iter().enumerate() {
            if i == 0 {
                write!(f, " {predicate} {object}")?;
            } else {
                write!(f, " ;\n    {predicate} {object}")?;
            }
        }
        writeln!(f, " .")
    }
}

/// Writes `fragments` to `path`, replacing any existing file.
pub fn write_document<I, S>(path: &Path, preamble: Preamble, fragments: I) -> Result<usize>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    if preamble.is_included() {
        writer.write_all(PREFIXES.as_bytes())?;
    }
    let mut count = 0;
    for fragment in fragments {
        writer.write_all(fragment.as_ref().as_bytes())?;
        count += 1;
    }
    writer.flush()?;
    info!("Wrote {} fragments to {}", count, path.display());
    Ok(count)
}
