//! Removes duplicate statements from a Turtle-like text file.
//!
//! The input is split into *triple blocks*: runs of non-blank lines closed by a line whose
//! trimmed text ends with `.`. Two blocks are duplicates when their trimmed texts are byte-for-byte
//! identical; no RDF parsing takes place. A `.` ending a line inside a string literal therefore
//! closes the block early. This is a known limitation of the lexical approach and is left as is.

use crate::consts::PREFIXES;
use crate::options::Preamble;
use anyhow::Result;
use log::{debug, info};
use std::collections::BTreeSet;
use std::fs::{self, File, Permissions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// The unique triple blocks found in an input, each stored with a single trailing newline.
///
/// Iteration order is an implementation detail; callers must not rely on it.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TripleSet {
    blocks: BTreeSet<String>,
}

impl TripleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trims `text` and stores it followed by one newline. Returns false when the trimmed text is
    /// empty or already present.
    pub fn insert(&mut self, text: &str) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.blocks.insert(format!("{trimmed}\n"))
    }

    /// Membership uses the same trimming as [`TripleSet::insert`].
    pub fn contains(&self, text: &str) -> bool {
        self.blocks.contains(&format!("{}\n", text.trim()))
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().map(String::as_str)
    }

    /// Keeps only the blocks for which `keep` returns true.
    pub fn retain<F: FnMut(&str) -> bool>(&mut self, mut keep: F) {
        self.blocks.retain(|block| keep(block));
    }
}

fn is_prefix_declaration(block: &str) -> bool {
    let block = block.trim_start();
    block.starts_with("@prefix") || block.starts_with("@base")
}

/// Accumulates lines until a block terminator is seen.
#[derive(Default)]
struct BlockBuffer {
    text: String,
    lines: usize,
}

impl BlockBuffer {
    fn push(&mut self, line: &str) {
        self.text.push_str(line);
        self.text.push('\n');
        self.lines += 1;
    }

    fn is_empty(&self) -> bool {
        self.lines == 0
    }

    fn flush_into(&mut self, set: &mut TripleSet) {
        set.insert(&self.text);
        self.text.clear();
        self.lines = 0;
    }
}

/// Counters describing one deduplication run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Blocks seen in the input, duplicates included.
    pub blocks: usize,
    /// Blocks that were already in the set when they were seen.
    pub duplicates: usize,
}

/// Reads `reader` to the end and returns the set of unique triple blocks.
///
/// Lines are kept verbatim except for their terminator, which is normalised to `\n`. Lines that
/// are blank once trimmed are skipped without ending the current block. A trailing block with no
/// terminating `.` is flushed at end of input. Invalid UTF-8 is reported as an
/// [`std::io::ErrorKind::InvalidData`] error.
pub fn collect_triples<R: BufRead>(reader: R) -> std::io::Result<TripleSet> {
    collect_triples_with_stats(reader).map(|(set, _)| set)
}

pub fn collect_triples_with_stats<R: BufRead>(
    mut reader: R,
) -> std::io::Result<(TripleSet, ScanStats)> {
    let mut set = TripleSet::new();
    let mut stats = ScanStats::default();
    let mut buffer = BlockBuffer::default();
    let mut line = String::new();

    let mut flush = |buffer: &mut BlockBuffer, set: &mut TripleSet| {
        if !buffer.text.trim().is_empty() {
            stats.blocks += 1;
            if set.contains(&buffer.text) {
                stats.duplicates += 1;
            }
        }
        buffer.flush_into(set);
    };

    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        let content = line
            .strip_suffix('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
            .unwrap_or(line.as_str());
        let stripped = content.trim();
        if stripped.is_empty() {
            continue;
        }
        buffer.push(content);
        if stripped.ends_with('.') {
            flush(&mut buffer, &mut set);
        }
    }
    if !buffer.is_empty() {
        debug!("Flushing unterminated trailing block");
        flush(&mut buffer, &mut set);
    }
    Ok((set, stats))
}

/// Writes every block of `set` to `writer`, one write per block.
pub fn write_triples<W: Write>(set: &TripleSet, writer: &mut W) -> std::io::Result<()> {
    for block in set.iter() {
        writer.write_all(block.as_bytes())?;
    }
    writer.flush()
}

/// Summary of a [`clean_ttl_by_triples`] run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanReport {
    pub output: PathBuf,
    pub unique_triples: usize,
    pub duplicates_removed: usize,
}

/// Permissions the cleaned file should end up with: those of the file it replaces, or `0644`
/// for a new file. Temporary files are created owner-only.
fn output_permissions(output: &Path) -> std::io::Result<Option<Permissions>> {
    match fs::metadata(output) {
        Ok(meta) => Ok(Some(meta.permissions())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                Ok(Some(Permissions::from_mode(0o644)))
            }
            #[cfg(not(unix))]
            {
                Ok(None)
            }
        }
        Err(e) => Err(e),
    }
}

/// Deduplicates the triple blocks of `input` into `output`.
///
/// The whole input is read before `output` is touched, so a missing or undecodable input leaves
/// any existing output untouched. The result is written to a temporary file next to `output` and
/// renamed over it, replacing previous content entirely. An existing output keeps its
/// permissions.
pub fn clean_ttl_by_triples(input: &Path, output: &Path) -> Result<CleanReport> {
    clean_ttl_document(input, output, Preamble::Omit)
}

/// Like [`clean_ttl_by_triples`], but with [`Preamble::Include`] every `@prefix`/`@base` block is
/// taken out of the set and [`PREFIXES`] is written before the deduplicated body, so the
/// declarations always precede the statements that use them.
pub fn clean_ttl_document(input: &Path, output: &Path, preamble: Preamble) -> Result<CleanReport> {
    debug!("Reading triples from {}", input.display());
    let file = File::open(input)?;
    let (mut triples, stats) = collect_triples_with_stats(BufReader::new(file))?;
    if preamble.is_included() {
        triples.retain(|block| !is_prefix_declaration(block));
    }

    let parent = match output.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(parent)?;
    if preamble.is_included() {
        tmp.as_file_mut().write_all(PREFIXES.as_bytes())?;
    }
    write_triples(&triples, tmp.as_file_mut())?;
    if let Some(permissions) = output_permissions(output)? {
        tmp.as_file().set_permissions(permissions)?;
    }
    tmp.persist(output)?;

    info!(
        "Cleaned {} -> {}: {} unique triples, {} duplicates removed",
        input.display(),
        output.display(),
        triples.len(),
        stats.duplicates
    );
    Ok(CleanReport {
        output: output.to_path_buf(),
        unique_triples: triples.len(),
        duplicates_removed: stats.duplicates,
    })
}
