//! Incremental merge state machine for shared files.
//!
//! ```text
//! NO_FILE                              → WriteFresh  (header + block + closer)
//! FILE_EXISTS, marker absent           → Append      (strip closer, append, re-close)
//! FILE_EXISTS, marker present          → Skip        (idempotent no-op)
//! FILE_EXISTS, marker present, partial → Extend      (missing lines added to the region)
//! FILE_EXISTS, unrecognised shape      → FallbackAppend (opener + block + closer at EOF)
//! ```
//!
//! Everything here is pure: the caller reads the current content, asks for a
//! decision, and writes the result back. Other entities' declarations are
//! never rewritten. Appends and extensions also add any import the new
//! declarations need.

use serde::Serialize;

use crate::domain::{
    artifact::{MergeBlock, MergeLayout},
    codegen::imports::ensure_imports,
};

/// Outcome of reconciling one block with a shared file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", content = "content", rename_all = "snake_case")]
pub enum MergeDecision {
    WriteFresh(String),
    Append(String),
    /// The entity was merged before; declarations its region lacked were added.
    Extend(String),
    Skip,
    /// The file did not parse into header/body/closer; the block was added
    /// at end of file and the caller should warn.
    FallbackAppend(String),
}

impl MergeDecision {
    /// New file content, if anything must be written.
    pub fn content(&self) -> Option<&str> {
        match self {
            Self::WriteFresh(c) | Self::Append(c) | Self::Extend(c) | Self::FallbackAppend(c) => {
                Some(c)
            }
            Self::Skip => None,
        }
    }
}

/// Decide what to write for `block` given the current file content.
pub fn reconcile(existing: Option<&str>, block: &MergeBlock) -> MergeDecision {
    let layout = &block.layout;
    let Some(existing) = existing else {
        return MergeDecision::WriteFresh(layout.fresh(&block.declarations));
    };

    if let Some(at) = find_declaration(existing, &block.marker) {
        return extend_region(existing, at, block);
    }

    match split_closer(existing, &layout.closer) {
        Some(body) if is_structured(existing, body, layout) => {
            let body = body.trim_end();
            let merged = format!("{body}\n\n{}{}", block.declarations, layout.closer);
            MergeDecision::Append(ensure_imports(&merged, &block.imports))
        }
        _ => {
            let mut out = existing.to_string();
            if !out.is_empty() && !out.ends_with('\n') {
                out.push('\n');
            }
            out.push('\n');
            out.push_str(&layout.opener);
            out.push_str(&block.declarations);
            out.push_str(&layout.closer);
            MergeDecision::FallbackAppend(out)
        }
    }
}

/// Whether `marker` occurs in `content` on identifier boundaries.
///
/// `ErrUserNotFound` matches `ErrUserNotFound =` but not
/// `ErrUserNotFoundInCache`.
pub fn contains_declaration(content: &str, marker: &str) -> bool {
    find_declaration(content, marker).is_some()
}

/// Byte offset of the first boundary-delimited occurrence of `marker`.
fn find_declaration(content: &str, marker: &str) -> Option<usize> {
    if marker.is_empty() {
        return None;
    }
    content
        .match_indices(marker)
        .find(|(start, _)| {
            let before = content[..*start].chars().next_back();
            let after = content[start + marker.len()..].chars().next();
            !before.is_some_and(is_ident_char) && !after.is_some_and(is_ident_char)
        })
        .map(|(start, _)| start)
}

/// Add the block's member lines missing from the region that starts on the
/// marker's line.
///
/// The region is the marker's line plus the indented, non-comment lines
/// directly below it: an entity's rows in a `var`/`const` group, or the
/// method list of its interface.
fn extend_region(existing: &str, at: usize, block: &MergeBlock) -> MergeDecision {
    let line_start = existing[..at].rfind('\n').map_or(0, |i| i + 1);
    let mut lines = existing[line_start..].split_inclusive('\n');
    let mut end = line_start + lines.next().map_or(0, str::len);
    for line in lines {
        if !is_member_line(line) {
            break;
        }
        end += line.len();
    }

    let region = &existing[line_start..end];
    let missing: Vec<&str> = member_lines(&block.declarations)
        .filter(|(name, _)| !contains_declaration(region, name))
        .map(|(_, line)| line)
        .collect();
    if missing.is_empty() {
        return MergeDecision::Skip;
    }

    let mut out = String::with_capacity(existing.len() + 128);
    out.push_str(&existing[..end]);
    if !out.ends_with('\n') {
        out.push('\n');
    }
    for line in missing {
        out.push_str(line);
        if !line.ends_with('\n') {
            out.push('\n');
        }
    }
    out.push_str(&existing[end..]);
    MergeDecision::Extend(ensure_imports(&out, &block.imports))
}

/// `(name, line)` for every indented declaration in `declarations`.
fn member_lines(declarations: &str) -> impl Iterator<Item = (&str, &str)> {
    declarations
        .split_inclusive('\n')
        .filter(|line| is_member_line(line))
        .filter_map(|line| {
            let body = line.trim_start();
            let len = body.find(|c: char| !is_ident_char(c)).unwrap_or(body.len());
            (len > 0).then(|| (&body[..len], line))
        })
}

fn is_member_line(line: &str) -> bool {
    line.starts_with('\t') && !line.trim_start().starts_with("//")
}

/// Whether the file is one we wrote: it starts with the layout's package
/// line, and when the layout groups declarations, its last top-level line
/// is the layout's own opener, still open.
fn is_structured(existing: &str, body: &str, layout: &MergeLayout) -> bool {
    if !existing.starts_with(layout.signature()) {
        return false;
    }
    let opener = layout.opener.trim_end();
    if opener.is_empty() {
        return true;
    }
    body.lines()
        .rfind(|line| !line.is_empty() && !line.starts_with(char::is_whitespace))
        == Some(opener)
}

/// Body of `content` with the trailing `closer` removed, or `None` if the
/// file does not end with it.
fn split_closer<'a>(content: &'a str, closer: &str) -> Option<&'a str> {
    let trimmed = content.trim_end();
    let closer = closer.trim_end();
    if closer.is_empty() {
        return Some(trimmed);
    }
    let body = trimmed.strip_suffix(closer)?;
    // The closer must sit on its own line.
    if body.is_empty() || body.ends_with('\n') {
        Some(body)
    } else {
        None
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
