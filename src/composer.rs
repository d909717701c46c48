use std::{
    ffi::{OsStr, OsString},
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use anyhow::{bail, Context as _};
use log::{debug, warn};
use regex::Regex;

use crate::{
    context::Context,
    metadata::{PostMetadata, PostRequest},
    renderer::render_header,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ComposeOutcome {
    pub destination: PathBuf,
    pub removed_source: bool,
}

pub(crate) fn read_lines(path: &Path) -> anyhow::Result<Vec<String>> {
    let bytes = std::fs::read(path).with_context(|| format!("while reading {:?}", path))?;
    let content = String::from_utf8_lossy(&bytes);

    if starts_with_frontmatter(&content) {
        warn!("{:?} already starts with a frontmatter block, prepending another one", path);
    }

    Ok(content.lines().map(|l| l.trim_end().to_string()).collect())
}

/// A `---` line, any (possibly empty) block, then a closing `---` line.
pub(crate) fn starts_with_frontmatter(content: &str) -> bool {
    static HEADER_PATTERN: OnceLock<Regex> = OnceLock::new();
    HEADER_PATTERN
        .get_or_init(|| Regex::new(r"\A---\r?\n(?s:.*?\r?\n)?---\r?(\n|\z)").unwrap())
        .is_match(content)
}

fn hyphenate(file_name: &OsStr) -> OsString {
    match file_name.to_str() {
        Some(name) => name.replace(' ', "-").into(),
        None => hyphenate_bytes(file_name),
    }
}

// keeps the bytes of non UTF-8 names
#[cfg(unix)]
fn hyphenate_bytes(file_name: &OsStr) -> OsString {
    use std::os::unix::ffi::{OsStrExt, OsStringExt};

    OsString::from_vec(
        file_name
            .as_bytes()
            .iter()
            .map(|&b| if b == b' ' { b'-' } else { b })
            .collect(),
    )
}

#[cfg(not(unix))]
fn hyphenate_bytes(file_name: &OsStr) -> OsString {
    file_name.to_string_lossy().replace(' ', "-").into()
}

/// `<dir>/<date>-<file name with spaces as hyphens>`
pub(crate) fn output_path(source: &Path, date: &str) -> anyhow::Result<PathBuf> {
    let Some(file_name) = source.file_name() else {
        bail!("{:?} does not name a file", source);
    };
    let mut new_name = OsString::from(format!("{date}-"));
    new_name.push(hyphenate(file_name));

    Ok(source.with_file_name(new_name))
}

/// Header lines (including the empty piece after its final newline) followed
/// by the body lines, joined with `\n`.
pub(crate) fn join_document(header: &str, lines: &[String]) -> String {
    header
        .split('\n')
        .chain(lines.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join("\n")
}

pub(crate) fn write_post(path: &Path, document: &str) -> anyhow::Result<()> {
    let mut fd = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .with_context(|| format!("while creating {:?}", path))?;
    fd.write_all(document.as_bytes())
        .with_context(|| format!("while writing {:?}", path))?;

    Ok(())
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Deletes `source` unless it is the file just written to `destination`.
pub(crate) fn remove_source(source: &Path, destination: &Path) -> anyhow::Result<bool> {
    if same_file(source, destination) {
        warn!("{:?} is also the output file, not removing it", source);
        return Ok(false);
    }
    std::fs::remove_file(source).with_context(|| format!("while removing {:?}", source))?;

    Ok(true)
}

pub(crate) fn compose(ctx: &Context, request: &PostRequest) -> anyhow::Result<ComposeOutcome> {
    let lines = read_lines(&request.file)?;
    let metadata = PostMetadata::derive(request, &lines, &ctx.today)?;
    debug!("{:?}", metadata);

    let header = render_header(&ctx.handlebars, &metadata)?;
    let destination = output_path(&request.file, &metadata.date)?;
    write_post(&destination, &join_document(&header, &lines))?;

    let removed_source = if request.remove {
        remove_source(&request.file, &destination)?
    } else {
        false
    };

    Ok(ComposeOutcome {
        destination,
        removed_source,
    })
}
