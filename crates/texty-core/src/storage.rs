//! Text and blob persistence for problem-set collections.
//!
//! Text files (`.txt`) hold a tab-separated header naming the six fields in
//! any order, then one record per problem set. History is not kept.
//!
//! Blob files (`.txy`) hold the full collection, history included: the
//! `TXY` magic, a version byte, then a `bincode` payload.

use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::error::{Result, TextyError};
use crate::problem_set::{FieldKey, ProblemSet};

const BLOB_MAGIC: &[u8; 3] = b"TXY";
const BLOB_VERSION: u8 = 1;

/// On-disk encoding of a collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageEncoding {
    Text,
    #[default]
    Blob,
}

impl StorageEncoding {
    /// File extension used for this encoding, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            StorageEncoding::Text => "txt",
            StorageEncoding::Blob => "txy",
        }
    }

    /// `<source_name>.<extension>`.
    pub fn path_for(self, source_name: &str) -> PathBuf {
        PathBuf::from(format!("{source_name}.{}", self.extension()))
    }
}

impl fmt::Display for StorageEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageEncoding::Text => write!(f, "text"),
            StorageEncoding::Blob => write!(f, "blob"),
        }
    }
}

impl FromStr for StorageEncoding {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(StorageEncoding::Text),
            "blob" | "txy" => Ok(StorageEncoding::Blob),
            other => Err(format!("unknown encoding: {other}")),
        }
    }
}

/// Parse a text document into problem sets.
pub fn parse_text(content: &str) -> Result<Vec<ProblemSet>> {
    let mut lines = content.lines();
    let header = lines
        .next()
        .filter(|h| !h.trim().is_empty())
        .ok_or_else(|| TextyError::format("missing header line"))?;
    let key = FieldKey::parse(header.trim_end())
        .map_err(|e| with_line(e, 1))?;

    lines
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| ProblemSet::from_record(line, &key).map_err(|e| with_line(e, i + 2)))
        .collect()
}

fn with_line(err: TextyError, line: usize) -> TextyError {
    match err {
        TextyError::Format(msg) => TextyError::format(format!("line {line}: {msg}")),
        other => other,
    }
}

/// Render problem sets as a text document with the canonical header.
pub fn render_text(sets: &[ProblemSet]) -> String {
    let mut out = FieldKey::default().to_string();
    out.push('\n');
    for ps in sets {
        out.push_str(&ps.render());
        out.push('\n');
    }
    out
}

/// Encode problem sets, history included, as a versioned blob.
pub fn encode_blob(sets: &[ProblemSet]) -> Result<Vec<u8>> {
    let payload = bincode::serialize(sets)
        .map_err(|e| TextyError::format(format!("failed to encode blob: {e}")))?;
    let mut out = Vec::with_capacity(BLOB_MAGIC.len() + 1 + payload.len());
    out.extend_from_slice(BLOB_MAGIC);
    out.push(BLOB_VERSION);
    out.extend_from_slice(&payload);
    Ok(out)
}

/// Decode a blob produced by [`encode_blob`].
pub fn decode_blob(bytes: &[u8]) -> Result<Vec<ProblemSet>> {
    let header_len = BLOB_MAGIC.len() + 1;
    if bytes.len() < header_len || &bytes[..BLOB_MAGIC.len()] != BLOB_MAGIC {
        return Err(TextyError::format("not a texty blob (bad magic)"));
    }
    match bytes[BLOB_MAGIC.len()] {
        BLOB_VERSION => bincode::deserialize(&bytes[header_len..])
            .map_err(|e| TextyError::format(format!("corrupt blob: {e}"))),
        other => Err(TextyError::format(format!(
            "unsupported blob version {other} (expected {BLOB_VERSION})"
        ))),
    }
}

/// Read a collection from `path`.
pub fn load(path: &Path, encoding: StorageEncoding) -> Result<Vec<ProblemSet>> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => TextyError::SourceNotFound(path.to_path_buf()),
        _ => TextyError::io(path, e),
    })?;

    let sets = match encoding {
        StorageEncoding::Text => {
            let content = String::from_utf8(bytes).map_err(|_| {
                TextyError::format(format!("{} is not valid UTF-8", path.display()))
            })?;
            parse_text(&content)?
        }
        StorageEncoding::Blob => decode_blob(&bytes)?,
    };

    tracing::debug!(path = %path.display(), %encoding, count = sets.len(), "loaded problem sets");
    Ok(sets)
}

/// Replace the contents of `path` with `bytes`.
///
/// The bytes go to a temporary file beside `path` which is renamed over it
/// once fully written, so a failed write never leaves a truncated file.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| TextyError::io(dir, e))?;
    tmp.write_all(bytes).map_err(|e| TextyError::io(tmp.path(), e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| TextyError::io(tmp.path(), e))?;
    tmp.persist(path).map_err(|e| TextyError::io(path, e.error))?;
    Ok(())
}

/// Write a collection to `path` through [`write_atomic`].
pub fn save(path: &Path, encoding: StorageEncoding, sets: &[ProblemSet]) -> Result<()> {
    let bytes = match encoding {
        StorageEncoding::Text => render_text(sets).into_bytes(),
        StorageEncoding::Blob => encode_blob(sets)?,
    };

    write_atomic(path, &bytes)?;

    tracing::debug!(path = %path.display(), %encoding, count = sets.len(), "saved problem sets");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "chapter\tsection\tproblems\tpage\tright\twrong\n\
                          3\t2\t20\t45\t5\t1\n\
                          1\t1\t12\t3\t0\t2\n";

    #[test]
    fn parse_and_render_text() {
        let sets = parse_text(SAMPLE).unwrap();
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].key(), (3, 2));
        assert_eq!(render_text(&sets), SAMPLE);
    }

    #[test]
    fn text_skips_blank_lines_and_crlf() {
        let content = "chapter\tsection\tproblems\tpage\tright\twrong\r\n3\t2\t20\t45\t5\t1\r\n\r\n";
        let sets = parse_text(content).unwrap();
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].wrong_count, 1);
    }

    #[test]
    fn text_errors_name_the_line() {
        let bad = "chapter\tsection\tproblems\tpage\tright\twrong\n3\t2\t20\t45\t5\t1\n3\t3\tx\t45\t5\t1\n";
        let err = parse_text(bad).unwrap_err();
        assert!(err.to_string().contains("line 3"), "{err}");

        assert!(parse_text("").is_err());
        assert!(parse_text("ch.\tsect.\tprob.\tpage\tright\twrong\n").is_err());
    }

    #[test]
    fn blob_keeps_history() {
        let mut ps = ProblemSet::new(2, 1, 39, 10);
        ps.mark_right(4).unwrap();
        ps.mark_wrong(5).unwrap();
        let sets = vec![ps, ProblemSet::new(2, 2, 14, 18)];

        let decoded = decode_blob(&encode_blob(&sets).unwrap()).unwrap();
        assert_eq!(decoded, sets);
        assert_eq!(decoded[0].history(), sets[0].history());
        assert_eq!(decoded[0].right_count, 1);
        assert_eq!(decoded[1].page, 18);
    }

    #[test]
    fn blob_rejects_garbage() {
        assert!(decode_blob(b"").is_err());
        assert!(decode_blob(b"chapter\tsection").is_err());

        let mut bytes = encode_blob(&[ProblemSet::new(1, 1, 1, 1)]).unwrap();
        bytes[3] = 9;
        let err = decode_blob(&bytes).unwrap_err();
        assert!(err.to_string().contains("version 9"));

        let truncated = encode_blob(&[ProblemSet::new(1, 1, 1, 1)]).unwrap();
        assert!(decode_blob(&truncated[..truncated.len() - 2]).is_err());
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("nope.txy"), StorageEncoding::Blob).unwrap_err();
        assert!(matches!(err, TextyError::SourceNotFound(_)));
    }

    #[test]
    fn save_and_load_both_encodings() {
        let dir = tempfile::tempdir().unwrap();
        let sets = parse_text(SAMPLE).unwrap();

        for encoding in [StorageEncoding::Text, StorageEncoding::Blob] {
            let path = dir.path().join(format!("book.{}", encoding.extension()));
            save(&path, encoding, &sets).unwrap();
            let loaded = load(&path, encoding).unwrap();
            assert_eq!(loaded, sets);
            assert_eq!(loaded[1].wrong_count, 2);
        }

        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(leftovers.len(), 2, "{leftovers:?}");
    }

    #[test]
    fn save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("book.txt");
        let err = save(&path, StorageEncoding::Text, &[]).unwrap_err();
        assert!(matches!(err, TextyError::Io { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn write_atomic_replaces_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "a much longer first version\n").unwrap();
        write_atomic(&path, b"short\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "short\n");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn encoding_names() {
        assert_eq!("text".parse::<StorageEncoding>().unwrap(), StorageEncoding::Text);
        assert_eq!("TXY".parse::<StorageEncoding>().unwrap(), StorageEncoding::Blob);
        assert!("pickle".parse::<StorageEncoding>().is_err());
        assert_eq!(
            StorageEncoding::Text.path_for("algebra"),
            PathBuf::from("algebra.txt")
        );
        assert_eq!(StorageEncoding::default(), StorageEncoding::Blob);
    }
}
