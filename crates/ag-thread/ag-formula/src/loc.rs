//! Source locations and the byte-offset <-> (line, column) coordinate cache.
//!
//! Every backend reports hits in whatever coordinate system is natural to it
//! (tree-sitter points, byte offsets, line/column pairs from a document
//! parser). [`Loc`] is the one shape the rest of the core deals with, and
//! [`OffsetTable`] is how we get there from a raw byte offset without
//! re-scanning the file on every leaf.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::OnceLock;

use thread_utils::{get_map, RapidMap};

/// A single point in a source file.
///
/// `line` and `column` are both 1-based; `byte_offset` is 0-based. `text` is
/// the textual content at that location when the producer has it cheaply on
/// hand (e.g. the token text); callers should not assume it's always
/// populated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Loc {
  pub file: PathBuf,
  pub byte_offset: usize,
  pub line: usize,
  pub column: usize,
  pub text: String,
}

impl Loc {
  pub fn new(file: impl Into<PathBuf>, byte_offset: usize, line: usize, column: usize) -> Self {
    Self {
      file: file.into(),
      byte_offset,
      line,
      column,
      text: String::new(),
    }
  }

  pub fn with_text(mut self, text: impl Into<String>) -> Self {
    self.text = text.into();
    self
  }
}

/// A per-file table mapping byte offsets to 1-based (line, column) pairs.
///
/// Lines are counted by counting `\n` bytes; column is bytes since the last
/// `\n` plus one. This is the "standard conversion" the dispatcher uses for
/// `pos_cnum - pos_bol + 1`-style document-matcher positions as well as raw
/// regex offsets.
pub struct LineTable {
  /// byte offset of the start of each line; `line_starts[0] == 0`.
  line_starts: Vec<usize>,
}

impl LineTable {
  pub fn build(contents: &[u8]) -> Self {
    let mut line_starts = vec![0];
    for (i, b) in contents.iter().enumerate() {
      if *b == b'\n' {
        line_starts.push(i + 1);
      }
    }
    Self { line_starts }
  }

  /// Converts a 0-based byte offset into a 1-based (line, column) pair.
  pub fn to_line_col(&self, byte_offset: usize) -> (usize, usize) {
    let line_idx = match self.line_starts.binary_search(&byte_offset) {
      Ok(i) => i,
      Err(i) => i.saturating_sub(1),
    };
    let line_start = self.line_starts[line_idx];
    (line_idx + 1, byte_offset - line_start + 1)
  }

  /// Converts a 1-based (line, column) pair back into a 0-based byte offset.
  ///
  /// This is the inverse used by the coordinate round-trip property: for any
  /// byte offset recovered from `to_line_col`, `to_byte_offset` must return
  /// the original offset.
  pub fn to_byte_offset(&self, line: usize, column: usize) -> Option<usize> {
    let line_start = *self.line_starts.get(line.checked_sub(1)?)?;
    Some(line_start + column - 1)
  }
}

/// Process-wide additive cache of [`LineTable`]s, keyed by file path.
///
/// Insert-only: once a file's table is built it is never replaced. This is a
/// performance optimisation only; nothing depends on entries surviving across
/// process runs, and a caller that wants isolation (e.g. a multi-threaded
/// harness with per-thread caches) can sidestep this by calling
/// [`LineTable::build`] directly instead of going through the cache.
pub struct OffsetTableCache {
  tables: Mutex<RapidMap<PathBuf, std::sync::Arc<LineTable>>>,
}

impl OffsetTableCache {
  fn new() -> Self {
    Self {
      tables: Mutex::new(get_map()),
    }
  }

  fn global() -> &'static OffsetTableCache {
    static CACHE: OnceLock<OffsetTableCache> = OnceLock::new();
    CACHE.get_or_init(OffsetTableCache::new)
  }

  /// Returns the cached table for `file`, building it from `contents` on
  /// first use.
  pub fn get_or_build(file: &Path, contents: &[u8]) -> std::sync::Arc<LineTable> {
    let cache = Self::global();
    let mut tables = cache.tables.lock().expect("offset table cache poisoned");
    if let Some(table) = tables.get(file) {
      return table.clone();
    }
    let table = std::sync::Arc::new(LineTable::build(contents));
    tables.insert(file.to_path_buf(), table.clone());
    table
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn single_line_offsets() {
    let table = LineTable::build(b"foo(1); bar(2); foo(3);\n");
    assert_eq!(table.to_line_col(0), (1, 1));
    assert_eq!(table.to_line_col(8), (1, 9));
    assert_eq!(table.to_line_col(15), (1, 16));
  }

  #[test]
  fn multi_line_offsets() {
    let table = LineTable::build(b"abc\ndef\nghi");
    assert_eq!(table.to_line_col(0), (1, 1));
    assert_eq!(table.to_line_col(4), (2, 1));
    assert_eq!(table.to_line_col(9), (3, 2));
  }

  #[test]
  fn round_trip_every_offset() {
    let contents = b"const a = 1;\nfunction f() {\n  return a;\n}\n";
    let table = LineTable::build(contents);
    for offset in 0..contents.len() {
      let (line, col) = table.to_line_col(offset);
      assert_eq!(table.to_byte_offset(line, col), Some(offset));
    }
  }

  #[test]
  fn cache_reuses_table_for_same_path() {
    let path = PathBuf::from("cache_test_virtual_file.x");
    let a = OffsetTableCache::get_or_build(&path, b"foo(1);\n");
    let b = OffsetTableCache::get_or_build(&path, b"ignored on second call\n");
    assert!(std::sync::Arc::ptr_eq(&a, &b));
  }
}
