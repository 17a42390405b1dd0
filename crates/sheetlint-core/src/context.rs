//! Context types for rule execution.

use crate::ast::{LineIndex, Root};
use crate::utils::allowance::AllowDirectives;
use std::path::{Path, PathBuf};

/// Context for the stylesheet being checked.
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Path to the file as discovered.
    pub path: &'a Path,
    /// File contents as a string.
    pub content: &'a str,
    /// Parsed stylesheet.
    pub sheet: &'a Root,
    /// Path relative to the project root.
    pub relative_path: PathBuf,
    /// Offset to line/column mapping for `content`.
    pub line_index: LineIndex,
    /// Inline allow directives found in the stylesheet's comments.
    pub allows: AllowDirectives,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    #[must_use]
    pub fn new(path: &'a Path, sheet: &'a Root, root: &Path) -> Self {
        let relative_path = path
            .strip_prefix(root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf);

        let content = sheet.source();
        let line_index = LineIndex::new(content);
        let allows = AllowDirectives::collect(sheet, &line_index);

        Self {
            path,
            content,
            sheet,
            relative_path,
            line_index,
            allows,
        }
    }
}
