/// Maps byte offsets to 1-indexed line and column numbers.
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Builds the index for `source`.
    #[must_use]
    pub fn new(source: &str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(
                source
                    .bytes()
                    .enumerate()
                    .filter(|&(_, b)| b == b'\n')
                    .map(|(i, _)| i + 1),
            )
            .collect();
        Self { line_starts }
    }

    /// Returns `(line, column)` for `offset`. Columns count characters, not bytes.
    #[must_use]
    pub fn line_col(&self, source: &str, offset: usize) -> (usize, usize) {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next.saturating_sub(1),
        };
        let line_start = self.line_starts.get(line).copied().unwrap_or(0);
        let column = source
            .get(line_start..offset)
            .map_or(offset.saturating_sub(line_start), |s| s.chars().count());
        (line + 1, column + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_character_is_line_one_column_one() {
        let source = "a { }";
        assert_eq!(LineIndex::new(source).line_col(source, 0), (1, 1));
    }

    #[test]
    fn offsets_after_newlines() {
        let source = "a {\n  color: red;\n}";
        let index = LineIndex::new(source);
        assert_eq!(index.line_col(source, 4), (2, 1));
        assert_eq!(index.line_col(source, 6), (2, 3));
        assert_eq!(index.line_col(source, 18), (3, 1));
    }

    #[test]
    fn columns_count_characters() {
        let source = "/* é */ a";
        let index = LineIndex::new(source);
        assert_eq!(index.line_col(source, source.len() - 1), (1, 9));
    }
}
