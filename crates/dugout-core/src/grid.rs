// Fixed-position tabular parser.
//
// Turns delimited spreadsheet exports into a row/column grid of raw strings.
// Empty cells are kept so downstream parsers can address cells by fixed
// column index. Parsing never fails; malformed quoting degrades to a best
// effort split.

const DELIMITER: char = ',';
const QUOTE: char = '"';

/// A parsed grid of string cells, addressed by `(row, column)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<String>>,
}

impl Grid {
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Raw cell contents, or `None` when the row or column is out of range.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    /// Cell contents with surrounding whitespace removed. Out-of-range cells
    /// read as the empty string.
    pub fn trimmed(&self, row: usize, col: usize) -> &str {
        self.cell(row, col).map(str::trim).unwrap_or("")
    }
}

/// Parse comma-delimited text into a [`Grid`].
///
/// - `"..."` quoting may contain commas and line breaks; `""` inside quotes
///   is a literal quote.
/// - `\n` and `\r\n` both end a row; stray `\r` characters are dropped.
/// - A final row without a line terminator is still emitted.
/// - A blank line becomes a row holding one empty cell, so row offsets
///   below it are unaffected.
/// - An unmatched quote leaves the remainder of the input in the open cell.
pub fn parse_grid(text: &str) -> Grid {
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;

    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            QUOTE => {
                if in_quotes && chars.peek() == Some(&QUOTE) {
                    cell.push(QUOTE);
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            DELIMITER if !in_quotes => {
                row.push(std::mem::take(&mut cell));
            }
            '\n' if !in_quotes => {
                row.push(std::mem::take(&mut cell));
                rows.push(std::mem::take(&mut row));
            }
            '\r' if !in_quotes && chars.peek() == Some(&'\n') => {
                chars.next();
                row.push(std::mem::take(&mut cell));
                rows.push(std::mem::take(&mut row));
            }
            '\r' => {}
            other => cell.push(other),
        }
    }

    if !cell.is_empty() || !row.is_empty() {
        row.push(cell);
        rows.push(row);
    }

    Grid { rows }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(grid: &Grid) -> Vec<Vec<&str>> {
        grid.rows()
            .iter()
            .map(|r| r.iter().map(String::as_str).collect())
            .collect()
    }

    #[test]
    fn splits_simple_rows() {
        let grid = parse_grid("a,b,c\n1,2,3\n");
        assert_eq!(cells(&grid), vec![vec!["a", "b", "c"], vec!["1", "2", "3"]]);
    }

    #[test]
    fn keeps_empty_cells() {
        let grid = parse_grid(",,x,\n");
        assert_eq!(cells(&grid), vec![vec!["", "", "x", ""]]);
        assert_eq!(grid.cell(0, 2), Some("x"));
        assert_eq!(grid.cell(0, 3), Some(""));
    }

    #[test]
    fn quoted_field_with_delimiter_and_escaped_quote() {
        let grid = parse_grid("\"a,b\",\"say \"\"hi\"\"\",c");
        assert_eq!(cells(&grid), vec![vec!["a,b", "say \"hi\"", "c"]]);
    }

    #[test]
    fn crlf_line_endings() {
        let grid = parse_grid("a,b\r\nc,d\r\n");
        assert_eq!(cells(&grid), vec![vec!["a", "b"], vec!["c", "d"]]);
    }

    #[test]
    fn trailing_row_without_terminator_is_emitted() {
        let grid = parse_grid("a,b\nc,d");
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.cell(1, 1), Some("d"));
    }

    #[test]
    fn trailing_delimiter_emits_empty_last_cell() {
        let grid = parse_grid("a,");
        assert_eq!(cells(&grid), vec![vec!["a", ""]]);
    }

    #[test]
    fn blank_line_preserves_row_offsets() {
        let grid = parse_grid("a\n\nb\n");
        assert_eq!(grid.row_count(), 3);
        assert_eq!(grid.cell(1, 0), Some(""));
        assert_eq!(grid.cell(2, 0), Some("b"));
    }

    #[test]
    fn empty_input_yields_empty_grid() {
        assert!(parse_grid("").is_empty());
    }

    #[test]
    fn unmatched_quote_does_not_panic() {
        let grid = parse_grid("a,\"b,c\nd");
        assert_eq!(grid.row_count(), 1);
        assert_eq!(grid.cell(0, 0), Some("a"));
        assert_eq!(grid.cell(0, 1), Some("b,c\nd"));
    }

    #[test]
    fn quoted_newline_stays_in_cell() {
        let grid = parse_grid("\"line1\nline2\",x\n");
        assert_eq!(cells(&grid), vec![vec!["line1\nline2", "x"]]);
    }

    #[test]
    fn trimmed_out_of_range_is_empty() {
        let grid = parse_grid(" a ,b\n");
        assert_eq!(grid.trimmed(0, 0), "a");
        assert_eq!(grid.trimmed(0, 9), "");
        assert_eq!(grid.trimmed(7, 0), "");
    }

    #[test]
    fn parsing_is_idempotent() {
        let text = "\"x,y\",,3\r\n4,\"\"\"q\"\"\",\n";
        assert_eq!(parse_grid(text), parse_grid(text));
    }
}
