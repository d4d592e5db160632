//! Minimal comma-separated table primitives.
//!
//! The input tables carry plain identifiers and numbers, never quoted or
//! embedded commas, so a straight split is sufficient.

/// Split a data line into trimmed fields.
pub fn fields(line: &str) -> Vec<&str> {
    line.trim_end_matches('\r').split(',').map(str::trim).collect()
}

/// Column-name index over a header line.
#[derive(Debug, Clone)]
pub struct Header {
    columns: Vec<String>,
}

impl Header {
    /// Parse the first line of a table.
    pub fn parse(line: &str) -> Self {
        Self {
            columns: fields(line).into_iter().map(str::to_string).collect(),
        }
    }

    /// Position of a named column, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

/// Fetch a field by optional index, empty when out of range.
pub fn field_at<'a>(fields: &[&'a str], index: Option<usize>) -> &'a str {
    index.and_then(|i| fields.get(i).copied()).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_trim_whitespace_and_carriage_returns() {
        assert_eq!(fields("a, b ,c\r"), vec!["a", "b", "c"]);
    }

    #[test]
    fn header_indexes_columns_by_name() {
        let header = Header::parse("timestamp,maker,taker\r\n".trim_end());
        assert_eq!(header.index_of("maker"), Some(1));
        assert_eq!(header.index_of("price"), None);
    }

    #[test]
    fn field_at_is_empty_when_missing() {
        let row = fields("x,y");
        assert_eq!(field_at(&row, Some(0)), "x");
        assert_eq!(field_at(&row, Some(5)), "");
        assert_eq!(field_at(&row, None), "");
    }
}
