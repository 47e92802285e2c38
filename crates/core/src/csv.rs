//! Minimal quote-aware CSV parsing for campaign packs.
//!
//! Campaign CSVs are small hand-maintained files with a known header row.
//! Double quotes guard commas inside a field and are dropped from the
//! value; there is no escape sequence handling beyond that. Not a general
//! CSV implementation, and not meant to become one.

/// Split one CSV line on commas outside double quotes.
///
/// Quotes toggle state and are not included in the output; fields are
/// trimmed.
#[must_use]
pub fn parse_line(line: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                values.push(current.trim().to_owned());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    values.push(current.trim().to_owned());

    values
}

/// A parsed CSV file: one header row plus data rows.
#[derive(Debug, Clone)]
pub struct CsvTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Parse CSV content. The first line is the header row (split on plain
    /// commas); remaining lines are parsed quote-aware.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Self {
                headers: Vec::new(),
                rows: Vec::new(),
            };
        }

        let mut lines = trimmed.split('\n');
        let headers = lines
            .next()
            .map(|header_line| {
                header_line
                    .split(',')
                    .map(|h| h.trim().to_owned())
                    .collect()
            })
            .unwrap_or_default();
        let rows = lines.map(parse_line).collect();

        Self { headers, rows }
    }

    /// Header names in file order.
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Whether the header row contains `name`.
    #[must_use]
    pub fn has_header(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    /// Number of data rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate over data rows as header-addressable records.
    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.rows.iter().map(|values| Record {
            headers: &self.headers,
            values,
        })
    }
}

/// One data row, addressable by header name.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    headers: &'a [String],
    values: &'a [String],
}

impl Record<'_> {
    /// Value under `header`, or the empty string when the column is absent
    /// or the row is short.
    #[must_use]
    pub fn get(&self, header: &str) -> &str {
        self.headers
            .iter()
            .position(|h| h == header)
            .and_then(|i| self.values.get(i))
            .map_or("", String::as_str)
    }
}
