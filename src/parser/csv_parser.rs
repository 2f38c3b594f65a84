// Listing CSV parsing: quote-aware tokenizing and continuation-line repair
use crate::model::{ParsedTable, RawRow};
use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, warn};

/// Rows and headers narrower than this cannot carry a listing.
pub const MIN_COLUMNS: usize = 8;

/// Column name that marks the real header row.
const HEADER_MARKER: &str = "标题";

/// Substrings of the summary line the crawler and preprocessor write above the header.
const METADATA_MARKERS: [&str; 3] = ["爬取数量", "更新时间", "处理后数量"];

pub trait Parser {
    fn parse(&self, text: &str) -> ParsedTable;
}

pub struct ListingCsvParser;

impl ListingCsvParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ListingCsvParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for ListingCsvParser {
    /// Never fails: structural problems produce an empty table.
    fn parse(&self, text: &str) -> ParsedTable {
        let lines = logical_lines(text);
        if lines.is_empty() {
            warn!("Listing text is empty");
            return ParsedTable::default();
        }

        let first = &lines[0];
        let start = if METADATA_MARKERS.iter().any(|m| first.contains(m)) || !first.contains(HEADER_MARKER) {
            debug!("Skipping metadata line: {}", first);
            1
        } else {
            0
        };

        let mut records = tokenize(&lines[start..].join("\n")).into_iter();
        let Some((_, headers)) = records.next() else {
            warn!("Listing text has no header row");
            return ParsedTable::default();
        };

        if headers.len() < MIN_COLUMNS {
            warn!("Header has only {} columns (need {})", headers.len(), MIN_COLUMNS);
            return ParsedTable::default();
        }

        let rows: Vec<RawRow> = records
            .map(|(line, fields)| RawRow {
                line: line + start,
                fields,
            })
            .collect();

        debug!("Parsed {} rows under {} headers", rows.len(), headers.len());
        ParsedTable { headers, rows }
    }
}

/// Strips the BOM, normalizes line endings, merges indented continuation
/// lines and drops blank lines. Header lines always start a new line.
pub fn logical_lines(text: &str) -> Vec<String> {
    let normalized = text
        .trim_start_matches('\u{feff}')
        .replace("\r\n", "\n")
        .replace('\r', "\n");

    let mut lines: Vec<String> = Vec::new();
    for physical in normalized.split('\n') {
        if physical.trim().is_empty() {
            continue;
        }

        let indented = physical.starts_with(char::is_whitespace);
        let is_header = physical.trim_start().starts_with(HEADER_MARKER);

        match lines.last_mut() {
            Some(last) if indented && !is_header => {
                last.push(' ');
                last.push_str(physical.trim());
            }
            _ => lines.push(physical.trim().to_string()),
        }
    }

    lines
}

/// Reads comma-separated records with their 1-based starting line.
///
/// Quoted fields may span lines; their inner line breaks collapse to a single
/// space. A quote in the middle of an unquoted field is kept literally.
/// Unreadable records are logged and skipped.
pub fn tokenize(text: &str) -> Vec<(usize, Vec<String>)> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let mut records = Vec::new();
    for result in reader.records() {
        match result {
            Ok(record) => {
                let line = record.position().map_or(0, |p| p.line() as usize);
                records.push((line, fields_of(&record)));
            }
            Err(e) => warn!("Skipping unreadable row: {}", e),
        }
    }
    records
}

fn fields_of(record: &StringRecord) -> Vec<String> {
    record
        .iter()
        .map(|field| {
            field
                .split('\n')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}
