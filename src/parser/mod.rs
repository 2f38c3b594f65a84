// Parser module: turns the raw listing blob into header-aligned rows.

pub mod csv_parser;

pub use csv_parser::{ListingCsvParser, Parser, MIN_COLUMNS};
