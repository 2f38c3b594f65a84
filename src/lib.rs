// Rental listing analytics: parse a crawler blob, normalize it and compute dashboard views.

pub mod analyzer;
pub mod config;
pub mod model;
pub mod normalizer;
pub mod parser;
pub mod report;
pub mod source;
pub mod synthetic;
pub mod utils;

pub use analyzer::{CityAnalyzer, DistrictAnalyzer, ListingAnalyzer, SubareaCatalog};
pub use model::{CanonicalRecord, ParsedTable, RawRow};
pub use report::{Report, ReportOptions};
