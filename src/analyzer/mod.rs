// Analyzer module: aggregates submodules for different aspects of analysis.

pub mod aggregates;
pub mod city;
pub mod classify;
pub mod district;
pub mod listing_analyzer;
pub mod quality;
pub mod stats;
pub mod subareas;
pub mod tally;

// Re-export the analyzers for ease of use.
pub use city::CityAnalyzer;
pub use district::{DistrictAnalyzer, DistrictScope};
pub use listing_analyzer::ListingAnalyzer;
pub use subareas::SubareaCatalog;
