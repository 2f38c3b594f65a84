// Data sources: one-shot whole-blob reads from disk or over HTTP.

pub mod fetcher;
pub mod file;
pub mod traits;

pub use fetcher::HttpSource;
pub use file::FileSource;
pub use traits::DataSource;
