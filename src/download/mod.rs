//! Format catalog, download planning and the collaborators behind them

pub mod catalog;
pub mod error;
pub mod metadata;
pub mod pipeline;
pub mod planner;
pub mod size;
pub mod source;
pub mod ytdlp_errors;

// Re-exports for convenience
pub use catalog::{build_catalog, AudioOption, CatalogEntry, FormatCatalog, VideoOption};
pub use error::DownloadError;
pub use metadata::{MediaInfo, MediaSummary, RawRepresentation};
pub use pipeline::{Browse, DownloadOutput, DownloadPipeline};
pub use planner::{DownloadPlan, DownloadPlanner, MediaMode};
pub use source::ytdlp::YtDlpSource;
pub use source::{DownloadExecutor, MetadataExtractor};
