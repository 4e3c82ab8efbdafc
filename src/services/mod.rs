pub mod exporter;
pub mod extractor;
pub mod fetcher;
pub mod pipeline;
pub mod reconciler;
pub mod resolver;

pub use exporter::CsvExporter;
pub use extractor::MarkupExtractor;
pub use fetcher::{HttpFetcher, PageFetcher};
pub use pipeline::Pipeline;
pub use reconciler::Reconciler;
pub use resolver::{normalize_provider_name, RankingResolver};
