use crate::error::Result;
use crate::services::exporter::CsvExporter;
use crate::services::fetcher::PageFetcher;
use crate::services::reconciler::Reconciler;
use crate::services::resolver::{normalize_provider_name, RankingResolver};
use crate::types::{ExportPolicy, RunReport, ScrapeConfig};
use futures::future::try_join_all;
use std::sync::Arc;
use tracing::{error, info};

/// Runs one full scrape: providers, per-provider rankings, reconciliation
/// and export.
pub struct Pipeline {
    resolver: RankingResolver,
    config: ScrapeConfig,
}

impl Pipeline {
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: ScrapeConfig) -> Result<Self> {
        config.validate()?;
        let resolver = RankingResolver::new(fetcher, config.clone())?;
        Ok(Self { resolver, config })
    }

    pub async fn run(&self) -> Result<RunReport> {
        let year = self.config.resolved_year();
        info!("Starting ranking scrape for {}", year);

        let providers = self.resolver.top_providers().await?;

        // All providers are requested at once; the first failure fails the run.
        let batches = try_join_all(providers.iter().map(|provider| {
            let label = normalize_provider_name(provider.name.as_deref());
            let year = year.as_str();
            async move {
                self.resolver
                    .top_titles(provider.url.as_deref(), year, &label)
                    .await
            }
        }))
        .await?;

        let titles_fetched: usize = batches.iter().map(Vec::len).sum();
        info!(
            "Fetched {} titles from {} providers",
            titles_fetched,
            providers.len()
        );

        let reconciled = Reconciler::reconcile(batches);
        info!("{} unique titles after reconciliation", reconciled.len());

        let export = match CsvExporter::export(&reconciled, &self.config.output_path) {
            Ok(summary) => Some(summary),
            Err(e) => match self.config.export_policy {
                ExportPolicy::Strict => return Err(e),
                ExportPolicy::BestEffort => {
                    error!(
                        "Error writing to disk ({}): {}",
                        self.config.output_path.display(),
                        e
                    );
                    None
                }
            },
        };

        Ok(RunReport {
            year,
            providers: providers.len(),
            titles_fetched,
            unique_titles: reconciled.len(),
            export,
        })
    }
}
