use crate::error::Result;
use crate::services::extractor::MarkupExtractor;
use crate::services::fetcher::PageFetcher;
use crate::types::{ProviderLink, RawMovie, ScrapeConfig};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Resolves providers and per-provider rankings by pairing a fetcher with
/// the markup extractor.
pub struct RankingResolver {
    fetcher: Arc<dyn PageFetcher>,
    extractor: MarkupExtractor,
    config: ScrapeConfig,
}

impl RankingResolver {
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: ScrapeConfig) -> Result<Self> {
        let extractor = MarkupExtractor::new(&config.layout)?;
        Ok(Self {
            fetcher,
            extractor,
            config,
        })
    }

    pub async fn top_providers(&self) -> Result<Vec<ProviderLink>> {
        let html = self.fetcher.fetch(&self.config.ranking_url()).await?;
        let providers = self
            .extractor
            .extract_providers(&html, self.config.provider_limit);

        info!("Resolved {} providers", providers.len());
        Ok(providers)
    }

    /// Top titles of one provider for `year`. Performs no request when the
    /// provider has no link.
    pub async fn top_titles(
        &self,
        provider_url: Option<&str>,
        year: &str,
        provider_label: &str,
    ) -> Result<Vec<RawMovie>> {
        let Some(provider_url) = provider_url.filter(|url| !url.is_empty()) else {
            debug!("Provider '{}' has no link, skipping", provider_label);
            return Ok(Vec::new());
        };

        let url = self.config.provider_year_url(provider_url, year);
        let html = self.fetcher.fetch(&url).await?;
        let movies = self
            .extractor
            .extract_movies(&html, self.config.title_limit, provider_label);

        if movies.is_empty() {
            warn!("No titles found for '{}' at {}", provider_label, url);
        }

        Ok(movies)
    }
}

/// Drops the trailing qualifier word the site appends to provider names,
/// e.g. `"HBO Max Streaming"` becomes `"HBO Max"`.
pub fn normalize_provider_name(name: Option<&str>) -> String {
    let Some(name) = name.filter(|n| !n.is_empty()) else {
        return String::new();
    };

    let tokens: Vec<&str> = name.split(' ').collect();
    if tokens.len() == 1 {
        return name.to_string();
    }

    tokens[..tokens.len() - 1].join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScraperError;
    use crate::services::fetcher::fixtures::FixtureFetcher;

    const RANKING: &str = "https://www.filmweb.pl/ranking/vod/film";

    fn resolver(fetcher: Arc<FixtureFetcher>) -> RankingResolver {
        RankingResolver::new(fetcher, ScrapeConfig::default()).unwrap()
    }

    fn provider_page(count: usize) -> String {
        let items: String = (0..count)
            .map(|i| format!(r#"<li><a title="Vod{i} Film" href="/vod{i}">Vod{i}</a></li>"#))
            .collect();
        format!(r#"<div class="rankingProvider__list"><ul>{items}</ul></div>"#)
    }

    #[test]
    fn test_normalize_absent_and_empty() {
        assert_eq!(normalize_provider_name(None), "");
        assert_eq!(normalize_provider_name(Some("")), "");
        assert_eq!(normalize_provider_name(Some(" ")), "");
    }

    #[test]
    fn test_normalize_single_word() {
        assert_eq!(normalize_provider_name(Some("Netflix")), "Netflix");
    }

    #[test]
    fn test_normalize_drops_last_token() {
        assert_eq!(normalize_provider_name(Some("HBO Max Streaming")), "HBO Max");
        assert_eq!(normalize_provider_name(Some("Disney+ Film")), "Disney+");
    }

    #[tokio::test]
    async fn test_top_providers_never_exceeds_limit() {
        for available in [0, 2, 4, 7] {
            let fetcher = Arc::new(FixtureFetcher::new().with_page(RANKING, &provider_page(available)));
            let providers = resolver(fetcher).top_providers().await.unwrap();
            assert_eq!(providers.len(), available.min(4));
        }
    }

    #[tokio::test]
    async fn test_top_providers_respects_configured_limit() {
        let fetcher = Arc::new(FixtureFetcher::new().with_page(RANKING, &provider_page(5)));
        let config = ScrapeConfig {
            provider_limit: 2,
            ..Default::default()
        };
        let providers = RankingResolver::new(fetcher, config)
            .unwrap()
            .top_providers()
            .await
            .unwrap();

        assert_eq!(providers.len(), 2);
        assert_eq!(providers[1].url.as_deref(), Some("/vod1"));
    }

    #[tokio::test]
    async fn test_top_providers_propagates_fetch_failure() {
        let fetcher = Arc::new(FixtureFetcher::new());
        let result = resolver(fetcher).top_providers().await;
        assert!(matches!(result, Err(ScraperError::HttpStatus { status: 404, .. })));
    }

    #[tokio::test]
    async fn test_top_titles_without_url_skips_fetch() {
        let fetcher = Arc::new(FixtureFetcher::new());
        let movies = resolver(fetcher.clone())
            .top_titles(None, "2021", "Provider Name")
            .await
            .unwrap();

        assert!(movies.is_empty());
        assert_eq!(fetcher.calls(), 0);
    }

    #[tokio::test]
    async fn test_top_titles_fetches_yearly_page() {
        let html = r#"<div class="rankingTypeSection__container">
            <div class="rankingType hasVod"><div class="rankingType__title"><a>Dune</a></div>
            <div class="rankingType__rate--value">8,2</div></div>
        </div>"#;
        let fetcher = Arc::new(
            FixtureFetcher::new().with_page("https://www.filmweb.pl/ranking/vod/netflix/film/2021", html),
        );

        let movies = resolver(fetcher.clone())
            .top_titles(Some("/ranking/vod/netflix/film"), "2021", "Netflix")
            .await
            .unwrap();

        assert_eq!(fetcher.calls(), 1);
        assert_eq!(
            movies,
            vec![RawMovie {
                title: "Dune".to_string(),
                rating: "8,2".to_string(),
                provider_name: "Netflix".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_top_titles_empty_page() {
        let fetcher = Arc::new(
            FixtureFetcher::new().with_page("https://www.filmweb.pl/ranking/film/2021", "<html></html>"),
        );
        let movies = resolver(fetcher)
            .top_titles(Some("/ranking/film"), "2021", "Provider Name")
            .await
            .unwrap();
        assert!(movies.is_empty());
    }
}
