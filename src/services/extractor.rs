use crate::error::{Result, ScraperError};
use crate::types::{PageLayout, ProviderLink, RawMovie};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

/// Reads providers and ranking entries out of page markup.
///
/// All knowledge of the upstream page structure lives in the [`PageLayout`]
/// this extractor is compiled from. Missing nodes never fail extraction:
/// they produce empty strings, `None` fields or empty vectors.
pub struct MarkupExtractor {
    provider_container: Selector,
    provider_item: Selector,
    provider_anchor: Selector,
    ranking_container: Selector,
    ranking_entry: Selector,
    title_link: Selector,
    rating_value: Selector,
}

impl MarkupExtractor {
    pub fn new(layout: &PageLayout) -> Result<Self> {
        Ok(Self {
            provider_container: compile(&layout.provider_container)?,
            provider_item: compile(&layout.provider_item)?,
            provider_anchor: compile(&layout.provider_anchor)?,
            ranking_container: compile(&layout.ranking_container)?,
            ranking_entry: compile(&layout.ranking_entry)?,
            title_link: compile(&layout.title_link)?,
            rating_value: compile(&layout.rating_value)?,
        })
    }

    /// Every element in `document` matching the container selector, in document order.
    pub fn find_containers<'a>(
        &self,
        document: &'a Html,
        container: &Selector,
    ) -> Vec<ElementRef<'a>> {
        document.select(container).collect()
    }

    /// Descendants of `containers` matching `marker`, at most `limit` of them.
    /// An element reachable from two nested containers is returned once.
    pub fn find_entries<'a>(
        &self,
        containers: &[ElementRef<'a>],
        marker: &Selector,
        limit: usize,
    ) -> Vec<ElementRef<'a>> {
        let mut entries: Vec<ElementRef<'a>> = Vec::new();

        for container in containers {
            for entry in container.select(marker) {
                if entries.len() == limit {
                    return entries;
                }
                if !entries.iter().any(|seen| seen.id() == entry.id()) {
                    entries.push(entry);
                }
            }
        }

        entries
    }

    pub fn extract_providers(&self, html: &str, limit: usize) -> Vec<ProviderLink> {
        let document = Html::parse_document(html);
        let containers = self.find_containers(&document, &self.provider_container);

        if containers.is_empty() {
            warn!("Provider list container not found");
            return Vec::new();
        }

        let providers: Vec<ProviderLink> = self
            .find_entries(&containers, &self.provider_item, limit)
            .into_iter()
            .map(|item| self.provider_link(item))
            .collect();

        debug!("Extracted {} providers", providers.len());
        providers
    }

    pub fn extract_movies(&self, html: &str, limit: usize, provider_name: &str) -> Vec<RawMovie> {
        let document = Html::parse_document(html);
        let containers = self.find_containers(&document, &self.ranking_container);

        let movies: Vec<RawMovie> = self
            .find_entries(&containers, &self.ranking_entry, limit)
            .into_iter()
            .map(|entry| RawMovie {
                title: self.movie_title(entry),
                rating: self.movie_rating(entry),
                provider_name: provider_name.to_string(),
            })
            .collect();

        debug!("Extracted {} titles for '{}'", movies.len(), provider_name);
        movies
    }

    fn provider_link(&self, item: ElementRef<'_>) -> ProviderLink {
        let anchor = item.select(&self.provider_anchor).next();

        ProviderLink {
            name: anchor
                .and_then(|a| a.value().attr("title"))
                .map(|s| s.to_string()),
            url: anchor
                .and_then(|a| a.value().attr("href"))
                .map(|s| s.to_string()),
        }
    }

    /// Text of the title link; empty when the link is missing or blank.
    pub fn movie_title(&self, entry: ElementRef<'_>) -> String {
        let title = collect_text(entry, &self.title_link);

        if title.trim().is_empty() {
            return String::new();
        }

        title
    }

    /// Rating text as published, e.g. `7,9`; empty when missing.
    pub fn movie_rating(&self, entry: ElementRef<'_>) -> String {
        collect_text(entry, &self.rating_value)
    }
}

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| ScraperError::Selector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

fn collect_text(element: ElementRef<'_>, selector: &Selector) -> String {
    element
        .select(selector)
        .flat_map(|node| node.text())
        .collect()
}
