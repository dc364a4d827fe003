//! Breadth-first worklist crawl
//!
//! Pages are visited one link-depth level at a time. A URL enters the
//! worklist only if its fragment-less form has not been seen before, so every
//! reachable page is fetched once even when the link graph has cycles.
//!
//! Within a level, up to `max-concurrent-pages` visits run at once. Results
//! are consumed in worklist order, which keeps child directory assignment
//! independent of which request finishes first. A failed visit is recorded
//! in the report and the crawl moves on.

use crate::config::{CrawlerConfig, Strategy};
use crate::crawler::assets::AssetLoader;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::page::visit_page;
use crate::crawler::parser::MalformedRefPolicy;
use crate::links::page_identity;
use crate::output::CrawlReport;
use crate::MirrorError;
use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use url::Url;

/// A page waiting to be visited
#[derive(Debug, Clone)]
struct PendingPage {
    url: String,
    directory: PathBuf,
    depth: u32,
}

/// Worklist crawl driver
pub struct WorklistCrawler<'a, F> {
    loader: AssetLoader<'a, F>,
    config: &'a CrawlerConfig,
}

impl<'a, F: Fetcher + Sync> WorklistCrawler<'a, F> {
    pub fn new(loader: AssetLoader<'a, F>, config: &'a CrawlerConfig) -> Self {
        Self { loader, config }
    }

    /// Crawls from `root_url`, storing the root page in `directory`
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlReport)` - The crawl ran to completion; individual page
    ///   failures are listed in the report
    /// * `Err(MirrorError::MalformedUrl)` - `root_url` is not an absolute URL
    pub async fn run(&self, root_url: &str, directory: &Path) -> Result<CrawlReport, MirrorError> {
        let root = Url::parse(root_url).map_err(|source| MirrorError::MalformedUrl {
            input: root_url.to_string(),
            source,
        })?;

        let mut report = CrawlReport::new(root_url, Strategy::Worklist);
        let mut visited = HashSet::new();
        visited.insert(page_identity(&root));

        let mut level = vec![PendingPage {
            url: root_url.to_string(),
            directory: directory.to_path_buf(),
            depth: 0,
        }];

        while !level.is_empty() {
            tracing::info!(
                "Visiting {} pages at depth {} ({} seen so far)",
                level.len(),
                level[0].depth,
                visited.len()
            );

            let concurrency = self.config.max_concurrent_pages.max(1) as usize;
            let outcomes: Vec<(PendingPage, Result<_, MirrorError>)> = stream::iter(level)
                .map(|page| async move {
                    let outcome = visit_page(
                        &self.loader,
                        &page.url,
                        &page.directory,
                        self.config.link_scope,
                        MalformedRefPolicy::Skip,
                    )
                    .await;
                    (page, outcome)
                })
                .buffered(concurrency)
                .collect()
                .await;

            let mut next_level = Vec::new();
            for (page, outcome) in outcomes {
                let visit = match outcome {
                    Ok(visit) => visit,
                    Err(e) => {
                        tracing::warn!("Skipping {}: {}", page.url, e);
                        report.record_failure(&page.url, page.directory, page.depth, &e);
                        continue;
                    }
                };
                report.record_page(&visit, page.depth);

                if self.depth_exhausted(page.depth) {
                    tracing::debug!("Not following links of {}: depth limit reached", page.url);
                    continue;
                }

                for link in &visit.links {
                    if !visited.insert(page_identity(link)) {
                        continue;
                    }
                    next_level.push(PendingPage {
                        url: link.to_string(),
                        directory: self.config.directory_naming.child_directory(
                            &page.directory,
                            &page.url,
                            link,
                        ),
                        depth: page.depth + 1,
                    });
                }
            }

            level = next_level;
        }

        report.finish();
        tracing::info!(
            "Crawl finished: {} pages saved, {} failed",
            report.pages.len(),
            report.failures.len()
        );
        Ok(report)
    }

    fn depth_exhausted(&self, depth: u32) -> bool {
        self.config
            .max_depth
            .map_or(false, |max_depth| depth >= max_depth)
    }
}
