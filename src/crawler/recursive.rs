//! Depth-first recursive crawl
//!
//! Each page is fetched, stored, and parsed, then every admitted link is
//! crawled in document order before the call returns. There is no
//! visited-set and no depth limit: a page whose links lead back to an
//! already-visited URL recurses without end. The first error of any kind
//! aborts the whole crawl; only external asset failures are tolerated.

use crate::config::{CrawlerConfig, Strategy};
use crate::crawler::assets::AssetLoader;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::page::visit_page;
use crate::crawler::parser::MalformedRefPolicy;
use crate::output::CrawlReport;
use crate::MirrorError;
use futures::future::BoxFuture;
use std::path::{Path, PathBuf};

/// Recursive crawl driver
pub struct RecursiveCrawler<'a, F> {
    loader: AssetLoader<'a, F>,
    config: &'a CrawlerConfig,
}

impl<'a, F: Fetcher + Sync> RecursiveCrawler<'a, F> {
    pub fn new(loader: AssetLoader<'a, F>, config: &'a CrawlerConfig) -> Self {
        Self { loader, config }
    }

    /// Crawls from `root_url`, storing the root page in `directory`
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlReport)` - Every reachable page was stored
    /// * `Err(MirrorError)` - The first failure; pages stored before it stay
    ///   on disk
    pub async fn run(&self, root_url: &str, directory: &Path) -> Result<CrawlReport, MirrorError> {
        let mut report = CrawlReport::new(root_url, Strategy::Recursive);
        self.crawl(root_url.to_string(), directory.to_path_buf(), 0, &mut report)
            .await?;
        report.finish();
        Ok(report)
    }

    fn crawl<'s>(
        &'s self,
        page_url: String,
        directory: PathBuf,
        depth: u32,
        report: &'s mut CrawlReport,
    ) -> BoxFuture<'s, Result<(), MirrorError>> {
        Box::pin(async move {
            tracing::debug!("Crawling {} (depth {})", page_url, depth);

            let visit = visit_page(
                &self.loader,
                &page_url,
                &directory,
                self.config.link_scope,
                MalformedRefPolicy::Abort,
            )
            .await?;
            report.record_page(&visit, depth);

            for link in &visit.links {
                let child_directory =
                    self.config
                        .directory_naming
                        .child_directory(&directory, &page_url, link);
                self.crawl(link.to_string(), child_directory, depth + 1, &mut *report)
                    .await?;
            }

            Ok(())
        })
    }
}
