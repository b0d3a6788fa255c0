use crate::config::DocCrawlerConfig;
use crate::crawlers::fetch::Fetch;
use crate::error::Result;
use crate::filter::LinkFilter;
use crate::parsers::Parser;
use crate::parsers::html::ContentExtractor;
use crate::results::{CrawlState, NodeId};
use crate::utils::write_text_file;
use std::path::PathBuf;
use url::Url;

/// A URL waiting on the work stack, with the node it was discovered under
#[derive(Debug)]
struct Pending {
    url: Url,
    parent: Option<NodeId>,
    level: usize,
}

/// Depth-first documentation crawler.
///
/// Fetches one page at a time. Each page becomes a node of the crawl tree and
/// its documentation links are explored before any of its later siblings,
/// exactly as a recursive traversal would, but driven by an explicit stack.
pub struct DocCrawler<F> {
    fetcher: F,
    parser: Parser,
    debug_dump_file: Option<PathBuf>,
}

impl<F: Fetch> DocCrawler<F> {
    pub fn new(fetcher: F, parser: Parser) -> Self {
        Self {
            fetcher,
            parser,
            debug_dump_file: None,
        }
    }

    /// Build a crawler whose parser and link filter follow `config`
    pub fn from_config(fetcher: F, config: &DocCrawlerConfig) -> Result<Self> {
        let parser = Parser::new(
            ContentExtractor::new(&config.code_language),
            LinkFilter::from_crawler_config(config)?,
        );
        Ok(Self::new(fetcher, parser).with_debug_dump_file(config.debug_dump_file.clone()))
    }

    /// Where raw HTML is written when a page has no content region
    pub fn with_debug_dump_file(mut self, path: Option<PathBuf>) -> Self {
        self.debug_dump_file = path;
        self
    }

    /// Crawls `url` and everything reachable from it, recording pages in
    /// `state.tree` under `parent`.
    ///
    /// Returns the Markdown fragment of `url` itself; None when it was
    /// already visited, could not be fetched, or had no content region.
    /// Failures below `url` never stop the crawl. A `parent` that is not in
    /// the tree is ignored and `url` becomes a new root.
    pub async fn crawl(
        &self,
        url: &Url,
        state: &mut CrawlState,
        parent: Option<NodeId>,
    ) -> Option<String> {
        // Same normalization as discovered links, so the start page is
        // deduplicated against links back to it.
        let url = self.parser.filter().normalize_url(url);
        let (parent, level) = match parent.map(|id| (id, state.tree.get(id))) {
            None => (None, 1),
            Some((id, Some(node))) => (Some(id), node.level + 1),
            Some((id, None)) => {
                ::log::warn!("Unknown parent node {} for {}, crawling it as a root", id, url);
                (None, 1)
            }
        };
        let mut stack = vec![Pending { url, parent, level }];
        let mut root_fragment = None;
        let mut is_root = true;

        while let Some(pending) = stack.pop() {
            let is_current_root = std::mem::replace(&mut is_root, false);
            let key = pending.url.to_string();

            // Marked before fetching so a page linking back to itself or an
            // ancestor is never fetched twice.
            if !state.visited.insert(key.clone()) {
                ::log::trace!("Skipping already visited: {}", key);
                continue;
            }

            ::log::info!("Crawling {} (level {})", key, pending.level);

            let html = match self.fetcher.fetch(&pending.url).await {
                Ok(html) => html,
                Err(e) => {
                    ::log::error!("Failed to fetch {}: {}", key, e);
                    state.failed.push(key);
                    continue;
                }
            };

            let page = self.parser.parse(&html, &pending.url);
            let content = match page.content {
                Ok(content) => Some(content),
                Err(e) => {
                    ::log::warn!("{} for {}", e, key);
                    self.dump_html(&html);
                    None
                }
            };

            if is_current_root {
                root_fragment = content.clone();
            }

            let id = state
                .tree
                .insert(pending.parent, page.title, key, content);

            ::log::debug!("Found {} links on {}", page.links.len(), pending.url);
            stack.extend(
                page.links
                    .into_iter()
                    .rev()
                    .filter(|link| !state.visited.contains(link.url.as_str()))
                    .map(|link| Pending {
                        url: link.url,
                        parent: Some(id),
                        level: pending.level + 1,
                    }),
            );
        }

        root_fragment
    }

    fn dump_html(&self, html: &str) {
        let Some(path) = &self.debug_dump_file else {
            return;
        };
        match write_text_file(path, html) {
            Ok(()) => ::log::info!("Saved raw HTML to {} for inspection", path.display()),
            Err(e) => ::log::warn!("{}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawlers::fetch::StaticFetcher;
    use crate::document::assemble;
    use crate::error::FetchError;
    use std::sync::Mutex;

    const START: &str = "https://tushare.pro/document/2";

    /// Records every URL it is asked for
    struct CountingFetcher {
        inner: StaticFetcher,
        requests: Mutex<Vec<String>>,
    }

    impl CountingFetcher {
        fn new(inner: StaticFetcher) -> Self {
            Self {
                inner,
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl Fetch for CountingFetcher {
        async fn fetch(&self, url: &Url) -> std::result::Result<String, FetchError> {
            self.requests.lock().unwrap().push(url.to_string());
            self.inner.fetch(url).await
        }
    }

    fn page(title: &str, body: &str, links: &[&str]) -> String {
        let anchors: String = links
            .iter()
            .map(|href| format!(r#"<a href="{href}">to {href}</a>"#))
            .collect();
        format!(
            r#"<html><body><nav>{anchors}</nav><div class="doc-content"><h1>{title}</h1><p>{body}</p></div></body></html>"#
        )
    }

    fn url(path: &str) -> String {
        format!("https://tushare.pro{path}")
    }

    fn crawler<F: Fetch>(fetcher: F) -> DocCrawler<F> {
        DocCrawler::from_config(fetcher, &DocCrawlerConfig {
            debug_dump_file: None,
            ..DocCrawlerConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_two_page_site() {
        let fetcher = StaticFetcher::new()
            .with_page(
                START,
                r#"<html><body><div class="doc-content"><h1>Intro</h1><p>Hello</p></div>
                   <a href="/document/5">Next</a></body></html>"#,
            )
            .with_page(&url("/document/5"), &page("Next", "World", &[]));
        let mut state = CrawlState::new();

        let fragment = crawler(fetcher)
            .crawl(&Url::parse(START).unwrap(), &mut state, None)
            .await;

        assert_eq!(fragment.as_deref(), Some("# Intro\n\nHello\n"));
        assert_eq!(state.visited.len(), 2);
        assert!(state.failed.is_empty());

        let summary = state.tree.summary();
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].title, "Intro");
        assert_eq!(summary[0].children, vec!["Next".to_string()]);

        let doc = assemble(&state.tree);
        assert_eq!(doc, "# Intro\n\nHello\n\n\n## Next\n\nWorld\n");
    }

    #[tokio::test]
    async fn test_cycle_visits_each_page_once() {
        let fetcher = CountingFetcher::new(
            StaticFetcher::new()
                .with_page(START, &page("A", "a", &["/document/3"]))
                .with_page(&url("/document/3"), &page("B", "b", &["/document/2"])),
        );
        let crawler = crawler(fetcher);
        let mut state = CrawlState::new();

        crawler
            .crawl(&Url::parse(START).unwrap(), &mut state, None)
            .await;

        assert_eq!(crawler.fetcher.requests(), vec![START.to_string(), url("/document/3")]);
        assert_eq!(state.tree.len(), 2);
    }

    #[tokio::test]
    async fn test_failed_link_does_not_stop_siblings() {
        let fetcher = StaticFetcher::new()
            .with_page(START, &page("Root", "r", &["/document/9", "/document/5"]))
            .with_failure(
                &url("/document/9"),
                FetchError::Transport {
                    url: url("/document/9"),
                    message: "connection reset".into(),
                },
            )
            .with_page(&url("/document/5"), &page("Sibling", "s", &[]));
        let mut state = CrawlState::new();

        crawler(fetcher)
            .crawl(&Url::parse(START).unwrap(), &mut state, None)
            .await;

        assert_eq!(state.failed, vec![url("/document/9")]);
        let titles: Vec<&str> = state
            .tree
            .depth_first()
            .into_iter()
            .map(|(node, _)| node.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Root", "Sibling"]);
    }

    #[tokio::test]
    async fn test_failed_start_page() {
        let mut state = CrawlState::new();
        let fragment = crawler(StaticFetcher::new())
            .crawl(&Url::parse(START).unwrap(), &mut state, None)
            .await;

        assert_eq!(fragment, None);
        assert!(state.tree.is_empty());
        assert_eq!(state.visited.len(), 1);
        assert_eq!(state.failed, vec![START.to_string()]);
    }

    #[tokio::test]
    async fn test_visiting_order_matches_recursion() {
        // A -> [B, C], B -> [C, D]: C is reached through B first.
        let fetcher = StaticFetcher::new()
            .with_page(START, &page("A", "a", &["/document/3", "/document/4"]))
            .with_page(&url("/document/3"), &page("B", "b", &["/document/4", "/document/5"]))
            .with_page(&url("/document/4"), &page("C", "c", &[]))
            .with_page(&url("/document/5"), &page("D", "d", &[]));
        let mut state = CrawlState::new();

        crawler(fetcher)
            .crawl(&Url::parse(START).unwrap(), &mut state, None)
            .await;

        let order: Vec<(&str, usize)> = state
            .tree
            .depth_first()
            .into_iter()
            .map(|(node, depth)| (node.title.as_str(), depth))
            .collect();
        assert_eq!(order, vec![("A", 1), ("B", 2), ("C", 3), ("D", 3)]);
        for (node, depth) in state.tree.depth_first() {
            assert_eq!(node.level, depth);
        }
    }

    #[tokio::test]
    async fn test_missing_content_region_is_recorded_and_dumped() {
        let dir = tempfile::tempdir().unwrap();
        let dump = dir.path().join("debug_page.html");
        let empty = "<html><head><title>Empty</title></head></html>";
        let fetcher = StaticFetcher::new().with_page(START, empty);
        let crawler = crawler(fetcher).with_debug_dump_file(Some(dump.clone()));
        let mut state = CrawlState::new();

        let fragment = crawler
            .crawl(&Url::parse(START).unwrap(), &mut state, None)
            .await;

        assert_eq!(fragment, None);
        let node = state.tree.get(0).unwrap();
        assert_eq!(node.title, "Empty");
        assert_eq!(node.content, None);
        assert_eq!(std::fs::read_to_string(&dump).unwrap(), empty);
    }

    #[tokio::test]
    async fn test_already_visited_start_is_a_no_op() {
        let fetcher = CountingFetcher::new(StaticFetcher::new().with_page(START, &page("A", "a", &[])));
        let crawler = crawler(fetcher);
        let mut state = CrawlState::new();
        state.visited.insert(START.to_string());

        let fragment = crawler
            .crawl(&Url::parse(START).unwrap(), &mut state, None)
            .await;

        assert_eq!(fragment, None);
        assert!(crawler.fetcher.requests().is_empty());
        assert!(state.tree.is_empty());
    }

    #[tokio::test]
    async fn test_same_titles_under_one_parent_are_both_kept() {
        let fetcher = StaticFetcher::new()
            .with_page(START, &page("Root", "r", &["/document/3", "/document/4"]))
            .with_page(&url("/document/3"), &page("接口", "first", &[]))
            .with_page(&url("/document/4"), &page("接口", "second", &[]));
        let mut state = CrawlState::new();

        crawler(fetcher)
            .crawl(&Url::parse(START).unwrap(), &mut state, None)
            .await;

        let children: Vec<&str> = state.tree.children(0).map(|c| c.url.as_str()).collect();
        assert_eq!(children, vec![url("/document/3"), url("/document/4")]);
    }

    #[tokio::test]
    async fn test_crawl_under_existing_parent() {
        let fetcher = StaticFetcher::new().with_page(&url("/document/7"), &page("Child", "c", &[]));
        let mut state = CrawlState::new();
        let root = state
            .tree
            .insert(None, "Root".into(), START.into(), Some("# Root\n".into()));

        let fragment = crawler(fetcher)
            .crawl(&Url::parse(&url("/document/7")).unwrap(), &mut state, Some(root))
            .await;

        assert_eq!(fragment.as_deref(), Some("# Child\n\nc\n"));
        let child = state.tree.children(root).next().unwrap();
        assert_eq!(child.level, 2);
        assert_eq!(child.parent, Some(root));
    }

    #[tokio::test]
    async fn test_unknown_parent_becomes_root() {
        let fetcher = StaticFetcher::new().with_page(START, &page("A", "a", &[]));
        let mut state = CrawlState::new();

        let fragment = crawler(fetcher)
            .crawl(&Url::parse(START).unwrap(), &mut state, Some(3))
            .await;

        assert_eq!(fragment.as_deref(), Some("# A\n\na\n"));
        let node = state.tree.get(0).unwrap();
        assert_eq!(node.parent, None);
        assert_eq!(node.level, 1);
        assert_eq!(state.tree.roots().count(), 1);
    }

    #[tokio::test]
    async fn test_start_fragment_is_stripped() {
        let fetcher = CountingFetcher::new(
            StaticFetcher::new()
                .with_page(START, &page("A", "a", &["/document/3"]))
                .with_page(&url("/document/3"), &page("B", "b", &["/document/2"])),
        );
        let crawler = crawler(fetcher);
        let mut state = CrawlState::new();

        crawler
            .crawl(&Url::parse(&format!("{START}#params")).unwrap(), &mut state, None)
            .await;

        assert_eq!(crawler.fetcher.requests(), vec![START.to_string(), url("/document/3")]);
        assert_eq!(state.tree.get(0).unwrap().url, START);
        assert_eq!(state.tree.len(), 2);
    }
}
