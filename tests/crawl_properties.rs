use async_trait::async_trait;
use link_mapper::{
    is_crawlable, CrawlConfig, CrawlError, CrawlResult, CrawlStats, Crawler, FetchError,
    PageFetcher,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// In-memory web: each URL answers with a page of links or an error.
// Unknown URLs answer 404. Every fetch is counted per URL.
struct StubWeb {
    pages: HashMap<String, Result<String, FetchError>>,
    delays: HashMap<String, Duration>,
    default_delay: Duration,
    fetches: Mutex<HashMap<String, usize>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl StubWeb {
    fn new() -> Self {
        Self {
            pages: HashMap::new(),
            delays: HashMap::new(),
            default_delay: Duration::ZERO,
            fetches: Mutex::new(HashMap::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    fn page(mut self, url: &str, links: &[&str]) -> Self {
        let body = links
            .iter()
            .map(|link| format!(r#"<a href="{}">{}</a>"#, link, link))
            .collect::<Vec<_>>()
            .join("\n");
        self.pages
            .insert(url.to_string(), Ok(format!("<html><body>{}</body></html>", body)));
        self
    }

    fn failing(mut self, url: &str, error: FetchError) -> Self {
        self.pages.insert(url.to_string(), Err(error));
        self
    }

    fn delay(mut self, url: &str, millis: u64) -> Self {
        self.delays.insert(url.to_string(), Duration::from_millis(millis));
        self
    }

    fn default_delay(mut self, millis: u64) -> Self {
        self.default_delay = Duration::from_millis(millis);
        self
    }

    fn fetch_counts(&self) -> HashMap<String, usize> {
        self.fetches.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for StubWeb {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        *self.fetches.lock().unwrap().entry(url.to_string()).or_insert(0) += 1;

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let delay = self.delays.get(url).copied().unwrap_or(self.default_delay);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.pages
            .get(url)
            .cloned()
            .unwrap_or(Err(FetchError::HttpStatus(404)))
    }
}

fn crawler(web: &Arc<StubWeb>) -> Crawler {
    Crawler::new(web.clone(), &CrawlConfig::default())
}

fn depths(result: &CrawlResult) -> Vec<(String, usize)> {
    result.records().map(|r| (r.url.clone(), r.depth)).collect()
}

#[tokio::test]
async fn depth_zero_returns_only_the_seed() {
    let web = Arc::new(
        StubWeb::new()
            .page("https://a.test/", &["https://b.test/", "https://c.test/"])
            .page("https://b.test/", &[])
            .page("https://c.test/", &[]),
    );

    let result = crawler(&web).run("https://a.test/", 0).await.unwrap();

    assert_eq!(result.len(), 1);
    let seed = result.get("https://a.test/").unwrap();
    assert_eq!(seed.depth, 0);
    assert_eq!(seed.outbound_links, vec!["https://b.test/", "https://c.test/"]);
    assert_eq!(web.fetch_counts().len(), 1);
}

#[tokio::test]
async fn cycles_terminate() {
    let web = Arc::new(
        StubWeb::new()
            .page("https://a.test/", &["https://b.test/"])
            .page("https://b.test/", &["https://a.test/"]),
    );

    let result = crawler(&web).run("https://a.test/", 5).await.unwrap();

    assert_eq!(
        depths(&result),
        vec![("https://a.test/".to_string(), 0), ("https://b.test/".to_string(), 1)]
    );
    assert_eq!(
        result.get("https://b.test/").unwrap().outbound_links,
        vec!["https://a.test/"]
    );
}

#[tokio::test]
async fn self_links_are_fetched_once() {
    let web = Arc::new(StubWeb::new().page("https://a.test/", &["https://a.test/", "/"]));

    let result = crawler(&web).run("https://a.test/", 3).await.unwrap();

    assert_eq!(result.len(), 1);
    assert_eq!(web.fetch_counts()["https://a.test/"], 1);
}

#[tokio::test]
async fn fetch_failure_is_isolated() {
    let web = Arc::new(
        StubWeb::new()
            .page(
                "https://a.test/",
                &["https://ok1.test/", "https://bad.test/", "https://ok2.test/"],
            )
            .page("https://ok1.test/", &[])
            .page("https://ok2.test/", &[])
            .failing(
                "https://bad.test/",
                FetchError::ConnectionFailed("connection refused".to_string()),
            ),
    );

    let result = crawler(&web).run("https://a.test/", 1).await.unwrap();

    assert_eq!(result.len(), 4);
    assert_eq!(result.error_count(), 1);
    assert!(result.get("https://ok1.test/").unwrap().is_ok());
    assert!(result.get("https://ok2.test/").unwrap().is_ok());

    let bad = result.get("https://bad.test/").unwrap();
    assert_eq!(bad.depth, 1);
    assert!(bad.outbound_links.is_empty());
    assert_eq!(
        bad.fetch_error,
        Some(FetchError::ConnectionFailed("connection refused".to_string()))
    );
}

#[tokio::test]
async fn failed_pages_are_not_expanded() {
    let web = Arc::new(
        StubWeb::new()
            .page("https://a.test/", &["https://slow.test/"])
            .failing("https://slow.test/", FetchError::Timeout),
    );

    let result = crawler(&web).run("https://a.test/", 4).await.unwrap();

    assert_eq!(result.len(), 2);
    assert_eq!(
        result.get("https://slow.test/").unwrap().fetch_error,
        Some(FetchError::Timeout)
    );
}

#[tokio::test]
async fn seed_failure_still_returns_a_result() {
    let web = Arc::new(StubWeb::new());

    let result = crawler(&web).run("https://gone.test/", 2).await.unwrap();

    assert_eq!(result.len(), 1);
    assert_eq!(
        result.get("https://gone.test/").unwrap().fetch_error,
        Some(FetchError::HttpStatus(404))
    );
}

#[tokio::test]
async fn diamond_is_deduplicated() {
    // C answers faster than B, so C's branch reaches D first
    let web = Arc::new(
        StubWeb::new()
            .page("https://a.test/", &["https://b.test/", "https://c.test/"])
            .page("https://b.test/", &["https://d.test/"])
            .page("https://c.test/", &["https://d.test/"])
            .page("https://d.test/", &[])
            .delay("https://b.test/", 30),
    );

    let result = crawler(&web).run("https://a.test/", 2).await.unwrap();

    assert_eq!(result.len(), 4);
    assert_eq!(result.get("https://d.test/").unwrap().depth, 2);
    assert!(web.fetch_counts().values().all(|&count| count == 1));
}

#[tokio::test]
async fn depth_is_the_shortest_hop_count() {
    // a -> b -> c and a -> c: c is one hop away even though b's branch is fast
    // and a's other links are slow
    let web = Arc::new(
        StubWeb::new()
            .page(
                "https://a.test/",
                &["https://b.test/", "https://slow.test/", "https://c.test/"],
            )
            .page("https://b.test/", &["https://c.test/"])
            .page("https://slow.test/", &[])
            .page("https://c.test/", &["https://e.test/"])
            .page("https://e.test/", &[])
            .delay("https://slow.test/", 40),
    );

    let result = crawler(&web).run("https://a.test/", 3).await.unwrap();

    assert_eq!(result.get("https://c.test/").unwrap().depth, 1);
    assert_eq!(result.get("https://e.test/").unwrap().depth, 2);
}

#[tokio::test]
async fn links_past_the_depth_limit_are_recorded_but_not_fetched() {
    let web = Arc::new(
        StubWeb::new()
            .page("https://a.test/", &["https://b.test/"])
            .page("https://b.test/", &["https://c.test/"])
            .page("https://c.test/", &[]),
    );

    let result = crawler(&web).run("https://a.test/", 1).await.unwrap();

    assert_eq!(result.len(), 2);
    assert_eq!(
        result.get("https://b.test/").unwrap().outbound_links,
        vec!["https://c.test/"]
    );
    assert!(!result.contains("https://c.test/"));
    assert!(!web.fetch_counts().contains_key("https://c.test/"));
}

#[tokio::test]
async fn duplicate_links_on_a_page_are_kept_but_fetched_once() {
    let web = Arc::new(
        StubWeb::new()
            .page("https://a.test/", &["https://b.test/", "https://b.test/"])
            .page("https://b.test/", &[]),
    );

    let result = crawler(&web).run("https://a.test/", 1).await.unwrap();

    assert_eq!(result.get("https://a.test/").unwrap().outbound_links.len(), 2);
    assert_eq!(web.fetch_counts()["https://b.test/"], 1);
}

// A denser graph: page i links to 2i, 3i and i+1 (mod 40), plus junk
fn grid_web(delay_for: impl Fn(usize) -> u64) -> StubWeb {
    let url = |i: usize| format!("https://site.test/p{}", i % 40);
    let mut web = StubWeb::new();
    for i in 0..40 {
        let links = [url(2 * i), url(3 * i), url(i + 1)];
        let mut refs: Vec<&str> = links.iter().map(String::as_str).collect();
        refs.push("mailto:someone@site.test");
        refs.push("javascript:void(0)");
        web = web.page(&url(i), &refs).delay(&url(i), delay_for(i));
    }
    web
}

#[tokio::test]
async fn keys_are_crawlable_unique_and_within_depth() {
    let max_depth = 3;
    let web = Arc::new(grid_web(|_| 0));

    let result = crawler(&web).run("https://site.test/p1", max_depth).await.unwrap();

    assert!(!result.is_empty());
    for record in result.records() {
        assert!(is_crawlable(&record.url), "{}", record.url);
        assert!(record.depth <= max_depth, "{} at {}", record.url, record.depth);
        assert!(record.outbound_links.iter().all(|l| is_crawlable(l)));
    }
    assert!(web.fetch_counts().values().all(|&count| count == 1));
    assert_eq!(web.fetch_counts().len(), result.len());
}

#[tokio::test]
async fn reruns_produce_identical_results() {
    let fast_first = Arc::new(grid_web(|i| (i % 7) as u64));
    let slow_first = Arc::new(grid_web(|i| 6 - (i % 7) as u64));

    let first = crawler(&fast_first).run("https://site.test/p1", 3).await.unwrap();
    let second = Crawler::new(
        slow_first.clone(),
        &CrawlConfig {
            concurrency: 2,
            ..Default::default()
        },
    )
    .run("https://site.test/p1", 3)
    .await
    .unwrap();

    assert_eq!(depths(&first), depths(&second));
    assert_eq!(first, second);
}

#[tokio::test]
async fn in_flight_fetches_are_bounded() {
    let links: Vec<String> = (0..20).map(|i| format!("https://wide.test/{}", i)).collect();
    let refs: Vec<&str> = links.iter().map(String::as_str).collect();
    let mut web = StubWeb::new().page("https://wide.test/", &refs).default_delay(20);
    for link in &links {
        web = web.page(link, &[]);
    }
    let web = Arc::new(web);

    let config = CrawlConfig {
        concurrency: 3,
        ..Default::default()
    };
    let result = Crawler::new(web.clone(), &config)
        .run("https://wide.test/", 1)
        .await
        .unwrap();

    assert_eq!(result.len(), 21);
    let max = web.max_in_flight.load(Ordering::SeqCst);
    assert!(max <= 3, "max in flight was {}", max);
    assert!(max >= 2, "siblings should run concurrently, max was {}", max);
}

#[tokio::test]
async fn observer_sees_every_event() {
    let web = Arc::new(
        StubWeb::new()
            .page("https://a.test/", &["https://b.test/", "https://c.test/"])
            .page("https://b.test/", &["https://c.test/"])
            .failing("https://c.test/", FetchError::HttpStatus(500)),
    );
    let stats = Arc::new(CrawlStats::new());

    let result = crawler(&web)
        .with_observer(stats.clone())
        .run("https://a.test/", 2)
        .await
        .unwrap();

    assert_eq!(stats.fetches_attempted(), 3);
    assert_eq!(stats.fetches_failed(), 1);
    assert_eq!(stats.records_produced(), result.len());
}

#[tokio::test]
async fn invalid_seed_aborts_before_fetching() {
    let web = Arc::new(StubWeb::new());

    let result = crawler(&web).run("/relative/only", 1).await;

    assert!(matches!(result, Err(CrawlError::InvalidUrl(_))));
    assert!(web.fetch_counts().is_empty());
}

#[test]
fn blocking_entry_point_waits_for_every_branch() {
    let web = Arc::new(
        StubWeb::new()
            .page("https://a.test/", &["https://b.test/"])
            .page("https://b.test/", &["https://c.test/"])
            .page("https://c.test/", &[])
            .default_delay(5),
    );

    let result = crawler(&web).run_blocking("https://a.test/", 2).unwrap();

    assert_eq!(result.len(), 3);
    assert_eq!(result.get("https://c.test/").unwrap().depth, 2);
}
