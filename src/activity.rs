// Activity fetching and aggregation.
// Paginated fetch with a TTL-bounded cache in front, the event-type filter,
// and the repository stats reduction.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::cache::{CacheEntry, CacheStore, cache_key};
use crate::error::OctofeedError;
use crate::github::{ActivityEvent, GitHubClient, Repo};

/// Result of a fetch. Errors never abort the run; whatever accumulated
/// before the failure is returned alongside the error for reporting.
pub struct FetchOutcome {
    pub events: Vec<ActivityEvent>,
    pub error: Option<OctofeedError>,
}

/// Fetch a user's recent activity, most recent first.
///
/// A fresh cache entry short-circuits the network entirely. Otherwise pages
/// are accumulated until the day-window or max-event bound is hit, or
/// pagination runs out. Every exit path, including failures, flushes the
/// accumulated events (possibly empty) back to the cache.
pub async fn fetch_recent_activity(
    client: &mut GitHubClient,
    store: &mut CacheStore,
    username: &str,
    days: i64,
    max_events: usize,
    bypass_cache: bool,
) -> FetchOutcome {
    let key = cache_key(username, days, max_events);

    if !bypass_cache {
        if let Some(entry) = store.get(&key) {
            log::debug!("cache hit for {}", key);
            return FetchOutcome {
                events: entry.data.clone(),
                error: None,
            };
        }
    }
    log::debug!("cache miss for {}, fetching", key);

    let cutoff = Utc::now() - chrono::Duration::days(days);
    let mut events = Vec::new();
    let mut error = None;

    let mut page_result = client.get_events_first_page(username).await;
    loop {
        match page_result {
            Ok((page, next)) => {
                if page.is_empty() {
                    break;
                }
                if let PageOutcome::Complete = collect_page(&mut events, page, cutoff, max_events)
                {
                    break;
                }
                match next {
                    Some(url) => {
                        log::debug!("following pagination link");
                        page_result = client.get_events_page(&url).await;
                    }
                    None => break,
                }
            }
            Err(err) => {
                error = Some(err);
                break;
            }
        }
    }

    log::debug!(
        "collected {} events, rate limit remaining: {}",
        events.len(),
        client.rate_limit().remaining
    );

    if let Err(err) = store.put(key, CacheEntry::new(events.clone())) {
        log::warn!("could not write activity cache: {}", err);
    }

    FetchOutcome { events, error }
}

/// Whether the accumulation is finished or the next page is still needed.
#[derive(Debug, PartialEq, Eq)]
enum PageOutcome {
    NeedMore,
    Complete,
}

/// Fold one page of events (reverse-chronological) into the accumulator.
///
/// Stops entirely at the first event older than the cutoff, since every
/// later event on this and subsequent pages is older still; stops at
/// `max_events` mid-page.
fn collect_page(
    acc: &mut Vec<ActivityEvent>,
    page: Vec<ActivityEvent>,
    cutoff: DateTime<Utc>,
    max_events: usize,
) -> PageOutcome {
    for event in page {
        if event.created_at < cutoff {
            return PageOutcome::Complete;
        }
        acc.push(event);
        if acc.len() >= max_events {
            return PageOutcome::Complete;
        }
    }
    PageOutcome::NeedMore
}

/// Keep only events whose wire type tag matches exactly, order preserved.
pub fn filter_events(events: &[ActivityEvent], event_type: &str) -> Vec<ActivityEvent> {
    events
        .iter()
        .filter(|event| event.event_type == event_type)
        .cloned()
        .collect()
}

/// Aggregate statistics over a user's repositories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoStatsSummary {
    pub total_repos: usize,
    pub total_stars: u64,
    pub total_forks: u64,
    pub languages: BTreeSet<String>,
}

/// Reduce a repository list to totals and the set of distinct languages.
pub fn summarize_repos(repos: &[Repo]) -> RepoStatsSummary {
    RepoStatsSummary {
        total_repos: repos.len(),
        total_stars: repos.iter().map(|repo| repo.stargazers_count).sum(),
        total_forks: repos.iter().map(|repo| repo.forks_count).sum(),
        languages: repos
            .iter()
            .filter_map(|repo| repo.language.clone())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::EventDetails;
    use tempfile::TempDir;

    fn event_at(hours_ago: i64, event_type: &str) -> ActivityEvent {
        ActivityEvent {
            event_type: event_type.to_string(),
            repo: "octocat/Hello-World".to_string(),
            created_at: Utc::now() - chrono::Duration::hours(hours_ago),
            details: EventDetails::Starred,
        }
    }

    #[test]
    fn test_collect_page_stops_at_window_boundary() {
        let cutoff = Utc::now() - chrono::Duration::days(30);
        let page = vec![
            event_at(1, "WatchEvent"),
            event_at(2, "WatchEvent"),
            event_at(31 * 24, "WatchEvent"),
            event_at(32 * 24, "WatchEvent"),
        ];

        let mut acc = Vec::new();
        let outcome = collect_page(&mut acc, page, cutoff, 100);

        assert_eq!(outcome, PageOutcome::Complete);
        assert_eq!(acc.len(), 2);
    }

    #[test]
    fn test_collect_page_stops_at_max_events_mid_page() {
        let cutoff = Utc::now() - chrono::Duration::days(30);
        let page = (1..=10).map(|h| event_at(h, "WatchEvent")).collect();

        let mut acc = Vec::new();
        let outcome = collect_page(&mut acc, page, cutoff, 5);

        assert_eq!(outcome, PageOutcome::Complete);
        assert_eq!(acc.len(), 5);
    }

    #[test]
    fn test_collect_page_requests_more_when_neither_bound_hit() {
        let cutoff = Utc::now() - chrono::Duration::days(30);
        let page = (1..=3).map(|h| event_at(h, "WatchEvent")).collect();

        let mut acc = Vec::new();
        let outcome = collect_page(&mut acc, page, cutoff, 100);

        assert_eq!(outcome, PageOutcome::NeedMore);
        assert_eq!(acc.len(), 3);
    }

    #[test]
    fn test_collect_page_respects_accumulation_across_pages() {
        let cutoff = Utc::now() - chrono::Duration::days(30);
        let mut acc = vec![event_at(1, "WatchEvent"), event_at(2, "WatchEvent")];

        let page = (3..=8).map(|h| event_at(h, "WatchEvent")).collect();
        let outcome = collect_page(&mut acc, page, cutoff, 4);

        assert_eq!(outcome, PageOutcome::Complete);
        assert_eq!(acc.len(), 4);
    }

    #[tokio::test]
    async fn test_fresh_cache_entry_short_circuits_network() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = CacheStore::open_at(temp_dir.path().join("cache.json"));

        let cached = vec![event_at(1, "PushEvent"), event_at(2, "WatchEvent")];
        store
            .put(
                cache_key("octocat", 30, 100),
                CacheEntry::new(cached.clone()),
            )
            .unwrap();

        // The client never sends a request when the cache is fresh, so this
        // completes without network access.
        let mut client = GitHubClient::new().unwrap();
        let outcome =
            fetch_recent_activity(&mut client, &mut store, "octocat", 30, 100, false).await;

        assert!(outcome.error.is_none());
        assert_eq!(outcome.events, cached);
    }

    #[test]
    fn test_filter_keeps_only_matching_type_in_order() {
        let events = vec![
            event_at(1, "PushEvent"),
            event_at(2, "WatchEvent"),
            event_at(3, "PushEvent"),
        ];

        let pushes = filter_events(&events, "PushEvent");
        assert_eq!(pushes.len(), 2);
        assert!(pushes.iter().all(|e| e.event_type == "PushEvent"));
        assert!(pushes[0].created_at > pushes[1].created_at);
    }

    #[test]
    fn test_filter_is_case_sensitive_and_exact() {
        let events = vec![event_at(1, "PushEvent")];
        assert!(filter_events(&events, "pushevent").is_empty());
        assert!(filter_events(&events, "Push").is_empty());
    }

    #[test]
    fn test_filter_absent_type_yields_empty() {
        let events = vec![event_at(1, "PushEvent")];
        assert!(filter_events(&events, "ForkEvent").is_empty());
        assert!(filter_events(&[], "PushEvent").is_empty());
    }

    fn repo(stars: u64, forks: u64, language: Option<&str>) -> Repo {
        Repo {
            stargazers_count: stars,
            forks_count: forks,
            language: language.map(String::from),
        }
    }

    #[test]
    fn test_summarize_repos() {
        let repos = vec![
            repo(10, 2, Some("Rust")),
            repo(5, 1, Some("Python")),
            repo(0, 0, Some("Rust")),
            repo(3, 0, None),
        ];

        let stats = summarize_repos(&repos);
        assert_eq!(stats.total_repos, 4);
        assert_eq!(stats.total_stars, 18);
        assert_eq!(stats.total_forks, 3);
        assert_eq!(
            stats.languages.iter().collect::<Vec<_>>(),
            ["Python", "Rust"]
        );
    }

    #[test]
    fn test_summarize_zero_repos() {
        let stats = summarize_repos(&[]);
        assert_eq!(stats.total_repos, 0);
        assert_eq!(stats.total_stars, 0);
        assert_eq!(stats.total_forks, 0);
        assert!(stats.languages.is_empty());
    }
}
