// Entry point.
// Parses arguments, then fetches profile, repo stats, and activity in
// sequence, rendering each block to stdout. Completed runs exit 0 even when
// the data is partial or missing.

mod activity;
mod cache;
mod cli;
mod error;
mod github;
mod render;
mod timefmt;

use clap::{CommandFactory, Parser};

use crate::activity::{fetch_recent_activity, filter_events, summarize_repos};
use crate::cache::CacheStore;
use crate::cli::Cli;
use crate::error::OctofeedError;
use crate::github::GitHubClient;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("RUST_LOG", "warn"))
        .init();

    let args = Cli::parse();
    let Some(username) = args.username else {
        eprintln!("{}", Cli::command().render_usage());
        std::process::exit(1);
    };

    let mut client = match GitHubClient::new() {
        Ok(client) => client,
        Err(err) => {
            eprintln!("Could not initialize HTTP client: {}", err);
            std::process::exit(1);
        }
    };

    let user = match client.get_user(&username).await {
        Ok(user) => Some(user),
        Err(err) => {
            log::debug!("user info fetch failed: {}", err);
            None
        }
    };
    render::print_user_info(user.as_ref());
    println!();

    let stats = match client.get_user_repos(&username).await {
        Ok(repos) => Some(summarize_repos(&repos)),
        Err(err) => {
            log::debug!("repo list fetch failed: {}", err);
            None
        }
    };
    render::print_repo_stats(stats.as_ref());
    println!();

    let mut store = CacheStore::open();
    let outcome = fetch_recent_activity(
        &mut client,
        &mut store,
        &username,
        args.days,
        args.max_events,
        args.no_cache,
    )
    .await;

    if let Some(err) = &outcome.error {
        report_fetch_error(&username, err);
    }

    let events = match &args.event_type {
        Some(tag) => filter_events(&outcome.events, tag),
        None => outcome.events,
    };
    render::print_activity(&events, args.format);
}

/// One-line report for a failed fetch path. The run still renders whatever
/// was accumulated before the failure.
fn report_fetch_error(username: &str, err: &OctofeedError) {
    match err {
        OctofeedError::UserNotFound(_) => eprintln!("User '{}' not found.", username),
        OctofeedError::RateLimited { reset_at } => eprintln!(
            "API rate limit exceeded. Please try again later (resets at {}).",
            reset_at
        ),
        OctofeedError::Http { .. } => eprintln!("HTTP error occurred: {}", err),
        other => eprintln!("An error occurred while fetching the data: {}", other),
    }
}
