// GitHub API endpoint functions.
// Provides typed methods for fetching data from the GitHub REST API.

use crate::error::Result;

use super::client::{GitHubClient, next_page_url};
use super::types::{ActivityEvent, RawEvent, Repo, UserProfile};

/// Maximum page size the events endpoint allows.
pub const EVENTS_PER_PAGE: u32 = 100;

impl GitHubClient {
    /// Get the first page of public events for a user, plus the follow-on
    /// pagination URL if one exists.
    pub async fn get_events_first_page(
        &mut self,
        username: &str,
    ) -> Result<(Vec<ActivityEvent>, Option<String>)> {
        let params = [("per_page", EVENTS_PER_PAGE.to_string())];
        let response = self
            .get_with_params(&format!("/users/{}/events", username), &params)
            .await?;
        decode_events_page(response).await
    }

    /// Get a subsequent page of events via a pagination URL.
    pub async fn get_events_page(
        &mut self,
        url: &str,
    ) -> Result<(Vec<ActivityEvent>, Option<String>)> {
        let response = self.get_url(url).await?;
        decode_events_page(response).await
    }

    /// Get a user's profile.
    pub async fn get_user(&mut self, username: &str) -> Result<UserProfile> {
        let response = self.get(&format!("/users/{}", username)).await?;
        let user: UserProfile = response.json().await?;
        Ok(user)
    }

    /// Get a user's public repositories. Treated as single-page.
    pub async fn get_user_repos(&mut self, username: &str) -> Result<Vec<Repo>> {
        let response = self.get(&format!("/users/{}/repos", username)).await?;
        let repos: Vec<Repo> = response.json().await?;
        Ok(repos)
    }
}

/// Decode one page of raw events, skipping records with malformed
/// timestamps rather than failing the page.
async fn decode_events_page(
    response: reqwest::Response,
) -> Result<(Vec<ActivityEvent>, Option<String>)> {
    let next = next_page_url(response.headers());
    let raw: Vec<RawEvent> = response.json().await?;

    let mut events = Vec::with_capacity(raw.len());
    for item in raw {
        match ActivityEvent::from_raw(item) {
            Ok(event) => events.push(event),
            Err(err) => log::warn!("skipping event with bad timestamp: {}", err),
        }
    }

    Ok((events, next))
}
