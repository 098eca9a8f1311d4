// GitHub API response types.
// Defines structs for deserializing GitHub REST API responses and the typed
// per-event payload union built from the wire type tag.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::timefmt;

/// Event as returned by the events endpoint, payload still undecoded.
#[derive(Debug, Deserialize)]
pub struct RawEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub repo: RepoRef,
    pub created_at: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}

/// Repository reference embedded in an event.
#[derive(Debug, Deserialize)]
pub struct RepoRef {
    pub name: String,
}

/// A single public activity record with its payload decoded.
///
/// `event_type` keeps the raw wire tag so filtering stays an exact string
/// match and unrecognized types can still be rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEvent {
    pub event_type: String,
    pub repo: String,
    pub created_at: DateTime<Utc>,
    pub details: EventDetails,
}

impl ActivityEvent {
    /// Decode a raw event. Fails only on a malformed timestamp; a payload
    /// that does not match its expected shape degrades to `Other`.
    pub fn from_raw(raw: RawEvent) -> Result<Self> {
        let created_at = timefmt::parse_event_timestamp(&raw.created_at)?;
        Ok(Self {
            details: EventDetails::from_payload(&raw.event_type, raw.payload),
            event_type: raw.event_type,
            repo: raw.repo.name,
            created_at,
        })
    }
}

/// Typed payload variants, dispatched on the wire type tag at parse time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventDetails {
    Push { commits: usize },
    Issue { action: String, number: u64 },
    PullRequest { action: String, number: u64 },
    IssueComment { number: u64 },
    RefCreated { ref_type: String },
    RefDeleted { ref_type: String },
    Starred,
    Other,
}

#[derive(Debug, Deserialize)]
struct PushPayload {
    #[serde(default)]
    commits: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct IssuesPayload {
    action: String,
    issue: IssueRef,
}

#[derive(Debug, Deserialize)]
struct IssueRef {
    number: u64,
}

#[derive(Debug, Deserialize)]
struct PullRequestPayload {
    action: String,
    pull_request: PullRequestRef,
}

#[derive(Debug, Deserialize)]
struct PullRequestRef {
    number: u64,
}

#[derive(Debug, Deserialize)]
struct IssueCommentPayload {
    issue: IssueRef,
}

#[derive(Debug, Deserialize)]
struct RefPayload {
    ref_type: String,
}

impl EventDetails {
    fn from_payload(event_type: &str, payload: serde_json::Value) -> Self {
        match event_type {
            "PushEvent" => serde_json::from_value::<PushPayload>(payload)
                .map(|p| Self::Push {
                    commits: p.commits.len(),
                })
                .unwrap_or(Self::Other),
            "IssuesEvent" => serde_json::from_value::<IssuesPayload>(payload)
                .map(|p| Self::Issue {
                    action: p.action,
                    number: p.issue.number,
                })
                .unwrap_or(Self::Other),
            "PullRequestEvent" => serde_json::from_value::<PullRequestPayload>(payload)
                .map(|p| Self::PullRequest {
                    action: p.action,
                    number: p.pull_request.number,
                })
                .unwrap_or(Self::Other),
            "IssueCommentEvent" => serde_json::from_value::<IssueCommentPayload>(payload)
                .map(|p| Self::IssueComment {
                    number: p.issue.number,
                })
                .unwrap_or(Self::Other),
            "CreateEvent" => serde_json::from_value::<RefPayload>(payload)
                .map(|p| Self::RefCreated {
                    ref_type: p.ref_type,
                })
                .unwrap_or(Self::Other),
            "DeleteEvent" => serde_json::from_value::<RefPayload>(payload)
                .map(|p| Self::RefDeleted {
                    ref_type: p.ref_type,
                })
                .unwrap_or(Self::Other),
            "WatchEvent" => Self::Starred,
            _ => Self::Other,
        }
    }
}

/// GitHub user profile. Fetched fresh every invocation, never cached.
#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    pub login: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub public_repos: u64,
    pub followers: u64,
    pub following: u64,
}

/// Repository record from the list-repositories endpoint. Only the fields
/// feeding the stats summary are kept.
#[derive(Debug, Clone, Deserialize)]
pub struct Repo {
    pub stargazers_count: u64,
    pub forks_count: u64,
    pub language: Option<String>,
}

/// Rate limit information from response headers.
#[derive(Debug, Clone, Default)]
pub struct RateLimit {
    pub limit: u64,
    pub remaining: u64,
    pub reset: u64,
}
