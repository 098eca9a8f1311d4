// Presentation layer.
// Renders activity as a summary-plus-table or as annotated lines, and the
// profile and repository stats blocks.

use comfy_table::{Cell, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};

use crate::activity::RepoStatsSummary;
use crate::cli::OutputFormat;
use crate::github::{ActivityEvent, EventDetails, UserProfile};
use crate::timefmt;

/// Print the fetched activity in the requested format.
pub fn print_activity(events: &[ActivityEvent], format: OutputFormat) {
    if events.is_empty() {
        println!("No recent activity found for this user.");
        return;
    }

    match format {
        OutputFormat::Table => print_table(events),
        OutputFormat::Lines => print_lines(events),
    }
}

fn print_table(events: &[ActivityEvent]) {
    println!("Displaying {} most recent activities:", events.len());
    // Events arrive most recent first, so the earliest is the last element.
    println!(
        "Earliest activity: {}",
        timefmt::format_display(&events[events.len() - 1].created_at)
    );
    println!(
        "Latest activity: {}",
        timefmt::format_display(&events[0].created_at)
    );
    println!("---");

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("Event"),
            Cell::new("Repository"),
            Cell::new("Date"),
        ]);

    for event in events {
        table.add_row(vec![
            Cell::new(describe(event)),
            Cell::new(&event.repo),
            Cell::new(timefmt::format_display(&event.created_at)),
        ]);
    }

    println!("{}", table);
}

fn print_lines(events: &[ActivityEvent]) {
    println!("Recent GitHub Activity:");
    for event in events {
        println!("{}", event_line(event));
    }
}

/// Short description of an event for the table's Event column.
pub fn describe(event: &ActivityEvent) -> String {
    match &event.details {
        EventDetails::Push { commits } => format!("Pushed {} commit(s)", commits),
        EventDetails::Issue { action, number } => {
            format!("{} issue #{}", capitalize(action), number)
        }
        EventDetails::PullRequest { action, number } => {
            format!("{} PR #{}", capitalize(action), number)
        }
        EventDetails::IssueComment { number } => format!("Commented on issue #{}", number),
        EventDetails::RefCreated { ref_type } => format!("Created {}", ref_type),
        EventDetails::RefDeleted { ref_type } => format!("Deleted {}", ref_type),
        EventDetails::Starred => format!("Starred {}", event.repo),
        EventDetails::Other => event.event_type.clone(),
    }
}

/// One annotated line per event, with an emoji prefix keyed by type.
fn event_line(event: &ActivityEvent) -> String {
    let date = timefmt::format_display(&event.created_at);
    match &event.details {
        EventDetails::Push { commits } => format!(
            "🔨 Pushed {} commit{} to {} on {}",
            commits,
            if *commits == 1 { "" } else { "s" },
            event.repo,
            date
        ),
        EventDetails::PullRequest { action, number } => format!(
            "🔀 Pull request #{} {} on {} on {}",
            number, action, event.repo, date
        ),
        EventDetails::Issue { action, number } => {
            format!("📝 Issue #{} {} on {} on {}", number, action, event.repo, date)
        }
        EventDetails::IssueComment { number } => format!(
            "💬 Commented on issue #{} in {} on {}",
            number, event.repo, date
        ),
        EventDetails::Starred => format!("⭐ Starred {} on {}", event.repo, date),
        EventDetails::RefCreated { ref_type } => {
            format!("📁 Created {} in {} on {}", ref_type, event.repo, date)
        }
        EventDetails::RefDeleted { ref_type } => {
            format!("🗑️ Deleted {} in {} on {}", ref_type, event.repo, date)
        }
        EventDetails::Other => {
            format!("➡️ {} on {} on {}", event.event_type, event.repo, date)
        }
    }
}

/// Print the user profile block.
pub fn print_user_info(user: Option<&UserProfile>) {
    let Some(user) = user else {
        println!("Unable to fetch user information.");
        return;
    };

    println!("User: {}", user.login);
    println!("Name: {}", user.name.as_deref().unwrap_or("-"));
    println!("Bio: {}", user.bio.as_deref().unwrap_or("-"));
    println!("Public Repos: {}", user.public_repos);
    println!("Followers: {}", user.followers);
    println!("Following: {}", user.following);
}

/// Print the repository stats block.
pub fn print_repo_stats(stats: Option<&RepoStatsSummary>) {
    let Some(stats) = stats else {
        println!("Unable to fetch repository statistics.");
        return;
    };

    println!("Total Repositories: {}", stats.total_repos);
    println!("Total Stars: {}", stats.total_stars);
    println!("Total Forks: {}", stats.total_forks);
    println!(
        "Languages Used: {}",
        stats
            .languages
            .iter()
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    );
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(event_type: &str, details: EventDetails) -> ActivityEvent {
        ActivityEvent {
            event_type: event_type.to_string(),
            repo: "octocat/Hello-World".to_string(),
            created_at: "2024-01-15T10:30:00Z".parse().unwrap(),
            details,
        }
    }

    #[test]
    fn test_describe_push() {
        let e = event("PushEvent", EventDetails::Push { commits: 3 });
        assert_eq!(describe(&e), "Pushed 3 commit(s)");
    }

    #[test]
    fn test_describe_issue_capitalizes_action() {
        let e = event(
            "IssuesEvent",
            EventDetails::Issue {
                action: "opened".to_string(),
                number: 42,
            },
        );
        assert_eq!(describe(&e), "Opened issue #42");
    }

    #[test]
    fn test_describe_pull_request() {
        let e = event(
            "PullRequestEvent",
            EventDetails::PullRequest {
                action: "closed".to_string(),
                number: 7,
            },
        );
        assert_eq!(describe(&e), "Closed PR #7");
    }

    #[test]
    fn test_describe_issue_comment() {
        let e = event("IssueCommentEvent", EventDetails::IssueComment { number: 9 });
        assert_eq!(describe(&e), "Commented on issue #9");
    }

    #[test]
    fn test_describe_ref_events() {
        let created = event(
            "CreateEvent",
            EventDetails::RefCreated {
                ref_type: "branch".to_string(),
            },
        );
        assert_eq!(describe(&created), "Created branch");

        let deleted = event(
            "DeleteEvent",
            EventDetails::RefDeleted {
                ref_type: "tag".to_string(),
            },
        );
        assert_eq!(describe(&deleted), "Deleted tag");
    }

    #[test]
    fn test_describe_star_includes_repo() {
        let e = event("WatchEvent", EventDetails::Starred);
        assert_eq!(describe(&e), "Starred octocat/Hello-World");
    }

    #[test]
    fn test_describe_unknown_falls_back_to_raw_tag() {
        let e = event("GollumEvent", EventDetails::Other);
        assert_eq!(describe(&e), "GollumEvent");
    }

    #[test]
    fn test_event_line_push_pluralization() {
        let one = event("PushEvent", EventDetails::Push { commits: 1 });
        assert_eq!(
            event_line(&one),
            "🔨 Pushed 1 commit to octocat/Hello-World on 2024-01-15 10:30:00"
        );

        let many = event("PushEvent", EventDetails::Push { commits: 2 });
        assert_eq!(
            event_line(&many),
            "🔨 Pushed 2 commits to octocat/Hello-World on 2024-01-15 10:30:00"
        );
    }

    #[test]
    fn test_event_line_unknown_type() {
        let e = event("ForkEvent", EventDetails::Other);
        assert_eq!(
            event_line(&e),
            "➡️ ForkEvent on octocat/Hello-World on 2024-01-15 10:30:00"
        );
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("opened"), "Opened");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("a"), "A");
    }
}
