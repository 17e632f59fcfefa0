//! Test factories for GitHub models.
//!
//! Use `*_with()` variants to customize specific fields.
//!
//! # Example
//! ```ignore
//! use crate::infra::github::testing::factories;
//!
//! let issue = factories::issue_with(|i| {
//!     i.title = "Custom Title".to_string();
//!     i.number = 42;
//! });
//! ```

pub mod factories {
    use chrono::{Duration, Utc};

    use crate::infra::github::models::{Author, Comment, Issue, Label, Milestone};

    /// Create an Issue with default test values.
    pub fn issue() -> Issue {
        Issue {
            number: 1,
            title: "Test Issue".to_string(),
            body: Some("Test body".to_string()),
            state: "open".to_string(),
            labels: vec![],
            assignees: vec![],
            milestone: None,
            user: Some(author("testuser")),
            comments: 0,
            html_url: "https://github.com/owner/repo/issues/1".to_string(),
            // Relative times keep relative time formatting stable in tests
            created_at: Utc::now() - Duration::hours(2),
            updated_at: Utc::now(),
            pull_request: None,
        }
    }

    /// Create an Issue with customizations applied via closure.
    pub fn issue_with(f: impl FnOnce(&mut Issue)) -> Issue {
        let mut i = issue();
        f(&mut i);
        i
    }

    /// Create a Comment with default test values.
    pub fn comment() -> Comment {
        let created_at = Utc::now() - Duration::hours(1);
        Comment {
            id: 123,
            body: "Test comment".to_string(),
            user: Some(author("commenter")),
            html_url: "https://github.com/owner/repo/issues/1#issuecomment-123".to_string(),
            issue_url: "https://api.github.com/repos/owner/repo/issues/1".to_string(),
            created_at,
            updated_at: created_at,
        }
    }

    /// Create a Comment with customizations applied via closure.
    pub fn comment_with(f: impl FnOnce(&mut Comment)) -> Comment {
        let mut c = comment();
        f(&mut c);
        c
    }

    pub fn author(login: &str) -> Author {
        Author {
            login: login.to_string(),
        }
    }

    pub fn label(name: &str) -> Label {
        Label {
            name: name.to_string(),
        }
    }

    pub fn milestone(number: u64) -> Milestone {
        Milestone {
            number,
            title: format!("v{number}.0"),
        }
    }
}
