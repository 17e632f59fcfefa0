//! wiremock-based GitHub mock server for testing.
//!
//! Provides `GitHubMockServer` for HTTP-level mocking of GitHub API calls.
//!
//! # Usage
//!
//! Use the builder pattern via `mock.repo(owner, repo)` for a fluent API:
//!
//! ```ignore
//! let mock = GitHubMockServer::start().await;
//! let ctx = mock.repo("owner", "repo");
//!
//! // Issue operations
//! ctx.issue(123).get().await;
//! ctx.issue(123).title("Custom").body("Body").get().await;
//! ctx.issue(123).get_not_found().await;
//! ctx.issue(123).create_expecting(json!({"title": "Custom"})).await;
//! ctx.issue(123).update_expecting(json!({"labels": []})).await;
//! ctx.issue(123).no_update().await;
//! ctx.list_issues(vec![ctx.issue(1).to_json()]).await;
//!
//! // Comment operations
//! ctx.issue(123).comments(&[]).await;
//! ctx.issue(123).create_comment_expecting("Thanks").await;
//! ctx.comment(456).on_issue(123).get().await;
//! ctx.comment(456).update_expecting("Edited").await;
//! ctx.comment(456).delete().await;
//! ```
//!
//! Mocks mounted with an expectation are verified when the server is dropped.

use serde_json::{Value, json};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::auth::Credentials;
use super::client::GitHubClient;

fn mock_user(login: &str) -> Value {
    json!({
        "login": login,
        "id": 1,
        "html_url": format!("https://github.com/{login}"),
        "type": "User",
        "site_admin": false
    })
}

fn not_found() -> ResponseTemplate {
    ResponseTemplate::new(404).set_body_json(json!({
        "message": "Not Found",
        "documentation_url": "https://docs.github.com/rest"
    }))
}

/// A comment as returned by the list endpoint.
pub struct RemoteComment<'a> {
    pub id: u64,
    pub author: &'a str,
    pub body: &'a str,
}

/// Mock GitHub API server.
pub struct GitHubMockServer {
    pub server: MockServer,
}

impl GitHubMockServer {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Client pointed at this server, authenticated as `testuser`.
    pub fn client(&self) -> GitHubClient {
        GitHubClient::new(&self.server.uri(), Credentials::new("testuser", "test-token")).unwrap()
    }

    pub fn repo<'a>(&'a self, owner: &'a str, repo: &'a str) -> MockRepoContext<'a> {
        MockRepoContext {
            server: &self.server,
            owner,
            repo,
        }
    }
}

// ============ Builder Pattern API ============

/// Repository context for building mocks.
///
/// Created via `GitHubMockServer::repo()`. Provides builders for the issue
/// and comment endpoints scoped to a specific repository.
pub struct MockRepoContext<'a> {
    server: &'a MockServer,
    owner: &'a str,
    repo: &'a str,
}

impl<'a> MockRepoContext<'a> {
    /// Create an issue mock builder.
    pub fn issue(&self, number: u64) -> MockIssueBuilder<'a> {
        MockIssueBuilder {
            server: self.server,
            owner: self.owner,
            repo: self.repo,
            number,
            title: "Test Issue",
            body: Some("Test body"),
            state: "open",
            labels: vec!["bug"],
            assignee: None,
            milestone: None,
            is_pull_request: false,
        }
    }

    /// Create a comment mock builder.
    pub fn comment(&self, id: u64) -> MockCommentBuilder<'a> {
        MockCommentBuilder {
            server: self.server,
            owner: self.owner,
            repo: self.repo,
            id,
            issue_number: 1,
            author: "commenter",
            body: "Test comment",
        }
    }

    /// Mock GET /repos/{owner}/{repo}/issues returning `issues` for any query.
    pub async fn list_issues(&self, issues: Vec<Value>) {
        Mock::given(method("GET"))
            .and(path(format!("/repos/{}/{}/issues", self.owner, self.repo)))
            .respond_with(ResponseTemplate::new(200).set_body_json(Value::Array(issues)))
            .mount(self.server)
            .await;
    }
}

/// Builder for mocking issue endpoints.
pub struct MockIssueBuilder<'a> {
    server: &'a MockServer,
    owner: &'a str,
    repo: &'a str,
    number: u64,
    title: &'a str,
    body: Option<&'a str>,
    state: &'a str,
    labels: Vec<&'a str>,
    assignee: Option<&'a str>,
    milestone: Option<u64>,
    is_pull_request: bool,
}

impl<'a> MockIssueBuilder<'a> {
    /// Set the issue title.
    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    /// Set the issue body.
    pub fn body(mut self, body: &'a str) -> Self {
        self.body = Some(body);
        self
    }

    /// Return `"body": null`.
    pub fn no_body(mut self) -> Self {
        self.body = None;
        self
    }

    pub fn state(mut self, state: &'a str) -> Self {
        self.state = state;
        self
    }

    /// Set the labels.
    pub fn labels(mut self, labels: Vec<&'a str>) -> Self {
        self.labels = labels;
        self
    }

    pub fn assignee(mut self, login: &'a str) -> Self {
        self.assignee = Some(login);
        self
    }

    pub fn milestone(mut self, number: u64) -> Self {
        self.milestone = Some(number);
        self
    }

    /// Mark the issue as a pull request.
    pub fn pull_request(mut self) -> Self {
        self.is_pull_request = true;
        self
    }

    fn issue_path(&self) -> String {
        format!("/repos/{}/{}/issues/{}", self.owner, self.repo, self.number)
    }

    fn comments_path(&self) -> String {
        format!("{}/comments", self.issue_path())
    }

    /// REST representation of this issue.
    pub fn to_json(&self) -> Value {
        let (owner, repo, number) = (self.owner, self.repo, self.number);
        let labels: Vec<Value> = self
            .labels
            .iter()
            .map(|l| json!({"name": l, "color": "d73a4a"}))
            .collect();
        let assignees: Vec<Value> = self.assignee.into_iter().map(mock_user).collect();
        let milestone = self
            .milestone
            .map(|m| json!({"number": m, "title": format!("v{m}.0"), "state": "open"}));
        let mut issue = json!({
            "id": number,
            "url": format!("https://api.github.com/repos/{owner}/{repo}/issues/{number}"),
            "html_url": format!("https://github.com/{owner}/{repo}/issues/{number}"),
            "number": number,
            "state": self.state,
            "title": self.title,
            "body": self.body,
            "user": mock_user("testuser"),
            "labels": labels,
            "assignees": assignees,
            "milestone": milestone,
            "locked": false,
            "comments": 0,
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-02T00:00:00Z"
        });
        if self.is_pull_request
            && let Some(object) = issue.as_object_mut()
        {
            object.insert(
                "pull_request".to_string(),
                json!({"url": format!("https://api.github.com/repos/{owner}/{repo}/pulls/{number}")}),
            );
        }
        issue
    }

    /// Mount mock for GET /repos/{owner}/{repo}/issues/{number}.
    pub async fn get(self) {
        Mock::given(method("GET"))
            .and(path(self.issue_path()))
            .respond_with(ResponseTemplate::new(200).set_body_json(self.to_json()))
            .mount(self.server)
            .await;
    }

    /// Mount mock for GET /repos/{owner}/{repo}/issues/{number} returning 404.
    pub async fn get_not_found(self) {
        Mock::given(method("GET"))
            .and(path(self.issue_path()))
            .respond_with(not_found())
            .mount(self.server)
            .await;
    }

    /// Expect exactly one POST /repos/{owner}/{repo}/issues with `payload`.
    pub async fn create_expecting(self, payload: Value) {
        Mock::given(method("POST"))
            .and(path(format!("/repos/{}/{}/issues", self.owner, self.repo)))
            .and(body_json(payload))
            .respond_with(ResponseTemplate::new(201).set_body_json(self.to_json()))
            .expect(1)
            .mount(self.server)
            .await;
    }

    /// Expect no issue to be created.
    pub async fn no_create(self) {
        Mock::given(method("POST"))
            .and(path(format!("/repos/{}/{}/issues", self.owner, self.repo)))
            .respond_with(ResponseTemplate::new(201).set_body_json(self.to_json()))
            .expect(0)
            .mount(self.server)
            .await;
    }

    /// Expect exactly one PATCH of this issue with `payload`.
    pub async fn update_expecting(self, payload: Value) {
        Mock::given(method("PATCH"))
            .and(path(self.issue_path()))
            .and(body_json(payload))
            .respond_with(ResponseTemplate::new(200).set_body_json(self.to_json()))
            .expect(1)
            .mount(self.server)
            .await;
    }

    /// Expect no PATCH of this issue.
    pub async fn no_update(self) {
        Mock::given(method("PATCH"))
            .and(path(self.issue_path()))
            .respond_with(ResponseTemplate::new(200).set_body_json(self.to_json()))
            .expect(0)
            .mount(self.server)
            .await;
    }

    /// Mount mock for GET /repos/{owner}/{repo}/issues/{number}/comments.
    pub async fn comments(self, comments: &[RemoteComment<'_>]) {
        let (owner, repo, number) = (self.owner, self.repo, self.number);
        let bodies: Vec<Value> = comments
            .iter()
            .map(|c| comment_json(owner, repo, number, c.id, c.author, c.body))
            .collect();
        Mock::given(method("GET"))
            .and(path(self.comments_path()))
            .respond_with(ResponseTemplate::new(200).set_body_json(bodies))
            .mount(self.server)
            .await;
    }

    /// Expect exactly one comment with `body` on this issue.
    pub async fn create_comment_expecting(self, body: &str) {
        let response = comment_json(self.owner, self.repo, self.number, 1000, "testuser", body);
        Mock::given(method("POST"))
            .and(path(self.comments_path()))
            .and(body_json(json!({"body": body})))
            .respond_with(ResponseTemplate::new(201).set_body_json(response))
            .expect(1)
            .mount(self.server)
            .await;
    }

    /// Expect no comment to be created on this issue.
    pub async fn no_comment(self) {
        Mock::given(method("POST"))
            .and(path(self.comments_path()))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(self.server)
            .await;
    }
}

fn comment_json(
    owner: &str,
    repo: &str,
    issue_number: u64,
    comment_id: u64,
    author: &str,
    body: &str,
) -> Value {
    json!({
        "id": comment_id,
        "url": format!("https://api.github.com/repos/{owner}/{repo}/issues/comments/{comment_id}"),
        "html_url": format!("https://github.com/{owner}/{repo}/issues/{issue_number}#issuecomment-{comment_id}"),
        "issue_url": format!("https://api.github.com/repos/{owner}/{repo}/issues/{issue_number}"),
        "body": body,
        "author_association": "OWNER",
        "user": mock_user(author),
        "created_at": "2024-01-02T00:00:00Z",
        "updated_at": "2024-01-02T00:00:00Z"
    })
}

/// Builder for mocking comment endpoints.
pub struct MockCommentBuilder<'a> {
    server: &'a MockServer,
    owner: &'a str,
    repo: &'a str,
    id: u64,
    issue_number: u64,
    author: &'a str,
    body: &'a str,
}

impl<'a> MockCommentBuilder<'a> {
    pub fn on_issue(mut self, number: u64) -> Self {
        self.issue_number = number;
        self
    }

    pub fn author(mut self, login: &'a str) -> Self {
        self.author = login;
        self
    }

    pub fn body(mut self, body: &'a str) -> Self {
        self.body = body;
        self
    }

    fn comment_path(&self) -> String {
        format!(
            "/repos/{}/{}/issues/comments/{}",
            self.owner, self.repo, self.id
        )
    }

    /// REST representation of this comment.
    pub fn to_json(&self) -> Value {
        comment_json(
            self.owner,
            self.repo,
            self.issue_number,
            self.id,
            self.author,
            self.body,
        )
    }

    /// Mount mock for GET /repos/{owner}/{repo}/issues/comments/{id}.
    pub async fn get(self) {
        Mock::given(method("GET"))
            .and(path(self.comment_path()))
            .respond_with(ResponseTemplate::new(200).set_body_json(self.to_json()))
            .mount(self.server)
            .await;
    }

    pub async fn get_not_found(self) {
        Mock::given(method("GET"))
            .and(path(self.comment_path()))
            .respond_with(not_found())
            .mount(self.server)
            .await;
    }

    /// Expect exactly one PATCH of this comment with `body`.
    pub async fn update_expecting(self, body: &str) {
        let mut response = self.to_json();
        response["body"] = json!(body);
        Mock::given(method("PATCH"))
            .and(path(self.comment_path()))
            .and(body_json(json!({"body": body})))
            .respond_with(ResponseTemplate::new(200).set_body_json(response))
            .expect(1)
            .mount(self.server)
            .await;
    }

    /// Expect no PATCH of this comment.
    pub async fn no_update(self) {
        Mock::given(method("PATCH"))
            .and(path(self.comment_path()))
            .respond_with(ResponseTemplate::new(200).set_body_json(self.to_json()))
            .expect(0)
            .mount(self.server)
            .await;
    }

    /// Expect exactly one DELETE of this comment.
    pub async fn delete(self) {
        Mock::given(method("DELETE"))
            .and(path(self.comment_path()))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(self.server)
            .await;
    }
}
