//! Comment operations.

use reqwest::Method;
use serde_json::json;
use tracing::info;

use super::client::GitHubClient;
use super::error::Result;
use super::models::Comment;
use crate::infra::git::RepoId;

const PER_PAGE: usize = 100;

impl GitHubClient {
    /// All comments on issue `number`, oldest first.
    pub async fn list_comments(&self, repo: &RepoId, number: u64) -> Result<Vec<Comment>> {
        let url = self.repo_url(repo, &format!("issues/{number}/comments"));
        let mut comments = Vec::new();

        for page in 1.. {
            let request = self
                .request(Method::GET, &url)
                .query(&[("per_page", PER_PAGE), ("page", page)]);
            let batch: Vec<Comment> = self.send_json(request).await?;
            let fetched = batch.len();
            comments.extend(batch);
            if fetched < PER_PAGE {
                break;
            }
        }

        Ok(comments)
    }

    pub async fn get_comment(&self, repo: &RepoId, id: u64) -> Result<Comment> {
        let url = self.repo_url(repo, &format!("issues/comments/{id}"));
        self.send_json(self.request(Method::GET, &url)).await
    }

    pub async fn create_comment(&self, repo: &RepoId, number: u64, body: &str) -> Result<Comment> {
        let url = self.repo_url(repo, &format!("issues/{number}/comments"));
        let comment: Comment = self
            .send_json(self.request(Method::POST, &url).json(&json!({ "body": body })))
            .await?;
        info!(issue = number, comment = comment.id, "Created comment");
        Ok(comment)
    }

    pub async fn update_comment(&self, repo: &RepoId, id: u64, body: &str) -> Result<Comment> {
        let url = self.repo_url(repo, &format!("issues/comments/{id}"));
        let comment: Comment = self
            .send_json(self.request(Method::PATCH, &url).json(&json!({ "body": body })))
            .await?;
        info!(comment = id, "Updated comment");
        Ok(comment)
    }

    pub async fn delete_comment(&self, repo: &RepoId, id: u64) -> Result<()> {
        let url = self.repo_url(repo, &format!("issues/comments/{id}"));
        self.send(self.request(Method::DELETE, &url)).await?;
        info!(comment = id, "Deleted comment");
        Ok(())
    }
}
