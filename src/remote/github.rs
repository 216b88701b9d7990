use crate::catalog::config::RemoteSettings;
use crate::error::{CatalogError, CatalogResult};
use crate::logging;
use crate::remote::codec::{from_base64, to_base64};
use crate::remote::{ContentStore, RemoteFile};
use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde_json::{Value, json};
use std::time::Duration;

const ACCEPT: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = concat!("prompt-catalog/", env!("CARGO_PKG_VERSION"));

/// Outcome of the repository connectivity probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionCheck {
    Connected { full_name: String },
    InvalidToken,
    RepoNotFound,
    Failed(u16),
}

/// Client for the GitHub repository contents API on one branch.
pub struct GitHubStore {
    client: Client,
    api_base: String,
    owner: String,
    repo: String,
    branch: String,
    token: String,
}

fn transport(err: reqwest::Error) -> CatalogError {
    CatalogError::Transport(err.to_string())
}

/// Pull `message` out of a GitHub error body, if there is one.
fn remote_message(body: &str) -> Option<String> {
    let parsed: Value = serde_json::from_str(body).ok()?;
    parsed
        .get("message")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(ToOwned::to_owned)
}

fn rejected(path: &str, response: Response, fallback: String) -> CatalogError {
    let status = response.status().as_u16();
    let body = response.text().unwrap_or_default();
    CatalogError::Rejected {
        path: path.to_string(),
        status,
        message: remote_message(&body).unwrap_or(fallback),
    }
}

fn parse_file(path: &str, json: &Value) -> CatalogResult<RemoteFile> {
    if json.is_array() {
        return Err(CatalogError::corrupt(path, "path is a directory"));
    }
    if json.get("encoding").and_then(Value::as_str) == Some("none") {
        return Err(CatalogError::corrupt(
            path,
            "file is too large for the contents API",
        ));
    }
    let sha = json
        .get("sha")
        .and_then(Value::as_str)
        .ok_or_else(|| CatalogError::corrupt(path, "response missing sha"))?;
    let encoded = json
        .get("content")
        .and_then(Value::as_str)
        .ok_or_else(|| CatalogError::corrupt(path, "response missing content"))?;
    Ok(RemoteFile {
        path: path.to_string(),
        content: from_base64(path, encoded)?,
        sha: sha.to_string(),
    })
}

impl GitHubStore {
    pub fn new(settings: &RemoteSettings) -> CatalogResult<Self> {
        if !settings.is_configured() {
            return Err(CatalogError::ConfigMissing(
                "set owner, repo and token with `catalog configure` first".to_string(),
            ));
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(transport)?;
        Ok(Self {
            client,
            api_base: settings.api_base.trim_end_matches('/').to_string(),
            owner: settings.owner.clone(),
            repo: settings.repo.clone(),
            branch: settings.branch.clone(),
            token: settings.token.clone(),
        })
    }

    fn repo_url(&self) -> String {
        format!("{}/repos/{}/{}", self.api_base, self.owner, self.repo)
    }

    fn contents_url(&self, path: &str) -> String {
        format!("{}/contents/{}", self.repo_url(), path)
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("Authorization", format!("token {}", self.token))
            .header("Accept", ACCEPT)
    }

    /// Probe the repository endpoint; only 401 and 404 get distinct outcomes.
    pub fn check_connection(&self) -> CatalogResult<ConnectionCheck> {
        let response = self
            .authed(self.client.get(self.repo_url()))
            .send()
            .map_err(transport)?;
        let status = response.status();
        if status.is_success() {
            let json: Value = response.json().map_err(transport)?;
            let full_name = json
                .get("full_name")
                .and_then(Value::as_str)
                .map(ToOwned::to_owned)
                .unwrap_or_else(|| format!("{}/{}", self.owner, self.repo));
            return Ok(ConnectionCheck::Connected { full_name });
        }
        Ok(match status {
            StatusCode::UNAUTHORIZED => ConnectionCheck::InvalidToken,
            StatusCode::NOT_FOUND => ConnectionCheck::RepoNotFound,
            other => ConnectionCheck::Failed(other.as_u16()),
        })
    }
}

impl ContentStore for GitHubStore {
    fn describe(&self) -> String {
        format!("github:{}/{}@{}", self.owner, self.repo, self.branch)
    }

    fn get(&self, path: &str) -> CatalogResult<Option<RemoteFile>> {
        let response = self
            .authed(
                self.client
                    .get(format!("{}?ref={}", self.contents_url(path), self.branch)),
            )
            .send()
            .map_err(transport)?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(rejected(
                path,
                response,
                format!("could not read {path} from repo"),
            ));
        }
        let json: Value = response.json().map_err(transport)?;
        parse_file(path, &json).map(Some)
    }

    fn put(
        &self,
        path: &str,
        content: &str,
        sha: Option<&str>,
        message: &str,
    ) -> CatalogResult<String> {
        let mut body = json!({
            "message": message,
            "content": to_base64(content),
            "branch": self.branch,
        });
        if let Some(sha) = sha {
            body["sha"] = Value::String(sha.to_string());
        }

        let response = self
            .authed(self.client.put(self.contents_url(path)))
            .json(&body)
            .send()
            .map_err(transport)?;
        if !response.status().is_success() {
            return Err(rejected(path, response, format!("failed to write {path}")));
        }

        let json: Value = response.json().map_err(transport)?;
        let new_sha = json
            .get("content")
            .and_then(|c| c.get("sha"))
            .and_then(Value::as_str)
            .ok_or_else(|| CatalogError::corrupt(path, "write response missing content.sha"))?;
        logging::debug("store.github.put", &[("path", path), ("sha", new_sha)]);
        Ok(new_sha.to_string())
    }

    fn remove(&self, path: &str, sha: &str, message: &str) -> CatalogResult<()> {
        let body = json!({
            "message": message,
            "sha": sha,
            "branch": self.branch,
        });
        let response = self
            .authed(self.client.delete(self.contents_url(path)))
            .json(&body)
            .send()
            .map_err(transport)?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(path.to_string()));
        }
        if !status.is_success() {
            return Err(rejected(path, response, format!("failed to delete {path}")));
        }
        logging::debug("store.github.remove", &[("path", path)]);
        Ok(())
    }
}
