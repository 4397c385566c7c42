//! GitHub contents API client: appends interaction entries to a tracked
//! file in the configured repository.
//!
//! Each append is independent and best effort: fetch the file's current
//! text and sha, add one timestamped line, write the whole file back. Two
//! appends in flight at once can read the same sha, in which case the
//! later write wins and the earlier line is lost remotely (the local
//! mirror still has it); see DESIGN.md.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};

use crate::log;

fn github_owner() -> String {
    std::env::var("GITHUB_OWNER").unwrap_or_default()
}
fn github_repo() -> String {
    std::env::var("GITHUB_REPO").unwrap_or_default()
}
fn github_file_path() -> String {
    std::env::var("GITHUB_FILE_PATH").unwrap_or_else(|_| "interactions.txt".to_string())
}
fn github_token() -> String {
    std::env::var("GITHUB_TOKEN").unwrap_or_default()
}

const ACCEPT_RAW: &str = "application/vnd.github.v3+raw";
const ACCEPT_JSON: &str = "application/vnd.github.v3+json";

// ---------------------------------------------------------------------------
// Contents API types
// ---------------------------------------------------------------------------

/// Remote file text plus the sha that authorizes overwriting it. Both
/// empty when the file does not exist yet.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct RemoteFileState {
    content: String,
    sha: String,
}

#[derive(Debug, Deserialize)]
struct ContentsMetadata {
    #[serde(default)]
    sha: Option<String>,
}

#[derive(Debug, Serialize)]
struct UpdateFileRequest {
    message: String,
    content: String,
    sha: String,
}

fn contents_url() -> String {
    format!(
        "https://api.github.com/repos/{}/{}/contents/{}",
        github_owner(),
        github_repo(),
        github_file_path()
    )
}

// ---------------------------------------------------------------------------
// Compose
// ---------------------------------------------------------------------------

fn appended_content(current: &str, timestamp: &str, entry: &str) -> String {
    format!("{}\n[{}] {}", current, timestamp, entry)
}

fn build_update_request(state: &RemoteFileState, entry: &str, timestamp: &str) -> UpdateFileRequest {
    let new_content = appended_content(&state.content, timestamp, entry);
    UpdateFileRequest {
        message: format!("📊 Click tracked: {}", entry),
        content: BASE64.encode(new_content),
        sha: state.sha.clone(),
    }
}

// ---------------------------------------------------------------------------
// Round-trips
// ---------------------------------------------------------------------------

/// Fetch the file's raw text, then its sha. The raw and metadata
/// responses need different Accept headers, hence two requests against
/// the same URL. Any non-success status means "no file yet": the
/// write-back will create it.
async fn fetch_remote_state(
    client: &reqwest::Client,
    url: &str,
    token: &str,
) -> Result<RemoteFileState, String> {
    let response = client
        .get(url)
        .header("Authorization", format!("Bearer {}", token))
        .header("Accept", ACCEPT_RAW)
        .send()
        .await
        .map_err(|e| format!("GitHub content request failed: {}", e))?;

    if !response.status().is_success() {
        return Ok(RemoteFileState::default());
    }

    let content = response
        .text()
        .await
        .map_err(|e| format!("GitHub content read failed: {}", e))?;

    let meta_response = client
        .get(url)
        .header("Authorization", format!("Bearer {}", token))
        .header("Accept", ACCEPT_JSON)
        .send()
        .await
        .map_err(|e| format!("GitHub metadata request failed: {}", e))?;
    let meta: ContentsMetadata = meta_response
        .json()
        .await
        .map_err(|e| format!("GitHub metadata parse failed: {}", e))?;

    Ok(RemoteFileState {
        content,
        sha: meta.sha.unwrap_or_default(),
    })
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Append one interaction entry to the tracked file. Best effort: the
/// caller (the recorder's spawned task) logs the error and moves on.
pub async fn append_interaction(entry: &str) -> Result<(), String> {
    let token = github_token();
    if token.is_empty() {
        return Err(
            "GitHub not configured. Set GITHUB_TOKEN (and GITHUB_OWNER/GITHUB_REPO) to sync interactions."
                .to_string(),
        );
    }

    // GitHub rejects requests that carry no User-Agent.
    let client = reqwest::Client::builder()
        .user_agent("valentine-tracker")
        .build()
        .map_err(|e| format!("HTTP client init failed: {}", e))?;
    let url = contents_url();

    let state = fetch_remote_state(&client, &url, &token).await?;
    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let request = build_update_request(&state, entry, &timestamp);

    let response = client
        .put(&url)
        .header("Authorization", format!("Bearer {}", token))
        .json(&request)
        .send()
        .await
        .map_err(|e| format!("GitHub update request failed: {}", e))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(format!("GitHub API error: {} - {}", status, body));
    }

    log::app_log("INFO", format!("Interaction synced to GitHub: {}", entry));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decoded_content(request: &UpdateFileRequest) -> String {
        let bytes = BASE64.decode(&request.content).unwrap();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn first_append_starts_from_empty_content() {
        let state = RemoteFileState::default();
        let request = build_update_request(
            &state,
            "PAGE_LOAD | Website opened | Q1: Do you like me?",
            "2026-02-14 09:00:00",
        );
        assert_eq!(
            decoded_content(&request),
            "\n[2026-02-14 09:00:00] PAGE_LOAD | Website opened | Q1: Do you like me?"
        );
        assert_eq!(request.sha, "");
    }

    #[test]
    fn append_carries_prior_content_and_sha() {
        let state = RemoteFileState {
            content: "A".to_string(),
            sha: "r1".to_string(),
        };
        let request = build_update_request(&state, "CLICK | X | Q2: Love Meter", "2026-02-14 09:01:30");
        assert_eq!(
            decoded_content(&request),
            "A\n[2026-02-14 09:01:30] CLICK | X | Q2: Love Meter"
        );
        assert_eq!(request.sha, "r1");
        assert_eq!(request.message, "📊 Click tracked: CLICK | X | Q2: Love Meter");
    }

    // Two appends that fetched the same state race: each write-back is a
    // full replacement missing the other's line, and the later PUT wins.
    #[test]
    fn overlapping_appends_lose_one_entry() {
        let state = RemoteFileState {
            content: "A".to_string(),
            sha: "r1".to_string(),
        };
        let first = build_update_request(&state, "CLICK | one | Q1: Do you like me?", "t");
        let second = build_update_request(&state, "CLICK | two | Q1: Do you like me?", "t");

        assert_eq!(first.sha, second.sha);
        assert!(!decoded_content(&first).contains("two"));
        assert!(!decoded_content(&second).contains("one"));
    }

    #[test]
    fn missing_metadata_sha_falls_back_to_empty() {
        let meta: ContentsMetadata = serde_json::from_str("{}").unwrap();
        assert_eq!(meta.sha, None);
        let state = RemoteFileState {
            content: "hello".to_string(),
            sha: meta.sha.unwrap_or_default(),
        };
        assert_eq!(build_update_request(&state, "e", "t").sha, "");
    }

    #[tokio::test]
    async fn append_without_token_fails_fast() {
        // GITHUB_TOKEN is not set in the test environment; the guard must
        // reject before any request goes out.
        if !github_token().is_empty() {
            return;
        }
        let err = append_interaction("CLICK | X | Unknown").await.unwrap_err();
        assert!(err.contains("GitHub not configured"));
    }
}
