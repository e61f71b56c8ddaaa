use std::collections::HashMap;
use std::fmt;

use thiserror::Error;
use url::Url;

/// A URL accepted for download, with the intake filename it will be stored under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTask {
    pub url: String,
    pub filename: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("url path has no file name")]
    NoFilename,
    #[error("file name {filename} already claimed by {claimed_by}")]
    DuplicateFilename {
        filename: String,
        claimed_by: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedUrl {
    pub url: String,
    pub reason: RejectReason,
}

impl fmt::Display for RejectedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.url, self.reason)
    }
}

/// Tasks to enqueue plus the URLs refused before any work starts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadPlan {
    pub tasks: Vec<DownloadTask>,
    pub rejected: Vec<RejectedUrl>,
}

/// Derives the intake filename from the last non-empty path segment of `url`.
///
/// Empty segments are skipped, so `http://x/photos/` yields `photos` rather
/// than being rejected for its trailing slash. The segment is kept
/// percent-encoded; only characters unsafe in a file name are replaced.
pub fn filename_from_url(url: &str) -> Result<String, RejectReason> {
    let url = url.trim();
    if url.is_empty() {
        return Err(RejectReason::InvalidUrl("empty url".to_string()));
    }
    let parsed = Url::parse(url).map_err(|err| RejectReason::InvalidUrl(err.to_string()))?;
    let segment = parsed
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .ok_or(RejectReason::NoFilename)?;
    let sanitized = sanitize(segment);
    if sanitized.is_empty() {
        return Err(RejectReason::NoFilename);
    }
    Ok(sanitized)
}

/// Builds the download plan, keeping the first URL for each derived filename.
///
/// Intake writers must target disjoint files, so later URLs resolving to a
/// filename already taken are rejected.
pub fn plan_downloads<I, S>(urls: I) -> DownloadPlan
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut plan = DownloadPlan::default();
    let mut claimed: HashMap<String, String> = HashMap::new();

    for url in urls {
        let url = url.as_ref().trim();
        let filename = match filename_from_url(url) {
            Ok(name) => name,
            Err(reason) => {
                plan.rejected.push(RejectedUrl {
                    url: url.to_string(),
                    reason,
                });
                continue;
            }
        };
        let key = filename.to_ascii_lowercase();
        if let Some(claimed_by) = claimed.get(&key) {
            plan.rejected.push(RejectedUrl {
                url: url.to_string(),
                reason: RejectReason::DuplicateFilename {
                    filename,
                    claimed_by: claimed_by.clone(),
                },
            });
            continue;
        }
        claimed.insert(key, url.to_string());
        plan.tasks.push(DownloadTask {
            url: url.to_string(),
            filename,
        });
    }

    plan
}

fn sanitize(input: &str) -> String {
    let cleaned: String = input
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect();
    cleaned.trim_matches(&[' ', '.'][..]).to_string()
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}
