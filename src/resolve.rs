//! DOI resolution via the Semantic Scholar `paper` endpoint.

use crate::client::S2Client;
use crate::error::S2Error;
use serde::Deserialize;
use std::fmt;

/// Fields requested from the paper endpoint. Only the external IDs are
/// needed, which keeps the payload minimal.
pub const PAPER_FIELDS: &str = "externalIds";

/// Outcome of resolving one corpus ID.
///
/// Every failure mode is its own variant so callers can report (and tests
/// can assert on) the specific kind rather than a bare absence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The paper has a DOI.
    Doi(String),
    /// The paper record exists but carries no DOI.
    MissingDoi,
    /// The service does not know this corpus ID (HTTP 404).
    NotFound,
    /// The service rejected the request as over-quota (HTTP 429).
    RateLimited,
    /// Any other non-success HTTP status.
    ApiError { status: u16 },
    /// Network failure, timeout, or a malformed response body.
    Transport(String),
}

impl Resolution {
    /// The resolved DOI, if this resolution produced one.
    pub fn doi(&self) -> Option<&str> {
        match self {
            Resolution::Doi(doi) => Some(doi),
            _ => None,
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::Doi(doi) => write!(f, "DOI: {doi}"),
            Resolution::MissingDoi => write!(f, "no DOI on record"),
            Resolution::NotFound => write!(f, "paper not found"),
            Resolution::RateLimited => {
                write!(f, "rate limit reached; consider an API key or a longer delay")
            }
            Resolution::ApiError { status } => write!(f, "HTTP error {status}"),
            Resolution::Transport(msg) => write!(f, "request failed: {msg}"),
        }
    }
}

/// Paper record as returned with `fields=externalIds`.
#[derive(Debug, Deserialize)]
struct PaperRecord {
    #[serde(rename = "externalIds", default)]
    external_ids: Option<ExternalIds>,
}

#[derive(Debug, Default, Deserialize)]
struct ExternalIds {
    #[serde(rename = "DOI")]
    doi: Option<String>,
}

/// Parse a paper-endpoint response body into a [`Resolution`].
fn parse_paper_response(body: &str) -> crate::error::Result<Resolution> {
    let record: PaperRecord = serde_json::from_str(body)
        .map_err(|e| S2Error::Parse(format!("invalid paper response: {e}")))?;

    Ok(match record.external_ids.and_then(|ids| ids.doi) {
        Some(doi) if !doi.is_empty() => Resolution::Doi(doi),
        _ => Resolution::MissingDoi,
    })
}

impl S2Client {
    /// Resolve a numeric corpus ID to its DOI.
    ///
    /// Infallible at this boundary: every transport or API failure is
    /// folded into a [`Resolution`] variant, so a bad item can never abort
    /// a batch run.
    pub async fn resolve_corpus_id(&self, corpus_id: &str) -> Resolution {
        let path = format!("/paper/CorpusId:{corpus_id}");
        match self.get(&path, &[("fields", PAPER_FIELDS)]).await {
            Ok(body) => parse_paper_response(&body)
                .unwrap_or_else(|e| Resolution::Transport(e.to_string())),
            Err(S2Error::RateLimited { .. }) => Resolution::RateLimited,
            Err(S2Error::NotFound(_)) => Resolution::NotFound,
            Err(S2Error::Api { status, .. }) => Resolution::ApiError { status },
            Err(e) => Resolution::Transport(e.to_string()),
        }
    }
}
