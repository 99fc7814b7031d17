//! Batch resolution of citation files.
//!
//! Scans a text file for Semantic Scholar citation URLs and resolves each
//! one sequentially, pacing between lookups. Progress is reported on
//! stdout as the run proceeds; the structured outcome of every item is
//! also collected into a [`RunReport`] for callers and tests.

use crate::client::S2Client;
use crate::extract::{extract_paper_id, find_citation_urls};
use crate::pacing::{FixedInterval, Pacer};
use crate::resolve::Resolution;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

/// Output file written when a run resolves at least one DOI.
pub const OUTPUT_FILE: &str = "dois_output.txt";

/// Outcome of one discovered URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    /// No identifier pattern matched the URL.
    NoIdentifier,
    /// An identifier was extracted and a lookup attempted.
    Attempted {
        corpus_id: String,
        resolution: Resolution,
    },
}

/// One discovered URL and what became of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemReport {
    pub url: String,
    pub outcome: ItemOutcome,
}

/// Ordered outcomes of a whole run, one entry per discovered URL.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub items: Vec<ItemReport>,
}

impl RunReport {
    /// Resolved DOIs in discovery order. Failed items leave no entry.
    pub fn dois(&self) -> Vec<String> {
        self.items
            .iter()
            .filter_map(|item| match &item.outcome {
                ItemOutcome::Attempted {
                    resolution: Resolution::Doi(doi),
                    ..
                } => Some(doi.clone()),
                _ => None,
            })
            .collect()
    }
}

/// Sequential citation-file processor.
pub struct Pipeline {
    client: S2Client,
    pacer: Arc<dyn Pacer>,
}

impl Pipeline {
    /// Create a pipeline with the default fixed-interval pacing for the
    /// client's credential tier.
    pub fn new(client: S2Client) -> Self {
        let pacer = FixedInterval::for_credential(client.has_api_key());
        Self {
            client,
            pacer: Arc::new(pacer),
        }
    }

    /// Swap in a different pacing policy.
    pub fn with_pacer(mut self, pacer: impl Pacer + 'static) -> Self {
        self.pacer = Arc::new(pacer);
        self
    }

    /// Process a citations file: discover URLs, resolve each in order,
    /// pausing between lookups.
    ///
    /// A missing or unreadable file is reported on stderr and yields an
    /// empty report; per-item failures are reported and skipped. Nothing
    /// here aborts the run.
    pub async fn process_file(&self, path: impl AsRef<Path>) -> RunReport {
        let path = path.as_ref();
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                eprintln!("Error: file '{}' not found", path.display());
                return RunReport::default();
            }
            Err(e) => {
                eprintln!("Error reading '{}': {e}", path.display());
                return RunReport::default();
            }
        };

        let urls = find_citation_urls(&content);
        println!("Found {} Semantic Scholar URLs to process", urls.len());

        let mut items = Vec::with_capacity(urls.len());
        for (i, url) in urls.iter().enumerate() {
            println!("Processing URL {}/{}: {url}", i + 1, urls.len());

            let outcome = match extract_paper_id(url) {
                Some(corpus_id) => {
                    let resolution = self.client.resolve_corpus_id(corpus_id).await;
                    match &resolution {
                        Resolution::Doi(doi) => println!("  -> DOI: {doi}"),
                        other => println!("  corpus ID {corpus_id}: {other}"),
                    }
                    ItemOutcome::Attempted {
                        corpus_id: corpus_id.to_string(),
                        resolution,
                    }
                }
                None => {
                    println!("  could not extract paper ID from URL: {url}");
                    ItemOutcome::NoIdentifier
                }
            };

            items.push(ItemReport {
                url: url.to_string(),
                outcome,
            });

            // Pause between lookups, not after the last one.
            if i + 1 < urls.len() {
                self.pacer.pause().await;
            }
        }

        RunReport { items }
    }
}

/// Write the resolved DOIs to [`OUTPUT_FILE`] in the working directory,
/// comma-and-space separated, truncating any previous contents.
pub fn write_dois_file(dois: &[String]) -> std::io::Result<()> {
    std::fs::write(OUTPUT_FILE, dois.join(", "))
}
