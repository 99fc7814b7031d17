//! # s2doi
//!
//! Resolve Semantic Scholar citation URLs to DOIs.
//!
//! Given a text file containing `https://api.semanticscholar.org/CorpusID:…`
//! citation URLs, the pipeline looks each paper up on the Semantic Scholar
//! Graph API and collects the DOIs it finds, in file order.
//!
//! ## Quick Start
//!
//! ```no_run
//! # async fn example() {
//! use s2doi::{Pipeline, S2Client};
//!
//! // Reads S2_API_KEY (or SEMANTIC_SCHOLAR_API_KEY); keyless is allowed.
//! let client = S2Client::from_env();
//! let report = Pipeline::new(client).process_file("citations.txt").await;
//!
//! for doi in report.dois() {
//!     println!("{doi}");
//! }
//! # }
//! ```
//!
//! Lookups run strictly sequentially with a pacing pause between requests
//! (1.5 s with an API key, 3 s without); see [`pacing`] for the available
//! policies.

pub mod client;
pub mod error;
pub mod extract;
pub mod pacing;
pub mod pipeline;
pub mod resolve;

// Re-export key types at the crate root.
pub use client::S2Client;
pub use error::S2Error;
pub use pipeline::{ItemOutcome, ItemReport, Pipeline, RunReport};
pub use resolve::Resolution;
