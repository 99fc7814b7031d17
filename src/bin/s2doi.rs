//! CLI binary for the Semantic Scholar DOI resolver.
//!
//! Usage: s2doi citations.txt

#[cfg(feature = "cli")]
mod cli {
    use clap::Parser;
    use s2doi::pipeline::{write_dois_file, OUTPUT_FILE};
    use s2doi::{Pipeline, S2Client};

    #[derive(Parser)]
    #[command(name = "s2doi", about = "Resolve Semantic Scholar citation URLs to DOIs", version)]
    struct Cli {
        /// Path to the citations file to scan
        citations_file: String,

        /// API key (overrides S2_API_KEY / SEMANTIC_SCHOLAR_API_KEY env var)
        #[arg(long)]
        api_key: Option<String>,
    }

    fn make_client(api_key: Option<String>) -> S2Client {
        match api_key {
            Some(key) => S2Client::new(Some(key)),
            None => S2Client::from_env(),
        }
    }

    pub async fn run() {
        let cli = Cli::parse();
        let client = make_client(cli.api_key);

        if !client.has_api_key() {
            println!("Warning: no API key found in the environment.");
            println!("The run will proceed without one, but may face severe rate limiting.");
            println!("Set S2_API_KEY to raise the allowance; get a free key at:");
            println!("https://www.semanticscholar.org/product/api");
            println!("\nContinuing without API key...\n");
        }

        let report = Pipeline::new(client)
            .process_file(&cli.citations_file)
            .await;
        let dois = report.dois();

        println!("\nFound {} DOIs:", dois.len());
        if dois.is_empty() {
            println!("No DOIs were found.");
            return;
        }

        println!("{}", dois.join(", "));

        match write_dois_file(&dois) {
            Ok(()) => println!("\nDOIs also saved to {OUTPUT_FILE}"),
            Err(e) => eprintln!("Error writing {OUTPUT_FILE}: {e}"),
        }
    }
}

#[cfg(feature = "cli")]
#[tokio::main]
async fn main() {
    cli::run().await;
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("This binary requires the 'cli' feature. Build with: cargo build --features cli");
    std::process::exit(1);
}
