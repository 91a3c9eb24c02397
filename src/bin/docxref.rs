//! docxref CLI tool
//!
//! Command-line interface for resolving cross-references in a documentation bundle.
//!
//! ## Commands
//!
//! - `resolve <input>`: Resolve every link in a YAML/JSON bundle and write the result

use clap::{Parser, Subcommand};
use docxref::{
    bundle::{self, BundleFormat},
    compiler::XrefCompiler,
    config::ResolverConfig,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "docxref")]
#[command(author, version, about = "Resolve cross-references in API documentation bundles", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve all links of a bundle and write the rewritten bundle
    Resolve {
        /// Bundle to read (.yml, .yaml or .json)
        input: PathBuf,

        /// Where to write the result; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file path (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve {
            input,
            output,
            config,
            verbose,
        } => {
            let config = match config {
                Some(path) => ResolverConfig::load(path)?,
                None => ResolverConfig::default(),
            };
            let documents = bundle::load(&input)?;
            let result = XrefCompiler::new(config)?.compile(documents)?;

            let stats = &result.stats;
            eprintln!("\n=== Resolve Results ===");
            eprintln!("Documents: {}", stats.documents);
            eprintln!("Markdown links converted: {}", stats.markdown_links_normalized);
            eprintln!("Links resolved: {}", stats.links_resolved);
            eprintln!("Links unresolved: {}", stats.links_unresolved);
            eprintln!("Malformed links: {}", stats.links_malformed);
            eprintln!("References added: {}", stats.references_added);
            if verbose {
                for diagnostic in result.diagnostics.iter() {
                    eprintln!("[{}] {:?}", diagnostic.document(), diagnostic);
                }
            }

            match output {
                Some(path) => bundle::save(&path, &result.documents)?,
                None => {
                    let format = BundleFormat::from_path(&input)?;
                    println!("{}", format.render(&result.documents)?);
                }
            }
            Ok(())
        }
    }
}
