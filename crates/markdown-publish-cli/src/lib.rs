//! CLI wiring for markdown-publish.
//!
//! `compile` is fully offline and prints the JSON request batch; the other
//! subcommands talk to the external services through the client crate.

mod pipeline;

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use markdown_publish_client::{DocsClient, TextClient};
use markdown_publish_config::{
    resolve_api_key, resolve_service_token, Config, LoadOptions,
};
use markdown_publish_core::compile;

pub use pipeline::{run_pipeline, DocumentPublisher, PipelineOutcome, TextGenerator};

#[derive(Parser, Debug)]
#[command(
    name = "markdown-publish",
    version,
    about = "Compile markdown into positional edit batches and publish them"
)]
struct Cli {
    /// Path to a configuration file (defaults to ./.markdown-publish.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a markdown file and print the request batch as JSON
    Compile {
        /// Markdown file to compile
        file: PathBuf,

        /// Offset the document's content currently ends at (1 for empty)
        #[arg(long, value_name = "N", default_value_t = 1)]
        start_offset: usize,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Create a remote document from a markdown file
    Create {
        /// Title for the new document
        #[arg(long, value_name = "TITLE")]
        title: String,

        /// Markdown file to publish
        file: PathBuf,
    },

    /// Append a markdown file to an existing document
    Append {
        /// Identifier of the destination document
        #[arg(long = "document-id", value_name = "ID")]
        document_id: String,

        /// Markdown file to append
        file: PathBuf,
    },

    /// Generate a sectioned profile from prompt templates and publish it
    Generate {
        /// Subject name; selects <data>/<subject>/question_answers.txt
        #[arg(long, value_name = "NAME")]
        subject: String,

        /// Generate and persist locally without creating a remote document
        #[arg(long)]
        no_publish: bool,
    },
}

pub fn run() -> Result<i32> {
    let cli = Cli::parse();

    let mut load = LoadOptions::default();
    if let Some(path) = &cli.config {
        load = load.with_config_path(path);
    }
    let config = Config::load(load)?;

    match cli.command {
        Command::Compile {
            file,
            start_offset,
            pretty,
        } => run_compile(&file, start_offset, pretty),
        Command::Create { title, file } => {
            let docs = docs_client(&config)?;
            let markdown = read_markdown(&file)?;
            let handle = docs.publish(&title, &markdown)?;
            eprintln!("created document {}", handle.document_id);
            println!("{}", handle.document_url);
            Ok(0)
        }
        Command::Append { document_id, file } => {
            let docs = docs_client(&config)?;
            let markdown = read_markdown(&file)?;
            docs.append_markdown(&document_id, &markdown)?;
            eprintln!("appended to document {document_id}");
            Ok(0)
        }
        Command::Generate {
            subject,
            no_publish,
        } => {
            let text = TextClient::new(config.generation.clone(), resolve_api_key()?)?;
            let docs = if no_publish {
                None
            } else {
                Some(docs_client(&config)?)
            };
            let publisher = docs
                .as_ref()
                .map(|client| client as &dyn DocumentPublisher);
            let outcome = run_pipeline(&config, &text, publisher, &subject)?;
            eprintln!("profile written to {}", outcome.profile_path.display());
            if let Some(handle) = outcome.document {
                println!("{}", handle.document_url);
            }
            Ok(0)
        }
    }
}

fn run_compile(file: &PathBuf, start_offset: usize, pretty: bool) -> Result<i32> {
    if start_offset < 1 {
        bail!("--start-offset must be at least 1");
    }
    let markdown = read_markdown(file)?;
    let requests = compile(&markdown, start_offset).to_requests();
    let rendered = if pretty {
        serde_json::to_string_pretty(&requests)?
    } else {
        serde_json::to_string(&requests)?
    };
    println!("{rendered}");
    Ok(0)
}

fn docs_client(config: &Config) -> Result<DocsClient> {
    let credentials = resolve_service_token(&config.base_dir)?;
    Ok(DocsClient::new(config.service.clone(), credentials)?)
}

fn read_markdown(file: &PathBuf) -> Result<String> {
    fs::read_to_string(file).with_context(|| format!("failed to read {}", file.display()))
}
