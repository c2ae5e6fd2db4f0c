//! Sectioned profile generation.
//!
//! Reads a subject's question answers, produces a master extraction from the
//! first prompt template, then walks the numbered section prompts,
//! substituting placeholders and appending each generated section to the
//! profile file before publishing the whole profile as one document.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use log::info;
use markdown_publish_client::{ClientError, DocsClient, DocumentHandle, TextClient};
use markdown_publish_config::Config;

const QUESTION_ANSWERS_FILE: &str = "question_answers.txt";
const MASTER_EXTRACTION_FILE: &str = "master_extraction.txt";
const PROFILE_FILE: &str = "mirror_profile.txt";

/// Inputs shorter than this are treated as empty rather than generated from.
const MIN_INPUT_CHARS: usize = 20;

/// Text generation seam, so the pipeline can be driven without a network.
pub trait TextGenerator {
    fn generate(&self, prompt: &str) -> Result<String, ClientError>;
}

impl TextGenerator for TextClient {
    fn generate(&self, prompt: &str) -> Result<String, ClientError> {
        TextClient::generate(self, prompt)
    }
}

/// Document creation seam for the final publish step.
pub trait DocumentPublisher {
    fn publish(&self, title: &str, markdown: &str) -> Result<DocumentHandle, ClientError>;
}

impl DocumentPublisher for DocsClient {
    fn publish(&self, title: &str, markdown: &str) -> Result<DocumentHandle, ClientError> {
        DocsClient::publish(self, title, markdown)
    }
}

#[derive(Debug)]
pub struct PipelineOutcome {
    pub profile_path: PathBuf,
    pub document: Option<DocumentHandle>,
}

pub fn run_pipeline(
    config: &Config,
    generator: &dyn TextGenerator,
    publisher: Option<&dyn DocumentPublisher>,
    subject: &str,
) -> Result<PipelineOutcome> {
    let prompt_dir = &config.pipeline.prompt_dir;
    let subject_dir = config.pipeline.data_dir.join(subject);
    fs::create_dir_all(&subject_dir)
        .with_context(|| format!("failed to create {}", subject_dir.display()))?;

    let question_answers = read_trimmed(&subject_dir.join(QUESTION_ANSWERS_FILE))?;
    if question_answers.chars().count() < MIN_INPUT_CHARS {
        bail!("question answers look empty or too short");
    }

    info!("generating master extraction for {subject}");
    let prompt1 = read_trimmed(&prompt_dir.join("p1.txt"))?;
    let master_extraction = generator.generate(&fill(
        &prompt1,
        &[("<<question_answers>>", &question_answers)],
    ))?;
    fs::write(subject_dir.join(MASTER_EXTRACTION_FILE), &master_extraction)
        .context("failed to write master extraction")?;

    let common_includes = read_trimmed(&prompt_dir.join("common_includes.txt"))?;
    let common_instructions = read_trimmed(&prompt_dir.join("common_instructions.txt"))?;

    let profile_path = subject_dir.join(PROFILE_FILE);
    let mut profile = String::new();

    for prompt_number in 2..=(config.pipeline.section_count + 1) {
        let section_number = prompt_number - 1;
        info!("generating section {section_number} for {subject}");

        let template = read_trimmed(&prompt_dir.join(format!("p{prompt_number}.txt")))?;
        let prompt = fill(
            &template,
            &[
                ("<<master_extraction>>", &master_extraction),
                ("<<question_answers>>", &question_answers),
                ("<<common_includes>>", &common_includes),
                ("<<common_instructions>>", &common_instructions),
                // Last: the common instructions themselves contain it.
                ("<<section_number>>", &section_number.to_string()),
            ],
        );

        let section = generator.generate(&prompt)?;
        profile.push_str(&section);
        profile.push_str("\n\n");
        // Persist progress after every section so a failed run keeps what it
        // already produced.
        fs::write(&profile_path, &profile)
            .with_context(|| format!("failed to write {}", profile_path.display()))?;
    }

    let document = match publisher {
        Some(publisher) => {
            let title = format!("{subject}_mirror_profile");
            info!("publishing {title}");
            Some(publisher.publish(&title, &profile)?)
        }
        None => None,
    };

    Ok(PipelineOutcome {
        profile_path,
        document,
    })
}

fn read_trimmed(path: &Path) -> Result<String> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(contents.trim().to_string())
}

/// Replace each placeholder in order.
fn fill(template: &str, substitutions: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (placeholder, value) in substitutions {
        result = result.replace(placeholder, value);
    }
    result
}
