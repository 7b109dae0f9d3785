// src/main.rs
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use job_automator::config::{load_openai_api_key, AppConfig};
use job_automator::resume::{
    extract_resume_text, generate_resume_yaml, load_yaml_document, validate_resume_yaml,
    OpenAiClient,
};
use job_automator::utils::{get_file_extension, write_file_content};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "resume-yaml")]
#[command(about = "Generate a resume YAML file from a PDF or text resume using the OpenAI API")]
struct Cli {
    /// Path to the input resume file (PDF or TXT)
    #[arg(long)]
    input: PathBuf,

    /// Path to the output YAML file
    #[arg(long, default_value = "data_folder/plain_text_resume.yaml")]
    output: PathBuf,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    // Failures are reported on stdout; the exit code stays best-effort.
    if let Err(e) = run(cli).await {
        println!("An error occurred: {e}");
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::new();
    let api_key = load_openai_api_key(&config)?;
    let schema = load_yaml_document(&config.resume_schema_path())?;

    let input_name = cli
        .input
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    let resume_text = extract_resume_text(&cli.input)?;
    if get_file_extension(input_name).as_deref() == Some("pdf") {
        println!("PDF resume converted to text successfully.");
    }

    let client = OpenAiClient::new(api_key)?;
    let generated_yaml = generate_resume_yaml(&client, &resume_text, &schema).await?;
    write_file_content(&cli.output, &generated_yaml)?;

    println!("Resume YAML generated and saved to {}", cli.output.display());

    let report = validate_resume_yaml(&generated_yaml, &schema);
    print!("{}", report.render(&cli.output));

    Ok(())
}
