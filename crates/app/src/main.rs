use chrono::Utc;
use clap::Parser;
use report_analyzer_core::{
    AnalyzerOptions, BatchRunner, HttpFetcher, LopdfExtractor, OpenAiChatClient, PromptStore,
    ReportPipeline, DEFAULT_API_BASE,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "report-analyzer", version)]
struct Cli {
    /// Prompt template file with [CHUNK_ANALYSIS_PROMPT] and
    /// [SUMMARY_COMBINATION_PROMPT] sections.
    #[arg(long, default_value = "prompts.txt")]
    prompts: PathBuf,

    /// File with one report URL per line; # starts a comment.
    #[arg(long, default_value = "urls.txt")]
    urls: PathBuf,

    /// Directory the per-report analysis files are written to.
    #[arg(long, default_value = "individual_analysis")]
    output_dir: PathBuf,

    /// Chat-completion model to use.
    #[arg(long, default_value = "gpt-4o-mini")]
    model: String,

    /// Maximum words per chunk sent to the model.
    #[arg(long, default_value = "2500")]
    chunk_size: usize,

    /// Base URL of the chat-completion API.
    #[arg(long, default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// API key for the chat-completion service.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app_version = env!("CARGO_PKG_VERSION");

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();

    let cli = Cli::parse();

    let options = AnalyzerOptions {
        model: cli.model.clone(),
        words_per_chunk: cli.chunk_size,
        ..AnalyzerOptions::default()
    };
    options
        .validate()
        .map_err(|error| anyhow::anyhow!(error.to_string()))?;

    let prompts = PromptStore::load(&cli.prompts)
        .map_err(|error| anyhow::anyhow!(error.to_string()))?;

    let fetcher = HttpFetcher::new(options.user_agent, options.download_timeout_secs)
        .map_err(|error| anyhow::anyhow!(error.to_string()))?;
    let llm = OpenAiChatClient::new(
        cli.api_base.as_str(),
        cli.api_key.as_str(),
        cli.model.as_str(),
    );

    let runner = BatchRunner::new(ReportPipeline::new(
        fetcher,
        LopdfExtractor,
        llm,
        prompts,
        options,
    ));

    info!(
        version = app_version,
        started_at = %Utc::now().to_rfc3339(),
        "report-analyzer boot"
    );

    let report = runner
        .run_all(&cli.urls, &cli.output_dir)
        .await
        .map_err(|error| anyhow::anyhow!(error.to_string()))?;

    for result in &report.results {
        let status = if result.success { "ok" } else { "failed" };
        match &result.output_path {
            Some(path) => println!("{status} {} -> {}", result.url, path.display()),
            None => println!("{status} {}", result.url),
        }
    }

    println!(
        "{} of {} reports analyzed, results in {}",
        report.succeeded(),
        report.results.len(),
        cli.output_dir.display()
    );

    if report.succeeded() == 0 {
        std::process::exit(1);
    }

    Ok(())
}
