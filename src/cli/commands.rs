use clap::{Parser, Subcommand, Args};

#[derive(Parser)]
#[command(
    name = "pdfquiz",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_TIMESTAMP"), ")"),
    about = "Summarize a PDF, quiz yourself on it, and catch answers copied from the summary"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract a PDF and print its summary
    Summarize(SummarizeArgs),
    /// Summarize a PDF, then answer and grade review questions
    Quiz(QuizArgs),
    /// Check an answer against a summary locally (no network)
    Check(CheckArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

/// Remote completion service options shared by the networked commands.
#[derive(Args, Clone, Default)]
pub struct LlmArgs {
    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// LLM provider: openai, local
    #[arg(long)]
    pub provider: Option<String>,

    /// LLM model identifier
    #[arg(long)]
    pub model: Option<String>,

    /// LLM API key (or use OPENAI_API_KEY)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Endpoint for OpenAI-compatible servers
    #[arg(long)]
    pub base_url: Option<String>,
}

#[derive(Args, Clone)]
pub struct SummarizeArgs {
    /// PDF file to summarize
    pub pdf: String,

    /// Write the Markdown summary to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Summarize each Chapter/Section heading separately
    #[arg(long)]
    pub sections: bool,

    /// Title for the summary document
    #[arg(long, default_value = "Generated Summary")]
    pub title: String,

    #[command(flatten)]
    pub llm: LlmArgs,
}

#[derive(Args, Clone)]
pub struct QuizArgs {
    /// PDF file to build the quiz from
    pub pdf: String,

    /// Number of questions
    #[arg(short = 'n', long)]
    pub num_questions: Option<u32>,

    /// Points per question
    #[arg(short, long)]
    pub points: Option<u32>,

    /// Question type: short answer, multiple choice, true/false
    #[arg(long)]
    pub question_type: Option<String>,

    /// Write a Markdown report of the graded quiz
    #[arg(long)]
    pub report: Option<String>,

    #[command(flatten)]
    pub llm: LlmArgs,
}

#[derive(Args, Clone)]
pub struct CheckArgs {
    /// Candidate answer text
    #[arg(long, conflicts_with = "answer_file", required_unless_present = "answer_file")]
    pub answer: Option<String>,

    /// Read the answer from a file
    #[arg(long)]
    pub answer_file: Option<String>,

    /// Reference summary text
    #[arg(long, conflicts_with = "summary_file", required_unless_present = "summary_file")]
    pub summary: Option<String>,

    /// Read the summary from a file
    #[arg(long)]
    pub summary_file: Option<String>,

    /// Fraction in (0, 1] at which an answer counts as copied
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Per-sentence similarity in (0, 1] required for highlighting
    #[arg(long)]
    pub highlight_threshold: Option<f64>,

    /// Highlight marker: html, markdown, ansi
    #[arg(long)]
    pub marker: Option<String>,

    /// YAML configuration file supplying detector defaults
    #[arg(short, long)]
    pub config: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Config file to validate
    pub config: String,
}
