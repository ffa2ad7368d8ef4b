use std::path::PathBuf;

use pdfquiz::errors::QuizError;
use pdfquiz::extract;
use pdfquiz::quiz;
use pdfquiz::report::render_summary_markdown;
use tracing::info;

use crate::cli::commands::SummarizeArgs;
use crate::cli::context::Session;
use crate::cli::progress::with_spinner;

pub async fn handle_summarize(args: SummarizeArgs) -> Result<(), QuizError> {
    let session = Session::open(&args.llm).await?;
    let path = PathBuf::from(&args.pdf);

    let markdown = if args.sections {
        let raw = session.read_pdf_raw(&path)?;
        let sections: Vec<String> = extract::segment_by_headings(&raw)
            .iter()
            .map(|s| extract::clean_text(s))
            .collect();
        info!(sections = sections.len(), "Summarizing by section");

        let summaries = with_spinner(
            "Generating section summaries",
            quiz::summarize_sections(session.provider.as_ref(), &session.retry, &sections),
        )
        .await?;

        let mut out = format!("# {}\n\n", args.title);
        for (idx, summary) in summaries.iter().enumerate() {
            let doc = render_summary_markdown(&format!("Section {}", idx + 1), summary);
            out.push('#');
            out.push_str(&doc);
        }
        out
    } else {
        let text = session.read_pdf(&path)?;
        let summary = with_spinner(
            "Generating summary",
            quiz::summarize_text(session.provider.as_ref(), &session.retry, &text),
        )
        .await?;
        render_summary_markdown(&args.title, &summary)
    };

    match &args.output {
        Some(output) => {
            tokio::fs::write(output, &markdown).await?;
            info!(output = %output, "Summary written");
        }
        None => println!("{}", markdown),
    }
    Ok(())
}
