use console::style;
use pdfquiz::errors::QuizError;
use pdfquiz::originality::{self, DetectorConfig, Marker, Threshold};
use serde_json::json;

use crate::cli::commands::CheckArgs;
use crate::cli::context::{load_config, read_text_arg};

pub async fn handle_check(args: CheckArgs) -> Result<(), QuizError> {
    let file_config = load_config(args.config.as_deref()).await?;
    let detector = build_detector(&args, file_config.detector())?;

    let answer = read_text_arg(args.answer.as_deref(), args.answer_file.as_deref(), "answer")?;
    let summary = read_text_arg(args.summary.as_deref(), args.summary_file.as_deref(), "summary")?;

    let signal = detector.detect(&answer, &summary);
    let spans = originality::copied_spans(&answer, &summary, detector.highlight_threshold);
    let highlighted = detector.highlight(&answer, &summary);

    if args.json {
        let output = json!({
            "copied": signal.is_some(),
            "signal": signal,
            "copy_threshold": detector.copy_threshold,
            "highlight_threshold": detector.highlight_threshold,
            "spans": spans.iter().map(|r| [r.start, r.end]).collect::<Vec<_>>(),
            "highlighted": highlighted,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    match signal {
        Some(signal) => {
            println!(
                "{} {} ({})",
                style("COPIED").red().bold(),
                signal.description(),
                signal
            );
        }
        None => println!("{} no copying detected", style("ORIGINAL").green().bold()),
    }
    if !spans.is_empty() {
        println!("\n{}", highlighted);
    }
    Ok(())
}

fn build_detector(args: &CheckArgs, mut detector: DetectorConfig) -> Result<DetectorConfig, QuizError> {
    if let Some(t) = args.threshold {
        detector.copy_threshold = Threshold::new(t)?;
    }
    if let Some(t) = args.highlight_threshold {
        detector.highlight_threshold = Threshold::new(t)?;
    }
    // terminal output gets escape codes unless a marker was asked for
    detector.marker = match (&args.marker, args.json) {
        (Some(m), _) => m.parse()?,
        (None, true) => std::mem::take(&mut detector.marker),
        (None, false) => Marker::Ansi,
    };
    Ok(detector)
}
