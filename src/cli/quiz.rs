use std::path::PathBuf;

use console::style;
use pdfquiz::errors::QuizError;
use pdfquiz::originality::Marker;
use pdfquiz::quiz::{self, Grade, Grader, QuestionType, QuizSettings, QuizTally};
use pdfquiz::report::render_quiz_markdown;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::info;

use crate::cli::commands::QuizArgs;
use crate::cli::context::Session;
use crate::cli::progress::with_spinner;

pub async fn handle_quiz(args: QuizArgs) -> Result<(), QuizError> {
    let session = Session::open(&args.llm).await?;
    let settings = build_settings(&args, session.config.quiz())?;
    let provider = session.provider.as_ref();

    let text = session.read_pdf(&PathBuf::from(&args.pdf))?;
    let summary = with_spinner(
        "Generating summary",
        quiz::summarize_text(provider, &session.retry, &text),
    )
    .await?;
    println!("\n{}\n\n{}\n", style("Summary").cyan().bold(), summary);

    let raw_questions = with_spinner(
        "Generating questions",
        quiz::generate_questions(provider, &session.retry, &summary, &settings),
    )
    .await?;
    let questions = quiz::parse_questions(&raw_questions);
    if questions.is_empty() {
        return Err(QuizError::LLMApi("The provider returned no questions".into()));
    }
    info!(count = questions.len(), "Questions ready");

    let Some(answers) = collect_answers(&questions).await? else {
        println!("Quiz aborted.");
        return Ok(());
    };

    let mut detector = session.config.detector();
    detector.marker = Marker::Ansi;
    let grader = Grader {
        provider,
        retry: session.retry.clone(),
        detector,
        summary: &summary,
    };

    let mut grades: Vec<Grade> = Vec::with_capacity(questions.len());
    for (idx, (question, answer)) in questions.iter().zip(&answers).enumerate() {
        let grade = with_spinner(
            &format!("Grading Q{}", idx + 1),
            grader.grade(question, answer, settings.points_per_question, &settings.question_type),
        )
        .await?;
        print_grade(idx, &grade);
        grades.push(grade);
    }

    let tally = QuizTally::from_grades(&grades);
    println!("\n{}", style("Quiz Summary").cyan().bold());
    println!("Total Score: {}/{}", tally.total_score, tally.total_possible);
    println!("Percentage: {:.1}%", tally.percentage);
    println!("Grade: {}", style(tally.letter).bold());

    if let Some(report_path) = &args.report {
        // terminal escapes do not belong in a Markdown file
        let mut report_detector = session.config.detector();
        report_detector.marker = Marker::Markdown;
        for grade in grades.iter_mut() {
            if let Some(copied) = grade.copied.as_mut() {
                copied.highlighted = report_detector.highlight(&grade.answer, &summary);
            }
        }
        tokio::fs::write(report_path, render_quiz_markdown(&grades, &tally)).await?;
        info!(report = %report_path, "Quiz report written");
    }
    Ok(())
}

fn build_settings(args: &QuizArgs, mut settings: QuizSettings) -> Result<QuizSettings, QuizError> {
    if let Some(n) = args.num_questions {
        settings.num_questions = n;
    }
    if let Some(p) = args.points {
        settings.points_per_question = p;
    }
    if let Some(t) = &args.question_type {
        settings.question_type = QuestionType::from(t.as_str());
    }
    settings.validate()?;
    Ok(settings)
}

/// Read one non-empty answer per question. `None` when the user quits.
async fn collect_answers(questions: &[String]) -> Result<Option<Vec<String>>, QuizError> {
    let questions = questions.to_vec();
    // rustyline is blocking
    tokio::task::spawn_blocking(move || {
        let mut editor = DefaultEditor::new()
            .map_err(|e| QuizError::Internal(format!("Failed to initialize line editor: {}", e)))?;
        let mut answers = Vec::with_capacity(questions.len());

        for (idx, question) in questions.iter().enumerate() {
            println!("\n{} {}", style(format!("Q{}.", idx + 1)).yellow().bold(), question);
            loop {
                match editor.readline(&format!("{} ", style("answer>").cyan())) {
                    Ok(line) if line.trim().is_empty() => {
                        println!("Please answer the question before moving on.");
                    }
                    Ok(line) => {
                        answers.push(line.trim().to_string());
                        break;
                    }
                    Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(None),
                    Err(e) => return Err(QuizError::Internal(format!("Readline error: {}", e))),
                }
            }
        }
        Ok(Some(answers))
    })
    .await
    .map_err(|e| QuizError::Internal(format!("Answer input task failed: {}", e)))?
}

fn print_grade(idx: usize, grade: &Grade) {
    println!("\n{}", style(format!("Feedback for Q{}:", idx + 1)).bold());
    if let Some(copied) = &grade.copied {
        println!(
            "{} Q{} appears copied from the summary ({}).",
            style("⚠").yellow(),
            idx + 1,
            copied.signal.description()
        );
        println!("Here's where copying was detected:\n{}", copied.highlighted);
    }
    println!("{}", grade.feedback.trim());
}
