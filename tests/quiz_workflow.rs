use std::sync::Mutex;

use async_trait::async_trait;
use pdfquiz::errors::{QuizError, RetryConfig};
use pdfquiz::llm::{CompletionOptions, LLMProvider, LLMResponse};
use pdfquiz::originality::{DetectorConfig, Marker, Signal};
use pdfquiz::quiz::{self, Grader, QuestionType, QuizSettings, QuizTally};
use pdfquiz::report::render_quiz_markdown;

/// Answers every prompt by its kind: summaries, question lists, grades.
struct ScriptedProvider {
    prompts: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    fn new() -> Self {
        Self { prompts: Mutex::new(Vec::new()) }
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LLMProvider for ScriptedProvider {
    async fn complete(
        &self,
        prompt: &str,
        _system: Option<&str>,
        _options: &CompletionOptions,
    ) -> Result<LLMResponse, QuizError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let content = if prompt.starts_with("Please summarize") {
            "Photosynthesis converts light energy into chemical energy. It takes place in chloroplasts."
        } else if prompt.starts_with("Based on the following summary") {
            "1. What does photosynthesis convert?\n2. Where does photosynthesis happen?"
        } else {
            "Grade: 8 out of 10. Solid answer."
        };
        Ok(LLMResponse {
            content: content.to_string(),
            input_tokens: None,
            output_tokens: None,
            model: "scripted".into(),
        })
    }

    fn provider_name(&self) -> &str { "scripted" }
    fn model_name(&self) -> &str { "scripted" }
}

#[tokio::test]
async fn test_full_quiz_with_one_copied_answer() {
    let provider = ScriptedProvider::new();
    let retry = RetryConfig::none();
    let settings = QuizSettings { num_questions: 2, points_per_question: 10, ..Default::default() };

    let summary = quiz::summarize_text(&provider, &retry, "Long chapter text about plants.").await.unwrap();
    let raw = quiz::generate_questions(&provider, &retry, &summary, &settings).await.unwrap();
    let questions = quiz::parse_questions(&raw);
    assert_eq!(questions.len(), 2);

    let grader = Grader {
        provider: &provider,
        retry: retry.clone(),
        detector: DetectorConfig { marker: Marker::Markdown, ..Default::default() },
        summary: &summary,
    };
    let answers = [
        "My own idea: sunlight gets stored as sugar for the plant to use later on.",
        "It takes place in chloroplasts.",
    ];

    let mut grades = Vec::new();
    for (question, answer) in questions.iter().zip(answers) {
        grades.push(
            grader
                .grade(question, answer, settings.points_per_question, &QuestionType::ShortAnswer)
                .await
                .unwrap(),
        );
    }

    assert_eq!(grades[0].score, Some(8));
    assert_eq!(grades[0].feedback, "Grade: 8/10. Solid answer.");
    assert!(grades[1].is_copied());
    assert_eq!(grades[1].score, Some(0));
    let copied = grades[1].copied.as_ref().unwrap();
    assert_eq!(copied.signal, Signal::ExactContainment);
    assert_eq!(copied.highlighted, "**It takes place in chloroplasts.**");

    // summary + questions + one grading call; the copied answer never left the machine
    assert_eq!(provider.prompts().len(), 3);

    let tally = QuizTally::from_grades(&grades);
    assert_eq!(tally.total_score, 8);
    assert_eq!(tally.total_possible, 20);
    assert_eq!(tally.letter, 'F');
    assert_eq!(tally.copied_answers, 1);

    let report = render_quiz_markdown(&grades, &tally);
    assert!(report.contains("**It takes place in chloroplasts.**"));
    assert!(report.contains("| Total Score | 8/20 |"));
}
