use crate::quiz::{Grade, QuizTally};

/// Markdown document for a summary. Lines starting with `-` or `•` become
/// list items; everything else is a paragraph.
pub fn render_summary_markdown(title: &str, summary: &str) -> String {
    let mut out = format!("# {}\n\n", title.trim());
    let mut in_list = false;

    for line in summary.trim().lines().map(str::trim).filter(|l| !l.is_empty()) {
        if line.starts_with('-') || line.starts_with('•') {
            let item = line.trim_start_matches(|c: char| c == '-' || c == '•' || c == ' ');
            out.push_str(&format!("- {}\n", item.trim()));
            in_list = true;
        } else {
            if in_list {
                out.push('\n');
                in_list = false;
            }
            out.push_str(line);
            out.push_str("\n\n");
        }
    }

    if in_list {
        out.push('\n');
    }
    out
}

pub fn render_quiz_markdown(grades: &[Grade], tally: &QuizTally) -> String {
    let mut out = format!(
        "# Quiz Results\n\n_Generated {}_\n\n",
        chrono::Local::now().format("%Y-%m-%d %H:%M")
    );

    for (idx, grade) in grades.iter().enumerate() {
        out.push_str(&format!("## Q{}. {}\n\n", idx + 1, grade.question));
        out.push_str(&format!("**Your answer:**\n\n{}\n\n", grade.answer));
        if let Some(copied) = &grade.copied {
            out.push_str(&format!(
                "> Copy detected ({}): {}.\n\n{}\n\n",
                copied.signal,
                copied.signal.description(),
                copied.highlighted
            ));
        }
        let score = grade
            .score
            .map(|s| format!("{}/{}", s, grade.max_points))
            .unwrap_or_else(|| format!("?/{}", grade.max_points));
        out.push_str(&format!("**Score:** {}\n\n{}\n\n", score, grade.feedback.trim()));
    }

    out.push_str(&format!(
        "## Quiz Summary\n\n| | |\n|---|---|\n| Total Score | {}/{} |\n| Percentage | {:.1}% |\n| Grade | {} |\n",
        tally.total_score, tally.total_possible, tally.percentage, tally.letter
    ));
    if tally.copied_answers > 0 {
        out.push_str(&format!("| Copied answers | {} |\n", tally.copied_answers));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::originality::Signal;
    use crate::quiz::CopyFinding;

    #[test]
    fn test_summary_paragraphs_and_bullets() {
        let summary = "Intro paragraph.\n- **Key** point\n• Second point\nClosing words.";
        let md = render_summary_markdown("Generated Summary", summary);
        assert_eq!(
            md,
            "# Generated Summary\n\nIntro paragraph.\n\n- **Key** point\n- Second point\n\nClosing words.\n\n"
        );
    }

    #[test]
    fn test_summary_ending_with_list() {
        let md = render_summary_markdown("T", "- a\n- b");
        assert!(md.ends_with("- a\n- b\n\n"));
    }

    #[test]
    fn test_quiz_markdown_includes_copy_warning_and_tally() {
        let grades = vec![
            Grade {
                question: "What is X?".into(),
                answer: "X is Y.".into(),
                max_points: 10,
                feedback: "Grade: 0/10".into(),
                score: Some(0),
                copied: Some(CopyFinding {
                    signal: Signal::ExactContainment,
                    highlighted: "**X is Y.**".into(),
                }),
            },
            Grade {
                question: "Why?".into(),
                answer: "Because.".into(),
                max_points: 10,
                feedback: "Grade: 9/10".into(),
                score: Some(9),
                copied: None,
            },
        ];
        let tally = QuizTally::from_grades(&grades);
        let md = render_quiz_markdown(&grades, &tally);

        assert!(md.contains("## Q1. What is X?"));
        assert!(md.contains("Copy detected (exact_containment)"));
        assert!(md.contains("**Score:** 9/10"));
        assert!(md.contains("| Total Score | 9/20 |"));
        assert!(md.contains("| Percentage | 45.0% |"));
        assert!(md.contains("| Copied answers | 1 |"));
    }
}
