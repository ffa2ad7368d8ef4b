use pdfquiz::originality::{
    copied_spans, detect, highlight_copied, is_copied, DetectorConfig, Marker, Signal, Threshold,
};

fn t(v: f64) -> Threshold {
    Threshold::new(v).unwrap()
}

#[test]
fn test_text_is_always_copied_from_itself() {
    let samples = [
        "a",
        "The cell membrane controls what enters and leaves the cell.",
        "  Padded\ttext with   odd spacing  ",
        "Ünïcödé sentences count too!",
    ];
    for s in samples {
        for threshold in [0.01, 0.5, 0.8, 1.0] {
            assert!(is_copied(s, s, t(threshold)), "{:?} at {}", s, threshold);
        }
    }
}

#[test]
fn test_empty_inputs_never_flag() {
    for threshold in [0.01, 0.8, 1.0] {
        assert!(!is_copied("", "non-empty summary", t(threshold)));
        assert!(!is_copied("non-empty answer", "", t(threshold)));
        assert!(!is_copied(" \n ", "non-empty summary", t(threshold)));
    }
}

#[test]
fn test_case_insensitive_detection() {
    assert!(is_copied("HELLO WORLD", "hello world and more", t(0.5)));
}

#[test]
fn test_word_order_does_not_matter() {
    let summary = "the fox jumps over";
    assert_eq!(
        is_copied("jumps fox the", summary, t(0.9)),
        is_copied("the fox jumps", summary, t(0.9))
    );
}

#[test]
fn test_copied_sentence_scenario() {
    let summary = "This is a sample summary. It has some sentences.";
    assert!(is_copied("It has some sentences.", summary, t(0.4)));
}

#[test]
fn test_unrelated_answer_scenario() {
    let summary = "A quick brown fox jumps.";
    assert!(!is_copied("Something else entirely.", summary, Threshold::default()));
}

#[test]
fn test_sentence_verbatim_catches_padded_copy() {
    // one copied sentence plus a few new words; the summary is long enough
    // that the whole-text ratios stay low
    let copied = "Enzymes lower the activation energy of chemical reactions in living organisms.";
    let summary = format!(
        "{} They are proteins folded into precise three-dimensional shapes. Temperature and pH \
         strongly affect how well they work, and extreme conditions denature them permanently.",
        copied
    );
    let answer = format!("{} Zzz qqq xxx.", copied);
    let threshold = t(0.8);
    assert_eq!(detect(&answer, &summary, threshold), Some(Signal::SentenceVerbatim));
}

#[test]
fn test_highlight_leaves_original_answer_untouched() {
    let summary = "Rivers carve valleys over millennia. Glaciers leave moraines.";
    let answer = "Volcanoes build islands from lava.";
    assert_eq!(highlight_copied(answer, summary, Threshold::HIGHLIGHT_DEFAULT, &Marker::Html), answer);
    assert!(copied_spans(answer, summary, Threshold::HIGHLIGHT_DEFAULT).is_empty());
}

#[test]
fn test_highlight_marks_only_copied_sentence() {
    let summary = "Rivers carve valleys over millennia. Glaciers leave moraines.";
    let answer = "I believe RIVERS carve valleys over millennia. That is all.";
    let marked = highlight_copied(answer, summary, Threshold::HIGHLIGHT_DEFAULT, &Marker::Markdown);
    assert_eq!(marked, "I believe **RIVERS carve valleys over millennia.** That is all.");
}

#[test]
fn test_flagging_and_highlighting_thresholds_are_independent() {
    let detector = DetectorConfig {
        copy_threshold: t(0.3),
        highlight_threshold: t(1.0),
        marker: Marker::Markdown,
    };
    let summary = "Light travels fast. Sound travels slower.";
    let answer = "light is fast but sound is slow";
    assert!(detector.detect(answer, summary).is_some());
    assert_eq!(detector.highlight(answer, summary), answer);
}
