pub mod formatter;

pub use formatter::{render_quiz_markdown, render_summary_markdown};
