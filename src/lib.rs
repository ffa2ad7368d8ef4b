//! PDF summarization and review quizzes, with a local check that flags
//! answers copied from the summary before they are sent for grading.

pub mod config;
pub mod errors;
pub mod extract;
pub mod llm;
pub mod originality;
pub mod quiz;
pub mod report;
