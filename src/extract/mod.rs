pub mod clean;
pub mod pdf;

pub use clean::{clean_text, segment_by_headings};
pub use pdf::{ensure_page_limit, extract_text_from_pdf, page_count};
