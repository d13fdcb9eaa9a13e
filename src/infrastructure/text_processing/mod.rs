mod pdf_adapter;
mod sliding_window_splitter;
mod text_sanitizer;

pub use pdf_adapter::PdfAdapter;
pub use sliding_window_splitter::SlidingWindowSplitter;
pub use text_sanitizer::sanitize_page_text;
