//! Service modules for the exam classification pipeline
//!
//! Pure matching logic (normalizer, fuzzy matcher, course resolver), the
//! filesystem side (scanner, type probe, mover, course index) and the
//! external collaborators (PDF text layer, keyword detector, chat-completion
//! extractor).

pub mod course_index;
pub mod course_resolver;
pub mod field_extractor;
pub mod file_mover;
pub mod file_scanner;
pub mod file_type;
pub mod fuzzy_matcher;
pub mod llm_client;
pub mod pdf_text;
pub mod response_parser;
pub mod test_detector;
pub mod text_normalizer;

pub use course_index::CourseIndex;
pub use course_resolver::{CourseResolver, ResolveError};
pub use field_extractor::LlmFieldExtractor;
pub use file_scanner::{FileScanner, ScanError, ScanResult};
pub use file_type::MagicPdfProbe;
pub use fuzzy_matcher::{best_match, weighted_ratio, FuzzyMatch};
pub use llm_client::{ChatClient, ChatMessage, LlmError};
pub use pdf_text::PdfTextSource;
pub use response_parser::{parse_fields_response, ResponseParseError};
pub use test_detector::KeywordTestDetector;
pub use text_normalizer::normalize;
