pub mod answer_extractor;
pub mod message_formatter;
pub mod question_text;

pub use answer_extractor::{classify, extract_answers, Extraction};
pub use message_formatter::{format_task_message, NO_ANSWERS_MESSAGE};
pub use question_text::extract_question;
