//! 题干提取服务 - 业务能力层
//!
//! 与题型无关：优先取 `vim-instruction`，否则取去掉答案区域后的正文。

use crate::infrastructure::StructuralDocument;
use crate::utils::text::truncate_chars;

/// 回退题干的最大字符数
pub const QUESTION_MAX_CHARS: usize = 600;

const INSTRUCTION_TAG: &str = "vim-instruction";

/// 带答案的子树，回退提取题干时跳过
const ANSWER_BEARING_TAGS: &[&str] = &[
    "vim-test-item",
    "vim-test-image-item",
    "vim-select-item",
    "vim-input-answers",
    "math-input-answer",
    "vim-strike-out-item",
    "vim-dnd-text-drag",
    "vim-dnd-text-drop",
    "vim-dnd-image-drag",
    "vim-dnd-image-set-drag",
    "vim-dnd-image-drop",
    "vim-dnd-image-set-drop",
    "vim-groups-row",
    "script",
    "style",
];

/// 提取题干
pub fn extract_question(doc: &StructuralDocument) -> String {
    if let Some(instruction) = doc.find_first(&[INSTRUCTION_TAG]) {
        let text = instruction.text();
        if !text.is_empty() {
            return text;
        }
    }

    let text = doc.text_excluding(ANSWER_BEARING_TAGS);
    truncate_chars(&text, QUESTION_MAX_CHARS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_instruction() {
        let doc = StructuralDocument::parse(
            r#"<vim-instruction>  Выбери   столицу Франции </vim-instruction>
               <p>Какой-то текст</p>
               <vim-test-item correct="true">Paris</vim-test-item>"#,
        );
        assert_eq!(extract_question(&doc), "Выбери столицу Франции");
    }

    #[test]
    fn blank_instruction_falls_back_to_body_without_answers() {
        let doc = StructuralDocument::parse(
            r#"<vim-instruction>   </vim-instruction>
               <p>Столица Франции?</p>
               <vim-test-item correct="true">Paris</vim-test-item>
               <vim-test-item correct="false">Rome</vim-test-item>"#,
        );
        assert_eq!(extract_question(&doc), "Столица Франции?");
    }

    #[test]
    fn fallback_is_bounded() {
        let long = "слово ".repeat(500);
        let doc = StructuralDocument::parse(&format!("<p>{}</p>", long));
        let question = extract_question(&doc);
        assert_eq!(question.chars().count(), QUESTION_MAX_CHARS);
    }

    #[test]
    fn empty_markup_gives_empty_question() {
        let doc = StructuralDocument::parse("");
        assert_eq!(extract_question(&doc), "");
    }
}
