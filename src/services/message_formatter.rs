//! 消息格式化服务
//!
//! 把 `TaskRecord` 渲染成可直接发送的纯文本消息。

use crate::models::TaskRecord;

/// 作业没有任何结果时的提示
pub const NO_ANSWERS_MESSAGE: &str = "❌ Ответы не найдены";

/// 单个任务的消息文本
///
/// # 参数
/// - `task`: 任务记录
/// - `elapsed_secs`: 整个作业的耗时（秒）
pub fn format_task_message(task: &TaskRecord, elapsed_secs: f64) -> String {
    let mut message = format!("Задание {}", task.task_number);
    if !task.question.is_empty() {
        message.push('\n');
        message.push_str(&task.question);
    }
    message.push_str("\n\n");
    message.push_str(&task.render_lines().join("\n"));
    message.push_str(&format!("\n\n⚡ {:.1}s", elapsed_secs));
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnswerItem, Archetype};

    #[test]
    fn formats_header_question_and_lines() {
        let task = TaskRecord::new(
            2,
            "Столица Франции?".to_string(),
            Some(Archetype::Choice),
            vec![AnswerItem::correct("Paris")],
        );
        assert_eq!(
            format_task_message(&task, 1.26),
            "Задание 2\nСтолица Франции?\n\n✅ Paris\n\n⚡ 1.3s"
        );
    }

    #[test]
    fn omits_empty_question() {
        let task = TaskRecord::new(1, String::new(), None, Vec::new());
        assert_eq!(
            format_task_message(&task, 0.0),
            "Задание 1\n\nОтветы не распознаны\n\n⚡ 0.0s"
        );
    }
}
