use super::Archetype;
use serde::Serialize;

/// 未识别题型时的提示文本
pub const NOT_RECOGNIZED_TEXT: &str = "Ответы не распознаны";

/// 答案项的展示方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// 普通文本（填空、分组、配对）
    Plain,
    /// 选择题的正确选项
    Correct,
    /// 需要划掉的项
    Struck,
    /// 未识别题型的占位项
    Unrecognized,
}

/// 单个答案单元：(提示, 答案)
///
/// `prompt` 可以为空，例如选择题只有正确选项本身。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerItem {
    pub prompt: String,
    pub value: String,
    pub kind: ItemKind,
}

impl AnswerItem {
    pub fn plain(value: impl Into<String>) -> Self {
        Self {
            prompt: String::new(),
            value: value.into(),
            kind: ItemKind::Plain,
        }
    }

    pub fn pair(prompt: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            value: value.into(),
            kind: ItemKind::Plain,
        }
    }

    pub fn correct(value: impl Into<String>) -> Self {
        Self {
            prompt: String::new(),
            value: value.into(),
            kind: ItemKind::Correct,
        }
    }

    pub fn struck(value: impl Into<String>) -> Self {
        Self {
            prompt: String::new(),
            value: value.into(),
            kind: ItemKind::Struck,
        }
    }

    /// 未识别题型的哨兵项
    pub fn not_recognized() -> Self {
        Self {
            prompt: String::new(),
            value: NOT_RECOGNIZED_TEXT.to_string(),
            kind: ItemKind::Unrecognized,
        }
    }

    /// 渲染为一行纯文本，展示层无需再解析
    pub fn render(&self) -> String {
        let body = match self.kind {
            ItemKind::Plain | ItemKind::Unrecognized => self.value.clone(),
            ItemKind::Correct => format!("✅ {}", self.value),
            ItemKind::Struck => format!("❌ ~~{}~~", self.value),
        };
        if self.prompt.is_empty() {
            body
        } else {
            format!("{} → {}", self.prompt, body)
        }
    }
}

/// 单个步骤的提取结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskRecord {
    /// 在成功抓取的步骤中的序号（从 1 开始）
    pub task_number: usize,
    pub question: String,
    pub answer_items: Vec<AnswerItem>,
    /// 是否有题型提取出了答案
    pub archetype_resolved: bool,
    /// 命中的题型特征（即使没有提取出答案也会记录）
    pub archetype: Option<Archetype>,
}

impl TaskRecord {
    /// 根据提取结果构建记录
    ///
    /// 没有任何答案项时记录为未识别，答案只包含一个哨兵项。
    pub fn new(
        task_number: usize,
        question: String,
        archetype: Option<Archetype>,
        answer_items: Vec<AnswerItem>,
    ) -> Self {
        if answer_items.is_empty() {
            Self {
                task_number,
                question,
                answer_items: vec![AnswerItem::not_recognized()],
                archetype_resolved: false,
                archetype,
            }
        } else {
            Self {
                task_number,
                question,
                answer_items,
                archetype_resolved: true,
                archetype,
            }
        }
    }

    pub fn render_lines(&self) -> Vec<String> {
        self.answer_items.iter().map(AnswerItem::render).collect()
    }
}

/// 一个作业的全部结果，顺序与步骤顺序一致
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Assignment {
    pub task_hash: String,
    pub tasks: Vec<TaskRecord>,
}

impl Assignment {
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn unresolved_count(&self) -> usize {
        self.tasks.iter().filter(|t| !t.archetype_resolved).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_variants() {
        assert_eq!(AnswerItem::correct("Paris").render(), "✅ Paris");
        assert_eq!(AnswerItem::struck("лишнее").render(), "❌ ~~лишнее~~");
        assert_eq!(AnswerItem::pair("_____", "кот").render(), "_____ → кот");
        assert_eq!(AnswerItem::plain("42").render(), "42");
        assert_eq!(AnswerItem::not_recognized().render(), NOT_RECOGNIZED_TEXT);
    }

    #[test]
    fn empty_items_become_unresolved_sentinel() {
        let record = TaskRecord::new(1, String::new(), Some(Archetype::StrikeOut), Vec::new());
        assert!(!record.archetype_resolved);
        assert_eq!(record.answer_items, vec![AnswerItem::not_recognized()]);
        assert_eq!(record.archetype, Some(Archetype::StrikeOut));
    }

    #[test]
    fn sentinel_differs_from_real_answer_with_same_text() {
        let real = AnswerItem::plain(NOT_RECOGNIZED_TEXT);
        assert_ne!(real, AnswerItem::not_recognized());
    }
}
