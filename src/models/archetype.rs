use serde::Serialize;

/// 题型
///
/// 互斥的题目形态。检测按 [`Archetype::PRIORITY`] 的顺序进行，第一个命中的生效。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    /// 图片拖拽配对
    ImageMatching,
    /// 文本拖拽填空
    TextDragDrop,
    /// 分组表格
    GroupedTable,
    /// 划掉多余项
    StrikeOut,
    /// 判断 / 选择
    Choice,
    /// 填空 / 开放输入
    InputAnswer,
}

impl Archetype {
    /// 固定的检测优先级
    pub const PRIORITY: [Archetype; 6] = [
        Archetype::ImageMatching,
        Archetype::TextDragDrop,
        Archetype::GroupedTable,
        Archetype::StrikeOut,
        Archetype::Choice,
        Archetype::InputAnswer,
    ];

    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            Archetype::ImageMatching => "图片拖拽配对",
            Archetype::TextDragDrop => "文本拖拽",
            Archetype::GroupedTable => "分组表格",
            Archetype::StrikeOut => "划掉多余项",
            Archetype::Choice => "选择题",
            Archetype::InputAnswer => "填空题",
        }
    }
}

impl std::fmt::Display for Archetype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
