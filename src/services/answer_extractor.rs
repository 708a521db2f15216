//! 答案提取服务 - 业务能力层
//!
//! 按固定优先级检测题型特征标签，第一个命中的题型负责提取答案。
//! 特征不存在表示"试下一个题型"，特征存在但提取为空表示"未识别"。
//! 所有函数都是纯函数：同一个文档提取多次结果相同。

use crate::infrastructure::{Element, StructuralDocument};
use crate::models::{AnswerItem, Archetype};
use crate::utils::text::decode_base64_text;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

const IMAGE_DRAG_TAGS: &[&str] = &["vim-dnd-image-drag", "vim-dnd-image-set-drag"];
const IMAGE_DROP_TAGS: &[&str] = &["vim-dnd-image-drop", "vim-dnd-image-set-drop"];
const TEXT_DRAG_TAGS: &[&str] = &["vim-dnd-text-drag"];
const TEXT_DROP_TAGS: &[&str] = &["vim-dnd-text-drop"];
const GROUPS_ROW_TAGS: &[&str] = &["vim-groups-row"];
const GROUPS_ITEM_TAGS: &[&str] = &["vim-groups-item"];
const STRIKE_OUT_TAGS: &[&str] = &["vim-strike-out-item"];
/// 检测选择题时只看这两种
const CHOICE_SIGNATURE_TAGS: &[&str] = &["vim-test-item", "vim-select-item"];
const CHOICE_ITEM_TAGS: &[&str] = &["vim-test-item", "vim-select-item", "vim-test-image-item"];
const INPUT_CONTAINER_TAGS: &[&str] = &["vim-input-answers", "math-input-answer"];
const INPUT_ITEM_TAGS: &[&str] = &["vim-input-item"];

const ANSWER_ID_ATTR: &str = "answer-id";
const DRAG_IDS_ATTR: &str = "drag-ids";

/// 空投放区的占位符
pub const BLANK_MARKER: &str = "_____";
/// 投放区没有图片时的描述
pub const IMAGE_LABEL: &str = "Image";

/// 判断题陈述："A." ~ "E." 开头
static STATEMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-E]\.").expect("statement pattern is valid"));
const STATEMENT_MIN_CHARS: usize = 11;
const STATEMENT_MAX_CHARS: usize = 300;

/// 提取结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// 命中的题型；所有特征都不存在时为 `None`
    pub archetype: Option<Archetype>,
    pub items: Vec<AnswerItem>,
}

/// 对一个文档分类并提取答案
pub fn extract_answers(doc: &StructuralDocument) -> Extraction {
    match classify(doc) {
        Some(archetype) => Extraction {
            archetype: Some(archetype),
            items: extract(archetype, doc),
        },
        None => Extraction {
            archetype: None,
            items: Vec::new(),
        },
    }
}

/// 按优先级返回第一个特征存在的题型
pub fn classify(doc: &StructuralDocument) -> Option<Archetype> {
    Archetype::PRIORITY
        .into_iter()
        .find(|archetype| detect(*archetype, doc))
}

/// 检测题型特征是否存在
pub fn detect(archetype: Archetype, doc: &StructuralDocument) -> bool {
    match archetype {
        Archetype::ImageMatching => doc.contains(IMAGE_DRAG_TAGS),
        Archetype::TextDragDrop => doc.contains(TEXT_DROP_TAGS),
        Archetype::GroupedTable => doc.contains(GROUPS_ROW_TAGS),
        Archetype::StrikeOut => doc.contains(STRIKE_OUT_TAGS),
        Archetype::Choice => doc.contains_where(CHOICE_SIGNATURE_TAGS, "correct", "true"),
        Archetype::InputAnswer => doc.contains(INPUT_CONTAINER_TAGS),
    }
}

/// 用指定题型的规则提取答案
pub fn extract(archetype: Archetype, doc: &StructuralDocument) -> Vec<AnswerItem> {
    match archetype {
        Archetype::ImageMatching => extract_image_matching(doc),
        Archetype::TextDragDrop => extract_text_drag_drop(doc),
        Archetype::GroupedTable => extract_grouped_table(doc),
        Archetype::StrikeOut => extract_strike_out(doc),
        Archetype::Choice => extract_choice(doc),
        Archetype::InputAnswer => extract_inputs(doc),
    }
}

// ========== 各题型提取规则 ==========

/// 图片拖拽配对：(投放区描述, 拖拽项文本)
fn extract_image_matching(doc: &StructuralDocument) -> Vec<AnswerItem> {
    let drops = doc.find_all(IMAGE_DROP_TAGS);
    let drops_by_drag_id = index_drops_by_drag_id(&drops);

    let mut items = Vec::new();
    for drag in doc.find_all(IMAGE_DRAG_TAGS) {
        let Some(drag_id) = answer_id(&drag) else {
            continue;
        };
        let Some(drag_text) = element_content(&drag) else {
            continue;
        };
        for target in drops_by_drag_id.get(drag_id).into_iter().flatten() {
            let description = target
                .image_src()
                .map(image_reference)
                .unwrap_or_else(|| IMAGE_LABEL.to_string());
            items.push(AnswerItem::pair(description, drag_text.clone()));
        }
    }
    items
}

/// 文本拖拽：(投放区文本或占位符, 拖拽项文本)
fn extract_text_drag_drop(doc: &StructuralDocument) -> Vec<AnswerItem> {
    let drags_by_id = index_by_answer_id(&doc.find_all(TEXT_DRAG_TAGS));

    let mut items = Vec::new();
    for drop in doc.find_all(TEXT_DROP_TAGS) {
        let drop_text = drop.text();
        let prompt = if drop_text.is_empty() {
            BLANK_MARKER.to_string()
        } else {
            drop_text
        };
        for drag_id in split_drag_ids(drop.attr(DRAG_IDS_ATTR)) {
            if let Some(drag) = drags_by_id.get(drag_id) {
                items.push(AnswerItem::pair(prompt.clone(), drag.text()));
            }
        }
    }
    items
}

/// 分组表格：每个单元格的 `text` 属性是 base64，解码失败的单元格直接跳过，解码结果原样保留
fn extract_grouped_table(doc: &StructuralDocument) -> Vec<AnswerItem> {
    doc.find_all(GROUPS_ROW_TAGS)
        .iter()
        .flat_map(|row| row.find_all(GROUPS_ITEM_TAGS))
        .filter_map(|item| item.attr("text"))
        .filter_map(decode_base64_text)
        .map(AnswerItem::plain)
        .collect()
}

/// 划掉多余项：只取 `striked="true"` 的项
fn extract_strike_out(doc: &StructuralDocument) -> Vec<AnswerItem> {
    doc.find_all_where(STRIKE_OUT_TAGS, "striked", "true")
        .iter()
        .map(|item| AnswerItem::struck(item.text()))
        .collect()
}

/// 判断 / 选择：陈述数与正确项数相等时按位置配对，否则按普通选择题处理
fn extract_choice(doc: &StructuralDocument) -> Vec<AnswerItem> {
    let correct = doc.find_all_where(CHOICE_ITEM_TAGS, "correct", "true");
    let statements = find_statements(doc);

    if !statements.is_empty() && statements.len() == correct.len() {
        return statements
            .into_iter()
            .zip(&correct)
            .map(|(statement, item)| AnswerItem::pair(statement, item.text()))
            .collect();
    }

    correct
        .iter()
        .filter_map(choice_value)
        .map(AnswerItem::correct)
        .collect()
}

/// 填空：输入容器中的每个 `vim-input-item`；没有子项的容器取自身文本
fn extract_inputs(doc: &StructuralDocument) -> Vec<AnswerItem> {
    let mut items = Vec::new();
    for container in doc.find_all(INPUT_CONTAINER_TAGS) {
        let inputs = container.find_all(INPUT_ITEM_TAGS);
        if inputs.is_empty() {
            let text = container.text();
            if !text.is_empty() {
                items.push(AnswerItem::plain(text));
            }
            continue;
        }
        items.extend(
            inputs
                .iter()
                .map(Element::text)
                .filter(|text| !text.is_empty())
                .map(AnswerItem::plain),
        );
    }
    items
}

// ========== 辅助函数 ==========

/// 图片引用文本
pub fn image_reference(src: &str) -> String {
    format!("[Image: {}]", src.trim())
}

/// 非空的 `answer-id`
fn answer_id<'a>(element: &Element<'a>) -> Option<&'a str> {
    element
        .attr(ANSWER_ID_ATTR)
        .map(str::trim)
        .filter(|id| !id.is_empty())
}

/// 拆分 `drag-ids`，空的分量被丢弃，不会匹配到没有 id 的拖拽项
fn split_drag_ids(raw: Option<&str>) -> impl Iterator<Item = &str> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
}

/// answer-id → 第一个拥有该 id 的元素
fn index_by_answer_id<'a>(elements: &[Element<'a>]) -> HashMap<&'a str, Element<'a>> {
    let mut index = HashMap::new();
    for element in elements {
        if let Some(id) = answer_id(element) {
            index.entry(id).or_insert(*element);
        }
    }
    index
}

/// drag id → 引用它的投放区（文档顺序）
fn index_drops_by_drag_id<'a>(drops: &[Element<'a>]) -> HashMap<&'a str, Vec<Element<'a>>> {
    let mut index: HashMap<&'a str, Vec<Element<'a>>> = HashMap::new();
    for drop in drops {
        for drag_id in split_drag_ids(drop.attr(DRAG_IDS_ATTR)) {
            let targets = index.entry(drag_id).or_default();
            // 同一个投放区重复列出同一 id 时只算一次
            if !targets.iter().any(|t| t.same_node(drop)) {
                targets.push(*drop);
            }
        }
    }
    index
}

/// 元素内容：文本优先，没有文本时用图片引用
fn element_content(element: &Element<'_>) -> Option<String> {
    let text = element.text();
    if !text.is_empty() {
        return Some(text);
    }
    element.image_src().map(image_reference)
}

/// 选项内容：文本 + 图片引用
fn choice_value(item: &Element<'_>) -> Option<String> {
    let text = item.text();
    match (text.is_empty(), item.image_src()) {
        (false, Some(src)) => Some(format!("{} {}", text, image_reference(src))),
        (false, None) => Some(text),
        (true, Some(src)) => Some(image_reference(src)),
        (true, None) => None,
    }
}

/// 判断题陈述：最内层的 `div`，文本形如 "A. ..."
///
/// 每个 `div` 的文本只算一次；包含陈述型后代的 `div` 不算最内层。
fn find_statements(doc: &StructuralDocument) -> Vec<String> {
    let candidates: Vec<(Element<'_>, String)> = doc
        .find_all(&["div"])
        .into_iter()
        .map(|div| {
            let text = div.text();
            (div, text)
        })
        .filter(|(_, text)| is_statement(text))
        .collect();

    let enclosing: HashSet<_> = candidates
        .iter()
        .flat_map(|(div, _)| div.ancestors())
        .map(|ancestor| ancestor.node_key())
        .collect();

    candidates
        .into_iter()
        .filter(|(div, _)| !enclosing.contains(&div.node_key()))
        .map(|(_, text)| text)
        .collect()
}

fn is_statement(text: &str) -> bool {
    let len = text.chars().count();
    (STATEMENT_MIN_CHARS..=STATEMENT_MAX_CHARS).contains(&len) && STATEMENT_RE.is_match(text)
}
