//! 结构化文档 - 基础设施层
//!
//! 唯一接触 HTML 解析器的模块，只暴露按标签查找、取属性、取文本的能力。
//! 解析是宽松的：任何输入都会得到一棵（可能不完整的）树，不会报错。

use crate::utils::text::normalize_whitespace;
use scraper::{ElementRef, Html, Node};
use std::hash::Hash;

/// 一个步骤的解析结果
///
/// 所有查询都是只读的，同一个文档可以被多次查询而结果不变。
pub struct StructuralDocument {
    html: Html,
}

impl StructuralDocument {
    /// 解析标记文本
    pub fn parse(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
        }
    }

    /// 根元素
    pub fn root(&self) -> Element<'_> {
        Element {
            inner: self.html.root_element(),
        }
    }

    /// 按标签名查找所有元素（文档顺序）
    pub fn find_all(&self, names: &[&str]) -> Vec<Element<'_>> {
        self.root().find_all(names)
    }

    /// 按标签名和属性值查找所有元素
    pub fn find_all_where(&self, names: &[&str], attr: &str, value: &str) -> Vec<Element<'_>> {
        self.root().find_all_where(names, attr, value)
    }

    /// 是否存在指定标签
    pub fn contains(&self, names: &[&str]) -> bool {
        self.root().find_first(names).is_some()
    }

    /// 是否存在带指定属性值的标签
    pub fn contains_where(&self, names: &[&str], attr: &str, value: &str) -> bool {
        self.root()
            .descendants()
            .any(|e| e.is_any(names) && e.attr(attr) == Some(value))
    }

    pub fn find_first(&self, names: &[&str]) -> Option<Element<'_>> {
        self.root().find_first(names)
    }

    /// 去掉指定标签子树后的文本，文本节点之间用空格连接
    ///
    /// 只读遍历，不修改文档。
    pub fn text_excluding(&self, excluded: &[&str]) -> String {
        let parts: Vec<&str> = self
            .html
            .root_element()
            .descendants()
            .filter_map(|node| match node.value() {
                Node::Text(text) => Some((node, &**text)),
                _ => None,
            })
            .filter(|(node, _)| {
                !node.ancestors().any(|ancestor| {
                    ancestor
                        .value()
                        .as_element()
                        .is_some_and(|e| excluded.contains(&e.name()))
                })
            })
            .map(|(_, text)| text)
            .collect();
        normalize_whitespace(&parts.join(" "))
    }
}

/// 文档中的一个元素
#[derive(Clone, Copy)]
pub struct Element<'a> {
    inner: ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// 标签名（小写）
    pub fn name(&self) -> &'a str {
        self.inner.value().name()
    }

    pub fn is_any(&self, names: &[&str]) -> bool {
        names.contains(&self.name())
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.inner.value().attr(name)
    }

    /// 是否是同一个节点
    pub fn same_node(&self, other: &Element<'_>) -> bool {
        self.inner.id() == other.inner.id()
    }

    /// 节点标识，可用作集合的键
    pub fn node_key(&self) -> impl Copy + Eq + Hash {
        self.inner.id()
    }

    /// 归一化后的文本：拼接所有后代文本节点，合并空白
    pub fn text(&self) -> String {
        let raw: String = self.inner.text().collect();
        normalize_whitespace(&raw)
    }

    /// 所有后代元素（不含自身，文档顺序）
    pub fn descendants(&self) -> impl Iterator<Item = Element<'a>> + 'a {
        self.inner
            .descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .map(|inner| Element { inner })
    }

    /// 所有祖先元素（不含自身，由近到远）
    pub fn ancestors(&self) -> impl Iterator<Item = Element<'a>> + 'a {
        self.inner
            .ancestors()
            .filter_map(ElementRef::wrap)
            .map(|inner| Element { inner })
    }

    pub fn find_all(&self, names: &[&str]) -> Vec<Element<'a>> {
        self.descendants().filter(|e| e.is_any(names)).collect()
    }

    pub fn find_all_where(&self, names: &[&str], attr: &str, value: &str) -> Vec<Element<'a>> {
        self.descendants()
            .filter(|e| e.is_any(names) && e.attr(attr) == Some(value))
            .collect()
    }

    pub fn find_first(&self, names: &[&str]) -> Option<Element<'a>> {
        self.descendants().find(|e| e.is_any(names))
    }

    /// 第一个 `<img>` 的非空 `src`
    pub fn image_src(&self) -> Option<&'a str> {
        self.find_all(&["img"])
            .into_iter()
            .find_map(|img| img.attr("src").filter(|src| !src.trim().is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_custom_tags_in_document_order() {
        let doc = StructuralDocument::parse(
            r#"<div><vim-test-item correct="false">A</vim-test-item>
               <vim-test-item correct="true">B</vim-test-item>
               <vim-select-item correct="true">C</vim-select-item></div>"#,
        );
        let all = doc.find_all(&["vim-test-item", "vim-select-item"]);
        let texts: Vec<_> = all.iter().map(Element::text).collect();
        assert_eq!(texts, vec!["A", "B", "C"]);

        let correct = doc.find_all_where(&["vim-test-item", "vim-select-item"], "correct", "true");
        assert_eq!(correct.len(), 2);
        assert!(doc.contains_where(&["vim-select-item"], "correct", "true"));
        assert!(!doc.contains(&["vim-groups-row"]));
    }

    #[test]
    fn text_collapses_whitespace() {
        let doc = StructuralDocument::parse("<p>  Hello \n\t <b>wor</b>ld  </p>");
        let p = doc.find_first(&["p"]).unwrap();
        assert_eq!(p.text(), "Hello world");
    }

    #[test]
    fn text_excluding_is_non_destructive() {
        let doc = StructuralDocument::parse(
            "<p>Question <vim-test-item>answer</vim-test-item> tail</p>",
        );
        assert_eq!(doc.text_excluding(&["vim-test-item"]), "Question tail");
        // 文档本身不变
        assert_eq!(doc.find_all(&["vim-test-item"]).len(), 1);
        assert_eq!(doc.text_excluding(&[]), "Question answer tail");
    }

    #[test]
    fn malformed_markup_does_not_fail() {
        let doc = StructuralDocument::parse("<div><vim-test-item correct=\"true\">Paris<div></span>");
        let items = doc.find_all_where(&["vim-test-item"], "correct", "true");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].text(), "Paris");
        assert!(doc.find_first(&["vim-instruction"]).is_none());
    }

    #[test]
    fn image_src_skips_empty_sources() {
        let doc = StructuralDocument::parse(
            r#"<vim-dnd-image-drop><img src=""><img src="https://cdn/x.png"></vim-dnd-image-drop>"#,
        );
        let drop = doc.find_first(&["vim-dnd-image-drop"]).unwrap();
        assert_eq!(drop.image_src(), Some("https://cdn/x.png"));
    }

    #[test]
    fn ancestors_run_from_parent_outward() {
        let doc = StructuralDocument::parse("<div id=\"outer\"><section><div id=\"inner\">x</div></section></div>");
        let inner = doc.find_all_where(&["div"], "id", "inner")[0];
        let outer = doc.find_all_where(&["div"], "id", "outer")[0];

        let names: Vec<_> = inner.ancestors().map(|e| e.name()).collect();
        assert_eq!(names, vec!["section", "div", "body", "html"]);
        assert!(inner.ancestors().any(|e| e.node_key() == outer.node_key()));
        assert!(inner.node_key() != outer.node_key());
    }
}
