//! 步骤处理流程 - 流程层
//!
//! 核心职责：定义"一个步骤"的完整处理流程
//!
//! 流程顺序：
//! 1. 解析标记 → 结构化文档
//! 2. 提取题干
//! 3. 按优先级识别题型并提取答案
//! 4. 组装 TaskRecord（无答案时为未识别记录）

use tracing::{debug, warn};

use crate::infrastructure::StructuralDocument;
use crate::models::TaskRecord;
use crate::services::{extract_answers, extract_question};
use crate::utils::truncate_text;
use crate::workflow::step_ctx::StepCtx;

/// 处理一个步骤的标记文本
///
/// 纯同步函数，不持有任何共享状态。
pub fn process_step(ctx: &StepCtx, markup: &str) -> TaskRecord {
    let doc = StructuralDocument::parse(markup);

    let question = extract_question(&doc);
    debug!("{} 题干: {}", ctx, truncate_text(&question, 80));

    let extraction = extract_answers(&doc);
    match extraction.archetype {
        Some(archetype) if extraction.items.is_empty() => {
            warn!("{} ⚠️ 识别为 {}，但没有提取到答案", ctx, archetype);
        }
        Some(archetype) => {
            debug!("{} ✓ {}: {} 条答案", ctx, archetype, extraction.items.len());
        }
        None => {
            warn!("{} ⚠️ 未识别题型", ctx);
        }
    }

    TaskRecord::new(
        ctx.task_number,
        question,
        extraction.archetype,
        extraction.items,
    )
}
