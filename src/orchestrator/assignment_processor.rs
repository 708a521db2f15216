//! 作业处理器 - 编排层
//!
//! ## 职责
//!
//! 1. 把作业 hash 解析为步骤列表
//! 2. 并发抓取所有步骤（Semaphore 限制并发数）
//! 3. 按原始步骤顺序重新组装结果，而不是按完成顺序
//! 4. 跳过抓取失败的步骤，其余步骤照常处理
//! 5. 对每个成功的步骤调用 `workflow::process_step`

use crate::clients::StepSource;
use crate::models::Assignment;
use crate::utils::logging;
use crate::workflow::{process_step, StepCtx};
use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

/// 处理一个作业
///
/// # 参数
/// - `source`: 步骤来源
/// - `task_hash`: 作业 hash
/// - `max_concurrent`: 同时进行的抓取数量，0 按 1 处理
///
/// # 返回
/// 有序的作业结果；`task_number` 只在成功的步骤中连续编号
pub async fn process_assignment<S: StepSource>(
    source: &S,
    task_hash: &str,
    max_concurrent: usize,
) -> Assignment {
    let step_ids = source.resolve_steps(task_hash).await;
    logging::log_steps_resolved(task_hash, step_ids.len());

    let semaphore = Semaphore::new(max_concurrent.max(1));
    let fetches = step_ids.iter().map(|step_id| {
        let semaphore = &semaphore;
        async move {
            let _permit = semaphore.acquire().await;
            source.fetch_step_markup(step_id).await
        }
    });

    // join_all 的结果顺序与输入顺序一致
    let results = join_all(fetches).await;

    let mut tasks = Vec::new();
    for (step_id, result) in step_ids.iter().zip(results) {
        let markup = match result {
            Ok(markup) if !markup.trim().is_empty() => markup,
            Ok(_) => {
                warn!("[作业 {}] ⚠️ 步骤 {} 内容为空，跳过", task_hash, step_id);
                continue;
            }
            Err(e) => {
                warn!("[作业 {}] ⚠️ 步骤 {} 抓取失败，跳过: {}", task_hash, step_id, e);
                continue;
            }
        };

        let ctx = StepCtx::new(task_hash.to_string(), step_id.clone(), tasks.len() + 1);
        debug!("{} 开始提取", ctx);
        tasks.push(process_step(&ctx, &markup));
    }

    let assignment = Assignment {
        task_hash: task_hash.to_string(),
        tasks,
    };
    logging::log_assignment_complete(
        task_hash,
        assignment.len(),
        step_ids.len(),
        assignment.unresolved_count(),
    );
    assignment
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ApiError, AppResult};
    use crate::models::AnswerItem;
    use std::collections::HashMap;
    use std::time::Duration;

    /// 内存中的步骤来源，可以为每个步骤设置延迟
    struct FakeSource {
        steps: Vec<String>,
        markup: HashMap<String, (u64, Option<String>)>,
    }

    impl FakeSource {
        fn new() -> Self {
            Self {
                steps: Vec::new(),
                markup: HashMap::new(),
            }
        }

        fn step(mut self, id: &str, delay_ms: u64, markup: Option<&str>) -> Self {
            self.steps.push(id.to_string());
            self.markup
                .insert(id.to_string(), (delay_ms, markup.map(str::to_string)));
            self
        }
    }

    impl StepSource for FakeSource {
        async fn resolve_steps(&self, _task_hash: &str) -> Vec<String> {
            self.steps.clone()
        }

        async fn fetch_step_markup(&self, step_id: &str) -> AppResult<String> {
            let (delay, markup) = self.markup.get(step_id).cloned().unwrap_or((0, None));
            tokio::time::sleep(Duration::from_millis(delay)).await;
            markup.ok_or_else(|| {
                ApiError::EmptyContent {
                    step_id: step_id.to_string(),
                }
                .into()
            })
        }
    }

    fn choice(answer: &str) -> String {
        format!(r#"<vim-test-item correct="true">{}</vim-test-item>"#, answer)
    }

    #[tokio::test]
    async fn keeps_step_order_regardless_of_completion_order() {
        let source = FakeSource::new()
            .step("s1", 60, Some(&choice("один")))
            .step("s2", 0, Some(&choice("два")))
            .step("s3", 30, Some(&choice("три")));

        let assignment = process_assignment(&source, "hash", 3).await;

        let answers: Vec<_> = assignment
            .tasks
            .iter()
            .map(|t| t.answer_items[0].value.clone())
            .collect();
        assert_eq!(answers, vec!["один", "два", "три"]);
        let numbers: Vec<_> = assignment.tasks.iter().map(|t| t.task_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn failed_and_empty_steps_are_dropped_and_numbering_stays_dense() {
        let source = FakeSource::new()
            .step("s1", 0, None)
            .step("s2", 0, Some(&choice("Paris")))
            .step("s3", 0, Some("   "))
            .step("s4", 0, Some("<p>Просто текст</p>"));

        let assignment = process_assignment(&source, "hash", 2).await;

        assert_eq!(assignment.len(), 2);
        assert_eq!(assignment.tasks[0].task_number, 1);
        assert_eq!(assignment.tasks[0].answer_items, vec![AnswerItem::correct("Paris")]);
        assert_eq!(assignment.tasks[1].task_number, 2);
        assert!(!assignment.tasks[1].archetype_resolved);
        assert_eq!(assignment.unresolved_count(), 1);
    }

    #[tokio::test]
    async fn no_steps_gives_empty_assignment() {
        let assignment = process_assignment(&FakeSource::new(), "hash", 4).await;
        assert!(assignment.is_empty());
        assert_eq!(assignment.task_hash, "hash");
    }

    #[test]
    fn zero_concurrency_still_completes() {
        let source = FakeSource::new().step("s1", 0, Some(&choice("Paris")));
        let assignment = tokio_test::block_on(process_assignment(&source, "hash", 0));
        assert_eq!(assignment.len(), 1);
    }
}
