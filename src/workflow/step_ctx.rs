//! 步骤处理上下文
//!
//! 封装"我正在处理哪个作业的哪一步"这一信息

use std::fmt::Display;

/// 步骤处理上下文
#[derive(Debug, Clone)]
pub struct StepCtx {
    /// 作业 hash
    pub task_hash: String,

    /// 步骤 UUID
    pub step_id: String,

    /// 在成功抓取的步骤中的序号（从1开始）
    pub task_number: usize,
}

impl StepCtx {
    /// 创建新的步骤上下文
    pub fn new(task_hash: String, step_id: String, task_number: usize) -> Self {
        Self {
            task_hash,
            step_id,
            task_number,
        }
    }
}

impl Display for StepCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[作业 {} 任务#{} 步骤#{}]",
            self.task_hash, self.task_number, self.step_id
        )
    }
}
