use crate::error::AppResult;
use std::future::Future;

/// 步骤来源
///
/// 提取流程只依赖这两个能力，具体的 HTTP 细节由实现方负责。
pub trait StepSource {
    /// 把作业 hash 解析为有序的步骤 UUID 列表
    ///
    /// 任何失败都返回空列表，不返回错误。
    fn resolve_steps(&self, task_hash: &str) -> impl Future<Output = Vec<String>> + Send;

    /// 抓取单个步骤的标记文本
    ///
    /// 单个步骤失败时返回错误，由调用方跳过该步骤。
    fn fetch_step_markup(&self, step_id: &str) -> impl Future<Output = AppResult<String>> + Send;
}
