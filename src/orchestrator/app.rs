//! 应用入口 - 编排层
//!
//! 持有配置和 API 客户端，逐个处理命令行给出的作业链接并输出结果。

use crate::clients::SkysmartClient;
use crate::config::Config;
use crate::models::{parse_task_hash, Assignment};
use crate::orchestrator::assignment_processor::process_assignment;
use crate::services::{format_task_message, NO_ANSWERS_MESSAGE};
use crate::utils::logging;
use anyhow::{Context, Result};
use std::time::Instant;
use tracing::{error, info};

/// 输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// 每个任务一条纯文本消息
    #[default]
    Text,
    /// 整个作业输出为 JSON
    Json,
}

/// 应用主结构
pub struct App {
    config: Config,
    client: SkysmartClient,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        config.validate().context("配置不可用")?;
        let client = SkysmartClient::new(&config).context("无法创建 API 客户端")?;
        Ok(Self { config, client })
    }

    /// 依次处理所有链接
    ///
    /// 单个链接不合法只记录错误，不影响其余链接。
    pub async fn run(&self, links: &[String], format: OutputFormat) -> Result<()> {
        logging::log_startup(self.config.max_concurrent_fetches, links.len());

        for link in links {
            let task_hash = match parse_task_hash(link, &self.config.student_link_prefix) {
                Ok(hash) => hash,
                Err(e) => {
                    error!("❌ 无法处理链接 {}: {}", link, e);
                    continue;
                }
            };

            info!("[作业 {}] ⏳ 正在获取答案...", task_hash);
            let started = Instant::now();
            let assignment = self.answers_for(&task_hash).await;
            let elapsed = started.elapsed().as_secs_f64();

            self.print(&assignment, elapsed, format)?;
        }

        Ok(())
    }

    /// 获取一个作业的全部答案
    pub async fn answers_for(&self, task_hash: &str) -> Assignment {
        process_assignment(&self.client, task_hash, self.config.max_concurrent_fetches).await
    }

    fn print(&self, assignment: &Assignment, elapsed: f64, format: OutputFormat) -> Result<()> {
        match format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(assignment).context("无法序列化结果")?;
                println!("{}", json);
            }
            OutputFormat::Text if assignment.is_empty() => {
                println!("{}\n", NO_ANSWERS_MESSAGE);
            }
            OutputFormat::Text => {
                for task in &assignment.tasks {
                    println!("{}\n", format_task_message(task, elapsed));
                }
            }
        }
        Ok(())
    }
}
