//! # Skysmart Answers
//!
//! 根据作业链接抓取每个步骤的题目标记，识别题型并提取"题干 + 正确答案"
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有解析后的文档，只暴露查询能力
//! - `StructuralDocument` - 宽松解析，按标签/属性查找，取归一化文本
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个文档
//! - `answer_extractor` - 按固定优先级识别题型并提取答案
//! - `question_text` - 题干提取
//! - `message_formatter` - 纯文本消息
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个步骤"的完整处理流程
//! - `StepCtx` - 上下文封装（作业 hash + 步骤 + 序号）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/assignment_processor` - 并发抓取，按步骤顺序组装
//! - `orchestrator/app` - 命令行应用
//!
//! 外部接口在 `clients/`：`StepSource` 抽象步骤来源，`SkysmartClient` 是 HTTP 实现。

pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{SkysmartClient, StepSource};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::StructuralDocument;
pub use models::{AnswerItem, Archetype, Assignment, ItemKind, TaskRecord};
pub use orchestrator::{process_assignment, App, OutputFormat};
pub use workflow::{process_step, StepCtx};
