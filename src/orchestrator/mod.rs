//! 编排层（Orchestration Layer）
//!
//! ## 层次关系
//!
//! ```text
//! app (处理 Vec<链接>)
//!     ↓
//! assignment_processor (处理一个作业的 Vec<步骤>，并发抓取)
//!     ↓
//! workflow::process_step (处理单个步骤)
//!     ↓
//! services (能力层：题干 / 题型识别 / 答案提取)
//!     ↓
//! infrastructure (基础设施：StructuralDocument)
//! ```
//!
//! 编排层只做调度和统计，不做具体的题型判断。

pub mod app;
pub mod assignment_processor;

pub use app::{App, OutputFormat};
pub use assignment_processor::process_assignment;
