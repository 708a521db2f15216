pub mod answer;
pub mod archetype;
pub mod task_link;

pub use answer::{AnswerItem, Assignment, ItemKind, TaskRecord, NOT_RECOGNIZED_TEXT};
pub use archetype::Archetype;
pub use task_link::parse_task_hash;
