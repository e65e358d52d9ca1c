/// Domain layer - core business models and logic
///
/// These modules are transport-agnostic and represent core business entities.
pub mod analysis;
pub mod history;
pub mod insights;
pub mod models;
pub mod prompts;
pub mod share;

pub use models::{ActionItem, AnalysisResult, MeetingRecord, Sentiment, SharedMeeting, User};
pub use prompts::PromptTemplates;
