/// Domain models for Meet Insights
///
/// These models represent core business entities and are transport-agnostic.
/// Field names serialize in camelCase to stay wire-compatible with the web client.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Overall tone of a meeting as judged by the analysis call
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "positive" => Ok(Sentiment::Positive),
            "neutral" => Ok(Sentiment::Neutral),
            "negative" => Ok(Sentiment::Negative),
            other => Err(format!("Invalid sentiment: {}", other)),
        }
    }
}

/// A follow-up task extracted from the transcript
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionItem {
    pub task: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
}

impl ActionItem {
    pub fn new(task: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            assignee: None,
            deadline: None,
        }
    }
}

/// Structured output of one transcript analysis
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub summary: String,
    pub key_points: Vec<String>,
    pub action_items: Vec<ActionItem>,
    pub participants: Vec<String>,
    pub keywords: Vec<String>,
    pub sentiment: Sentiment,
    pub next_steps: String,
    pub shareable_text: String,
}

/// A saved meeting summary owned by one user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MeetingRecord {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub created_at: DateTime<Utc>,
    pub sentiment: Sentiment,
    pub participant_count: u32,
    pub keywords: Vec<String>,
}

impl MeetingRecord {
    /// Derives the persisted record from a completed analysis
    pub fn from_analysis(
        id: String,
        title: String,
        analysis: &AnalysisResult,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            summary: analysis.summary.clone(),
            created_at,
            sentiment: analysis.sentiment,
            participant_count: analysis.participants.len() as u32,
            keywords: analysis.keywords.clone(),
        }
    }
}

/// Identity produced by the mock login flow. Carries no credentials.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
}

impl User {
    /// Creates a demo user; the name falls back to the email's local part
    pub fn demo(email: &str, name: Option<&str>) -> Self {
        let name = match name.map(str::trim) {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => email.split('@').next().unwrap_or_default().to_string(),
        };
        Self {
            id: format!("demo-user-{}", Utc::now().timestamp_millis()),
            email: email.to_string(),
            name,
        }
    }
}

/// Meeting content exposed through a share link
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedMeeting {
    pub title: String,
    pub analysis: AnalysisResult,
    pub created_at: DateTime<Utc>,
}
