//! Prompt templates for meeting analysis
//!
//! The analysis call uses a fixed system/user prompt pair. The user prompt
//! describes the exact JSON shape the reply must follow.

/// Placeholder in the analysis template replaced with the transcript
pub const CONTENT_PLACEHOLDER: &str = "{content}";

/// Default prompt templates for the analysis call
pub struct PromptTemplates;

impl PromptTemplates {
    /// System message establishing the analyst role
    pub fn system() -> &'static str {
        "당신은 미팅 분석 전문가입니다. 주어진 미팅 내용을 분석하여 정확한 JSON 형태로 결과를 제공해주세요."
    }

    /// User message template; `{content}` receives the transcript
    pub fn analysis() -> &'static str {
        r#"
다음 미팅 내용을 분석하여 JSON 형태로 결과를 제공해주세요:

미팅 내용:
{content}

분석 결과를 다음 JSON 형태로 정확히 제공해주세요:

{
  "summary": "3-4줄 요약",
  "keyPoints": ["핵심 포인트 1", "핵심 포인트 2", "핵심 포인트 3"],
  "actionItems": [
    {
      "task": "해야 할 일",
      "assignee": "담당자 (있을 경우)",
      "deadline": "마감일 (있을 경우)"
    }
  ],
  "participants": ["참석자1", "참석자2"],
  "keywords": ["키워드1", "키워드2", "키워드3"],
  "sentiment": "positive|neutral|negative",
  "nextSteps": "다음 단계 제안",
  "shareableText": "SNS 공유용 간단 텍스트 (50자 내외)"
}

중요: 반드시 유효한 JSON 형태로만 응답해주세요. 다른 텍스트는 포함하지 마세요.
"#
    }

    /// Renders the analysis template for a transcript.
    ///
    /// Only the first placeholder is substituted so transcript text that
    /// happens to contain `{content}` is left alone.
    pub fn render_analysis(content: &str) -> String {
        Self::analysis().replacen(CONTENT_PLACEHOLDER, content, 1)
    }
}
