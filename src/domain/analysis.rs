//! Transcript analysis
//!
//! Builds the analysis prompt, runs it through an [`LlmServicePort`] and
//! decodes the reply into an [`AnalysisResult`]. A reply that does not match
//! the expected shape is replaced with [`placeholder_result`] so the caller
//! always gets a usable result once the completion call itself succeeded.

use crate::domain::models::{ActionItem, AnalysisResult, Sentiment};
use crate::domain::prompts::PromptTemplates;
use crate::error::{AppError, Result};
use crate::ports::llm::{CompletionRequest, LlmConfig, LlmServicePort};

/// Strictly decodes a completion reply
pub fn decode_analysis(reply: &str) -> std::result::Result<AnalysisResult, serde_json::Error> {
    serde_json::from_str(reply)
}

/// Fixed result returned when the model's reply cannot be decoded
pub fn placeholder_result() -> AnalysisResult {
    AnalysisResult {
        summary: "미팅 분석을 완료했습니다. 상세 내용을 확인해 주세요.".to_string(),
        key_points: vec!["미팅의 주요 내용이 논의되었습니다.".to_string()],
        action_items: vec![ActionItem::new("후속 조치 사항을 검토해 주세요.")],
        participants: vec!["참석자".to_string()],
        keywords: vec!["미팅".to_string(), "논의".to_string()],
        sentiment: Sentiment::Neutral,
        next_steps: "다음 미팅 일정을 조율해 주세요.".to_string(),
        shareable_text: "미팅 분석 완료! 주요 내용을 확인해보세요.".to_string(),
    }
}

/// Analyzes a transcript with the given completion service
pub async fn analyze_transcript(
    llm: &dyn LlmServicePort,
    content: &str,
    config: &LlmConfig,
) -> Result<AnalysisResult> {
    let request = CompletionRequest::new(
        Some(PromptTemplates::system()),
        PromptTemplates::render_analysis(content),
    );

    let reply = llm.complete(&request, config).await?;
    if reply.is_empty() {
        return Err(AppError::Llm("분석 결과를 받을 수 없습니다.".to_string()));
    }

    match decode_analysis(&reply) {
        Ok(analysis) => Ok(analysis),
        Err(e) => {
            log::error!("Failed to decode analysis reply: {}", e);
            log::error!("Raw reply: {}", reply);
            Ok(placeholder_result())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::llm::MockLlmServicePort;

    const VALID_REPLY: &str = r#"{
        "summary": "배포 일정을 확정했습니다.",
        "keyPoints": ["금요일 배포", "QA 완료"],
        "actionItems": [{"task": "릴리스 노트 작성", "assignee": "박개발"}],
        "participants": ["김기획", "박개발"],
        "keywords": ["배포", "개발"],
        "sentiment": "positive",
        "nextSteps": "금요일 오전 배포",
        "shareableText": "배포 일정 확정!",
        "confidence": 0.9
    }"#;

    fn mock_replying(reply: &'static str) -> MockLlmServicePort {
        let mut llm = MockLlmServicePort::new();
        llm.expect_complete()
            .times(1)
            .returning(move |_, _| Ok(reply.to_string()));
        llm
    }

    #[test]
    fn test_decode_ignores_unknown_fields() {
        let analysis = decode_analysis(VALID_REPLY).unwrap();
        assert_eq!(analysis.sentiment, Sentiment::Positive);
        assert_eq!(analysis.action_items[0].assignee.as_deref(), Some("박개발"));
        assert_eq!(analysis.action_items[0].deadline, None);
    }

    #[test]
    fn test_decode_rejects_missing_fields_and_bad_sentiment() {
        assert!(decode_analysis(r#"{"summary": "only this"}"#).is_err());
        let bad_sentiment = VALID_REPLY.replace("\"positive\"", "\"ecstatic\"");
        assert!(decode_analysis(&bad_sentiment).is_err());
    }

    #[tokio::test]
    async fn test_analyze_sends_fixed_prompt_pair() {
        let mut llm = MockLlmServicePort::new();
        llm.expect_complete()
            .withf(|req, config| {
                req.system.as_deref() == Some(PromptTemplates::system())
                    && req.prompt.contains("주간 회의 내용")
                    && config.temperature == Some(0.3)
            })
            .times(1)
            .returning(|_, _| Ok(VALID_REPLY.to_string()));

        let result = analyze_transcript(&llm, "주간 회의 내용", &LlmConfig::default())
            .await
            .unwrap();
        assert_eq!(result.summary, "배포 일정을 확정했습니다.");
        assert_eq!(result.participants.len(), 2);
    }

    #[tokio::test]
    async fn test_malformed_reply_falls_back_to_placeholder() {
        let llm = mock_replying("Here is your analysis: summary was good");
        let result = analyze_transcript(&llm, "transcript", &LlmConfig::default())
            .await
            .unwrap();
        assert!(result.summary.starts_with("미팅 분석을 완료했습니다"));
        assert_eq!(result, placeholder_result());
    }

    #[tokio::test]
    async fn test_fenced_json_is_treated_as_malformed() {
        let llm = mock_replying("```json\n{\"summary\": \"x\"}\n```");
        let result = analyze_transcript(&llm, "transcript", &LlmConfig::default())
            .await
            .unwrap();
        assert_eq!(result.sentiment, Sentiment::Neutral);
    }

    #[tokio::test]
    async fn test_empty_reply_is_an_error() {
        let llm = mock_replying("");
        let err = analyze_transcript(&llm, "transcript", &LlmConfig::default())
            .await
            .unwrap_err();
        assert_eq!(err.client_message(), "분석 결과를 받을 수 없습니다.");
    }

    #[tokio::test]
    async fn test_whitespace_reply_falls_back_to_placeholder() {
        let llm = mock_replying("  \n ");
        let result = analyze_transcript(&llm, "transcript", &LlmConfig::default())
            .await
            .unwrap();
        assert_eq!(result, placeholder_result());
    }

    #[tokio::test]
    async fn test_upstream_failure_propagates() {
        let mut llm = MockLlmServicePort::new();
        llm.expect_complete()
            .returning(|_, _| Err(AppError::Llm("Chat completion failed: 429".to_string())));
        let err = analyze_transcript(&llm, "transcript", &LlmConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Llm(_)));
    }
}
