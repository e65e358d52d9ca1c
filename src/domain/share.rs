//! Shared meeting lookup
//!
//! Share tokens are not backed by storage yet: every token resolves to the
//! same demonstration meeting.

use crate::domain::models::{ActionItem, AnalysisResult, Sentiment, SharedMeeting};
use chrono::{TimeZone, Utc};

fn action(task: &str, assignee: &str, deadline: &str) -> ActionItem {
    ActionItem {
        task: task.to_string(),
        assignee: Some(assignee.to_string()),
        deadline: Some(deadline.to_string()),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Demonstration meeting served for every share token
pub fn demo_meeting() -> SharedMeeting {
    SharedMeeting {
        title: "제품 기획 미팅 - 새로운 기능 논의".to_string(),
        analysis: AnalysisResult {
            summary: "새로운 사용자 대시보드 기능에 대한 기획 미팅을 진행했습니다. 사용자 경험 개선과 데이터 시각화 방안을 중점적으로 논의했으며, 개발 일정과 우선순위를 결정했습니다.".to_string(),
            key_points: strings(&[
                "사용자 대시보드 UI/UX 개선 방안 논의",
                "데이터 시각화 라이브러리 선정 (Chart.js vs D3.js)",
                "모바일 반응형 디자인 우선 적용",
                "사용자 피드백 수집을 위한 베타 테스트 계획",
            ]),
            action_items: vec![
                action("UI 목업 및 와이어프레임 제작", "김디자인", "2024년 1월 25일"),
                action("기술 스택 조사 및 비교 분석", "박개발", "2024년 1월 22일"),
                action("베타 테스터 모집 및 일정 조율", "이기획", "2024년 1월 30일"),
            ],
            participants: strings(&["김기획", "박개발", "이디자인", "최마케팅"]),
            keywords: strings(&["대시보드", "UI/UX", "데이터시각화", "모바일", "베타테스트"]),
            sentiment: Sentiment::Positive,
            next_steps: "다음 주 화요일 오후 2시에 UI 목업 리뷰 미팅을 진행하고, 기술 스택 결정을 위한 추가 논의를 진행할 예정입니다.".to_string(),
            shareable_text: "제품 기획 미팅 완료! 사용자 대시보드 개선 방안을 논의했습니다.".to_string(),
        },
        created_at: Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).single().unwrap_or_default(),
    }
}

/// Resolves a share token
pub fn lookup(_token: &str) -> SharedMeeting {
    demo_meeting()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_token_resolves_to_demo() {
        let a = lookup("demo-1700000000000");
        let b = lookup("anything");
        assert_eq!(a.title, b.title);
        assert_eq!(a.analysis.action_items.len(), 3);
    }

    #[test]
    fn test_blank_token_resolves_to_demo() {
        assert_eq!(lookup(" ").title, demo_meeting().title);
    }
}
