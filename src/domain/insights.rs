//! Personal insights over a user's saved meetings
//!
//! Everything here is a pure function of the record collection; nothing is
//! cached between calls.

use crate::domain::models::{MeetingRecord, Sentiment};
use chrono::{DateTime, Datelike, FixedOffset, Utc, Weekday};
use serde::Serialize;
use std::collections::HashMap;

/// Assumed length of one meeting, in hours
pub const HOURS_PER_MEETING: f64 = 1.5;

const TOP_KEYWORD_LIMIT: usize = 5;
const SENTIMENT_TREND_LEN: usize = 7;
const FEW_MEETINGS_THRESHOLD: usize = 5;
const LOW_PRODUCTIVITY: u32 = 60;
const HIGH_PRODUCTIVITY: u32 = 80;

pub const REC_MORE_DATA: &str = "더 많은 미팅을 분석하여 개인 맞춤형 인사이트를 받아보세요.";
pub const REC_BETTER_PREP: &str =
    "미팅의 긍정적인 결과를 높이기 위해 사전 준비와 명확한 목표 설정을 권장합니다.";
pub const REC_SHARE_PATTERN: &str =
    "높은 미팅 만족도를 유지하고 계시네요! 이 패턴을 다른 팀원들과 공유해보세요.";
pub const REC_DEV: &str = "개발 관련 논의가 많습니다. 기술 문서화와 진행 상황 추적을 강화해보세요.";
pub const REC_MARKETING: &str =
    "마케팅 전략 논의가 활발합니다. 시장 데이터와 KPI 추적을 체계화해보세요.";
pub const REC_RETROSPECTIVE: &str = "정기적인 회고를 통해 미팅의 효율성을 더욱 높여보세요.";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct KeywordFrequency {
    pub keyword: String,
    pub frequency: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SentimentPoint {
    pub date: DateTime<Utc>,
    pub sentiment: Sentiment,
}

/// Aggregate statistics over one user's records
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InsightSummary {
    pub total_meetings: usize,
    pub total_hours: f64,
    pub average_participants: f64,
    pub most_active_day: String,
    pub top_keywords: Vec<KeywordFrequency>,
    pub sentiment_trend: Vec<SentimentPoint>,
    pub productivity_score: u32,
    pub recommendations: Vec<String>,
}

/// Either an explicit "no data" marker or a computed summary
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", content = "insights", rename_all = "snake_case")]
pub enum InsightReport {
    NoData,
    Ready(InsightSummary),
}

/// Weekday name as rendered by the ko-KR locale
pub fn korean_weekday(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "월요일",
        Weekday::Tue => "화요일",
        Weekday::Wed => "수요일",
        Weekday::Thu => "목요일",
        Weekday::Fri => "금요일",
        Weekday::Sat => "토요일",
        Weekday::Sun => "일요일",
    }
}

/// Counts items preserving first-seen order, then sorts by count descending.
/// The sort is stable so equal counts keep first-seen order.
fn ranked_counts<T, I>(items: I) -> Vec<(T, usize)>
where
    T: Eq + std::hash::Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut index: HashMap<T, usize> = HashMap::new();
    let mut counts: Vec<(T, usize)> = Vec::new();
    for item in items {
        match index.get(&item) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(item.clone(), counts.len());
                counts.push((item, 1));
            }
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// `round(100 * positive / total)` with halves rounded up; `total` must be non-zero
fn percentage(positive: usize, total: usize) -> u32 {
    ((200 * positive + total) / (2 * total)) as u32
}

/// Canned recommendations, evaluated in a fixed order
pub fn recommendations(
    total_meetings: usize,
    top_keywords: &[KeywordFrequency],
    productivity_score: u32,
) -> Vec<String> {
    let mut recs = Vec::new();

    if total_meetings < FEW_MEETINGS_THRESHOLD {
        recs.push(REC_MORE_DATA.to_string());
    }

    if productivity_score < LOW_PRODUCTIVITY {
        recs.push(REC_BETTER_PREP.to_string());
    } else if productivity_score > HIGH_PRODUCTIVITY {
        recs.push(REC_SHARE_PATTERN.to_string());
    }

    if top_keywords.iter().any(|k| k.keyword.contains("개발")) {
        recs.push(REC_DEV.to_string());
    }
    if top_keywords.iter().any(|k| k.keyword.contains("마케팅")) {
        recs.push(REC_MARKETING.to_string());
    }

    if recs.is_empty() {
        recs.push(REC_RETROSPECTIVE.to_string());
    }
    recs
}

/// Computes the insight report for records in store order.
///
/// Weekdays are taken in `offset`, the timezone the user sees meetings in.
pub fn summarize(records: &[MeetingRecord], offset: &FixedOffset) -> InsightReport {
    if records.is_empty() {
        return InsightReport::NoData;
    }

    let total_meetings = records.len();
    let participant_sum: u64 = records.iter().map(|r| r.participant_count as u64).sum();
    let average_participants = participant_sum as f64 / total_meetings as f64;

    let most_active_day = ranked_counts(
        records
            .iter()
            .map(|r| r.created_at.with_timezone(offset).weekday()),
    )
    .first()
    .map(|(day, _)| korean_weekday(*day))
    .unwrap_or(korean_weekday(Weekday::Mon))
    .to_string();

    let top_keywords: Vec<KeywordFrequency> =
        ranked_counts(records.iter().flat_map(|r| r.keywords.iter().cloned()))
            .into_iter()
            .take(TOP_KEYWORD_LIMIT)
            .map(|(keyword, frequency)| KeywordFrequency { keyword, frequency })
            .collect();

    let sentiment_trend = records[total_meetings.saturating_sub(SENTIMENT_TREND_LEN)..]
        .iter()
        .map(|r| SentimentPoint {
            date: r.created_at,
            sentiment: r.sentiment,
        })
        .collect();

    let positive = records
        .iter()
        .filter(|r| r.sentiment == Sentiment::Positive)
        .count();
    let productivity_score = percentage(positive, total_meetings);

    let recommendations = recommendations(total_meetings, &top_keywords, productivity_score);

    InsightReport::Ready(InsightSummary {
        total_meetings,
        total_hours: total_meetings as f64 * HOURS_PER_MEETING,
        average_participants,
        most_active_day,
        top_keywords,
        sentiment_trend,
        productivity_score,
        recommendations,
    })
}
