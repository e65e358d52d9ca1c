//! Search and filter over a user's meeting history

use crate::domain::models::{MeetingRecord, Sentiment};
use crate::error::{AppError, Result};

/// Filter applied to a history listing. Empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryFilter {
    /// Lower-cased search term
    term: Option<String>,
    sentiment: Option<Sentiment>,
}

impl HistoryFilter {
    /// Builds a filter from raw query values.
    ///
    /// `sentiment` accepts `all` or one of the sentiment names; blank search
    /// terms are ignored.
    pub fn parse(term: Option<&str>, sentiment: Option<&str>) -> Result<Self> {
        let term = term
            .filter(|t| !t.is_empty())
            .map(|t| t.to_lowercase());

        let sentiment = match sentiment {
            None | Some("") | Some("all") => None,
            Some(s) => Some(s.parse::<Sentiment>().map_err(AppError::InvalidInput)?),
        };

        Ok(Self { term, sentiment })
    }

    pub fn matches(&self, record: &MeetingRecord) -> bool {
        if let Some(sentiment) = self.sentiment {
            if record.sentiment != sentiment {
                return false;
            }
        }

        match &self.term {
            None => true,
            Some(term) => {
                record.title.to_lowercase().contains(term)
                    || record.summary.to_lowercase().contains(term)
                    || record
                        .keywords
                        .iter()
                        .any(|k| k.to_lowercase().contains(term))
            }
        }
    }

    /// Keeps matching records, preserving order
    pub fn apply(&self, records: Vec<MeetingRecord>) -> Vec<MeetingRecord> {
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}
