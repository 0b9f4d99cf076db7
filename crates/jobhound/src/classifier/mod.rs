//! Correspondence triage — classifies recruiter replies by lexicon
//! signal counts and drafts a response.
//!
//! Matching is plain substring containment over the lowercased message,
//! counting each term once. The counts feed an ordered rule table; the
//! first rule that accepts wins.

pub mod reply;

use serde::{Deserialize, Serialize};

use crate::config::SignalLexicon;
pub use reply::ReplyContext;

/// Distinct lexicon terms found in a message, one counter per group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SignalTally {
    pub positive: usize,
    pub negative: usize,
    pub info: usize,
    pub scheduling: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseCategory {
    InterviewRequest,
    FollowUp,
    Rejection,
    InformationRequest,
    Unknown,
}

impl ResponseCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ResponseCategory::InterviewRequest => "interview_request",
            ResponseCategory::FollowUp => "follow_up",
            ResponseCategory::Rejection => "rejection",
            ResponseCategory::InformationRequest => "information_request",
            ResponseCategory::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ResponseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

struct DecisionRule {
    category: ResponseCategory,
    confidence: f64,
    applies: fn(&SignalTally) -> bool,
}

fn wants_interview(tally: &SignalTally) -> bool {
    tally.positive > 0 && tally.positive > tally.negative && tally.scheduling > 0
}

fn is_positive(tally: &SignalTally) -> bool {
    tally.positive > 0 && tally.positive > tally.negative
}

fn is_rejection(tally: &SignalTally) -> bool {
    tally.negative > 0
}

fn requests_information(tally: &SignalTally) -> bool {
    tally.info > 2
}

/// Priority-ordered: a scheduling signal on top of a positive balance
/// outranks a plain positive reply, and any negative signal only counts
/// once the positive rules have passed on the message.
const DECISION_RULES: [DecisionRule; 4] = [
    DecisionRule {
        category: ResponseCategory::InterviewRequest,
        confidence: 0.9,
        applies: wants_interview,
    },
    DecisionRule {
        category: ResponseCategory::FollowUp,
        confidence: 0.8,
        applies: is_positive,
    },
    DecisionRule {
        category: ResponseCategory::Rejection,
        confidence: 0.85,
        applies: is_rejection,
    },
    DecisionRule {
        category: ResponseCategory::InformationRequest,
        confidence: 0.9,
        applies: requests_information,
    },
];

const UNKNOWN_CONFIDENCE: f64 = 0.5;

/// Classification outcome with suggested actions and a ready-to-edit
/// reply draft.
#[derive(Debug, Clone, Serialize)]
pub struct Classification {
    pub category: ResponseCategory,
    pub confidence: f64,
    pub next_steps: Vec<String>,
    pub drafted_reply: String,
}

/// Classifies recruiter messages against a [`SignalLexicon`].
pub struct ResponseClassifier {
    signals: SignalLexicon,
}

impl ResponseClassifier {
    pub fn new(signals: SignalLexicon) -> Self {
        Self { signals }
    }

    /// Counts distinct matched terms per signal group.
    pub fn tally(&self, text: &str) -> SignalTally {
        let text = text.to_lowercase();
        SignalTally {
            positive: count_matches(&self.signals.positive, &text),
            negative: count_matches(&self.signals.negative, &text),
            info: count_matches(&self.signals.info_request, &text),
            scheduling: count_matches(&self.signals.scheduling, &text),
        }
    }

    /// Category and confidence only, without drafting a reply.
    pub fn categorize(&self, text: &str) -> (ResponseCategory, f64) {
        let tally = self.tally(text);
        for rule in &DECISION_RULES {
            if (rule.applies)(&tally) {
                return (rule.category, rule.confidence);
            }
        }
        (ResponseCategory::Unknown, UNKNOWN_CONFIDENCE)
    }

    /// Full classification: category, confidence, follow-up actions and
    /// a drafted reply for the given job context.
    pub fn classify(&self, text: &str, ctx: &ReplyContext) -> Classification {
        let (category, confidence) = self.categorize(text);
        log::debug!(
            "Classified message for '{}' as {} ({:.2})",
            ctx.job_title,
            category,
            confidence
        );
        Classification {
            category,
            confidence,
            next_steps: reply::next_steps(category),
            drafted_reply: reply::render_reply(category, ctx),
        }
    }
}

fn count_matches(terms: &[String], text: &str) -> usize {
    terms
        .iter()
        .filter(|term| text.contains(&term.to_lowercase()))
        .count()
}
