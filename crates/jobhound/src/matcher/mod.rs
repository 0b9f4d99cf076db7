//! Match scoring — ranks postings against the configured search criteria.
//!
//! Scoring is additive from a fixed base, with keyword penalties and
//! rewards, experience level detection, salary comparison and recency
//! bonuses, clamped to 0..=100 at the end.

pub mod salary;

use std::cmp::Ordering;

use regex::Regex;

use crate::config::ScoringCriteria;
use crate::job::Job;

const BASE_SCORE: f64 = 50.0;
const EXCLUDE_PENALTY: f64 = 30.0;
const REQUIRED_REWARD: f64 = 15.0;
const BREADTH_THRESHOLD: usize = 3;
const BREADTH_BONUS: f64 = 10.0;
const EXPERIENCE_REWARD: f64 = 10.0;
const SALARY_REWARD: f64 = 15.0;
const SALARY_PENALTY: f64 = 20.0;
const LOW_SALARY_RATIO: f64 = 0.8;
const EASY_APPLY_BONUS: f64 = 5.0;
const TODAY_BONUS: f64 = 10.0;
const YESTERDAY_BONUS: f64 = 5.0;

/// Per-step account of how a job's score came to be.
///
/// `raw_total` is the pre-clamp sum; heavy exclude penalties can push it
/// negative, and `matched_excludes` tells you when a 0 or 100 hides
/// saturated detail.
#[derive(Debug, Clone)]
pub struct ScoreBreakdown {
    pub matched_excludes: Vec<String>,
    pub matched_required: Vec<String>,
    pub required_bonus: bool,
    pub matched_levels: Vec<String>,
    pub salary_adjustment: f64,
    pub easy_apply_bonus: f64,
    pub recency_bonus: f64,
    pub raw_total: f64,
    pub final_score: f64,
}

/// Scores jobs against [`ScoringCriteria`]. Experience patterns are
/// compiled once at construction; invalid ones are skipped with a warning
/// (config validation normally rejects them earlier).
pub struct MatchScorer {
    criteria: ScoringCriteria,
    experience_patterns: Vec<(String, Vec<Regex>)>,
}

impl MatchScorer {
    pub fn new(criteria: ScoringCriteria) -> Self {
        let mut experience_patterns = Vec::new();
        for level in &criteria.experience_levels {
            let mut compiled = Vec::new();
            for pattern in &level.patterns {
                if let Ok(regex) = Regex::new(pattern) {
                    compiled.push(regex);
                } else {
                    log::warn!(
                        "Skipping invalid pattern '{}' for experience level '{}'",
                        pattern,
                        level.level
                    );
                }
            }
            experience_patterns.push((level.level.clone(), compiled));
        }

        Self {
            criteria,
            experience_patterns,
        }
    }

    /// Scores a job in 0..=100.
    pub fn score(&self, job: &Job) -> f64 {
        self.explain(job).final_score
    }

    /// Scores a job, keeping every intermediate step.
    pub fn explain(&self, job: &Job) -> ScoreBreakdown {
        let text = format!("{} {}", job.title, job.description).to_lowercase();
        let mut score = BASE_SCORE;

        // Exclude keywords compound: a posting hitting several sinks fast.
        let mut matched_excludes = Vec::new();
        for keyword in &self.criteria.exclude_keywords {
            if text.contains(&keyword.to_lowercase()) {
                matched_excludes.push(keyword.clone());
                score -= EXCLUDE_PENALTY;
            }
        }

        let mut matched_required = Vec::new();
        for keyword in &self.criteria.required_keywords {
            if text.contains(&keyword.to_lowercase()) {
                matched_required.push(keyword.clone());
                score += REQUIRED_REWARD;
            }
        }
        let required_bonus = matched_required.len() >= BREADTH_THRESHOLD;
        if required_bonus {
            score += BREADTH_BONUS;
        }

        let mut matched_levels = Vec::new();
        for (level, patterns) in &self.experience_patterns {
            if patterns.iter().any(|regex| regex.is_match(&text)) {
                matched_levels.push(level.clone());
                score += EXPERIENCE_REWARD;
            }
        }

        let salary_adjustment = self.salary_adjustment(job);
        score += salary_adjustment;

        let easy_apply_bonus = if job.easy_apply { EASY_APPLY_BONUS } else { 0.0 };
        score += easy_apply_bonus;

        let recency_bonus = self.recency_bonus(job);
        score += recency_bonus;

        ScoreBreakdown {
            matched_excludes,
            matched_required,
            required_bonus,
            matched_levels,
            salary_adjustment,
            easy_apply_bonus,
            recency_bonus,
            raw_total: score,
            final_score: score.clamp(0.0, 100.0),
        }
    }

    /// Scores a batch, drops jobs below `min_score` and returns the rest
    /// best first, with `match_score` filled in.
    pub fn filter(&self, jobs: Vec<Job>, min_score: f64) -> Vec<Job> {
        let mut matched: Vec<Job> = jobs
            .into_iter()
            .map(|mut job| {
                job.match_score = self.score(&job);
                job
            })
            .filter(|job| job.match_score >= min_score)
            .collect();

        matched.sort_by(|a, b| {
            b.match_score
                .partial_cmp(&a.match_score)
                .unwrap_or(Ordering::Equal)
        });
        matched
    }

    fn salary_adjustment(&self, job: &Job) -> f64 {
        // Missing expectations or missing posting salary: no opinion.
        let min_salary = match self.criteria.min_salary {
            Some(min) if !job.salary.is_empty() => min,
            _ => return 0.0,
        };

        match salary::parse_salary(&job.salary) {
            Some(amount) if amount >= min_salary => SALARY_REWARD,
            Some(amount) if (amount as f64) < (min_salary as f64) * LOW_SALARY_RATIO => {
                -SALARY_PENALTY
            }
            // Between the floor and the minimum, or unparseable.
            _ => 0.0,
        }
    }

    fn recency_bonus(&self, job: &Job) -> f64 {
        let posted = job.posted_date.to_lowercase();
        if posted.is_empty() {
            return 0.0;
        }
        if self
            .criteria
            .today_words
            .iter()
            .any(|word| posted.contains(&word.to_lowercase()))
        {
            TODAY_BONUS
        } else if self
            .criteria
            .yesterday_words
            .iter()
            .any(|word| posted.contains(&word.to_lowercase()))
        {
            YESTERDAY_BONUS
        } else {
            0.0
        }
    }
}
