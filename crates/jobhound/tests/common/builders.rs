//! Builder patterns for creating test data programmatically.
//!
//! These builders allow creating postings, inbound messages and configs
//! without repetitive struct literal boilerplate.

#![allow(dead_code)]

use chrono::{DateTime, Utc};

use jobhound::config::schema::{
    ApplicantProfile, Config, DatabaseSettings, NotifyRules, ScoringCriteria, SignalLexicon,
    TimingRules,
};
use jobhound::job::RawPosting;
use jobhound::pipeline::{DiscoveryBatch, InboundMessage};

/// Builder for creating `RawPosting` instances.
pub struct PostingBuilder {
    job_id: String,
    title: String,
    company: String,
    location: String,
    salary: String,
    description: String,
    url: String,
    source: String,
    posted_date: String,
    easy_apply: bool,
}

impl PostingBuilder {
    /// Create a new posting builder with the given id and title.
    pub fn new(job_id: &str, title: &str) -> Self {
        Self {
            job_id: job_id.to_string(),
            title: title.to_string(),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            salary: String::new(),
            description: String::new(),
            url: format!("https://example.com/jobs/{}", job_id),
            source: "linkedin".to_string(),
            posted_date: String::new(),
            easy_apply: false,
        }
    }

    /// Set the company name.
    pub fn company(mut self, company: &str) -> Self {
        self.company = company.to_string();
        self
    }

    /// Set the location string.
    pub fn location(mut self, location: &str) -> Self {
        self.location = location.to_string();
        self
    }

    /// Set the raw salary text.
    pub fn salary(mut self, salary: &str) -> Self {
        self.salary = salary.to_string();
        self
    }

    /// Set the description text.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Set the posting URL.
    pub fn url(mut self, url: &str) -> Self {
        self.url = url.to_string();
        self
    }

    /// Set the source adapter name.
    pub fn source(mut self, source: &str) -> Self {
        self.source = source.to_string();
        self
    }

    /// Set the raw posted-date text.
    pub fn posted(mut self, posted_date: &str) -> Self {
        self.posted_date = posted_date.to_string();
        self
    }

    /// Mark the posting as one-click submittable.
    pub fn easy_apply(mut self, easy_apply: bool) -> Self {
        self.easy_apply = easy_apply;
        self
    }

    /// Build the final RawPosting.
    pub fn build(self) -> RawPosting {
        RawPosting {
            job_id: Some(self.job_id),
            title: self.title,
            company: self.company,
            location: self.location,
            salary: self.salary,
            description: self.description,
            url: self.url,
            source: self.source,
            posted_date: self.posted_date,
            easy_apply: self.easy_apply,
        }
    }
}

/// Builder for creating `InboundMessage` instances.
pub struct MessageBuilder {
    sender_address: String,
    subject: String,
    body: String,
    received_at: DateTime<Utc>,
}

impl MessageBuilder {
    /// Create a new message builder with the given subject.
    pub fn new(subject: &str) -> Self {
        Self {
            sender_address: "recruiter@example.com".to_string(),
            subject: subject.to_string(),
            body: String::new(),
            received_at: Utc::now(),
        }
    }

    /// Set the sender address.
    pub fn from_address(mut self, address: &str) -> Self {
        self.sender_address = address.to_string();
        self
    }

    /// Set the message body.
    pub fn body(mut self, body: &str) -> Self {
        self.body = body.to_string();
        self
    }

    /// Set the reception instant.
    pub fn received_at(mut self, received_at: DateTime<Utc>) -> Self {
        self.received_at = received_at;
        self
    }

    /// Build the final InboundMessage.
    pub fn build(self) -> InboundMessage {
        InboundMessage {
            sender_address: self.sender_address,
            subject: self.subject,
            body: self.body,
            received_at: self.received_at,
        }
    }
}

/// Builder for creating `Config` instances.
pub struct ConfigBuilder {
    profile: ApplicantProfile,
    scoring: ScoringCriteria,
    timing: TimingRules,
    signals: SignalLexicon,
    notify: NotifyRules,
    database: DatabaseSettings,
}

impl ConfigBuilder {
    /// Create a new builder seeded with the crate defaults.
    pub fn new() -> Self {
        Self {
            profile: ApplicantProfile::default(),
            scoring: ScoringCriteria::default(),
            timing: TimingRules::default(),
            signals: SignalLexicon::default(),
            notify: NotifyRules::default(),
            database: DatabaseSettings::default(),
        }
    }

    /// Set the applicant profile.
    pub fn profile(mut self, profile: ApplicantProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Set the minimum acceptable annual salary.
    pub fn min_salary(mut self, salary: u64) -> Self {
        self.scoring.min_salary = Some(salary);
        self
    }

    /// Set the score floor below which postings are dropped at intake.
    pub fn min_score(mut self, score: f64) -> Self {
        self.scoring.min_score = score;
        self
    }

    /// Add an exclude keyword.
    pub fn exclude_keyword(mut self, keyword: &str) -> Self {
        self.scoring.exclude_keywords.push(keyword.to_string());
        self
    }

    /// Add a required keyword.
    pub fn required_keyword(mut self, keyword: &str) -> Self {
        self.scoring.required_keywords.push(keyword.to_string());
        self
    }

    /// Set the notification threshold for high-scoring matches.
    pub fn high_score_threshold(mut self, threshold: f64) -> Self {
        self.notify.high_score_threshold = threshold;
        self
    }

    /// Replace the acceptable submission weekdays.
    pub fn acceptable_weekdays(mut self, days: Vec<&str>) -> Self {
        self.timing.acceptable_weekdays = days.into_iter().map(|d| d.to_string()).collect();
        self
    }

    /// Set how close an optimal instant must be to submit immediately.
    pub fn submit_now_within_hours(mut self, hours: i64) -> Self {
        self.timing.submit_now_within_hours = hours;
        self
    }

    /// Set the fallback timezone for unrecognized locations.
    pub fn default_timezone(mut self, timezone: &str) -> Self {
        self.timing.default_timezone = timezone.to_string();
        self
    }

    /// Build the final Config.
    pub fn build(self) -> Config {
        Config {
            version: 1,
            profile: self.profile,
            scoring: self.scoring,
            timing: self.timing,
            signals: self.signals,
            notify: self.notify,
            database: self.database,
        }
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a discovery batch with routine search metadata.
pub fn batch_of(postings: Vec<RawPosting>) -> DiscoveryBatch {
    DiscoveryBatch {
        keywords: "python developer".to_string(),
        location: "Remote".to_string(),
        source: "linkedin".to_string(),
        postings,
    }
}

/// An applicant profile with every contact field filled in.
pub fn applicant() -> ApplicantProfile {
    ApplicantProfile {
        first_name: "Jean".to_string(),
        last_name: "Dupont".to_string(),
        email: "jean.dupont@example.com".to_string(),
        phone: "+33 6 12 34 56 78".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_posting_builder_defaults() {
        let posting = PostingBuilder::new("job-1", "Python Developer").build();

        assert_eq!(posting.job_id.as_deref(), Some("job-1"));
        assert_eq!(posting.title, "Python Developer");
        assert_eq!(posting.company, "Acme");
        assert!(!posting.easy_apply);
        assert_eq!(posting.resolved_job_id(), "job-1");
    }

    #[test]
    fn test_posting_builder_overrides() {
        let posting = PostingBuilder::new("job-2", "Nurse")
            .company("City Hospital")
            .location("Paris, France")
            .salary("45 000 € par an")
            .easy_apply(true)
            .build();

        assert_eq!(posting.company, "City Hospital");
        assert_eq!(posting.location, "Paris, France");
        assert!(posting.easy_apply);
    }

    #[test]
    fn test_config_builder_defaults_match_crate_defaults() {
        let config = ConfigBuilder::new().build();

        assert_eq!(config.version, 1);
        assert_eq!(config.scoring.min_score, 40.0);
        assert_eq!(config.notify.high_score_threshold, 70.0);
        assert!(config.scoring.min_salary.is_none());
    }

    #[test]
    fn test_config_builder_scoring_overrides() {
        let config = ConfigBuilder::new()
            .min_salary(45_000)
            .min_score(55.0)
            .exclude_keyword("contract")
            .build();

        assert_eq!(config.scoring.min_salary, Some(45_000));
        assert_eq!(config.scoring.min_score, 55.0);
        assert!(config.scoring.exclude_keywords.contains(&"contract".to_string()));
    }
}
