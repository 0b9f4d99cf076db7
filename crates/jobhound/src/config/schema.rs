use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub profile: ApplicantProfile,
    #[serde(default)]
    pub scoring: ScoringCriteria,
    #[serde(default)]
    pub timing: TimingRules,
    #[serde(default)]
    pub signals: SignalLexicon,
    #[serde(default)]
    pub notify: NotifyRules,
    #[serde(default)]
    pub database: DatabaseSettings,
}

fn default_version() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            profile: ApplicantProfile::default(),
            scoring: ScoringCriteria::default(),
            timing: TimingRules::default(),
            signals: SignalLexicon::default(),
            notify: NotifyRules::default(),
            database: DatabaseSettings::default(),
        }
    }
}

impl Config {
    /// Resolves the database file location: the configured path if set,
    /// otherwise the platform default under the user's home directory,
    /// otherwise a file next to the working directory.
    pub fn database_path(&self) -> PathBuf {
        self.database
            .path
            .clone()
            .or_else(crate::db::default_database_path)
            .unwrap_or_else(|| PathBuf::from("jobhound.db"))
    }
}

/// Applicant identity used to fill drafted replies and submission forms.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApplicantProfile {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringCriteria {
    /// Keywords that penalize a posting when found in title or description.
    #[serde(default = "default_exclude_keywords")]
    pub exclude_keywords: Vec<String>,
    /// Keywords that reward a posting when found in title or description.
    #[serde(default = "default_required_keywords")]
    pub required_keywords: Vec<String>,
    /// Experience levels to reward, each with its detection patterns.
    #[serde(default = "default_experience_levels")]
    pub experience_levels: Vec<ExperienceLevel>,
    /// Minimum acceptable annual salary. `None` disables salary scoring.
    #[serde(default)]
    pub min_salary: Option<u64>,
    /// Jobs scoring below this are dropped at intake.
    #[serde(default = "default_min_score")]
    pub min_score: f64,
    #[serde(default = "default_today_words")]
    pub today_words: Vec<String>,
    #[serde(default = "default_yesterday_words")]
    pub yesterday_words: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceLevel {
    pub level: String,
    pub patterns: Vec<String>,
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn default_exclude_keywords() -> Vec<String> {
    owned(&[
        "senior",
        "lead",
        "manager",
        "director",
        "10+ years",
        "8+ years",
    ])
}

fn default_required_keywords() -> Vec<String> {
    owned(&["python", "javascript", "react", "django", "flask"])
}

fn default_experience_levels() -> Vec<ExperienceLevel> {
    vec![
        ExperienceLevel {
            level: "entry".to_string(),
            patterns: owned(&["entry.?level", "junior", "graduate", "0-2 years", "débutant"]),
        },
        ExperienceLevel {
            level: "junior".to_string(),
            patterns: owned(&["junior", "1-3 years", "2-3 years"]),
        },
        ExperienceLevel {
            level: "mid".to_string(),
            patterns: owned(&["mid.?level", "3-5 years", "intermediate"]),
        },
    ]
}

fn default_min_score() -> f64 {
    40.0
}

fn default_today_words() -> Vec<String> {
    owned(&["today", "aujourd'hui", "just", "hour"])
}

fn default_yesterday_words() -> Vec<String> {
    owned(&["yesterday", "hier", "1 day"])
}

impl Default for ScoringCriteria {
    fn default() -> Self {
        Self {
            exclude_keywords: default_exclude_keywords(),
            required_keywords: default_required_keywords(),
            experience_levels: default_experience_levels(),
            min_salary: None,
            min_score: default_min_score(),
            today_words: default_today_words(),
            yesterday_words: default_yesterday_words(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingRules {
    /// Weekdays considered good for submitting, as lowercase English names.
    #[serde(default = "default_acceptable_weekdays")]
    pub acceptable_weekdays: Vec<String>,
    /// Per-industry local-time submission windows. Keys are industry class
    /// names (`tech`, `finance`, `healthcare`, `retail`, `general`).
    #[serde(default = "default_industry_windows")]
    pub industry_windows: HashMap<String, HourWindow>,
    /// Title keywords used to classify a job into an industry class.
    #[serde(default = "default_industry_keywords")]
    pub industry_keywords: HashMap<String, Vec<String>>,
    /// City name fragments to IANA timezone names, matched against the
    /// job location.
    #[serde(default = "default_city_timezones")]
    pub city_timezones: HashMap<String, String>,
    #[serde(default = "default_country_timezones")]
    pub country_timezones: HashMap<String, String>,
    #[serde(default = "default_timezone")]
    pub default_timezone: String,
    /// An already-optimal instant within this many hours means submit now
    /// instead of queueing.
    #[serde(default = "default_submit_now_within_hours")]
    pub submit_now_within_hours: i64,
    /// Local hour used when the scan horizon finds no in-window instant.
    #[serde(default = "default_fallback_hour")]
    pub fallback_hour: u32,
}

/// Half-open local-hour range: `start_hour <= hour < end_hour`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourWindow {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl HourWindow {
    pub fn contains(&self, hour: u32) -> bool {
        self.start_hour <= hour && hour < self.end_hour
    }
}

fn default_acceptable_weekdays() -> Vec<String> {
    owned(&["tuesday", "wednesday", "thursday"])
}

fn default_industry_windows() -> HashMap<String, HourWindow> {
    HashMap::from([
        (
            "tech".to_string(),
            HourWindow {
                start_hour: 8,
                end_hour: 11,
            },
        ),
        (
            "finance".to_string(),
            HourWindow {
                start_hour: 9,
                end_hour: 12,
            },
        ),
        (
            "healthcare".to_string(),
            HourWindow {
                start_hour: 7,
                end_hour: 10,
            },
        ),
        (
            "retail".to_string(),
            HourWindow {
                start_hour: 10,
                end_hour: 13,
            },
        ),
        (
            "general".to_string(),
            HourWindow {
                start_hour: 8,
                end_hour: 11,
            },
        ),
    ])
}

fn default_industry_keywords() -> HashMap<String, Vec<String>> {
    HashMap::from([
        (
            "tech".to_string(),
            owned(&[
                "developer",
                "engineer",
                "programmer",
                "software",
                "data",
                "devops",
                "cloud",
                "python",
                "java",
                "tech",
            ]),
        ),
        (
            "finance".to_string(),
            owned(&[
                "analyst",
                "finance",
                "banking",
                "investment",
                "accountant",
                "financial",
            ]),
        ),
        (
            "healthcare".to_string(),
            owned(&[
                "nurse",
                "doctor",
                "medical",
                "healthcare",
                "clinical",
                "physician",
            ]),
        ),
        (
            "retail".to_string(),
            owned(&["retail", "sales", "store", "customer service"]),
        ),
    ])
}

fn default_city_timezones() -> HashMap<String, String> {
    HashMap::from([
        ("paris".to_string(), "Europe/Paris".to_string()),
        ("london".to_string(), "Europe/London".to_string()),
        ("new york".to_string(), "America/New_York".to_string()),
        (
            "san francisco".to_string(),
            "America/Los_Angeles".to_string(),
        ),
        ("berlin".to_string(), "Europe/Berlin".to_string()),
        ("tokyo".to_string(), "Asia/Tokyo".to_string()),
        ("sydney".to_string(), "Australia/Sydney".to_string()),
    ])
}

fn default_country_timezones() -> HashMap<String, String> {
    HashMap::from([
        ("france".to_string(), "Europe/Paris".to_string()),
        ("uk".to_string(), "Europe/London".to_string()),
        ("united kingdom".to_string(), "Europe/London".to_string()),
        ("germany".to_string(), "Europe/Berlin".to_string()),
        ("usa".to_string(), "America/New_York".to_string()),
        ("united states".to_string(), "America/New_York".to_string()),
    ])
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_submit_now_within_hours() -> i64 {
    2
}

fn default_fallback_hour() -> u32 {
    9
}

impl Default for TimingRules {
    fn default() -> Self {
        Self {
            acceptable_weekdays: default_acceptable_weekdays(),
            industry_windows: default_industry_windows(),
            industry_keywords: default_industry_keywords(),
            city_timezones: default_city_timezones(),
            country_timezones: default_country_timezones(),
            default_timezone: default_timezone(),
            submit_now_within_hours: default_submit_now_within_hours(),
            fallback_hour: default_fallback_hour(),
        }
    }
}

/// Term lists driving correspondence classification. Matching is plain
/// lowercase substring containment, so terms should be lowercase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalLexicon {
    #[serde(default = "default_positive_signals")]
    pub positive: Vec<String>,
    #[serde(default = "default_negative_signals")]
    pub negative: Vec<String>,
    #[serde(default = "default_info_request_signals")]
    pub info_request: Vec<String>,
    /// Subset of positive terms that indicate concrete interview scheduling.
    #[serde(default = "default_scheduling_signals")]
    pub scheduling: Vec<String>,
}

fn default_positive_signals() -> Vec<String> {
    owned(&[
        "intéressé",
        "intéressée",
        "intéressant",
        "souhaitez-vous",
        "disponible",
        "entretien",
        "rencontrer",
        "convoquer",
        "disponibilité",
        "parler",
        "téléphone",
        "appel",
        "zoom",
        "teams",
        "meet",
        "visio",
        "expérience",
        "cv",
        "curriculum vitae",
        "parcours",
        "poste",
        "mission",
        "profil",
        "candidature",
    ])
}

fn default_negative_signals() -> Vec<String> {
    owned(&[
        "ne correspond pas",
        "pas retenu",
        "pas sélectionné",
        "malheureusement",
        "candidature retenue",
        "poste pourvu",
        "plus avancer",
        "pas le profil",
        "pas d'opportunité",
        "pas d'ouverture",
        "pas de poste",
        "rester en contact",
        "prochaine opportunité",
        "candidature future",
        "refus",
        "refuser",
        "décliné",
        "décliner",
        "refusé",
    ])
}

fn default_info_request_signals() -> Vec<String> {
    owned(&[
        "plus d'information",
        "plus de détails",
        "précision",
        "préciser",
        "questions",
        "renseignement",
        "savoir plus",
        "en savoir plus",
        "disponible",
        "expérience",
        "compétence",
        "formation",
        "diplôme",
        "rémunération",
        "salaire",
        "prétention salariale",
        "prétention",
        "début",
        "disponibilité",
        "mobile",
        "télétravail",
        "présentiel",
        "permis",
        "véhicule",
        "déplacement",
        "mobilité",
    ])
}

fn default_scheduling_signals() -> Vec<String> {
    owned(&["entretien", "rencontre", "rencontrer", "disponible"])
}

impl Default for SignalLexicon {
    fn default() -> Self {
        Self {
            positive: default_positive_signals(),
            negative: default_negative_signals(),
            info_request: default_info_request_signals(),
            scheduling: default_scheduling_signals(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyRules {
    /// Scores at or above this raise a high-score notification.
    #[serde(default = "default_high_score_threshold")]
    pub high_score_threshold: f64,
}

fn default_high_score_threshold() -> f64 {
    70.0
}

impl Default for NotifyRules {
    fn default() -> Self {
        Self {
            high_score_threshold: default_high_score_threshold(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// Database file location. `None` means the platform default under the
    /// user's home directory.
    #[serde(default)]
    pub path: Option<PathBuf>,
}
