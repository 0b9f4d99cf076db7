pub mod loader;
pub mod schema;

pub use loader::{config_file_path, load_config, load_config_from_str};
pub use schema::{
    ApplicantProfile, Config, DatabaseSettings, ExperienceLevel, HourWindow, NotifyRules,
    ScoringCriteria, SignalLexicon, TimingRules,
};
