//! Submission timing — picks the next good instant to send an application.
//!
//! Recruiters screen at predictable local hours, so the timer classifies a
//! job into an industry, resolves the company's timezone from the location
//! text and scans forward hour by hour for the next acceptable weekday
//! whose local hour falls inside the industry window.

use chrono::{DateTime, Datelike, Duration, NaiveTime, TimeZone, Timelike, Utc, Weekday};
use chrono_tz::Tz;

use crate::config::{HourWindow, TimingRules};
use crate::job::Job;

/// Industry classes with distinct screening windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndustryClass {
    Tech,
    Finance,
    Healthcare,
    Retail,
    General,
}

impl IndustryClass {
    /// Probe order for title classification. `General` is the fallback,
    /// never probed.
    const PROBED: [IndustryClass; 4] = [
        IndustryClass::Tech,
        IndustryClass::Finance,
        IndustryClass::Healthcare,
        IndustryClass::Retail,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            IndustryClass::Tech => "tech",
            IndustryClass::Finance => "finance",
            IndustryClass::Healthcare => "healthcare",
            IndustryClass::Retail => "retail",
            IndustryClass::General => "general",
        }
    }

    pub fn parse(value: &str) -> Option<IndustryClass> {
        match value {
            "tech" => Some(IndustryClass::Tech),
            "finance" => Some(IndustryClass::Finance),
            "healthcare" => Some(IndustryClass::Healthcare),
            "retail" => Some(IndustryClass::Retail),
            "general" => Some(IndustryClass::General),
            _ => None,
        }
    }
}

impl std::fmt::Display for IndustryClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

const DEFAULT_WINDOW: HourWindow = HourWindow {
    start_hour: 8,
    end_hour: 11,
};

/// Hours scanned before giving up on the hourly walk. One full week
/// covers every recurring weekday/window combination.
const SCAN_HOURS: i64 = 168;

/// Computes submission instants from [`TimingRules`]. Weekdays and
/// timezones are resolved once at construction; entries that fail to
/// parse are skipped with a warning.
pub struct SubmissionTimer {
    rules: TimingRules,
    weekdays: Vec<Weekday>,
    city_zones: Vec<(String, Tz)>,
    country_zones: Vec<(String, Tz)>,
    default_zone: Tz,
}

impl SubmissionTimer {
    pub fn new(rules: TimingRules) -> Self {
        let mut weekdays = Vec::new();
        for day in &rules.acceptable_weekdays {
            match day.parse::<Weekday>() {
                Ok(weekday) => weekdays.push(weekday),
                Err(_) => log::warn!("Skipping unknown weekday '{}' in timing rules", day),
            }
        }

        let city_zones = resolve_zones(&rules.city_timezones);
        let country_zones = resolve_zones(&rules.country_timezones);

        let default_zone = match rules.default_timezone.parse::<Tz>() {
            Ok(zone) => zone,
            Err(_) => {
                log::warn!(
                    "Unknown default timezone '{}', falling back to UTC",
                    rules.default_timezone
                );
                Tz::UTC
            }
        };

        Self {
            rules,
            weekdays,
            city_zones,
            country_zones,
            default_zone,
        }
    }

    /// Classifies a job title into an industry by keyword lookup.
    pub fn infer_industry(&self, title: &str) -> IndustryClass {
        let title = title.to_lowercase();
        for class in IndustryClass::PROBED {
            if let Some(keywords) = self.rules.industry_keywords.get(class.as_str()) {
                if keywords
                    .iter()
                    .any(|keyword| title.contains(&keyword.to_lowercase()))
                {
                    return class;
                }
            }
        }
        IndustryClass::General
    }

    /// Resolves the company timezone from free-text location. Cities are
    /// checked before countries, most specific name first.
    pub fn infer_timezone(&self, location: &str) -> Tz {
        let location = location.to_lowercase();
        for (name, zone) in self.city_zones.iter().chain(self.country_zones.iter()) {
            if location.contains(name.as_str()) {
                return *zone;
            }
        }
        self.default_zone
    }

    /// The next good instant from the current wall clock.
    pub fn optimal_time(&self, job: &Job) -> DateTime<Utc> {
        self.optimal_time_at(job, Utc::now())
    }

    /// The next instant at or after `now` that lands on an acceptable
    /// weekday inside the job's industry window, in the job's local time.
    ///
    /// `now` itself qualifies when it is already inside a window. Minutes
    /// and seconds are preserved across the hourly walk.
    pub fn optimal_time_at(&self, job: &Job, now: DateTime<Utc>) -> DateTime<Utc> {
        let zone = self.infer_timezone(&job.location);
        let window = self.window_for(self.infer_industry(&job.title));

        let mut local = now.with_timezone(&zone);
        for _ in 0..SCAN_HOURS {
            if self.weekdays.contains(&local.weekday()) && window.contains(local.hour()) {
                return local.with_timezone(&Utc);
            }
            local = local + Duration::hours(1);
        }

        // No recurring slot inside a week, walk to the next acceptable
        // day and settle on the fallback hour.
        let mut date = local.date_naive();
        for _ in 0..7 {
            if self.weekdays.contains(&date.weekday()) {
                break;
            }
            date = date.succ_opt().unwrap_or(date);
        }
        let naive = date
            .and_hms_opt(self.rules.fallback_hour.min(23), 0, 0)
            .unwrap_or_else(|| date.and_time(NaiveTime::MIN));
        let resolved = match zone.from_local_datetime(&naive) {
            chrono::LocalResult::Single(instant) => instant,
            chrono::LocalResult::Ambiguous(earlier, _) => earlier,
            chrono::LocalResult::None => zone.from_utc_datetime(&naive),
        };
        resolved.with_timezone(&Utc)
    }

    /// Whether the next good instant is close enough to submit
    /// immediately instead of queueing.
    pub fn should_submit_now(&self, job: &Job) -> bool {
        self.should_submit_now_at(job, Utc::now())
    }

    pub fn should_submit_now_at(&self, job: &Job, now: DateTime<Utc>) -> bool {
        self.time_until_optimal(job, now) <= Duration::hours(self.rules.submit_now_within_hours)
    }

    /// Time remaining until the optimal instant. Zero when `now` already
    /// qualifies.
    pub fn time_until_optimal(&self, job: &Job, now: DateTime<Utc>) -> Duration {
        self.optimal_time_at(job, now) - now
    }

    /// Human-readable optimal instant in the company's local time.
    pub fn describe_optimal(&self, job: &Job, now: DateTime<Utc>) -> String {
        let zone = self.infer_timezone(&job.location);
        self.optimal_time_at(job, now)
            .with_timezone(&zone)
            .format("%A, %B %d at %H:%M %Z")
            .to_string()
    }

    fn window_for(&self, class: IndustryClass) -> HourWindow {
        self.rules
            .industry_windows
            .get(class.as_str())
            .copied()
            .or_else(|| {
                self.rules
                    .industry_windows
                    .get(IndustryClass::General.as_str())
                    .copied()
            })
            .unwrap_or(DEFAULT_WINDOW)
    }
}

fn resolve_zones(zones: &std::collections::HashMap<String, String>) -> Vec<(String, Tz)> {
    let mut resolved = Vec::new();
    for (name, zone) in zones {
        match zone.parse::<Tz>() {
            Ok(tz) => resolved.push((name.to_lowercase(), tz)),
            Err(_) => log::warn!("Skipping unknown timezone '{}' for '{}'", zone, name),
        }
    }
    // Longest name first so overlapping fragments resolve to the most
    // specific entry regardless of map iteration order.
    resolved.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::JobStatus;
    use chrono::TimeZone;

    fn job(title: &str, location: &str) -> Job {
        Job {
            job_id: "job-1".to_string(),
            title: title.to_string(),
            company: "Acme".to_string(),
            location: location.to_string(),
            salary: String::new(),
            description: String::new(),
            url: String::new(),
            source: "linkedin".to_string(),
            posted_date: String::new(),
            easy_apply: false,
            match_score: 0.0,
            status: JobStatus::New,
            found_date: Utc::now(),
            applied_date: None,
        }
    }

    fn timer() -> SubmissionTimer {
        SubmissionTimer::new(TimingRules::default())
    }

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn test_infer_industry_by_title_keywords() {
        let timer = timer();
        assert_eq!(
            timer.infer_industry("Python Developer"),
            IndustryClass::Tech
        );
        assert_eq!(
            timer.infer_industry("Financial Analyst"),
            IndustryClass::Finance
        );
        assert_eq!(
            timer.infer_industry("Registered Nurse"),
            IndustryClass::Healthcare
        );
        assert_eq!(timer.infer_industry("Store Assistant"), IndustryClass::Retail);
        assert_eq!(timer.infer_industry("Gardener"), IndustryClass::General);
    }

    #[test]
    fn test_infer_timezone_city_before_country() {
        let timer = timer();
        assert_eq!(
            timer.infer_timezone("Paris, France"),
            chrono_tz::Europe::Paris
        );
        assert_eq!(
            timer.infer_timezone("New York, USA"),
            chrono_tz::America::New_York
        );
        assert_eq!(timer.infer_timezone("somewhere in Germany"), chrono_tz::Europe::Berlin);
        assert_eq!(timer.infer_timezone("Remote"), chrono_tz::UTC);
    }

    #[test]
    fn test_optimal_time_next_window_in_company_zone() {
        // Monday noon UTC; Paris is UTC+1 in early March. The next tech
        // window opens Tuesday 08:00 local, i.e. 07:00 UTC.
        let now = utc(2026, 3, 2, 12, 0);
        let optimal = timer().optimal_time_at(&job("Software Engineer", "Paris, France"), now);
        assert_eq!(optimal, utc(2026, 3, 3, 7, 0));
    }

    #[test]
    fn test_optimal_time_preserves_minutes() {
        let now = utc(2026, 3, 2, 12, 30);
        let optimal = timer().optimal_time_at(&job("Software Engineer", "Paris, France"), now);
        assert_eq!(optimal, utc(2026, 3, 3, 7, 30));
    }

    #[test]
    fn test_now_inside_window_is_optimal() {
        // Tuesday 09:00 UTC, unknown location resolves to UTC.
        let now = utc(2026, 3, 3, 9, 0);
        let timer = timer();
        let posting = job("Software Engineer", "Remote");
        assert_eq!(timer.optimal_time_at(&posting, now), now);
        assert!(timer.should_submit_now_at(&posting, now));
        assert_eq!(timer.time_until_optimal(&posting, now), Duration::zero());
    }

    #[test]
    fn test_window_end_is_exclusive() {
        // Tuesday 11:00 is past the tech window, next slot is Wednesday
        // 08:00.
        let now = utc(2026, 3, 3, 11, 0);
        let optimal = timer().optimal_time_at(&job("Software Engineer", "Remote"), now);
        assert_eq!(optimal, utc(2026, 3, 4, 8, 0));
    }

    #[test]
    fn test_monday_is_never_acceptable() {
        let now = utc(2026, 3, 2, 9, 0);
        let optimal = timer().optimal_time_at(&job("Software Engineer", "Remote"), now);
        assert_eq!(optimal.weekday(), Weekday::Tue);
    }

    #[test]
    fn test_should_submit_now_boundary_inclusive() {
        let timer = timer();
        let posting = job("Software Engineer", "Remote");
        // Exactly two hours before the window opens.
        assert!(timer.should_submit_now_at(&posting, utc(2026, 3, 3, 6, 0)));
        assert!(!timer.should_submit_now_at(&posting, utc(2026, 3, 3, 5, 59)));
    }

    #[test]
    fn test_narrow_window_found_near_scan_end() {
        let rules = TimingRules {
            acceptable_weekdays: vec!["tuesday".to_string()],
            ..TimingRules::default()
        };
        let timer = SubmissionTimer::new(rules);
        // Tuesday 11:30 is past this week's tech window, so the scan has
        // to run almost the full week to reach next Tuesday.
        let now = utc(2026, 3, 3, 11, 30);
        let optimal = timer.optimal_time_at(&job("Software Engineer", "Remote"), now);
        assert_eq!(optimal, utc(2026, 3, 10, 8, 30));
    }

    #[test]
    fn test_unparseable_weekdays_fall_back_to_fallback_hour() {
        let rules = TimingRules {
            acceptable_weekdays: vec!["someday".to_string()],
            ..TimingRules::default()
        };
        let timer = SubmissionTimer::new(rules);
        let now = utc(2026, 3, 3, 10, 30);
        // The hourly scan covers a week, the day walk another, then the
        // fallback hour applies.
        let optimal = timer.optimal_time_at(&job("Software Engineer", "Remote"), now);
        assert_eq!(optimal, utc(2026, 3, 17, 9, 0));
    }

    #[test]
    fn test_describe_optimal_uses_company_zone() {
        let now = utc(2026, 3, 2, 12, 0);
        let described = timer().describe_optimal(&job("Software Engineer", "Paris, France"), now);
        assert_eq!(described, "Tuesday, March 03 at 08:00 CET");
    }

    #[test]
    fn test_unknown_industry_uses_general_window() {
        let timer = timer();
        assert_eq!(
            timer.window_for(IndustryClass::General),
            HourWindow {
                start_hour: 8,
                end_hour: 11
            }
        );
        // Monday noon, UTC zone, general window: Tuesday 08:00.
        let now = utc(2026, 3, 2, 12, 0);
        let optimal = timer.optimal_time_at(&job("Gardener", "Remote"), now);
        assert_eq!(optimal, utc(2026, 3, 3, 8, 0));
    }
}
