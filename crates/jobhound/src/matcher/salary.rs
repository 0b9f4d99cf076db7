//! Salary text parsing.
//!
//! Postings carry salaries as free text ("45K", "3 500 € / mois",
//! "competitive"). Parsing normalizes to annual figures: monthly amounts
//! are multiplied by 12, and small figures are read as thousands.

/// Markers that mean the figure is per month rather than per year.
const MONTHLY_MARKERS: [&str; 3] = ["month", "mois", "/m"];

/// Extracts an annual salary from free text, or `None` when no figure is
/// present.
///
/// The first run of digits wins after spaces and thousands separators are
/// stripped, so ranges like "70k-90k" resolve to their lower bound.
pub fn parse_salary(text: &str) -> Option<u64> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| *c != ' ' && *c != ',')
        .collect();

    let digits: String = cleaned
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return None;
    }

    let mut amount: u64 = digits.parse().ok()?;
    if MONTHLY_MARKERS.iter().any(|marker| cleaned.contains(marker)) {
        amount *= 12;
    }
    // Shorthand like "45K" or "45" means thousands.
    if amount < 1000 {
        amount *= 1000;
    }

    Some(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_k_shorthand() {
        assert_eq!(parse_salary("45K"), Some(45000));
        assert_eq!(parse_salary("45k per year"), Some(45000));
    }

    #[test]
    fn test_monthly_is_annualized() {
        assert_eq!(parse_salary("3500/mois"), Some(42000));
        assert_eq!(parse_salary("3,500/month"), Some(42000));
        assert_eq!(parse_salary("€2800/m"), Some(33600));
    }

    #[test]
    fn test_spaces_and_separators_are_stripped() {
        assert_eq!(parse_salary("45 000 €"), Some(45000));
        assert_eq!(parse_salary("1,200,000"), Some(1200000));
    }

    #[test]
    fn test_range_takes_lower_bound() {
        assert_eq!(parse_salary("70k-90k"), Some(70000));
    }

    #[test]
    fn test_no_digits_is_none() {
        assert_eq!(parse_salary("competitive"), None);
        assert_eq!(parse_salary(""), None);
        assert_eq!(parse_salary("à négocier"), None);
    }

    #[test]
    fn test_small_monthly_figure() {
        // Annualized first, then the thousands shorthand no longer applies.
        assert_eq!(parse_salary("900/month"), Some(10800));
    }
}
