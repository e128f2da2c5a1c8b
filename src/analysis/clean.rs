//! Row-level validation: the full cleaner and the standalone email filter.
//!
//! Invalid field data is policy, not failure: rows are silently removed
//! and the drop count is logged, but nothing here returns an error.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::dataset::{Dataset, Record};

/// Returns a filtered copy containing only rows where age is a
/// non-negative number, the timestamp is not in the future, the email is
/// well-formed, and the gender is one of the accepted values.
///
/// Question answers never cause removal; non-coercible answers already
/// became missing at load time. Relative row order is preserved.
pub fn clean(dataset: &Dataset) -> Dataset {
    clean_at(dataset, Utc::now())
}

/// [`clean`] with an explicit "now" cutoff for the future-timestamp rule.
pub fn clean_at(dataset: &Dataset, now: DateTime<Utc>) -> Dataset {
    let kept: Dataset = dataset
        .iter()
        .filter(|record| row_is_valid(record, now))
        .cloned()
        .collect();

    debug!(
        before = dataset.len(),
        after = kept.len(),
        dropped = dataset.len() - kept.len(),
        "Dataset cleaned"
    );
    kept
}

fn row_is_valid(record: &Record, now: DateTime<Utc>) -> bool {
    record.age.is_some_and(|age| age >= 0.0)
        && record.timestamp.is_some_and(|ts| ts <= now)
        && record.email.as_deref().is_some_and(email_is_wellformed)
        && record.gender.is_some()
}

/// Cleaner-grade email rule: exactly one `@`, with a non-empty domain
/// containing at least one `.`.
fn email_is_wellformed(email: &str) -> bool {
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return false;
    }
    let domain = parts[1];
    !domain.is_empty() && domain.contains('.')
}

/// Strips the dataset down to rows with a strictly valid email address,
/// renumbering survivors from zero. Stricter than the cleaner's rule: the
/// address must not start or end with `.`, and the domain must not start
/// with `.`. Idempotent.
pub fn remove_rows_without_mail(dataset: &Dataset) -> Dataset {
    let kept: Dataset = dataset
        .iter()
        .filter(|record| {
            record
                .email
                .as_deref()
                .is_some_and(email_is_strictly_valid)
        })
        .cloned()
        .collect();

    debug!(
        before = dataset.len(),
        after = kept.len(),
        "Rows without valid mail removed"
    );
    kept
}

fn email_is_strictly_valid(email: &str) -> bool {
    if email.starts_with('.') || email.ends_with('.') {
        return false;
    }
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return false;
    }
    let domain = parts[1];
    domain.contains('.') && !domain.starts_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Gender;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn valid_record() -> Record {
        Record {
            age: Some(30.0),
            timestamp: Some(Utc.with_ymd_and_hms(2023, 5, 1, 10, 0, 0).unwrap()),
            email: Some("subject@example.com".to_string()),
            gender: Some(Gender::Female),
            q1: Some(10.0),
            q2: Some(20.0),
            q3: Some(30.0),
            q4: Some(40.0),
            q5: Some(50.0),
            score: None,
        }
    }

    #[test]
    fn test_clean_keeps_valid_rows_unchanged() {
        let dataset = Dataset::new(vec![valid_record(), valid_record()]);
        let cleaned = clean_at(&dataset, now());
        assert_eq!(cleaned, dataset);
    }

    #[test]
    fn test_clean_drops_missing_or_negative_age() {
        let mut negative = valid_record();
        negative.age = Some(-3.0);
        let mut missing = valid_record();
        missing.age = None;

        let dataset = Dataset::new(vec![valid_record(), negative, missing]);
        assert_eq!(clean_at(&dataset, now()).len(), 1);
    }

    #[test]
    fn test_clean_drops_future_and_missing_timestamps() {
        let mut future = valid_record();
        future.timestamp = Some(Utc.with_ymd_and_hms(2999, 1, 1, 0, 0, 0).unwrap());
        let mut missing = valid_record();
        missing.timestamp = None;

        let dataset = Dataset::new(vec![future, valid_record(), missing]);
        let cleaned = clean_at(&dataset, now());
        assert_eq!(cleaned.len(), 1);
        assert_eq!(cleaned.records()[0], valid_record());
    }

    #[test]
    fn test_clean_timestamp_equal_to_now_survives() {
        let mut record = valid_record();
        record.timestamp = Some(now());
        let dataset = Dataset::new(vec![record]);
        assert_eq!(clean_at(&dataset, now()).len(), 1);
    }

    #[test]
    fn test_clean_email_rules() {
        for bad in ["no-at-sign.com", "two@@ats.com", "a@b@c.com", "user@", "user@nodot"] {
            let mut record = valid_record();
            record.email = Some(bad.to_string());
            let dataset = Dataset::new(vec![record]);
            assert!(clean_at(&dataset, now()).is_empty(), "{bad} should be dropped");
        }

        // The cleaner rule is looser than the strict filter: leading dots pass.
        let mut record = valid_record();
        record.email = Some(".odd@example.com".to_string());
        let dataset = Dataset::new(vec![record]);
        assert_eq!(clean_at(&dataset, now()).len(), 1);
    }

    #[test]
    fn test_clean_drops_unknown_gender() {
        let mut record = valid_record();
        record.gender = None;
        let dataset = Dataset::new(vec![record]);
        assert!(clean_at(&dataset, now()).is_empty());
    }

    #[test]
    fn test_clean_keeps_rows_with_missing_answers() {
        let mut record = valid_record();
        record.q2 = None;
        record.q5 = None;
        let dataset = Dataset::new(vec![record]);
        assert_eq!(clean_at(&dataset, now()).len(), 1);
    }

    #[test]
    fn test_strict_email_filter_rules() {
        let valid = ["user@example.com", "a.b@c.d"];
        let invalid = [
            ".user@example.com",
            "user@example.com.",
            "user@.example.com",
            "user@nodot",
            "two@@ats.com",
            "noat.com",
        ];

        for email in valid {
            assert!(email_is_strictly_valid(email), "{email} should pass");
        }
        for email in invalid {
            assert!(!email_is_strictly_valid(email), "{email} should fail");
        }
    }

    #[test]
    fn test_email_filter_is_idempotent() {
        let mut leading_dot = valid_record();
        leading_dot.email = Some(".user@example.com".to_string());
        let mut missing = valid_record();
        missing.email = None;

        let dataset = Dataset::new(vec![valid_record(), leading_dot, missing]);
        let once = remove_rows_without_mail(&dataset);
        let twice = remove_rows_without_mail(&once);

        assert_eq!(once.len(), 1);
        assert_eq!(once, twice);
    }
}
