//! Time-derived identifiers

use chrono::{DateTime, Utc};

/// Stored ids further in the future than this are not timestamps we issued
const MAX_CLOCK_SKEW_MS: i64 = 24 * 60 * 60 * 1000;

/// Issues millisecond-timestamp identifiers. Two ids requested within the
/// same millisecond (or after the clock stepped backwards) are still
/// distinct: the later one is bumped past the last issued value.
#[derive(Debug, Default, Clone)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with ids that already exist so fresh ids never collide with them.
    /// Values that cannot be millisecond timestamps issued before `now`
    /// (allowing for clock skew) are ignored.
    pub fn observe(&mut self, existing: &str, now: DateTime<Utc>) {
        let ceiling = now.timestamp_millis().saturating_add(MAX_CLOCK_SKEW_MS);
        match existing.parse::<i64>() {
            Ok(value) if (0..=ceiling).contains(&value) => self.last = self.last.max(value),
            Ok(value) => tracing::warn!(value, "ignoring implausible stored id"),
            Err(_) => {}
        }
    }

    pub fn next(&mut self, now: DateTime<Utc>) -> String {
        let millis = now.timestamp_millis().max(self.last.saturating_add(1));
        self.last = millis;
        millis.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn same_millisecond_yields_distinct_ids() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let mut ids = IdGenerator::new();

        let first = ids.next(now);
        let second = ids.next(now);

        assert_eq!(first, "1700000000000");
        assert_eq!(second, "1700000000001");
    }

    #[test]
    fn observed_ids_are_never_reissued() {
        let now = Utc.timestamp_millis_opt(1_000).unwrap();
        let mut ids = IdGenerator::new();
        ids.observe("5000", now);
        ids.observe("not-a-number", now);

        assert_eq!(ids.next(now), "5001");
    }

    #[test]
    fn implausible_ids_are_ignored() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let mut ids = IdGenerator::new();
        ids.observe(&i64::MAX.to_string(), now);
        ids.observe("-5", now);
        ids.observe("1700080000000", now);

        assert_eq!(ids.next(now), "1700080000001");
    }

    #[test]
    fn saturates_instead_of_overflowing() {
        let mut ids = IdGenerator { last: i64::MAX };
        let now = Utc.timestamp_millis_opt(1_000).unwrap();
        assert_eq!(ids.next(now), i64::MAX.to_string());
    }
}
