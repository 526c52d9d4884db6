use std::fmt;
use std::num::NonZeroU32;

use chrono::{NaiveDate, Weekday};

/// Set of weekdays a weekly rule fires on.
///
/// Stored as a bitmask indexed by days from Sunday, matching the storage
/// convention `0 = Sunday .. 6 = Saturday`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    const DAYS: [Weekday; 7] = [
        Weekday::Sun,
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
    ];

    /// Builds a set from storage day numbers. Numbers above 6 are dropped.
    #[must_use]
    pub fn from_numbers<I: IntoIterator<Item = u8>>(numbers: I) -> Self {
        let mask = numbers
            .into_iter()
            .filter(|n| *n < 7)
            .fold(0u8, |mask, n| mask | (1 << n));
        Self(mask)
    }

    #[must_use]
    pub fn from_weekdays<I: IntoIterator<Item = Weekday>>(days: I) -> Self {
        days.into_iter()
            .fold(Self::default(), |set, day| set.with(day))
    }

    #[must_use]
    pub fn with(self, day: Weekday) -> Self {
        Self(self.0 | (1 << day.num_days_from_sunday()))
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub fn contains(self, day: Weekday) -> bool {
        self.0 & (1 << day.num_days_from_sunday()) != 0
    }

    /// Weekdays in the set, Sunday first.
    pub fn iter(self) -> impl Iterator<Item = Weekday> {
        Self::DAYS.into_iter().filter(move |day| self.contains(*day))
    }

    /// Storage day numbers in the set, ascending.
    pub fn numbers(self) -> impl Iterator<Item = u8> {
        (0u8..7).filter(move |n| self.0 & (1 << *n) != 0)
    }
}

/// How often a recurring task repeats.
///
/// The weekday set belongs to `Weekly` only; no other frequency reads it.
/// `Unrecognized` keeps a tag this build does not understand so a rule
/// written by a newer client still round-trips, but it never matches a date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frequency {
    Daily,
    Weekly { days: Option<WeekdaySet> },
    Monthly,
    /// Stride of `interval` days, computed exactly like `Daily`.
    Custom,
    Unrecognized(String),
}

impl Frequency {
    /// ## Summary
    /// Maps a storage tag (`daily`, `weekly`, `monthly`, `custom`) to a frequency.
    ///
    /// The weekday set is kept only for `weekly`, and an empty set is
    /// normalized to `None`. Any other tag becomes `Unrecognized`.
    #[must_use]
    pub fn from_tag(tag: &str, days: Option<WeekdaySet>) -> Self {
        match tag {
            "daily" => Self::Daily,
            "weekly" => Self::Weekly {
                days: days.filter(|set| !set.is_empty()),
            },
            "monthly" => Self::Monthly,
            "custom" => Self::Custom,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            Self::Daily => "daily",
            Self::Weekly { .. } => "weekly",
            Self::Monthly => "monthly",
            Self::Custom => "custom",
            Self::Unrecognized(tag) => tag,
        }
    }

    /// Weekday set of a weekly rule, if any.
    #[must_use]
    pub fn weekdays(&self) -> Option<WeekdaySet> {
        match self {
            Self::Weekly { days } => *days,
            _ => None,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Recurrence attached to a task. Intervals are measured from the task's anchor date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceRule {
    pub frequency: Frequency,
    /// Repeat every N days, weeks or months.
    pub interval: NonZeroU32,
    /// Last date an occurrence may fall on, inclusive.
    pub end_date: Option<NaiveDate>,
}

impl RecurrenceRule {
    #[must_use]
    pub fn new(frequency: Frequency) -> Self {
        Self {
            frequency,
            interval: NonZeroU32::MIN,
            end_date: None,
        }
    }

    #[must_use]
    pub fn daily() -> Self {
        Self::new(Frequency::Daily)
    }

    #[must_use]
    pub fn weekly() -> Self {
        Self::new(Frequency::Weekly { days: None })
    }

    #[must_use]
    pub fn weekly_on<I: IntoIterator<Item = Weekday>>(days: I) -> Self {
        let set = WeekdaySet::from_weekdays(days);
        Self::new(Frequency::Weekly {
            days: (!set.is_empty()).then_some(set),
        })
    }

    #[must_use]
    pub fn monthly() -> Self {
        Self::new(Frequency::Monthly)
    }

    /// Sets the interval. Zero is treated as one.
    #[must_use]
    pub fn every(mut self, interval: u32) -> Self {
        self.interval = NonZeroU32::new(interval).unwrap_or(NonZeroU32::MIN);
        self
    }

    #[must_use]
    pub fn until(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_set_from_numbers() {
        let set = WeekdaySet::from_numbers([1, 3, 5, 9]);
        assert!(set.contains(Weekday::Mon));
        assert!(set.contains(Weekday::Wed));
        assert!(set.contains(Weekday::Fri));
        assert!(!set.contains(Weekday::Sun));
        assert_eq!(set.numbers().collect::<Vec<_>>(), vec![1, 3, 5]);
    }

    #[test]
    fn test_weekday_set_iterates_sunday_first() {
        let set = WeekdaySet::from_weekdays([Weekday::Sat, Weekday::Sun, Weekday::Tue]);
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![Weekday::Sun, Weekday::Tue, Weekday::Sat]
        );
    }

    #[test]
    fn test_frequency_from_tag() {
        let days = WeekdaySet::from_numbers([2]);
        assert_eq!(Frequency::from_tag("daily", Some(days)), Frequency::Daily);
        assert_eq!(
            Frequency::from_tag("weekly", Some(days)),
            Frequency::Weekly { days: Some(days) }
        );
        assert_eq!(
            Frequency::from_tag("weekly", Some(WeekdaySet::default())),
            Frequency::Weekly { days: None }
        );
        assert_eq!(
            Frequency::from_tag("fortnightly", None),
            Frequency::Unrecognized("fortnightly".to_string())
        );
        assert_eq!(Frequency::from_tag("DAILY", None).tag(), "DAILY");
    }

    #[test]
    fn test_every_zero_is_one() {
        assert_eq!(RecurrenceRule::daily().every(0).interval.get(), 1);
        assert_eq!(RecurrenceRule::daily().every(4).interval.get(), 4);
    }
}
