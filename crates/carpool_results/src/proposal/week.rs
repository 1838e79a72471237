use std::fmt::Display;

use jiff::civil::{Time, Weekday};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Mon,
        Day::Tue,
        Day::Wed,
        Day::Thu,
        Day::Fri,
        Day::Sat,
        Day::Sun,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }
}

impl From<Weekday> for Day {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Monday => Day::Mon,
            Weekday::Tuesday => Day::Tue,
            Weekday::Wednesday => Day::Wed,
            Weekday::Thursday => Day::Thu,
            Weekday::Friday => Day::Fri,
            Weekday::Saturday => Day::Sat,
            Weekday::Sunday => Day::Sun,
        }
    }
}

impl Display for Day {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Day::Mon => "monday",
            Day::Tue => "tuesday",
            Day::Wed => "wednesday",
            Day::Thu => "thursday",
            Day::Fri => "friday",
            Day::Sat => "saturday",
            Day::Sun => "sunday",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct DaySlot {
    check: bool,
    time: Option<Time>,
}

/// Weekly schedule of a regular trip: a check flag and an optional
/// time of day for each weekday.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WeekScheduleRepr", into = "WeekScheduleRepr")]
pub struct WeekSchedule {
    slots: [DaySlot; 7],
}

impl WeekSchedule {
    pub fn is_checked(&self, day: Day) -> bool {
        self.slots[day.index()].check
    }

    pub fn time(&self, day: Day) -> Option<Time> {
        self.slots[day.index()].time
    }

    pub fn set(&mut self, day: Day, check: bool, time: Option<Time>) {
        self.slots[day.index()] = DaySlot { check, time };
    }

    pub fn with_day(mut self, day: Day, time: Time) -> Self {
        self.set(day, true, Some(time));
        self
    }

    pub fn checked_days(&self) -> impl Iterator<Item = Day> + '_ {
        Day::ALL.into_iter().filter(|day| self.is_checked(*day))
    }

    pub fn has_checked_day(&self) -> bool {
        self.slots.iter().any(|slot| slot.check)
    }

    /// True when two checked days resolve to different times.
    pub fn has_multiple_times(&self) -> bool {
        let mut times = self.checked_days().filter_map(|day| self.time(day));
        match times.next() {
            Some(first) => times.any(|time| time != first),
            None => false,
        }
    }

    /// The time shared by every checked day, if they all agree.
    pub fn single_time(&self) -> Option<Time> {
        if self.has_multiple_times() {
            return None;
        }

        self.checked_days().find_map(|day| self.time(day))
    }

    /// First time set in weekday order, regardless of the flags.
    pub fn first_time(&self) -> Option<Time> {
        self.slots.iter().find_map(|slot| slot.time)
    }

    /// Logical OR of the flags of both schedules, without times.
    pub fn union_flags(&self, other: &WeekSchedule) -> WeekSchedule {
        let mut union = WeekSchedule::default();
        for day in Day::ALL {
            union.set(day, self.is_checked(day) || other.is_checked(day), None);
        }
        union
    }

    pub fn flags_only(&self) -> WeekSchedule {
        self.union_flags(&WeekSchedule::default())
    }
}

macro_rules! week_schedule_repr {
    ($(($day:ident, $check:ident, $time:ident)),* $(,)?) => {
        #[derive(Serialize, Deserialize, Default)]
        #[serde(rename_all = "camelCase")]
        struct WeekScheduleRepr {
            $(
                #[serde(default)]
                $check: bool,
                #[serde(skip_serializing_if = "Option::is_none")]
                $time: Option<Time>,
            )*
        }

        impl From<WeekScheduleRepr> for WeekSchedule {
            fn from(repr: WeekScheduleRepr) -> Self {
                let mut week = WeekSchedule::default();
                $( week.set(Day::$day, repr.$check, repr.$time); )*
                week
            }
        }

        impl From<WeekSchedule> for WeekScheduleRepr {
            fn from(week: WeekSchedule) -> Self {
                WeekScheduleRepr {
                    $( $check: week.is_checked(Day::$day), $time: week.time(Day::$day), )*
                }
            }
        }
    };
}

week_schedule_repr!(
    (Mon, mon_check, mon_time),
    (Tue, tue_check, tue_time),
    (Wed, wed_check, wed_time),
    (Thu, thu_check, thu_time),
    (Fri, fri_check, fri_time),
    (Sat, sat_check, sat_time),
    (Sun, sun_check, sun_time),
);
