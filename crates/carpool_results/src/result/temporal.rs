use jiff::{
    SignedDuration,
    civil::{Date, Time},
};
use thiserror::Error;

use crate::proposal::{
    criteria::Criteria,
    week::{Day, WeekSchedule},
};

use super::perspective::Perspective;

/// Why two schedules could not be reconciled. The matching should not have
/// been produced upstream, so the leg degrades instead of failing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleConflict {
    #[error("no date to carpool on")]
    MissingDate,
    #[error("{date} is outside the validity window of the counterpart")]
    DateOutOfRange { date: Date },
    #[error("the counterpart does not travel on {day}")]
    DayNotTravelled { day: Day },
    #[error("no shared weekday")]
    NoSharedWeekday,
}

/// Schedule of one leg, as seen by the proposal owner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciledSchedule {
    pub date: Option<Date>,
    /// Display time, `None` when the weekdays disagree.
    pub time: Option<Time>,
    pub week: WeekSchedule,
    pub multiple_times: bool,
    pub from_date: Option<Date>,
    pub to_date: Option<Date>,
    /// Driver departure time, used to stamp the route waypoints.
    pub anchor: Option<Time>,
}

impl ReconciledSchedule {
    fn finish(mut self, perspective: Perspective, pickup_offset: SignedDuration) -> Self {
        self.multiple_times = self.week.has_multiple_times();
        self.time = self.week.single_time();
        self.anchor = self
            .time
            .map(|time| departure(perspective, time, pickup_offset));
        self
    }
}

/// Driver departure for a leg whose owner-side display time is `time`.
fn departure(perspective: Perspective, time: Time, pickup_offset: SignedDuration) -> Time {
    match perspective {
        Perspective::Driver => time,
        Perspective::Passenger => time.wrapping_sub(pickup_offset),
    }
}

fn later(a: Option<Date>, b: Option<Date>) -> Option<Date> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (a, b) => a.or(b),
    }
}

/// Reconciles the owner's schedule with the counterpart's.
///
/// `pickup_days` holds the weekdays of pre-computed pickup windows, present
/// when the owner's regular ad was matched ahead of time.
pub fn reconcile(
    owner: &Criteria,
    counterpart: &Criteria,
    perspective: Perspective,
    pickup_offset: SignedDuration,
    pickup_days: Option<&[Day]>,
) -> Result<ReconciledSchedule, ScheduleConflict> {
    if owner.is_punctual() {
        reconcile_punctual(owner, counterpart, perspective, pickup_offset)
    } else {
        reconcile_regular(owner, counterpart, perspective, pickup_offset, pickup_days)
    }
}

fn reconcile_punctual(
    owner: &Criteria,
    counterpart: &Criteria,
    perspective: Perspective,
    pickup_offset: SignedDuration,
) -> Result<ReconciledSchedule, ScheduleConflict> {
    let date = if counterpart.is_punctual() {
        counterpart.from_date
    } else {
        owner.from_date
    }
    .ok_or(ScheduleConflict::MissingDate)?;

    let natural = if counterpart.is_punctual() {
        counterpart.from_time
    } else {
        if !counterpart.covers(date) {
            return Err(ScheduleConflict::DateOutOfRange { date });
        }
        let day = Day::from(date.weekday());
        if !counterpart.week.is_checked(day) {
            return Err(ScheduleConflict::DayNotTravelled { day });
        }
        counterpart.time_for(day)
    };

    let time = match (perspective, owner.from_time) {
        (Perspective::Driver, Some(own)) => Some(own),
        _ => natural.map(|natural| perspective.shift(natural, pickup_offset)),
    };

    Ok(ReconciledSchedule {
        date: Some(date),
        time,
        anchor: time.map(|time| departure(perspective, time, pickup_offset)),
        ..Default::default()
    })
}

fn reconcile_regular(
    owner: &Criteria,
    counterpart: &Criteria,
    perspective: Perspective,
    pickup_offset: SignedDuration,
    pickup_days: Option<&[Day]>,
) -> Result<ReconciledSchedule, ScheduleConflict> {
    let mut week = WeekSchedule::default();
    let mut driver_week = None;

    if let Some(days) = pickup_days {
        // The owner's times are displayed. Waypoints follow the driver's.
        let driver = match perspective {
            Perspective::Driver => owner,
            Perspective::Passenger => counterpart,
        };
        let mut driver_times = WeekSchedule::default();
        for &day in days {
            week.set(day, true, owner.time_for(day));
            driver_times.set(day, true, driver.time_for(day));
        }
        driver_week = Some(driver_times);
    } else if counterpart.is_punctual() {
        // A one-off counterpart only shares the weekday of its date.
        let date = counterpart.from_date.ok_or(ScheduleConflict::MissingDate)?;
        if !owner.covers(date) {
            return Err(ScheduleConflict::DateOutOfRange { date });
        }
        let day = Day::from(date.weekday());
        let time = counterpart
            .from_time
            .map(|natural| perspective.shift(natural, pickup_offset));
        week.set(day, true, time);

        return Ok(ReconciledSchedule {
            date: Some(date),
            week,
            from_date: Some(date),
            to_date: Some(date),
            ..Default::default()
        }
        .finish(perspective, pickup_offset));
    } else {
        for day in counterpart.week.checked_days() {
            let time = counterpart
                .time_for(day)
                .map(|natural| perspective.shift(natural, pickup_offset));
            week.set(day, true, time);
        }
    }

    if !week.has_checked_day() {
        return Err(ScheduleConflict::NoSharedWeekday);
    }

    let schedule = ReconciledSchedule {
        week,
        from_date: later(owner.from_date, counterpart.from_date),
        to_date: counterpart.to_date,
        ..Default::default()
    }
    .finish(perspective, pickup_offset);

    Ok(match driver_week {
        Some(driver_week) => ReconciledSchedule {
            anchor: driver_week.single_time(),
            ..schedule
        },
        None => schedule,
    })
}
