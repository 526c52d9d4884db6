//! Time-of-day grouping for a day's task list.

use chrono::{NaiveTime, Timelike};
use serde::Serialize;

use crate::model::TaskInstance;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeSlot {
    Morning,
    Afternoon,
    Evening,
    Anytime,
}

impl TimeSlot {
    /// Before noon is morning, before 17:00 afternoon, otherwise evening.
    /// Untimed tasks can be done anytime.
    #[must_use]
    pub fn for_time(time: Option<NaiveTime>) -> Self {
        match time.map(|t| t.hour()) {
            None => Self::Anytime,
            Some(hour) if hour < 12 => Self::Morning,
            Some(hour) if hour < 17 => Self::Afternoon,
            Some(_) => Self::Evening,
        }
    }
}

/// A day's instances bucketed by time slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SlotGroups {
    pub morning: Vec<TaskInstance>,
    pub afternoon: Vec<TaskInstance>,
    pub evening: Vec<TaskInstance>,
    pub anytime: Vec<TaskInstance>,
}

impl SlotGroups {
    #[must_use]
    pub fn get(&self, slot: TimeSlot) -> &[TaskInstance] {
        match slot {
            TimeSlot::Morning => &self.morning,
            TimeSlot::Afternoon => &self.afternoon,
            TimeSlot::Evening => &self.evening,
            TimeSlot::Anytime => &self.anytime,
        }
    }

    fn get_mut(&mut self, slot: TimeSlot) -> &mut Vec<TaskInstance> {
        match slot {
            TimeSlot::Morning => &mut self.morning,
            TimeSlot::Afternoon => &mut self.afternoon,
            TimeSlot::Evening => &mut self.evening,
            TimeSlot::Anytime => &mut self.anytime,
        }
    }
}

/// ## Summary
/// Buckets instances by time slot. Timed slots are sorted by time (ties keep
/// input order); `anytime` keeps input order.
#[must_use]
pub fn group_by_slot(instances: Vec<TaskInstance>) -> SlotGroups {
    let mut groups = SlotGroups::default();
    for instance in instances {
        groups.get_mut(TimeSlot::for_time(instance.time)).push(instance);
    }
    for slot in [TimeSlot::Morning, TimeSlot::Afternoon, TimeSlot::Evening] {
        groups.get_mut(slot).sort_by_key(|instance| instance.time);
    }
    groups
}
