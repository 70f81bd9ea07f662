//! Capacity ceiling and first-fit staffing.
//!
//! Neither operation optimizes anything. [`max_concurrent`] is a coarse bound from resource
//! counts, and [`assign`] picks the first qualified staff member per booking without removing
//! them from the candidate list, so one person can be scheduled for several bookings in the
//! same pass.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};

use super::context::DecisionContext;
use super::domain::{BookingRequest, EquipmentRecord, RecordId, StaffRecord};
use super::policy::SchedulingPolicy;
use super::DecisionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceConstraints {
    pub staff_available: usize,
    pub equipment_available: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingWindow {
    pub day: String,
    pub time: String,
    pub demand_multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityOutcome {
    pub decision: String,
    pub max_concurrent_bookings: usize,
    pub resource_constraints: ResourceConstraints,
    pub optimal_booking_windows: Vec<BookingWindow>,
    pub reasoning: String,
}

pub fn max_concurrent(
    staff: &[StaffRecord],
    equipment: &[EquipmentRecord],
    policy: &SchedulingPolicy,
) -> CapacityOutcome {
    let staff_available = staff.iter().filter(|member| member.is_available()).count();
    let equipment_available = equipment
        .iter()
        .filter(|item| item.status.as_deref() == Some(policy.available_equipment_status.as_str()))
        .count();

    CapacityOutcome {
        decision: "capacity_ceiling".to_string(),
        max_concurrent_bookings: staff_available.min(equipment_available),
        resource_constraints: ResourceConstraints {
            staff_available,
            equipment_available,
        },
        optimal_booking_windows: booking_windows(),
        reasoning: "Booking capacity bounded by available staff and equipment".to_string(),
    }
}

fn booking_windows() -> Vec<BookingWindow> {
    [("Saturday", "18:00", 1.2), ("Friday", "19:00", 1.1), ("Sunday", "17:00", 1.0)]
        .into_iter()
        .map(|(day, time, demand_multiplier)| BookingWindow {
            day: day.to_string(),
            time: time.to_string(),
            demand_multiplier,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffAssignment {
    pub staff_id: Option<RecordId>,
    pub staff_name: Option<String>,
    pub booking_date: Option<NaiveDate>,
    pub estimated_hours: f64,
}

/// Booking assignments in input order, serialized as a JSON object keyed by booking.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Schedule(Vec<(String, StaffAssignment)>);

impl Schedule {
    pub fn get(&self, booking: &str) -> Option<&StaffAssignment> {
        self.0
            .iter()
            .find(|(key, _)| key == booking)
            .map(|(_, assignment)| assignment)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(key, _)| key.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &StaffAssignment> {
        self.0.iter().map(|(_, assignment)| assignment)
    }
}

impl Serialize for Schedule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(key, assignment)| (key, assignment)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleOutcome {
    pub decision: String,
    /// Keyed by booking id, or by input position for bookings without one.
    pub schedule: Schedule,
    pub unassigned_bookings: Vec<String>,
    pub utilization_rate: f64,
    pub reasoning: String,
}

pub fn assign(
    bookings: &[BookingRequest],
    staff: &[StaffRecord],
    policy: &SchedulingPolicy,
) -> ScheduleOutcome {
    let mut schedule = Vec::new();
    let mut unassigned_bookings = Vec::new();
    let mut used_keys = HashSet::new();

    for (position, booking) in bookings.iter().enumerate() {
        let key = booking_key(booking, position, &used_keys);
        used_keys.insert(key.clone());

        match first_qualified(staff, &policy.required_skills) {
            Some(member) => schedule.push((
                key,
                StaffAssignment {
                    staff_id: member.id.clone(),
                    staff_name: member.name.clone(),
                    booking_date: booking.event_date,
                    estimated_hours: booking.duration_hours() + policy.setup_breakdown_hours,
                },
            )),
            None => unassigned_bookings.push(key),
        }
    }

    let utilization_rate = if bookings.is_empty() {
        0.0
    } else {
        schedule.len() as f64 / bookings.len() as f64
    };

    ScheduleOutcome {
        decision: "first_fit_staff_schedule".to_string(),
        schedule: Schedule(schedule),
        unassigned_bookings,
        utilization_rate,
        reasoning: "Each booking takes the first available staff member with a required skill"
            .to_string(),
    }
}

/// Booking id or input position; a key already taken gets `#<position>` appended.
fn booking_key(booking: &BookingRequest, position: usize, used: &HashSet<String>) -> String {
    let mut key = booking
        .id
        .as_ref()
        .map(RecordId::to_string)
        .unwrap_or_else(|| position.to_string());
    while used.contains(&key) {
        key = format!("{key}#{position}");
    }
    key
}

fn first_qualified<'a>(staff: &'a [StaffRecord], required: &[String]) -> Option<&'a StaffRecord> {
    staff.iter().find(|member| {
        member.is_available() && member.skills().iter().any(|skill| required.contains(skill))
    })
}

/// Reads `staff_availability` and `equipment_status`.
pub(crate) fn capacity_from_context(
    context: &DecisionContext<'_>,
    policy: &SchedulingPolicy,
) -> Result<CapacityOutcome, DecisionError> {
    let staff: Vec<StaffRecord> = context.records("staff_availability")?;
    let equipment: Vec<EquipmentRecord> = context.records("equipment_status")?;
    Ok(max_concurrent(&staff, &equipment, policy))
}

/// Reads `bookings` and `staff_members`.
pub(crate) fn schedule_from_context(
    context: &DecisionContext<'_>,
    policy: &SchedulingPolicy,
) -> Result<ScheduleOutcome, DecisionError> {
    let bookings: Vec<BookingRequest> = context.records("bookings")?;
    let staff: Vec<StaffRecord> = context.records("staff_members")?;
    Ok(assign(&bookings, &staff, policy))
}
