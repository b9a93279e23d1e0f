//! Synthetic appointment-slot tool.
//!
//! Slots are synthesized per request: 30-minute starts within working hours
//! for the next two days, with a random pick per day. Nothing is persisted
//! and no real calendar is consulted.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{Duration, Local, NaiveDate};
use rand::Rng;
use rand::seq::SliceRandom;
use serde_json::{Value, json};
use tracing::info;

use crate::error::Result;
use crate::tool::Tool;

const DAYS_AHEAD: i64 = 2;
const SLOTS_PER_DAY: usize = 2;
const FIRST_HOUR: usize = 9;
const LAST_HOUR: usize = 17;

/// Offers synthetic appointment slots for the next [`DAYS_AHEAD`] days.
#[derive(Debug, Default)]
pub struct AppointmentsTool;

/// All slot start times between [`FIRST_HOUR`] and [`LAST_HOUR`] inclusive,
/// on the half hour.
fn candidate_slots() -> Vec<String> {
    (0..=(LAST_HOUR - FIRST_HOUR) * 2)
        .map(|i| format!("{:02}:{:02}", FIRST_HOUR + i / 2, (i % 2) * 30))
        .collect()
}

/// Synthesize the slot table starting the day after `from`.
///
/// Separated from the tool so tests can drive it with a seeded generator.
pub(crate) fn generate_slots(from: NaiveDate, rng: &mut impl Rng) -> BTreeMap<String, Vec<String>> {
    let candidates = candidate_slots();
    let mut appointments = BTreeMap::new();
    for day in 1..=DAYS_AHEAD {
        let date = from + Duration::days(day);
        let mut chosen: Vec<String> =
            candidates.choose_multiple(rng, SLOTS_PER_DAY).cloned().collect();
        chosen.sort();
        appointments.insert(date.to_string(), chosen);
    }
    appointments
}

#[async_trait]
impl Tool for AppointmentsTool {
    fn name(&self) -> &'static str {
        "available_appointments"
    }

    fn description(&self) -> &'static str {
        "Returns available synthetic appointment slots for the next 2 days, \
         30 minutes each, within work hours (9:00-17:00)."
    }

    fn parameters_schema(&self) -> Option<Value> {
        None
    }

    async fn execute(&self, _args: Value) -> Result<Value> {
        let today = Local::now().date_naive();
        let appointments = generate_slots(today, &mut rand::thread_rng());
        info!(days = appointments.len(), "synthesized appointment slots");
        Ok(json!({ "appointments": appointments }))
    }
}
