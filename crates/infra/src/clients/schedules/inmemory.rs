use super::ISchedulesApi;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use postpilot_domain::{Schedule, ID};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Write requests observed by the fake, for assertions on wire behavior.
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleRequest {
    Create {
        post_id: ID,
        run_at: DateTime<Utc>,
        timezone: Tz,
    },
    Update {
        schedule_id: ID,
        run_at: DateTime<Utc>,
        timezone: Tz,
    },
}

pub struct InMemorySchedulesApi {
    schedules: Mutex<Vec<Schedule>>,
    requests: Mutex<Vec<ScheduleRequest>>,
    fail_lookups: AtomicBool,
    fail_writes: AtomicBool,
    write_gate: Mutex<Option<Arc<Notify>>>,
}

impl InMemorySchedulesApi {
    pub fn new() -> Self {
        Self {
            schedules: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
            fail_lookups: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            write_gate: Mutex::new(None),
        }
    }

    pub fn insert(&self, schedule: Schedule) {
        self.schedules.lock().unwrap().push(schedule);
    }

    pub fn requests(&self) -> Vec<ScheduleRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn set_fail_lookups(&self, fail: bool) {
        self.fail_lookups.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Holds every write open until the gate is notified. Used by tests that
    /// need a write to still be in flight.
    pub fn set_write_gate(&self, gate: Arc<Notify>) {
        *self.write_gate.lock().unwrap() = Some(gate);
    }

    async fn pass_write_gate(&self) {
        let gate = self.write_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
    }
}

impl Default for InMemorySchedulesApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ISchedulesApi for InMemorySchedulesApi {
    async fn find_by_post(&self, post_id: &ID) -> anyhow::Result<Option<Schedule>> {
        if self.fail_lookups.load(Ordering::SeqCst) {
            return Err(anyhow::Error::msg("Schedules API unavailable"));
        }
        Ok(self
            .schedules
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.post_id == *post_id)
            .cloned())
    }

    async fn create(
        &self,
        post_id: &ID,
        run_at: DateTime<Utc>,
        timezone: Tz,
    ) -> anyhow::Result<Schedule> {
        self.requests.lock().unwrap().push(ScheduleRequest::Create {
            post_id: post_id.clone(),
            run_at,
            timezone,
        });
        self.pass_write_gate().await;
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(anyhow::Error::msg("Schedules API unavailable"));
        }
        let schedule = Schedule::new(post_id.clone(), run_at, timezone);
        self.schedules.lock().unwrap().push(schedule.clone());
        Ok(schedule)
    }

    async fn update(
        &self,
        schedule_id: &ID,
        run_at: DateTime<Utc>,
        timezone: Tz,
    ) -> anyhow::Result<Schedule> {
        self.requests.lock().unwrap().push(ScheduleRequest::Update {
            schedule_id: schedule_id.clone(),
            run_at,
            timezone,
        });
        self.pass_write_gate().await;
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(anyhow::Error::msg("Schedules API unavailable"));
        }
        let mut schedules = self.schedules.lock().unwrap();
        match schedules.iter_mut().find(|s| s.id == *schedule_id) {
            Some(schedule) => {
                schedule.run_at = run_at;
                schedule.timezone = timezone;
                Ok(schedule.clone())
            }
            None => Err(anyhow::Error::msg(format!(
                "Schedule not found: {}",
                schedule_id
            ))),
        }
    }
}
