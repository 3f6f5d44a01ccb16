use std::sync::Arc;

use rand::rngs::OsRng;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::errors::ServiceError;
use crate::storage::VolunteerStore;
use crate::volunteer::{NewVolunteer, Store, Volunteer};

/// Volunteer queue operations on top of a [`VolunteerStore`].
///
/// Each operation runs its load-mutate-save cycle while holding a single
/// process-wide lock, so overlapping requests cannot lose each other's
/// writes.
pub struct VolunteerService {
    store: Arc<dyn VolunteerStore>,
    lock: Mutex<()>,
}

impl VolunteerService {
    pub fn new(store: Arc<dyn VolunteerStore>) -> Self {
        Self { store, lock: Mutex::new(()) }
    }

    /// Current document, both lists in stored order.
    pub async fn snapshot(&self) -> Result<Store, ServiceError> {
        let _guard = self.lock.lock().await;
        self.store.load().await
    }

    /// Validate `payload`, append a new volunteer to the queue and persist.
    pub async fn enqueue(&self, payload: &Value) -> Result<Volunteer, ServiceError> {
        let input = NewVolunteer::from_json(payload)?;

        let _guard = self.lock.lock().await;
        let mut store = self.store.load().await?;
        let volunteer = store.enqueue(input, &mut OsRng);
        self.store.save(&store).await?;

        info!(volunteer_id = volunteer.id, priority = volunteer.priority, "volunteer queued");
        debug!(queued = store.queued_volunteers.len(), "queue length after enqueue");
        Ok(volunteer)
    }

    /// Move the highest-priority queued volunteer to the assigned list.
    /// An empty queue is reported without writing anything.
    pub async fn assign(&self) -> Result<Volunteer, ServiceError> {
        let _guard = self.lock.lock().await;
        let mut store = self.store.load().await?;
        let volunteer = store.assign_next().ok_or_else(ServiceError::queue_empty)?;
        self.store.save(&store).await?;

        info!(volunteer_id = volunteer.id, priority = volunteer.priority, "volunteer assigned");
        debug!(queued = store.queued_volunteers.len(), "queue length after assign");
        Ok(volunteer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use serde_json::json;

    fn service() -> (Arc<MemoryStore>, VolunteerService) {
        let mem = MemoryStore::new();
        let svc = VolunteerService::new(mem.clone());
        (mem, svc)
    }

    #[tokio::test]
    async fn ana_and_bo_scenario() -> Result<(), anyhow::Error> {
        let (_, svc) = service();
        let ana = svc.enqueue(&json!({"name": "Ana", "experienceYears": 10, "availabilityScore": 5})).await?;
        let bo = svc.enqueue(&json!({"name": "Bo", "experienceYears": 2, "availabilityScore": 2})).await?;
        assert_eq!(ana.priority, 8.0);
        assert_eq!(bo.priority, 2.0);
        assert_ne!(ana.id, bo.id);

        let assigned = svc.assign().await?;
        assert_eq!(assigned, ana);

        let snap = svc.snapshot().await?;
        assert_eq!(snap.queued_volunteers, vec![bo]);
        assert_eq!(snap.assigned_volunteers, vec![ana]);
        Ok(())
    }

    #[tokio::test]
    async fn enqueue_preserves_arrival_order() -> Result<(), anyhow::Error> {
        let (_, svc) = service();
        let names = ["z", "m", "a", "q", "b"];
        for (i, name) in names.iter().enumerate() {
            svc.enqueue(&json!({"name": name, "experienceYears": i, "availabilityScore": 10 - i})).await?;
        }
        let snap = svc.snapshot().await?;
        let stored: Vec<&str> = snap.queued_volunteers.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(stored, names);
        assert!(snap.assigned_volunteers.is_empty());
        for v in &snap.queued_volunteers {
            assert_eq!(v.priority, v.experience_years * 0.6 + v.availability_score * 0.4);
        }
        Ok(())
    }

    #[tokio::test]
    async fn assign_on_empty_queue_does_not_write() -> Result<(), anyhow::Error> {
        let (mem, svc) = service();
        let err = svc.assign().await.unwrap_err();
        assert!(matches!(err, ServiceError::QueueEmpty(_)));
        assert_eq!(err.to_string(), "No volunteers in the queue to assign.");
        assert_eq!(mem.write_count().await, 0);
        assert_eq!(svc.snapshot().await?, Store::default());
        Ok(())
    }

    #[tokio::test]
    async fn invalid_enqueue_leaves_queue_untouched() -> Result<(), anyhow::Error> {
        let (mem, svc) = service();
        svc.enqueue(&json!({"name": "Keep", "experienceYears": 1, "availabilityScore": 1})).await?;

        let err = svc.enqueue(&json!({"name": "A"})).await.unwrap_err();
        assert!(matches!(err, ServiceError::MissingField(_)));
        let err = svc
            .enqueue(&json!({"name": "A", "experienceYears": "ten", "availabilityScore": 1}))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        assert_eq!(svc.snapshot().await?.queued_volunteers.len(), 1);
        assert_eq!(mem.write_count().await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn repeated_assign_drains_in_priority_order() -> Result<(), anyhow::Error> {
        let (_, svc) = service();
        let inputs = [("d", 1, 1), ("a", 9, 8), ("c", 3, 3), ("b", 6, 2), ("tie", 9, 8)];
        for (name, e, a) in inputs {
            svc.enqueue(&json!({"name": name, "experienceYears": e, "availabilityScore": a})).await?;
        }

        let mut picks = Vec::new();
        for _ in 0..inputs.len() {
            picks.push(svc.assign().await?.name);
        }
        assert_eq!(picks, vec!["a", "tie", "b", "c", "d"]);

        let snap = svc.snapshot().await?;
        assert!(snap.queued_volunteers.is_empty());
        let assigned: Vec<&str> = snap.assigned_volunteers.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(assigned, vec!["d", "c", "b", "tie", "a"]);
        assert!(matches!(svc.assign().await, Err(ServiceError::QueueEmpty(_))));
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_enqueues_are_not_lost() -> Result<(), anyhow::Error> {
        let (_, svc) = service();
        let svc = Arc::new(svc);
        let mut handles = Vec::new();
        for i in 0..32 {
            let svc = Arc::clone(&svc);
            handles.push(tokio::spawn(async move {
                svc.enqueue(&json!({"name": format!("v{i}"), "experienceYears": i, "availabilityScore": 1})).await
            }));
        }
        for h in handles {
            h.await??;
        }
        let snap = svc.snapshot().await?;
        assert_eq!(snap.queued_volunteers.len(), 32);
        let mut ids: Vec<u64> = snap.queued_volunteers.iter().map(|v| v.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 32);
        Ok(())
    }
}
