use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, warn};
use zoneward_application::ports::{ZoneResyncScheduler, ZoneResyncTask};
use zoneward_domain::{DomainError, RequestContext, Zone, ZoneMaster};

/// Bounded hand-off between NOTIFY handling and the resync workers.
///
/// Scheduling never waits: a full queue is reported as
/// `SchedulerUnavailable`. With coalescing on, a zone that already has a
/// queued task is not queued again. Masters named by the later NOTIFYs are
/// merged into the queued task, newest notifier first, so the worker tries
/// them before the ones it already had. The zone becomes schedulable again
/// as soon as a worker picks the task up.
pub struct ZoneResyncQueue {
    sender: mpsc::Sender<ZoneResyncTask>,
    pending: Arc<DashMap<Arc<str>, Vec<ZoneMaster>>>,
    coalesce: bool,
}

/// Consuming end of a [`ZoneResyncQueue`].
pub struct ZoneResyncReceiver {
    receiver: mpsc::Receiver<ZoneResyncTask>,
    pending: Arc<DashMap<Arc<str>, Vec<ZoneMaster>>>,
}

impl ZoneResyncQueue {
    pub fn bounded(capacity: usize, coalesce: bool) -> (Self, ZoneResyncReceiver) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        let pending = Arc::new(DashMap::new());

        (
            Self {
                sender,
                pending: Arc::clone(&pending),
                coalesce,
            },
            ZoneResyncReceiver { receiver, pending },
        )
    }

    pub fn queued(&self) -> usize {
        self.sender.max_capacity() - self.sender.capacity()
    }
}

impl ZoneResyncScheduler for ZoneResyncQueue {
    fn schedule_resync(
        &self,
        context: &RequestContext,
        zone: &Zone,
        masters: Vec<ZoneMaster>,
    ) -> Result<(), DomainError> {
        if self.coalesce {
            match self.pending.entry(Arc::clone(&zone.id)) {
                Entry::Occupied(mut queued) => {
                    merge_masters(queued.get_mut(), &masters);
                    debug!(zone = %zone.name, request_id = %context, "Resync already queued, coalescing");
                    return Ok(());
                }
                Entry::Vacant(slot) => {
                    slot.insert(masters.clone());
                }
            }
        }

        let task = ZoneResyncTask {
            context: context.clone(),
            zone: zone.clone(),
            masters,
        };

        match self.sender.try_send(task) {
            Ok(()) => {
                debug!(zone = %zone.name, request_id = %context, "Resync queued");
                Ok(())
            }
            Err(TrySendError::Full(task)) => {
                self.release(&task.zone.id);
                warn!(zone = %zone.name, "Resync queue full, dropping request");
                Err(DomainError::SchedulerUnavailable(
                    "resync queue is full".to_string(),
                ))
            }
            Err(TrySendError::Closed(task)) => {
                self.release(&task.zone.id);
                Err(DomainError::SchedulerUnavailable(
                    "resync workers have stopped".to_string(),
                ))
            }
        }
    }
}

impl ZoneResyncQueue {
    fn release(&self, zone_id: &str) {
        if self.coalesce {
            self.pending.remove(zone_id);
        }
    }
}

/// Puts `newer` in front of `queued`, keeping each master once.
fn merge_masters(queued: &mut Vec<ZoneMaster>, newer: &[ZoneMaster]) {
    let mut merged: Vec<ZoneMaster> = Vec::with_capacity(queued.len() + newer.len());
    for master in newer.iter().chain(queued.iter()) {
        if !merged.contains(master) {
            merged.push(*master);
        }
    }
    *queued = merged;
}

impl ZoneResyncReceiver {
    /// Next task, or `None` once every queue handle is dropped. A coalesced
    /// task carries every master merged into it while it waited.
    pub async fn recv(&mut self) -> Option<ZoneResyncTask> {
        let mut task = self.receiver.recv().await?;
        if let Some((_, masters)) = self.pending.remove(task.zone.id.as_ref()) {
            task.masters = masters;
        }
        Some(task)
    }
}
