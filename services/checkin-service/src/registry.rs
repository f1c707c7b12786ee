use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Local};
use tokio::sync::Mutex;

/// Latest reported state of a single device.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeviceRecord {
    pub id: String,
    pub mac: String,
    pub message: String,
    pub last_seen: DateTime<Local>,
}

/// In-memory map of MAC address to the device's most recent check-in.
///
/// Writes and snapshot copies both happen under the lock, so readers never see a
/// record that is only partially written. Concurrent upserts for the same MAC are
/// last-writer-wins in lock acquisition order.
#[derive(Clone, Default)]
pub struct DeviceRegistry {
    devices: Arc<Mutex<BTreeMap<String, DeviceRecord>>>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or fully replaces the record for `mac`, stamped with the current
    /// local time. Returns the stamp that was stored.
    pub async fn upsert(&self, mac: String, id: String, message: String) -> DateTime<Local> {
        let mut devices = self.devices.lock().await;
        // Stamp under the lock so timestamps follow completion order.
        let last_seen = Local::now();
        devices.insert(
            mac.clone(),
            DeviceRecord {
                id,
                mac,
                message,
                last_seen,
            },
        );
        last_seen
    }

    /// All records, most recently seen first. Equal timestamps keep ascending MAC order.
    pub async fn snapshot_sorted_by_recency(&self) -> Vec<(String, DeviceRecord)> {
        let devices = self.devices.lock().await;
        let mut snapshot: Vec<(String, DeviceRecord)> = devices
            .iter()
            .map(|(mac, record)| (mac.clone(), record.clone()))
            .collect();
        drop(devices);

        snapshot.sort_by(|a, b| b.1.last_seen.cmp(&a.1.last_seen));
        snapshot
    }

    #[cfg(test)]
    pub(crate) async fn len(&self) -> usize {
        self.devices.lock().await.len()
    }

    #[cfg(test)]
    pub(crate) async fn is_empty(&self) -> bool {
        self.devices.lock().await.is_empty()
    }

    #[cfg(test)]
    pub(crate) async fn insert(&self, record: DeviceRecord) {
        self.devices
            .lock()
            .await
            .insert(record.mac.clone(), record);
    }
}
