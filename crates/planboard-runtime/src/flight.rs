use crate::error::{Error, Result};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Registry of mutation keys with a submission outstanding.
///
/// One slot per key: a second submission against the same key is
/// rejected with `Error::Busy`, never queued. The guard frees the
/// slot on drop, so every exit path releases it.
#[derive(Debug, Clone, Default)]
pub struct FlightTable {
    in_flight: Arc<Mutex<HashSet<String>>>,
}

impl FlightTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the slot for `key`, or refuse while it is taken.
    pub fn acquire(&self, key: &str) -> Result<FlightGuard> {
        let mut in_flight = self.in_flight.lock().unwrap();
        if !in_flight.insert(key.to_string()) {
            return Err(Error::Busy {
                key: key.to_string(),
            });
        }
        Ok(FlightGuard {
            table: self.in_flight.clone(),
            key: key.to_string(),
        })
    }

    pub fn is_busy(&self, key: &str) -> bool {
        self.in_flight.lock().unwrap().contains(key)
    }
}

/// RAII release of a flight slot.
#[derive(Debug)]
pub struct FlightGuard {
    table: Arc<Mutex<HashSet<String>>>,
    key: String,
}

impl Drop for FlightGuard {
    fn drop(&mut self) {
        self.table.lock().unwrap().remove(&self.key);
    }
}
