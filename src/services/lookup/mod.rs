pub mod ai;
pub mod static_table;

pub use ai::AiLookup;
pub use static_table::StaticLookup;

use crate::error::LookupError;
use crate::models::medicine::MedicineRecord;
use async_trait::async_trait;
use futures::future::try_join_all;
use tracing::{info, warn};

/// Medicine information source, one name per request
#[async_trait]
pub trait MedicineLookup: Send + Sync {
    async fn lookup(&self, name: &str) -> Result<MedicineRecord, LookupError>;
}

/// Look up every name concurrently.
/// All-or-nothing: the first failure fails the whole batch.
/// Records come back in the order of `names`.
pub async fn lookup_all(
    lookup: &dyn MedicineLookup,
    names: &[String],
) -> Result<Vec<MedicineRecord>, LookupError> {
    info!(count = names.len(), "fetching medicine information");

    let records = try_join_all(names.iter().map(|name| lookup.lookup(name)))
        .await
        .map_err(|e| {
            warn!("Error fetching medicine info: {}", e);
            e
        })?;

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AiError;
    use parking_lot::Mutex;
    use std::time::Duration;

    /// Fails for one name, records when each call started
    struct FlakyLookup {
        fail_on: &'static str,
        started: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl MedicineLookup for FlakyLookup {
        async fn lookup(&self, name: &str) -> Result<MedicineRecord, LookupError> {
            self.started.lock().push(name.to_string());
            tokio::time::sleep(Duration::from_millis(10)).await;
            if name == self.fail_on {
                return Err(LookupError::Ai {
                    name: name.to_string(),
                    source: AiError::EmptyResponse,
                });
            }
            Ok(MedicineRecord::generic(name))
        }
    }

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_lookup_all_preserves_order() {
        let lookup = StaticLookup::default();
        let records = lookup_all(&lookup, &names(&["Ibuprofen", "Xylostatin", "paracetamol"]))
            .await
            .unwrap();

        let got: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(got, vec!["Ibuprofen", "Xylostatin", "Paracetamol"]);
    }

    #[tokio::test]
    async fn test_lookup_all_empty() {
        let lookup = StaticLookup::default();
        let records = lookup_all(&lookup, &[]).await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_one_failure_fails_batch() {
        let lookup = FlakyLookup {
            fail_on: "Bad",
            started: Mutex::new(Vec::new()),
        };

        let result = lookup_all(&lookup, &names(&["Good", "Bad", "Fine"])).await;

        assert!(matches!(result, Err(LookupError::Ai { ref name, .. }) if name == "Bad"));
        // Every lookup was already in flight when the failure landed
        assert_eq!(lookup.started.lock().len(), 3);
    }

    #[tokio::test]
    async fn test_lookups_are_issued_concurrently() {
        let lookup = StaticLookup::new(Duration::from_millis(200));
        let start = std::time::Instant::now();

        let records = lookup_all(&lookup, &names(&["a", "b", "c"])).await.unwrap();

        assert_eq!(records.len(), 3);
        // Sequential would take 600ms
        assert!(start.elapsed() < Duration::from_millis(550));
    }
}
