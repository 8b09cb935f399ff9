// In memory entity source.
//
// Purpose
// - Exercise the snapshot loader without a backend.
//
// Responsibilities
// - Serve a list of raw records for one entity kind.
// - Simulate an offline backend and a slow response.

use crate::core::ports::{EntitySource, SourceError};
use serde_json::Value;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemorySource {
    records: RwLock<Vec<Value>>,
    delay_ms: AtomicU64,
    is_offline: AtomicBool,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<Value>) -> Self {
        Self {
            records: RwLock::new(records),
            ..Self::default()
        }
    }

    pub async fn replace_records(&self, records: Vec<Value>) {
        *self.records.write().await = records;
    }

    pub fn toggle_offline(&self) {
        self.is_offline.fetch_xor(true, Ordering::SeqCst);
    }

    pub fn set_delay_ms(&self, delay_ms: u64) {
        self.delay_ms.store(delay_ms, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl EntitySource for InMemorySource {
    /// Records are read before the delay, so a slow call answers with the data it started with.
    async fn get_all(&self) -> Result<Vec<Value>, SourceError> {
        if self.is_offline.load(Ordering::SeqCst) {
            return Err(SourceError::Offline("In memory source offline".to_string()));
        }

        let records = self.records.read().await.clone();
        let delay_ms = self.delay_ms.load(Ordering::SeqCst);
        if delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }
        Ok(records)
    }
}

#[cfg(test)]
mod in_memory_source_tests {
    use super::*;
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn before_each() -> InMemorySource {
        InMemorySource::with_records(vec![json!({"Id": 1}), json!({"Id": 2})])
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_return_all_records(before_each: InMemorySource) {
        let records = before_each
            .get_all()
            .await
            .expect("InMemorySource > get_all failed");
        assert_eq!(records, vec![json!({"Id": 1}), json!({"Id": 2})]);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_return_nothing_when_empty() {
        assert!(InMemorySource::new().get_all().await.unwrap().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_serve_replaced_records(before_each: InMemorySource) {
        before_each.replace_records(vec![json!({"Id": 3})]).await;
        assert_eq!(before_each.get_all().await.unwrap(), vec![json!({"Id": 3})]);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_if_the_source_is_offline(before_each: InMemorySource) {
        before_each.toggle_offline();
        let result = before_each.get_all().await;
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("In memory source offline")
        );

        before_each.toggle_offline();
        assert!(before_each.get_all().await.is_ok());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_answer_with_the_records_present_when_called(before_each: InMemorySource) {
        let source = std::sync::Arc::new(before_each);
        source.set_delay_ms(50);
        let pending = {
            let source = source.clone();
            tokio::spawn(async move { source.get_all().await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        source.replace_records(Vec::new()).await;

        let records = pending.await.unwrap().unwrap();
        assert_eq!(records.len(), 2);
    }
}
