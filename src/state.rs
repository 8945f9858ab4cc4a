use crate::clock::{Clock, SystemClock};
use crate::config::{AppConfig, StoreBackend};
use crate::days::locks::DayLocks;
use crate::store::{MemoryStore, NotionStore, RecordStore};
use std::sync::Arc;
use time::Date;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn RecordStore>,
    pub clock: Arc<dyn Clock>,
    pub locks: Arc<DayLocks>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let store = match config.store.backend {
            StoreBackend::Notion => Arc::new(NotionStore::new(
                &config.store.base_url,
                &config.store.token,
                config.store.timeout,
            )?) as Arc<dyn RecordStore>,
            StoreBackend::Memory => {
                tracing::warn!("using in-memory record store; data is lost on exit");
                Arc::new(MemoryStore::new()) as Arc<dyn RecordStore>
            }
        };

        let clock = Arc::new(SystemClock::from_offset_hours(config.utc_offset_hours)?) as Arc<dyn Clock>;

        Ok(Self::from_parts(config, store, clock))
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        store: Arc<dyn RecordStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            store,
            clock,
            locks: Arc::new(DayLocks::default()),
        }
    }

    /// In-memory store pinned to `today`.
    #[cfg(test)]
    pub fn fake(today: Date) -> Self {
        Self::fake_with(Arc::new(MemoryStore::new()), today)
    }

    #[cfg(test)]
    pub fn fake_with(store: Arc<MemoryStore>, today: Date) -> Self {
        Self::from_parts(
            Arc::new(AppConfig::memory()),
            store as Arc<dyn RecordStore>,
            Arc::new(crate::clock::FixedClock(today)) as Arc<dyn Clock>,
        )
    }

    pub fn today(&self) -> Date {
        self.clock.today()
    }
}
