//! Process-wide resources that are expensive to load.
//!
//! A [`SharedResource`] runs its loader at most once per lifetime: concurrent
//! callers wait on the same load, a failed load is not cached, and
//! [`SharedResource::teardown`] drops the value so the next access loads again.

use std::{future::Future, sync::Arc};

use anyhow::Result;
use tokio::sync::{OnceCell, RwLock};

use crate::log_info;

const ENABLE_LOGS: bool = true;

pub struct SharedResource<T> {
    name: &'static str,
    cell: RwLock<Arc<OnceCell<Arc<T>>>>,
}

impl<T> SharedResource<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            cell: RwLock::new(Arc::new(OnceCell::new())),
        }
    }

    /// Return the loaded value, running `loader` if nothing is loaded yet.
    pub async fn get_or_load<F, Fut>(&self, loader: F) -> Result<Arc<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let cell = self.cell.read().await.clone();
        let value = cell
            .get_or_try_init(|| async move {
                log_info!("Loading shared resource {}", self.name);
                loader().await.map(Arc::new)
            })
            .await?;
        Ok(value.clone())
    }

    /// The loaded value, without triggering a load.
    pub async fn get(&self) -> Option<Arc<T>> {
        self.cell.read().await.get().cloned()
    }

    pub async fn is_loaded(&self) -> bool {
        self.cell.read().await.initialized()
    }

    /// Drop the loaded value. Handles already given out stay valid.
    pub async fn teardown(&self) -> Option<Arc<T>> {
        let previous = {
            let mut guard = self.cell.write().await;
            std::mem::replace(&mut *guard, Arc::new(OnceCell::new()))
        };
        if previous.initialized() {
            log_info!("Tore down shared resource {}", self.name);
        }
        previous.get().cloned()
    }
}
