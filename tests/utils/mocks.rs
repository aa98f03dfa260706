use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use toru::{
    AppResult, CatalogClient, CatalogPage, CatalogSearchParams, IdentifiedCard, VisionClient,
};

type Script =
    Box<dyn Fn(&CatalogSearchParams) -> (Duration, AppResult<CatalogPage>) + Send + Sync>;

/// Scriptable catalog stub: the closure decides, per request, how long the
/// "network" takes and what comes back. Records every request it served.
pub struct StubCatalog {
    script: Script,
    calls: AtomicU32,
    requests: Mutex<Vec<CatalogSearchParams>>,
}

impl StubCatalog {
    pub fn new(
        script: impl Fn(&CatalogSearchParams) -> (Duration, AppResult<CatalogPage>)
            + Send
            + Sync
            + 'static,
    ) -> Self {
        Self {
            script: Box::new(script),
            calls: AtomicU32::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Stub that answers every request instantly with the same result.
    pub fn always(result: AppResult<CatalogPage>) -> Self {
        Self::new(move |_| (Duration::ZERO, result.clone()))
    }

    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<CatalogSearchParams> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogClient for StubCatalog {
    async fn search_cards(&self, params: &CatalogSearchParams) -> AppResult<CatalogPage> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(params.clone());

        let (delay, result) = (self.script)(params);
        if delay > Duration::ZERO {
            tokio::time::sleep(delay).await;
        }
        result
    }
}

/// Vision stub returning a fixed identification for any image reference.
pub struct StubVision {
    result: IdentifiedCard,
}

impl StubVision {
    pub fn new(result: IdentifiedCard) -> Self {
        Self { result }
    }
}

#[async_trait]
impl VisionClient for StubVision {
    async fn identify(&self, _image_ref: &str) -> AppResult<IdentifiedCard> {
        Ok(self.result.clone())
    }
}
