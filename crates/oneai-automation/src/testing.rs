//! In-memory [`Surface`] for dispatcher and broadcast tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use crate::surface::{ControlKind, ElementRef, Surface, SurfaceError};

enum Entry {
    Element {
        element: ElementRef,
        appears_at: Instant,
    },
    Invalid,
}

/// Element handles are the selectors that matched them.
pub(crate) struct FakeSurface {
    ready: bool,
    detached: bool,
    hang: bool,
    entries: HashMap<String, Entry>,
    set_text_error: Option<SurfaceError>,
    submit_error: Option<SurfaceError>,
    queries: AtomicUsize,
    texts: Mutex<Vec<(String, String)>>,
    enters: Mutex<Vec<String>>,
    clicks: Mutex<Vec<String>>,
}

impl FakeSurface {
    fn new(ready: bool) -> Self {
        Self {
            ready,
            detached: false,
            hang: false,
            entries: HashMap::new(),
            set_text_error: None,
            submit_error: None,
            queries: AtomicUsize::new(0),
            texts: Mutex::new(Vec::new()),
            enters: Mutex::new(Vec::new()),
            clicks: Mutex::new(Vec::new()),
        }
    }

    pub fn ready() -> Self {
        Self::new(true)
    }

    pub fn loading() -> Self {
        Self::new(false)
    }

    fn with(mut self, selector: &str, kind: ControlKind, visible: bool, enabled: bool, delay: Duration) -> Self {
        self.entries.insert(
            selector.to_string(),
            Entry::Element {
                element: ElementRef {
                    handle: selector.to_string(),
                    kind,
                    visible,
                    enabled,
                },
                appears_at: Instant::now() + delay,
            },
        );
        self
    }

    pub fn with_element(self, selector: &str, kind: ControlKind) -> Self {
        self.with(selector, kind, true, true, Duration::ZERO)
    }

    pub fn with_element_after(self, selector: &str, kind: ControlKind, delay: Duration) -> Self {
        self.with(selector, kind, true, true, delay)
    }

    pub fn with_hidden(self, selector: &str) -> Self {
        self.with(selector, ControlKind::NativeField, false, true, Duration::ZERO)
    }

    pub fn with_disabled(self, selector: &str) -> Self {
        self.with(selector, ControlKind::NativeField, true, false, Duration::ZERO)
    }

    pub fn with_invalid(mut self, selector: &str) -> Self {
        self.entries.insert(selector.to_string(), Entry::Invalid);
        self
    }

    pub fn failing_set_text(mut self, error: SurfaceError) -> Self {
        self.set_text_error = Some(error);
        self
    }

    pub fn failing_submit(mut self, error: SurfaceError) -> Self {
        self.submit_error = Some(error);
        self
    }

    pub fn detached(mut self) -> Self {
        self.detached = true;
        self
    }

    /// Queries never complete.
    pub fn hanging(mut self) -> Self {
        self.hang = true;
        self
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub fn texts(&self) -> Vec<(String, String)> {
        self.texts.lock().unwrap().clone()
    }

    pub fn enters(&self) -> Vec<String> {
        self.enters.lock().unwrap().clone()
    }

    pub fn clicks(&self) -> Vec<String> {
        self.clicks.lock().unwrap().clone()
    }
}

#[async_trait]
impl Surface for FakeSurface {
    fn is_ready(&self) -> bool {
        self.ready
    }

    async fn query(&self, selector: &str) -> Result<Option<ElementRef>, SurfaceError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if self.hang {
            std::future::pending::<()>().await;
        }
        if self.detached {
            return Err(SurfaceError::Detached);
        }
        match self.entries.get(selector) {
            Some(Entry::Invalid) => Err(SurfaceError::InvalidSelector(selector.to_string())),
            Some(Entry::Element {
                element,
                appears_at,
            }) if Instant::now() >= *appears_at => Ok(Some(element.clone())),
            _ => Ok(None),
        }
    }

    async fn set_text(&self, element: &ElementRef, text: &str) -> Result<(), SurfaceError> {
        if let Some(e) = &self.set_text_error {
            return Err(e.clone());
        }
        self.texts
            .lock()
            .unwrap()
            .push((element.handle.clone(), text.to_string()));
        Ok(())
    }

    async fn press_enter(&self, element: &ElementRef) -> Result<(), SurfaceError> {
        if let Some(e) = &self.submit_error {
            return Err(e.clone());
        }
        self.enters.lock().unwrap().push(element.handle.clone());
        Ok(())
    }

    async fn click(&self, element: &ElementRef) -> Result<(), SurfaceError> {
        if let Some(e) = &self.submit_error {
            return Err(e.clone());
        }
        self.clicks.lock().unwrap().push(element.handle.clone());
        Ok(())
    }
}
