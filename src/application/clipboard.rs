use crate::domain::events::Severity;
use crate::domain::ports::{
    CheckoutViewRef, NotifierRef, ScratchId, ScratchSurface, ScratchSurfaceRef, SecureClipboardRef,
};
use crate::error::{CheckoutError, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const COPY_FAILED_MESSAGE: &str = "Copy failed. Select and copy the text manually.";

/// Which path ended up copying the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyPath {
    Secure,
    Fallback,
}

/// Copies text, preferring the secure clipboard and falling back to a temporary
/// off-screen element on the scratch surface.
#[derive(Clone)]
pub struct ClipboardCopier {
    secure: Option<SecureClipboardRef>,
    surface: ScratchSurfaceRef,
}

impl ClipboardCopier {
    /// `secure` is `None` when no secure clipboard is available at all.
    pub fn new(secure: Option<SecureClipboardRef>, surface: ScratchSurfaceRef) -> Self {
        Self { secure, surface }
    }

    pub async fn copy(&self, text: &str) -> Result<CopyPath> {
        if let Some(secure) = &self.secure {
            match secure.write_text(text).await {
                Ok(()) => return Ok(CopyPath::Secure),
                Err(err) => {
                    tracing::warn!(error = %err, "secure clipboard write failed, falling back")
                }
            }
        }

        self.fallback_copy(text).map_err(|err| match err {
            CheckoutError::ClipboardFailure(_) => err,
            other => CheckoutError::ClipboardFailure(other.to_string()),
        })
    }

    fn fallback_copy(&self, text: &str) -> Result<CopyPath> {
        let element = ScratchElement::attach(self.surface.as_ref(), text)?;
        element.copy()?;
        Ok(CopyPath::Fallback)
    }
}

/// A temporary element that is detached from its surface when dropped.
struct ScratchElement<'a> {
    surface: &'a dyn ScratchSurface,
    id: ScratchId,
}

impl<'a> ScratchElement<'a> {
    fn attach(surface: &'a dyn ScratchSurface, text: &str) -> Result<Self> {
        let id = surface.attach(text)?;
        Ok(Self { surface, id })
    }

    fn copy(&self) -> Result<()> {
        self.surface.copy_selection(self.id)
    }
}

impl Drop for ScratchElement<'_> {
    fn drop(&mut self) {
        self.surface.detach(self.id);
    }
}

/// Caller-side feedback around [`ClipboardCopier`]: a transient "copied" affordance
/// on success, an error notification on failure.
///
/// Each field keeps a generation counter; a revert timer only clears the affordance
/// if no newer copy of the same field happened since it was scheduled.
#[derive(Clone)]
pub struct CopyFeedback {
    copier: ClipboardCopier,
    view: CheckoutViewRef,
    notifier: NotifierRef,
    duration: Duration,
    generations: Arc<Mutex<HashMap<String, u64>>>,
}

impl CopyFeedback {
    pub fn new(
        copier: ClipboardCopier,
        view: CheckoutViewRef,
        notifier: NotifierRef,
        duration: Duration,
    ) -> Self {
        Self {
            copier,
            view,
            notifier,
            duration,
            generations: Arc::default(),
        }
    }

    pub async fn copy_field(&self, field: &str, text: &str) -> Result<CopyPath> {
        match self.copier.copy(text).await {
            Ok(path) => {
                tracing::debug!(field, ?path, "detail copied");
                self.view.set_copy_feedback(field, true);
                self.schedule_revert(field);
                Ok(path)
            }
            Err(err) => {
                tracing::warn!(field, error = %err, "copy failed");
                self.notifier.notify(COPY_FAILED_MESSAGE, Severity::Error);
                Err(err)
            }
        }
    }

    fn schedule_revert(&self, field: &str) {
        let generation = {
            let mut generations = lock(&self.generations);
            let entry = generations.entry(field.to_string()).or_default();
            *entry += 1;
            *entry
        };

        let view = self.view.clone();
        let generations = self.generations.clone();
        let field = field.to_string();
        let duration = self.duration;
        tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            let latest = lock(&generations).get(&field).copied();
            if latest == Some(generation) {
                view.set_copy_feedback(&field, false);
            }
        });
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
