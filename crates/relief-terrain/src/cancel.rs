use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cooperative cancellation flag, checked by the generator between grid rows.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

#[inline]
pub(crate) fn check(token: Option<&CancelToken>) -> Result<(), crate::TerrainError> {
    match token {
        Some(t) if t.is_cancelled() => Err(crate::TerrainError::Cancelled),
        _ => Ok(()),
    }
}
