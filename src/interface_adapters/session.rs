// Issues and revokes focus handles for the in-process adapters.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use crate::domain::FocusHandle;
use crate::interface_adapters::utils::rng::rand_id;

#[derive(Clone, Default)]
pub struct SessionRegistry {
    live: Arc<Mutex<HashSet<u64>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&self) -> FocusHandle {
        let handle = FocusHandle::new(rand_id());
        self.live
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(handle.id());
        handle
    }

    // Returns false when the handle was not live.
    pub fn revoke(&self, handle: &FocusHandle) -> bool {
        self.live
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&handle.id())
    }

    pub fn is_live(&self, handle: &FocusHandle) -> bool {
        self.live
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&handle.id())
    }
}
