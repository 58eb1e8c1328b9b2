// Opaque session handle held between focus gained and focus lost.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FocusHandle {
    id: u64,
}

impl FocusHandle {
    pub fn new(id: u64) -> Self {
        Self { id }
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}
