// Use cases layer: coordination between the game machine and its services.

pub mod coordinator;
pub mod phrases;
pub mod subscription;
#[cfg(test)]
pub(crate) mod test_support;

pub use coordinator::{CoordinatorSnapshot, GameCoordinator};
pub use phrases::Phrases;
pub use subscription::Subscription;
