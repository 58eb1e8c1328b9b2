// Interface adapters: in-process implementations of the ports.

pub mod directions;
pub mod machine;
pub mod session;
pub mod speech;
pub mod utils;

pub use directions::SimulatedDirectionSource;
pub use machine::InMemoryGameMachine;
pub use session::SessionRegistry;
pub use speech::ConsoleSpeech;
