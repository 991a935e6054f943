pub mod coordinator;
pub mod events;
pub mod surface;

// Re-exports for convenience
pub use coordinator::MapSyncCoordinator;
pub use events::{MapEvent, SyncOutcome};
pub use surface::{LogSurface, MapSurface, NullSurface};
