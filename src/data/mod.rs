pub mod client;
pub mod filter;
pub mod records;

// Re-exports for convenience
pub use client::{AnnouncementClient, PartnerQueryClient, QueryError, Transport};
pub use filter::{Category, FilterCriteria, FilterPatch, FilterState};
pub use records::{AccessType, AnnouncementRecord, PointRecord};
