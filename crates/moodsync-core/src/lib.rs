//! Core synchronization pipeline for mood diary records.
//!
//! The pipeline normalizes raw export rows into canonical records, derives
//! a dedup key set from the target store, and writes new records through an
//! injected store handle under a bounded processing cap. See the module
//! docs of [`sync`] for the run state machine.

pub mod index;
pub mod normalize;
pub mod payload;
pub mod redact;
pub mod sync;
pub mod traits;
pub mod transform;

pub use index::build_dedup_index;
pub use payload::build_properties;
pub use sync::{
    DEFAULT_MAX_RECORDS, DEFAULT_PAGE_SIZE, RetryPolicy, SyncEngine, SyncError, SyncOptions,
    SyncReport,
};
pub use traits::{TargetStore, TitleGenerator};
pub use transform::{DATE_COLUMN, TransformError, transform_row};
