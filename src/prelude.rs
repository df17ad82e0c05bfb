pub use crate::builder::FrequencyTableBuilder;
pub use crate::ds::{Bucket, SlotArena, SlotId};
pub use crate::error::{ConfigError, InvariantError};
pub use crate::summary::{AddOutcome, BucketChainIter, DEFAULT_BUCKET_PREALLOC, FrequencyTable};

#[cfg(feature = "concurrency")]
pub use crate::summary::ConcurrentFrequencyTable;
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::TableMetricsSnapshot;
#[cfg(feature = "metrics")]
pub use crate::metrics::traits::{MetricsExporter, MetricsSnapshotProvider};
