//! Country dataset: where the official answers come from.
//!
//! ```text
//!                      ┌──────────── fresh? ───────────▶ serve current
//! get_dataset() ───────┤
//!                      └─ stale/empty ─▶ CountrySource::fetch (timeout-bound)
//!                                          │ ok   ─▶ swap snapshot, persist fallback (best effort)
//!                                          │ err  ─▶ stale snapshot? serve it
//!                                          │        └─ none ─▶ FallbackStore::load ─▶ snapshot | Unavailable
//! ```
//!
//! ## Responsibilities by module
//!
//! - `record.rs`: the upstream listing shape (`RawCountry`) and its
//!   conversion into [`Country`](crate::Country).
//! - `snapshot.rs`: immutable, timestamped collections of countries.
//! - `source.rs`: the upstream fetch seam ([`CountrySource`]) and its HTTP
//!   implementation.
//! - `fallback.rs`: the persistence seam ([`FallbackStore`]) with file and
//!   in-memory implementations.
//! - `cache.rs`: [`DatasetCache`], the TTL/fallback policy and the
//!   single-writer snapshot swap.
//!
//! A snapshot always comes wholly from one source. The cache never merges
//! upstream and fallback records.

#[path = "dataset/cache.rs"]
mod cache;
#[path = "dataset/fallback.rs"]
mod fallback;
#[path = "dataset/record.rs"]
mod record;
#[path = "dataset/snapshot.rs"]
mod snapshot;
#[path = "dataset/source.rs"]
mod source;

pub use cache::{CacheSettings, DatasetCache};
pub use fallback::{FallbackStore, FileStore, MemoryStore};
pub use record::{Entries, RawCountry, RawCurrency, RawName};
pub use snapshot::{Snapshot, SnapshotOrigin};
pub use source::{CountrySource, HttpSource, OfflineSource};
