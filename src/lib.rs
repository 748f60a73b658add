//! rc-collector: a single-threaded, index-addressed collection of
//! reference-counted records with a small binary persistence format.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: keep the collection, the record contract and the wire format
//!   in separate layers so each can be reasoned about on its own.
//! - Layers:
//!   - SlotVec<T>: structural sequence of `(value, removed)` slots. Removal
//!     sets a tombstone; indices stay put until `compact`.
//!   - Collector<F>: public API over `SlotVec<Rc<dyn Record>>`; adds
//!     persistence and delegates decoding to a `RecordFactory`.
//!   - Record / RecordFactory: the serialization contract. `Book` and
//!     `BookFactory` are the one concrete kind shipped here.
//!
//! Constraints
//! - Single-threaded: handles are `Rc`, so the collector is `!Send`.
//! - Records are immutable after construction; replacing one means
//!   `update_item` with a new handle.
//! - Indices are stable across add/remove/update within a session; only
//!   `clean` and `load_collection` renumber.
//! - Index-addressed calls on `index >= get_size()` return
//!   `CollectorError::OutOfBounds` and change nothing.
//!
//! Persistence
//! - Records are concatenated with no header, footer or count; end of
//!   stream on a record boundary is the only terminator.
//! - Strings carry a big-endian `u16` length prefix and are bounded per
//!   field on both write and read. Numbers are fixed-width big-endian.
//! - Only live records are saved. Tombstones are session bookkeeping.
//! - Loading is all-or-nothing: records decode into a fresh `SlotVec` that
//!   replaces the current one only after the whole stream parsed.
//! - Saving writes a uniquely named temporary file in the target's
//!   directory and renames it over the target.
//!
//! Policies
//! - Removing an already-removed index fails with `AlreadyRemoved`.
//! - Updating a removed index stores the new record and makes it live.
//! - Field limits are checked by `Book::new`, which returns a
//!   `ValidationError`; user input can never abort the process.

pub mod book;
pub mod codec;
pub mod collector;
pub mod command;
mod errors;
pub mod record;
pub mod slot_vec;
mod slot_vec_proptest;

// Public surface
pub use book::{Book, BookFactory};
pub use collector::Collector;
pub use command::{run_session, Command, SessionConfig};
pub use errors::{CollectorError, CommandError, Result, ValidationError};
pub use record::{Record, RecordFactory};
pub use slot_vec::SlotVec;
