//! Record and factory contracts.
//!
//! The collector stores records as `Rc<dyn Record>` and reconstructs them
//! through a `RecordFactory`; it never names a concrete record type.

use core::any::Any;
use core::fmt;
use std::io::{Read, Write};
use std::rc::Rc;

use crate::errors::Result;

/// A schema-conforming, immutable value with a fixed binary layout.
///
/// `Display` renders the record's fields space-separated, as shown by the
/// `view` command.
pub trait Record: Any + fmt::Debug + fmt::Display {
    /// Serialize every field in the record's fixed order.
    fn write(&self, w: &mut dyn Write) -> Result<()>;

    fn as_any(&self) -> &dyn Any;
}

impl dyn Record {
    /// Borrow the concrete record behind a handle.
    pub fn downcast_ref<T: Record>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

/// Reconstructs records from a byte stream, mirroring `Record::write`.
pub trait RecordFactory {
    /// Decode one record. Truncation, over-length fields and invalid field
    /// values are returned as errors.
    fn read(&self, r: &mut dyn Read) -> Result<Rc<dyn Record>>;
}
