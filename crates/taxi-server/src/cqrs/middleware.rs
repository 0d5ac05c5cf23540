//! Marker traits separating writes from reads
//!
//! Commands change the record store; queries only read it. Handlers are
//! registered the same way for both, the markers only document intent and
//! let generic code restrict itself to one side.

/// A request that modifies state
pub trait Command {}

/// A request that only reads state
pub trait Query {}
