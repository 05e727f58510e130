//! Canonical decision diagrams with a typed set façade.
//!
//! Two variants share one infrastructure: reduced ordered BDDs representing
//! Boolean functions, and zero-suppressed decision diagrams representing
//! families of subsets. Every diagram in a factory lives in one maximally
//! shared graph, so equality of handles is a reference comparison. On top
//! of the ZDD engine, [`setpool::SetPool`] gives a set-of-`T` view where a
//! whole pool of sets shares structure in a single universe.

pub mod setpool;

pub mod prelude {
    pub use common::prelude::*;
    pub use ddcore::prelude::*;

    pub use crate::setpool::{PoolSet, SetPool};
}
