pub mod cache;
pub mod common;
pub mod dot;
pub mod error;

pub mod prelude {
    pub use crate::cache::OpCache;
    pub use crate::common::{fresh_factory_id, DdHashMap, DdHashSet};
    pub use crate::common::{FactoryId, NodeId, OrderIndex, VarId};
    pub use crate::dot::Dot;
    pub use crate::error::{DdError, Result};
}
