pub mod nodes;
pub mod order;

pub mod bdd;
pub mod bdd_ops;
pub mod bdd_iter;
pub mod bdd_dot;

pub mod zdd;
pub mod zdd_ops;
pub mod zdd_iter;
pub mod zdd_dot;

pub mod convert;

pub mod prelude {
    pub use common::prelude::*;
    pub use crate::bdd::{Bdd, BddManager};
    pub use crate::bdd_iter::{AssignmentWalker, Assignments};
    pub use crate::nodes::{InnerNode, Node, WeakNode};
    pub use crate::order::VarOrder;
    pub use crate::zdd::{Zdd, ZddManager};
    pub use crate::zdd_iter::{MemberWalker, Members, PathElements};
}
