use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Index;
use std::rc::{Rc, Weak};
use std::slice::Iter;

use common::prelude::*;

/// Inner decision node. All fields are immutable after allocation; the id
/// is unique within the owning factory and never reused, so an id seen in
/// a cache key can never alias a later node.
#[derive(Debug)]
pub struct InnerNode {
    id: NodeId,
    var: VarId,
    edges: [Node; 2],
}

impl InnerNode {
    pub(crate) fn new(id: NodeId, var: VarId, edges: [Node; 2]) -> Self {
        Self { id, var, edges }
    }

    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[inline]
    pub fn var(&self) -> VarId {
        self.var
    }

    #[inline]
    pub fn low(&self) -> &Node {
        &self.edges[0]
    }

    #[inline]
    pub fn high(&self) -> &Node {
        &self.edges[1]
    }

    #[inline]
    pub fn iter(&self) -> Iter<Node> {
        self.edges.iter()
    }
}

impl Index<usize> for InnerNode {
    type Output = Node;

    fn index(&self, index: usize) -> &Self::Output {
        &self.edges[index]
    }
}

/// One reference into the universe graph. Cloning clones the `Rc`; children
/// are held strongly, so a node keeps its whole subgraph alive. Equality and
/// hashing go through the node id, which coincides with reference identity
/// because construction is hash-consed.
#[derive(Debug, Clone)]
pub enum Node {
    NonTerminal(Rc<InnerNode>),
    Zero,
    One,
}

impl Node {
    pub(crate) fn new_nonterminal(id: NodeId, var: VarId, low: &Node, high: &Node) -> Self {
        Self::NonTerminal(Rc::new(InnerNode::new(id, var, [low.clone(), high.clone()])))
    }

    pub fn id(&self) -> NodeId {
        match self {
            Self::NonTerminal(x) => x.id(),
            Self::Zero => 0,
            Self::One => 1,
        }
    }

    pub fn var(&self) -> Option<VarId> {
        match self {
            Self::NonTerminal(x) => Some(x.var()),
            Self::Zero | Self::One => None,
        }
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Zero | Self::One)
    }

    pub(crate) fn downgrade(&self) -> WeakNode {
        match self {
            Self::NonTerminal(x) => WeakNode::NonTerminal(Rc::downgrade(x)),
            Self::Zero => WeakNode::Zero,
            Self::One => WeakNode::One,
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zero => write!(f, "LO"),
            Self::One => write!(f, "HI"),
            Self::NonTerminal(x) => write!(f, "{}({},{})", x.var(), x.low(), x.high()),
        }
    }
}

/// Non-owning node reference for the unique table and the operation cache.
/// Terminals are eternal; inner nodes upgrade only while some handle or
/// parent still owns them, so a dead entry reads as absent.
#[derive(Debug, Clone)]
pub enum WeakNode {
    NonTerminal(Weak<InnerNode>),
    Zero,
    One,
}

impl WeakNode {
    pub fn upgrade(&self) -> Option<Node> {
        match self {
            Self::NonTerminal(x) => x.upgrade().map(Node::NonTerminal),
            Self::Zero => Some(Node::Zero),
            Self::One => Some(Node::One),
        }
    }
}
