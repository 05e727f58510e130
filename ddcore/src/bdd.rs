/// BDD (Binary Decision Diagram) manager.
///
/// A BDD is a rooted directed acyclic graph with two terminal nodes, `LO`
/// and `HI`. Each non-terminal node carries a variable and two edges, low
/// and high; an inner node `(v, lo, hi)` denotes the Boolean function
/// `(!v & lo) | (v & hi)`.
///
/// The manager owns the universe graph for one factory: the unique table
/// mapping `(var, low, high)` to the canonical node for that shape, and the
/// operation cache memoising the recursive operators. The unique table
/// holds its nodes weakly; a node lives exactly as long as some handle or
/// parent keeps a strong reference to it, and table entries for reclaimed
/// nodes are pruned by an amortised sweep.
///
/// Handles returned from the manager are `Bdd` values. Two handles from the
/// same manager denote the same function if and only if they are the same
/// node, so equality on handles is a reference comparison.
use std::fmt;
use std::hash::{Hash, Hasher};

use common::prelude::*;

use crate::bdd_ops::Operation;
use crate::nodes::{Node, WeakNode};
use crate::order::{VarOrder, TERMINAL_INDEX};

/// A Boolean function: one root node plus the id of the owning factory.
#[derive(Debug, Clone)]
pub struct Bdd {
    factory: FactoryId,
    root: Node,
}

impl Bdd {
    #[inline]
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// True iff this is the constant false function.
    #[inline]
    pub fn is_zero(&self) -> bool {
        matches!(self.root, Node::Zero)
    }

    /// True iff this is the constant true function.
    #[inline]
    pub fn is_one(&self) -> bool {
        matches!(self.root, Node::One)
    }
}

impl PartialEq for Bdd {
    fn eq(&self, other: &Self) -> bool {
        self.factory == other.factory && self.root == other.root
    }
}

impl Eq for Bdd {}

impl Hash for Bdd {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.factory.hash(state);
        self.root.hash(state);
    }
}

impl fmt::Display for Bdd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)
    }
}

#[derive(Debug)]
pub struct BddManager {
    factory: FactoryId,
    order: VarOrder,
    next_id: NodeId,
    utable: DdHashMap<(VarId, NodeId, NodeId), WeakNode>,
    cache: OpCache<(Operation, NodeId, NodeId), WeakNode>,
    sweep_at: usize,
}

const INITIAL_SWEEP_WATERMARK: usize = 64;

impl BddManager {
    /// Creates a factory over `num_vars` variables arranged by `ordering`,
    /// which must be a permutation of `0..num_vars`. `cache_capacity` slots
    /// are reserved for the operation cache; zero disables caching.
    pub fn new(num_vars: usize, ordering: &[VarId], cache_capacity: usize) -> Result<Self> {
        let order = VarOrder::new(num_vars, ordering)?;
        Ok(Self {
            factory: fresh_factory_id(),
            order,
            next_id: 2,
            utable: DdHashMap::default(),
            cache: OpCache::new(cache_capacity),
            sweep_at: INITIAL_SWEEP_WATERMARK,
        })
    }

    /// Factory with the identity ordering.
    pub fn with_default_order(num_vars: usize, cache_capacity: usize) -> Result<Self> {
        let ordering: Vec<VarId> = (0..num_vars).collect();
        Self::new(num_vars, &ordering, cache_capacity)
    }

    #[inline]
    pub fn num_vars(&self) -> usize {
        self.order.num_vars()
    }

    #[inline]
    pub fn order(&self) -> &VarOrder {
        &self.order
    }

    /// (variables, nodes ever created, live unique-table entries)
    pub fn size(&self) -> (usize, usize, usize) {
        (self.order.num_vars(), self.next_id - 2, self.utable.len())
    }

    #[inline]
    pub fn zero(&self) -> Bdd {
        self.attach(Node::Zero)
    }

    #[inline]
    pub fn one(&self) -> Bdd {
        self.attach(Node::One)
    }

    /// Positive literal: true exactly when `v` is true.
    pub fn var(&mut self, v: VarId) -> Result<Bdd> {
        self.order.check_var(v)?;
        let node = self.create_node(v, &Node::Zero, &Node::One);
        Ok(self.attach(node))
    }

    /// Negative literal.
    pub fn nvar(&mut self, v: VarId) -> Result<Bdd> {
        self.order.check_var(v)?;
        let node = self.create_node(v, &Node::One, &Node::Zero);
        Ok(self.attach(node))
    }

    /// The conjunction selecting exactly `values`: position `v` of the
    /// slice is the required value of variable `v`.
    pub fn assignment(&mut self, values: &[bool]) -> Result<Bdd> {
        if values.len() != self.num_vars() {
            return Err(DdError::AssignmentLength {
                expected: self.num_vars(),
                actual: values.len(),
            });
        }
        let mut node = Node::One;
        for i in (0..self.num_vars()).rev() {
            let v = self.order.var_at(i);
            node = if values[v] {
                self.create_node(v, &Node::Zero, &node)
            } else {
                self.create_node(v, &node, &Node::Zero)
            };
        }
        Ok(self.attach(node))
    }

    #[inline]
    pub(crate) fn attach(&self, root: Node) -> Bdd {
        Bdd {
            factory: self.factory,
            root,
        }
    }

    pub(crate) fn check(&self, f: &Bdd) -> Result<()> {
        if f.factory == self.factory {
            Ok(())
        } else {
            Err(DdError::ForeignFactory)
        }
    }

    /// Ordering position of a node's variable; terminals sit below every
    /// variable.
    #[inline]
    pub(crate) fn index(&self, f: &Node) -> OrderIndex {
        match f.var() {
            Some(v) => self.order.index_of(v),
            None => TERMINAL_INDEX,
        }
    }

    /// Ordering position clamped to the universe size, for gap arithmetic.
    #[inline]
    pub(crate) fn position(&self, f: &Node) -> usize {
        match f.var() {
            Some(v) => self.order.index_of(v),
            None => self.num_vars(),
        }
    }

    /// Hash-consed construction. Applies the reduction rule (`low == high`
    /// collapses to the child), then reuses a live node of the same shape.
    pub(crate) fn create_node(&mut self, var: VarId, low: &Node, high: &Node) -> Node {
        if low == high {
            return low.clone();
        }
        debug_assert!(self.order.index_of(var) < self.index(low));
        debug_assert!(self.order.index_of(var) < self.index(high));
        let key = (var, low.id(), high.id());
        if let Some(weak) = self.utable.get(&key) {
            if let Some(node) = weak.upgrade() {
                return node;
            }
        }
        let node = Node::new_nonterminal(self.next_id, var, low, high);
        self.next_id += 1;
        self.utable.insert(key, node.downgrade());
        self.maybe_sweep();
        node
    }

    fn maybe_sweep(&mut self) {
        if self.utable.len() >= self.sweep_at {
            self.sweep();
        }
    }

    /// Drops unique-table entries whose node has been reclaimed. Runs
    /// automatically once the table doubles past the live population.
    pub fn sweep(&mut self) {
        let before = self.utable.len();
        self.utable.retain(|_, weak| weak.upgrade().is_some());
        self.sweep_at = (self.utable.len() * 2).max(INITIAL_SWEEP_WATERMARK);
        log::debug!(
            "bdd unique table sweep: {} -> {} entries",
            before,
            self.utable.len()
        );
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub(crate) fn cached(&self, key: &(Operation, NodeId, NodeId)) -> Option<Node> {
        self.cache.get(key).and_then(|weak| weak.upgrade())
    }

    pub(crate) fn cache_put(&mut self, key: (Operation, NodeId, NodeId), node: &Node) {
        self.cache.put(key, node.downgrade());
    }
}
