/// ZDD (Zero-suppressed Decision Diagram) manager.
///
/// A ZDD represents a family of subsets of a fixed universe. An inner node
/// `(v, lo, hi)` denotes `lo ∪ { S ∪ {v} : S ∈ hi }`; the `LO` terminal is
/// the empty family and `HI` is the family holding only the empty set.
///
/// The reduction rule differs from the BDD one: a node whose high edge is
/// `LO` collapses to its low child, which is what elides variables that
/// appear in no set of the family.
///
/// Unique table, operation cache, reclamation and handle semantics match
/// [`crate::bdd::BddManager`].
use std::fmt;
use std::hash::{Hash, Hasher};

use common::prelude::*;

use crate::nodes::{Node, WeakNode};
use crate::order::{VarOrder, TERMINAL_INDEX};
use crate::zdd_ops::ZddOperation;

/// A family of subsets: one root node plus the id of the owning factory.
#[derive(Debug, Clone)]
pub struct Zdd {
    factory: FactoryId,
    root: Node,
}

impl Zdd {
    #[inline]
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// True iff this is the empty family.
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self.root, Node::Zero)
    }

    /// True iff this is the family `{∅}`.
    #[inline]
    pub fn is_base(&self) -> bool {
        matches!(self.root, Node::One)
    }
}

impl PartialEq for Zdd {
    fn eq(&self, other: &Self) -> bool {
        self.factory == other.factory && self.root == other.root
    }
}

impl Eq for Zdd {}

impl Hash for Zdd {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.factory.hash(state);
        self.root.hash(state);
    }
}

impl fmt::Display for Zdd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)
    }
}

pub struct ZddManager {
    factory: FactoryId,
    order: VarOrder,
    next_id: NodeId,
    utable: DdHashMap<(VarId, NodeId, NodeId), WeakNode>,
    cache: OpCache<(ZddOperation, NodeId, usize), WeakNode>,
    sweep_at: usize,
}

const INITIAL_SWEEP_WATERMARK: usize = 64;

impl ZddManager {
    /// Creates a factory over `num_vars` variables arranged by `ordering`,
    /// which must be a permutation of `0..num_vars`.
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

    /// The empty family.
    #[inline]
    pub fn empty(&self) -> Zdd {
        self.attach(Node::Zero)
    }

    /// The family containing only the empty set.
    #[inline]
    pub fn base(&self) -> Zdd {
        self.attach(Node::One)
    }

    /// The family `{{v}}`.
    pub fn element(&mut self, v: VarId) -> Result<Zdd> {
        self.order.check_var(v)?;
        let node = self.create_node(v, &Node::Zero, &Node::One);
        Ok(self.attach(node))
    }

    /// Builds the family holding exactly the given sets, by partitioning on
    /// each variable along the ordering. Duplicate sets collapse into one
    /// member. Every listed element must lie in `0..num_vars`.
    pub fn family(&mut self, sets: &[Vec<VarId>]) -> Result<Zdd> {
        let n = self.num_vars();
        let mut masks = Vec::with_capacity(sets.len());
        for set in sets {
            let mut mask = vec![false; n];
            for &v in set {
                self.order.check_var(v)?;
                mask[v] = true;
            }
            masks.push(mask);
        }
        let rows: Vec<usize> = (0..masks.len()).collect();
        let root = self.family_rec(&masks, &rows, 0);
        Ok(self.attach(root))
    }

    fn family_rec(&mut self, masks: &[Vec<bool>], rows: &[usize], pos: usize) -> Node {
        if rows.is_empty() {
            return Node::Zero;
        }
        if pos == self.num_vars() {
            // every remaining row is (a duplicate of) the empty set
            return Node::One;
        }
        let v = self.order.var_at(pos);
        let without: Vec<usize> = rows.iter().copied().filter(|&r| !masks[r][v]).collect();
        let with: Vec<usize> = rows.iter().copied().filter(|&r| masks[r][v]).collect();
        let low = self.family_rec(masks, &without, pos + 1);
        let high = self.family_rec(masks, &with, pos + 1);
        self.create_node(v, &low, &high)
    }

    #[inline]
    pub(crate) fn attach(&self, root: Node) -> Zdd {
        Zdd {
            factory: self.factory,
            root,
        }
    }

    pub(crate) fn check(&self, f: &Zdd) -> Result<()> {
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

    /// Hash-consed construction. Applies the zero-suppression rule (a `LO`
    /// high edge collapses the node into its low child), then reuses a live
    /// node of the same shape.
    pub(crate) fn create_node(&mut self, var: VarId, low: &Node, high: &Node) -> Node {
        if matches!(high, Node::Zero) {
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
            "zdd unique table sweep: {} -> {} entries",
            before,
            self.utable.len()
        );
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub(crate) fn cached(&self, key: &(ZddOperation, NodeId, usize)) -> Option<Node> {
        self.cache.get(key).and_then(|weak| weak.upgrade())
    }

    pub(crate) fn cache_put(&mut self, key: (ZddOperation, NodeId, usize), node: &Node) {
        self.cache.put(key, node.downgrade());
    }
}
