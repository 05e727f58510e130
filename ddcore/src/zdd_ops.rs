use common::prelude::*;
use num_traits::Num;

use crate::nodes::Node;
use crate::zdd::{Zdd, ZddManager};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZddOperation {
    Union,
    Intersect,
    Setdiff,
    Subset0,
    Subset1,
    Change,
}

impl ZddManager {
    pub fn union(&mut self, f: &Zdd, g: &Zdd) -> Result<Zdd> {
        self.check(f)?;
        self.check(g)?;
        let root = self.union_rec(f.root(), g.root());
        Ok(self.attach(root))
    }

    pub fn intersect(&mut self, f: &Zdd, g: &Zdd) -> Result<Zdd> {
        self.check(f)?;
        self.check(g)?;
        let root = self.intersect_rec(f.root(), g.root());
        Ok(self.attach(root))
    }

    pub fn setdiff(&mut self, f: &Zdd, g: &Zdd) -> Result<Zdd> {
        self.check(f)?;
        self.check(g)?;
        let root = self.setdiff_rec(f.root(), g.root());
        Ok(self.attach(root))
    }

    /// The sets of `f` that contain `v`, with `v` stripped from each.
    pub fn subset1(&mut self, f: &Zdd, v: VarId) -> Result<Zdd> {
        self.check(f)?;
        self.order().check_var(v)?;
        let root = self.subset1_rec(f.root(), v);
        Ok(self.attach(root))
    }

    /// The sets of `f` that do not contain `v`.
    pub fn subset0(&mut self, f: &Zdd, v: VarId) -> Result<Zdd> {
        self.check(f)?;
        self.order().check_var(v)?;
        let root = self.subset0_rec(f.root(), v);
        Ok(self.attach(root))
    }

    /// Toggles membership of `v` in every set of `f`.
    pub fn change(&mut self, f: &Zdd, v: VarId) -> Result<Zdd> {
        self.check(f)?;
        self.order().check_var(v)?;
        let root = self.change_rec(f.root(), v);
        Ok(self.attach(root))
    }

    /// Commutative operators share one cache entry per operand pair.
    fn commuting_key(op: ZddOperation, f: &Node, g: &Node) -> (ZddOperation, NodeId, usize) {
        let (a, b) = (f.id(), g.id());
        if a <= b {
            (op, a, b)
        } else {
            (op, b, a)
        }
    }

    fn union_rec(&mut self, f: &Node, g: &Node) -> Node {
        let key = Self::commuting_key(ZddOperation::Union, f, g);
        if let Some(node) = self.cached(&key) {
            return node;
        }
        let result = match (f, g) {
            (Node::Zero, _) => g.clone(),
            (_, Node::Zero) => f.clone(),
            (Node::One, Node::One) => Node::One,
            (Node::One, Node::NonTerminal(gnode)) => {
                let low = self.union_rec(f, gnode.low());
                self.create_node(gnode.var(), &low, gnode.high())
            }
            (Node::NonTerminal(fnode), Node::One) => {
                let low = self.union_rec(fnode.low(), g);
                self.create_node(fnode.var(), &low, fnode.high())
            }
            (Node::NonTerminal(fnode), Node::NonTerminal(gnode)) if fnode.id() == gnode.id() => {
                f.clone()
            }
            (Node::NonTerminal(fnode), Node::NonTerminal(_)) if self.index(f) < self.index(g) => {
                // g holds no set containing f's top variable
                let low = self.union_rec(fnode.low(), g);
                self.create_node(fnode.var(), &low, fnode.high())
            }
            (Node::NonTerminal(_), Node::NonTerminal(gnode)) if self.index(g) < self.index(f) => {
                let low = self.union_rec(f, gnode.low());
                self.create_node(gnode.var(), &low, gnode.high())
            }
            (Node::NonTerminal(fnode), Node::NonTerminal(gnode)) => {
                let low = self.union_rec(fnode.low(), gnode.low());
                let high = self.union_rec(fnode.high(), gnode.high());
                self.create_node(fnode.var(), &low, &high)
            }
        };
        self.cache_put(key, &result);
        result
    }

    fn intersect_rec(&mut self, f: &Node, g: &Node) -> Node {
        let key = Self::commuting_key(ZddOperation::Intersect, f, g);
        if let Some(node) = self.cached(&key) {
            return node;
        }
        let result = match (f, g) {
            (Node::Zero, _) | (_, Node::Zero) => Node::Zero,
            (Node::One, Node::One) => Node::One,
            // only members without the inner side's top variable can match
            (Node::One, Node::NonTerminal(gnode)) => self.intersect_rec(f, gnode.low()),
            (Node::NonTerminal(fnode), Node::One) => self.intersect_rec(fnode.low(), g),
            (Node::NonTerminal(fnode), Node::NonTerminal(gnode)) if fnode.id() == gnode.id() => {
                f.clone()
            }
            (Node::NonTerminal(fnode), Node::NonTerminal(_)) if self.index(f) < self.index(g) => {
                self.intersect_rec(fnode.low(), g)
            }
            (Node::NonTerminal(_), Node::NonTerminal(gnode)) if self.index(g) < self.index(f) => {
                self.intersect_rec(f, gnode.low())
            }
            (Node::NonTerminal(fnode), Node::NonTerminal(gnode)) => {
                let low = self.intersect_rec(fnode.low(), gnode.low());
                let high = self.intersect_rec(fnode.high(), gnode.high());
                self.create_node(fnode.var(), &low, &high)
            }
        };
        self.cache_put(key, &result);
        result
    }

    fn setdiff_rec(&mut self, f: &Node, g: &Node) -> Node {
        let key = (ZddOperation::Setdiff, f.id(), g.id());
        if let Some(node) = self.cached(&key) {
            return node;
        }
        let result = match (f, g) {
            (Node::Zero, _) => Node::Zero,
            (_, Node::Zero) => f.clone(),
            (Node::One, Node::One) => Node::Zero,
            (Node::One, Node::NonTerminal(gnode)) => self.setdiff_rec(f, gnode.low()),
            (Node::NonTerminal(fnode), Node::One) => {
                let low = self.setdiff_rec(fnode.low(), g);
                self.create_node(fnode.var(), &low, fnode.high())
            }
            (Node::NonTerminal(fnode), Node::NonTerminal(gnode)) if fnode.id() == gnode.id() => {
                Node::Zero
            }
            (Node::NonTerminal(fnode), Node::NonTerminal(_)) if self.index(f) < self.index(g) => {
                // g cannot subtract sets containing f's top variable
                let low = self.setdiff_rec(fnode.low(), g);
                self.create_node(fnode.var(), &low, fnode.high())
            }
            (Node::NonTerminal(_), Node::NonTerminal(gnode)) if self.index(g) < self.index(f) => {
                self.setdiff_rec(f, gnode.low())
            }
            (Node::NonTerminal(fnode), Node::NonTerminal(gnode)) => {
                let low = self.setdiff_rec(fnode.low(), gnode.low());
                let high = self.setdiff_rec(fnode.high(), gnode.high());
                self.create_node(fnode.var(), &low, &high)
            }
        };
        self.cache_put(key, &result);
        result
    }

    fn subset1_rec(&mut self, f: &Node, v: VarId) -> Node {
        let key = (ZddOperation::Subset1, f.id(), v);
        if let Some(node) = self.cached(&key) {
            return node;
        }
        let vi = self.order().index_of(v);
        let result = match f {
            Node::NonTerminal(fnode) if fnode.var() == v => fnode.high().clone(),
            Node::NonTerminal(fnode) if self.index(f) < vi => {
                let low = self.subset1_rec(fnode.low(), v);
                let high = self.subset1_rec(fnode.high(), v);
                self.create_node(fnode.var(), &low, &high)
            }
            // below v in the ordering (or terminal): no set contains v
            _ => Node::Zero,
        };
        self.cache_put(key, &result);
        result
    }

    fn subset0_rec(&mut self, f: &Node, v: VarId) -> Node {
        let key = (ZddOperation::Subset0, f.id(), v);
        if let Some(node) = self.cached(&key) {
            return node;
        }
        let vi = self.order().index_of(v);
        let result = match f {
            Node::NonTerminal(fnode) if fnode.var() == v => fnode.low().clone(),
            Node::NonTerminal(fnode) if self.index(f) < vi => {
                let low = self.subset0_rec(fnode.low(), v);
                let high = self.subset0_rec(fnode.high(), v);
                self.create_node(fnode.var(), &low, &high)
            }
            // below v in the ordering (or terminal): v already absent
            _ => f.clone(),
        };
        self.cache_put(key, &result);
        result
    }

    fn change_rec(&mut self, f: &Node, v: VarId) -> Node {
        let key = (ZddOperation::Change, f.id(), v);
        if let Some(node) = self.cached(&key) {
            return node;
        }
        let vi = self.order().index_of(v);
        let result = match f {
            Node::NonTerminal(fnode) if fnode.var() == v => {
                self.create_node(v, fnode.high(), fnode.low())
            }
            Node::NonTerminal(fnode) if self.index(f) < vi => {
                let low = self.change_rec(fnode.low(), v);
                let high = self.change_rec(fnode.high(), v);
                self.create_node(fnode.var(), &low, &high)
            }
            // below v in the ordering (or terminal): v joins every set
            _ => self.create_node(v, &Node::Zero, f),
        };
        self.cache_put(key, &result);
        result
    }

    /// Number of sets in the family.
    pub fn count(&self, f: &Zdd) -> Result<u64> {
        self.count_as::<u64>(f)
    }

    /// Member count in the caller's numeric type. No don't-care factor
    /// applies: an elided variable is absent from the set, not free.
    pub fn count_as<T: Num + Clone>(&self, f: &Zdd) -> Result<T> {
        self.check(f)?;
        let mut memo: DdHashMap<NodeId, T> = DdHashMap::default();
        Ok(self.count_rec(f.root(), &mut memo))
    }

    fn count_rec<T: Num + Clone>(&self, f: &Node, memo: &mut DdHashMap<NodeId, T>) -> T {
        match f {
            Node::Zero => T::zero(),
            Node::One => T::one(),
            Node::NonTerminal(fnode) => {
                if let Some(c) = memo.get(&fnode.id()) {
                    return c.clone();
                }
                let c = self.count_rec(fnode.low(), memo) + self.count_rec(fnode.high(), memo);
                memo.insert(fnode.id(), c.clone());
                c
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> ZddManager {
        ZddManager::with_default_order(4, 256).unwrap()
    }

    #[test]
    fn union_with_empty_is_identity() {
        let mut dd = manager();
        let f = dd.family(&[vec![0, 1], vec![2]]).unwrap();
        let empty = dd.empty();
        assert_eq!(dd.union(&f, &empty).unwrap(), f);
        assert_eq!(dd.union(&empty, &f).unwrap(), f);
    }

    #[test]
    fn union_merges_families() {
        let mut dd = manager();
        let f = dd.family(&[vec![0]]).unwrap();
        let g = dd.family(&[vec![1], vec![]]).unwrap();
        let h = dd.union(&f, &g).unwrap();
        let expected = dd.family(&[vec![0], vec![1], vec![]]).unwrap();
        assert_eq!(h, expected);
        assert_eq!(dd.count(&h).unwrap(), 3);
    }

    #[test]
    fn intersect_keeps_common_members_only() {
        let mut dd = manager();
        let f = dd.family(&[vec![0, 1], vec![2], vec![]]).unwrap();
        let g = dd.family(&[vec![0, 1], vec![3]]).unwrap();
        let h = dd.intersect(&f, &g).unwrap();
        let expected = dd.family(&[vec![0, 1]]).unwrap();
        assert_eq!(h, expected);
    }

    #[test]
    fn base_intersection_probes_the_empty_set() {
        let mut dd = manager();
        let with_empty = dd.family(&[vec![0], vec![]]).unwrap();
        let without_empty = dd.family(&[vec![0]]).unwrap();
        let base = dd.base();
        assert_eq!(dd.intersect(&with_empty, &base).unwrap(), base);
        let none = dd.intersect(&without_empty, &base).unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn setdiff_subtracts_members() {
        let mut dd = manager();
        let f = dd.family(&[vec![0], vec![1], vec![2, 3]]).unwrap();
        let g = dd.family(&[vec![1], vec![3]]).unwrap();
        let h = dd.setdiff(&f, &g).unwrap();
        let expected = dd.family(&[vec![0], vec![2, 3]]).unwrap();
        assert_eq!(h, expected);
        assert_eq!(dd.setdiff(&f, &f).unwrap(), dd.empty());
        assert_eq!(dd.setdiff(&f, &dd.empty()).unwrap(), f);
    }

    #[test]
    fn subset_operators_split_on_membership() {
        let mut dd = manager();
        let f = dd
            .family(&[vec![0, 1], vec![1, 2], vec![2], vec![]])
            .unwrap();
        let with1 = dd.subset1(&f, 1).unwrap();
        let stripped = dd.family(&[vec![0], vec![2]]).unwrap();
        assert_eq!(with1, stripped);
        let without1 = dd.subset0(&f, 1).unwrap();
        let kept = dd.family(&[vec![2], vec![]]).unwrap();
        assert_eq!(without1, kept);
    }

    #[test]
    fn subset_recombination_reconstructs_the_family() {
        let mut dd = manager();
        let f = dd
            .family(&[vec![0, 1], vec![1, 2], vec![2], vec![]])
            .unwrap();
        let hi = dd.subset1(&f, 1).unwrap();
        let lo = dd.subset0(&f, 1).unwrap();
        let hi1 = dd.change(&hi, 1).unwrap();
        let back = dd.union(&lo, &hi1).unwrap();
        assert_eq!(back, f);
    }

    #[test]
    fn change_is_an_involution() {
        let mut dd = manager();
        let f = dd.family(&[vec![0, 2], vec![1], vec![]]).unwrap();
        for v in 0..4 {
            let once = dd.change(&f, v).unwrap();
            let twice = dd.change(&once, v).unwrap();
            assert_eq!(twice, f);
        }
    }

    #[test]
    fn change_toggles_membership() {
        let mut dd = manager();
        let f = dd.family(&[vec![0], vec![0, 1]]).unwrap();
        let g = dd.change(&f, 0).unwrap();
        let expected = dd.family(&[vec![], vec![1]]).unwrap();
        assert_eq!(g, expected);
    }

    #[test]
    fn count_is_inclusion_exclusion_consistent() {
        let mut dd = manager();
        let f = dd.family(&[vec![0], vec![1], vec![0, 1]]).unwrap();
        let g = dd.family(&[vec![1], vec![2], vec![0, 1]]).unwrap();
        let u = dd.union(&f, &g).unwrap();
        let i = dd.intersect(&f, &g).unwrap();
        let lhs = dd.count(&u).unwrap() + dd.count(&i).unwrap();
        let rhs = dd.count(&f).unwrap() + dd.count(&g).unwrap();
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn count_descends_through_inner_nodes() {
        let mut dd = manager();
        // a family whose root variable is 0 but whose counts hinge on the
        // terminals, not on any variable test
        let f = dd.family(&[vec![0], vec![0, 3], vec![3]]).unwrap();
        assert_eq!(dd.count(&f).unwrap(), 3);
        assert_eq!(dd.count(&dd.base()).unwrap(), 1);
        assert_eq!(dd.count(&dd.empty()).unwrap(), 0);
    }
}
