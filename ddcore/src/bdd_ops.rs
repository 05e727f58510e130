use common::prelude::*;
use num_traits::Num;

use crate::bdd::{Bdd, BddManager};
use crate::nodes::Node;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Not,
    And,
    Or,
    Xor,
}

/// `2^k` in the caller's numeric type.
pub(crate) fn pow2<T: Num + Clone>(k: usize) -> T {
    let two = T::one() + T::one();
    let mut result = T::one();
    for _ in 0..k {
        result = result * two.clone();
    }
    result
}

impl BddManager {
    pub fn not(&mut self, f: &Bdd) -> Result<Bdd> {
        self.check(f)?;
        let root = self.not_rec(f.root());
        Ok(self.attach(root))
    }

    pub fn and(&mut self, f: &Bdd, g: &Bdd) -> Result<Bdd> {
        self.check(f)?;
        self.check(g)?;
        let root = self.and_rec(f.root(), g.root());
        Ok(self.attach(root))
    }

    pub fn or(&mut self, f: &Bdd, g: &Bdd) -> Result<Bdd> {
        self.check(f)?;
        self.check(g)?;
        let root = self.or_rec(f.root(), g.root());
        Ok(self.attach(root))
    }

    pub fn xor(&mut self, f: &Bdd, g: &Bdd) -> Result<Bdd> {
        self.check(f)?;
        self.check(g)?;
        let root = self.xor_rec(f.root(), g.root());
        Ok(self.attach(root))
    }

    pub fn imp(&mut self, f: &Bdd, g: &Bdd) -> Result<Bdd> {
        let tmp = self.not(f)?;
        self.or(&tmp, g)
    }

    pub fn nand(&mut self, f: &Bdd, g: &Bdd) -> Result<Bdd> {
        let tmp = self.and(f, g)?;
        self.not(&tmp)
    }

    pub fn nor(&mut self, f: &Bdd, g: &Bdd) -> Result<Bdd> {
        let tmp = self.or(f, g)?;
        self.not(&tmp)
    }

    pub fn xnor(&mut self, f: &Bdd, g: &Bdd) -> Result<Bdd> {
        let tmp = self.xor(f, g)?;
        self.not(&tmp)
    }

    pub fn ite(&mut self, f: &Bdd, g: &Bdd, h: &Bdd) -> Result<Bdd> {
        let x1 = self.and(f, g)?;
        let barf = self.not(f)?;
        let x2 = self.and(&barf, h)?;
        self.or(&x1, &x2)
    }

    /// Commutative operators share one cache entry per operand pair.
    fn commuting_key(op: Operation, f: &Node, g: &Node) -> (Operation, NodeId, NodeId) {
        let (a, b) = (f.id(), g.id());
        if a <= b {
            (op, a, b)
        } else {
            (op, b, a)
        }
    }

    fn not_rec(&mut self, f: &Node) -> Node {
        let key = (Operation::Not, f.id(), 0);
        if let Some(node) = self.cached(&key) {
            return node;
        }
        let result = match f {
            Node::Zero => Node::One,
            Node::One => Node::Zero,
            Node::NonTerminal(fnode) => {
                let low = self.not_rec(fnode.low());
                let high = self.not_rec(fnode.high());
                self.create_node(fnode.var(), &low, &high)
            }
        };
        self.cache_put(key, &result);
        result
    }

    fn and_rec(&mut self, f: &Node, g: &Node) -> Node {
        let key = Self::commuting_key(Operation::And, f, g);
        if let Some(node) = self.cached(&key) {
            return node;
        }
        let result = match (f, g) {
            (Node::Zero, _) | (_, Node::Zero) => Node::Zero,
            (Node::One, _) => g.clone(),
            (_, Node::One) => f.clone(),
            (Node::NonTerminal(fnode), Node::NonTerminal(gnode)) if fnode.id() == gnode.id() => {
                f.clone()
            }
            (Node::NonTerminal(fnode), Node::NonTerminal(_)) if self.index(f) < self.index(g) => {
                let low = self.and_rec(fnode.low(), g);
                let high = self.and_rec(fnode.high(), g);
                self.create_node(fnode.var(), &low, &high)
            }
            (Node::NonTerminal(_), Node::NonTerminal(gnode)) if self.index(g) < self.index(f) => {
                let low = self.and_rec(f, gnode.low());
                let high = self.and_rec(f, gnode.high());
                self.create_node(gnode.var(), &low, &high)
            }
            (Node::NonTerminal(fnode), Node::NonTerminal(gnode)) => {
                let low = self.and_rec(fnode.low(), gnode.low());
                let high = self.and_rec(fnode.high(), gnode.high());
                self.create_node(fnode.var(), &low, &high)
            }
        };
        self.cache_put(key, &result);
        result
    }

    fn or_rec(&mut self, f: &Node, g: &Node) -> Node {
        let key = Self::commuting_key(Operation::Or, f, g);
        if let Some(node) = self.cached(&key) {
            return node;
        }
        let result = match (f, g) {
            (Node::One, _) | (_, Node::One) => Node::One,
            (Node::Zero, _) => g.clone(),
            (_, Node::Zero) => f.clone(),
            (Node::NonTerminal(fnode), Node::NonTerminal(gnode)) if fnode.id() == gnode.id() => {
                f.clone()
            }
            (Node::NonTerminal(fnode), Node::NonTerminal(_)) if self.index(f) < self.index(g) => {
                let low = self.or_rec(fnode.low(), g);
                let high = self.or_rec(fnode.high(), g);
                self.create_node(fnode.var(), &low, &high)
            }
            (Node::NonTerminal(_), Node::NonTerminal(gnode)) if self.index(g) < self.index(f) => {
                let low = self.or_rec(f, gnode.low());
                let high = self.or_rec(f, gnode.high());
                self.create_node(gnode.var(), &low, &high)
            }
            (Node::NonTerminal(fnode), Node::NonTerminal(gnode)) => {
                let low = self.or_rec(fnode.low(), gnode.low());
                let high = self.or_rec(fnode.high(), gnode.high());
                self.create_node(fnode.var(), &low, &high)
            }
        };
        self.cache_put(key, &result);
        result
    }

    fn xor_rec(&mut self, f: &Node, g: &Node) -> Node {
        let key = Self::commuting_key(Operation::Xor, f, g);
        if let Some(node) = self.cached(&key) {
            return node;
        }
        let result = match (f, g) {
            _ if f == g => Node::Zero,
            (Node::Zero, _) => g.clone(),
            (_, Node::Zero) => f.clone(),
            (Node::One, _) => self.not_rec(g),
            (_, Node::One) => self.not_rec(f),
            (Node::NonTerminal(fnode), Node::NonTerminal(_)) if self.index(f) < self.index(g) => {
                let low = self.xor_rec(fnode.low(), g);
                let high = self.xor_rec(fnode.high(), g);
                self.create_node(fnode.var(), &low, &high)
            }
            (Node::NonTerminal(_), Node::NonTerminal(gnode)) if self.index(g) < self.index(f) => {
                let low = self.xor_rec(f, gnode.low());
                let high = self.xor_rec(f, gnode.high());
                self.create_node(gnode.var(), &low, &high)
            }
            (Node::NonTerminal(fnode), Node::NonTerminal(gnode)) => {
                let low = self.xor_rec(fnode.low(), gnode.low());
                let high = self.xor_rec(fnode.high(), gnode.high());
                self.create_node(fnode.var(), &low, &high)
            }
        };
        self.cache_put(key, &result);
        result
    }

    /// Number of satisfying assignments over the full universe.
    pub fn count(&self, f: &Bdd) -> Result<u64> {
        self.satcount::<u64>(f)
    }

    /// Satisfying-assignment count in the caller's numeric type. Reduction
    /// elides variables whose value does not matter on a path, so each
    /// skipped ordering position contributes a factor of two.
    pub fn satcount<T: Num + Clone>(&self, f: &Bdd) -> Result<T> {
        self.check(f)?;
        let mut memo: DdHashMap<NodeId, T> = DdHashMap::default();
        let below = self.satcount_rec(f.root(), &mut memo);
        Ok(pow2::<T>(self.position(f.root())) * below)
    }

    fn satcount_rec<T: Num + Clone>(&self, f: &Node, memo: &mut DdHashMap<NodeId, T>) -> T {
        match f {
            Node::Zero => T::zero(),
            Node::One => T::one(),
            Node::NonTerminal(fnode) => {
                if let Some(c) = memo.get(&fnode.id()) {
                    return c.clone();
                }
                let here = self.position(f);
                let low = self.satcount_rec(fnode.low(), memo);
                let high = self.satcount_rec(fnode.high(), memo);
                let low_gap = self.position(fnode.low()) - here - 1;
                let high_gap = self.position(fnode.high()) - here - 1;
                let c = pow2::<T>(low_gap) * low + pow2::<T>(high_gap) * high;
                memo.insert(fnode.id(), c.clone());
                c
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> BddManager {
        BddManager::with_default_order(3, 256).unwrap()
    }

    #[test]
    fn and_of_literals() {
        let mut dd = manager();
        let x = dd.var(0).unwrap();
        let y = dd.var(1).unwrap();
        let z = dd.and(&x, &y).unwrap();
        assert_eq!(dd.count(&z).unwrap(), 2);
    }

    #[test]
    fn terminal_rules() {
        let mut dd = manager();
        let x = dd.var(0).unwrap();
        let zero = dd.zero();
        let one = dd.one();
        assert_eq!(dd.and(&x, &one).unwrap(), x);
        assert_eq!(dd.and(&x, &zero).unwrap(), zero);
        assert_eq!(dd.or(&x, &zero).unwrap(), x);
        assert_eq!(dd.or(&x, &one).unwrap(), one);
        assert_eq!(dd.xor(&x, &zero).unwrap(), x);
        let nx = dd.not(&x).unwrap();
        assert_eq!(dd.xor(&x, &one).unwrap(), nx);
    }

    #[test]
    fn idempotence_short_circuits() {
        let mut dd = manager();
        let x = dd.var(0).unwrap();
        assert_eq!(dd.and(&x, &x).unwrap(), x);
        assert_eq!(dd.or(&x, &x).unwrap(), x);
        assert_eq!(dd.xor(&x, &x).unwrap(), dd.zero());
    }

    #[test]
    fn double_negation_restores_the_handle() {
        let mut dd = manager();
        let x = dd.var(0).unwrap();
        let y = dd.var(2).unwrap();
        let f = dd.or(&x, &y).unwrap();
        let nf = dd.not(&f).unwrap();
        let nnf = dd.not(&nf).unwrap();
        assert_eq!(nnf, f);
    }

    #[test]
    fn counts_track_dont_care_gaps() {
        let mut dd = manager();
        // x0 alone leaves x1 and x2 free
        let x = dd.var(0).unwrap();
        assert_eq!(dd.count(&x).unwrap(), 4);
        // a variable in the middle of the order leaves the outer two free
        let y = dd.var(1).unwrap();
        assert_eq!(dd.count(&y).unwrap(), 4);
        let one = dd.one();
        assert_eq!(dd.count(&one).unwrap(), 8);
        let zero = dd.zero();
        assert_eq!(dd.count(&zero).unwrap(), 0);
    }

    #[test]
    fn count_is_generic_over_the_numeric_type() {
        let mut dd = manager();
        let x = dd.var(0).unwrap();
        assert_eq!(dd.satcount::<u32>(&x).unwrap(), 4u32);
        assert_eq!(dd.satcount::<u128>(&x).unwrap(), 4u128);
    }

    #[test]
    fn ite_matches_its_expansion() {
        let mut dd = manager();
        let x = dd.var(0).unwrap();
        let y = dd.var(1).unwrap();
        let z = dd.var(2).unwrap();
        let a = dd.ite(&x, &y, &z).unwrap();
        let t1 = dd.and(&x, &y).unwrap();
        let nx = dd.not(&x).unwrap();
        let t2 = dd.and(&nx, &z).unwrap();
        let b = dd.or(&t1, &t2).unwrap();
        assert_eq!(a, b);
    }
}
