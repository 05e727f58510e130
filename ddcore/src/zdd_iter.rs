use common::prelude::*;

use crate::nodes::Node;
use crate::zdd::{Zdd, ZddManager};

struct Frame {
    node: Node,
    branch: u8,
}

/// Depth-first enumeration of the member sets of a family.
///
/// Unlike the BDD walk there are no don't-care positions: a variable the
/// path never touches is absent from the member, so the buffer starts all
/// false and a position is only raised while the walk sits on that
/// variable's high edge. Low edges are taken first; the `LO` terminal is
/// never entered (as a high child it cannot occur at all).
///
/// `advance` hands out a slice of an internal buffer that is overwritten by
/// the next call; callers that retain members must copy them (or use
/// [`Members`], which does).
pub struct MemberWalker {
    stack: Vec<Frame>,
    buf: Vec<bool>,
}

impl MemberWalker {
    pub(crate) fn new(num_vars: usize, root: &Node) -> Self {
        let mut stack = Vec::with_capacity(num_vars + 1);
        if !matches!(root, Node::Zero) {
            stack.push(Frame {
                node: root.clone(),
                branch: 0,
            });
        }
        Self {
            stack,
            buf: vec![false; num_vars],
        }
    }

    /// The next member as a membership vector, or `None` once exhausted.
    pub fn advance(&mut self) -> Option<&[bool]> {
        while let Some(top) = self.stack.last_mut() {
            let node = top.node.clone();
            match (&node, top.branch) {
                (Node::One, 0) => {
                    top.branch = 2;
                    return Some(&self.buf);
                }
                (Node::One, _) => {
                    self.stack.pop();
                }
                (Node::NonTerminal(x), 0) => {
                    top.branch = 1;
                    if !matches!(x.low(), Node::Zero) {
                        let low = x.low().clone();
                        self.stack.push(Frame {
                            node: low,
                            branch: 0,
                        });
                    }
                }
                (Node::NonTerminal(x), 1) => {
                    top.branch = 2;
                    self.buf[x.var()] = true;
                    let high = x.high().clone();
                    self.stack.push(Frame {
                        node: high,
                        branch: 0,
                    });
                }
                (Node::NonTerminal(x), _) => {
                    self.buf[x.var()] = false;
                    self.stack.pop();
                }
                (Node::Zero, _) => unreachable!(),
            }
        }
        None
    }
}

/// Iterator adapter over [`MemberWalker`] that yields an owned membership
/// vector per set in the family.
pub struct Members {
    walker: MemberWalker,
}

impl Iterator for Members {
    type Item = Vec<bool>;

    fn next(&mut self) -> Option<Self::Item> {
        self.walker.advance().map(|buf| buf.to_vec())
    }
}

/// Iterator over the variables of a single element chain: a diagram whose
/// inner nodes all keep the `HI` terminal on their high edge and chain
/// along the low edge. This is the shape backing one pooled set (the
/// family of singletons of its elements); variables come out in ordering
/// order.
#[derive(Debug)]
pub struct PathElements {
    node: Node,
}

impl PathElements {
    pub(crate) fn new(root: &Node) -> Result<Self> {
        // validate the whole chain up front so exhaustion is the only way
        // iteration ends
        let mut cursor = root.clone();
        while let Node::NonTerminal(x) = cursor {
            if !matches!(x.high(), Node::One) {
                return Err(DdError::NotSinglePath);
            }
            cursor = x.low().clone();
        }
        Ok(Self { node: root.clone() })
    }
}

impl Iterator for PathElements {
    type Item = VarId;

    fn next(&mut self) -> Option<Self::Item> {
        match self.node.clone() {
            Node::NonTerminal(x) => {
                self.node = x.low().clone();
                Some(x.var())
            }
            _ => None,
        }
    }
}

impl ZddManager {
    /// Buffer-reusing enumeration of the member sets of `f`.
    pub fn member_walker(&self, f: &Zdd) -> Result<MemberWalker> {
        self.check(f)?;
        Ok(MemberWalker::new(self.num_vars(), f.root()))
    }

    /// Enumeration of the member sets of `f` as fresh membership vectors.
    pub fn members(&self, f: &Zdd) -> Result<Members> {
        Ok(Members {
            walker: self.member_walker(f)?,
        })
    }

    /// The variables along a single element chain, in ordering order.
    pub fn elements(&self, f: &Zdd) -> Result<PathElements> {
        self.check(f)?;
        PathElements::new(f.root())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_of(buf: &[bool]) -> Vec<usize> {
        (0..buf.len()).filter(|&v| buf[v]).collect()
    }

    #[test]
    fn empty_family_yields_nothing() {
        let dd = ZddManager::with_default_order(3, 16).unwrap();
        let empty = dd.empty();
        assert_eq!(dd.members(&empty).unwrap().count(), 0);
    }

    #[test]
    fn base_yields_the_empty_set_once() {
        let dd = ZddManager::with_default_order(3, 16).unwrap();
        let base = dd.base();
        let members: Vec<Vec<bool>> = dd.members(&base).unwrap().collect();
        assert_eq!(members, vec![vec![false, false, false]]);
    }

    #[test]
    fn members_match_the_constructed_family() {
        let mut dd = ZddManager::with_default_order(4, 64).unwrap();
        let family = vec![vec![0], vec![0, 1], vec![0, 1, 2], vec![0, 1, 2, 3]];
        let f = dd.family(&family).unwrap();
        let mut produced: Vec<Vec<usize>> = dd
            .members(&f)
            .unwrap()
            .map(|buf| set_of(&buf))
            .collect();
        produced.sort();
        let mut expected = family;
        expected.sort();
        assert_eq!(produced, expected);
    }

    #[test]
    fn skipped_variables_are_absent_not_free() {
        let mut dd = ZddManager::with_default_order(3, 16).unwrap();
        let e = dd.element(1).unwrap();
        let members: Vec<Vec<bool>> = dd.members(&e).unwrap().collect();
        assert_eq!(members, vec![vec![false, true, false]]);
    }

    #[test]
    fn element_chain_lists_variables_in_order() {
        let mut dd = ZddManager::with_default_order(4, 64).unwrap();
        // {{0},{2},{3}} is a lo-chain with HI high edges
        let f = dd.family(&[vec![0], vec![2], vec![3]]).unwrap();
        let vars: Vec<usize> = dd.elements(&f).unwrap().collect();
        assert_eq!(vars, vec![0, 2, 3]);
    }

    #[test]
    fn multi_element_sets_are_not_chains() {
        let mut dd = ZddManager::with_default_order(4, 64).unwrap();
        let f = dd.family(&[vec![0, 1]]).unwrap();
        assert_eq!(dd.elements(&f).unwrap_err(), DdError::NotSinglePath);
    }

    #[test]
    fn walker_and_iterator_agree_with_count() {
        let mut dd = ZddManager::with_default_order(4, 64).unwrap();
        let f = dd
            .family(&[vec![0, 2], vec![1], vec![1, 3], vec![], vec![3]])
            .unwrap();
        let n = dd.count(&f).unwrap();
        let mut walker = dd.member_walker(&f).unwrap();
        let mut seen = 0;
        while walker.advance().is_some() {
            seen += 1;
        }
        assert_eq!(seen, n);
        assert_eq!(dd.members(&f).unwrap().count() as u64, n);
    }
}
