use std::io;

use common::prelude::*;

use crate::nodes::Node;
use crate::zdd::{Zdd, ZddManager};

impl Dot for ZddManager {
    type Node = Node;

    fn dot_impl<T>(
        &self,
        io: &mut T,
        node: &Node,
        visited: &mut DdHashSet<NodeId>,
    ) -> io::Result<()>
    where
        T: io::Write,
    {
        if visited.contains(&node.id()) {
            return Ok(());
        }
        match node {
            Node::Zero => {
                writeln!(io, "\"obj{}\" [shape=square, label=\"F\"];", node.id())?;
            }
            Node::One => {
                writeln!(io, "\"obj{}\" [shape=square, label=\"T\"];", node.id())?;
            }
            Node::NonTerminal(fnode) => {
                writeln!(
                    io,
                    "\"obj{}\" [shape=circle, label=\"{}\"];",
                    fnode.id(),
                    fnode.var()
                )?;
                for (edge, child) in fnode.iter().enumerate() {
                    self.dot_impl(io, child, visited)?;
                    let label = if edge == 0 { "F" } else { "T" };
                    writeln!(
                        io,
                        "\"obj{}\" -> \"obj{}\" [label=\"{}\"];",
                        fnode.id(),
                        child.id(),
                        label
                    )?;
                }
            }
        }
        visited.insert(node.id());
        Ok(())
    }
}

impl ZddManager {
    /// DOT serialisation of `f`, ready to feed to an external Graphviz
    /// process.
    pub fn to_dot(&self, f: &Zdd) -> Result<String> {
        self.check(f)?;
        Ok(self.dot_string(f.root()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_a_family() {
        let mut dd = ZddManager::with_default_order(3, 16).unwrap();
        let f = dd.family(&[vec![0, 1], vec![2]]).unwrap();
        let dot = dd.to_dot(&f).unwrap();
        assert!(dot.starts_with("digraph {"));
        assert!(dot.contains("shape=circle"));
        assert!(dot.contains("shape=square"));
        assert!(dot.ends_with("}\n"));
    }
}
