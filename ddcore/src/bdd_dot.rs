use std::io;

use common::prelude::*;

use crate::bdd::{Bdd, BddManager};
use crate::nodes::Node;

impl Dot for BddManager {
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

impl BddManager {
    /// DOT serialisation of `f`, ready to feed to an external Graphviz
    /// process.
    pub fn to_dot(&self, f: &Bdd) -> Result<String> {
        self.check(f)?;
        Ok(self.dot_string(f.root()))
    }
}
