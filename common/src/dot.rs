use std::io;

use crate::common::{DdHashSet, NodeId};

/// Graphviz export of one diagram. Implementors supply `dot_impl`, which
/// dumps the nodes reachable from a root; the driver wraps the dump in a
/// `digraph` block. Rendering the text to an image is left to an external
/// `dot` process.
pub trait Dot {
    type Node;

    fn dot<T>(&self, io: &mut T, node: &Self::Node) -> io::Result<()>
    where
        T: io::Write,
    {
        let mut visited: DdHashSet<NodeId> = DdHashSet::default();
        io.write_all(b"digraph { node [fontsize=10];\n")?;
        self.dot_impl(io, node, &mut visited)?;
        io.write_all(b"}\n")
    }

    fn dot_string(&self, node: &Self::Node) -> String {
        let mut buf = Vec::new();
        self.dot(&mut buf, node).expect("write to Vec cannot fail");
        String::from_utf8(buf).expect("dot output is ascii")
    }

    fn dot_impl<T>(
        &self,
        io: &mut T,
        node: &Self::Node,
        visited: &mut DdHashSet<NodeId>,
    ) -> io::Result<()>
    where
        T: io::Write;
}
