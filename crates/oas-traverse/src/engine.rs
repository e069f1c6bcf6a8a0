use oas_model::{KindSet, NodeRef, Segment};

use crate::path::{NodePath, Path};
use crate::{Control, GenericVisitor, Tree, Visitor};

/// Walks the typed tree under `root` depth-first, in document order,
/// calling `visitor` for every node it is interested in.
///
/// Visitor errors are returned as they are. The engine keeps no state
/// between calls, so traversing again starts over from `root`.
pub fn traverse<'a, V: Visitor<'a> + ?Sized>(
    root: impl Into<NodeRef<'a>>,
    visitor: &mut V,
) -> Result<(), V::Error> {
    run(root.into(), &mut Typed(visitor))
}

/// Walks a generic tree under `root`, the root included.
pub fn traverse_generic<'a, T: Tree<'a>, V: GenericVisitor<'a, T> + ?Sized>(
    root: T,
    visitor: &mut V,
) -> Result<(), V::Error> {
    run(root, &mut Generic(visitor))
}

trait Hooks<'a, T> {
    type Error;

    fn interest(&self) -> KindSet;

    fn enter(&mut self, node: T, path: &NodePath<'a, T>) -> Result<Control, Self::Error>;

    fn visit(&mut self, node: T, path: &NodePath<'a, T>) -> Result<Control, Self::Error>;

    fn leave(&mut self, node: T, path: &NodePath<'a, T>) -> Result<Control, Self::Error>;
}

struct Typed<'v, V: ?Sized>(&'v mut V);

impl<'a, V: Visitor<'a> + ?Sized> Hooks<'a, NodeRef<'a>> for Typed<'_, V> {
    type Error = V::Error;

    fn interest(&self) -> KindSet {
        self.0.interest()
    }

    fn enter(&mut self, node: NodeRef<'a>, path: &Path<'a>) -> Result<Control, Self::Error> {
        self.0.enter(node, path)
    }

    fn visit(&mut self, node: NodeRef<'a>, path: &Path<'a>) -> Result<Control, Self::Error> {
        self.0.visit(node, path)
    }

    fn leave(&mut self, node: NodeRef<'a>, path: &Path<'a>) -> Result<Control, Self::Error> {
        self.0.leave(node, path)
    }
}

struct Generic<'v, V: ?Sized>(&'v mut V);

impl<'a, T, V: GenericVisitor<'a, T> + ?Sized> Hooks<'a, T> for Generic<'_, V> {
    type Error = V::Error;

    fn interest(&self) -> KindSet {
        KindSet::ALL
    }

    fn enter(&mut self, _: T, _: &NodePath<'a, T>) -> Result<Control, Self::Error> {
        Ok(Control::Continue)
    }

    fn visit(&mut self, node: T, path: &NodePath<'a, T>) -> Result<Control, Self::Error> {
        self.0.visit_node(node, path)
    }

    fn leave(&mut self, node: T, path: &NodePath<'a, T>) -> Result<Control, Self::Error> {
        self.0.leave_node(node, path)
    }
}

/// A node whose children are being visited.
struct Frame<'a, T> {
    node: T,
    children: std::vec::IntoIter<(Segment<'a>, T)>,
    /// Whether `leave` is owed once the children are done.
    hooked: bool,
}

enum Opened<'a, T> {
    Descend(Frame<'a, T>),
    Done,
    Break,
}

fn run<'a, T: Tree<'a>, H: Hooks<'a, T>>(root: T, hooks: &mut H) -> Result<(), H::Error> {
    let interest = hooks.interest();
    if !root.reachable().intersects(&interest) {
        return Ok(());
    }

    let mut path = NodePath::new(root);
    let mut stack = Vec::new();
    match open(root, &path, hooks, interest)? {
        Opened::Descend(frame) => stack.push(frame),
        Opened::Done | Opened::Break => return Ok(()),
    }

    while let Some(frame) = stack.last_mut() {
        match frame.children.next() {
            Some((segment, child)) => {
                // Uninteresting subtrees never get a path segment.
                if !child.reachable().intersects(&interest) {
                    continue;
                }

                path.push(segment, child);
                match open(child, &path, hooks, interest)? {
                    Opened::Descend(frame) => stack.push(frame),
                    Opened::Done => path.pop(),
                    Opened::Break => {
                        tracing::trace!(path = %path.pointer(), "traversal stopped");
                        return Ok(());
                    }
                }
            }
            None => {
                let (node, hooked) = (frame.node, frame.hooked);
                stack.pop();
                if hooked && hooks.leave(node, &path)? == Control::Break {
                    tracing::trace!(path = %path.pointer(), "traversal stopped");
                    return Ok(());
                }
                path.pop();
            }
        }
    }

    Ok(())
}

fn open<'a, T: Tree<'a>, H: Hooks<'a, T>>(
    node: T,
    path: &NodePath<'a, T>,
    hooks: &mut H,
    interest: KindSet,
) -> Result<Opened<'a, T>, H::Error> {
    let hooked = interest.contains(node.kind());
    if hooked {
        match hooks.enter(node, path)? {
            Control::Continue => {}
            Control::SkipChildren => return Ok(Opened::Done),
            Control::Break => return Ok(Opened::Break),
        }

        match hooks.visit(node, path)? {
            Control::Continue => {}
            Control::SkipChildren => {
                return Ok(match hooks.leave(node, path)? {
                    Control::Break => Opened::Break,
                    Control::Continue | Control::SkipChildren => Opened::Done,
                });
            }
            Control::Break => return Ok(Opened::Break),
        }
    }

    Ok(Opened::Descend(Frame { node, children: node.children().into_iter(), hooked }))
}
