use std::iter::FusedIterator;

use oas_model::Segment;

use crate::Tree;
use crate::path::NodePath;

/// Pull-style preorder over a tree, root first.
///
/// Each item pairs the node with a copy of its path. Call
/// [`skip_subtree`](Self::skip_subtree) right after an item to leave out
/// that node's descendants.
pub struct Walk<'a, T> {
    root: Option<T>,
    /// The node yielded last, whose children have not been queued yet.
    expand: Option<T>,
    stack: Vec<std::vec::IntoIter<(Segment<'a>, T)>>,
    path: NodePath<'a, T>,
    skip_subtree: bool,
}

pub fn walk<'a, T: Tree<'a>>(root: T) -> Walk<'a, T> {
    Walk {
        root: Some(root),
        expand: None,
        stack: Vec::new(),
        path: NodePath::empty(),
        skip_subtree: false,
    }
}

impl<'a, T: Tree<'a>> Walk<'a, T> {
    pub fn skip_subtree(&mut self) {
        self.skip_subtree = true;
    }

    fn emit(&mut self, node: T) -> Option<(NodePath<'a, T>, T)> {
        self.expand = Some(node);
        Some((self.path.clone(), node))
    }
}

impl<'a, T: Tree<'a>> Iterator for Walk<'a, T> {
    type Item = (NodePath<'a, T>, T);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(root) = self.root.take() {
            self.path = NodePath::new(root);
            return self.emit(root);
        }

        if let Some(node) = self.expand.take() {
            if std::mem::take(&mut self.skip_subtree) {
                self.path.pop();
            } else {
                self.stack.push(node.children().into_iter());
            }
        }

        loop {
            let children = self.stack.last_mut()?;
            match children.next() {
                Some((segment, child)) => {
                    self.path.push(segment, child);
                    return self.emit(child);
                }
                None => {
                    self.stack.pop();
                    self.path.pop();
                }
            }
        }
    }
}

impl<'a, T: Tree<'a>> FusedIterator for Walk<'a, T> {}

#[cfg(test)]
mod tests {
    use oas_syntax::{Node, parse};

    use super::*;

    fn pointers<'a>(walk: Walk<'a, &'a Node>) -> Vec<String> {
        walk.map(|(path, _)| path.pointer()).collect()
    }

    #[test]
    fn preorder_in_document_order() {
        let root = parse(r#"{"b": [1, {"c": null}], "a": {}}"#).unwrap();
        assert_eq!(pointers(walk(&root)), ["", "/b", "/b/0", "/b/1", "/b/1/c", "/a"]);
    }

    #[test]
    fn skipped_subtrees_are_left_out() {
        let root = parse(r#"{"b": [1, {"c": null}], "a": {"d": 2}}"#).unwrap();
        let mut walk = walk(&root);
        let mut seen = Vec::new();
        while let Some((path, _)) = walk.next() {
            if path.pointer() == "/b" {
                walk.skip_subtree();
            }
            seen.push(path.pointer());
        }
        assert_eq!(seen, ["", "/b", "/a", "/a/d"]);
    }

    #[test]
    fn skipping_the_root_ends_the_walk() {
        let root = parse(r#"{"a": 1}"#).unwrap();
        let mut walk = walk(&root);
        assert!(walk.next().is_some());
        walk.skip_subtree();
        assert!(walk.next().is_none());
        assert!(walk.next().is_none());
    }

    #[test]
    fn paths_carry_ancestors() {
        let root = parse(r#"{"a": {"b": true}}"#).unwrap();
        let (path, node) = walk(&root).last().unwrap();
        assert_eq!(node.as_bool(), Some(true));
        assert_eq!(path.ancestors().len(), 2);
        let parent = path.parent().unwrap();
        assert_eq!(parent.get("b").map(|entry| &entry.value), Some(node));
    }
}
