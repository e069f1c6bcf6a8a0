use oas_model::{KindSet, NodeRef};

use crate::path::Path;
use crate::{Control, Visitor};

/// Runs several visitors in one traversal.
///
/// Each member keeps its own control state: one that skipped a node's
/// children hears nothing from them and resumes afterwards, one that broke
/// hears nothing more at all. The traversal itself stops only once every
/// member has broken, so merging no visitors stops at the root.
pub fn merge<'a, V: Visitor<'a>>(visitors: Vec<V>) -> Merged<V> {
    let members = visitors
        .into_iter()
        .map(|visitor| Member { interest: visitor.interest(), visitor, state: State::Active })
        .collect();
    Merged { members }
}

pub struct Merged<V> {
    members: Vec<Member<V>>,
}

struct Member<V> {
    visitor: V,
    interest: KindSet,
    state: State,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Active,
    /// Skipping the children of the node at `depth`. `from_enter` members
    /// also miss that node's `visit` and `leave`.
    Skipping { depth: usize, from_enter: bool },
    Stopped,
}

#[derive(Clone, Copy)]
enum Hook {
    Enter,
    Visit,
    Leave,
}

impl<V> Merged<V> {
    pub fn into_inner(self) -> Vec<V> {
        self.members.into_iter().map(|member| member.visitor).collect()
    }

    pub fn visitors(&self) -> impl Iterator<Item = &V> {
        self.members.iter().map(|member| &member.visitor)
    }

    fn control(&self) -> Control {
        if self.members.iter().all(|member| member.state == State::Stopped) {
            Control::Break
        } else if self.members.iter().any(|member| member.state == State::Active) {
            Control::Continue
        } else {
            Control::SkipChildren
        }
    }
}

impl<V> Member<V> {
    /// Whether `hook` at `depth` reaches this member. Ends a skip the
    /// traversal has already moved past.
    fn receives(&mut self, hook: Hook, depth: usize) -> bool {
        let State::Skipping { depth: skipped, from_enter } = self.state else {
            return self.state == State::Active;
        };

        match hook {
            Hook::Enter if depth <= skipped => {}
            Hook::Leave if depth < skipped => {}
            Hook::Leave if depth == skipped => {
                self.state = State::Active;
                return !from_enter;
            }
            Hook::Enter | Hook::Visit | Hook::Leave => return false,
        }

        self.state = State::Active;
        true
    }
}

impl<'a, V: Visitor<'a>> Merged<V> {
    fn each(
        &mut self,
        hook: Hook,
        node: NodeRef<'a>,
        path: &Path<'a>,
    ) -> Result<Control, V::Error> {
        let depth = path.depth();
        for member in &mut self.members {
            if !member.receives(hook, depth) || !member.interest.contains(node.kind()) {
                continue;
            }

            let control = match hook {
                Hook::Enter => member.visitor.enter(node, path)?,
                Hook::Visit => member.visitor.visit(node, path)?,
                Hook::Leave => member.visitor.leave(node, path)?,
            };
            member.state = match (control, hook) {
                (Control::Break, _) => State::Stopped,
                (Control::SkipChildren, Hook::Enter) => State::Skipping { depth, from_enter: true },
                (Control::SkipChildren, Hook::Visit) => State::Skipping { depth, from_enter: false },
                _ => State::Active,
            };
        }

        Ok(match (self.control(), hook) {
            (Control::SkipChildren, Hook::Leave) => Control::Continue,
            (control, _) => control,
        })
    }
}

impl<'a, V: Visitor<'a>> Visitor<'a> for Merged<V> {
    type Error = V::Error;

    fn interest(&self) -> KindSet {
        self.members.iter().fold(KindSet::EMPTY, |set, member| set.union(&member.interest))
    }

    fn enter(&mut self, node: NodeRef<'a>, path: &Path<'a>) -> Result<Control, Self::Error> {
        self.each(Hook::Enter, node, path)
    }

    fn visit(&mut self, node: NodeRef<'a>, path: &Path<'a>) -> Result<Control, Self::Error> {
        self.each(Hook::Visit, node, path)
    }

    fn leave(&mut self, node: NodeRef<'a>, path: &Path<'a>) -> Result<Control, Self::Error> {
        self.each(Hook::Leave, node, path)
    }
}
