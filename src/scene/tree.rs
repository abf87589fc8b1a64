//! Arena-backed node tree.

use crate::core::geometry::Point;
use crate::core::input::InputSnapshot;
use crate::render::Surface;
use crate::scene::button::ButtonNode;
use crate::scene::rect::RectNode;
use crate::scene::scroll_text::ScrollTextNode;
use crate::scene::text::TextNode;

/// Stable identifier of a node within one [`SceneTree`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct NodeId(usize);

/// Handle into an app-defined command table, fired by buttons.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ActionId(pub u64);

/// Closed set of renderable node kinds.
#[derive(Clone, Debug)]
pub enum NodeKind {
    /// Pure grouping/offset node.
    Group,
    Rect(RectNode),
    Text(TextNode),
    ScrollText(ScrollTextNode),
    Button(ButtonNode),
}

#[derive(Clone, Debug)]
pub struct Node {
    pub pos: Point,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: NodeKind,
}

impl Node {
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    #[must_use]
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }
}

/// Single-owner node arena.
///
/// Parents exclusively own their children; the parent link is a non-owning
/// id used only for position composition. Removing a node detaches its
/// subtree (an orphan stays addressable but is no longer visited); slots are
/// reclaimed when the tree is dropped.
#[derive(Clone, Debug, Default)]
pub struct SceneTree {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
    fired: Vec<ActionId>,
}

impl SceneTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node under `parent` (or as a root), appended after existing
    /// siblings so it updates and paints last among them.
    pub fn add(&mut self, parent: Option<NodeId>, pos: Point, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            pos,
            parent,
            children: Vec::new(),
            kind,
        });
        match parent {
            Some(parent) => self.nodes[parent.0].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    /// Detach `id` (and implicitly its subtree) from the visited tree.
    pub fn remove(&mut self, id: NodeId) {
        match self.nodes[id.0].parent.take() {
            Some(parent) => self.nodes[parent.0].children.retain(|child| *child != id),
            None => self.roots.retain(|root| *root != id),
        }
    }

    #[must_use]
    pub fn is_orphan(&self, id: NodeId) -> bool {
        self.nodes[id.0].parent.is_none() && !self.roots.contains(&id)
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn set_pos(&mut self, id: NodeId, pos: Point) {
        self.nodes[id.0].pos = pos;
    }

    /// Position composed recursively through every ancestor.
    #[must_use]
    pub fn global_pos(&self, id: NodeId) -> Point {
        let mut pos = self.nodes[id.0].pos;
        let mut current = self.nodes[id.0].parent;
        while let Some(parent) = current {
            pos = pos + self.nodes[parent.0].pos;
            current = self.nodes[parent.0].parent;
        }
        pos
    }

    pub fn rect_mut(&mut self, id: NodeId) -> Option<&mut RectNode> {
        match &mut self.nodes[id.0].kind {
            NodeKind::Rect(node) => Some(node),
            _ => None,
        }
    }

    pub fn text_mut(&mut self, id: NodeId) -> Option<&mut TextNode> {
        match &mut self.nodes[id.0].kind {
            NodeKind::Text(node) => Some(node),
            _ => None,
        }
    }

    pub fn scroll_text_mut(&mut self, id: NodeId) -> Option<&mut ScrollTextNode> {
        match &mut self.nodes[id.0].kind {
            NodeKind::ScrollText(node) => Some(node),
            _ => None,
        }
    }

    pub fn button_mut(&mut self, id: NodeId) -> Option<&mut ButtonNode> {
        match &mut self.nodes[id.0].kind {
            NodeKind::Button(node) => Some(node),
            _ => None,
        }
    }

    /// Pre-order traversal: each entry carries the accumulated origin of its
    /// ancestors, so `origin + node.pos` is the node's global position.
    fn walk(&self) -> Vec<(NodeId, Point)> {
        let mut out = Vec::new();
        let mut stack: Vec<(NodeId, Point)> = self
            .roots
            .iter()
            .rev()
            .map(|id| (*id, Point::default()))
            .collect();
        while let Some((id, origin)) = stack.pop() {
            out.push((id, origin));
            let node = &self.nodes[id.0];
            let global = origin + node.pos;
            for child in node.children.iter().rev() {
                stack.push((*child, global));
            }
        }
        out
    }

    /// Per-frame behavior pass. `local_mouse` is the pointer position in the
    /// owning app's coordinate space (button hit-testing runs there).
    pub fn update(&mut self, input: &InputSnapshot, local_mouse: Point) {
        for (id, origin) in self.walk() {
            let global = origin + self.nodes[id.0].pos;
            match &mut self.nodes[id.0].kind {
                NodeKind::ScrollText(node) => node.update(input),
                NodeKind::Button(node) => {
                    if let Some(action) = node.update(input, global, local_mouse) {
                        self.fired.push(action);
                    }
                }
                NodeKind::Group | NodeKind::Rect(_) | NodeKind::Text(_) => {}
            }
        }
    }

    /// Paint pass in update order.
    pub fn render(&mut self, target: &mut Surface) {
        for (id, origin) in self.walk() {
            let global = origin + self.nodes[id.0].pos;
            match &mut self.nodes[id.0].kind {
                NodeKind::Group => {}
                NodeKind::Rect(node) => node.render(target, global),
                NodeKind::Text(node) => node.render(target, global),
                NodeKind::ScrollText(node) => node.render(target, global),
                NodeKind::Button(node) => node.render(target, global),
            }
        }
    }

    /// Actions fired by buttons since the last drain.
    pub fn drain_actions(&mut self) -> Vec<ActionId> {
        std::mem::take(&mut self.fired)
    }
}

#[cfg(test)]
mod tests {
    use super::{ActionId, NodeKind, SceneTree};
    use crate::core::color::Color;
    use crate::core::geometry::{Point, Size};
    use crate::core::input::InputSnapshot;
    use crate::render::Surface;
    use crate::scene::button::ButtonNode;
    use crate::scene::rect::RectNode;
    use crate::scene::text::TextNode;

    #[test]
    fn later_siblings_paint_on_top() {
        let mut tree = SceneTree::new();
        let size = Size::new(2, 1);
        tree.add(
            None,
            Point::new(0, 0),
            NodeKind::Rect(RectNode::new(size, Color::gray(10))),
        );
        tree.add(
            None,
            Point::new(0, 0),
            NodeKind::Rect(RectNode::new(size, Color::gray(20))),
        );

        let mut target = Surface::new(Size::new(2, 1), Color::BLACK);
        tree.render(&mut target);
        assert_eq!(target.get(0, 0).map(|c| c.bg), Some(Color::gray(20)));
    }

    #[test]
    fn global_position_composes_through_ancestors() {
        let mut tree = SceneTree::new();
        let outer = tree.add(None, Point::new(2, 1), NodeKind::Group);
        let inner = tree.add(Some(outer), Point::new(3, 4), NodeKind::Group);
        let leaf = tree.add(
            Some(inner),
            Point::new(1, 1),
            NodeKind::Rect(RectNode::new(Size::new(1, 1), Color::WHITE)),
        );
        assert_eq!(tree.global_pos(leaf), Point::new(6, 6));

        let mut target = Surface::new(Size::new(8, 8), Color::BLACK);
        tree.render(&mut target);
        assert_eq!(target.get(6, 6).map(|c| c.bg), Some(Color::WHITE));
        assert_eq!(target.get(1, 1).map(|c| c.bg), Some(Color::BLACK));
    }

    #[test]
    fn removed_nodes_become_orphans_and_stop_rendering() {
        let mut tree = SceneTree::new();
        let id = tree.add(
            None,
            Point::new(0, 0),
            NodeKind::Rect(RectNode::new(Size::new(1, 1), Color::WHITE)),
        );
        tree.remove(id);
        assert!(tree.is_orphan(id));

        let mut target = Surface::new(Size::new(2, 2), Color::BLACK);
        tree.render(&mut target);
        assert_eq!(target.get(0, 0).map(|c| c.bg), Some(Color::BLACK));
    }

    #[test]
    fn buttons_fire_in_local_coordinates() {
        let mut tree = SceneTree::new();
        let group = tree.add(None, Point::new(2, 2), NodeKind::Group);
        tree.add(
            Some(group),
            Point::new(1, 0),
            NodeKind::Button(ButtonNode::new(
                TextNode::new(Size::new(4, 1), "ok"),
                ActionId(7),
            )),
        );

        let mut input = InputSnapshot::new();
        input.press_mouse();

        tree.update(&input, Point::new(4, 2));
        assert_eq!(tree.drain_actions(), vec![ActionId(7)]);

        input.begin_frame();
        input.release_mouse();
        tree.update(&input, Point::new(4, 2));
        assert!(tree.drain_actions().is_empty(), "no click edge, no action");
    }
}
