//! Intrusive red-black tree: parent pointer and color packed into one
//! word per node, rotations parameterized by [`Direction`].
//!
//! Grounded on `examples/original_source/rb_tree.c` (the prototype's
//! `__parent_color`/`rotate_left`/`rotate_right`/`rb_remove_repair`/
//! `rb_insert`) and `examples/original_source/include/rb_tree.h` for the
//! production `rb_insert_node(root, node, parent, dir)` entry point
//! (caller performs the lookup, this module only splices and
//! rebalances). The removal repair loop's sibling/nephew case analysis,
//! including the far-nephew-black "rotate at sibling first" sub-case, is
//! ported case-for-case from that source rather than re-derived, since
//! the case values are exactly what makes the algorithm correct.

use super::Direction;
use std::ptr::NonNull;

const COLOR_MASK: usize = 0b1;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Color {
    Black = 0,
    Red = 1,
}

/// An intrusive red-black tree node. Embed this as a field of your own
/// struct and recover the enclosing struct with [`super::container_of`].
pub struct RbNode {
    /// Parent pointer (all but the low bit) packed with color in the low
    /// bit.
    parent_color: usize,
    children: [Option<NonNull<RbNode>>; 2],
}

impl RbNode {
    pub fn new() -> Self {
        debug_assert_eq!(std::mem::align_of::<RbNode>() & COLOR_MASK, 0);
        RbNode {
            parent_color: 0,
            children: [None, None],
        }
    }
}

impl Default for RbNode {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
unsafe fn parent_of(n: NonNull<RbNode>) -> Option<NonNull<RbNode>> {
    NonNull::new((n.as_ref().parent_color & !COLOR_MASK) as *mut RbNode)
}

#[inline]
unsafe fn color_of(n: Option<NonNull<RbNode>>) -> Color {
    match n {
        None => Color::Black,
        Some(n) => {
            if n.as_ref().parent_color & COLOR_MASK == 1 {
                Color::Red
            } else {
                Color::Black
            }
        }
    }
}

#[inline]
unsafe fn is_red(n: Option<NonNull<RbNode>>) -> bool {
    color_of(n) == Color::Red
}

#[inline]
unsafe fn is_black(n: Option<NonNull<RbNode>>) -> bool {
    color_of(n) == Color::Black
}

#[inline]
unsafe fn set_parent(mut n: NonNull<RbNode>, parent: Option<NonNull<RbNode>>) {
    let color_bit = n.as_ref().parent_color & COLOR_MASK;
    let parent_bits = parent.map_or(0, |p| p.as_ptr() as usize);
    debug_assert_eq!(parent_bits & COLOR_MASK, 0, "node address not aligned for packed metadata");
    n.as_mut().parent_color = parent_bits | color_bit;
}

#[inline]
unsafe fn set_color(mut n: NonNull<RbNode>, color: Color) {
    let parent_bits = n.as_ref().parent_color & !COLOR_MASK;
    n.as_mut().parent_color = parent_bits | (color as usize);
}

#[inline]
unsafe fn set_child_raw(mut n: NonNull<RbNode>, dir: Direction, c: Option<NonNull<RbNode>>) {
    n.as_mut().children[dir.idx()] = c;
}

#[inline]
unsafe fn set_child(n: NonNull<RbNode>, dir: Direction, c: Option<NonNull<RbNode>>) {
    set_child_raw(n, dir, c);
    if let Some(c) = c {
        set_parent(c, Some(n));
    }
}

/// Root holder for a red-black tree. An empty tree is `RbRoot::default()`.
#[derive(Default)]
pub struct RbRoot {
    root: Option<NonNull<RbNode>>,
}

impl RbRoot {
    /// The tree's root node, or `None` if empty. Starting point for a
    /// caller's own key-comparison descent (see [`child`]).
    pub fn root(&self) -> Option<NonNull<RbNode>> {
        self.root
    }
}

unsafe fn change_child(root: &mut RbRoot, old: NonNull<RbNode>, new: Option<NonNull<RbNode>>, parent: Option<NonNull<RbNode>>) {
    match parent {
        Some(p) => {
            let dir = if child(p, Direction::Left) == Some(old) {
                Direction::Left
            } else {
                Direction::Right
            };
            set_child_raw(p, dir, new);
        }
        None => root.root = new,
    }
    if let Some(n) = new {
        set_parent(n, parent);
    }
}

/// Rotate `node` towards `dir`: the child on `dir.opposite()` rises and
/// takes `node`'s place; `node` becomes that child's `dir` child.
/// `dir = Left` is `rotate_left`, `dir = Right` is `rotate_right` in the
/// ported C source.
unsafe fn rotate(root: &mut RbRoot, node: NonNull<RbNode>, dir: Direction) -> NonNull<RbNode> {
    let other = dir.opposite();
    let nnew = child(node, other).expect("rotate requires a child on the rotation side");
    let t = child(nnew, dir);
    set_child(node, other, t);
    let parent = parent_of(node);
    set_child(nnew, dir, Some(node));
    change_child(root, node, Some(nnew), parent);
    nnew
}

/// Insert `node` as the `dir` child of `parent` (or as the root if
/// `parent` is `None`), color it red, then repair red-red violations up
/// the tree.
pub fn insert_node(root: &mut RbRoot, node: NonNull<RbNode>, parent: Option<NonNull<RbNode>>, dir: Direction) {
    unsafe {
        *node.as_ptr() = RbNode {
            parent_color: 0,
            children: [None, None],
        };
        set_parent(node, parent);
        set_color(node, Color::Red);

        match parent {
            None => {
                root.root = Some(node);
                set_color(node, Color::Black);
                return;
            }
            Some(p) => set_child(p, dir, Some(node)),
        }

        let mut node = node;
        let mut parent = parent;

        loop {
            let p = match parent {
                None => {
                    set_color(node, Color::Black);
                    break;
                }
                Some(p) => p,
            };

            if is_black(Some(p)) {
                break;
            }

            let grandparent = parent_of(p).expect("red node must have a parent (root is always black)");
            let parent_is_left = child(grandparent, Direction::Left) == Some(p);
            let uncle = if parent_is_left { child(grandparent, Direction::Right) } else { child(grandparent, Direction::Left) };

            if is_black(uncle) {
                let parent_dir = if parent_is_left { Direction::Left } else { Direction::Right };
                let node_is_inner = child(p, parent_dir.opposite()) == Some(node);

                let mut new_parent = p;
                if node_is_inner {
                    rotate(root, p, parent_dir);
                    new_parent = node;
                    node = p;
                }

                rotate(root, grandparent, parent_dir.opposite());
                set_color(new_parent, Color::Black);
                set_color(grandparent, Color::Red);
                break;
            }

            set_color(p, Color::Black);
            set_color(uncle.unwrap(), Color::Black);
            set_color(grandparent, Color::Red);
            node = grandparent;
            parent = parent_of(node);
        }
    }
}

unsafe fn direction_of(parent: NonNull<RbNode>, which: NonNull<RbNode>) -> Direction {
    if child(parent, Direction::Left) == Some(which) {
        Direction::Left
    } else {
        Direction::Right
    }
}

/// Remove `node` from the tree, splicing around it and restoring the
/// red-black invariants.
pub fn remove_node(root: &mut RbRoot, node: NonNull<RbNode>) {
    unsafe {
        let right = child(node, Direction::Right);
        let left = child(node, Direction::Left);

        let rebalance: Option<NonNull<RbNode>>;

        if left.is_none() {
            let parent = parent_of(node);
            change_child(root, node, right, parent);
            if let Some(r) = right {
                set_color(r, Color::Black);
                rebalance = None;
            } else {
                rebalance = if is_black(Some(node)) { parent } else { None };
            }
        } else if right.is_none() {
            let parent = parent_of(node);
            change_child(root, node, left, parent);
            set_color(left.unwrap(), color_of(Some(node)));
            rebalance = None;
        } else {
            let mut successor = right.unwrap();
            let mut parent_of_successor;
            let child2;

            if child(successor, Direction::Left).is_none() {
                parent_of_successor = successor;
                child2 = child(successor, Direction::Right);
            } else {
                let mut tmp = child(successor, Direction::Left).unwrap();
                loop {
                    parent_of_successor = successor;
                    successor = tmp;
                    match child(tmp, Direction::Left) {
                        Some(l) => tmp = l,
                        None => break,
                    }
                }
                child2 = child(successor, Direction::Right);
                set_child_raw(parent_of_successor, Direction::Left, child2);
                if let Some(c2) = child2 {
                    set_parent(c2, Some(parent_of_successor));
                }
                set_child(successor, Direction::Right, right);
            }

            set_child(successor, Direction::Left, Some(left.unwrap()));

            let node_parent = parent_of(node);
            let node_color = color_of(Some(node));
            change_child(root, node, Some(successor), node_parent);

            if let Some(c2) = child2 {
                set_color(successor, node_color);
                set_color(c2, Color::Black);
                rebalance = None;
            } else {
                rebalance = if is_black(Some(successor)) { Some(parent_of_successor) } else { None };
                set_color(successor, node_color);
            }
        }

        if let Some(p) = rebalance {
            remove_repair(root, p);
        }
    }
}

/// Restore the red-black invariants after a black node was removed from
/// under `parent`, leaving a "double black" deficiency there.
unsafe fn remove_repair(root: &mut RbRoot, start_parent: NonNull<RbNode>) {
    let mut node: Option<NonNull<RbNode>> = None;
    let mut parent = start_parent;

    loop {
        let mut sibling = child(parent, Direction::Right);
        let mut node_is_left = true;
        if node == sibling {
            sibling = child(parent, Direction::Left);
            node_is_left = false;
        }
        let mut sibling = sibling.expect("sibling of a double-black node cannot be a leaf");

        if is_red(Some(sibling)) {
            if node_is_left {
                rotate(root, parent, Direction::Left);
            } else {
                rotate(root, parent, Direction::Right);
            }
            set_color(parent, Color::Red);
            set_color(sibling, Color::Black);
            sibling = if node_is_left { child(parent, Direction::Right) } else { child(parent, Direction::Left) }.unwrap();
        }

        let sib_left = child(sibling, Direction::Left);
        let sib_right = child(sibling, Direction::Right);

        if is_black(sib_left) && is_black(sib_right) {
            set_color(sibling, Color::Red);
            if is_red(Some(parent)) {
                set_color(parent, Color::Black);
                break;
            } else {
                node = Some(parent);
                match parent_of(parent) {
                    Some(gp) => {
                        parent = gp;
                        continue;
                    }
                    None => break,
                }
            }
        }

        if node_is_left {
            let mut sibling = sibling;
            if is_black(child(sibling, Direction::Right)) {
                rotate(root, sibling, Direction::Right);
                sibling = child(parent, Direction::Right).unwrap();
            }
            rotate(root, parent, Direction::Left);
            set_color(sibling, color_of(Some(parent)));
            set_color(parent, Color::Black);
            set_color(child(sibling, Direction::Right).unwrap(), Color::Black);
        } else {
            let mut sibling = sibling;
            if is_black(child(sibling, Direction::Left)) {
                rotate(root, sibling, Direction::Left);
                sibling = child(parent, Direction::Left).unwrap();
            }
            rotate(root, parent, Direction::Right);
            set_color(sibling, color_of(Some(parent)));
            set_color(parent, Color::Black);
            set_color(child(sibling, Direction::Left).unwrap(), Color::Black);
        }
        break;
    }
}

/// The `dir` child of `node`, or `None` if absent. Exposed so a caller's own
/// key-comparison descent (the lookup half of the insert/remove protocol)
/// can walk the tree; mirrors the original C header's `children[2]` being a
/// plain, directly-readable struct field rather than a hidden one.
///
/// # Safety
/// `node` must point at a live node currently linked into some tree.
pub unsafe fn child(node: NonNull<RbNode>, dir: Direction) -> Option<NonNull<RbNode>> {
    node.as_ref().children[dir.idx()]
}

/// `node`'s parent, or `None` if it is the root. Mirrors `rb_parent` in the
/// original C header.
///
/// # Safety
/// `node` must point at a live node currently linked into some tree.
pub unsafe fn parent(node: NonNull<RbNode>) -> Option<NonNull<RbNode>> {
    parent_of(node)
}

/// Leftmost node.
pub fn first(root: &RbRoot) -> Option<NonNull<RbNode>> {
    let mut cur = root.root?;
    unsafe {
        while let Some(l) = child(cur, Direction::Left) {
            cur = l;
        }
    }
    Some(cur)
}

/// In-order successor of `node`.
pub fn next(node: NonNull<RbNode>) -> Option<NonNull<RbNode>> {
    unsafe {
        if let Some(mut cur) = child(node, Direction::Right) {
            while let Some(l) = child(cur, Direction::Left) {
                cur = l;
            }
            return Some(cur);
        }
        let mut cur = node;
        let mut parent = parent_of(cur);
        while let Some(p) = parent {
            if child(p, Direction::Left) == Some(cur) {
                return Some(p);
            }
            cur = p;
            parent = parent_of(p);
        }
        None
    }
}
