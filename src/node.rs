use tracing::{event, Level};

use crate::config::TreeConfig;
use crate::cuboid::Cuboid;
use crate::tree::{CubeTree, Octant, Visit};

/// An interior node of the tree.
///
/// While all of a node's cells are in the same state it keeps nothing
/// but a count.  A write that covers only part of the node splits it
/// into eight children (one per octant); a later write covering the
/// whole node throws the children away again.
#[derive(Debug)]
pub struct CubeNode {
    cuboid: Cuboid,
    on_count: u64,
    children: Option<Box<[Octant; 8]>>,
    config: TreeConfig,
}

impl CubeNode {
    pub fn new(cuboid: Cuboid, lit: bool, config: TreeConfig) -> CubeNode {
        assert!(
            cuboid.can_bisect(),
            "{} is too thin for an interior node",
            cuboid
        );
        CubeNode {
            cuboid,
            on_count: if lit { cuboid.volume() } else { 0 },
            children: None,
            config,
        }
    }

    pub fn is_expanded(&self) -> bool {
        self.children.is_some()
    }

    pub fn children(&self) -> Option<&[Octant; 8]> {
        self.children.as_deref()
    }

    fn uniform_count(&self, state: bool) -> u64 {
        if state {
            self.cuboid.volume()
        } else {
            0
        }
    }

    fn discard_children(&mut self) {
        event!(Level::TRACE, "collapsing {}", self.cuboid);
        self.children = None;
    }

    fn expand_children(&mut self) {
        assert!(self.children.is_none());
        let volume = self.cuboid.volume();
        assert!(
            self.on_count == 0 || self.on_count == volume,
            "unexpanded node {} should be uniform but has {} of {} cells on",
            self.cuboid,
            self.on_count,
            volume,
        );
        let lit = self.on_count == volume;
        event!(Level::TRACE, "expanding {} (lit={})", self.cuboid, lit);
        let config = self.config;
        let children = self
            .cuboid
            .bisect()
            .map(|octant| Octant::new(octant, lit, config));
        self.children = Some(Box::new(children));
    }

    fn update_children(&mut self, region: &Cuboid, state: bool) {
        if let Some(children) = self.children.as_mut() {
            for child in children.iter_mut() {
                if let Some(subregion) = child.cuboid().intersect(region) {
                    child.apply(&subregion, state);
                }
            }
            self.on_count = children.iter().map(|child| child.on_count()).sum();
        }
        debug_assert!(self.on_count <= self.cuboid.volume());
    }

    pub fn visit<F>(&self, depth: usize, visitor: &mut F)
    where
        F: FnMut(Visit<'_>, usize),
    {
        visitor(Visit::Enter(self), depth);
        if let Some(children) = self.children() {
            for child in children.iter() {
                child.visit(depth + 1, visitor);
            }
        }
        visitor(Visit::Leave(self), depth);
    }
}

impl CubeTree for CubeNode {
    fn cuboid(&self) -> &Cuboid {
        &self.cuboid
    }

    fn on_count(&self) -> u64 {
        self.on_count
    }

    fn apply(&mut self, region: &Cuboid, state: bool) {
        assert!(
            self.cuboid.contains(region),
            "{} is not inside node {}",
            region,
            self.cuboid
        );
        let whole = *region == self.cuboid;
        match (whole, self.is_expanded()) {
            (true, false) => {
                self.on_count = self.uniform_count(state);
            }
            (true, true) => {
                self.discard_children();
                self.on_count = self.uniform_count(state);
            }
            (false, false) => {
                self.expand_children();
                self.update_children(region, state);
            }
            (false, true) => {
                self.update_children(region, state);
            }
        }
    }

    fn node_count(&self) -> usize {
        match self.children() {
            None => 1,
            Some(children) => 1 + children.iter().map(|c| c.node_count()).sum::<usize>(),
        }
    }

    fn min_height(&self) -> usize {
        match self.children() {
            None => 1,
            Some(children) => 1 + children.iter().map(|c| c.min_height()).min().unwrap_or(0),
        }
    }

    fn max_height(&self) -> usize {
        match self.children() {
            None => 1,
            Some(children) => 1 + children.iter().map(|c| c.max_height()).max().unwrap_or(0),
        }
    }
}

#[cfg(test)]
fn make_node(lo: i64, hi: i64) -> CubeNode {
    CubeNode::new(
        Cuboid::from_bounds(lo, hi, lo, hi, lo, hi),
        false,
        TreeConfig::default(),
    )
}

/// Checks the count invariants everywhere below `node`.
#[cfg(test)]
fn check_invariants(node: &CubeNode) {
    let volume = node.cuboid().volume();
    assert!(node.on_count() <= volume);
    match node.children() {
        None => {
            assert!(node.on_count() == 0 || node.on_count() == volume);
        }
        Some(children) => {
            let sum: u64 = children.iter().map(|c| c.on_count()).sum();
            assert_eq!(sum, node.on_count(), "{}", node.cuboid());
            for child in children.iter() {
                assert!(node.cuboid().contains(child.cuboid()));
                assert!(child.on_count() <= child.cuboid().volume());
                if let Octant::Node(n) = child {
                    check_invariants(n);
                }
            }
        }
    }
}

#[test]
fn test_new_node_unlit() {
    let cube = Cuboid::from_bounds(0, 127, 0, 127, 0, 127);
    let node = CubeNode::new(cube, false, TreeConfig::default());
    assert_eq!(node.cuboid(), &cube);
    assert_eq!(node.on_count(), 0);
    assert_eq!(node.off_count(), cube.volume());
}

#[test]
fn test_new_node_lit() {
    let cube = Cuboid::from_bounds(0, 127, 0, 127, 0, 127);
    let node = CubeNode::new(cube, true, TreeConfig::default());
    assert_eq!(node.on_count(), cube.volume());
    assert_eq!(node.off_count(), 0);
}

#[test]
fn test_light_entire_cube() {
    let mut node = make_node(0, 127);
    let cube = *node.cuboid();
    node.apply(&cube, true);
    assert_eq!(node.on_count(), cube.volume());
    assert_eq!(node.off_count(), 0);
    assert!(!node.is_expanded());
}

#[test]
fn test_small_expand() {
    let mut node = make_node(0, 39);
    node.expand_children();
    assert!(node.is_expanded());
    let children = node.children().expect("node should be expanded");
    assert!(children.iter().all(|c| matches!(c, Octant::Leaf(_))));
    assert_eq!(node.max_height(), 2);
}

#[test]
fn test_large_expand() {
    let mut node = make_node(0, 255);
    node.expand_children();
    let children = node.children().expect("node should be expanded");
    assert!(children.iter().all(|c| matches!(c, Octant::Node(_))));
    assert_eq!(node.max_height(), 2);
    assert_eq!(node.node_count(), 9);
}

#[test]
fn test_expand_inherits_state() {
    let cube = Cuboid::from_bounds(0, 255, 0, 255, 0, 255);
    let mut node = CubeNode::new(cube, true, TreeConfig::default());
    node.expand_children();
    let children = node.children().expect("node should be expanded");
    for child in children.iter() {
        assert_eq!(child.on_count(), child.cuboid().volume());
    }
}

#[test]
fn test_light_entire_subcube() {
    let mut node = make_node(0, 127);
    let subcube = node.cuboid().bisect()[0];
    node.apply(&subcube, true);
    assert_eq!(node.on_count(), subcube.volume());
    assert_eq!(node.max_height(), 2);
    check_invariants(&node);
}

#[test]
fn test_entire_cube_on_then_off() {
    let mut node = make_node(0, 127);
    let cube = *node.cuboid();
    node.apply(&cube, true);
    node.apply(&cube, false);
    assert_eq!(node.off_count(), cube.volume());
    assert_eq!(node.on_count(), 0);
    assert_eq!(node.max_height(), 1);
}

#[test]
fn test_toggle_subcube_on_then_off() {
    let mut node = make_node(0, 127);
    let subcube = node.cuboid().bisect()[0];
    node.apply(&subcube, true);
    node.apply(&subcube, false);
    assert_eq!(node.on_count(), 0);
    // The children stay until a write covers the whole node.
    assert_eq!(node.max_height(), 2);
    check_invariants(&node);
}

#[test]
fn test_light_two_subcubes() {
    let mut node = make_node(0, 127);
    let octants = node.cuboid().bisect();
    node.apply(&octants[0], true);
    node.apply(&octants[7], true);
    assert_eq!(node.on_count(), octants[0].volume() + octants[7].volume());
    check_invariants(&node);
}

#[test]
fn test_light_entire_cube_then_clear_subcube() {
    let mut node = make_node(0, 127);
    let cube = *node.cuboid();
    let subcube = cube.bisect()[0];
    node.apply(&cube, true);
    node.apply(&subcube, false);
    assert_eq!(node.on_count(), cube.volume() - subcube.volume());
    check_invariants(&node);
}

#[test]
fn test_expand_then_collapse() {
    let mut node = make_node(0, 99);
    let whole = *node.cuboid();
    let region = Cuboid::from_bounds(5, 60, 7, 8, 30, 99);
    node.apply(&region, true);
    assert!(node.is_expanded());
    assert_eq!(node.on_count(), region.volume());
    check_invariants(&node);

    node.apply(&whole, false);
    assert!(!node.is_expanded());
    assert_eq!(node.on_count(), 0);
    assert_eq!(node.node_count(), 1);
}

#[test]
fn test_idempotent() {
    let mut node = make_node(-64, 63);
    let region = Cuboid::from_bounds(-10, 40, -64, 0, 3, 3);
    node.apply(&region, true);
    let once = node.on_count();
    let nodes = node.node_count();
    node.apply(&region, true);
    assert_eq!(node.on_count(), once);
    assert_eq!(node.node_count(), nodes);
    node.apply(&Cuboid::from_bounds(0, 0, -5, -5, 3, 3), false);
    let off_once = node.on_count();
    node.apply(&Cuboid::from_bounds(0, 0, -5, -5, 3, 3), false);
    assert_eq!(node.on_count(), off_once);
    assert_eq!(off_once, once - 1);
}

#[test]
fn test_tiny_region_in_huge_node() {
    let mut node = make_node(-1000, 1000);
    let region = Cuboid::from_bounds(-2, 2, -2, 2, -2, 2);
    node.apply(&region, true);
    assert_eq!(node.on_count(), region.volume());
    assert!(node.min_height() >= 2);
    assert!(node.max_height() > node.min_height());
    check_invariants(&node);
}

#[test]
fn test_huge_region_in_huge_node() {
    let mut node = make_node(-200, 200);
    let region = Cuboid::from_bounds(-190, 190, -190, 190, -190, 190);
    node.apply(&region, true);
    assert_eq!(node.on_count(), region.volume());
    check_invariants(&node);

    // Only the nodes straddling the edge of the region should have
    // been split.
    let mut expanded_inside = 0;
    let mut expanded_outside = 0;
    node.visit(0, &mut |visit, _depth| {
        if let Visit::Enter(n) = visit {
            if n.is_expanded() {
                match region.intersect(n.cuboid()) {
                    None => expanded_outside += 1,
                    Some(i) if &i == n.cuboid() => expanded_inside += 1,
                    Some(_) => (),
                }
            }
        }
    });
    assert_eq!(expanded_inside, 0);
    assert_eq!(expanded_outside, 0);
}

#[test]
fn test_visit_order() {
    let mut node = make_node(0, 39);
    node.apply(&Cuboid::from_bounds(0, 0, 0, 0, 0, 0), true);
    let whole = *node.cuboid();
    let mut events = Vec::new();
    node.visit(0, &mut |visit, depth| {
        assert!(whole.contains(visit.cuboid()));
        let tag = match visit {
            Visit::Leaf(_) => "leaf",
            Visit::Enter(_) => "enter",
            Visit::Leave(_) => "leave",
        };
        events.push((tag, depth));
    });
    assert_eq!(events.first(), Some(&("enter", 0)));
    assert_eq!(events.last(), Some(&("leave", 0)));
    assert_eq!(events.iter().filter(|(tag, _)| *tag == "leaf").count(), 8);
    assert!(events[1..9].iter().all(|e| *e == ("leaf", 1)));
}

#[test]
#[should_panic]
fn test_apply_outside_node() {
    let mut node = make_node(0, 63);
    node.apply(&Cuboid::from_bounds(60, 64, 0, 1, 0, 1), true);
}
