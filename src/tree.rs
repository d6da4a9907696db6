use crate::config::TreeConfig;
use crate::cuboid::Cuboid;
use crate::leaf::CubeLeaf;
use crate::node::CubeNode;

/// The operations shared by every kind of tree node.  Each node covers
/// a fixed cuboid of the lattice and knows how many of its cells are on.
pub trait CubeTree {
    fn cuboid(&self) -> &Cuboid;

    fn on_count(&self) -> u64;

    fn off_count(&self) -> u64 {
        self.cuboid().volume() - self.on_count()
    }

    /// Turn every cell of `region` on (`state == true`) or off.
    ///
    /// `region` must lie inside `self.cuboid()`; anything else is a
    /// bug in the caller and panics.
    fn apply(&mut self, region: &Cuboid, state: bool);

    fn node_count(&self) -> usize;

    fn min_height(&self) -> usize;

    fn max_height(&self) -> usize;
}

/// One step of a depth-first walk over a tree.
#[derive(Debug, Clone, Copy)]
pub enum Visit<'a> {
    Leaf(&'a CubeLeaf),
    Enter(&'a CubeNode),
    Leave(&'a CubeNode),
}

impl<'a> Visit<'a> {
    pub fn cuboid(&self) -> &'a Cuboid {
        match *self {
            Visit::Leaf(leaf) => leaf.cuboid(),
            Visit::Enter(node) | Visit::Leave(node) => node.cuboid(),
        }
    }
}

/// A child of a [`CubeNode`], or the root of a whole tree.
#[derive(Debug)]
pub enum Octant {
    Leaf(CubeLeaf),
    Node(CubeNode),
}

impl Octant {
    /// Build a uniformly lit (or unlit) child for `cuboid`.  Cuboids
    /// with a short side are stored densely.
    pub fn new(cuboid: Cuboid, lit: bool, config: TreeConfig) -> Octant {
        if config.wants_leaf(cuboid.min_side()) {
            Octant::Leaf(CubeLeaf::new(cuboid, lit))
        } else {
            Octant::Node(CubeNode::new(cuboid, lit, config))
        }
    }

    /// Build the unlit root of a tree.  This is an interior node
    /// wherever the cuboid can be divided at all.
    pub fn root(cuboid: Cuboid, config: TreeConfig) -> Octant {
        if cuboid.can_bisect() {
            Octant::Node(CubeNode::new(cuboid, false, config))
        } else {
            Octant::Leaf(CubeLeaf::new(cuboid, false))
        }
    }

    pub fn visit<F>(&self, depth: usize, visitor: &mut F)
    where
        F: FnMut(Visit<'_>, usize),
    {
        match self {
            Octant::Leaf(leaf) => visitor(Visit::Leaf(leaf), depth),
            Octant::Node(node) => node.visit(depth, visitor),
        }
    }
}

impl CubeTree for Octant {
    fn cuboid(&self) -> &Cuboid {
        match self {
            Octant::Leaf(leaf) => leaf.cuboid(),
            Octant::Node(node) => node.cuboid(),
        }
    }

    fn on_count(&self) -> u64 {
        match self {
            Octant::Leaf(leaf) => leaf.on_count(),
            Octant::Node(node) => node.on_count(),
        }
    }

    fn apply(&mut self, region: &Cuboid, state: bool) {
        match self {
            Octant::Leaf(leaf) => leaf.apply(region, state),
            Octant::Node(node) => node.apply(region, state),
        }
    }

    fn node_count(&self) -> usize {
        match self {
            Octant::Leaf(leaf) => leaf.node_count(),
            Octant::Node(node) => node.node_count(),
        }
    }

    fn min_height(&self) -> usize {
        match self {
            Octant::Leaf(leaf) => leaf.min_height(),
            Octant::Node(node) => node.min_height(),
        }
    }

    fn max_height(&self) -> usize {
        match self {
            Octant::Leaf(leaf) => leaf.max_height(),
            Octant::Node(node) => node.max_height(),
        }
    }
}

#[test]
fn test_new_chooses_kind() {
    let config = TreeConfig::default();
    let small = Cuboid::from_bounds(0, 19, 0, 500, 0, 500);
    assert!(matches!(Octant::new(small, false, config), Octant::Leaf(_)));
    let large = Cuboid::from_bounds(0, 20, 0, 20, 0, 20);
    assert!(matches!(Octant::new(large, true, config), Octant::Node(_)));
}

#[test]
fn test_root_chooses_kind() {
    let config = TreeConfig::default();
    let tiny = Cuboid::from_bounds(10, 12, 10, 12, 10, 12);
    assert!(matches!(Octant::root(tiny, config), Octant::Node(_)));
    let flat = Cuboid::from_bounds(0, 5, 0, 5, 3, 3);
    assert!(matches!(Octant::root(flat, config), Octant::Leaf(_)));
}

#[test]
fn test_new_is_uniform() {
    let config = TreeConfig::default();
    for cuboid in [
        Cuboid::from_bounds(0, 9, 0, 9, 0, 9),
        Cuboid::from_bounds(0, 99, 0, 99, 0, 99),
    ] {
        let lit = Octant::new(cuboid, true, config);
        assert_eq!(lit.on_count(), cuboid.volume());
        assert_eq!(lit.off_count(), 0);
        let unlit = Octant::new(cuboid, false, config);
        assert_eq!(unlit.on_count(), 0);
        assert_eq!(unlit.off_count(), cuboid.volume());
        assert_eq!(unlit.node_count(), 1);
    }
}
