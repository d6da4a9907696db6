use ndarray::prelude::*;

use crate::cuboid::Cuboid;
use crate::tree::CubeTree;

/// A cuboid small enough to keep one flag per cell.
#[derive(Debug)]
pub struct CubeLeaf {
    cuboid: Cuboid,
    cells: Array3<bool>,
    on_count: u64,
}

fn offset(coordinate: i64, origin: i64) -> usize {
    (coordinate - origin)
        .try_into()
        .expect("coordinate should not be below the leaf's origin")
}

impl CubeLeaf {
    pub fn new(cuboid: Cuboid, lit: bool) -> CubeLeaf {
        CubeLeaf {
            cuboid,
            cells: Array3::from_elem(cuboid.shape(), lit),
            on_count: if lit { cuboid.volume() } else { 0 },
        }
    }

    pub fn is_on(&self, x: i64, y: i64, z: i64) -> bool {
        let origin = &self.cuboid;
        self.cells[(
            offset(x, origin.x().min()),
            offset(y, origin.y().min()),
            offset(z, origin.z().min()),
        )]
    }

    fn update_on_count(&mut self) {
        self.on_count = self.cells.iter().filter(|&&on| on).count() as u64;
    }
}

impl CubeTree for CubeLeaf {
    fn cuboid(&self) -> &Cuboid {
        &self.cuboid
    }

    fn on_count(&self) -> u64 {
        self.on_count
    }

    fn apply(&mut self, region: &Cuboid, state: bool) {
        assert!(
            self.cuboid.contains(region),
            "{} is not inside leaf {}",
            region,
            self.cuboid
        );
        let x0 = offset(region.x().min(), self.cuboid.x().min());
        let y0 = offset(region.y().min(), self.cuboid.y().min());
        let z0 = offset(region.z().min(), self.cuboid.z().min());
        let (xlen, ylen, zlen) = region.shape();
        self.cells
            .slice_mut(s![x0..x0 + xlen, y0..y0 + ylen, z0..z0 + zlen])
            .fill(state);
        self.update_on_count();
    }

    fn node_count(&self) -> usize {
        1
    }

    fn min_height(&self) -> usize {
        1
    }

    fn max_height(&self) -> usize {
        1
    }
}

#[test]
fn test_example_1() {
    let steps = [
        (true, Cuboid::from_bounds(10, 12, 10, 12, 10, 12)),
        (true, Cuboid::from_bounds(11, 13, 11, 13, 11, 13)),
        (false, Cuboid::from_bounds(9, 11, 9, 11, 9, 11)),
        (true, Cuboid::from_bounds(10, 10, 10, 10, 10, 10)),
    ];
    let mut leaf = CubeLeaf::new(Cuboid::from_bounds(-50, 50, -50, 50, -50, 50), false);
    let mut counts = Vec::new();
    for (state, region) in &steps {
        leaf.apply(region, *state);
        counts.push(leaf.on_count());
    }
    assert_eq!(counts, vec![27, 46, 38, 39]);
}

#[test]
fn test_apply_marks_only_region() {
    let mut leaf = CubeLeaf::new(Cuboid::from_bounds(-2, 2, 0, 3, 5, 6), false);
    leaf.apply(&Cuboid::from_bounds(-1, 0, 3, 3, 6, 6), true);
    assert_eq!(leaf.on_count(), 2);
    assert!(leaf.is_on(-1, 3, 6));
    assert!(leaf.is_on(0, 3, 6));
    assert!(!leaf.is_on(1, 3, 6));
    assert!(!leaf.is_on(-1, 2, 6));
    assert!(!leaf.is_on(-1, 3, 5));
    assert_eq!(leaf.off_count(), leaf.cuboid().volume() - 2);
}

#[test]
fn test_lit_leaf() {
    let cuboid = Cuboid::from_bounds(0, 3, 0, 3, 0, 3);
    let mut leaf = CubeLeaf::new(cuboid, true);
    assert_eq!(leaf.on_count(), 64);
    leaf.apply(&Cuboid::from_bounds(0, 0, 0, 3, 0, 3), false);
    assert_eq!(leaf.on_count(), 48);
    leaf.apply(&cuboid, true);
    assert_eq!(leaf.on_count(), 64);
}

#[test]
#[should_panic]
fn test_apply_outside_leaf() {
    let mut leaf = CubeLeaf::new(Cuboid::from_bounds(0, 3, 0, 3, 0, 3), false);
    leaf.apply(&Cuboid::from_bounds(2, 4, 0, 3, 0, 3), true);
}
