use ndarray::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use reactor::{run, CubeNode, CubeTree, Cuboid, Instruction, Octant, TreeConfig};

/// Simulate the reboot one cell at a time.
fn brute_force(root: &Cuboid, instructions: &[Instruction]) -> u64 {
    let mut cells = Array3::from_elem(root.shape(), false);
    for inst in instructions {
        if let Some(region) = root.intersect(inst.affects()) {
            let origin = |r: i64, o: i64| (r - o) as usize;
            let x0 = origin(region.x().min(), root.x().min());
            let y0 = origin(region.y().min(), root.y().min());
            let z0 = origin(region.z().min(), root.z().min());
            let (xl, yl, zl) = region.shape();
            cells
                .slice_mut(s![x0..x0 + xl, y0..y0 + yl, z0..z0 + zl])
                .fill(inst.new_state());
        }
    }
    cells.iter().filter(|&&on| on).count() as u64
}

fn random_interval(rng: &mut StdRng, lo: i64, hi: i64) -> (i64, i64) {
    let a = rng.random_range(lo..=hi);
    let b = rng.random_range(lo..=hi);
    (a.min(b), a.max(b))
}

fn random_instructions(rng: &mut StdRng, root: &Cuboid, n: usize) -> Vec<Instruction> {
    // Let some regions poke outside the root so that clipping is exercised.
    let widen = |lo: i64, hi: i64| (lo - 3, hi + 3);
    (0..n)
        .map(|_| {
            let (xlo, xhi) = widen(root.x().min(), root.x().max());
            let (ylo, yhi) = widen(root.y().min(), root.y().max());
            let (zlo, zhi) = widen(root.z().min(), root.z().max());
            let (x0, x1) = random_interval(rng, xlo, xhi);
            let (y0, y1) = random_interval(rng, ylo, yhi);
            let (z0, z1) = random_interval(rng, zlo, zhi);
            Instruction::new(
                rng.random_bool(0.6),
                Cuboid::from_bounds(x0, x1, y0, y1, z0, z1),
            )
        })
        .collect()
}

fn check_invariants(tree: &Octant) {
    let volume = tree.cuboid().volume();
    assert!(tree.on_count() <= volume);
    if let Octant::Node(node) = tree {
        check_node(node);
    }
}

fn check_node(node: &CubeNode) {
    match node.children() {
        None => assert!(node.on_count() == 0 || node.on_count() == node.cuboid().volume()),
        Some(children) => {
            let sum: u64 = children.iter().map(|c| c.on_count()).sum();
            assert_eq!(sum, node.on_count());
            let volume: u64 = children.iter().map(|c| c.cuboid().volume()).sum();
            assert_eq!(volume, node.cuboid().volume());
            for child in children.iter() {
                assert!(node.cuboid().contains(child.cuboid()));
                check_invariants(child);
            }
        }
    }
}

#[test]
fn test_matches_brute_force() {
    let mut rng = StdRng::seed_from_u64(22);
    let roots = [
        Cuboid::from_bounds(0, 19, 0, 19, 0, 19),
        Cuboid::from_bounds(-10, 9, -3, 16, -20, -1),
        Cuboid::from_bounds(-7, 5, 0, 21, 100, 109),
    ];
    for root in &roots {
        for leaf_side in [1, 2, 3, 5, 20] {
            let config = TreeConfig::new(leaf_side).expect("positive");
            for _ in 0..5 {
                let instructions = random_instructions(&mut rng, root, 30);
                assert_eq!(
                    run(root, &instructions, &config),
                    brute_force(root, &instructions),
                    "root {} leaf side {}",
                    root,
                    leaf_side
                );
            }
        }
    }
}

#[test]
fn test_invariants_after_every_step() {
    let mut rng = StdRng::seed_from_u64(2021);
    let root = Cuboid::from_bounds(-16, 15, -16, 15, -16, 15);
    let config = TreeConfig::new(2).expect("positive");
    let mut tree = Octant::root(root, config);
    for inst in random_instructions(&mut rng, &root, 60) {
        if let Some(region) = root.intersect(inst.affects()) {
            tree.apply(&region, inst.new_state());
            check_invariants(&tree);

            let once = tree.on_count();
            tree.apply(&region, inst.new_state());
            assert_eq!(tree.on_count(), once, "applying {} twice", inst);
        }
    }
}

#[test]
fn test_expand_once_then_collapse() {
    let root = Cuboid::from_bounds(0, 63, 0, 63, 0, 63);
    let config = TreeConfig::default();
    let mut tree = Octant::root(root, config);
    let region = Cuboid::from_bounds(0, 31, 0, 31, 0, 31);
    tree.apply(&region, true);
    assert_eq!(tree.on_count(), region.volume());
    // The region is exactly one octant, so only the root splits.
    assert_eq!(tree.node_count(), 9);
    assert_eq!(tree.max_height(), 2);

    tree.apply(&root, false);
    assert_eq!(tree.on_count(), 0);
    assert_eq!(tree.node_count(), 1);
    match &tree {
        Octant::Node(node) => assert!(!node.is_expanded()),
        Octant::Leaf(_) => panic!("root should be an interior node"),
    }
}
