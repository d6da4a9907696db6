use tracing::{event, span, Level};

use crate::config::TreeConfig;
use crate::cuboid::Cuboid;
use crate::instruction::Instruction;
use crate::tree::{CubeTree, Octant};

/// The region considered by the initialization procedure.
pub fn bounded_core() -> Cuboid {
    Cuboid::from_bounds(-50, 50, -50, 50, -50, 50)
}

/// Apply `instructions` in order to an initially dark `root`, and
/// count the cells left on.  Each instruction is clipped to `root`
/// first.
pub fn run(root: &Cuboid, instructions: &[Instruction], config: &TreeConfig) -> u64 {
    let span = span!(Level::INFO, "run", root = %root, steps = instructions.len());
    let _enter = span.enter();

    let mut tree = Octant::root(*root, *config);
    for (step, instruction) in instructions.iter().enumerate() {
        let clipped = match instruction.clip_to(root) {
            Some(clipped) => clipped,
            None => {
                event!(Level::DEBUG, "step {}: {} misses the root", step, instruction);
                continue;
            }
        };
        if tracing::enabled!(Level::DEBUG) {
            event!(
                Level::DEBUG,
                "step {} nodes={} min_height={} max_height={} {}",
                step,
                tree.node_count(),
                tree.min_height(),
                tree.max_height(),
                clipped,
            );
        }
        tree.apply(clipped.affects(), clipped.new_state());
    }
    let lit = tree.on_count();
    event!(Level::INFO, "{} cells lit", lit);
    lit
}

/// Count the lit cells of the bounded core.  Instructions not wholly
/// inside it are ignored.
pub fn run_bounded(instructions: &[Instruction], config: &TreeConfig) -> u64 {
    let core = bounded_core();
    let inside: Vec<Instruction> = instructions
        .iter()
        .filter(|inst| core.contains(inst.affects()))
        .copied()
        .collect();
    event!(
        Level::DEBUG,
        "{} of {} instructions lie inside {}",
        inside.len(),
        instructions.len(),
        core
    );
    run(&core, &inside, config)
}

/// The smallest cuboid containing every instruction's region.
pub fn bounding_cuboid(instructions: &[Instruction]) -> Option<Cuboid> {
    instructions
        .iter()
        .map(|inst| *inst.affects())
        .reduce(|a, b| a.merge(&b))
}

pub fn run_unbounded(instructions: &[Instruction], config: &TreeConfig) -> u64 {
    match bounding_cuboid(instructions) {
        Some(root) => run(&root, instructions, config),
        None => 0,
    }
}

#[cfg(test)]
fn example_1() -> Vec<Instruction> {
    crate::instruction::parse_instructions(
        "on x=10..12,y=10..12,z=10..12
on x=11..13,y=11..13,z=11..13
off x=9..11,y=9..11,z=9..11
on x=10..10,y=10..10,z=10..10",
    )
    .expect("example should parse")
}

#[test]
fn test_example_1() {
    let config = TreeConfig::default();
    assert_eq!(run_bounded(&example_1(), &config), 39);
    assert_eq!(run_unbounded(&example_1(), &config), 39);
    for leaf_side in [1, 2, 3, 50] {
        let config = TreeConfig::new(leaf_side).expect("positive");
        assert_eq!(run_unbounded(&example_1(), &config), 39);
    }
}

#[test]
fn test_clipped_scenario() {
    let root = Cuboid::from_bounds(10, 12, 10, 12, 10, 12);
    let config = TreeConfig::default();
    let steps = example_1();
    let counts: Vec<u64> = (1..=steps.len())
        .map(|n| run(&root, &steps[..n], &config))
        .collect();
    // [9..11]^3 clipped to the root is [10..11]^3, eight cells.
    assert_eq!(counts, vec![27, 27, 19, 20]);
}

#[test]
fn test_bounded_skips_partial_overlap() {
    let config = TreeConfig::default();
    let instructions = vec![
        Instruction::On(Cuboid::from_bounds(-50, -49, 0, 0, 0, 0)),
        Instruction::On(Cuboid::from_bounds(49, 51, 0, 0, 0, 0)),
        Instruction::On(Cuboid::from_bounds(1000, 1001, 0, 0, 0, 0)),
    ];
    assert_eq!(run_bounded(&instructions, &config), 2);
    assert_eq!(run_unbounded(&instructions, &config), 7);
}

#[test]
fn test_bounding_cuboid() {
    assert_eq!(bounding_cuboid(&[]), None);
    assert_eq!(
        bounding_cuboid(&example_1()),
        Some(Cuboid::from_bounds(9, 13, 9, 13, 9, 13))
    );
    assert_eq!(run_unbounded(&[], &TreeConfig::default()), 0);
}

#[test]
fn test_huge_coordinates() {
    let config = TreeConfig::default();
    let instructions = vec![
        Instruction::On(Cuboid::from_bounds(
            -100_000, 100_000, -100_000, 100_000, -100_000, 100_000,
        )),
        Instruction::Off(Cuboid::from_bounds(5, 6, 5, 5, -7, -7)),
        Instruction::On(Cuboid::from_bounds(6, 6, 5, 5, -7, -7)),
    ];
    assert_eq!(
        run_unbounded(&instructions, &config),
        200_001u64 * 200_001 * 200_001 - 1
    );
}

#[test]
fn test_flat_root() {
    let config = TreeConfig::default();
    let instructions = vec![
        Instruction::On(Cuboid::from_bounds(0, 9, 0, 9, 4, 4)),
        Instruction::Off(Cuboid::from_bounds(0, 0, 0, 9, 4, 4)),
    ];
    assert_eq!(run_unbounded(&instructions, &config), 90);
}
