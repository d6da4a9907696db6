//! Counting lit cubes after a reactor reboot.
//!
//! The reactor core is a lattice of cubes far too large to store one
//! flag per cube.  Instead the cubes are tracked by an octree of
//! cuboids which is only subdivided where a reboot step cuts through
//! part of a cuboid, and which is merged back together again where a
//! step covers a whole cuboid.

mod config;
mod cuboid;
mod driver;
mod error;
mod instruction;
mod interval;
mod leaf;
mod node;
mod tree;

pub use config::{TreeConfig, LEAF_SIDE_VAR};
pub use cuboid::Cuboid;
pub use driver::{bounded_core, bounding_cuboid, run, run_bounded, run_unbounded};
pub use error::ReactorError;
pub use instruction::{parse_instruction, parse_instructions, Instruction};
pub use interval::Interval;
pub use leaf::CubeLeaf;
pub use node::CubeNode;
pub use tree::{CubeTree, Octant, Visit};
