use std::env;

use crate::error::ReactorError;

pub const LEAF_SIDE_VAR: &str = "REACTOR_LEAF_SIDE";

/// Tuning for the shape of a [`crate::CubeNode`] tree.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct TreeConfig {
    /// A child cuboid whose shortest side is no longer than this is
    /// stored as a dense bitmap instead of being subdivided further.
    leaf_side: u64,
}

impl Default for TreeConfig {
    fn default() -> TreeConfig {
        TreeConfig { leaf_side: 20 }
    }
}

impl TreeConfig {
    pub fn new(leaf_side: u64) -> Result<TreeConfig, ReactorError> {
        if leaf_side == 0 {
            Err(ReactorError::BadConfig(
                "leaf side must be positive".to_string(),
            ))
        } else {
            Ok(TreeConfig { leaf_side })
        }
    }

    pub fn leaf_side(&self) -> u64 {
        self.leaf_side
    }

    /// Reads the leaf side from `REACTOR_LEAF_SIDE`, falling back to
    /// the default when it is not set.
    pub fn from_env() -> Result<TreeConfig, ReactorError> {
        match env::var(LEAF_SIDE_VAR) {
            Ok(s) => TreeConfig::parse(s.as_str()),
            Err(env::VarError::NotPresent) => Ok(TreeConfig::default()),
            Err(e) => Err(ReactorError::BadConfig(format!("{}: {}", LEAF_SIDE_VAR, e))),
        }
    }

    fn parse(s: &str) -> Result<TreeConfig, ReactorError> {
        match s.trim().parse::<u64>() {
            Ok(n) => TreeConfig::new(n),
            Err(e) => Err(ReactorError::BadConfig(format!(
                "{}: '{}': {}",
                LEAF_SIDE_VAR, s, e
            ))),
        }
    }

    pub(crate) fn wants_leaf(&self, side: u64) -> bool {
        side <= self.leaf_side
    }
}

#[test]
fn test_new() {
    assert_eq!(TreeConfig::new(7).map(|c| c.leaf_side()), Ok(7));
    assert!(matches!(TreeConfig::new(0), Err(ReactorError::BadConfig(_))));
    assert_eq!(TreeConfig::default().leaf_side(), 20);
}

#[test]
fn test_parse() {
    assert_eq!(TreeConfig::parse(" 12\n"), TreeConfig::new(12));
    assert!(matches!(TreeConfig::parse("0"), Err(ReactorError::BadConfig(_))));
    assert!(matches!(TreeConfig::parse("-3"), Err(ReactorError::BadConfig(_))));
    assert!(matches!(TreeConfig::parse("lots"), Err(ReactorError::BadConfig(_))));
}

#[test]
fn test_wants_leaf() {
    let config = TreeConfig::default();
    assert!(config.wants_leaf(1));
    assert!(config.wants_leaf(20));
    assert!(!config.wants_leaf(21));
}
