use std::fmt::{self, Display, Formatter};

use crate::error::ReactorError;
use crate::interval::Interval;

/// An axis-aligned box of lattice cells.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct Cuboid {
    x: Interval,
    y: Interval,
    z: Interval,
}

impl Cuboid {
    pub fn new(x: Interval, y: Interval, z: Interval) -> Cuboid {
        Cuboid { x, y, z }
    }

    /// Panics if any of the ranges is inverted.
    pub fn from_bounds(
        xmin: i64,
        xmax: i64,
        ymin: i64,
        ymax: i64,
        zmin: i64,
        zmax: i64,
    ) -> Cuboid {
        Cuboid {
            x: Interval::new(xmin, xmax),
            y: Interval::new(ymin, ymax),
            z: Interval::new(zmin, zmax),
        }
    }

    pub fn try_from_bounds(
        xmin: i64,
        xmax: i64,
        ymin: i64,
        ymax: i64,
        zmin: i64,
        zmax: i64,
    ) -> Result<Cuboid, ReactorError> {
        Ok(Cuboid {
            x: Interval::try_new(xmin, xmax)?,
            y: Interval::try_new(ymin, ymax)?,
            z: Interval::try_new(zmin, zmax)?,
        })
    }

    pub fn x(&self) -> &Interval {
        &self.x
    }

    pub fn y(&self) -> &Interval {
        &self.y
    }

    pub fn z(&self) -> &Interval {
        &self.z
    }

    pub fn contains(&self, other: &Cuboid) -> bool {
        self.x.contains(&other.x) && self.y.contains(&other.y) && self.z.contains(&other.z)
    }

    pub fn intersect(&self, other: &Cuboid) -> Option<Cuboid> {
        Some(Cuboid {
            x: self.x.intersect(&other.x)?,
            y: self.y.intersect(&other.y)?,
            z: self.z.intersect(&other.z)?,
        })
    }

    /// The eight octants of this cuboid, x varying slowest and z
    /// fastest.  Every side must have a length of at least 2.
    pub fn bisect(&self) -> [Cuboid; 8] {
        let (x0, x1) = self.x.bisect();
        let (y0, y1) = self.y.bisect();
        let (z0, z1) = self.z.bisect();
        [
            Cuboid::new(x0, y0, z0),
            Cuboid::new(x0, y0, z1),
            Cuboid::new(x0, y1, z0),
            Cuboid::new(x0, y1, z1),
            Cuboid::new(x1, y0, z0),
            Cuboid::new(x1, y0, z1),
            Cuboid::new(x1, y1, z0),
            Cuboid::new(x1, y1, z1),
        ]
    }

    pub fn can_bisect(&self) -> bool {
        self.min_side() >= 2
    }

    /// Smallest cuboid containing both `self` and `other`.
    pub fn merge(&self, other: &Cuboid) -> Cuboid {
        Cuboid {
            x: self.x.merge(&other.x),
            y: self.y.merge(&other.y),
            z: self.z.merge(&other.z),
        }
    }

    pub fn volume(&self) -> u64 {
        self.x.length() * self.y.length() * self.z.length()
    }

    pub fn min_side(&self) -> u64 {
        self.x.length().min(self.y.length()).min(self.z.length())
    }

    pub fn shape(&self) -> (usize, usize, usize) {
        fn side(i: &Interval) -> usize {
            i.length()
                .try_into()
                .expect("cuboid side should fit in memory")
        }
        (side(&self.x), side(&self.y), side(&self.z))
    }
}

impl Display for Cuboid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Cuboid(x={}, y={}, z={})", self.x, self.y, self.z)
    }
}

#[test]
fn test_volume() {
    assert_eq!(Cuboid::from_bounds(10, 12, 10, 12, 10, 12).volume(), 27);
    assert_eq!(Cuboid::from_bounds(-3, -3, 0, 0, 9, 9).volume(), 1);
    // Far beyond 32 bits.
    let big = Cuboid::from_bounds(-100_000, 100_000, -100_000, 100_000, -100_000, 100_000);
    assert_eq!(big.volume(), 200_001u64 * 200_001 * 200_001);
}

#[test]
fn test_try_from_bounds() {
    assert_eq!(
        Cuboid::try_from_bounds(0, 1, 5, 2, 0, 1),
        Err(ReactorError::InvertedInterval { min: 5, max: 2 })
    );
    assert_eq!(
        Cuboid::try_from_bounds(0, 1, 2, 5, 0, 1),
        Ok(Cuboid::from_bounds(0, 1, 2, 5, 0, 1))
    );
}

#[test]
fn test_contains() {
    let cube = Cuboid::from_bounds(0, 10, 0, 10, 0, 10);
    assert!(cube.contains(&cube));
    assert!(cube.contains(&Cuboid::from_bounds(3, 3, 3, 3, 3, 3)));
    assert!(!cube.contains(&Cuboid::from_bounds(3, 3, 3, 11, 3, 3)));
    assert!(!cube.contains(&Cuboid::from_bounds(-1, 3, 3, 3, 3, 3)));
}

#[test]
fn test_intersect_full_overlap() {
    let cube = Cuboid::from_bounds(0, 10, 0, 10, 0, 10);
    let b1 = Cuboid::from_bounds(3, 3, 3, 3, 3, 3);
    let b2 = Cuboid::from_bounds(10, 10, 10, 10, 10, 10);
    assert_eq!(cube.intersect(&cube), Some(cube));
    assert_eq!(cube.intersect(&b1), Some(b1));
    assert_eq!(cube.intersect(&b2), Some(b2));
    let larger = Cuboid::from_bounds(-20, 20, -20, 20, -20, 20);
    assert_eq!(cube.intersect(&larger), Some(cube));
}

#[test]
fn test_intersect_partial_overlap() {
    let cube = Cuboid::from_bounds(0, 10, 0, 10, 0, 10);
    assert_eq!(
        cube.intersect(&Cuboid::from_bounds(9, 11, 9, 11, 9, 11)),
        Some(Cuboid::from_bounds(9, 10, 9, 10, 9, 10))
    );
    assert_eq!(
        cube.intersect(&Cuboid::from_bounds(-1, 1, -1, 1, -1, 1)),
        Some(Cuboid::from_bounds(0, 1, 0, 1, 0, 1))
    );
}

#[test]
fn test_intersect_no_overlap() {
    let cube = Cuboid::from_bounds(0, 10, 0, 10, 0, 10);
    for region in [
        Cuboid::from_bounds(11, 12, 11, 12, 11, 12),
        Cuboid::from_bounds(-2, -1, -2, -1, -2, -1),
        Cuboid::from_bounds(-2, -1, 3, 5, 3, 5),
        Cuboid::from_bounds(0, 10, -2, -1, 0, 10),
        Cuboid::from_bounds(2, 7, 2, 7, -2, -1),
    ] {
        assert_eq!(cube.intersect(&region), None, "{}", region);
    }
}

#[test]
fn test_bisect() {
    let b = Interval::new(0, 31);
    let cube = Cuboid::new(b, b, b);
    let octants = cube.bisect();
    assert_eq!(
        octants,
        [
            Cuboid::from_bounds(0, 15, 0, 15, 0, 15),
            Cuboid::from_bounds(0, 15, 0, 15, 16, 31),
            Cuboid::from_bounds(0, 15, 16, 31, 0, 15),
            Cuboid::from_bounds(0, 15, 16, 31, 16, 31),
            Cuboid::from_bounds(16, 31, 0, 15, 0, 15),
            Cuboid::from_bounds(16, 31, 0, 15, 16, 31),
            Cuboid::from_bounds(16, 31, 16, 31, 0, 15),
            Cuboid::from_bounds(16, 31, 16, 31, 16, 31),
        ]
    );
}

#[test]
fn test_bisect_partitions() {
    for cube in [
        Cuboid::from_bounds(0, 31, 0, 31, 0, 31),
        Cuboid::from_bounds(-7, 3, 10, 11, -50, 50),
        Cuboid::from_bounds(-3, -2, -9, 0, 5, 17),
    ] {
        let octants = cube.bisect();
        let total: u64 = octants.iter().map(|c| c.volume()).sum();
        assert_eq!(total, cube.volume(), "{}", cube);
        for (i, a) in octants.iter().enumerate() {
            assert!(cube.contains(a), "{} should contain {}", cube, a);
            for b in &octants[i + 1..] {
                assert_eq!(a.intersect(b), None, "{} overlaps {}", a, b);
            }
        }
    }
}

#[test]
fn test_merge() {
    let a = Cuboid::from_bounds(0, 1, 0, 1, 0, 1);
    let b = Cuboid::from_bounds(-5, -4, 3, 9, 1, 1);
    assert_eq!(a.merge(&b), Cuboid::from_bounds(-5, 1, 0, 9, 0, 1));
}

#[test]
fn test_min_side_and_shape() {
    let c = Cuboid::from_bounds(0, 4, -1, 0, 10, 19);
    assert_eq!(c.shape(), (5, 2, 10));
    assert_eq!(c.min_side(), 2);
    assert!(c.can_bisect());
    assert!(!Cuboid::from_bounds(0, 4, 0, 0, 0, 4).can_bisect());
}

#[test]
fn test_display() {
    assert_eq!(
        Cuboid::from_bounds(-1, 1, 2, 3, 4, 5).to_string(),
        "Cuboid(x=-1..1, y=2..3, z=4..5)"
    );
}
