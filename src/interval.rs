use std::cmp::{max, min};
use std::fmt::{self, Display, Formatter};

use crate::error::ReactorError;

/// A closed range of integers, `min..=max`.  It is never empty.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct Interval {
    min: i64,
    max: i64,
}

impl Interval {
    /// Panics if `min > max`.
    pub fn new(min: i64, max: i64) -> Interval {
        assert!(min <= max, "inverted interval {}..{}", min, max);
        Interval { min, max }
    }

    pub fn try_new(min: i64, max: i64) -> Result<Interval, ReactorError> {
        if min <= max {
            Ok(Interval { min, max })
        } else {
            Err(ReactorError::InvertedInterval { min, max })
        }
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    pub fn length(&self) -> u64 {
        (self.max - self.min + 1)
            .try_into()
            .expect("interval should have a positive number of entries")
    }

    pub fn has(&self, n: i64) -> bool {
        self.min <= n && n <= self.max
    }

    pub fn contains(&self, other: &Interval) -> bool {
        self.has(other.min) && self.has(other.max)
    }

    pub fn merge(&self, other: &Interval) -> Interval {
        Interval {
            min: min(self.min, other.min),
            max: max(self.max, other.max),
        }
    }

    /// Split into two halves whose lengths differ by at most one.  The
    /// left half gets the extra entry when the length is odd.
    ///
    /// Panics for an interval of length 1, which cannot be split.
    pub fn bisect(&self) -> (Interval, Interval) {
        let mid = (self.min + self.max).div_euclid(2);
        (Interval::new(self.min, mid), Interval::new(mid + 1, self.max))
    }

    pub fn intersect(&self, other: &Interval) -> Option<Interval> {
        if other.max < self.min || self.max < other.min {
            // other is wholly to the left or to the right of self.
            None
        } else if other.min <= self.min && self.max <= other.max {
            // other extends past both ends of self
            Some(*self)
        } else if other.min < self.min && self.has(other.max) {
            // other overlaps the left end of self
            Some(Interval {
                min: self.min,
                max: other.max,
            })
        } else if self.has(other.min) && self.max < other.max {
            // other overlaps the right end of self
            Some(Interval {
                min: other.min,
                max: self.max,
            })
        } else if self.has(other.min) && self.has(other.max) {
            Some(*other)
        } else {
            unreachable!("no intersection case matches {} and {}", self, other);
        }
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.min, self.max)
    }
}

#[test]
fn test_try_new() {
    assert_eq!(Interval::try_new(3, 7), Ok(Interval::new(3, 7)));
    assert_eq!(Interval::try_new(5, 5).map(|i| i.length()), Ok(1));
    assert_eq!(
        Interval::try_new(7, 3),
        Err(ReactorError::InvertedInterval { min: 7, max: 3 })
    );
}

#[test]
#[should_panic]
fn test_new_rejects_inverted() {
    Interval::new(1, 0);
}

#[test]
fn test_has() {
    let b = Interval::new(0, 10);
    assert!(b.has(0));
    assert!(b.has(1));
    assert!(b.has(9));
    assert!(b.has(10));
    assert!(!b.has(-1));
    assert!(!b.has(11));
}

#[test]
fn test_contains() {
    let b = Interval::new(0, 10);
    assert!(b.contains(&b));
    assert!(b.contains(&Interval::new(3, 4)));
    assert!(!b.contains(&Interval::new(3, 11)));
    assert!(!b.contains(&Interval::new(-1, 4)));
    assert!(!Interval::new(3, 4).contains(&b));
}

#[test]
fn test_merge() {
    let a = Interval::new(-5, 2);
    let b = Interval::new(10, 20);
    assert_eq!(a.merge(&b), Interval::new(-5, 20));
    assert_eq!(b.merge(&a), Interval::new(-5, 20));
    assert_eq!(a.merge(&Interval::new(-1, 0)), a);
}

#[test]
fn test_intersect() {
    let b = Interval::new(0, 10);
    assert_eq!(b.intersect(&Interval::new(-5, -1)), None);
    assert_eq!(b.intersect(&Interval::new(11, 15)), None);
    assert_eq!(b.intersect(&Interval::new(-1, 1)), Some(Interval::new(0, 1)));
    assert_eq!(b.intersect(&Interval::new(2, 5)), Some(Interval::new(2, 5)));
    assert_eq!(b.intersect(&Interval::new(7, 15)), Some(Interval::new(7, 10)));
    assert_eq!(b.intersect(&b), Some(b));
    assert_eq!(b.intersect(&Interval::new(-15, 15)), Some(b));
}

#[test]
fn test_intersect_exhaustive() {
    // Compare against the integers the two intervals actually share.
    for amin in -4..=4 {
        for amax in amin..=4 {
            for bmin in -4..=4 {
                for bmax in bmin..=4 {
                    let a = Interval::new(amin, amax);
                    let b = Interval::new(bmin, bmax);
                    let shared: Vec<i64> = (amin..=amax).filter(|n| b.has(*n)).collect();
                    let expected = match (shared.first(), shared.last()) {
                        (Some(lo), Some(hi)) => Some(Interval::new(*lo, *hi)),
                        _ => None,
                    };
                    assert_eq!(a.intersect(&b), expected, "{} with {}", a, b);
                }
            }
        }
    }
}

#[test]
fn test_bisect() {
    let b = Interval::new(-10, 10);
    let (left, right) = b.bisect();
    assert_eq!(b.length(), left.length() + right.length());
    assert_eq!(left.min(), b.min());
    assert_eq!(right.max(), b.max());
    assert_eq!(left.max() + 1, right.min());
    assert!(b.min() < left.max() && left.max() < right.min() && right.min() < b.max());
}

#[test]
fn test_bisect_balance() {
    for lo in -9..=9 {
        for hi in (lo + 1)..=12 {
            let b = Interval::new(lo, hi);
            let (left, right) = b.bisect();
            assert!(left.length().abs_diff(right.length()) <= 1, "{}", b);
            assert_eq!(left.max() + 1, right.min(), "{}", b);
            assert_eq!(left.min(), lo);
            assert_eq!(right.max(), hi);
        }
    }
    // Rounding is towards negative infinity.
    assert_eq!(
        Interval::new(-3, 0).bisect(),
        (Interval::new(-3, -2), Interval::new(-1, 0))
    );
}

#[test]
#[should_panic]
fn test_bisect_unit_interval() {
    Interval::new(4, 4).bisect();
}

#[test]
fn test_display() {
    assert_eq!(Interval::new(-3, 8).to_string(), "-3..8");
}
