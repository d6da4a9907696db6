use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit1},
    combinator::{map, map_res, opt, recognize},
    sequence::{delimited, preceded, separated_pair, tuple},
    IResult,
};

use crate::cuboid::Cuboid;
use crate::error::ReactorError;
use crate::interval::Interval;

/// One reboot step.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Instruction {
    On(Cuboid),
    Off(Cuboid),
}

impl Instruction {
    pub fn new(state: bool, cuboid: Cuboid) -> Instruction {
        if state {
            Instruction::On(cuboid)
        } else {
            Instruction::Off(cuboid)
        }
    }

    pub fn new_state(&self) -> bool {
        match self {
            Instruction::On(_) => true,
            Instruction::Off(_) => false,
        }
    }

    pub fn affects(&self) -> &Cuboid {
        match self {
            Instruction::On(r) | Instruction::Off(r) => r,
        }
    }

    /// The same step restricted to `bounds`, or `None` if it misses
    /// `bounds` entirely.
    pub fn clip_to(&self, bounds: &Cuboid) -> Option<Instruction> {
        bounds
            .intersect(self.affects())
            .map(|region| Instruction::new(self.new_state(), region))
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let r = self.affects();
        write!(
            f,
            "{} x={},y={},z={}",
            if self.new_state() { "on" } else { "off" },
            r.x(),
            r.y(),
            r.z()
        )
    }
}

fn i64_parser(input: &str) -> IResult<&str, i64> {
    map_res(
        recognize(tuple((opt(char('-')), digit1))),
        FromStr::from_str,
    )(input)
}

fn parse_interval(input: &str) -> IResult<&str, Interval> {
    map_res(
        separated_pair(i64_parser, tag(".."), i64_parser),
        |(min, max)| Interval::try_new(min, max),
    )(input)
}

fn parse_cuboid(input: &str) -> IResult<&str, Cuboid> {
    map(
        tuple((
            delimited(tag("x="), parse_interval, tag(",")),
            delimited(tag("y="), parse_interval, tag(",")),
            preceded(tag("z="), parse_interval),
        )),
        |(x, y, z)| Cuboid::new(x, y, z),
    )(input)
}

fn parse_on_off(input: &str) -> IResult<&str, bool> {
    alt((map(tag("on"), |_| true), map(tag("off"), |_| false)))(input)
}

pub fn parse_instruction(input: &str) -> IResult<&str, Instruction> {
    map(
        separated_pair(parse_on_off, tag(" "), parse_cuboid),
        |(state, cuboid)| Instruction::new(state, cuboid),
    )(input)
}

impl FromStr for Instruction {
    type Err = String;

    fn from_str(s: &str) -> Result<Instruction, String> {
        match parse_instruction(s) {
            Ok(("", instruction)) => Ok(instruction),
            Ok((tail, _)) => Err(format!("not matched: '{}'", tail)),
            Err(e) => Err(format!("failed to parse '{}': {}", s, e)),
        }
    }
}

/// Parse one instruction per line.  Blank lines are ignored.
pub fn parse_instructions(input: &str) -> Result<Vec<Instruction>, ReactorError> {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            line.trim()
                .parse()
                .map_err(|message| ReactorError::BadInstruction {
                    line: i + 1,
                    message,
                })
        })
        .collect()
}

#[test]
fn test_parse_instruction() {
    assert_eq!(
        parse_instruction("on x=-54112..-39298,y=-85059..-49293,z=-27449..7877"),
        Ok((
            "",
            Instruction::On(Cuboid::from_bounds(
                -54112, -39298, -85059, -49293, -27449, 7877
            ))
        ))
    );
    assert_eq!(
        "off x=9..11,y=9..11,z=9..11".parse(),
        Ok(Instruction::Off(Cuboid::from_bounds(9, 11, 9, 11, 9, 11)))
    );
}

#[test]
fn test_parse_rejects_bad_input() {
    assert!("on x=5..1,y=0..1,z=0..1".parse::<Instruction>().is_err());
    assert!("on x=1..5,y=0..1,z=0..1 junk".parse::<Instruction>().is_err());
    assert!("toggle x=1..5,y=0..1,z=0..1".parse::<Instruction>().is_err());
    assert!("on x=1..5,y=0..1".parse::<Instruction>().is_err());
}

#[test]
fn test_parse_instructions() {
    let text = "on x=10..12,y=10..12,z=10..12\n\noff x=9..11,y=9..11,z=9..11\n";
    assert_eq!(
        parse_instructions(text),
        Ok(vec![
            Instruction::On(Cuboid::from_bounds(10, 12, 10, 12, 10, 12)),
            Instruction::Off(Cuboid::from_bounds(9, 11, 9, 11, 9, 11)),
        ])
    );
    match parse_instructions("on x=1..2,y=1..2,z=1..2\non x=2..1,y=1..2,z=1..2") {
        Err(ReactorError::BadInstruction { line, .. }) => assert_eq!(line, 2),
        other => panic!("expected a bad instruction on line 2, got {:?}", other),
    }
}

#[test]
fn test_clip_to() {
    let bounds = Cuboid::from_bounds(-50, 50, -50, 50, -50, 50);
    let inst = Instruction::On(Cuboid::from_bounds(-54112, 39298, -85059, -19, 20, 200));
    assert_eq!(
        inst.clip_to(&bounds),
        Some(Instruction::On(Cuboid::from_bounds(-50, 50, -50, -19, 20, 50)))
    );
    let far = Instruction::Off(Cuboid::from_bounds(
        -54112, -39298, -85059, -49293, -27449, 7877,
    ));
    assert_eq!(far.clip_to(&bounds), None);
}

#[test]
fn test_display_round_trip() {
    let text = "off x=-3..8,y=0..0,z=-20..-10";
    let inst: Instruction = text.parse().expect("should parse");
    assert_eq!(inst.to_string(), text);
}
