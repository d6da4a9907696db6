use std::io;
use std::io::prelude::*;

use tracing::{event, Level};
use tracing_subscriber::prelude::*;

use reactor::{
    bounding_cuboid, parse_instructions, run_bounded, run_unbounded, Instruction, ReactorError,
    TreeConfig,
};

fn describe(instructions: &[Instruction]) {
    let cuboid = match bounding_cuboid(instructions) {
        Some(c) => c,
        None => {
            event!(Level::INFO, "no instructions");
            return;
        }
    };
    let volume = cuboid.volume();
    let volume_of = |state: bool| -> u64 {
        instructions
            .iter()
            .filter(|inst| inst.new_state() == state)
            .map(|inst| inst.affects().volume())
            .sum()
    };
    let max_set = volume_of(true);
    let max_clear = volume_of(false);
    event!(Level::INFO, "bounding cuboid {} has volume {}", cuboid, volume);
    event!(
        Level::INFO,
        "at most {} cells set (density {:.6}), at most {} cleared (density {:.6})",
        max_set,
        max_set as f64 / volume as f64,
        max_clear,
        max_clear as f64 / volume as f64,
    );
}

fn run() -> Result<(), ReactorError> {
    let config = TreeConfig::from_env()?;
    let mut input = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut input) {
        return Err(ReactorError::Io(e.to_string()));
    }
    let instructions = parse_instructions(input.as_str())?;
    event!(
        Level::INFO,
        "read {} instructions, leaf side {}",
        instructions.len(),
        config.leaf_side()
    );
    describe(&instructions);

    println!("part 1: lit {}", run_bounded(&instructions, &config));
    println!("part 2: total lit {}", run_unbounded(&instructions, &config));
    Ok(())
}

fn main() {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(io::stderr);
    let filter_layer = match tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("info"))
    {
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
        Ok(layer) => layer,
    };

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();

    if let Err(e) = run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
