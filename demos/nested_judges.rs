//! Hierarchical State Machines
//!
//! This example demonstrates a judge nested inside another judge's field.
//!
//! Key concepts:
//! - The parent's action rule plays employer for the child judge
//! - Entering the parent state re-initializes the child
//! - The parent's condition rule reads the child's state
//!
//! Run with: cargo run --example nested_judges

use verdict::core::StateField;
use verdict::rules::{always, stay_put, ActionRule, NoAction};
use verdict::{state_enum, Judge, JudgeBuilder};

state_enum! {
    enum Wash {
        Fill,
        Agitate,
        Drain,
    }
    final: [Drain]
}

state_enum! {
    enum Washer {
        Idle,
        Washing,
        Finished,
    }
    final: [Finished]
}

type Cycle = StateField<Wash, u32>;

fn wash_cycle() -> Judge<Cycle> {
    JudgeBuilder::new()
        .field(Cycle::new(Wash::Fill, 0))
        .condition(Wash::Fill, always::<Cycle>(Wash::Agitate))
        .condition(Wash::Agitate, |f: &Cycle| (*f.data() >= 2).then_some(Wash::Drain))
        .condition(Wash::Drain, stay_put::<Cycle>())
        .action(Wash::Fill, NoAction)
        .action(Wash::Agitate, Spin)
        .action(Wash::Drain, NoAction)
        .strict(true)
        .build()
        .unwrap()
}

struct Spin;

impl ActionRule<Cycle> for Spin {
    fn on_stay(&mut self, field: &mut Cycle) {
        *field.data_mut() += 1;
        println!("    spin #{}", field.data());
    }
}

type Machine = StateField<Washer, Judge<Cycle>>;

struct RunCycle;

impl ActionRule<Machine> for RunCycle {
    fn on_stay(&mut self, field: &mut Machine) {
        let cycle = field.data_mut();
        match cycle.evaluate() {
            Ok(step) => println!("  cycle: {:?}", step),
            Err(err) => println!("  cycle fault: {err}"),
        }
    }

    fn on_transition(&mut self, field: &mut Machine, from: &Washer, _to: &Washer) {
        println!("  starting wash cycle (came from {from:?})");
        *field.data_mut() = wash_cycle();
    }
}

fn main() {
    println!("=== Nested Judges ===\n");

    let mut washer = JudgeBuilder::new()
        .field(Machine::new(Washer::Idle, wash_cycle()))
        .condition(Washer::Idle, always::<Machine>(Washer::Washing))
        .condition(Washer::Washing, |f: &Machine| {
            (f.data().state() == &Wash::Drain).then_some(Washer::Finished)
        })
        .condition(Washer::Finished, stay_put::<Machine>())
        .action(Washer::Idle, NoAction)
        .action(Washer::Washing, RunCycle)
        .action(Washer::Finished, NoAction)
        .strict(true)
        .build()
        .unwrap();

    let mut turn = 0;
    while washer.state() != &Washer::Finished {
        turn += 1;
        println!("turn {turn}: {:?}", washer.state());
        washer.evaluate().unwrap();
    }

    println!("\nFinished after {turn} turns");
    println!("Inner cycle path: {:?}", washer.field().data().history().get_path());

    println!("\n=== Example Complete ===");
}
