//! Coin-operated Turnstile
//!
//! This example demonstrates a judged state machine driven turn by turn.
//!
//! Key concepts:
//! - Condition rules decide, action rules act
//! - The employer feeds inputs through the field's owner data
//! - A direct override shares the transition path with evaluation
//!
//! Run with: cargo run --example turnstile

use verdict::core::StateField;
use verdict::rules::{stay_put, ActionFn, Guarded, NoAction};
use verdict::{state_enum, JudgeBuilder, Step};

state_enum! {
    enum Turnstile {
        Locked,
        Unlocked,
        Maintenance,
    }
}

#[derive(Default)]
struct Gate {
    coin: bool,
    pushed: bool,
    passages: u32,
}

type GateField = StateField<Turnstile, Gate>;

fn main() {
    println!("=== Turnstile ===\n");

    let mut judge = JudgeBuilder::new()
        .field(GateField::new(Turnstile::Locked, Gate::default()))
        .condition(
            Turnstile::Locked,
            Guarded::<GateField>::new().when(|f: &GateField| f.data().coin, Turnstile::Unlocked),
        )
        .condition(
            Turnstile::Unlocked,
            Guarded::<GateField>::new().when(|f: &GateField| f.data().pushed, Turnstile::Locked),
        )
        .condition(Turnstile::Maintenance, stay_put::<GateField>())
        .action(
            Turnstile::Locked,
            ActionFn::<GateField>::new().with_on_transition(|f, from, _| {
                if from == &Turnstile::Unlocked {
                    f.data_mut().passages += 1;
                }
                f.data_mut().pushed = false;
            }),
        )
        .action(
            Turnstile::Unlocked,
            ActionFn::<GateField>::new().with_on_transition(|f, _, _| f.data_mut().coin = false),
        )
        .action(Turnstile::Maintenance, NoAction)
        .strict(true)
        .build()
        .unwrap();

    let inputs = [(false, true), (true, false), (false, false), (false, true)];
    for (coin, pushed) in inputs {
        let gate = judge.field_mut().data_mut();
        gate.coin = coin;
        gate.pushed = pushed;

        match judge.evaluate().unwrap() {
            Step::Stayed(state) => println!("  coin={coin:<5} push={pushed:<5} stay in {state:?}"),
            Step::Transitioned { from, to } => {
                println!("  coin={coin:<5} push={pushed:<5} {from:?} -> {to:?}")
            }
        }
    }

    println!("\nPassages: {}", judge.field().data().passages);

    judge.change_state(Turnstile::Maintenance).unwrap();
    println!("Override: now in {:?}", judge.state());

    println!("\nHistory:");
    for transition in judge.history().transitions() {
        println!(
            "  turn {}: {:?} -> {:?} ({:?})",
            transition.turn, transition.from, transition.to, transition.cause
        );
    }

    println!("\n=== Example Complete ===");
}
