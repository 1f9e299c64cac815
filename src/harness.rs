// src/harness.rs
//! Demo chains driven by the command-line harness.

use contextual_flow::{
    bad, maybe, pointed, saving_context, until_error, Chain, Contextual, HarnessConfig, Outcome,
    Runner, Scenario, Stage,
};
use std::fmt::Display;
use thiserror::Error;

/// Values above this make the `maybe` scenario flag its contextual as bad.
const MAYBE_LIMIT: i64 = 20;

#[derive(Error, Debug)]
enum ArithmeticError {
    #[error("division by zero: {dividend} / ({dividend} - 28)")]
    DivisionByZero { dividend: i64 },
    #[error("arithmetic overflow in {stage} with input {input}")]
    Overflow { stage: &'static str, input: i64 },
}

fn overflow(stage: &'static str, input: i64) -> ArithmeticError {
    ArithmeticError::Overflow { stage, input }
}

/// A bare stage that fails instead of wrapping when `op` overflows.
fn checked(stage: &'static str, op: fn(i64) -> Option<i64>) -> Stage<i64> {
    Stage::try_map(move |n: i64| op(n).ok_or_else(|| overflow(stage, n))).labeled(stage)
}

/// Contextual version of [`checked`].
fn checked_lifted(stage: &'static str, op: fn(i64) -> Option<i64>) -> Stage<Contextual<i64>> {
    Stage::try_lifted(move |n: i64| op(n).ok_or_else(|| overflow(stage, n))).labeled(stage)
}

fn divide_by_n_minus_28(n: i64) -> Result<i64, ArithmeticError> {
    let divisor = n
        .checked_sub(28)
        .ok_or_else(|| overflow("divide_by_n_minus_28", n))?;
    if divisor == 0 {
        return Err(ArithmeticError::DivisionByZero { dividend: n });
    }
    n.checked_div(divisor)
        .ok_or_else(|| overflow("divide_by_n_minus_28", n))
}

/// Runs the configured scenario and prints its result.
pub fn run(config: &HarnessConfig) -> anyhow::Result<()> {
    log::info!("Running scenario '{}' with input {}", config.scenario, config.input);

    match config.scenario {
        Scenario::Maybe => {
            let chain = maybe_chain();
            let input = Contextual::new(config.input);
            if config.show_steps {
                print_steps(chain.steps(input.clone()));
            }
            report(maybe(chain).run(input)?);
        }
        Scenario::UntilError => {
            let chain = arithmetic_chain();
            if config.show_steps {
                print_steps(chain.steps(config.input));
            }
            report(until_error(chain).run(Contextual::new(config.input))?);
        }
        Scenario::SavingContext => {
            let chain = arithmetic_chain().slice(..2)?;
            if config.show_steps {
                print_steps(chain.steps(config.input));
            }
            let input = Contextual::with(config.input, pointed("saved"));
            report(saving_context(chain).run(input)?);
        }
    }
    Ok(())
}

/// `add10 -> flag bad above the limit -> times2`.
fn maybe_chain() -> Chain<Contextual<i64>> {
    Chain::from(checked_lifted("add10", |n| n.checked_add(10)))
        .then(
            Stage::lifted(|n: i64| {
                if n > MAYBE_LIMIT {
                    Contextual::with(n, bad())
                } else {
                    Contextual::new(n)
                }
            })
            .labeled("check_limit"),
        )
        .then(checked_lifted("times2", |n| n.checked_mul(2)))
}

/// `add10 -> times2 -> divide by (n - 28) -> square`.
fn arithmetic_chain() -> Chain<i64> {
    Chain::from(checked("add10", |n| n.checked_add(10)))
        .then(checked("times2", |n| n.checked_mul(2)))
        .then(Stage::try_map(divide_by_n_minus_28).labeled("divide_by_n_minus_28"))
        .then(checked("square", |n| n.checked_mul(n)))
}

fn print_steps<'a, T: Display + 'a>(
    steps: impl Iterator<Item = contextual_flow::Step<'a, T>>,
) {
    for step in steps {
        match step.result {
            Ok(value) => println!("  [{}] {:<22} {}", step.index, step.label, value),
            Err(error) => println!("  [{}] {:<22} failed: {}", step.index, step.label, error),
        }
    }
}

fn report(outcome: Outcome<i64>) {
    match outcome {
        Outcome::Completed(result) => println!("completed: {}", result),
        Outcome::ShortCircuited { at, result } => {
            println!("short-circuited at stage {}: {}", at, result);
            if let Some(error) = result.stage_error() {
                log::warn!("Stage failed: {}", error);
            }
        }
    }
}
