use std::{collections::VecDeque, error, fmt::Display, mem, path::Path};

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use toolkit::{ModularValue, OpId, Operation, OperationTable};
use tracing::{debug, trace};

#[derive(Debug)]
pub enum Error {
    InvalidMonkeyText(String),
    InvalidOperation(toolkit::modular::Error),
    ZeroDivisor(usize),
    InvalidTarget { monkey_id: usize, target: usize },
    UnorderedMonkey { expect: usize, given: usize },
    WorryOverflow { monkey_id: usize, worry: u64 },
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidMonkeyText(s) => write!(f, "Invalid text for monkey:\n{}", s),
            Error::InvalidOperation(e) => write!(f, "Invalid operation of monkey, {}", e),
            Error::ZeroDivisor(id) => write!(f, "Monkey {} tests divisibility by zero.", id),
            Error::InvalidTarget { monkey_id, target } => write!(
                f,
                "Monkey {} throws to monkey {}, which doesn't exist.",
                monkey_id, target
            ),
            Error::UnorderedMonkey { expect, given } => {
                write!(f, "Expect monkey {} next, given monkey {}.", expect, given)
            }
            Error::WorryOverflow { monkey_id, worry } => write!(
                f,
                "Worry level({}) overflows when inspected by monkey {}.",
                worry, monkey_id
            ),
        }
    }
}

impl error::Error for Error {}

#[derive(Debug, Clone)]
pub struct Monkey {
    id: usize,
    items: Vec<u64>,
    operation: Operation,
    divisor: u64,
    if_true: usize,
    if_false: usize,
}

impl TryFrom<&str> for Monkey {
    type Error = Error;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        static MONKEY_PATTERN: Lazy<Regex> = Lazy::new(|| {
            Regex::new(
                r"^Monkey (\d+):\s*\n\s*Starting items:([\d, ]*)\n\s*Operation: ([^\n]+)\n\s*Test: divisible by (\d+)\s*\n\s*If true: throw to monkey (\d+)\s*\n\s*If false: throw to monkey (\d+)$",
            )
            .unwrap()
        });

        let invalid = || Error::InvalidMonkeyText(value.to_string());
        let caps = MONKEY_PATTERN.captures(value.trim()).ok_or_else(invalid)?;
        let number = |ind: usize| caps[ind].parse::<u64>().map_err(|_| invalid());
        let index = |ind: usize| caps[ind].parse::<usize>().map_err(|_| invalid());

        let id = index(1)?;
        let items = caps[2]
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<u64>().map_err(|_| invalid()))
            .collect::<Result<Vec<_>, _>>()?;
        let operation = caps[3]
            .trim()
            .parse::<Operation>()
            .map_err(Error::InvalidOperation)?;
        let divisor = number(4)?;
        if divisor == 0 {
            return Err(Error::ZeroDivisor(id));
        }

        Ok(Self {
            id,
            items,
            operation,
            divisor,
            if_true: index(5)?,
            if_false: index(6)?,
        })
    }
}

impl Monkey {
    fn target(&self, divisible: bool) -> usize {
        if divisible {
            self.if_true
        } else {
            self.if_false
        }
    }
}

/// Product of the two largest inspection counts.
pub fn monkey_business(inspections: &[u64]) -> u64 {
    let mut counts = inspections.to_vec();
    counts.sort_unstable_by(|a, b| b.cmp(a));
    counts.iter().take(2).product()
}

/// Inspection counts after `round_n` rounds in which worry is divided by 3 after every inspection.
pub fn relieved_inspections(monkeys: &[Monkey], round_n: usize) -> Result<Vec<u64>, Error> {
    let mut queues = monkeys
        .iter()
        .map(|m| VecDeque::from(m.items.clone()))
        .collect::<Vec<_>>();
    let mut inspections = vec![0; monkeys.len()];
    for round in 0..round_n {
        for monkey in monkeys {
            while let Some(worry) = queues[monkey.id].pop_front() {
                inspections[monkey.id] += 1;
                let worry = monkey
                    .operation
                    .apply_exact(worry)
                    .ok_or(Error::WorryOverflow {
                        monkey_id: monkey.id,
                        worry,
                    })?
                    / 3;
                queues[monkey.target(worry % monkey.divisor == 0)].push_back(worry);
            }
        }
        trace!("Inspections after round {}: {:?}", round + 1, inspections);
    }

    Ok(inspections)
}

/// Inspection counts after `round_n` rounds without relief.
///
/// Worry levels are kept as operation histories and only evaluated modulo the divisor of
/// the monkey testing them.
pub fn anxious_inspections(monkeys: &[Monkey], round_n: usize) -> Vec<u64> {
    let mut table = OperationTable::new();
    let op_ids = monkeys
        .iter()
        .map(|m| table.intern(m.operation))
        .collect::<Vec<OpId>>();
    debug!(
        "{} distinct operation(s) among {} monkeys",
        table.len(),
        monkeys.len()
    );

    let mut held = monkeys
        .iter()
        .map(|m| {
            m.items
                .iter()
                .map(|worry| ModularValue::new(*worry))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    let mut inspections = vec![0; monkeys.len()];
    for round in 0..round_n {
        for monkey in monkeys {
            let items = mem::take(&mut held[monkey.id]);
            inspections[monkey.id] += items.len() as u64;
            for mut value in items {
                value.record(op_ids[monkey.id]);
                let residue = value.evaluate_cached(&table, monkey.divisor);
                held[monkey.target(residue == 0)].push(value);
            }
        }
        if (round + 1) % 1000 == 0 {
            trace!("Inspections after round {}: {:?}", round + 1, inspections);
        }
    }

    inspections
}

fn check_monkeys(monkeys: &[Monkey]) -> Result<(), Error> {
    for (ind, monkey) in monkeys.iter().enumerate() {
        if monkey.id != ind {
            return Err(Error::UnorderedMonkey {
                expect: ind,
                given: monkey.id,
            });
        }
        for target in [monkey.if_true, monkey.if_false] {
            if target >= monkeys.len() || target == monkey.id {
                return Err(Error::InvalidTarget {
                    monkey_id: monkey.id,
                    target,
                });
            }
        }
    }

    Ok(())
}

pub fn read_monkeys<P: AsRef<Path>>(path: P) -> Result<Vec<Monkey>> {
    let monkeys = toolkit::input::read_records(&path)?
        .iter()
        .map(|record| {
            Monkey::try_from(record.join("\n").as_str()).with_context(|| {
                format!(
                    "Failed to read monkey from given file({}).",
                    path.as_ref().display()
                )
            })
        })
        .collect::<Result<Vec<_>>>()?;
    check_monkeys(&monkeys)?;
    for monkey in &monkeys {
        debug!(
            "Monkey {}: items {:?}, {}, divisible by {} ? {} : {}",
            monkey.id,
            monkey.items,
            monkey.operation,
            monkey.divisor,
            monkey.if_true,
            monkey.if_false
        );
    }

    Ok(monkeys)
}

pub fn part_one(input_path: &Path) -> Result<u64> {
    let monkeys = read_monkeys(input_path)?;
    Ok(monkey_business(&relieved_inspections(&monkeys, 20)?))
}

pub fn part_two(input_path: &Path) -> Result<u64> {
    let monkeys = read_monkeys(input_path)?;
    Ok(monkey_business(&anxious_inspections(&monkeys, 10000)))
}
