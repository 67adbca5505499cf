//! Arithmetic histories evaluated under a modulus.
//!
//! A value that is multiplied and added to thousands of times grows without bound, but
//! its residue modulo `m` only depends on the residues of every step, since
//! `(a op b) mod m = ((a mod m) op (b mod m)) mod m` for addition and multiplication.
//! [`ModularValue`] therefore stores its initial value and the ids of the operations
//! applied to it, and replays them under whatever modulus a caller asks about.

use std::{collections::HashMap, error, fmt::Display, str::FromStr};

#[derive(Debug)]
pub enum Error {
    InvalidOperationText(String),
    InvalidOperator(String),
    InvalidOperand(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidOperationText(s) => write!(
                f,
                "Invalid text({}) for operation, expect \"new = old <operator> <operand>\".",
                s
            ),
            Error::InvalidOperator(s) => {
                write!(f, "Invalid operator({}), expect + or *.", s)
            }
            Error::InvalidOperand(s) => {
                write!(f, "Invalid operand({}), expect old or an integer.", s)
            }
        }
    }
}

impl error::Error for Error {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Multiply,
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operator::Add => write!(f, "+"),
            Operator::Multiply => write!(f, "*"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operand {
    Old,
    Constant(u64),
}

impl Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operand::Old => write!(f, "old"),
            Operand::Constant(n) => write!(f, "{}", n),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Operation {
    operator: Operator,
    operand: Operand,
}

impl Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "new = old {} {}", self.operator, self.operand)
    }
}

impl FromStr for Operation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s.split_ascii_whitespace().collect::<Vec<_>>();
        let [new, "=", old, operator, operand] = parts.as_slice() else {
            return Err(Error::InvalidOperationText(s.to_string()));
        };
        if *new != "new" || *old != "old" {
            return Err(Error::InvalidOperationText(s.to_string()));
        }

        let operator = match *operator {
            "+" => Operator::Add,
            "*" => Operator::Multiply,
            other => return Err(Error::InvalidOperator(other.to_string())),
        };
        let operand = match *operand {
            "old" => Operand::Old,
            other => Operand::Constant(
                other
                    .parse::<u64>()
                    .map_err(|_| Error::InvalidOperand(other.to_string()))?,
            ),
        };

        Ok(Self::new(operator, operand))
    }
}

impl Operation {
    pub fn new(operator: Operator, operand: Operand) -> Self {
        Self { operator, operand }
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn operand(&self) -> Operand {
        self.operand
    }

    /// One step of the history, reduced modulo `modulus` (which must not be zero).
    pub fn apply(&self, old: u64, modulus: u64) -> u64 {
        let modulus = u128::from(modulus);
        let old = u128::from(old) % modulus;
        let rhs = match self.operand {
            Operand::Old => old,
            Operand::Constant(n) => u128::from(n) % modulus,
        };
        let new = match self.operator {
            Operator::Add => old + rhs,
            Operator::Multiply => old * rhs,
        } % modulus;

        // Below modulus, so it fits back.
        new as u64
    }

    /// The unreduced result, `None` on overflow.
    pub fn apply_exact(&self, old: u64) -> Option<u64> {
        let rhs = match self.operand {
            Operand::Old => old,
            Operand::Constant(n) => n,
        };
        match self.operator {
            Operator::Add => old.checked_add(rhs),
            Operator::Multiply => old.checked_mul(rhs),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OpId(usize);

impl Display for OpId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Registry of the operations of one run; equal operations share one id.
#[derive(Debug, Default)]
pub struct OperationTable {
    operations: Vec<Operation>,
    ids: HashMap<Operation, OpId>,
}

impl OperationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&mut self, operation: Operation) -> OpId {
        let next_id = OpId(self.operations.len());
        *self.ids.entry(operation).or_insert_with(|| {
            self.operations.push(operation);
            next_id
        })
    }

    pub fn get(&self, id: OpId) -> Option<&Operation> {
        self.operations.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
struct Checkpoint {
    applied_n: usize,
    residue: u64,
}

#[derive(Debug, Clone)]
pub struct ModularValue {
    initial: u64,
    history: Vec<OpId>,
    checkpoints: HashMap<u64, Checkpoint>,
}

impl ModularValue {
    pub fn new(initial: u64) -> Self {
        Self {
            initial,
            history: Vec::new(),
            checkpoints: HashMap::new(),
        }
    }

    pub fn initial(&self) -> u64 {
        self.initial
    }

    pub fn history(&self) -> &[OpId] {
        &self.history
    }

    pub fn record(&mut self, id: OpId) {
        self.history.push(id);
    }

    /// Replays the whole history from the initial value under `modulus`.
    ///
    /// Panics if `modulus` is zero or the history holds an id `table` never issued.
    pub fn evaluate(&self, table: &OperationTable, modulus: u64) -> u64 {
        assert!(modulus > 0, "Modulus must be positive.");
        Self::replay(table, modulus, self.initial % modulus, &self.history)
    }

    /// Same result as [`ModularValue::evaluate`], resuming from where the last call with
    /// this modulus stopped instead of from the initial value.
    pub fn evaluate_cached(&mut self, table: &OperationTable, modulus: u64) -> u64 {
        assert!(modulus > 0, "Modulus must be positive.");
        let initial = self.initial % modulus;
        let checkpoint = self.checkpoints.entry(modulus).or_insert(Checkpoint {
            applied_n: 0,
            residue: initial,
        });
        checkpoint.residue = Self::replay(
            table,
            modulus,
            checkpoint.residue,
            &self.history[checkpoint.applied_n..],
        );
        checkpoint.applied_n = self.history.len();

        checkpoint.residue
    }

    fn replay(table: &OperationTable, modulus: u64, start: u64, ids: &[OpId]) -> u64 {
        ids.iter().fold(start, |value, id| {
            let operation = table.get(*id).unwrap_or_else(|| {
                panic!("Operation {} is not registered in the operation table.", id)
            });
            operation.apply(value, modulus)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_then_add_under_small_modulus() {
        let mut table = OperationTable::new();
        let square = table.intern(Operation::new(Operator::Multiply, Operand::Old));
        let add_3 = table.intern(Operation::new(Operator::Add, Operand::Constant(3)));
        let mut value = ModularValue::new(79);
        value.record(square);
        value.record(add_3);

        assert_eq!(value.evaluate(&table, 5), 6244 % 5);
        assert_eq!(value.evaluate(&table, 5), 4);
        assert_eq!(value.evaluate(&table, 1_000_000), 6244);
    }

    #[test]
    fn equal_operations_share_an_id() {
        let mut table = OperationTable::new();
        let a = table.intern("new = old * 19".parse().unwrap());
        let b = table.intern(Operation::new(Operator::Add, Operand::Old));
        let c = table.intern(Operation::new(Operator::Multiply, Operand::Constant(19)));

        assert_eq!(a, c);
        assert_ne!(a, b);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn cached_evaluation_resumes_history() {
        let mut table = OperationTable::new();
        let double = table.intern(Operation::new(Operator::Add, Operand::Old));
        let times_7 = table.intern(Operation::new(Operator::Multiply, Operand::Constant(7)));
        let mut value = ModularValue::new(12);
        for round in 0..50 {
            value.record(if round % 3 == 0 { times_7 } else { double });
            for modulus in [13, 17, 23] {
                let cached = value.evaluate_cached(&table, modulus);
                assert_eq!(cached, value.evaluate(&table, modulus));
            }
        }
    }

    #[test]
    fn operation_text() {
        let op = "new = old + 6".parse::<Operation>().unwrap();
        assert_eq!(op, Operation::new(Operator::Add, Operand::Constant(6)));
        assert_eq!(op.to_string(), "new = old + 6");
        assert!("new = old - 6".parse::<Operation>().is_err());
        assert!("new = old * x".parse::<Operation>().is_err());
        assert!("old * 2".parse::<Operation>().is_err());
    }

    #[test]
    #[should_panic(expected = "not registered")]
    fn unknown_operation_id_panics() {
        let mut other_table = OperationTable::new();
        other_table.intern(Operation::new(Operator::Add, Operand::Old));
        let id = other_table.intern(Operation::new(Operator::Add, Operand::Constant(1)));
        let mut value = ModularValue::new(1);
        value.record(id);

        value.evaluate(&OperationTable::new(), 7);
    }
}
