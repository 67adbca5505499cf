use proptest::prelude::*;
use toolkit::{
    interval::{self, Interval},
    path, ModularValue, Operand, Operation, OperationTable, Operator, SparseGraph,
};

fn arb_interval() -> impl Strategy<Value = Interval> {
    (-30i64..30, 0i64..12).prop_map(|(lo, width)| Interval::new(lo, lo + width).unwrap())
}

fn arb_operation() -> impl Strategy<Value = Operation> {
    (any::<bool>(), prop::option::of(0u64..12)).prop_map(|(is_add, operand)| {
        let operator = if is_add {
            Operator::Add
        } else {
            Operator::Multiply
        };
        let operand = operand.map(Operand::Constant).unwrap_or(Operand::Old);
        Operation::new(operator, operand)
    })
}

fn exact_value(initial: u64, operations: &[Operation]) -> Option<u128> {
    operations.iter().try_fold(u128::from(initial), |old, op| {
        let rhs = match op.operand() {
            Operand::Old => old,
            Operand::Constant(n) => u128::from(n),
        };
        match op.operator() {
            Operator::Add => old.checked_add(rhs),
            Operator::Multiply => old.checked_mul(rhs),
        }
    })
}

fn distance(graph: &SparseGraph<u8, ()>, start: u8, goal: u8) -> Option<usize> {
    path::shortest_path_len(graph, [start], &goal)
}

proptest! {
    #[test]
    fn reduce_is_idempotent(intervals in prop::collection::vec(arb_interval(), 0..20)) {
        let reduced = interval::reduce(intervals);
        prop_assert_eq!(interval::reduce(reduced.clone()), reduced);
    }

    #[test]
    fn reduce_keeps_coverage(intervals in prop::collection::vec(arb_interval(), 0..20)) {
        let reduced = interval::reduce(intervals.clone());
        for point in -40..50 {
            prop_assert_eq!(
                reduced.iter().any(|i| i.contains_point(point)),
                intervals.iter().any(|i| i.contains_point(point))
            );
        }
    }

    #[test]
    fn reduced_intervals_are_sorted_and_apart(intervals in prop::collection::vec(arb_interval(), 0..20)) {
        let reduced = interval::reduce(intervals);
        for pair in reduced.windows(2) {
            prop_assert!(pair[0].hi() < pair[1].lo());
            prop_assert!(!pair[0].overlaps(&pair[1]));
        }
    }

    #[test]
    fn removing_an_edge_never_shortens_a_path(
        edges in prop::collection::vec((0u8..8, 0u8..8), 1..24),
        removed_ind in any::<prop::sample::Index>(),
        start in 0u8..8,
        goal in 0u8..8,
    ) {
        let mut graph = SparseGraph::<u8, ()>::new();
        for (from, to) in &edges {
            graph.add_edge(*from, *to);
        }
        let before = distance(&graph, start, goal);

        let (from, to) = edges[removed_ind.index(edges.len())];
        graph.remove_edge(&from, &to);
        let after = distance(&graph, start, goal);

        match (before, after) {
            (Some(before), Some(after)) => prop_assert!(after >= before),
            (None, after) => prop_assert_eq!(after, None),
            (Some(_), None) => {}
        }
    }

    #[test]
    fn modular_value_matches_exact_arithmetic(
        initial in 0u64..60,
        operations in prop::collection::vec(arb_operation(), 0..=6),
        modulus in 1u64..100,
    ) {
        let exact = exact_value(initial, &operations);
        prop_assume!(exact.is_some());

        let mut table = OperationTable::new();
        let mut value = ModularValue::new(initial);
        for op in &operations {
            value.record(table.intern(*op));
        }

        let expect = u64::try_from(exact.unwrap() % u128::from(modulus)).unwrap();
        prop_assert_eq!(value.evaluate(&table, modulus), expect);
        prop_assert_eq!(value.evaluate_cached(&table, modulus), expect);
    }
}
