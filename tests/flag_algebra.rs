// tests/flag_algebra.rs
//! Algebraic properties of flags, flag sums and vectors.

use contextual_flow::{
    bad, compose_vectors, pointed, to_vector, Delta, Flag, FlagError, FlagSet, Sign, VectorOp,
};
use pretty_assertions::assert_eq;

fn atom(name: &str) -> FlagSet {
    FlagSet::from(Flag::new(name).unwrap())
}

#[test]
fn nothing_is_the_union_identity() {
    let x = atom("x");
    assert_eq!(x.union(&FlagSet::nothing()), x);
    assert_eq!(FlagSet::nothing().union(&x), x);
    assert_eq!(FlagSet::nothing().union(&FlagSet::nothing()), FlagSet::nothing());
}

#[test]
fn truth_values() {
    assert!(!FlagSet::nothing().is_truthy());
    assert!(atom("x").is_truthy());
    assert!(!FlagSet::from(bad()).is_truthy());
    assert!(!FlagSet::from(Flag::negative("no").unwrap()).is_truthy());
    assert!(FlagSet::from(bad()).union(&atom("x")).is_truthy());
}

#[test]
fn union_preserves_insertion_order() {
    let (x, y, z) = (atom("x"), atom("y"), atom("z"));
    let sum = FlagSet::sum([y.clone(), x.clone(), z.clone(), y.clone()]);
    let names: Vec<String> = sum.iter().map(|flag| flag.name().into_owned()).collect();
    assert_eq!(names, vec!["y", "x", "z"]);
}

#[test]
fn subtraction_removes_present_atoms_only() {
    let (x, y, z) = (atom("x"), atom("y"), atom("z"));
    let xy = x.union(&y);
    assert_eq!(xy.subtract(&x), y);
    assert_eq!(xy.subtract(&z), xy);
    assert!(xy.subtract(&xy).is_nothing());
}

#[test]
fn named_flags_are_identities() {
    let first = Flag::new("same").unwrap();
    let second = Flag::new("same").unwrap();
    assert_ne!(first, second);
    assert_eq!(first, first.clone());
    assert!(!FlagSet::from(first).intersects(&FlagSet::from(second)));
}

#[test]
fn pointed_sums_equal_unions_of_pointed_atoms() {
    let variadic = pointed![1, 2, 3];
    let unioned = pointed(1).union(&pointed(2)).union(&pointed(3));
    assert_eq!(variadic, unioned);
    assert_eq!(variadic.len(), 3);
    assert_eq!(pointed![1, 1], pointed(1));
    assert_ne!(pointed(1), pointed(1_i64));
}

#[test]
fn membership_equality_is_intersection() {
    let sum = pointed![1, 2, 3];
    assert!(sum.intersects(&pointed(2)));
    assert!(!sum.intersects(&pointed(4)));
}

#[test]
fn named_flag_points_to_itself() {
    let flag = Flag::new("self").unwrap();
    let point = FlagSet::from(flag.clone()).point().unwrap();
    assert_eq!(point.downcast_ref::<Flag>(), Some(&flag));
}

#[test]
fn invalid_names_are_rejected() {
    for name in ["", "   ", "\t"] {
        let err = Flag::new(name).unwrap_err();
        assert!(matches!(err, FlagError::InvalidFlagName { .. }));
    }
    let flag = Flag::with_sign("fine", Sign::Negative).unwrap();
    assert_eq!(flag.sign(), Sign::Negative);
}

#[test]
fn vectors_add_and_remove() {
    let (x, y) = (atom("x"), atom("y"));
    let base = x.clone();

    assert_eq!(y.adding().apply(&base), x.union(&y));
    assert_eq!(x.removing().apply(&base), FlagSet::nothing());
    assert_eq!(y.removing().apply(&base), base);
    assert_eq!(to_vector(VectorOp::Add, y.clone()).resolve(), y);
}

#[test]
fn vector_sums_apply_in_sequence() {
    let (x, y) = (atom("x"), atom("y"));
    let delta = compose_vectors(x.adding(), y.adding()).then(x.removing());

    assert_eq!(delta.len(), 3);
    assert_eq!(delta.resolve(), y);
    assert_eq!(delta.apply(&delta.resolve()), y);
}

#[test]
fn vectors_are_idempotent() {
    let sum = pointed![1, 2];
    let add = pointed(3).adding();
    assert_eq!(add.apply(&add.apply(&sum)), add.apply(&sum));
}
