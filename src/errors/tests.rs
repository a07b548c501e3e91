//! Unit tests for error handling.

use crate::errors::errors::{Error, ErrorImpl, ErrorKind, ErrorTip};
use crate::Position;

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UndefinedFunction {
            function: "frobnicate".to_string(),
        },
        Position(2, 7),
    );

    assert_eq!(error.get_error_name(), "UndefinedFunctionError");
    assert_eq!(error.kind(), ErrorKind::UndefinedFunction);
}

#[test]
fn test_error_position() {
    let error = Error::new(
        ErrorImpl::ScalarAsArray {
            variable: "NF".to_string(),
        },
        Position(4, 12),
    );

    assert_eq!(*error.get_position(), Position(4, 12));
}

#[test]
fn test_arity_error_message() {
    let error = Error::new(
        ErrorImpl::TooManyArguments {
            function: "f".to_string(),
            declared: 2,
            received: 3,
        },
        Position(1, 1),
    );

    assert_eq!(error.get_error_name(), "ArityError");
    assert_eq!(error.kind(), ErrorKind::Arity);
    assert_eq!(
        format!("{}", error),
        "1:1: \"f\" called with more arguments than declared"
    );
}

#[test]
fn test_type_mismatch_variants_share_kind() {
    let variants = vec![
        ErrorImpl::ArrayAsScalar {
            variable: "a".to_string(),
        },
        ErrorImpl::ScalarAsArray {
            variable: "x".to_string(),
        },
        ErrorImpl::ArrayAsScalarParam {
            variable: "a".to_string(),
        },
        ErrorImpl::ScalarAsArrayParam {
            argument: "1".to_string(),
        },
        ErrorImpl::ArrayToNative {
            variable: "a".to_string(),
            function: "length".to_string(),
        },
        ErrorImpl::GlobalNameConflict {
            name: "f".to_string(),
        },
    ];

    for variant in variants {
        let error = Error::new(variant, Position(1, 1));
        assert_eq!(error.kind(), ErrorKind::TypeMismatch);
        assert_eq!(error.get_error_name(), "TypeMismatchError");
    }
}

#[test]
fn test_error_display_includes_position() {
    let error = Error::new(
        ErrorImpl::ArrayAsScalar {
            variable: "totals".to_string(),
        },
        Position(10, 3),
    );

    assert_eq!(format!("{}", error), "10:3: can't use array \"totals\" as scalar");
}

#[test]
fn test_error_tip() {
    let error = Error::new(
        ErrorImpl::ArrayToNative {
            variable: "a".to_string(),
            function: "trim".to_string(),
        },
        Position(1, 1),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(tip) => assert!(tip.contains("trim")),
        ErrorTip::None => panic!("expected a suggestion"),
    }
}
