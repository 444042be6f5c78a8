use calculator_rs::config::DEFAULT_MAX_DEPTH;
use calculator_rs::{evaluate, EvalErrorKind, EvaluationError, LexErrorKind, ParseErrorKind};

fn assert_close(expression: &str, expected: f64) {
    let actual = evaluate(expression).unwrap();
    assert!(
        (actual - expected).abs() <= 1e-9 * expected.abs().max(1.0),
        "{expression} = {actual}, expected {expected}"
    );
}

#[test]
fn test_standard_precedence_and_associativity() {
    assert_eq!(evaluate("2 + 3 * 4"), Ok(14.0));
    assert_eq!(evaluate("(2 + 3) * 4"), Ok(20.0));
    assert_eq!(evaluate("2 ^ 3 ^ 2"), Ok(512.0));
    assert_close("1 - 2 + 3 * 4 / 8", 0.5);
    assert_close("((1.5 + 2.5) * (3 - 1)) / 4", 2.0);
}

#[test]
fn test_unary_chains() {
    assert_eq!(evaluate("--5"), Ok(5.0));
    assert_eq!(evaluate("2 ++ 3"), Ok(5.0));
    assert_eq!(evaluate("2 +- 3"), Ok(-1.0));
    assert_eq!(evaluate("-(-(-1))"), Ok(-1.0));
}

#[test]
fn test_division_by_zero() {
    match evaluate("1 / 0") {
        Err(EvaluationError::Eval(error)) => {
            assert_eq!(error.kind, EvalErrorKind::DivisionByZero);
            assert_eq!(error.position, 2);
        }
        other => panic!("unexpected result {other:?}"),
    }
}

#[test]
fn test_sqrt_of_negative_is_a_domain_error() {
    match evaluate("sqrt(-1)") {
        Err(EvaluationError::Eval(error)) => {
            assert!(matches!(error.kind, EvalErrorKind::DomainError { .. }));
            assert_eq!(error.position, 0);
        }
        other => panic!("unexpected result {other:?}"),
    }
}

#[test]
fn test_unmatched_parenthesis() {
    match evaluate("(2 + 3") {
        Err(EvaluationError::Parse(error)) => {
            assert_eq!(error.kind, ParseErrorKind::UnmatchedParenthesis);
            assert_eq!(error.position, 0);
        }
        other => panic!("unexpected result {other:?}"),
    }
}

#[test]
fn test_empty_expression() {
    match evaluate("") {
        Err(EvaluationError::Parse(error)) => {
            assert_eq!(error.kind, ParseErrorKind::EmptyExpression);
        }
        other => panic!("unexpected result {other:?}"),
    }
}

#[test]
fn test_lex_error_carries_character_and_position() {
    match evaluate("3 % 2") {
        Err(EvaluationError::Lex(error)) => {
            assert_eq!(error.kind, LexErrorKind::UnexpectedCharacter('%'));
            assert_eq!(error.character(), Some('%'));
            assert_eq!(error.position, 2);
        }
        other => panic!("unexpected result {other:?}"),
    }
}

#[test]
fn test_errors_render_messages_with_positions() {
    let error = evaluate("2 * foo(1)").unwrap_err();
    assert_eq!(error.position(), 4);
    assert_eq!(error.to_string(), "unknown function 'foo' at position 4");

    let error = evaluate("1.2.3").unwrap_err();
    assert_eq!(
        error.to_string(),
        "malformed number: unexpected '.' at position 3"
    );
}

#[test]
fn test_whitespace_insensitivity() {
    assert_eq!(evaluate("2+3"), evaluate(" 2 + 3 "));
    assert_eq!(evaluate("2*(3+4)"), evaluate("\t2 *\n( 3 + 4 ) "));
}

#[test]
fn test_nan_is_returned_not_raised() {
    assert!(evaluate("(-2) ^ 0.5").unwrap().is_nan());
}

#[test]
fn test_builtins() {
    assert_close("sqrt(2) ^ 2", 2.0);
    assert_close("sin(pi() / 2)", 1.0);
    assert_close("ln(e() ^ 3)", 3.0);
    assert_close("log(1e6)", 6.0);
    assert_close("round(2.4) + hypot(6, 8)", 12.0);
}

#[test]
fn test_long_operator_runs_never_overflow() {
    for operator in ["+", "*", "-", "/"] {
        for count in [1_000, 20_000] {
            let expression = vec!["1"; count].join(operator);
            match evaluate(&expression) {
                Err(EvaluationError::Parse(error)) => {
                    assert_eq!(error.kind, ParseErrorKind::NestingTooDeep(DEFAULT_MAX_DEPTH));
                }
                other => panic!("{operator} x {count}: unexpected {other:?}"),
            }
        }
    }

    assert_eq!(evaluate(&vec!["1"; 64].join(" + ")), Ok(64.0));
}

#[test]
fn test_repeated_evaluation_is_identical() {
    for expression in ["1 / 0", "sqrt(3) * 7", "(1 +", "2 ^ 0.5"] {
        let first = evaluate(expression);
        for _ in 0..10 {
            assert_eq!(evaluate(expression), first);
        }
    }
}
