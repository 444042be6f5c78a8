use calculator_rs::{evaluate, EvaluationError};

fn render(expression: &str, error: &EvaluationError) -> String {
    let offset = expression
        .chars()
        .take(error.position())
        .map(|_| ' ')
        .collect::<String>();
    format!("{expression}\n{offset}^ {}", error.message())
}

fn main() {
    pretty_env_logger::init();

    for expression in [
        "2 + 3 * 4",
        "(2 + 3) * 4",
        "2 ^ 3 ^ 2",
        "sqrt(pow(3, 2) + pow(4, 2))",
        "1 / (2 - 2)",
        "sqrt(-1)",
        "(2 + 3",
        "2 # 3",
    ] {
        match evaluate(expression) {
            Ok(result) => println!("{expression} = {result}"),
            Err(err) => println!("{}", render(expression, &err)),
        }
    }
}
