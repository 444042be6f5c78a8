use calculator_rs::{Calculator, EvaluationContext, EvaluatorConfig};

fn main() {
    pretty_env_logger::init();

    let expressions: Vec<String> = (1..=20)
        .map(|i| format!("sqrt({i}) * {i} ^ 2 / max({i}, 10)"))
        .collect();

    for (i, result) in calculator_rs::evaluate_batch(&expressions).iter().enumerate() {
        println!("Result {}: {:?}", i, result);
    }

    // Repeated expressions are served from the program cache.
    let config = EvaluatorConfig::default().with_cache_size(16);
    let mut calculator = Calculator::with_context(EvaluationContext::standard(), config);
    for _ in 0..3 {
        for expression in ["1 + 2", "hypot(3, 4)", "1 / 0"] {
            println!("{expression} -> {:?}", calculator.evaluate(expression));
        }
    }
    println!("cached programs: {}", calculator.cached());
}
