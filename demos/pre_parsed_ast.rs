use calculator_rs::ast::{ASTNode, Operator, UnaryOperator};
use calculator_rs::{Compiler, EvaluationContext, Evaluator};

fn main() {
    pretty_env_logger::init();

    let context = EvaluationContext::standard();
    let evaluator = Evaluator::new(context);

    let ast = evaluator
        .parse_expression("max(2, 3) * -4")
        .expect("Failed to parse");
    println!("Parsed: {ast}");

    match evaluator.evaluate_ast(&ast) {
        Ok(result) => println!("Result: {}", result),
        Err(err) => println!("Error: {}", err),
    }

    // Trees can also be assembled directly; calls are checked before evaluation.
    let hand_built = ASTNode::binary(
        ASTNode::call("sqrt", vec![ASTNode::number(2.0, 5)], 0),
        Operator::Power,
        ASTNode::unary(UnaryOperator::Negate, ASTNode::number(2.0, 12), 11),
        9,
    );
    println!("Hand built: {hand_built}");
    println!("Result: {:?}", evaluator.evaluate_ast(&hand_built));

    let program = Compiler::new(context)
        .compile(&hand_built)
        .expect("Failed to compile");
    println!("Instructions: {:?}", program.instructions());
    println!("Compiled result: {:?}", program.execute());
}
