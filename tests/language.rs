use std::fs::{self};

use mathbench::{
    ast::{Expression, Locus, Operator, Statement},
    error::{ParseError, RuntimeError},
    interpreter::workspace::{Settings, Workspace},
    parse, run,
};
use walkdir::WalkDir;

#[test]
fn book_examples_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("book/src").into_iter()
                                .filter_map(Result::ok)
                                .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for (i, code) in extract_blocks(&content).into_iter().enumerate() {
            count += 1;
            let mut workspace = Workspace::standard();
            match run(&code, &mut workspace) {
                Ok(results) => {
                    assert!(!results.contains(&Statement::Truth(false)),
                            "Example {} in {:?} has a false comparison:\n{}",
                            i + 1,
                            path,
                            code);
                },
                Err(e) => panic!("Example {} in {:?} failed:\n{}\nError: {:?}",
                                 i + 1,
                                 path,
                                 code,
                                 e),
            }
        }
    }

    assert!(count > 0, "No examples found in book/src");
}

fn extract_blocks(content: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut inside = false;
    let mut buf = String::new();

    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```mathbench") {
            inside = true;
            buf.clear();
            continue;
        }
        if inside && trimmed.starts_with("```") {
            inside = false;
            blocks.push(buf.clone());
            continue;
        }
        if inside {
            buf.push_str(line);
            buf.push('\n');
        }
    }

    blocks
}

/// Runs a script and fails if any line errors or any comparison is false.
fn assert_success(src: &str) {
    let mut workspace = Workspace::standard();
    match run(src, &mut workspace) {
        Ok(results) => {
            assert!(!results.contains(&Statement::Truth(false)),
                    "Script has a false comparison: {src}")
        },
        Err(e) => panic!("Script failed: {e}"),
    }
}

fn assert_failure(src: &str) {
    if run(src, &mut Workspace::standard()).is_ok() {
        panic!("Script succeeded but was expected to fail")
    }
}

/// Runs a script and renders the result of its last line.
fn last_result(src: &str) -> String {
    let mut workspace = Workspace::standard();
    let results = run(src, &mut workspace).unwrap_or_else(|e| panic!("Script failed: {e}"));
    results.last()
           .map(ToString::to_string)
           .unwrap_or_default()
}

fn runtime_error(src: &str) -> RuntimeError {
    let mut workspace = Workspace::standard();
    let error = run(src, &mut workspace).expect_err("script was expected to fail");
    match error.downcast::<RuntimeError>() {
        Ok(error) => *error,
        Err(other) => panic!("expected a runtime error, got {other}"),
    }
}

fn expression(src: &str) -> Expression {
    match parse(src) {
        Ok(Statement::Expression(expression)) => expression,
        other => panic!("{src} did not parse to an expression: {other:?}"),
    }
}

fn parse_error(src: &str) -> ParseError {
    parse(src).expect_err("input was expected not to parse")
}

#[test]
fn assignment_and_basic_arithmetic() {
    assert_success("x = 1 + 2\n3 = x");
    assert_success("x = 7 * 9\n63 = x");
    assert_success("x = 8 - 5\n3 = x");
    assert_success("x = 10 / 2\n5 = x");
    assert_success("x = 7 % 3\n1 = x");
    assert_success("2^10 = 1024");
    assert_eq!(last_result("3 - 2 - 1"), "0");
    assert_eq!(last_result("2^3^2"), "64");
    assert_eq!(last_result("8 \\ 4"), "0.5");
}

#[test]
fn assignment_returns_the_value_and_binds_it() {
    let mut workspace = Workspace::new();
    let result = parse("z = 4+4").unwrap().simplified(&mut workspace);

    assert_eq!(result, Ok(Statement::Expression(Expression::real(8.0))));
    assert_eq!(workspace.get("z"), Some(&Expression::real(8.0)));
}

#[test]
fn implicit_multiplication() {
    assert_success("x = 3\n2x = 6");
    assert_success("x = 3\n2 x = 6");
    assert_success("x = 3\n(x + 1)(x - 1) = 8");
    assert_success("2|-3| = 6");
    assert_eq!(parse("2x").unwrap(), parse("2 x").unwrap());
}

#[test]
fn unbalanced_input_is_completed() {
    assert_eq!(parse("(1+2").unwrap(), parse("(1+2)").unwrap());
    assert_eq!(parse("1+2)").unwrap(), parse("(1+2)").unwrap());
    assert_eq!(parse("sqrt(sin(x").unwrap(), parse("sqrt(sin(x))").unwrap());
    assert_eq!(parse("|x").unwrap(), parse("|x|").unwrap());
}

#[test]
fn unary_signs() {
    assert_eq!(last_result("-2^2"), "-4");
    assert_eq!(last_result("2*-3"), "-6");
    assert_eq!(last_result("--5"), "5");
    assert_eq!(last_result("+5"), "5");
    assert_eq!(last_result("2 - -3"), "5");
}

#[test]
fn user_functions_shadow_globals() {
    assert_success("f(x) = x + y\ny = 5\nf(3) = 8");
    assert_success("x = 100\nf(x) = x + y\ny = 5\nf(3) = 8");
    assert_success("f(x, y) = x*y\nf(3, 4) = 12");
    assert_success("square(x) = x^2\nf(x) = square(x) + x\nf(3) = 12");
}

#[test]
fn globals_do_not_see_call_arguments() {
    assert_eq!(last_result("y = x + 1\nf(x) = y*x\nf(2)"), "(x + 1)*2");
    assert_eq!(last_result("y = x\nf(x) = y\nf(3)"), "x");
    assert_eq!(last_result("g(t) = x\nf(x) = g(1)\nf(5)"), "x");
    assert_success("x = 10\ny = x + 1\nf(x) = y*x\nf(2) = 22");
}

#[test]
fn user_functions_bind_late() {
    assert_success("f(x) = x*k\nk = 2\nf(3) = 6\nk = 10\nf(3) = 30");
}

#[test]
fn recursive_calls_do_not_capture_parameters() {
    assert_success("g(x) = x + 1\nf(x) = g(x*2) + x\nf(5) = 16");
    assert_success("f(x) = x\nf(f(f(7))) = 7");
}

#[test]
fn function_definition_previews_its_body() {
    assert_eq!(last_result("g(x) = x + 1"), "x + 1");
    assert_eq!(last_result("x = 100\ng(x) = x + 1"), "x + 1");
    assert_eq!(last_result("a = 2\ng(x) = a*x"), "2*x");
}

#[test]
fn unbound_names_stay_symbolic() {
    assert_eq!(last_result("a + 1"), "a + 1");
    assert_eq!(last_result("f(2 + 3)"), "f(5)");
    assert_eq!(last_result("sin(a)"), "sin(a)");
    assert_eq!(last_result("(a + b)*c"), "(a + b)*c");
    assert_eq!(last_result("a < 1"), "a < 1");
}

#[test]
fn juxtaposition_with_a_value() {
    assert_success("a = 2\na(3) = 6");
}

#[test]
fn vectors() {
    assert_success("[1, 2] + [3, 4] = [4, 6]");
    assert_success("[1, 2, 3]*[4, 5, 6] = 32");
    assert_success("[1, 0, 0] × [0, 1, 0] = [0, 0, 1]");
    assert_success("|[3, 4]| = 5");
    assert_success("abs([3, 4]) = 5");
    assert_success("2[1, 2] = [2, 4]");
    assert_success("[2, 4]/2 = [1, 2]");
    assert_eq!(last_result("(1, 2)"), "(1, 2)");
    assert_eq!(last_result("[1, 2]"), "[1, 2]");
    assert_eq!(last_result("(1, 2), (3, 4)"), "[1, 2, 3, 4]");
}

#[test]
fn vector_shape_errors() {
    assert!(matches!(runtime_error("[1, 2] + 3"), RuntimeError::ShapeMismatch { .. }));
    assert!(matches!(runtime_error("[1, 2] × [3, 4]"), RuntimeError::ShapeMismatch { .. }));
    assert!(matches!(runtime_error("[1, 2] + [1, 2, 3]"), RuntimeError::ShapeMismatch { .. }));
    assert!(matches!(runtime_error("1/[1, 2]"), RuntimeError::ShapeMismatch { .. }));
}

#[test]
fn sets() {
    assert_success("{1, 2} + 1 = {2, 3}");
    assert_success("{1, 2} = {2, 1}");
    assert_success("{1, 2} ≠ {1, 3}");
    assert_success("{1, 2}*{10, 100} = {10, 100, 20, 200}");
    assert_eq!(last_result("{x}"), "{x}");
}

#[test]
fn complex_numbers() {
    assert_success("i^2 = -1");
    assert_success("sqrt(-4) = 2i");
    assert_success("ln(-1) = pi i");
    assert_success("|3 + 4i| = 5");
    assert_success("(1 + i)(1 - i) = 2");
    assert_eq!(last_result("1 + 2i"), "1 + 2i");
    assert_eq!(last_result("1 - i"), "1 - i");
}

#[test]
fn builtin_functions() {
    assert_success("sin(0) = 0");
    assert_success("cos(0) = 1");
    assert_success("arcsin(1) = pi/2");
    assert_success("log(100) = 2");
    assert_success("log(2, 8) = 3");
    assert_success("ln(e) = 1");
    assert_success("sqrt(16) = 4");
    assert_success("arg(i) = pi/2");
    assert_success("sin([0, 0]) = [0, 0]");
}

#[test]
fn comparisons() {
    assert_success("1 < 2 ≤ 2 < 3");
    assert_success("3 >= 3 > 2 != 1");
    assert_success("0.1 + 0.2 = 0.3");
    assert_eq!(last_result("1 < 2 > 3"), "False");
    assert_eq!(last_result("2 = 2"), "True");
    assert!(matches!(runtime_error("i < 1"), RuntimeError::NotComparable { .. }));
    assert!(matches!(runtime_error("[1, 2] < [3, 4]"), RuntimeError::NotComparable { .. }));
}

#[test]
fn circular_definition_is_error() {
    assert!(matches!(runtime_error("x = x + 1"), RuntimeError::CircularDefinition { .. }));
    assert!(matches!(runtime_error("a = b\nb = a + 1"), RuntimeError::CircularDefinition { .. }));
}

#[test]
fn failed_assignment_does_not_bind() {
    let mut workspace = Workspace::new();
    assert!(run("y = [1, 2] + 3", &mut workspace).is_err());
    assert!(!workspace.contains_key("y"));
}

#[test]
fn wrong_function_arity_is_error() {
    assert!(matches!(runtime_error("f(x) = x\nf(1, 2)"),
                     RuntimeError::ArgumentCountMismatch { expected: 1, found: 2, .. }));
}

#[test]
fn runaway_recursion_is_error() {
    assert!(matches!(runtime_error("f(x) = f(x + 1)\nf(1)"), RuntimeError::RecursionLimit { .. }));

    let settings = Settings { max_call_depth: 3,
                              ..Settings::default() };
    let mut workspace = Workspace::with_settings(settings);
    run("f(x) = x\ng(x) = f(x)\nh(x) = g(x)\nk(x) = h(x)", &mut workspace).unwrap();
    assert!(run("h(1)", &mut workspace).is_ok());
    assert!(run("k(1)", &mut workspace).is_err());
}

#[test]
fn locus_parameters_stay_bound() {
    let mut workspace = Workspace::new();
    run("t = 5\na = 2", &mut workspace).unwrap();

    let locus = Locus::new(expression("t*a"),
                           vec!["t".to_string()],
                           vec![Expression::real(0.0)],
                           vec![Expression::real(1.0)]).unwrap();
    let simplified = Expression::Locus(locus).simplified(&workspace).unwrap();

    assert_eq!(simplified.to_string(), "{t*2 | 0 ≤ t ≤ 1}");
    assert!(simplified.inputs(&workspace).is_empty());
}

#[test]
fn inputs_skip_bound_parameters() {
    let mut workspace = Workspace::new();
    run("f(x) = x + k", &mut workspace).unwrap();

    let locus = Locus::new(expression("t*b"),
                           vec!["t".to_string()],
                           vec![Expression::real(0.0)],
                           vec![expression("c")]).unwrap();
    assert_eq!(Expression::Locus(locus).inputs(&workspace), ["b", "c"]);
    assert_eq!(expression("f(2) + m").inputs(&workspace), ["k", "m"]);
    assert_eq!(expression("f(x)").inputs(&workspace), ["x", "k"]);
}

#[test]
fn components_distribute() {
    assert_eq!(expression("2*[x, y]").component(1, 0).unwrap().to_string(), "2*y");
    assert_eq!(expression("{[a, b], [c, d]}").component(0, 0).unwrap().to_string(), "{a, c}");
    assert_eq!(expression("sin([x, y])").component(0, 0).unwrap().to_string(), "sin(x)");
    assert!(matches!(expression("[x, y]").component(2, 0),
                     Err(RuntimeError::IndexOutOfBounds { index: (2, 0), .. })));

    let locus = Locus::new(expression("[t, t^2]"),
                           vec!["t".to_string()],
                           vec![Expression::real(0.0)],
                           vec![Expression::real(1.0)]).unwrap();
    assert_eq!(Expression::Locus(locus).component(1, 0).unwrap().to_string(),
               "{t^2 | 0 ≤ t ≤ 1}");
}

#[test]
fn nested_absolute_values() {
    assert_eq!(last_result("||-3||"), "3");
    assert_eq!(last_result("|2 - |5||"), "3");
    assert_eq!(last_result("|a||b|"), "|a|*|b|");
    assert_eq!(expression("|a - |b||").to_string(), "|a - (|b|)|");

    let nested = Expression::unary(Operator::Abs,
                                   Expression::unary(Operator::Abs, Expression::variable("x")));
    assert_eq!(nested.to_string(), "|(|x|)|");
    assert_eq!(expression(&nested.to_string()).to_string(), nested.to_string());
}

#[test]
fn undefined_results_and_dangling_operators() {
    assert_eq!(last_result("1/0"), "NaN");
    assert!(matches!(parse_error("x-"), ParseError::MissingOperand { .. }));
    assert!(matches!(parse_error("2 *"), ParseError::MissingOperand { .. }));
}

#[test]
fn syntax_errors() {
    assert!(matches!(parse_error("(1 = 1)"), ParseError::ComparatorInBrackets { .. }));
    assert!(matches!(parse_error("(1]"), ParseError::MismatchedBrackets { expected: ')', found: ']' }));
    assert!(matches!(parse_error("1.2.3"), ParseError::InvalidNumber { .. }));
    assert!(matches!(parse_error("*"), ParseError::UnexpectedSymbol { .. }));
    assert_failure("1 + (2 = 3)");
}

#[test]
fn display_round_trips() {
    let sources = ["a - (b - c)",
                   "(a + b)*c",
                   "-(a + b)",
                   "a^b^c",
                   "a^(b^c)",
                   "a/(b*c)",
                   "sqrt(x)",
                   "log(x)",
                   "log(2, x)",
                   "|x - 1|",
                   "f(x, y)",
                   "[a, b]",
                   "{a, b}"];

    for source in sources {
        let Statement::Expression(expression) = parse(source).unwrap() else {
            panic!("{source} did not parse to an expression");
        };
        assert_eq!(expression.to_string(), source);
        assert_eq!(parse(&expression.to_string()).unwrap(), Statement::Expression(expression));
    }
}

#[test]
fn workspace_commands() {
    let mut workspace = Workspace::standard();
    run("x = 2\nf(t) = t + x\nx = 3", &mut workspace).unwrap();

    let names = workspace.keys().collect::<Vec<_>>();
    assert_eq!(names[names.len() - 2..], ["f", "x"]);
    assert_eq!(workspace.get_args("f"), Some(&["t".to_string()][..]));

    assert!(workspace.remove("x").is_some());
    assert_eq!(last_result_in(&mut workspace, "f(1)"), "1 + x");
}

fn last_result_in(workspace: &mut Workspace, src: &str) -> String {
    run(src, workspace).unwrap()
                       .last()
                       .map(ToString::to_string)
                       .unwrap_or_default()
}
