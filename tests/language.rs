use std::{cell::RefCell, fs, rc::Rc};

use foolang::{
    error::{Error, ErrorKind, ParseError, RuntimeError},
    evaluate,
    interpreter::{
        evaluator::core::{Context, DEFAULT_MAX_DEPTH},
        parser::utils::MAX_NESTING,
        value::core::Value,
    },
};

fn assert_success(src: &str) {
    if let Err(e) = evaluate(src) {
        panic!("Script failed: {e}\n{}", e.render(src));
    }
}

fn assert_failure(src: &str) {
    if evaluate(src).is_ok() {
        panic!("Script succeeded but was expected to fail:\n{src}")
    }
}

fn error_kind(src: &str) -> ErrorKind {
    match evaluate(src) {
        Ok(results) => panic!("Script succeeded with {results:?} but was expected to fail:\n{src}"),
        Err(e) => e.kind(),
    }
}

/// Value of the last top-level statement.
fn last_value(src: &str) -> Value {
    let results = evaluate(src).unwrap_or_else(|e| panic!("Script failed: {e}\n{}", e.render(src)));
    match results.last() {
        Some(Some(value)) => value.clone(),
        other => panic!("Last statement of {src:?} produced {other:?}"),
    }
}

/// Runs `src` with a capturing sink and returns the printed lines.
fn printed(src: &str) -> Vec<String> {
    let output = Rc::new(RefCell::new(Vec::<String>::new()));
    let mut context = Context::with_output(Rc::clone(&output));

    if let Err(e) = context.run(src) {
        panic!("Script failed: {e}\n{}", e.render(src));
    }

    output.borrow().clone()
}

fn ints(values: &[i64]) -> Value {
    Value::List(values.iter().copied().map(Value::Integer).collect())
}

#[test]
fn single_literals_evaluate_to_themselves() {
    assert_eq!(evaluate("10;").unwrap(), vec![Some(Value::Integer(10))]);
    assert_eq!(evaluate("2.1;").unwrap(), vec![Some(Value::Float(2.1))]);
    assert_eq!(evaluate("\"abc\";").unwrap(), vec![Some(Value::from("abc"))]);
    assert_eq!(evaluate("[1, 2, 3];").unwrap(), vec![Some(ints(&[1, 2, 3]))]);
    assert_eq!(evaluate("[10.1, 20.2, 30.3];").unwrap(),
               vec![Some(Value::List(vec![Value::Float(10.1),
                                          Value::Float(20.2),
                                          Value::Float(30.3)]))]);
    assert_eq!(evaluate("[];").unwrap(), vec![Some(Value::List(vec![]))]);
}

#[test]
fn statements_without_values_produce_none() {
    let results = evaluate("a = 1; if (a) { b = 2; }; while (False) { c = 3; }; a;").unwrap();

    assert_eq!(results, vec![None, None, None, Some(Value::Integer(1))]);
}

#[test]
fn assignment_and_lookup() {
    assert_eq!(last_value("a = 1; a;"), Value::Integer(1));
    assert_eq!(last_value("a = 1.5; a;"), Value::Float(1.5));
    assert_eq!(last_value("a = \"abc\"; a;"), Value::from("abc"));
    assert_eq!(last_value("a = [1, 2, 3]; a;"), ints(&[1, 2, 3]));
    assert_eq!(last_value("a = 1; a = a + 1; a;"), Value::Integer(2));
}

#[test]
fn indexing() {
    assert_eq!(last_value("[1, 2, 3][0];"), Value::Integer(1));
    assert_eq!(last_value("[1, 2, 3][10 - 9];"), Value::Integer(2));
    assert_eq!(last_value("a = 2; [1, 2, 3][a];"), Value::Integer(3));
    assert_eq!(last_value("[\"abc\", \"def\"][1];"), Value::from("def"));
    assert_eq!(last_value("\"abc\"[1];"), Value::from("b"));
    assert_eq!(last_value("[[1, 2], [3, 4]][1][0];"), Value::Integer(3));

    assert_eq!(error_kind("[1, 2, 3][3];"), ErrorKind::Runtime);
    assert_eq!(error_kind("[1, 2, 3][-1];"), ErrorKind::Runtime);
    assert_eq!(error_kind("[1, 2, 3][1.0];"), ErrorKind::Runtime);
    assert_eq!(error_kind("5[0];"), ErrorKind::Runtime);
}

#[test]
fn index_assignment() {
    assert_eq!(last_value("a = [1, 2, 3]; a[1] = 5; a;"), ints(&[1, 5, 3]));
    assert_eq!(last_value("g = [[1, 2], [3, 4]]; g[1][0] = 9; g;"),
               Value::List(vec![ints(&[1, 2]), ints(&[9, 4])]));
    assert_eq!(last_value("s = \"cat\"; s[0] = \"b\"; s;"), Value::from("bat"));

    assert_eq!(error_kind("s = \"cat\"; s[0] = \"ab\";"), ErrorKind::Runtime);
    assert_eq!(error_kind("a = [1]; a[1] = 2;"), ErrorKind::Runtime);
    assert_eq!(error_kind("a = 1; a[0] = 2;"), ErrorKind::Runtime);
    assert_eq!(error_kind("missing[0] = 2;"), ErrorKind::Lookup);
}

#[test]
fn lists_are_copied_on_assignment() {
    assert_eq!(last_value("a = [1, 2]; b = a; b[0] = 9; a;"), ints(&[1, 2]));
    assert_eq!(last_value("a = [1]; function f(x) { x[0] = 2; return x; }; f(a); a;"),
               ints(&[1]));
}

#[test]
fn addition_is_polymorphic() {
    assert_eq!(last_value("1 + 2;"), Value::Integer(3));
    assert_eq!(last_value("a = 2; a + 3;"), Value::Integer(5));
    assert_eq!(last_value("a = 2; 3 + a;"), Value::Integer(5));
    assert_eq!(last_value("1.1 + 2;"), Value::Float(3.1));
    assert_eq!(last_value("a = 2; 3.1 + a;"), Value::Float(5.1));
    assert_eq!(last_value("\"a\" + \"b\";"), Value::from("ab"));
    assert_eq!(last_value("a = \"b\"; \"a\" + a;"), Value::from("ab"));
    assert_eq!(last_value("[1, 2] + [3];"), ints(&[1, 2, 3]));
    assert_eq!(last_value("a = [3]; [1, 2] + a;"), ints(&[1, 2, 3]));

    assert_eq!(error_kind("\"a\" + 1;"), ErrorKind::Runtime);
    assert_eq!(error_kind("[1] + 1;"), ErrorKind::Runtime);
    assert_eq!(error_kind("True + 1;"), ErrorKind::Runtime);
}

#[test]
fn numeric_operators() {
    assert_eq!(last_value("2 - 1;"), Value::Integer(1));
    assert_eq!(last_value("1.5 - 1;"), Value::Float(0.5));
    assert_eq!(last_value("6 * 7;"), Value::Integer(42));
    assert_eq!(last_value("7 / 2;"), Value::Float(3.5));
    assert_eq!(last_value("6 / 3;"), Value::Float(2.0));
    assert_eq!(last_value("7 // 2;"), Value::Integer(3));
    assert_eq!(last_value("7 % 3;"), Value::Integer(1));
    assert_eq!(last_value("2 ^ 10;"), Value::Integer(1024));
    assert_eq!(last_value("2 ^ 3 ^ 2;"), Value::Integer(512));
    assert_eq!(last_value("2 ^ -1;"), Value::Float(0.5));
    assert_eq!(last_value("1 + 2 * 3;"), Value::Integer(7));
    assert_eq!(last_value("(1 + 2) * 3;"), Value::Integer(9));
    assert_eq!(last_value("10 - 4 - 3;"), Value::Integer(3));

    assert_eq!(error_kind("\"a\" * 2;"), ErrorKind::Runtime);
}

#[test]
fn integer_powers_of_large_bases_stay_integers() {
    assert_eq!(last_value("10000000000000000 ^ 1;"), Value::Integer(10_000_000_000_000_000));
    assert_eq!(last_value("9007199254740993 ^ 0;"), Value::Integer(1));
    assert_eq!(error_kind("10000000000000000 ^ 2;"), ErrorKind::Runtime);
    assert_eq!(error_kind("0 ^ -1;"), ErrorKind::Runtime);
}

#[test]
fn float_floor_division_matches_modulo() {
    assert_eq!(last_value("7.0 // 0.1;"), Value::Float(69.0));
    assert_eq!(last_value("-7.5 // 2.0;"), Value::Float(-4.0));
    assert_eq!(last_value("-7.5 % 2.0;"), Value::Float(0.5));
}

#[test]
fn unary_minus_binds_looser_than_exponent() {
    assert_eq!(last_value("-2 ^ 2;"), Value::Integer(-4));
    assert_eq!(last_value("(-2) ^ 2;"), Value::Integer(4));
    assert_eq!(last_value("-3 + 5;"), Value::Integer(2));
    assert_eq!(last_value("a = 4; -a;"), Value::Integer(-4));
    assert_eq!(last_value("- 1.5;"), Value::Float(-1.5));
    assert_eq!(error_kind("-\"a\";"), ErrorKind::Runtime);
}

#[test]
fn division_by_zero_always_fails() {
    for src in ["1 / 0;", "1 // 0;", "1 % 0;", "1.5 / 0;", "1 / 0.0;", "1.5 // 0.0;", "2 % 0.0;"] {
        let error = evaluate(src).unwrap_err();
        assert!(matches!(error, Error::Runtime(RuntimeError::DivisionByZero { .. })),
                "{src}: {error}");
    }
}

#[test]
fn integer_overflow_is_reported() {
    assert_eq!(error_kind("9223372036854775807 + 1;"), ErrorKind::Runtime);
    assert_eq!(error_kind("2 ^ 64;"), ErrorKind::Runtime);
    assert_eq!(error_kind("99999999999999999999;"), ErrorKind::Parse);
}

#[test]
fn comparisons() {
    assert_eq!(last_value("1 < 2;"), Value::Boolean(true));
    assert_eq!(last_value("2 <= 2;"), Value::Boolean(true));
    assert_eq!(last_value("3 > 4;"), Value::Boolean(false));
    assert_eq!(last_value("1.5 >= 1.5;"), Value::Boolean(true));
    assert_eq!(last_value("\"abc\" < \"abd\";"), Value::Boolean(true));
    assert_eq!(last_value("False < True;"), Value::Boolean(true));
    assert_eq!(last_value("[1, [2]] == [1, [2]];"), Value::Boolean(true));
    assert_eq!(last_value("[1] != [2];"), Value::Boolean(true));
    assert_eq!(last_value("1 + 1 == 2;"), Value::Boolean(true));
    assert_eq!(last_value("1 < 2 == 2 < 3;"), Value::Boolean(true));

    assert_eq!(error_kind("1 == 1.0;"), ErrorKind::Runtime);
    assert_eq!(error_kind("\"1\" == 1;"), ErrorKind::Runtime);
    assert_eq!(error_kind("[1] < [2];"), ErrorKind::Runtime);
}

#[test]
fn logical_operators_short_circuit() {
    assert_eq!(last_value("False and (1 / 0);"), Value::Boolean(false));
    assert_eq!(last_value("True or (1 / 0);"), Value::Boolean(true));
    assert_eq!(last_value("True and 0;"), Value::Boolean(false));
    assert_eq!(last_value("0 or \"x\";"), Value::Boolean(true));
    assert_eq!(last_value("[] or [];"), Value::Boolean(false));

    assert_eq!(error_kind("True and (1 / 0);"), ErrorKind::Runtime);
    assert_eq!(error_kind("False or (1 / 0);"), ErrorKind::Runtime);
}

#[test]
fn not_negates_the_whole_expression() {
    assert_eq!(last_value("not True;"), Value::Boolean(false));
    assert_eq!(last_value("not 0;"), Value::Boolean(true));
    assert_eq!(last_value("not 1 == 2;"), Value::Boolean(true));
    assert_eq!(last_value("True and not False or False;"), Value::Boolean(true));
    assert_eq!(last_value("not [];"), Value::Boolean(true));
}

#[test]
fn length() {
    assert_eq!(last_value("len([1, 2, 3]);"), Value::Integer(3));
    assert_eq!(last_value("len(\"héllo\");"), Value::Integer(5));
    assert_eq!(last_value("len([]);"), Value::Integer(0));
    assert_eq!(last_value("a = [1]; len(a + a);"), Value::Integer(2));

    assert_eq!(error_kind("len(1);"), ErrorKind::Runtime);
    assert_eq!(error_kind("len = 1;"), ErrorKind::Lexical);
    assert_eq!(error_kind("x = len;"), ErrorKind::Lexical);
}

#[test]
fn conditional_scenarios() {
    assert_eq!(last_value("a = 2; if (False) { a = 0; }; a;"), Value::Integer(2));
    assert_eq!(last_value("a = 0; if (True) { a = 1; }; a;"), Value::Integer(1));
    assert_eq!(last_value("a = 0; if (False) { a = 1; } else { a = 2; }; a;"), Value::Integer(2));
    assert_eq!(last_value("a = 0; if (False) { a = 1; } else if (True) { a = 2; }; a;"),
               Value::Integer(2));
    assert_eq!(last_value("a = 0; if (False) { a = 1; } else if (False) { a = 2; }; a;"),
               Value::Integer(0));
    assert_eq!(last_value("a = 0; if (False) { a = 1; } else if (False) { a = 2; } else { a = 3; }; a;"),
               Value::Integer(3));
    assert_eq!(last_value("a = 0; if (False) { a=1; } else if (True) { a=2; } else { a=3; }; a;"),
               Value::Integer(2));
}

#[test]
fn only_the_first_true_branch_runs() {
    assert_eq!(printed("if (True) { print 1; } else if (True) { print 2; } else { print 3; };"),
               vec!["1"]);
}

#[test]
fn nested_conditionals() {
    assert_eq!(last_value("a = 0; if (True) { if (True) { a = 1; }; }; a;"), Value::Integer(1));
    assert_eq!(last_value("a = 0; if (True) { a = 1; if (False) { a = 2; }; }; a;"),
               Value::Integer(1));
}

#[test]
fn truthiness_drives_conditions() {
    assert_eq!(last_value("a = 0; if (\"\") { a = 1; }; a;"), Value::Integer(0));
    assert_eq!(last_value("a = 0; if ([0]) { a = 1; }; a;"), Value::Integer(1));
    assert_eq!(last_value("a = 0; if (0.0) { a = 1; } else { a = 2; }; a;"), Value::Integer(2));
}

#[test]
fn while_loops() {
    assert_eq!(last_value("i = 0; while (i < 10) { i = i + 1; }; i;"), Value::Integer(10));
    assert_eq!(last_value("i = 5; while (False) { i = 0; }; i;"), Value::Integer(5));
    assert_eq!(printed("i = 3; while (i) { print i; i = i - 1; };"), vec!["3", "2", "1"]);
}

#[test]
fn functions_and_recursion() {
    assert_eq!(last_value("function add(a, b) { return a + b; }; add(2, 5);"), Value::Integer(7));
    assert_eq!(last_value("function answer() { return 42; }; answer();"), Value::Integer(42));
    assert_eq!(last_value("function fact(n) { if (n < 2) { return 1; }; return n * fact(n - 1); }; fact(10);"),
               Value::Integer(3_628_800));
    assert_eq!(last_value("function fib(n) { if (n < 2) { return n; }; return fib(n - 1) + fib(n - 2); }; fib(15);"),
               Value::Integer(610));
}

#[test]
fn return_halts_the_whole_body() {
    let src = "function find(xs, x) {\n\
                   i = 0;\n\
                   while (i < len(xs)) {\n\
                       if (xs[i] == x) { return i; };\n\
                       i = i + 1;\n\
                   };\n\
                   return -1;\n\
               };\n\
               find([5, 6, 7], 6);";
    assert_eq!(last_value(src), Value::Integer(1));

    assert_eq!(printed("function f() { print 1; if (True) { return 2; }; print 3; }; print f();"),
               vec!["1", "2"]);
}

#[test]
fn functions_without_return_have_no_value() {
    let results = evaluate("function noop() { a = 1; }; noop();").unwrap();
    assert_eq!(results, vec![None, None]);

    assert_eq!(error_kind("function noop() { a = 1; }; x = noop();"), ErrorKind::Runtime);
    assert_eq!(error_kind("function noop() { a = 1; }; noop() + 1;"), ErrorKind::Runtime);
}

#[test]
fn function_errors() {
    assert_eq!(error_kind("function f(x) { return x; }; function f(y) { return y; };"),
               ErrorKind::Runtime);
    assert_eq!(error_kind("function f(x) { return x; }; f(1, 2);"), ErrorKind::Runtime);
    assert_eq!(error_kind("function f(x) { return x; }; f();"), ErrorKind::Runtime);
    assert_eq!(error_kind("function f(x) { return x; }; y = f;"), ErrorKind::Runtime);
    assert_eq!(error_kind("a = 1; a(2);"), ErrorKind::Runtime);
    assert_eq!(error_kind("undefined(1);"), ErrorKind::Lookup);
    assert_eq!(error_kind("return 1;"), ErrorKind::Runtime);
    assert_eq!(error_kind("function f(a, a) { return a; };"), ErrorKind::Lexical);
}

#[test]
fn recursion_up_to_the_default_limit_completes() {
    let below = DEFAULT_MAX_DEPTH - 1;
    let src = format!("function down(n) {{ if (n == 0) {{ return 0; }}; return 1 + down(n - 1); }}; down({below});");
    let below_limit = i64::try_from(below).unwrap();

    assert_eq!(last_value(&src), Value::Integer(below_limit));
}

#[test]
fn recursion_past_the_default_limit_is_an_error() {
    let src = format!("function down(n) {{ if (n == 0) {{ return 0; }}; return 1 + down(n - 1); }}; down({DEFAULT_MAX_DEPTH});");

    let error = evaluate(&src).unwrap_err();

    assert!(matches!(error,
                     Error::Runtime(RuntimeError::RecursionLimit { limit, .. }) if limit == DEFAULT_MAX_DEPTH));
}

#[test]
fn deeply_nested_expressions_are_rejected() {
    let deep = format!("x = {}1{};", "(".repeat(100_000), ")".repeat(100_000));
    let error = evaluate(&deep).unwrap_err();
    assert!(matches!(error, Error::Parse(ParseError::NestingTooDeep { limit: MAX_NESTING, .. })));
    assert_eq!(error.kind(), ErrorKind::Syntax);

    let chain = format!("x = 1{};", " + 1".repeat(10_000));
    assert!(matches!(evaluate(&chain),
                     Err(Error::Parse(ParseError::NestingTooDeep { .. }))));

    let negations = format!("x = {}1;", "- ".repeat(10_000));
    assert!(matches!(evaluate(&negations),
                     Err(Error::Parse(ParseError::NestingTooDeep { .. }))));

    let blocks = format!("{}x = 1;{}", "if (True) { ".repeat(5_000), " };".repeat(5_000));
    assert!(matches!(evaluate(&blocks),
                     Err(Error::Parse(ParseError::NestingTooDeep { .. }))));

    let after = format!("{}1{};", "(".repeat(MAX_NESTING / 2), ")".repeat(MAX_NESTING / 2));
    assert_eq!(last_value(&after), Value::Integer(1));
}

#[test]
fn nesting_below_the_limit_evaluates() {
    let parens = format!("{}1{};", "(".repeat(500), ")".repeat(500));
    assert_eq!(last_value(&parens), Value::Integer(1));

    let chain = format!("1{};", " + 1".repeat(500));
    assert_eq!(last_value(&chain), Value::Integer(501));

    let blocks = format!("x = 0; {}x = 1;{} x;", "if (True) { ".repeat(200), " };".repeat(200));
    assert_eq!(last_value(&blocks), Value::Integer(1));
}

#[test]
fn functions_scope_lexically() {
    assert_eq!(last_value("g = 10; function f(x) { return x + g; }; f(1);"), Value::Integer(11));
    assert_eq!(last_value("x = 1; function f(x) { x = x + 100; return x; }; f(5); x;"),
               Value::Integer(1));
    assert_eq!(last_value("function f() { local = 1; return local; }; f();"), Value::Integer(1));
    assert_eq!(error_kind("function f() { local = 1; return local; }; f(); local;"),
               ErrorKind::Lookup);

    let src = "function outer() { secret = 7; return inner(); };\n\
               function inner() { return secret; };\n\
               outer();";
    assert_eq!(error_kind(src), ErrorKind::Lookup);
}

#[test]
fn print_writes_to_the_sink() {
    assert_eq!(printed("print 1; print 2.0; print \"hi\"; print True; print [1, \"a\", [False]];"),
               vec!["1", "2.0", "hi", "True", "[1, \"a\", [False]]"]);

    let results = evaluate_quietly("print 3;");
    assert_eq!(results, vec![Some(Value::Integer(3))]);
}

fn evaluate_quietly(src: &str) -> Vec<Option<Value>> {
    let output = Rc::new(RefCell::new(Vec::<String>::new()));
    Context::with_output(output).run(src).unwrap()
}

#[test]
fn context_keeps_state_between_runs() {
    let mut context = Context::with_output(Rc::new(RefCell::new(Vec::<String>::new())));

    context.run("a = 2;").unwrap();
    context.run("function inc(x) { return x + 1; };").unwrap();

    assert_eq!(context.run("inc(a);").unwrap(), vec![Some(Value::Integer(3))]);
    assert!(context.run("b = 1 / 0;").is_err());
    assert_eq!(context.global("a"), Some(&Value::Integer(2)));
    assert_eq!(context.global("b"), None);
}

#[test]
fn effects_before_an_error_are_kept() {
    let mut context = Context::with_output(Rc::new(RefCell::new(Vec::<String>::new())));

    assert!(context.run("a = 1; b = a / 0; c = 3;").is_err());
    assert_eq!(context.global("a"), Some(&Value::Integer(1)));
    assert_eq!(context.global("c"), None);
}

#[test]
fn error_kinds() {
    assert_eq!(error_kind("a = $;"), ErrorKind::Parse);
    assert_eq!(error_kind("a = ;"), ErrorKind::Syntax);
    assert_eq!(error_kind("a = 1"), ErrorKind::Syntax);
    assert_eq!(error_kind("if (True) { a = 1; }"), ErrorKind::Syntax);
    assert_eq!(error_kind("if True { a = 1; };"), ErrorKind::Syntax);
    assert_eq!(error_kind("1 = 2;"), ErrorKind::Lexical);
    assert_eq!(error_kind("f(x) = 1;"), ErrorKind::Lexical);
    assert_eq!(error_kind("[1][0] = 2;"), ErrorKind::Lexical);
    assert_eq!(error_kind("missing;"), ErrorKind::Lookup);
}

#[test]
fn parse_errors_prevent_execution() {
    let output = Rc::new(RefCell::new(Vec::<String>::new()));
    let mut context = Context::with_output(Rc::clone(&output));

    assert!(context.run("print 1; print 2 +;").is_err());
    assert!(output.borrow().is_empty());
}

#[test]
fn errors_render_with_a_caret() {
    let src = "a = 1;\nb = a + c;";
    let error = evaluate(src).unwrap_err();

    assert_eq!(error.render(src),
               "Lookup error at line 2: Undefined name: c\nb = a + c;\n        ^");

    let src = "x = 1;\ny = x # 2;";
    let error = evaluate(src).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Parse);
    assert_eq!(error.position().line, 2);
    assert_eq!(error.position().column, 7);
    assert!(error.render(src).ends_with("y = x # 2;\n      ^"));
}

#[test]
fn assorted_programs() {
    assert_success("a = [1, 2, 3]; i = 0; total = 0; while (i < len(a)) { total = total + a[i]; i = i + 1; };");
    assert_success("function id(x) { return x; }; id(id(id(1)));");
    assert_success("s = \"\"; i = 0; while (i < 3) { s = s + \"ab\"; i = i + 1; }; s[5];");
    assert_success("");

    assert_failure("a = [1, 2, 3]; a[3];");
    assert_failure("while (True) { return 1; };");
    assert_failure("function f() { return g(); }; f();");
    assert_failure("if (True) { a = 1; } else if { a = 2; };");
    assert_failure("function () { return 1; };");
}

#[test]
fn long_example_script_runs() {
    let src = fs::read_to_string("tests/example.foo").unwrap();

    let lines = printed(&src);

    assert_eq!(lines.last().map(String::as_str), Some("done"));
}
