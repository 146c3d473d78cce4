use proptest::prelude::*;
use printscript::language::ast::Node;
use printscript::language::interpreter::value::Value;
use printscript::language::interpreter::{Interpreter, RuntimeError};
use printscript::language::io::{BufferPrinter, MapEnvironment, QueueReader};
use printscript::language::lexer::{Lexer, Token, TokenKind, TokenPos};
use printscript::language::parse_source;
use printscript::language::parser::render;
use printscript::language::version::GrammarVersion;

fn interpreter(version: GrammarVersion) -> Interpreter<BufferPrinter, QueueReader, MapEnvironment> {
    Interpreter::new(version, BufferPrinter::new(), QueueReader::default(), MapEnvironment::default())
}

fn number(value: i64) -> Node {
    Node::literal(value.to_string(), TokenKind::NumberLiteral, TokenPos::begin())
}

fn statement_strategy() -> impl Strategy<Value = String> {
    let name = "[a-z][a-z0-9_]{0,6}".prop_filter("reserved word", |name| {
        !["let", "number", "string", "println"].contains(&name.as_str())
    }).boxed();
    let operand = prop_oneof![
        (0u32..1000).prop_map(|n| n.to_string()),
        name.clone(),
        "[A-Za-z ,!]{0,8}".prop_map(|text| format!("\"{}\"", text)),
    ].boxed();

    prop_oneof![
        (name.clone(), operand.clone()).prop_map(|(name, value)| format!("let {}: number = {};", name, value)),
        (operand.clone(), operand.clone()).prop_map(|(left, right)| format!("println({} + {});", left, right)),
        (name, operand).prop_map(|(name, value)| format!("{} = {};", name, value)),
    ]
}

proptest! {
    #[test]
    fn relexing_rendered_tokens_is_stable(statements in prop::collection::vec(statement_strategy(), 1..6)) {
        let lexer = Lexer::new(GrammarVersion::V1_0).unwrap();
        let source = statements.join("\n");

        let first = lexer.tokenize(&source).unwrap();
        let second = lexer.tokenize(&render(&first)).unwrap();

        let shape = |tokens: &[Token]| tokens.iter()
            .map(|token| (token.kind(), token.lexeme().to_owned()))
            .collect::<Vec<_>>();

        prop_assert_eq!(shape(&first), shape(&second));
    }

    #[test]
    fn plus_adds_integers(a in -100_000i64..100_000, b in -100_000i64..100_000) {
        let node = Node::binary(number(a), "+", number(b), TokenPos::begin());
        prop_assert_eq!(interpreter(GrammarVersion::V1_0).execute(&node), Ok(Some(Value::Int(a + b))));
    }

    #[test]
    fn plus_concatenates_with_strings(a in 0i64..100_000, text in "[a-z]{0,8}") {
        let node = Node::binary(number(a), "+", Node::literal(text.clone(), TokenKind::StringLiteral, TokenPos::begin()), TokenPos::begin());
        prop_assert_eq!(interpreter(GrammarVersion::V1_0).execute(&node), Ok(Some(Value::Str(format!("{}{}", a, text)))));
    }

    #[test]
    fn dividing_by_zero_always_fails(whole in 0u32..10_000, fraction in prop::option::of(0u32..100)) {
        let left = match fraction {
            Some(fraction) => format!("{}.{}", whole, fraction),
            None => whole.to_string(),
        };
        let source = format!("let q: number = {} / 0;", left);

        let nodes = parse_source(&source, GrammarVersion::V1_0).unwrap();
        let result = interpreter(GrammarVersion::V1_0).run(&nodes);

        prop_assert!(matches!(result, Err(RuntimeError::DivisionByZero { .. })), "{:?}", result);
    }

    #[test]
    fn const_reassignment_always_fails(value in prop_oneof![
        (0u32..100).prop_map(|n| n.to_string()),
        Just(String::from("\"text\"")),
        Just(String::from("true")),
    ]) {
        let source = format!("const c: number = 1;\nc = {};", value);

        let nodes = parse_source(&source, GrammarVersion::V1_1).unwrap();
        let result = interpreter(GrammarVersion::V1_1).run(&nodes);

        prop_assert!(matches!(result, Err(RuntimeError::ImmutableReassignment { .. })), "{:?}", result);
    }

    #[test]
    fn declaring_twice_always_fails(name in "[a-z]{1,6}") {
        prop_assume!(!["let", "number", "string", "println"].contains(&name.as_str()));
        let source = format!("let {0}: number = 1;\nlet {0}: number = 2;", name);

        let nodes = parse_source(&source, GrammarVersion::V1_0).unwrap();
        let result = interpreter(GrammarVersion::V1_0).run(&nodes);

        prop_assert!(matches!(result, Err(RuntimeError::AlreadyDeclared { .. })), "{:?}", result);
    }
}
