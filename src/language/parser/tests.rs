use pretty_assertions::assert_eq;
use crate::language::lexer::{Lexer, TokenKind, TokenPos};
use super::*;

fn parse(version: GrammarVersion, source: &str) -> ParseResult<Vec<Node>> {
    let tokens = Lexer::new(version).unwrap().tokenize(source).unwrap();
    Parser::new(version).parse(&tokens)
}

fn rendered(version: GrammarVersion, source: &str) -> Vec<String> {
    parse(version, source).unwrap().iter().map(|node| format!("{:?}", node)).collect()
}

mod segmentation {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn splits_on_semicolons_and_blocks() {
        assert_eq!(rendered(GrammarVersion::V1_1, "let a: number = 1; if (b) { a = 2; } println(a);"), vec![
            String::from("let a: number = 1;"),
            String::from("if (b) { a = 2; }"),
            String::from("println(a);"),
        ]);
    }

    #[test]
    fn else_stays_with_its_if() {
        let nodes = parse(GrammarVersion::V1_1, "if (flag) { println(\"yes\"); } else { println(\"no\"); }").unwrap();
        assert_eq!(nodes.len(), 1);
    }

    #[test]
    fn if_flushes_pending_tokens() {
        let err = parse(GrammarVersion::V1_1, "x = 1 if (b) { x = 2; }").unwrap_err();

        assert_eq!(err, ParseError::Unterminated { statement: String::from("x = 1"), pos: TokenPos::new(1, 0) });
        assert_eq!(err.to_string(), "Statement 'x = 1' must end with ';' or '}'");
    }

    #[test]
    fn empty_input_has_no_valid_code() {
        assert_eq!(Parser::new(GrammarVersion::V1_0).parse(&[]), Err(ParseError::NoValidCode));
        assert_eq!(parse(GrammarVersion::V1_0, "println(1)"), Err(ParseError::NoValidCode));
    }

    #[test]
    fn trailing_statement_must_be_terminated() {
        let err = parse(GrammarVersion::V1_0, "println(1);\nprintln(2)").unwrap_err();
        assert_eq!(err.get_pos(), Some(TokenPos::new(2, 0)));
    }

    #[test]
    fn unclosed_block_is_reported() {
        let err = parse(GrammarVersion::V1_1, "if (a) { println(1);").unwrap_err();
        assert_eq!(err, ParseError::UnclosedBlock { pos: TokenPos::new(1, 0) });
    }

    #[test]
    fn stray_closing_brace_is_reported() {
        let err = parse(GrammarVersion::V1_1, "println(1); }").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { ref lexeme, .. } if lexeme == "}"));
    }
}

mod factories {
    use pretty_assertions::assert_eq;
    use super::*;
    use crate::language::parser::factories::factories;

    #[test]
    fn priority_order_is_fixed() {
        let names = |version| factories(version).iter().map(|factory| factory.name).collect::<Vec<_>>();

        assert_eq!(names(GrammarVersion::V1_0), vec!["println", "declaration", "assignation", "function call"]);
        assert_eq!(names(GrammarVersion::V1_1), vec!["conditional", "println", "declaration", "assignation", "function call"]);
    }

    #[test]
    fn declaration_wins_over_assignation() {
        let nodes = parse(GrammarVersion::V1_0, "let x: number = 5;").unwrap();
        assert!(matches!(nodes[0], Node::Declaration { .. }));
    }

    #[test]
    fn declaration_without_initializer() {
        let nodes = parse(GrammarVersion::V1_0, "let name: string;").unwrap();

        assert_eq!(nodes, vec![Node::Declaration {
            keyword: String::from("let"),
            id: String::from("name"),
            declarator: String::from(":"),
            data_type: String::from("string"),
            expr: Box::new(Node::nil(TokenPos::new(1, 16))),
            position: TokenPos::new(1, 0),
        }]);
    }

    #[test]
    fn declaration_with_expression() {
        assert_eq!(rendered(GrammarVersion::V1_0, "let x : number = 5 + 3 * (2 - 1);"),
                   vec![String::from("let x: number = (5 + (3 * (2 - 1)));")]);
    }

    #[test]
    fn missing_initializer_is_rejected() {
        let err = parse(GrammarVersion::V1_0, "let x = ;").unwrap_err();
        assert!(matches!(err, ParseError::Missing { expected: "data type", .. }));

        let err = parse(GrammarVersion::V1_0, "let x: number = ;").unwrap_err();
        assert!(matches!(err, ParseError::Missing { expected: "expression after '='", .. }));
    }

    #[test]
    fn declared_type_must_match_literals() {
        for (version, source, data_type) in [
            (GrammarVersion::V1_0, "let x: number = \"five\";", "number"),
            (GrammarVersion::V1_0, "let s: string = 5;", "string"),
            (GrammarVersion::V1_1, "let n: number = true;", "number"),
            (GrammarVersion::V1_1, "let b: boolean = 1;", "boolean"),
        ] {
            let err = parse(version, source).unwrap_err();
            assert_eq!(err, ParseError::TypeInconsistency { data_type: String::from(data_type), pos: TokenPos::new(1, 7) });
        }
    }

    #[test]
    fn string_concatenation_is_a_string() {
        assert_eq!(rendered(GrammarVersion::V1_0, "let s: string = \"n = \" + 5;"),
                   vec![String::from("let s: string = (\"n = \" + 5);")]);
    }

    #[test]
    fn call_initializer_skips_type_check() {
        let nodes = parse(GrammarVersion::V1_1, "const age: number = readInput(\"Age?\");").unwrap();

        match &nodes[0] {
            Node::Declaration { keyword, expr, .. } => {
                assert_eq!(keyword, "const");
                assert!(matches!(**expr, Node::FunctionCall { ref name, .. } if name == "readInput"));
            },
            other => panic!("Expected declaration, got {:?}", other),
        }
    }

    #[test]
    fn assignation_variants() {
        assert_eq!(rendered(GrammarVersion::V1_1, "x = 3; y = x * 2; z = readEnv(\"HOME\"); w = ;"), vec![
            String::from("x = 3;"),
            String::from("y = (x * 2);"),
            String::from("z = readEnv(\"HOME\");"),
            String::from("w = Nil;"),
        ]);
    }

    #[test]
    fn println_single_token() {
        let nodes = parse(GrammarVersion::V1_0, "println('Hello, World!');").unwrap();

        assert_eq!(nodes, vec![Node::Print {
            expression: Box::new(Node::literal("Hello, World!", TokenKind::StringLiteral, TokenPos::new(1, 8))),
            position: TokenPos::new(1, 0),
        }]);
    }

    #[test]
    fn println_compound_argument() {
        assert_eq!(rendered(GrammarVersion::V1_0, "println(x + y);"), vec![String::from("println((x + y));")]);
    }

    #[test]
    fn generic_function_call() {
        assert_eq!(rendered(GrammarVersion::V1_0, "show(value);"), vec![String::from("show(value)")]);
    }

    #[test]
    fn conditional_with_else() {
        assert_eq!(rendered(GrammarVersion::V1_1, "if (flag) { println(\"yes\"); } else { println(\"no\"); }"),
                   vec![String::from("if (flag) { println(\"yes\"); } else { println(\"no\"); }")]);
    }

    #[test]
    fn conditional_without_else() {
        let nodes = parse(GrammarVersion::V1_1, "if (true) { }").unwrap();

        match &nodes[0] {
            Node::Conditional { condition, then_block, else_block, .. } => {
                assert_eq!(**condition, Node::literal("true", TokenKind::BooleanLiteral, TokenPos::new(1, 4)));
                assert_eq!(**then_block, Node::Block { statements: vec![], position: TokenPos::new(1, 10) });
                assert!(else_block.is_nil());
            },
            other => panic!("Expected conditional, got {:?}", other),
        }
    }

    #[test]
    fn nested_conditional() {
        assert_eq!(rendered(GrammarVersion::V1_1, "if (a) { if (b) { x = 1; } else { x = 2; } }"),
                   vec![String::from("if (a) { if (b) { x = 1; } else { x = 2; } }")]);
    }

    #[test]
    fn condition_must_be_a_single_token() {
        let err = parse(GrammarVersion::V1_1, "if (a > b) { x = 1; }").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { ref lexeme, .. } if lexeme == ">"));
    }

    #[test]
    fn version_1_0_has_no_conditionals() {
        let err = parse(GrammarVersion::V1_0, "if (x) { println(1); }").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { ref lexeme, .. } if lexeme == "{"));
    }

    #[test]
    fn unclaimed_statement() {
        assert_eq!(parse(GrammarVersion::V1_0, "5;"), Err(ParseError::Unhandled { pos: TokenPos::new(1, 0) }));
    }
}

mod expressions {
    use pretty_assertions::assert_eq;
    use super::*;
    use crate::language::parser::expression::parse_expression;

    fn expression(source: &str) -> ParseResult<String> {
        let tokens = Lexer::new(GrammarVersion::V1_1).unwrap().tokenize(source).unwrap();
        parse_expression(&tokens).map(|node| format!("{:?}", node))
    }

    #[test]
    fn multiplication_binds_tighter() {
        assert_eq!(expression("1 + 2 * 3").unwrap(), "(1 + (2 * 3))");
        assert_eq!(expression("1 * 2 + 3").unwrap(), "((1 * 2) + 3)");
    }

    #[test]
    fn chains_associate_left() {
        assert_eq!(expression("8 - 4 - 2").unwrap(), "((8 - 4) - 2)");
        assert_eq!(expression("8 / 4 / 2").unwrap(), "((8 / 4) / 2)");
    }

    #[test]
    fn parentheses_group() {
        assert_eq!(expression("(1 + 2) * 3").unwrap(), "((1 + 2) * 3)");
        assert_eq!(expression("((7))").unwrap(), "7");
    }

    #[test]
    fn comparison_is_loosest() {
        assert_eq!(expression("a + 1 > b * 2").unwrap(), "((a + 1) > (b * 2))");
    }

    #[test]
    fn negative_literals() {
        assert_eq!(expression("-5").unwrap(), "-5");
        assert_eq!(expression("3 - -2").unwrap(), "(3 - -2)");
    }

    #[test]
    fn malformed_expressions() {
        assert!(matches!(expression("1 +"), Err(ParseError::Missing { expected: "right operand", .. })));
        assert!(matches!(expression("(1 + 2"), Err(ParseError::Missing { expected: "')'", .. })));
        assert!(matches!(expression("1 2"), Err(ParseError::UnexpectedToken { .. })));
        assert!(matches!(expression("a == b"), Err(ParseError::UnexpectedToken { .. })));
    }
}
