use pretty_assertions::assert_eq;
use printscript::language::interpreter::value::Value;
use printscript::language::interpreter::{Interpreter, RuntimeError};
use printscript::language::io::{BufferPrinter, MapEnvironment, QueueReader};
use printscript::language::lexer::Lexer;
use printscript::language::parser::ParseError;
use printscript::language::parse_source;
use printscript::language::version::GrammarVersion;
use printscript::{Config, Error};
use clap::error::ErrorKind;
use clap::Parser as ClapParser;

fn run(version: GrammarVersion, source: &str) -> (Result<Option<Value>, Error>, Vec<String>) {
    let mut interpreter = Interpreter::new(version, BufferPrinter::new(), QueueReader::new(["7"]), MapEnvironment::new([("USER", "ada")]));

    let result = parse_source(source, version)
        .and_then(|nodes| interpreter.run(&nodes).map_err(Error::from));

    (result, interpreter.printer().lines().to_vec())
}

#[test]
fn hello_world() {
    let (result, printed) = run(GrammarVersion::V1_0, "println('Hello, World!');");

    assert!(result.is_ok());
    assert_eq!(printed, vec![String::from("Hello, World!")]);
}

#[test]
fn adds_declared_numbers() {
    let (_, printed) = run(GrammarVersion::V1_0, "let x : number = 42;\nlet y : number = 10;\nprintln(x + y);");
    assert_eq!(printed, vec![String::from("52")]);
}

#[test]
fn full_1_1_program() {
    let source = r#"
const user: string = readEnv("USER");
let guess: number = readInput("Pick a number: ");
let big: boolean = false;
if (big) {
    println("unreachable");
} else {
    println("Hi " + user + ", you picked " + guess);
}
guess = guess * 2;
println(guess / 4);
"#;

    let (result, printed) = run(GrammarVersion::V1_1, source);

    assert!(result.is_ok(), "{:?}", result);
    assert_eq!(printed, vec![
        String::from("Pick a number: "),
        String::from("Hi ada, you picked 7"),
        String::from("3"),
    ]);
}

#[test]
fn missing_initializer_fails_before_execution() {
    let (result, printed) = run(GrammarVersion::V1_0, "println(1);\nlet x = ;");

    assert!(matches!(result, Err(Error::Parse(ParseError::Missing { .. }))));
    assert!(printed.is_empty());
}

#[test]
fn unknown_version_is_rejected() {
    let err = Lexer::for_version("2.0").err().unwrap();

    assert!(matches!(err, Error::Version(_)));
    assert_eq!(err.report(), "Error: Unsupported version '2.0', expected one of: 1.0, 1.1");
}

#[test]
fn command_line_rejects_unknown_grammar() {
    let err = Config::try_parse_from(["printscript", "script.ps", "--grammar", "2.0"]).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ValueValidation);
    assert!(err.to_string().contains("Unsupported version '2.0', expected one of: 1.0, 1.1"));
}

#[test]
fn command_line_grammar_defaults_to_1_1() {
    let config = Config::try_parse_from(["printscript", "script.ps"]).unwrap();
    assert_eq!(config.grammar, GrammarVersion::V1_1);
    assert!(!config.verbose);

    let config = Config::try_parse_from(["printscript", "-g", "1.0", "--verbose", "script.ps"]).unwrap();
    assert_eq!(config.grammar, GrammarVersion::V1_0);
    assert!(config.verbose);
}

#[test]
fn lexer_error_report() {
    let err = parse_source("let a: number = 1;\nlet b = #;", GrammarVersion::V1_0).unwrap_err();
    assert_eq!(err.report(), "Error at line 2, column 8: Unsupported character sequence '#'");
}

#[test]
fn runtime_error_report() {
    let (result, _) = run(GrammarVersion::V1_1, "const pi: number = 3.14;\npi = 3;");
    let err = result.unwrap_err();

    assert!(matches!(err, Error::Runtime(RuntimeError::ImmutableReassignment { .. })));
    assert_eq!(err.report(), "Error at line 2, column 0: Cannot reassign constant 'pi'");
}

#[test]
fn statements_before_a_failure_keep_their_effects() {
    let (result, printed) = run(GrammarVersion::V1_0, "println(\"first\");\nprintln(1 / 0);\nprintln(\"never\");");

    assert!(matches!(result, Err(Error::Runtime(RuntimeError::DivisionByZero { .. }))));
    assert_eq!(printed, vec![String::from("first")]);
}
