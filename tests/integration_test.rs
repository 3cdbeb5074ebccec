// Integration tests for the register machine interpreter

use asmtty::interpreter::engine::{
    create_initial_state, interpret, interpret_with, ExecutionConfig, Registers, UninitializedReads,
};
use asmtty::interpreter::errors::{InterpretError, RuntimeError};
use asmtty::parser::ast::RegisterName;
use asmtty::parser::parse::{parse_instruction, parse_instructions_collecting_errors, ParseMode};
use asmtty::programs::EXAMPLE_PROGRAMS;
use asmtty::simple_assembler;
use std::collections::HashMap;

fn regs(pairs: &[(&str, i64)]) -> Registers {
    pairs
        .iter()
        .map(|(name, value)| (RegisterName::new(name).unwrap(), *value))
        .collect()
}

#[test]
fn test_mirror_program() {
    let registers = interpret(&["mov a -10", "mov b a", "inc a", "dec b", "jnz a -2"])
        .expect("Execution failed");
    assert_eq!(registers, regs(&[("a", 0), ("b", -20)]));
}

#[test]
fn test_countdown_program() {
    let registers = interpret(&["mov a 5", "inc a", "dec a", "dec a", "jnz a -1", "inc a"])
        .expect("Execution failed");
    assert_eq!(registers, regs(&[("a", 1)]));
}

#[test]
fn test_forward_and_backward_jumps() {
    let registers = interpret(&[
        "mov a 5", "jnz 1 3", "jnz a -1", "jnz 1 3", "dec a", "jnz 1 -3",
    ])
    .expect("Execution failed");
    assert_eq!(registers, regs(&[("a", 0)]));
}

#[test]
fn test_empty_program() {
    let empty: [&str; 0] = [];
    let registers = interpret(&empty).expect("Execution failed");
    assert!(registers.is_empty());

    let state = create_initial_state(&empty).unwrap();
    assert!(state.is_at_end());
    assert!(state.next_instruction().is_none());
}

#[test]
fn test_interpret_is_deterministic() {
    let program = [
        "mov a 3", "mov b 4", "mov c 0", "mov d b", "inc c", "dec d", "jnz d -2", "dec a",
        "jnz a -5",
    ];
    let first = interpret(&program).unwrap();
    let second = interpret(&program).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, regs(&[("a", 0), ("b", 4), ("c", 12), ("d", 0)]));
}

#[test]
fn test_simple_assembler_compat() {
    let registers = simple_assembler(vec!["mov a -10", "mov b a", "inc a", "dec b", "jnz a -2"]);
    let expected: HashMap<String, i64> =
        [("a".to_string(), 0), ("b".to_string(), -20)].into_iter().collect();
    assert_eq!(registers, expected);
}

#[test]
#[should_panic(expected = "parse error")]
fn test_simple_assembler_panics_on_bad_program() {
    simple_assembler(vec!["mov a 1", "launch rockets"]);
}

#[test]
fn test_parse_errors_are_aggregated() {
    let program = ["mov a 1", "mov 1 a", "inc a", "zing", "jnz a b"];
    let err = interpret(&program).unwrap_err();

    match err {
        InterpretError::Parse(errors) => {
            let lines: Vec<usize> = errors.iter().map(|e| e.line_number).collect();
            assert_eq!(lines, vec![1, 3, 4]);
            assert_eq!(errors[1].raw, "zing");
        }
        other => panic!("Expected parse errors, got {:?}", other),
    }
}

#[test]
fn test_collecting_errors_keeps_good_lines_in_order() {
    let program = ["inc a", "dec 4", "mov b a", "jnz c potato", "jnz 0 1"];
    let (instructions, errors) = parse_instructions_collecting_errors(&program);

    let rendered: Vec<String> = instructions.iter().map(|i| i.to_string()).collect();
    assert_eq!(rendered, vec!["inc a", "mov b a", "jnz 0 1"]);
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].line_number, 1);
    assert_eq!(errors[1].line_number, 3);
}

#[test]
fn test_render_round_trip() {
    for line in ["dec b", "inc tattoo", "jnz c 33", "jnz 17 33", "mov a 22", "mov a b"] {
        let instruction = parse_instruction(line).expect("Parsing failed");
        assert_eq!(instruction.to_string(), line);
    }
}

#[test]
fn test_jnz_literal_tests() {
    // A zero literal never jumps, so the increment runs
    assert_eq!(interpret(&["jnz 0 2", "inc a"]).unwrap(), regs(&[("a", 1)]));
    // A nonzero literal always jumps by exactly the offset
    assert_eq!(interpret(&["jnz -4 2", "inc a", "inc b"]).unwrap(), regs(&[("b", 1)]));
}

#[test]
fn test_strict_config() {
    let config = ExecutionConfig {
        parse_mode: ParseMode::Strict,
        ..ExecutionConfig::default()
    };
    assert!(matches!(
        interpret_with(&["mov a 5x"], &config),
        Err(InterpretError::Parse(_))
    ));
    assert_eq!(interpret(&["mov a 5x"]).unwrap(), regs(&[("a", 5)]));
}

#[test]
fn test_uninitialized_reads() {
    // Missing registers read as zero by default
    assert_eq!(interpret(&["mov a b"]).unwrap(), regs(&[("a", 0)]));

    let config = ExecutionConfig {
        uninitialized: UninitializedReads::Fail,
        ..ExecutionConfig::default()
    };
    let err = interpret_with(&["mov a 1", "jnz b 2"], &config).unwrap_err();
    assert_eq!(
        err,
        InterpretError::Runtime(RuntimeError::UninitializedRegister {
            name: "b".to_string(),
            pc: 1,
        })
    );
}

#[test]
fn test_infinite_loop_hits_step_limit() {
    let config = ExecutionConfig {
        step_limit: Some(1_000),
        ..ExecutionConfig::default()
    };
    let err = interpret_with(&["inc a", "jnz 1 -1"], &config).unwrap_err();
    assert_eq!(
        err,
        InterpretError::Runtime(RuntimeError::StepLimitExceeded { limit: 1_000 })
    );
}

#[test]
fn test_jump_before_start_fails() {
    let err = interpret(&["inc a", "jnz a -5"]).unwrap_err();
    assert_eq!(
        err,
        InterpretError::Runtime(RuntimeError::JumpOutOfBounds { pc: 1, offset: -5 })
    );
}

#[test]
fn test_example_programs_run() {
    for example in EXAMPLE_PROGRAMS {
        let result = interpret(example.lines);
        assert!(result.is_ok(), "Example '{}' failed: {:?}", example.name, result);
    }
}
