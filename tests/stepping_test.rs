// Step-by-step execution must agree with batch execution

use asmtty::interpreter::constants::DEFAULT_SNAPSHOT_LIMIT;
use asmtty::interpreter::engine::{create_initial_state, interpret, UninitializedReads};
use asmtty::programs::EXAMPLE_PROGRAMS;
use asmtty::snapshot::Session;

#[test]
fn test_stepping_matches_interpret() {
    let program = ["inc a", "inc a", "dec a"];

    let mut state = create_initial_state(&program).expect("Parsing failed");
    for _ in 0..3 {
        let (next, _) = state
            .step(UninitializedReads::Zero)
            .expect("Step failed")
            .expect("Program ended early");
        state = next;
    }

    assert!(state.is_at_end());
    assert_eq!(state.registers.get("a"), Some(&1));
    assert_eq!(state.registers, interpret(&program).unwrap());
}

#[test]
fn test_stepping_past_end_is_noop() {
    let mut state = create_initial_state(&["inc a"]).unwrap();
    state.advance(UninitializedReads::Zero).unwrap();
    assert!(state.is_at_end());

    let before = state.clone();
    assert!(state.step(UninitializedReads::Zero).unwrap().is_none());
    assert!(state.advance(UninitializedReads::Zero).unwrap().is_none());
    assert_eq!(state, before);
}

#[test]
fn test_session_matches_interpret_for_examples() {
    for example in EXAMPLE_PROGRAMS {
        let state = create_initial_state(example.lines).unwrap();
        let mut session =
            Session::new(state, UninitializedReads::Zero, DEFAULT_SNAPSHOT_LIMIT).unwrap();

        while session.step_forward().expect("Step failed") {}

        assert_eq!(
            session.current().registers,
            interpret(example.lines).unwrap(),
            "Example '{}' diverged",
            example.name
        );
        assert_eq!(session.past_instructions().count(), session.history_position());
    }
}

#[test]
fn test_history_lists_executed_instructions() {
    let state = create_initial_state(&["mov a 2", "dec a", "jnz a -1"]).unwrap();
    let mut session = Session::new(state, UninitializedReads::Zero, DEFAULT_SNAPSHOT_LIMIT).unwrap();
    session.run_to_end(None).unwrap();

    let history: Vec<String> = session.past_instructions().map(|i| i.to_string()).collect();
    assert_eq!(
        history,
        vec!["mov a 2", "dec a", "jnz a -1", "dec a", "jnz a -1"]
    );

    // Stepping back hides the newest entries without forgetting them
    session.step_backward();
    session.step_backward();
    assert_eq!(session.past_instructions().count(), 3);
    assert_eq!(session.current().registers.get("a"), Some(&1));
    assert_eq!(session.total_snapshots(), 6);
}
