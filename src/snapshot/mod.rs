// Snapshot history for stepping forward and backward through a run

use crate::interpreter::engine::{InterpreterState, UninitializedReads};
use crate::interpreter::errors::RuntimeError;
use crate::parser::ast::Instruction;

/// Snapshot of execution state
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub state: InterpreterState,
    /// The instruction whose execution produced `state`; `None` for the initial snapshot
    pub executed: Option<Instruction>,
}

impl Snapshot {
    /// Estimate the memory usage of this snapshot in bytes
    pub fn estimated_size(&self) -> usize {
        // Rough estimate: map entry overhead plus the name and the value.
        // The instruction list is shared between snapshots and not counted.
        let registers_size: usize = self
            .state
            .registers
            .keys()
            .map(|name| name.as_str().len() + 32)
            .sum();

        let executed_size = self.executed.as_ref().map_or(0, |_| 48);

        std::mem::size_of::<Self>() + registers_size + executed_size
    }
}

/// Manages execution history for reverse execution
#[derive(Debug)]
pub struct SnapshotManager {
    snapshots: Vec<Snapshot>,
    max_memory: usize,
    current_memory: usize,
}

impl SnapshotManager {
    pub fn new(max_memory: usize) -> Self {
        SnapshotManager {
            snapshots: Vec::new(),
            max_memory,
            current_memory: 0,
        }
    }

    /// Add a snapshot to history
    pub fn push(&mut self, snapshot: Snapshot) -> Result<(), RuntimeError> {
        let snapshot_size = snapshot.estimated_size();

        if self.current_memory + snapshot_size > self.max_memory {
            return Err(RuntimeError::SnapshotLimitExceeded {
                current: self.current_memory,
                limit: self.max_memory,
            });
        }

        self.current_memory += snapshot_size;
        self.snapshots.push(snapshot);
        Ok(())
    }

    /// Get a snapshot by index
    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    /// Get the number of snapshots
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Get current memory usage
    pub fn memory_usage(&self) -> usize {
        self.current_memory
    }

    /// Get max memory limit
    pub fn memory_limit(&self) -> usize {
        self.max_memory
    }
}

/// A program being stepped through by hand.
///
/// Every executed step appends a [`Snapshot`]; stepping backward only moves
/// the cursor, and stepping forward again replays recorded snapshots before
/// executing anything new. Runs are deterministic, so the replayed states
/// are exactly the ones that would be recomputed.
#[derive(Debug)]
pub struct Session {
    history: SnapshotManager,
    position: usize,
    reads: UninitializedReads,
}

impl Session {
    pub fn new(
        initial: InterpreterState,
        reads: UninitializedReads,
        snapshot_limit: usize,
    ) -> Result<Self, RuntimeError> {
        let mut history = SnapshotManager::new(snapshot_limit);
        history.push(Snapshot {
            state: initial,
            executed: None,
        })?;

        Ok(Session {
            history,
            position: 0,
            reads,
        })
    }

    fn current_snapshot(&self) -> &Snapshot {
        // The initial snapshot is pushed in `new` and `position` never passes the last one
        &self.history.snapshots[self.position]
    }

    /// State at the current history position
    pub fn current(&self) -> &InterpreterState {
        &self.current_snapshot().state
    }

    /// Number of steps between the initial state and the current one
    pub fn history_position(&self) -> usize {
        self.position
    }

    pub fn total_snapshots(&self) -> usize {
        self.history.len()
    }

    pub fn history(&self) -> &SnapshotManager {
        &self.history
    }

    pub fn is_at_end(&self) -> bool {
        self.current().is_at_end()
    }

    /// Instructions executed to reach the current state, oldest first
    pub fn past_instructions(&self) -> impl Iterator<Item = &Instruction> {
        self.history.snapshots[1..=self.position]
            .iter()
            .filter_map(|snapshot| snapshot.executed.as_ref())
    }

    /// Move one step forward.
    ///
    /// Returns `Ok(false)` without changing anything when the program has
    /// already ended.
    pub fn step_forward(&mut self) -> Result<bool, RuntimeError> {
        if self.position + 1 < self.history.len() {
            self.position += 1;
            return Ok(true);
        }

        match self.current().step(self.reads)? {
            Some((state, executed)) => {
                self.history.push(Snapshot {
                    state,
                    executed: Some(executed),
                })?;
                self.position += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Move one step backward. Returns `false` at the initial state.
    pub fn step_backward(&mut self) -> bool {
        if self.position == 0 {
            return false;
        }
        self.position -= 1;
        true
    }

    /// Jump back to the initial state, keeping the recorded history
    pub fn rewind_to_start(&mut self) {
        self.position = 0;
    }

    /// Step forward until the program ends. Returns the number of steps taken.
    pub fn run_to_end(&mut self, step_limit: Option<usize>) -> Result<usize, RuntimeError> {
        let mut steps = 0;

        while !self.is_at_end() {
            if let Some(limit) = step_limit {
                if steps >= limit {
                    return Err(RuntimeError::StepLimitExceeded { limit });
                }
            }
            if !self.step_forward()? {
                break;
            }
            steps += 1;
        }

        Ok(steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::constants::DEFAULT_SNAPSHOT_LIMIT;
    use crate::interpreter::engine::create_initial_state;

    fn session(lines: &[&str]) -> Session {
        let state = create_initial_state(lines).unwrap();
        Session::new(state, UninitializedReads::Zero, DEFAULT_SNAPSHOT_LIMIT).unwrap()
    }

    #[test]
    fn test_step_forward_records_history() {
        let mut session = session(&["inc a", "inc a", "dec a"]);

        for _ in 0..3 {
            assert!(session.step_forward().unwrap());
        }
        assert!(session.is_at_end());
        assert_eq!(session.current().registers.get("a"), Some(&1));
        assert_eq!(session.total_snapshots(), 4);

        let past: Vec<String> = session.past_instructions().map(|i| i.to_string()).collect();
        assert_eq!(past, vec!["inc a", "inc a", "dec a"]);
    }

    #[test]
    fn test_step_past_end_is_noop() {
        let mut session = session(&["inc a"]);
        assert!(session.step_forward().unwrap());
        assert!(!session.step_forward().unwrap());
        assert_eq!(session.history_position(), 1);
        assert_eq!(session.total_snapshots(), 2);
    }

    #[test]
    fn test_step_backward_and_replay() {
        let mut session = session(&["mov a 5", "dec a", "jnz a -1"]);
        session.run_to_end(None).unwrap();
        let end_state = session.current().clone();
        let total = session.total_snapshots();

        assert!(session.step_backward());
        assert!(session.step_backward());
        session.rewind_to_start();
        assert_eq!(session.current().program_counter, 0);
        assert!(session.current().registers.is_empty());
        assert!(!session.step_backward());

        session.run_to_end(None).unwrap();
        assert_eq!(session.current(), &end_state);
        assert_eq!(session.total_snapshots(), total);
    }

    #[test]
    fn test_snapshot_limit() {
        let state = create_initial_state(&["jnz 1 0"]).unwrap();
        let mut session = Session::new(state, UninitializedReads::Zero, 4096).unwrap();
        let err = session.run_to_end(None).unwrap_err();
        assert!(matches!(err, RuntimeError::SnapshotLimitExceeded { .. }));
        assert!(session.history().memory_usage() <= session.history().memory_limit());
    }

    #[test]
    fn test_step_limit() {
        let mut session = session(&["jnz 1 0"]);
        assert_eq!(
            session.run_to_end(Some(10)).unwrap_err(),
            RuntimeError::StepLimitExceeded { limit: 10 }
        );
        assert_eq!(session.history_position(), 10);
    }
}
