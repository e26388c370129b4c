//! Simulated bomb host
//!
//! A shared-handle [`BombHost`] for the demo driver and tests: the
//! driver keeps one clone to script external solves while the module
//! owns another. Single-threaded, like everything else here.

use std::cell::RefCell;
use std::rc::Rc;

use hypercube_core::{BombHost, MODULE_NAME};

struct SimState {
    serial: String,
    solvable: Vec<String>,
    solved: Vec<String>,
    passes: usize,
    strikes: usize,
}

/// A scriptable bomb with one hypercube module and a number of plain
/// "other" modules whose solves drive the stages.
#[derive(Clone)]
pub struct SimulatedBomb(Rc<RefCell<SimState>>);

impl SimulatedBomb {
    pub fn new(serial: &str, other_modules: usize) -> Self {
        let mut solvable = vec![MODULE_NAME.to_string()];
        for i in 0..other_modules {
            solvable.push(format!("Module {}", i + 1));
        }
        Self(Rc::new(RefCell::new(SimState {
            serial: serial.to_string(),
            solvable,
            solved: Vec::new(),
            passes: 0,
            strikes: 0,
        })))
    }

    /// Mark the next unsolved "other" module as solved. Returns false
    /// once none are left.
    pub fn solve_next(&self) -> Option<String> {
        let mut state = self.0.borrow_mut();
        let next = state
            .solvable
            .iter()
            .find(|name| name.as_str() != MODULE_NAME && !state.solved.contains(*name))
            .cloned()?;
        state.solved.push(next.clone());
        Some(next)
    }

    pub fn passes(&self) -> usize {
        self.0.borrow().passes
    }

    pub fn strikes(&self) -> usize {
        self.0.borrow().strikes
    }
}

impl BombHost for SimulatedBomb {
    fn serial_number(&self) -> String {
        self.0.borrow().serial.clone()
    }

    fn solvable_modules(&self) -> Vec<String> {
        self.0.borrow().solvable.clone()
    }

    fn solved_modules(&self) -> Vec<String> {
        self.0.borrow().solved.clone()
    }

    fn ignored_modules(&self, _own_name: &str, default_ignore: &[&str]) -> Vec<String> {
        // No host-side configuration in the simulator; take the default
        default_ignore.iter().map(|s| s.to_string()).collect()
    }

    fn handle_pass(&mut self) {
        self.0.borrow_mut().passes += 1;
    }

    fn handle_strike(&mut self) {
        self.0.borrow_mut().strikes += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solve_next_exhausts() {
        let bomb = SimulatedBomb::new("AB3XY9", 2);
        assert_eq!(bomb.solve_next().as_deref(), Some("Module 1"));
        assert_eq!(bomb.solve_next().as_deref(), Some("Module 2"));
        assert_eq!(bomb.solve_next(), None);
    }

    #[test]
    fn test_own_module_is_never_auto_solved() {
        let bomb = SimulatedBomb::new("AB3XY9", 1);
        bomb.solve_next();
        assert!(!bomb.solved_modules().contains(&MODULE_NAME.to_string()));
    }

    #[test]
    fn test_pass_and_strike_counters() {
        let mut bomb = SimulatedBomb::new("AB3XY9", 0);
        bomb.handle_pass();
        bomb.handle_strike();
        bomb.handle_strike();
        assert_eq!(bomb.passes(), 1);
        assert_eq!(bomb.strikes(), 2);
    }
}
