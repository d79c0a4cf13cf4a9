//! This module provides ways to tweak a [`MemoryBoard`](crate::board::MemoryBoard),
//! so that it can return errors on some tests

use crate::error::TransportError;

/// This stores some behaviour tweaks, that describe how a mocked board will behave during a given test
///
/// So that a function fails _n_ times after _m_ initial successes, set `(m, n)` for the suited parameter
#[derive(Default, Clone, Debug)]
pub struct MockBehaviour {
    /// If this is true, every action will be allowed
    pub is_suspended: bool,

    pub lists_behaviour: (u32, u32),
    pub list_tasks_behaviour: (u32, u32),
    pub create_task_behaviour: (u32, u32),
    pub delete_task_behaviour: (u32, u32),
}

impl MockBehaviour {
    pub fn new() -> Self {
        Self::default()
    }

    /// All operations will fail at once, for `n_fails` times
    pub fn fail_now(n_fails: u32) -> Self {
        Self {
            is_suspended: false,
            lists_behaviour: (0, n_fails),
            list_tasks_behaviour: (0, n_fails),
            create_task_behaviour: (0, n_fails),
            delete_task_behaviour: (0, n_fails),
        }
    }

    /// Suspend this mock behaviour until you call `resume`
    pub fn suspend(&mut self) {
        self.is_suspended = true;
    }
    /// Make this behaviour active again
    pub fn resume(&mut self) {
        self.is_suspended = false;
    }

    pub fn can_lists(&mut self) -> Result<(), TransportError> {
        if self.is_suspended {
            return Ok(());
        }
        decrement(&mut self.lists_behaviour, "lists")
    }
    pub fn can_list_tasks(&mut self) -> Result<(), TransportError> {
        if self.is_suspended {
            return Ok(());
        }
        decrement(&mut self.list_tasks_behaviour, "list_tasks")
    }
    pub fn can_create_task(&mut self) -> Result<(), TransportError> {
        if self.is_suspended {
            return Ok(());
        }
        decrement(&mut self.create_task_behaviour, "create_task")
    }
    pub fn can_delete_task(&mut self) -> Result<(), TransportError> {
        if self.is_suspended {
            return Ok(());
        }
        decrement(&mut self.delete_task_behaviour, "delete_task")
    }
}

/// Return Ok(()) in case the value is `(1+, _)` or `(_, 0)`, or return Err and decrement otherwise
fn decrement(value: &mut (u32, u32), descr: &str) -> Result<(), TransportError> {
    let remaining_successes = value.0;
    let remaining_failures = value.1;

    if remaining_successes > 0 {
        value.0 -= 1;
        log::debug!("Mock behaviour: allowing a {} ({:?})", descr, value);
        Ok(())
    } else if remaining_failures > 0 {
        value.1 -= 1;
        log::debug!("Mock behaviour: failing a {} ({:?})", descr, value);
        Err(TransportError::Other(format!(
            "Mocked behaviour requires this {} to fail this time. ({:?})",
            descr, value
        )))
    } else {
        log::debug!("Mock behaviour: allowing a {} ({:?})", descr, value);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_mock_behaviour() {
        let mut ok = MockBehaviour::new();
        assert!(ok.can_list_tasks().is_ok());
        assert!(ok.can_list_tasks().is_ok());
        assert!(ok.can_list_tasks().is_ok());

        let mut now = MockBehaviour::fail_now(2);
        assert!(now.can_list_tasks().is_err());
        assert!(now.can_create_task().is_err());
        assert!(now.can_create_task().is_err());
        assert!(now.can_list_tasks().is_err());
        assert!(now.can_list_tasks().is_ok());
        assert!(now.can_create_task().is_ok());

        let mut custom = MockBehaviour {
            list_tasks_behaviour: (0, 1),
            delete_task_behaviour: (1, 3),
            ..MockBehaviour::default()
        };
        assert!(custom.can_list_tasks().is_err());
        assert!(custom.can_list_tasks().is_ok());
        assert!(custom.can_delete_task().is_ok());
        assert!(custom.can_delete_task().is_err());
        assert!(custom.can_delete_task().is_err());
        assert!(custom.can_delete_task().is_err());
        assert!(custom.can_delete_task().is_ok());

        let mut suspended = MockBehaviour::fail_now(1);
        suspended.suspend();
        assert!(suspended.can_delete_task().is_ok());
        suspended.resume();
        assert!(suspended.can_delete_task().is_err());
    }
}
