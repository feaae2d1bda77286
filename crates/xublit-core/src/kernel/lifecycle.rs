use std::fmt;

/// Where an application shell is in its lifecycle.
///
/// `Starting` and `Stopping` are held while `start()` and `stop()` run. A
/// failure part way through leaves the shell in them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleState {
    Constructed,
    Starting,
    Bootstrapped,
    Started,
    Stopping,
    Halted,
}

impl LifecycleState {
    /// Whether `start()` may be called from this state
    pub fn can_start(self) -> bool {
        self == LifecycleState::Constructed
    }

    /// Whether `stop()` may be called from this state
    pub fn can_stop(self) -> bool {
        !matches!(self, LifecycleState::Stopping | LifecycleState::Halted)
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecycleState::Constructed => "constructed",
            LifecycleState::Starting => "starting",
            LifecycleState::Bootstrapped => "bootstrapped",
            LifecycleState::Started => "started",
            LifecycleState::Stopping => "stopping",
            LifecycleState::Halted => "halted",
        };
        f.write_str(name)
    }
}
