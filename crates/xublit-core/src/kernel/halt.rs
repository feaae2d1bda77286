use std::fmt;

/// Ends the host process when the shell halts.
///
/// The default, [`ProcessExit`], never returns. Closures taking the exit code
/// implement this trait too, which lets tests observe a halt without exiting.
pub trait Terminate: Send + Sync {
    fn terminate(&self, code: i32);
}

/// Terminates via [`std::process::exit`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExit;

impl Terminate for ProcessExit {
    fn terminate(&self, code: i32) {
        log::logger().flush();
        std::process::exit(code);
    }
}

impl<F> Terminate for F
where
    F: Fn(i32) + Send + Sync,
{
    fn terminate(&self, code: i32) {
        self(code)
    }
}

pub(crate) struct BoxedTerminator(pub(crate) Box<dyn Terminate>);

impl fmt::Debug for BoxedTerminator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Terminator").finish_non_exhaustive()
    }
}
