//! Shutdown signal domain model.

/// A request to stop, as received by the launcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShutdownSignal {
    /// Ctrl+C / SIGINT
    Interrupt,
    /// SIGTERM, Ctrl+Break or console close
    Terminate,
}

impl ShutdownSignal {
    /// Conventional signal name, for logs.
    pub fn name(&self) -> &'static str {
        match self {
            ShutdownSignal::Interrupt => "SIGINT",
            ShutdownSignal::Terminate => "SIGTERM",
        }
    }

    /// Exit code when the launcher stops on this signal before the dev
    /// server started. Follows the `128 + signo` convention on Unix.
    pub fn exit_code(&self) -> i32 {
        if cfg!(unix) {
            match self {
                ShutdownSignal::Interrupt => 130,
                ShutdownSignal::Terminate => 143,
            }
        } else {
            1
        }
    }
}

impl std::fmt::Display for ShutdownSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_matches_child_killed_by_signal() {
        if cfg!(unix) {
            assert_eq!(ShutdownSignal::Interrupt.exit_code(), 130);
            assert_eq!(ShutdownSignal::Terminate.exit_code(), 143);
        } else {
            assert_eq!(ShutdownSignal::Interrupt.exit_code(), 1);
        }
        assert_eq!(ShutdownSignal::Terminate.to_string(), "SIGTERM");
    }
}
