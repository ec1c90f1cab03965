use std::process::ExitCode;

/// Process exit status of a resrefactor command.
///
/// - `Success` (0): something was found, extracted or created
/// - `Failure` (1): nothing matched (no literals, no occurrences, no imports,
///   a position outside any literal, or an existing config on `init`)
/// - `Error` (2): the command could not run (bad arguments, unreadable file,
///   invalid config, rejected edit)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    /// Ran to completion without a result to act on.
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
