// steplog - app/banner.rs
//
// Fixed text printed when a run starts and ends, and the identity rows that
// follow the title.

use crate::platform::environment::RunEnvironment;
use crate::util::constants;

/// Title block written once, before the first message of a run.
pub const HEADER: &str = r"
================================================================================
                          _                _
                      ___| |_ ___ _ __    | | ___   __ _
                     / __| __/ _ \ '_ \   | |/ _ \ / _` |
                     \__ \ ||  __/ |_) |  | | (_) | (_| |
                     |___/\__\___| .__/   |_|\___/ \__, |
                                 |_|               |___/
================================================================================

                    sectioned progress log for long computations
";

/// Closing block written once by `Logger::exit`.
pub const FOOTER: &str = r"
________________________________________________________________________________
 \\            End of log. The computation has finished running.             \\
________________________________________________________________________________
";

/// Label and value for each identity row, in print order.
pub fn identity_rows(env: &RunEnvironment) -> [(&'static str, &str); 6] {
    [
        (constants::LABEL_USER, env.user.as_str()),
        (constants::LABEL_MACHINE, env.machine.as_str()),
        (constants::LABEL_TIME, env.time.as_str()),
        (constants::LABEL_RUNTIME, env.runtime.as_str()),
        (constants::LABEL_CWD, env.current_dir.as_str()),
        (constants::LABEL_COMMAND, env.command_line.as_str()),
    ]
}
