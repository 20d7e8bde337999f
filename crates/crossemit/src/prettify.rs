//! External formatter passes over written files.

use std::path::Path;
use std::process::Command;

use crate::traits::{EmitError, Result};

/// Sort imports with `isort`, then reformat with `black`.
pub(crate) fn prettify_python(path: &Path) -> Result<()> {
    let path_arg = path.as_os_str();
    run_formatter("isort", &[path_arg])?;
    run_formatter(
        "black",
        &["--target-version=py37".as_ref(), "--line-length=98".as_ref(), path_arg],
    )?;
    tracing::info!(path = %path.display(), "prettified python output");
    Ok(())
}

fn run_formatter(program: &str, args: &[&std::ffi::OsStr]) -> Result<()> {
    tracing::debug!(program, "running formatter");
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|e| EmitError::Formatter {
            program: program.to_string(),
            message: e.to_string(),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        tracing::warn!(program, status = %output.status, "formatter failed");
        return Err(EmitError::Formatter {
            program: program.to_string(),
            message: format!("{}: {}", output.status, stderr.trim()),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_is_a_formatter_error() {
        let err = run_formatter("crossemit-no-such-formatter", &[]).unwrap_err();
        match err {
            EmitError::Formatter { program, .. } => {
                assert_eq!(program, "crossemit-no-such-formatter");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
