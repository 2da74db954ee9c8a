//! Invocation of the system C toolchain on the generated translation unit.

use std::{io, path::Path, process::Command};

use log::{error, info};

use super::{Codegen, CodegenError};

/// The C compilers we try, in order of preference.
const C_COMPILERS: [&str; 2] = ["clang", "cc"];

/// The runtime sources linked into every produced binary.
const RUNTIME_SOURCE: &str = "src/runtime/runtime.c";

impl Codegen<'_> {
    /// Generate the C translation unit, write it to `c_path` and produce a
    /// binary at `binary_path`. The C file is left on disk either way, so
    /// a failing toolchain run can be inspected.
    pub fn compile_program(
        self,
        c_path: &Path,
        binary_path: &Path,
    ) -> Result<(), CodegenError> {
        let source = self.generate()?;

        std::fs::write(c_path, source).map_err(|err| CodegenError {
            message: format!("failed to write '{}': {err}", c_path.display()),
            position: None,
        })?;
        info!("Code written to '{}'", c_path.display());

        build_binary(c_path, binary_path)
    }
}

/// Compile the emitted C file and the runtime into a binary, trying
/// `clang` first and falling back to `cc`.
pub fn build_binary(c_path: &Path, binary_path: &Path) -> Result<(), CodegenError> {
    for compiler in C_COMPILERS {
        let output = match Command::new(compiler)
            .args(["-std=c11", "-Wall", "-Wextra"])
            .arg(c_path)
            .arg(RUNTIME_SOURCE)
            .arg("-o")
            .arg(binary_path)
            .output()
        {
            Ok(output) => output,
            Err(err) if err.kind() == io::ErrorKind::NotFound => continue,
            Err(err) => {
                return Err(CodegenError {
                    message: format!("failed to run {compiler}: {err}"),
                    position: None,
                })
            }
        };

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.is_empty() {
            error!("{stderr}");
        }

        if !output.status.success() {
            return Err(CodegenError {
                message: format!(
                    "{compiler} exited with status {:?}",
                    output.status.code()
                ),
                position: None,
            });
        }

        info!("Compiled '{}' with {compiler}", c_path.display());
        return Ok(());
    }

    Err(CodegenError {
        message: "no C compiler found (tried clang and cc)".to_string(),
        position: None,
    })
}
