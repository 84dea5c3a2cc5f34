use std::path::{Path, PathBuf};
use std::process::Command;

use pic_core::{ErrorInfo, PathStyle, PicError};
use tracing::debug;

/// Maps a local absolute path to the form the viewer host can open.
pub trait PathTranslator {
    /// Translates `path`, which is already canonical.
    fn translate(&self, path: &Path) -> Result<String, PicError>;
}

/// Viewer runs on the same host; paths are sent unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl PathTranslator for Identity {
    fn translate(&self, path: &Path) -> Result<String, PicError> {
        path.to_str().map(str::to_string).ok_or_else(|| {
            PicError::Transport(
                ErrorInfo::new("path-encoding", "layout path is not valid UTF-8")
                    .with_context("path", path.display()),
            )
        })
    }
}

/// Viewer runs on the Windows side of WSL; paths go through `wslpath -w`.
#[derive(Debug, Clone)]
pub struct WslPath {
    program: PathBuf,
}

impl Default for WslPath {
    fn default() -> Self {
        Self {
            program: PathBuf::from("wslpath"),
        }
    }
}

impl WslPath {
    /// Uses a different conversion executable, called as `<program> -w <path>`.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl PathTranslator for WslPath {
    fn translate(&self, path: &Path) -> Result<String, PicError> {
        let failure = |message: String| {
            PicError::Transport(
                ErrorInfo::new("path-translation", message)
                    .with_context("program", self.program.display())
                    .with_context("path", path.display()),
            )
        };
        let output = Command::new(&self.program)
            .arg("-w")
            .arg(path)
            .output()
            .map_err(|err| failure(format!("failed to run path converter: {err}")))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(failure(format!(
                "path converter exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }
        let translated = String::from_utf8(output.stdout)
            .map_err(|_| failure("path converter printed invalid UTF-8".to_string()))?;
        let translated = translated.trim();
        if translated.is_empty() {
            return Err(failure("path converter printed nothing".to_string()));
        }
        debug!(from = %path.display(), to = translated, "translated layout path");
        Ok(translated.to_string())
    }
}

/// Translator matching a configured path style.
pub fn translator_for(style: PathStyle) -> Box<dyn PathTranslator> {
    match style {
        PathStyle::Native => Box::new(Identity),
        PathStyle::Wsl => Box::new(WslPath::default()),
    }
}
