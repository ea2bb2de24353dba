//! Ghostscript discovery and invocation.
//!
//! # Responsibilities
//! - Locate a Ghostscript binary on `PATH` at startup
//! - Build the `pdfwrite` argument list for a compression run
//! - Run the binary with a timeout, killing it on expiry

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use thiserror::Error;
use tokio::io::AsyncReadExt;
use tokio::process::Command;

/// Binary names probed on `PATH`, in order.
pub const BINARY_CANDIDATES: [&str; 3] = ["gs", "gswin64c", "gswin32c"];

/// Error type for a single Ghostscript run.
#[derive(Debug, Error)]
pub enum GsError {
    #[error("failed to spawn ghostscript: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("ghostscript timed out after {0:?}")]
    Timeout(Duration),

    #[error("ghostscript exited with {status}: {stderr}")]
    Failed {
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("failed to wait for ghostscript: {0}")]
    Wait(#[source] std::io::Error),
}

/// A resolved Ghostscript binary.
#[derive(Debug, Clone)]
pub struct Ghostscript {
    path: PathBuf,
}

impl Ghostscript {
    /// Probe `PATH` for a usable binary. Absence is not fatal: the server
    /// still starts, and compression requests report the missing tool.
    pub fn discover() -> Option<Self> {
        let path_var = std::env::var_os("PATH")?;
        for candidate in BINARY_CANDIDATES {
            for dir in std::env::split_paths(&path_var) {
                let path = dir.join(candidate);
                if path.is_file() {
                    return Some(Self { path });
                }
                #[cfg(windows)]
                {
                    let exe = dir.join(format!("{candidate}.exe"));
                    if exe.is_file() {
                        return Some(Self { path: exe });
                    }
                }
            }
        }
        None
    }

    /// Use a specific binary path, bypassing discovery.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the resolved binary.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run one compression pass, producing `output` from `input` at the
    /// given image resolution and distiller profile.
    pub async fn compress(
        &self,
        input: &Path,
        output: &Path,
        dpi: u32,
        pdf_settings: &str,
        timeout: Duration,
    ) -> Result<(), GsError> {
        let args = build_args(input, output, dpi, pdf_settings);

        let mut child = Command::new(&self.path)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(GsError::Spawn)?;

        // Drain stderr concurrently so a chatty run cannot fill the pipe
        // and deadlock against `wait`.
        let stderr = child.stderr.take();
        let stderr_task = tokio::spawn(async move {
            let mut buf = String::new();
            if let Some(mut stderr) = stderr {
                let _ = stderr.read_to_string(&mut buf).await;
            }
            buf
        });

        let status = tokio::select! {
            status = child.wait() => status.map_err(GsError::Wait)?,
            _ = tokio::time::sleep(timeout) => {
                let _ = child.kill().await;
                let _ = child.wait().await;
                return Err(GsError::Timeout(timeout));
            }
        };

        if status.success() {
            Ok(())
        } else {
            let stderr = stderr_task.await.unwrap_or_default();
            Err(GsError::Failed {
                status,
                stderr: stderr.trim().to_string(),
            })
        }
    }
}

/// Argument list for a `pdfwrite` compression run.
fn build_args(input: &Path, output: &Path, dpi: u32, pdf_settings: &str) -> Vec<OsString> {
    let mut output_flag = OsString::from("-sOutputFile=");
    output_flag.push(output);

    let mut args: Vec<OsString> = vec![
        "-dNOPAUSE".into(),
        "-dBATCH".into(),
        "-dQUIET".into(),
        "-sDEVICE=pdfwrite".into(),
        "-dCompatibilityLevel=1.4".into(),
        format!("-dPDFSETTINGS={pdf_settings}").into(),
        "-dAutoRotatePages=/None".into(),
        "-dDownsampleColorImages=true".into(),
        "-dDownsampleGrayImages=true".into(),
        "-dDownsampleMonoImages=true".into(),
        "-dColorImageDownsampleType=/Bicubic".into(),
        "-dGrayImageDownsampleType=/Bicubic".into(),
        "-dMonoImageDownsampleType=/Subsample".into(),
        format!("-dColorImageResolution={dpi}").into(),
        format!("-dGrayImageResolution={dpi}").into(),
        format!("-dMonoImageResolution={dpi}").into(),
        "-dDetectDuplicateImages=true".into(),
        "-dEmbedAllFonts=true".into(),
        "-dSubsetFonts=true".into(),
        output_flag,
    ];
    args.push(input.into());
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_carry_resolution_and_profile() {
        let args = build_args(
            Path::new("/tmp/in.pdf"),
            Path::new("/tmp/out.pdf"),
            200,
            "/printer",
        );

        assert!(args.contains(&OsString::from("-dPDFSETTINGS=/printer")));
        assert!(args.contains(&OsString::from("-dColorImageResolution=200")));
        assert!(args.contains(&OsString::from("-dGrayImageResolution=200")));
        assert!(args.contains(&OsString::from("-dMonoImageResolution=200")));
        assert!(args.contains(&OsString::from("-sOutputFile=/tmp/out.pdf")));
        assert_eq!(args.last(), Some(&OsString::from("/tmp/in.pdf")));
    }

    #[test]
    fn args_keep_pdfwrite_invariants() {
        let args = build_args(Path::new("a.pdf"), Path::new("b.pdf"), 72, "/ebook");
        for flag in [
            "-dNOPAUSE",
            "-dBATCH",
            "-dQUIET",
            "-sDEVICE=pdfwrite",
            "-dCompatibilityLevel=1.4",
            "-dAutoRotatePages=/None",
            "-dDetectDuplicateImages=true",
            "-dEmbedAllFonts=true",
            "-dSubsetFonts=true",
        ] {
            assert!(args.contains(&OsString::from(flag)), "missing {flag}");
        }
    }

    #[tokio::test]
    async fn missing_binary_reports_spawn_error() {
        let gs = Ghostscript::at("/nonexistent/ghostscript-binary");
        let err = gs
            .compress(
                Path::new("/tmp/in.pdf"),
                Path::new("/tmp/out.pdf"),
                150,
                "/ebook",
                Duration::from_secs(1),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, GsError::Spawn(_)));
    }
}
