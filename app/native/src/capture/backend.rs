//! Capture backends.
//!
//! [`ScreencaptureCli`] shells out to the macOS `screencapture` utility once
//! per capture. The native backend lives in [`super::native`].

use std::path::Path;
use std::process::Command;

use super::{CaptureError, CaptureOptions, CaptureTarget};
use crate::constants::SCREENCAPTURE_BIN;

/// Something that can write a screenshot of `target` to `output` as PNG.
pub trait CaptureBackend: Send + Sync {
    /// Captures `target` into `output`.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::Cancelled`] when the user dismissed an
    /// interactive picker, or another variant when the capture failed.
    fn capture(
        &self,
        target: &CaptureTarget,
        options: CaptureOptions,
        output: &Path,
    ) -> Result<(), CaptureError>;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}

/// Builds the argument list for `screencapture`.
///
/// Coordinates are global points, rounded to whole numbers.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn screencapture_args(
    target: &CaptureTarget,
    options: CaptureOptions,
    output: &Path,
) -> Vec<String> {
    let mut args = Vec::with_capacity(5);

    if !options.play_sound {
        args.push("-x".to_string());
    }

    match target {
        CaptureTarget::Window(id) => {
            args.push(format!("-l{id}"));
            if !options.include_shadow {
                args.push("-o".to_string());
            }
        }
        CaptureTarget::Screen => args.push("-m".to_string()),
        CaptureTarget::Region(rect) => {
            args.push(format!(
                "-R{},{},{},{}",
                rect.x.round() as i64,
                rect.y.round() as i64,
                rect.width.round() as i64,
                rect.height.round() as i64
            ));
        }
        CaptureTarget::InteractiveWindow => {
            args.push("-i".to_string());
            args.push("-W".to_string());
            if !options.include_shadow {
                args.push("-o".to_string());
            }
        }
        CaptureTarget::InteractiveRegion => {
            args.push("-i".to_string());
            args.push("-s".to_string());
        }
    }

    args.push(output.to_string_lossy().into_owned());
    args
}

/// Captures by spawning `/usr/sbin/screencapture`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScreencaptureCli;

impl CaptureBackend for ScreencaptureCli {
    fn capture(
        &self,
        target: &CaptureTarget,
        options: CaptureOptions,
        output: &Path,
    ) -> Result<(), CaptureError> {
        if let CaptureTarget::Region(rect) = target
            && !rect.is_valid()
        {
            return Err(CaptureError::InvalidRegion(*rect));
        }

        let args = screencapture_args(target, options, output);
        tracing::debug!(binary = SCREENCAPTURE_BIN, ?args, "spawning screencapture");

        let result = Command::new(SCREENCAPTURE_BIN).args(&args).output()?;

        if !result.status.success() {
            return Err(CaptureError::CommandFailed {
                status: result.status.code(),
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }

        // Exit status 0 without a file means Escape in the interactive picker.
        if !output.exists() {
            return Err(CaptureError::Cancelled);
        }

        Ok(())
    }

    fn name(&self) -> &'static str { "screencapture" }
}
