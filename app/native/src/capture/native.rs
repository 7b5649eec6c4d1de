//! In-process capture through `xcap`.
//!
//! Needs the Screen Recording permission for the running binary. Interactive
//! targets are not supported; those go through `screencapture`.

use std::path::Path;

use image::{ImageFormat, RgbaImage};
use xcap::{Monitor, Window};

use super::backend::CaptureBackend;
use super::region::crop_image;
use super::{CaptureError, CaptureOptions, CaptureTarget};
use crate::geometry::{Point, Rect};

/// Captures with the native screen-capture API.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeCapture;

fn native_err(err: impl std::fmt::Display) -> CaptureError { CaptureError::Native(err.to_string()) }

/// Returns the main display's monitor, falling back to the first one.
fn main_monitor() -> Result<Monitor, CaptureError> {
    let monitors = Monitor::all().map_err(native_err)?;

    let primary = monitors.iter().position(|m| m.is_primary().unwrap_or(false)).unwrap_or(0);
    monitors.into_iter().nth(primary).ok_or(CaptureError::NoMonitor)
}

/// Monitor frame in global points.
fn monitor_frame(monitor: &Monitor) -> Result<Rect, CaptureError> {
    Ok(Rect::new(
        f64::from(monitor.x().map_err(native_err)?),
        f64::from(monitor.y().map_err(native_err)?),
        f64::from(monitor.width().map_err(native_err)?),
        f64::from(monitor.height().map_err(native_err)?),
    ))
}

fn capture_window(window_id: u32) -> Result<RgbaImage, CaptureError> {
    let window = Window::all()
        .map_err(native_err)?
        .into_iter()
        .find(|w| w.id().is_ok_and(|id| id == window_id))
        .ok_or_else(|| CaptureError::Native(format!("window {window_id} is no longer on screen")))?;

    window.capture_image().map_err(native_err)
}

/// Captures the monitor containing the region's origin and crops to it.
fn capture_region(region: Rect) -> Result<RgbaImage, CaptureError> {
    if !region.is_valid() {
        return Err(CaptureError::InvalidRegion(region));
    }

    let origin = Point::new(region.x, region.y);
    #[allow(clippy::cast_possible_truncation)]
    let monitor = Monitor::from_point(origin.x.floor() as i32, origin.y.floor() as i32)
        .map_err(native_err)?;

    let frame = monitor_frame(&monitor)?;
    let image = monitor.capture_image().map_err(native_err)?;

    // Pixels per point, taken from the image so it matches what was captured.
    let scale = if frame.width > 0.0 { f64::from(image.width()) / frame.width } else { 1.0 };

    let local = region.offset_by(-frame.x, -frame.y).scaled(scale);
    let pixels = local
        .to_pixel_rect(image.width(), image.height())
        .ok_or(CaptureError::InvalidRegion(region))?;

    tracing::debug!(?region, scale, ?pixels, "cropping monitor capture");
    Ok(crop_image(&image, pixels)?)
}

impl CaptureBackend for NativeCapture {
    fn capture(
        &self,
        target: &CaptureTarget,
        options: CaptureOptions,
        output: &Path,
    ) -> Result<(), CaptureError> {
        if options.play_sound {
            tracing::debug!("native capture does not play a sound");
        }

        let image = match target {
            CaptureTarget::Window(id) => capture_window(*id)?,
            CaptureTarget::Screen => main_monitor()?.capture_image().map_err(native_err)?,
            CaptureTarget::Region(rect) => capture_region(*rect)?,
            CaptureTarget::InteractiveWindow | CaptureTarget::InteractiveRegion => {
                return Err(CaptureError::Unsupported(
                    "interactive capture needs the screencapture backend",
                ));
            }
        };

        image.save_with_format(output, ImageFormat::Png).map_err(native_err)
    }

    fn name(&self) -> &'static str { "native" }
}
