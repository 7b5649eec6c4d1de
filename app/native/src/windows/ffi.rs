//! CoreGraphics and AppKit calls behind the window list and focus restore.

use std::ffi::c_void;

use core_foundation::array::{CFArray, CFArrayRef};
use core_foundation::base::{CFRelease, CFTypeRef, TCFType};
use core_foundation::dictionary::{CFDictionary, CFDictionaryRef};
use core_foundation::number::CFNumber;
use core_foundation::string::CFString;
use core_graphics::geometry::{CGPoint, CGRect, CGSize};
use objc::runtime::{BOOL, Class, Object, YES};
use objc::{msg_send, sel, sel_impl};

use super::WindowInfo;
use crate::capture::CaptureError;
use crate::geometry::{Point, Rect};

const K_CG_WINDOW_LIST_OPTION_ON_SCREEN_ONLY: u32 = 1 << 0;
const K_CG_WINDOW_LIST_EXCLUDE_DESKTOP_ELEMENTS: u32 = 1 << 4;
const K_CG_NULL_WINDOW_ID: u32 = 0;

/// `NSApplicationActivateAllWindows | NSApplicationActivateIgnoringOtherApps`
const ACTIVATE_OPTIONS: u64 = 3;

#[link(name = "CoreGraphics", kind = "framework")]
unsafe extern "C" {
    fn CGWindowListCopyWindowInfo(option: u32, relative_to_window: u32) -> CFArrayRef;
    fn CGRectMakeWithDictionaryRepresentation(dict: CFDictionaryRef, rect: *mut CGRect) -> bool;
    fn CGEventCreate(source: *const c_void) -> *const c_void;
    fn CGEventGetLocation(event: *const c_void) -> CGPoint;
}

/// Looks up `key` in a CoreFoundation dictionary. Null when absent.
unsafe fn dict_value(dict: CFDictionaryRef, key: &CFString) -> *const c_void {
    let key_ptr = key.as_concrete_TypeRef().cast::<c_void>();
    unsafe { msg_send![dict.cast::<Object>(), objectForKey: key_ptr] }
}

unsafe fn dict_number(dict: CFDictionaryRef, key: &CFString) -> Option<CFNumber> {
    let value = unsafe { dict_value(dict, key) };
    if value.is_null() {
        return None;
    }
    Some(unsafe { CFNumber::wrap_under_get_rule(value.cast()) })
}

unsafe fn dict_string(dict: CFDictionaryRef, key: &CFString) -> String {
    let value = unsafe { dict_value(dict, key) };
    if value.is_null() {
        return String::new();
    }
    unsafe { CFString::wrap_under_get_rule(value.cast()) }.to_string()
}

unsafe fn dict_bounds(dict: CFDictionaryRef, key: &CFString) -> Option<Rect> {
    let value = unsafe { dict_value(dict, key) };
    if value.is_null() {
        return None;
    }

    let mut rect = CGRect::new(&CGPoint::new(0.0, 0.0), &CGSize::new(0.0, 0.0));
    let ok = unsafe { CGRectMakeWithDictionaryRepresentation(value.cast(), &raw mut rect) };
    ok.then(|| Rect::new(rect.origin.x, rect.origin.y, rect.size.width, rect.size.height))
}

/// Keys of the window info dictionaries, created once per listing.
struct WindowKeys {
    number: CFString,
    owner_pid: CFString,
    owner_name: CFString,
    name: CFString,
    layer: CFString,
    bounds: CFString,
    alpha: CFString,
}

impl WindowKeys {
    fn new() -> Self {
        Self {
            number: CFString::from_static_string("kCGWindowNumber"),
            owner_pid: CFString::from_static_string("kCGWindowOwnerPID"),
            owner_name: CFString::from_static_string("kCGWindowOwnerName"),
            name: CFString::from_static_string("kCGWindowName"),
            layer: CFString::from_static_string("kCGWindowLayer"),
            bounds: CFString::from_static_string("kCGWindowBounds"),
            alpha: CFString::from_static_string("kCGWindowAlpha"),
        }
    }
}

unsafe fn parse_window(dict: CFDictionaryRef, keys: &WindowKeys, z_index: usize) -> Option<WindowInfo> {
    let id = unsafe { dict_number(dict, &keys.number) }?.to_i64()?;
    let pid = unsafe { dict_number(dict, &keys.owner_pid) }?.to_i32()?;
    let bounds = unsafe { dict_bounds(dict, &keys.bounds) }?;

    Some(WindowInfo {
        id: u32::try_from(id).ok()?,
        pid,
        owner_name: unsafe { dict_string(dict, &keys.owner_name) },
        title: unsafe { dict_string(dict, &keys.name) },
        bounds,
        layer: unsafe { dict_number(dict, &keys.layer) }.and_then(|n| n.to_i32()).unwrap_or(0),
        z_index,
        alpha: unsafe { dict_number(dict, &keys.alpha) }.and_then(|n| n.to_f64()).unwrap_or(1.0),
    })
}

/// Lists on-screen windows front to back, excluding desktop elements.
///
/// The position in the list becomes `z_index`. Entries missing an id, pid
/// or bounds are skipped.
///
/// # Errors
///
/// Returns [`CaptureError::WindowListUnavailable`] if CoreGraphics returns
/// null.
pub fn list_on_screen_windows() -> Result<Vec<WindowInfo>, CaptureError> {
    let options = K_CG_WINDOW_LIST_OPTION_ON_SCREEN_ONLY | K_CG_WINDOW_LIST_EXCLUDE_DESKTOP_ELEMENTS;

    unsafe {
        let window_list = CGWindowListCopyWindowInfo(options, K_CG_NULL_WINDOW_ID);
        if window_list.is_null() {
            tracing::warn!("CGWindowListCopyWindowInfo returned null");
            return Err(CaptureError::WindowListUnavailable);
        }

        let windows = CFArray::<CFDictionary>::wrap_under_create_rule(window_list);
        let keys = WindowKeys::new();

        let list: Vec<WindowInfo> = windows
            .iter()
            .enumerate()
            .filter_map(|(z_index, dict)| parse_window(dict.as_concrete_TypeRef(), &keys, z_index))
            .collect();

        tracing::trace!(count = list.len(), "listed on-screen windows");
        Ok(list)
    }
}

/// Returns the pid of the frontmost application.
#[must_use]
pub fn frontmost_app_pid() -> Option<i32> {
    unsafe {
        let workspace_class = Class::get("NSWorkspace")?;
        let workspace: *mut Object = msg_send![workspace_class, sharedWorkspace];
        if workspace.is_null() {
            return None;
        }

        let frontmost_app: *mut Object = msg_send![workspace, frontmostApplication];
        if frontmost_app.is_null() {
            return None;
        }

        let pid: i32 = msg_send![frontmost_app, processIdentifier];
        (pid > 0).then_some(pid)
    }
}

/// Activates the application with `pid`. Returns `false` if it is gone.
pub fn activate_app(pid: i32) -> bool {
    unsafe {
        let Some(app_class) = Class::get("NSRunningApplication") else {
            return false;
        };

        let app: *mut Object = msg_send![app_class, runningApplicationWithProcessIdentifier: pid];
        if app.is_null() {
            return false;
        }

        let result: BOOL = msg_send![app, activateWithOptions: ACTIVATE_OPTIONS];
        result == YES
    }
}

/// Current mouse location in global points.
#[must_use]
pub fn cursor_location() -> Option<Point> {
    unsafe {
        let event = CGEventCreate(std::ptr::null());
        if event.is_null() {
            return None;
        }

        let location = CGEventGetLocation(event);
        CFRelease(event as CFTypeRef);
        Some(Point::new(location.x, location.y))
    }
}
