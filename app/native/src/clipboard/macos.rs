//! `NSPasteboard` writer.

use std::ffi::c_void;

use objc::rc::autoreleasepool;
use objc::runtime::{BOOL, Class, NO, Object};
use objc::{msg_send, sel, sel_impl};

use super::{ClipboardError, ClipboardPayload, Representation};
use crate::platform::nsstring;

/// Replaces the general pasteboard's contents with `payload`.
///
/// # Errors
///
/// Returns an error if the pasteboard is unavailable or refuses a
/// representation.
pub fn write(payload: &ClipboardPayload) -> Result<(), ClipboardError> {
    let representations = payload.representations();

    autoreleasepool(|| unsafe {
        let pasteboard_class = Class::get("NSPasteboard").ok_or(ClipboardError::Unavailable)?;
        let pasteboard: *mut Object = msg_send![pasteboard_class, generalPasteboard];
        if pasteboard.is_null() {
            return Err(ClipboardError::Unavailable);
        }

        let array_class = Class::get("NSMutableArray").ok_or(ClipboardError::Unavailable)?;
        let types: *mut Object = msg_send![array_class, array];
        for rep in &representations {
            let uti = match rep {
                Representation::Text { uti, .. } | Representation::Data { uti, .. } => *uti,
            };
            let _: () = msg_send![types, addObject: nsstring(uti)];
        }

        let _: isize = msg_send![pasteboard, clearContents];
        let nil: *mut Object = std::ptr::null_mut();
        let _: isize = msg_send![pasteboard, declareTypes: types owner: nil];

        for rep in &representations {
            let (uti, ok) = match rep {
                Representation::Text { uti, value } => {
                    let ok: BOOL = msg_send![pasteboard, setString: nsstring(value) forType: nsstring(uti)];
                    (*uti, ok)
                }
                Representation::Data { uti, bytes } => {
                    let data_class = Class::get("NSData").ok_or(ClipboardError::Unavailable)?;
                    let data: *mut Object = msg_send![
                        data_class,
                        dataWithBytes: bytes.as_ptr().cast::<c_void>()
                        length: bytes.len()
                    ];
                    let ok: BOOL = msg_send![pasteboard, setData: data forType: nsstring(uti)];
                    (*uti, ok)
                }
            };

            if ok == NO {
                return Err(ClipboardError::Rejected(uti));
            }
        }

        tracing::debug!(types = representations.len(), "pasteboard updated");
        Ok(())
    })
}
