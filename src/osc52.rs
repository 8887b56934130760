//! Copy text through the terminal emulator with OSC 52
//!
//! The sequence is `ESC ] 52 ; c ; <base64> BEL`. Whether the terminal honours
//! it can't be observed from here.
use std::io::Write;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use crate::errors::{MirrorKitError, MirrorKitErrorKind};

/// OSC 52 prefix selecting the clipboard (`c`)
const OSC52_PREFIX: &str = "\x1b]52;c;";

/// BEL terminator
const BEL: char = '\x07';

/// Encode `text` as an OSC 52 clipboard sequence
pub fn encode_osc52(text: &str) -> String {
    format!("{OSC52_PREFIX}{}{BEL}", BASE64.encode(text.as_bytes()))
}

/// Write the OSC 52 sequence for `text` to `out` and flush it
/// # Errors
/// Error if the write or the flush fails
pub fn emit_clipboard<W: Write>(out: &mut W, text: &str) -> Result<(), MirrorKitError> {
    out.write_all(encode_osc52(text).as_bytes())
        .and_then(|_| out.flush())
        .map_err(|e| {
            MirrorKitError::with_source(MirrorKitErrorKind::Io, e).with_text("OSC 52 copy failed")
        })
}
