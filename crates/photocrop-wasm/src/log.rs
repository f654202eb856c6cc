//! Browser console logging.
//!
//! On wasm32 messages go to `console.info/warn/error`. Native builds (unit
//! tests) print to stderr instead, since the console bindings only exist in
//! a JavaScript host.

#[cfg(target_arch = "wasm32")]
mod imp {
    use wasm_bindgen::JsValue;
    use web_sys::console;

    pub fn info(message: &str) {
        console::info_1(&JsValue::from_str(message));
    }

    pub fn warn(message: &str) {
        console::warn_1(&JsValue::from_str(message));
    }

    pub fn error(message: &str) {
        console::error_1(&JsValue::from_str(message));
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod imp {
    pub fn info(message: &str) {
        eprintln!("[info] {message}");
    }

    pub fn warn(message: &str) {
        eprintln!("[warn] {message}");
    }

    pub fn error(message: &str) {
        eprintln!("[error] {message}");
    }
}

const PREFIX: &str = "[photocrop]";

pub(crate) fn log_info(message: &str) {
    imp::info(&format!("{PREFIX} {message}"));
}

pub(crate) fn log_warn(message: &str) {
    imp::warn(&format!("{PREFIX} {message}"));
}

pub(crate) fn log_error(message: &str) {
    imp::error(&format!("{PREFIX} {message}"));
}
