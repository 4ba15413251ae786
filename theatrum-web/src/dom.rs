//! Thin wrappers over the browser globals the app touches.
//!
//! Everything here that reaches into `web_sys` is only meaningful inside a
//! browser. Components call these from event handlers and effects, which never
//! run during server-side rendering.
use js_sys::{Function, Promise};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Storage, Window};

/// The global `window`, if there is one.
#[must_use]
pub fn window() -> Option<Window> {
    web_sys::window()
}

#[must_use]
pub fn document() -> Option<Document> {
    window().and_then(|w| w.document())
}

/// Convert a JavaScript value into a readable string for error reporting.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Log an error message to the browser console.
pub fn console_error(message: &str) {
    web_sys::console::error_1(&JsValue::from(message));
}

/// Yield execution for the requested number of milliseconds.
///
/// # Errors
/// Returns an error if there is no window, the timer cannot be scheduled, or
/// the underlying JavaScript promise rejects.
#[allow(clippy::future_not_send)] // Wasm futures rely on `JsFuture`, which is not `Send`.
pub async fn sleep_ms(duration_ms: i32) -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("window unavailable"))?;
    let mut resolve_slot: Option<Function> = None;
    let promise = Promise::new(&mut |resolve, _reject| {
        resolve_slot = Some(resolve);
    });

    let resolve =
        resolve_slot.ok_or_else(|| JsValue::from_str("resolve function should be set"))?;
    let closure = Closure::once(move || {
        let _ = resolve.call0(&JsValue::UNDEFINED);
    });

    let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        duration_ms,
    )?;
    closure.forget();

    JsFuture::from(promise).await?;
    Ok(())
}

/// Run `task` once after `delay_ms`. Outside the browser there is no event
/// loop to defer to, so the task is dropped.
#[cfg(target_arch = "wasm32")]
pub fn run_after(delay_ms: u32, task: impl FnOnce() + 'static) {
    let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
    wasm_bindgen_futures::spawn_local(async move {
        match sleep_ms(delay).await {
            Ok(()) => task(),
            Err(err) => console_error(&format!("timer failed: {}", js_error_message(&err))),
        }
    });
}

#[cfg(not(target_arch = "wasm32"))]
pub fn run_after(delay_ms: u32, task: impl FnOnce() + 'static) {
    let _ = (delay_ms, task);
}

/// Access the browser `localStorage` handle.
///
/// # Errors
/// Returns an error if the browser window cannot be accessed or `localStorage` is unavailable.
pub fn local_storage() -> Result<Storage, JsValue> {
    window()
        .ok_or_else(|| JsValue::from_str("window unavailable"))?
        .local_storage()?
        .ok_or_else(|| JsValue::from_str("localStorage unavailable"))
}

/// Access the browser `sessionStorage` handle.
///
/// # Errors
/// Returns an error if the browser window cannot be accessed or `sessionStorage` is unavailable.
pub fn session_storage() -> Result<Storage, JsValue> {
    window()
        .ok_or_else(|| JsValue::from_str("window unavailable"))?
        .session_storage()?
        .ok_or_else(|| JsValue::from_str("sessionStorage unavailable"))
}

/// Milliseconds since the Unix epoch.
#[cfg(target_arch = "wasm32")]
#[must_use]
pub fn now_ms() -> u64 {
    u64::try_from(theatrum_core::numbers::round_f64_to_i64(js_sys::Date::now())).unwrap_or(0)
}

#[cfg(not(target_arch = "wasm32"))]
#[must_use]
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}

/// Today's date as `YYYY-MM-DD`, the value a date input expects.
#[cfg(target_arch = "wasm32")]
#[must_use]
pub fn today_iso() -> String {
    let iso: String = js_sys::Date::new_0().to_iso_string().into();
    iso.chars().take(10).collect()
}

#[cfg(not(target_arch = "wasm32"))]
#[must_use]
pub fn today_iso() -> String {
    String::new()
}

/// Whether the page was opened with `?test=1`.
#[must_use]
pub fn test_mode_enabled() -> bool {
    window()
        .and_then(|win| win.location().search().ok())
        .is_some_and(|search| search.contains("test=1"))
}
