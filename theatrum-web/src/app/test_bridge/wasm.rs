use super::shared::{booking_snapshot, route_for_path};
use crate::dom;
use crate::router::Route;
use crate::storage::Stores;
use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use yew::prelude::*;

const BRIDGE_KEY: &str = "__theatrumTest";

struct BridgeBindings {
    _state: Closure<dyn FnMut() -> JsValue>,
    _reset: Closure<dyn FnMut()>,
    _goto: Closure<dyn FnMut(JsValue)>,
}

impl BridgeBindings {
    fn keep(&self) {
        let _ = (&self._state, &self._reset, &self._goto);
    }
}

fn install(stores: &Stores, on_navigate: &Callback<Route>) -> Result<BridgeBindings, JsValue> {
    let win = dom::window().ok_or_else(|| JsValue::from_str("window unavailable"))?;
    let bridge = js_sys::Object::new();

    let state = {
        let local = stores.local.clone();
        Closure::<dyn FnMut() -> JsValue>::new(move || {
            // Plain objects rather than JS `Map`s so WebDriver sees JSON.
            let serializer = serde_wasm_bindgen::Serializer::json_compatible();
            booking_snapshot(local.booking())
                .serialize(&serializer)
                .unwrap_or_else(|err| JsValue::from_str(&err.to_string()))
        })
    };
    let reset = {
        let local = stores.local.clone();
        let navigate = on_navigate.clone();
        Closure::<dyn FnMut()>::new(move || {
            local.booking().clear_booking();
            navigate.emit(Route::Home);
        })
    };
    let goto = {
        let navigate = on_navigate.clone();
        Closure::<dyn FnMut(JsValue)>::new(move |path: JsValue| {
            let path = path.as_string().unwrap_or_default();
            navigate.emit(route_for_path(&path));
        })
    };

    js_sys::Reflect::set(&bridge, &"state".into(), state.as_ref().unchecked_ref())?;
    js_sys::Reflect::set(&bridge, &"reset".into(), reset.as_ref().unchecked_ref())?;
    js_sys::Reflect::set(&bridge, &"goto".into(), goto.as_ref().unchecked_ref())?;
    js_sys::Reflect::set(&win, &BRIDGE_KEY.into(), &bridge)?;

    Ok(BridgeBindings {
        _state: state,
        _reset: reset,
        _goto: goto,
    })
}

fn uninstall() {
    if let Some(win) = dom::window() {
        let _ = js_sys::Reflect::delete_property(&win, &BRIDGE_KEY.into());
    }
}

#[hook]
pub fn use_test_bridge(stores: &Stores, on_navigate: &Callback<Route>) {
    let stores = stores.clone();
    let on_navigate = on_navigate.clone();
    use_effect_with((), move |()| {
        let bindings = if dom::test_mode_enabled() {
            match install(&stores, &on_navigate) {
                Ok(bindings) => Some(bindings),
                Err(err) => {
                    dom::console_error(&format!(
                        "test bridge unavailable: {}",
                        dom::js_error_message(&err)
                    ));
                    None
                }
            }
        } else {
            None
        };
        move || {
            if let Some(bindings) = bindings {
                bindings.keep();
                drop(bindings);
                uninstall();
            }
        }
    });
}
