#[cfg(any(test, target_arch = "wasm32"))]
mod shared;
#[cfg(not(target_arch = "wasm32"))]
mod stub;
#[cfg(target_arch = "wasm32")]
mod wasm;

use crate::router::Route;
use crate::storage::Stores;
use yew::prelude::*;

#[cfg(not(target_arch = "wasm32"))]
#[hook]
pub fn use_test_bridge(stores: &Stores, on_navigate: &Callback<Route>) {
    stub::use_test_bridge(stores, on_navigate);
}

#[cfg(target_arch = "wasm32")]
#[hook]
pub fn use_test_bridge(stores: &Stores, on_navigate: &Callback<Route>) {
    wasm::use_test_bridge(stores, on_navigate);
}
