//! Spark Dash demo
//!
//! Mounts a page of sparklines fed from bundled JSON rows.

mod dashboard;
mod data;

use dashboard::Dashboard;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    tracing::info!("starting spark-dash");
    leptos::mount::mount_to_body(App);
}

#[component]
fn App() -> impl IntoView {
    view! { <Dashboard /> }
}
