use leptos::{component, create_effect, create_signal, view, IntoView, SignalGet, SignalUpdate, SignalWith};
use log::warn;
use leptos_meta::{provide_meta_context, Stylesheet, Title};

use crate::components::controls_hint::ControlsHint;
use crate::components::subway_map::SubwayMap;
use crate::components::toast::{Toast, ToastNotification};
use crate::settings::MapSettings;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let (settings, _) = create_signal(MapSettings::load());

    // Persist the settings so hotkeys merged from the defaults stick
    create_effect(move |_| {
        if let Err(e) = settings.with(MapSettings::save) {
            warn!("{e}");
        }
    });

    let (toast, set_toast) = create_signal(Toast::default());
    let (show_hint, set_show_hint) = create_signal(true);

    view! {
        <Stylesheet id="leptos" href="/pkg/paris_subway_map.css"/>
        <Title text="Paris Subway Map"/>

        <div class="app">
            <SubwayMap settings=settings set_toast=set_toast />
            <button
                class="hint-toggle"
                title="Show controls"
                on:click=move |_| set_show_hint.update(|shown| *shown = !*shown)
            >
                {move || if show_hint.get() { "Hide controls" } else { "Controls" }}
            </button>
            <ControlsHint settings=settings visible=show_hint />
            <ToastNotification toast=toast />
        </div>
    }
}
