use futures::channel::mpsc::{unbounded, UnboundedReceiver};
use futures::StreamExt;
use leptos::{
    component, create_memo, create_node_ref, create_signal, event_target_value, html, spawn_local, store_value,
    view, HtmlElement, IntoView, ReadSignal, SignalGet, SignalGetUntracked, SignalSet, SignalWith, WriteSignal,
};
use log::{error, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, MouseEvent};

use crate::components::toast::{show_toast, Toast, ToastLevel};
use crate::map::canvas::{Canvas, Scene};
use crate::map::controller::{Control, InputEvent, MapController};
use crate::map::{hotkeys, painter};
use crate::settings::MapSettings;
use crate::store::HttpGraphStore;

#[derive(Clone, Debug, PartialEq)]
enum MapStatus {
    Loading,
    Ready,
    Failed(String),
    Closed,
}

fn pointer_position(canvas: &web_sys::HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
    let rect = canvas.get_bounding_client_rect();
    (
        f64::from(ev.client_x()) - rect.left(),
        f64::from(ev.client_y()) - rect.top(),
    )
}

/// Size the canvas to its box and get its 2D context
fn prepare_canvas(canvas: &web_sys::HtmlCanvasElement) -> Option<(CanvasRenderingContext2d, (f64, f64))> {
    let width = canvas.client_width().max(1).unsigned_abs();
    let height = canvas.client_height().max(1).unsigned_abs();
    canvas.set_width(width);
    canvas.set_height(height);

    let ctx = canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())?;
    Some((ctx, (f64::from(width), f64::from(height))))
}

/// Load the map, then handle queued events one at a time until the user quits
async fn run_map(
    canvas: HtmlElement<html::Canvas>,
    settings: MapSettings,
    mut events: UnboundedReceiver<InputEvent>,
    set_status: WriteSignal<MapStatus>,
    set_toast: WriteSignal<Toast>,
) {
    let element: &web_sys::HtmlCanvasElement = &canvas;
    let Some((ctx, size)) = prepare_canvas(element) else {
        error!("Canvas has no 2D context");
        set_status.set(MapStatus::Failed("This browser cannot draw the map".to_string()));
        return;
    };

    let started = js_sys::Date::now();
    let store = HttpGraphStore::new(settings.endpoint.clone());
    info!("Loading network from {}", store.endpoint());

    let mut map = match MapController::start(store, Scene::new(size.0, size.1), &settings).await {
        Ok(map) => map,
        Err(e) => {
            error!("Failed to load the map: {e}");
            set_status.set(MapStatus::Failed(e.to_string()));
            return;
        }
    };

    painter::paint(&ctx, map.canvas(), map.canvas().size());
    set_status.set(MapStatus::Ready);
    info!(
        "Map ready in {:.0} ms: {} stations",
        js_sys::Date::now() - started,
        map.network().station_count()
    );

    while let Some(event) = events.next().await {
        match map.handle(event).await {
            Ok(Control::Continue) => {}
            Ok(Control::Notice(text)) => {
                info!("{text}");
                show_toast(set_toast, text, ToastLevel::Info);
            }
            Ok(Control::Quit) => break,
            Err(e) if e.is_recoverable() => {
                warn!("{e}");
                show_toast(set_toast, e.to_string(), ToastLevel::Info);
            }
            Err(e) => {
                error!("{e}");
                show_toast(set_toast, e.to_string(), ToastLevel::Error);
            }
        }
        painter::paint(&ctx, map.canvas(), map.canvas().size());
    }

    set_status.set(MapStatus::Closed);
}

#[component]
#[must_use]
pub fn SubwayMap(settings: ReadSignal<MapSettings>, set_toast: WriteSignal<Toast>) -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();
    let (status, set_status) = create_signal(MapStatus::Loading);
    let (search, set_search) = create_signal(String::new());

    let (sender, receiver) = unbounded::<InputEvent>();
    let sender = store_value(sender);
    let send = move |event: InputEvent| {
        sender.with_value(|tx| {
            // Fails only once the map has shut down
            let _ = tx.unbounded_send(event);
        });
    };

    canvas_ref.on_load(move |canvas| {
        spawn_local(run_map(canvas, settings.get_untracked(), receiver, set_status, set_toast));
    });

    let map_hotkeys = create_memo(move |_| settings.with(|s| s.hotkeys.clone()));
    hotkeys::listen(map_hotkeys, move |action, ev| {
        ev.prevent_default();
        send(InputEvent::Action(action));
    });

    let position = move |ev: &MouseEvent| {
        canvas_ref.get_untracked().map(|canvas| {
            let element: &web_sys::HtmlCanvasElement = &canvas;
            pointer_position(element, ev)
        })
    };

    let handle_mouse_down = move |ev: MouseEvent| {
        if let Some((x, y)) = position(&ev) {
            send(InputEvent::PointerDown { x, y, shift: ev.shift_key() });
        }
    };
    let handle_mouse_move = move |ev: MouseEvent| {
        if ev.buttons() == 0 {
            return;
        }
        if let Some((x, y)) = position(&ev) {
            send(InputEvent::PointerMove { x, y });
        }
    };
    let handle_mouse_up = move |ev: MouseEvent| {
        if let Some((x, y)) = position(&ev) {
            send(InputEvent::PointerUp { x, y });
        }
    };

    let handle_search = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let name = search.get_untracked();
        if !name.trim().is_empty() {
            send(InputEvent::FindStation(name.trim().to_string()));
        }
    };

    view! {
        <div class="subway-map">
            <form class="station-search" on:submit=handle_search>
                <input
                    type="text"
                    placeholder="Find a station"
                    prop:value=search
                    on:input=move |ev| set_search.set(event_target_value(&ev))
                />
            </form>
            <canvas
                node_ref=canvas_ref
                class="subway-map-canvas"
                on:mousedown=handle_mouse_down
                on:mousemove=handle_mouse_move
                on:mouseup=handle_mouse_up
                on:mouseleave=handle_mouse_up
                on:contextmenu=|ev| ev.prevent_default()
            />
            {move || match status.get() {
                MapStatus::Loading => view! { <div class="map-status">"Loading the network..."</div> }.into_view(),
                MapStatus::Ready => ().into_view(),
                MapStatus::Failed(reason) => view! {
                    <div class="map-status map-status-error">{format!("The map could not be loaded: {reason}")}</div>
                }.into_view(),
                MapStatus::Closed => view! { <div class="map-status">"Map closed. Reload the page to start again."</div> }.into_view(),
            }}
        </div>
    }
}
