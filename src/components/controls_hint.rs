use leptos::{component, view, IntoView, MaybeSignal, ReadSignal, Show, SignalGet, SignalWith};

use crate::map::hotkeys::MapAction;
use crate::settings::MapSettings;

#[component]
#[must_use]
fn KeyCap(text: String) -> impl IntoView {
    view! {
        <span class="key-cap">{text}</span>
    }
}

/// Legend of the mouse gestures and the current hotkeys
#[component]
#[must_use]
pub fn ControlsHint(
    settings: ReadSignal<MapSettings>,
    #[prop(into)]
    visible: MaybeSignal<bool>,
) -> impl IntoView {
    let shortcut_text = move |action: MapAction| -> String {
        settings.with(|settings| {
            settings
                .hotkeys
                .get(action)
                .map_or_else(|| "unbound".to_string(), |shortcut| shortcut.format())
        })
    };

    view! {
        <Show when=move || visible.get()>
            <div class="canvas-controls-hint">
                <div class="hint-line">"Pan: " <KeyCap text="Drag".to_string() /></div>
                <div class="hint-line">"Select station: " <KeyCap text="Shift+Click".to_string() /></div>
                {MapAction::ALL
                    .into_iter()
                    .map(|action| view! {
                        <div class="hint-line">
                            {action.description()} ": "
                            {move || view! { <KeyCap text=shortcut_text(action) /> }}
                        </div>
                    })
                    .collect::<Vec<_>>()}
            </div>
        </Show>
    }
}
