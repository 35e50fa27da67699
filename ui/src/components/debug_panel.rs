use leptos::prelude::{
    ClassAttribute, ElementChild, Get, LocalStorage, OnAttribute, PropAttribute, RwSignal, Show, StoredValue, Update,
    WithValue, event_target_value,
};
use leptos::{IntoView, component, view};

use crate::navigation::debug::folders;
use crate::navigation::{DebugBinding, InputEvent, InputQueue, scene_bindings};

/// Range inputs for the scene sliders. Stays hidden until `values` is
/// seeded from the live context.
#[component]
pub fn DebugPanel(values: RwSignal<Vec<f32>>, queue: StoredValue<InputQueue, LocalStorage>) -> impl IntoView {
    let slider = move |index: usize, b: DebugBinding| {
        let on_input = move |ev: web_sys::Event| {
            let Ok(value) = event_target_value(&ev).parse::<f32>() else { return };
            values.update(|v| {
                if let Some(slot) = v.get_mut(index) {
                    *slot = value;
                }
            });
            queue.with_value(|q| q.push(InputEvent::DebugChanged { index, value }));
        };

        view! {
            <label class="flex items-center gap-2 text-xs">
                <span class="w-6">{b.label}</span>
                <input
                    type="range"
                    class="flex-1"
                    min=b.min.to_string()
                    max=b.max.to_string()
                    step=b.step.to_string()
                    prop:value=move || values.get().get(index).copied().unwrap_or_default().to_string()
                    on:input=on_input
                />
                <span class="w-12 text-right tabular-nums">
                    {move || format!("{:.2}", values.get().get(index).copied().unwrap_or_default())}
                </span>
            </label>
        }
    };

    let groups = move || {
        folders(&scene_bindings())
            .into_iter()
            .map(|(folder, items)| {
                view! {
                    <fieldset class="border border-text/20 rounded p-2">
                        <legend class="px-1 font-semibold">{folder}</legend>
                        {items.into_iter().map(|(i, b)| slider(i, b)).collect::<Vec<_>>()}
                    </fieldset>
                }
            })
            .collect::<Vec<_>>()
    };

    view! {
        <Show when=move || !values.get().is_empty()>
            <aside class="absolute top-4 right-4 w-64 max-h-[90%] overflow-y-auto flex flex-col gap-2
                          bg-surface/85 backdrop-blur text-text p-3 rounded shadow">
                {groups()}
            </aside>
        </Show>
    }
}
