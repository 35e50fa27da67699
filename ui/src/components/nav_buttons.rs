use leptos::prelude::{
    ClassAttribute, ElementChild, Get, GlobalAttributes, LocalStorage, OnAttribute, RwSignal, StoredValue, WithValue,
};
use leptos::{IntoView, component, view};

use crate::navigation::{Direction, InputEvent, InputQueue};

#[component]
pub fn NavButtons(
    /// Directions that lead somewhere from the active viewpoint.
    affordances: RwSignal<Vec<Direction>>,
    at_home: RwSignal<bool>,
    queue: StoredValue<InputQueue, LocalStorage>,
) -> impl IntoView {
    let button = move |direction: Direction, arrow: &'static str, place: &'static str| {
        view! {
            <button
                class=format!("nav-btn absolute {place} px-3 py-2 rounded bg-surface/80 text-text")
                class=("hidden", move || !affordances.get().contains(&direction))
                title=direction.label()
                on:click=move |_| queue.with_value(|q| q.push(InputEvent::DirectionChosen(direction)))
            >
                {arrow}
            </button>
        }
    };

    view! {
        <div class="pointer-events-none absolute inset-0 [&>button]:pointer-events-auto">
            {button(Direction::Up, "▲", "top-4 left-1/2 -translate-x-1/2")}
            {button(Direction::Down, "▼", "bottom-4 left-1/2 -translate-x-1/2")}
            {button(Direction::Left, "◀", "left-4 top-1/2 -translate-y-1/2")}
            {button(Direction::Right, "▶", "right-4 top-1/2 -translate-y-1/2")}
            <button
                class="absolute top-4 left-4 px-3 py-2 rounded bg-primary text-surface font-semibold"
                class=("hidden", move || at_home.get())
                on:click=move |_| queue.with_value(|q| q.push(InputEvent::HomeRequested))
            >
                "main"
            </button>
        </div>
    }
}
