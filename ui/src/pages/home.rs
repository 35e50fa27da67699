use leptos::prelude::ElementChild;
use leptos::prelude::ClassAttribute;
use leptos::component;
use leptos::IntoView;
use leptos::view;

use crate::components::viewer::Viewer;

#[component]
pub fn Home() -> impl IntoView {
    view! {
      <section class="max-w-6xl mx-auto flex flex-col gap-4">
        <h1 class="text-3xl font-bold text-text">"Perseverance, up close"</h1>
        <p class="text-text/80">
          "Hover a marker to peek through its camera, click to jump there, "
          "then step between neighbours with the arrows. " <b>"main"</b> " brings you back."
        </p>
        <Viewer/>
      </section>
    }
}
