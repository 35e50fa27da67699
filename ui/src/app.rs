use leptos::*;
use leptos::prelude::ElementChild;
use leptos::prelude::ClassAttribute;
use crate::routes::RoutesMenu;
use leptos_router::components::Router;

use leptos_meta::{provide_meta_context, Title};

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
      <Title text="Rover viewpoints"/>
      <Router>
        <header class="sticky top-0 bg-surface/85 backdrop-blur z-10">
          <div class="max-w-6xl mx-auto flex justify-between items-center px-6 py-4">
            <a href="/" class="text-2xl font-extrabold text-primary">"ROVER"</a>
            <nav class="hidden md:flex gap-8 text-text">
              <a href="https://mars.nasa.gov/resources/25042/mars-perseverance-rover-3d-model/" target="_blank" rel="noopener">"Model"</a>
            </nav>
          </div>
        </header>

        <main class="min-h-screen p-4">
          <RoutesMenu/>
        </main>

        <footer class="bg-surface text-text py-8">
          <div class="max-w-6xl mx-auto px-6">
            <p>"Model courtesy NASA/JPL-Caltech."</p>
          </div>
        </footer>
      </Router>
    }
}
