use leptos::prelude::*;

/// 404 Not Found Page
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<div class="page page--centered">
			<h1 class="page__title">"Uh oh!"</h1>
			<p class="page__subtitle">"We couldn't find that page."</p>
			<a href="/">"Back to the diagram"</a>
		</div>
	}
}
