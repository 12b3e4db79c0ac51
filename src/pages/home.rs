use leptos::prelude::*;
use log::{error, info};
use wasm_bindgen::prelude::*;
use web_sys::{Event, FileReader, HtmlInputElement};

use crate::components::force_graph::{ForceGraphCanvas, SurfaceHandle};
use crate::ingest;
use crate::presenter::{GraphPresenter, LoadOutcome};

/// Viewer page: one `.csv` file picker and the graph canvas.
#[component]
pub fn Home() -> impl IntoView {
	let presenter = RwSignal::new(GraphPresenter::default());
	let graph = Signal::derive(move || presenter.with(|p| p.model().clone()));

	let on_file_change = move |ev: Event| {
		let input: HtmlInputElement = ev.target().unwrap().unchecked_into();
		let Some(file) = input.files().and_then(|files| files.get(0)) else {
			return;
		};

		let token = presenter
			.try_update(|p| p.begin_load())
			.expect("presenter signal disposed");

		let reader = FileReader::new().unwrap();
		let reader_done = reader.clone();
		let onload = Closure::once(move |_: Event| {
			let buffer = reader_done.result().unwrap();
			let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
			let seed = js_sys::Date::now() as u64;

			let outcome = presenter
				.try_update(|p| p.complete_load(token, ingest::parse_graph(&bytes, seed)))
				.expect("presenter signal disposed");
			match outcome {
				LoadOutcome::Applied => {
					let (nodes, links) =
						presenter.with(|p| (p.model().nodes.len(), p.model().links.len()));
					info!("loaded graph: {nodes} nodes, {links} links");
				}
				LoadOutcome::Stale => info!("dropped result of a superseded load"),
				LoadOutcome::Failed(err) => error!("could not load csv: {err}"),
			}
		});
		reader.set_onload(Some(onload.as_ref().unchecked_ref()));
		onload.forget();
		reader.read_as_array_buffer(&file).unwrap();
	};

	let on_ready = Callback::new(move |handle: SurfaceHandle| {
		let focus = presenter
			.try_update(|p| p.initial_focus())
			.expect("presenter signal disposed");
		if let Some(id) = focus {
			handle.focus_node(id);
		}
	});

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-graph">
				<ForceGraphCanvas data=graph fullscreen=true on_ready=on_ready />
				<div class="graph-overlay">
					<h1>"Agent Influence Graph"</h1>
					<p class="subtitle">
						"Load an agent CSV to see who influences whom. Drag nodes, scroll to zoom, drag the background to pan."
					</p>
					<input type="file" accept=".csv" on:change=on_file_change />
				</div>
			</div>
		</ErrorBoundary>
	}
}
