//! Binary entry point: mounts the app to the document body.

use influence_graph::{App, init_logging};
use leptos::mount::mount_to_body;

fn main() {
	init_logging();
	mount_to_body(App);
}
