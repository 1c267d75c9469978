#![warn(clippy::complexity)]
#![warn(clippy::perf)]
#![warn(clippy::style)]
#![warn(clippy::suspicious)]
use paris_subway_map::{logging, App};

fn main() {
    console_error_panic_hook::set_once();
    logging::init();
    leptos::mount_to_body(App);
}
