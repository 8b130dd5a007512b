mod app;
mod commands;
mod components;
mod flow;
mod pages;
mod refine;
mod slider_scale;
mod theme;

use app::App;

fn main() {
    leptos::mount::mount_to_body(App);
}
