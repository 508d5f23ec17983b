use crate::app::App;

mod app;
mod components;
mod config;
mod helpers;
mod logging;
mod platform;
mod tops_sheet;

fn main() {
    logging::init(log::LevelFilter::Debug);
    yew::Renderer::<App>::new().render();
}
