use log::{info, Level};
use yew::prelude::*;
use yew_router::prelude::*;

mod config;
mod animation;
mod chatbot;
mod contact;
mod components {
    pub mod about;
    pub mod backdrop;
    pub mod background_video;
    pub mod chat_widget;
    pub mod contact;
    pub mod footer;
    pub mod hero;
    pub mod navbar;
    pub mod notification;
    pub mod preloader;
    pub mod section;
    pub mod services;
    pub mod system_health;
    pub mod why_choose;
}
mod pages {
    pub mod home;
}

use pages::home::Home;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering Home page");
            html! { <Home /> }
        }
        // Single page site: anything else goes back to the top.
        Route::NotFound => {
            info!("Unknown path, redirecting home");
            html! { <Redirect<Route> to={Route::Home} /> }
        }
    }
}

#[function_component]
fn App() -> Html {
    html! {
        <BrowserRouter>
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(Level::Info).expect("error initializing log");

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}
