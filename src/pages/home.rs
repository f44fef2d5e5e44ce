use yew::prelude::*;

use crate::components::{
    about::About, background_video::BackgroundVideo, chat_widget::ChatWidget, contact::Contact,
    footer::Footer, hero::Hero, navbar::Navbar, preloader::Preloader, services::Services,
    system_health::SystemHealth, why_choose::WhyChoose,
};

/// The whole single-page site. Sections mount only after the preloader
/// hands over, so their entrance animations play in view of the reader.
#[function_component(Home)]
pub fn home() -> Html {
    let loading = use_state(|| true);

    let on_loaded = {
        let loading = loading.clone();
        Callback::from(move |_: ()| loading.set(false))
    };

    if *loading {
        return html! { <Preloader on_complete={on_loaded} /> };
    }

    html! {
        <>
            <Navbar />
            <main>
                <Hero />
                <Services />
                <SystemHealth />
                <About />
                <WhyChoose />
                <Contact />
            </main>
            <BackgroundVideo />
            <Footer />
            <ChatWidget />
        </>
    }
}
