use chrono::Datelike;
use yew::prelude::*;

const LINKS: &[(&str, &str)] = &[
    ("Home", "#home"),
    ("Services", "#services"),
    ("About", "#about"),
    ("Contact", "#contact"),
];

#[function_component(Footer)]
pub fn footer() -> Html {
    let year = chrono::Local::now().year();

    html! {
        <footer id="footer" class="site-footer">
            <div class="container">
                <div class="footer-grid">
                    <div class="footer-col">
                        <h3 class="footer-logo">{"Zyntex Technologies"}</h3>
                        <p class="muted">{"Innovative software solutions for modern businesses."}</p>
                        <p class="muted copyright">{format!("© {} All rights reserved.", year)}</p>
                    </div>

                    <div class="footer-col">
                        <h4>{"Navigation"}</h4>
                        <ul class="footer-links">
                            {
                                LINKS.iter().map(|(label, href)| html! {
                                    <li><a href={*href}>{*label}</a></li>
                                }).collect::<Html>()
                            }
                        </ul>
                    </div>

                    <div class="footer-col">
                        <h4>{"Contact Details"}</h4>
                        <div class="footer-contact-item">
                            <strong>{"Email"}</strong>
                            <a href="mailto:zyntexinfosoft@gmail.com" class="muted">{"zyntexinfosoft@gmail.com"}</a>
                        </div>
                        <div class="footer-contact-item">
                            <strong>{"Phone"}</strong>
                            <span class="muted">{"+91 96647 47560 | +91 74330 40571"}</span>
                        </div>
                        <div class="footer-contact-item">
                            <strong>{"Location"}</strong>
                            <span class="muted">{"Bhavnagar, Gujarat, India"}</span>
                        </div>
                    </div>
                </div>
            </div>
        </footer>
    }
}
