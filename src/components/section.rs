use std::rc::Rc;

use yew::prelude::*;

use crate::animation::dom::Scope;
use crate::animation::session::AnimationSession;
use crate::animation::{Ease, Property, Tween};

#[derive(Properties, PartialEq)]
pub struct SectionHeaderProps {
    pub title: AttrValue,
    pub subtitle: AttrValue,
}

#[function_component(SectionHeader)]
pub fn section_header(props: &SectionHeaderProps) -> Html {
    html! {
        <div class="section-header">
            <h2 class="section-title">{&props.title}</h2>
            <p class="section-subtitle">{&props.subtitle}</p>
        </div>
    }
}

/// Header slides up as it enters and back down if the reader scrolls
/// above it again.
pub fn reveal_header(session: &Rc<AnimationSession>, scope: &Scope) {
    scope.reveal_each(session, ".section-header", "top 80%", false, |_, t| {
        Tween::new(t)
            .from(Property::Opacity, 0.0)
            .from(Property::Y, 50.0)
            .duration(1.0)
            .ease(Ease::POWER3_OUT)
    });
}

/// Cards rise one after another, each on its own trigger.
pub fn reveal_cards(session: &Rc<AnimationSession>, scope: &Scope, selector: &str) {
    scope.reveal_each(session, selector, "top 85%", false, |i, t| {
        Tween::new(t)
            .from(Property::Opacity, 0.0)
            .from(Property::Y, 60.0)
            .duration(0.8)
            .delay(i as f64 * 0.1)
            .ease(Ease::POWER2_OUT)
    });
}
