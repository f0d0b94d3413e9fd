use yew::prelude::*;

use crate::components::app::{Navigator, Route};

#[derive(Properties, PartialEq)]
pub struct LinkProps {
    pub to: Route,
    pub children: Children,
    #[prop_or_default]
    pub class: Classes,
}

/// Anchor that routes in-app instead of reloading the document.
#[function_component(Link)]
pub fn link(props: &LinkProps) -> Html {
    let navigator = use_context::<Navigator>().expect("Navigator context is not provided");

    let onclick = {
        let navigator = navigator.clone();
        let to = props.to.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            navigator.push(to.clone());
        })
    };

    html! {
        <a class={props.class.clone()} href={props.to.to_path()} {onclick}>
            { props.children.clone() }
        </a>
    }
}
