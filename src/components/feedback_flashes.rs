use crate::model::{FeedbackEvent, FeedbackKind};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct FeedbackFlashesProps {
    pub flashes: Vec<FeedbackEvent>,
}

fn anchor(kind: FeedbackKind) -> &'static str {
    match kind {
        FeedbackKind::Left => "left:18%;",
        FeedbackKind::Right => "left:82%;",
        _ => "left:50%;",
    }
}

#[function_component(FeedbackFlashes)]
pub fn feedback_flashes(props: &FeedbackFlashesProps) -> Html {
    html! {
        <div class="anim-layer" style="position:absolute; inset:0; pointer-events:none; z-index:3;">
            { for props.flashes.iter().map(|ev| html! {
                <div key={ev.id.to_string()}
                    class={classes!("anim-icon", ev.kind.css_class())}
                    style={format!("position:absolute; top:50%; {} transform:translate(-50%, -50%);", anchor(ev.kind))}>
                    <div style="background:rgba(0,0,0,0.55); color:#fff; border-radius:999px; padding:14px 18px; font-size:22px; box-shadow:0 2px 8px rgba(0,0,0,0.5);">
                        { ev.kind.glyph() }
                    </div>
                </div>
            }) }
        </div>
    }
}
