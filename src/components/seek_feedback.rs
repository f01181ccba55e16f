use crate::model::{SeekDirection, SeekPreview};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct SeekFeedbackProps {
    pub preview: Option<SeekPreview>,
}

/// Drag-seek overlay: direction glyph, target time and signed offset.
#[function_component]
pub fn SeekFeedback(props: &SeekFeedbackProps) -> Html {
    let Some(preview) = &props.preview else {
        return html! {};
    };
    let glyph = match preview.direction {
        SeekDirection::Forward => "⏩",
        SeekDirection::Backward => "⏪",
    };
    html! {
        <div class="seek-feedback" style="position:absolute; top:50%; left:50%; transform:translate(-50%, -50%); display:flex; flex-direction:column; align-items:center; color:#fff; text-shadow:0 1px 3px rgba(0,0,0,0.7); pointer-events:none; z-index:4;">
            <div style="font-size:44px; font-weight:700; margin-bottom:8px;">{ glyph }</div>
            <div style="font-family:monospace; font-size:20px; background:rgba(0,0,0,0.5); padding:4px 12px; border-radius:6px;">
                { preview.target_label.clone() }
                <span style="font-size:13px; color:#d0d7de; margin-left:6px;">{ format!("({})", preview.magnitude_label) }</span>
            </div>
        </div>
    }
}
