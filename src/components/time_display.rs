use crate::util::format_clock;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct TimeDisplayProps {
    pub current: f64,
    pub duration: f64,
}

#[function_component(TimeDisplay)]
pub fn time_display(props: &TimeDisplayProps) -> Html {
    html! {<span style="font-family:monospace; font-size:13px; color:#e6edf3;">
        { format!("{} / {}", format_clock(props.current), format_clock(props.duration)) }
    </span>}
}
