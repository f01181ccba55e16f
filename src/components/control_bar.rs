use super::time_display::TimeDisplay;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

pub const PLAYBACK_RATES: [f64; 6] = [0.5, 0.75, 1.0, 1.25, 1.5, 2.0];

/// Accepts only the offered rates, so a stray option value never reaches the player.
pub fn parse_rate(raw: &str) -> Option<f64> {
    let rate: f64 = raw.trim().parse().ok()?;
    PLAYBACK_RATES.iter().copied().find(|r| (r - rate).abs() < 1e-9)
}

#[derive(Properties, PartialEq, Clone)]
pub struct ControlBarProps {
    pub paused: bool,
    pub rate: f64,
    pub current: f64,
    pub duration: f64,
    pub on_toggle_play: Callback<()>,
    /// Signed step in seconds.
    pub on_step: Callback<f64>,
    pub on_rate: Callback<f64>,
    pub step_seconds: f64,
}

/// Pointer and keyboard controls; sits above the touch layer so clicks never reach it.
#[function_component]
pub fn ControlBar(props: &ControlBarProps) -> Html {
    let play_cb = {
        let cb = props.on_toggle_play.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let back_cb = {
        let cb = props.on_step.clone();
        let step = props.step_seconds;
        Callback::from(move |_| cb.emit(-step))
    };
    let fwd_cb = {
        let cb = props.on_step.clone();
        let step = props.step_seconds;
        Callback::from(move |_| cb.emit(step))
    };
    let rate_cb = {
        let cb = props.on_rate.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            match parse_rate(&select.value()) {
                Some(rate) => cb.emit(rate),
                None => log::warn!("ignoring playback rate {:?}", select.value()),
            }
        })
    };
    let step_label = props.step_seconds.round() as u64;
    html! {<div class="control-bar" style="position:absolute; left:0; right:0; bottom:0; z-index:5; display:flex; align-items:center; gap:8px; padding:6px 10px; background:linear-gradient(transparent, rgba(0,0,0,0.7)); color:#e6edf3; font-size:13px;">
        <button onclick={play_cb} aria-label={if props.paused { "Play" } else { "Pause" }}>
            { if props.paused { "▶" } else { "⏸" } }
        </button>
        <button onclick={back_cb}>{ format!("-{}s", step_label) }</button>
        <button onclick={fwd_cb}>{ format!("+{}s", step_label) }</button>
        <TimeDisplay current={props.current} duration={props.duration} />
        <select onchange={rate_cb} aria-label="Playback rate" style="margin-left:auto;">
            { for PLAYBACK_RATES.iter().map(|r| html! {
                <option value={r.to_string()} selected={(r - props.rate).abs() < 1e-9}>{ format!("{}x", r) }</option>
            }) }
        </select>
    </div>}
}
