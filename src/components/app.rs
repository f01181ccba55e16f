use super::video_player::VideoPlayer;
use crate::config::GestureConfig;
use crate::player::PlaybackClock;
use crate::util::format_clock;
use yew::prelude::*;

const DEFAULT_SOURCE: &str = "video.mp4";

/// `?src=<uri-encoded url>` overrides the demo video.
fn source_from_query() -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    let query = search.strip_prefix('?').unwrap_or(&search);
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        if key != "src" || value.is_empty() {
            return None;
        }
        js_sys::decode_uri_component(value).ok().map(String::from)
    })
}

#[function_component(App)]
pub fn app() -> Html {
    let config = use_state(GestureConfig::load_or_default);
    let source = use_state(|| source_from_query().unwrap_or_else(|| DEFAULT_SOURCE.to_string()));
    let clock = use_state(|| None::<PlaybackClock>);
    let marks = use_state(Vec::<f64>::new);

    let on_clock = {
        let clock = clock.clone();
        Callback::from(move |c: PlaybackClock| clock.set(Some(c)))
    };

    let mark = {
        let clock = clock.clone();
        let marks = marks.clone();
        Callback::from(move |_| {
            let Some(clock) = (*clock).as_ref() else { return };
            let t = clock.current_time();
            log::info!("marked {}", format_clock(t));
            let mut next = (*marks).clone();
            next.push(t);
            marks.set(next);
        })
    };

    html! {
        <div style="font-family:sans-serif; color:#e6edf3; background:#0d1117; min-height:100vh; padding:12px; box-sizing:border-box;">
            <VideoPlayer src={AttrValue::from((*source).clone())} config={(*config).clone()} on_clock={on_clock} />
            <div style="margin-top:10px; display:flex; gap:8px; align-items:center;">
                <button onclick={mark} disabled={clock.is_none()}>{"Mark timestamp"}</button>
                <span style="font-size:12px; opacity:0.7;">{"tap: play/pause · double tap sides: ±10s · double tap centre: fullscreen · drag: seek"}</span>
            </div>
            if !marks.is_empty() {
                <ul style="font-family:monospace; font-size:13px;">
                    { for marks.iter().enumerate().map(|(i, t)| html! {
                        <li key={i.to_string()}>{ format_clock(*t) }</li>
                    }) }
                </ul>
            }
        </div>
    }
}
