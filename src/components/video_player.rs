use super::{control_bar::ControlBar, feedback_flashes::FeedbackFlashes, seek_feedback::SeekFeedback};
use crate::config::GestureConfig;
use crate::controller::{GestureController, Surfaces};
use crate::model::{FeedbackEvent, PlaybackCommand, SeekPreview};
use crate::player::{PlaybackClock, Player, VideoElementPlayer};
use crate::state::{contacts_from_event, ActionDispatcher, RawPhase};
use crate::surface::RenderPort;
use crate::timer::BrowserScheduler;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Element, HtmlElement, HtmlVideoElement, TouchEvent};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct VideoPlayerProps {
    pub src: AttrValue,
    #[prop_or_default]
    pub config: GestureConfig,
    /// Receives a time probe once the gesture layer is attached.
    #[prop_or_default]
    pub on_clock: Callback<PlaybackClock>,
}

type TouchCallback = Closure<dyn FnMut(TouchEvent)>;

/// Touch listeners on the gesture layer plus the controller they feed.
/// Dropping it unhooks the listeners, detaches the controller and blanks the
/// overlays, which outlive it when the tuning changes.
struct TouchBindings {
    layer: HtmlElement,
    controller: Rc<GestureController<BrowserScheduler>>,
    overlays: Surfaces,
    listeners: Vec<(&'static str, TouchCallback)>,
}

impl Drop for TouchBindings {
    fn drop(&mut self) {
        for (name, cb) in &self.listeners {
            let _ = self
                .layer
                .remove_event_listener_with_callback(name, cb.as_ref().unchecked_ref());
        }
        self.controller.detach();
        self.overlays.clear();
    }
}

fn touch_listener(
    phase: RawPhase,
    layer: HtmlElement,
    controller: Rc<GestureController<BrowserScheduler>>,
) -> TouchCallback {
    Closure::wrap(Box::new(move |e: TouchEvent| {
        let rect = layer.get_bounding_client_rect();
        let (active, changed) = contacts_from_event(&e, rect.left(), rect.top());
        let owned = controller.handle_touch(phase, &active, &changed, e.time_stamp(), rect.width());
        // scroll may already be underway, in which case the event is not cancelable
        if owned && e.cancelable() {
            e.prevent_default();
        }
    }) as Box<dyn FnMut(_)>)
}

fn bind_gestures(
    container: Element,
    video: HtmlVideoElement,
    layer: HtmlElement,
    surfaces: Surfaces,
    cfg: GestureConfig,
) -> TouchBindings {
    let overlays = surfaces.clone();
    let player: Rc<dyn Player> = Rc::new(VideoElementPlayer::new(video, container));
    let controller = Rc::new(GestureController::attach(player, surfaces, BrowserScheduler, cfg));

    let opts = AddEventListenerOptions::new();
    opts.set_passive(false);

    let mut listeners = Vec::with_capacity(4);
    for (name, phase) in [
        ("touchstart", RawPhase::Start),
        ("touchmove", RawPhase::Move),
        ("touchend", RawPhase::End),
        ("touchcancel", RawPhase::Cancel),
    ] {
        let cb = touch_listener(phase, layer.clone(), controller.clone());
        if let Err(err) = layer.add_event_listener_with_callback_and_add_event_listener_options(
            name,
            cb.as_ref().unchecked_ref(),
            &opts,
        ) {
            log::warn!("failed to bind {}: {:?}", name, err);
            continue;
        }
        listeners.push((name, cb));
    }

    TouchBindings { layer, controller, overlays, listeners }
}

#[function_component(VideoPlayer)]
pub fn video_player(props: &VideoPlayerProps) -> Html {
    let container_ref = use_node_ref();
    let video_ref = use_node_ref();
    let layer_ref = use_node_ref();

    let seek_preview = use_state(|| None::<SeekPreview>);
    let flashes = use_state(Vec::<FeedbackEvent>::new);
    let times = use_state(|| (0.0_f64, 0.0_f64));
    let paused = use_state(|| true);
    let rate = use_state(|| 1.0_f64);

    // (Re)attach the gesture layer whenever the tuning changes.
    {
        let container_ref = container_ref.clone();
        let video_ref = video_ref.clone();
        let layer_ref = layer_ref.clone();
        let seek_preview = seek_preview.clone();
        let flashes = flashes.clone();
        let on_clock = props.on_clock.clone();
        use_effect_with(props.config.clone(), move |cfg| {
            let nodes = (
                container_ref.cast::<Element>(),
                video_ref.cast::<HtmlVideoElement>(),
                layer_ref.cast::<HtmlElement>(),
            );
            let bindings = match nodes {
                (Some(container), Some(video), Some(layer)) => {
                    let seek: Rc<dyn RenderPort<SeekPreview>> =
                        Rc::new(move |c: Option<&SeekPreview>| seek_preview.set(c.cloned()));
                    let flash: Rc<dyn RenderPort<[FeedbackEvent]>> =
                        Rc::new(move |c: Option<&[FeedbackEvent]>| {
                            flashes.set(c.map(<[FeedbackEvent]>::to_vec).unwrap_or_default())
                        });
                    let bindings =
                        bind_gestures(container, video, layer, Surfaces { seek, flash }, cfg.clone());
                    if let Some(clock) = bindings.controller.clock() {
                        on_clock.emit(clock);
                    }
                    Some(bindings)
                }
                _ => {
                    log::warn!("video player nodes not mounted; gestures disabled");
                    None
                }
            };
            move || drop(bindings)
        });
    }

    let sync_times = {
        let video_ref = video_ref.clone();
        let times = times.clone();
        Callback::from(move |_e: Event| {
            if let Some(video) = video_ref.cast::<HtmlVideoElement>() {
                let duration = video.duration();
                times.set((
                    video.current_time(),
                    if duration.is_finite() { duration } else { 0.0 },
                ));
            }
        })
    };
    let sync_playback = {
        let video_ref = video_ref.clone();
        let paused = paused.clone();
        let rate = rate.clone();
        Callback::from(move |_e: Event| {
            if let Some(video) = video_ref.cast::<HtmlVideoElement>() {
                paused.set(video.paused());
                rate.set(video.playback_rate());
            }
        })
    };
    let suppress_menu = Callback::from(|e: MouseEvent| e.prevent_default());

    // The control strip issues the same commands as the gestures.
    let run_command = {
        let container_ref = container_ref.clone();
        let video_ref = video_ref.clone();
        let step = props.config.seek_step_seconds;
        move |command: PlaybackCommand| {
            let (Some(container), Some(video)) =
                (container_ref.cast::<Element>(), video_ref.cast::<HtmlVideoElement>())
            else {
                return;
            };
            let player = VideoElementPlayer::new(video, container);
            ActionDispatcher::new(step).apply(command, &player);
            log::debug!("controls: issued {:?}", command);
        }
    };
    let on_toggle_play = {
        let run_command = run_command.clone();
        Callback::from(move |_| run_command(PlaybackCommand::TogglePlayPause))
    };
    let on_step = Callback::from(move |delta: f64| run_command(PlaybackCommand::SeekBy(delta)));
    let on_rate = {
        let video_ref = video_ref.clone();
        Callback::from(move |r: f64| {
            if let Some(video) = video_ref.cast::<HtmlVideoElement>() {
                video.set_playback_rate(r);
            }
        })
    };

    let (current, duration) = *times;
    html! {
        <div ref={container_ref} class="video-player" style="position:relative; width:100%; max-width:960px; aspect-ratio:16/9; background:#000; overflow:hidden; user-select:none; -webkit-user-select:none;">
            <video ref={video_ref}
                src={props.src.clone()}
                playsinline=true
                preload="metadata"
                style="position:absolute; inset:0; width:100%; height:100%; object-fit:contain;"
                ontimeupdate={sync_times.clone()}
                ondurationchange={sync_times.clone()}
                onloadedmetadata={sync_times}
                onplay={sync_playback.clone()}
                onpause={sync_playback.clone()}
                onratechange={sync_playback} />
            <div ref={layer_ref} class="gesture-layer"
                oncontextmenu={suppress_menu}
                style="position:absolute; inset:0; z-index:2; touch-action:pan-y; -webkit-touch-callout:none;" />
            <FeedbackFlashes flashes={(*flashes).clone()} />
            <SeekFeedback preview={(*seek_preview).clone()} />
            <ControlBar
                paused={*paused}
                rate={*rate}
                current={current}
                duration={duration}
                step_seconds={props.config.seek_step_seconds}
                {on_toggle_play}
                {on_step}
                {on_rate} />
        </div>
    }
}
