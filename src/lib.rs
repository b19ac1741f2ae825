pub mod cardflow;
pub mod data;
pub mod gesture;
pub mod identity;
pub mod queue;
pub mod report;

use cardflow::CardFlow;
use data::{load_default_feed, load_feed, FeedError};
use gesture::{DragGesture, SwipeOutcome, TouchGesture, WheelAccumulator, WheelOutcome};
use identity::{BrowserStorage, IdentityStore, SessionIdentity};
use queue::{Decision, DecisionQueue, ReviewItem};
use report::{spawn_report, DecisionReport};

use gloo_events::{EventListener, EventListenerOptions};
use gloo_timers::callback::Timeout;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::window;
use yew::prelude::*;

const MIN_LOADER_MS: f64 = 1000.0;
const PRESS_FLASH_MS: u32 = 900;
const DRAG_ROTATE_SCALE: f64 = 0.03;
const HOVER_SHIFT_PX: f64 = 56.0;
const HOVER_TILT_DEG: f64 = 1.5;

#[derive(Clone, Copy, PartialEq, Eq)]
enum ViewMode {
    Feed,
    Gallery,
}

#[derive(Clone, PartialEq)]
enum FeedStatus {
    Loading,
    Failed(FeedError),
    Ready,
}

#[function_component(App)]
fn app() -> Html {
    let status = use_state(|| FeedStatus::Loading);
    let mode = use_state(|| ViewMode::Feed);
    let retry_tick = use_state(|| 0_u32);

    let queue = use_state(DecisionQueue::new);
    let cards = use_state(CardFlow::new);
    let token = use_state(String::new);
    let identity = use_state(|| None::<SessionIdentity>);

    let user_name = use_state(|| None::<String>);
    let name_input = use_state(String::new);
    let name_focused = use_state(|| false);

    let expanded = use_state(|| None::<ReviewItem>);
    let pressed = use_state(|| None::<Decision>);
    let hovered = use_state(|| None::<Decision>);
    let drag = use_state(|| None::<DragGesture>);
    let touch = use_state(|| None::<TouchGesture>);
    let wheel_offset = use_state(|| 0.0_f64);

    let wheel = use_mut_ref(WheelAccumulator::new);
    let wheel_reset = use_mut_ref(|| None::<Timeout>);
    let press_reset = use_mut_ref(|| None::<Timeout>);
    let photo_area = use_node_ref();

    {
        let status = status.clone();
        let queue = queue.clone();
        let token = token.clone();
        let identity = identity.clone();
        let user_name = user_name.clone();

        use_effect_with_deps(
            move |_| {
                status.set(FeedStatus::Loading);

                let status = status.clone();
                let queue = queue.clone();
                let token = token.clone();
                let identity = identity.clone();
                let user_name = user_name.clone();

                spawn_local(async move {
                    let started = js_sys::Date::now();
                    let link_token = resolve_token();

                    let loaded = match &link_token {
                        Some(link) => load_feed(link).await.map(|items| (link.clone(), items)),
                        None => load_default_feed().await.map(|feed| (feed.token, feed.items)),
                    };

                    hold_loader(started).await;

                    match loaded {
                        Ok((link, items)) => {
                            let store = IdentityStore::new(BrowserStorage);
                            identity.set(Some(store.get_or_create(&link, js_sys::Date::now())));
                            user_name.set(store.display_name(&link));
                            token.set(link);

                            let mut next_queue = DecisionQueue::new();
                            next_queue.load(items);
                            queue.set(next_queue);
                            status.set(FeedStatus::Ready);
                        }
                        Err(err) => {
                            log::warn!("Feed load failed: {err:?}");
                            status.set(FeedStatus::Failed(err));
                        }
                    }
                });

                || ()
            },
            *retry_tick,
        );
    }

    let on_commit = {
        let queue = queue.clone();
        let cards = cards.clone();
        let pressed = pressed.clone();
        let press_reset = press_reset.clone();
        let token = token.clone();
        let identity = identity.clone();
        let user_name = user_name.clone();

        Callback::from(move |decision: Decision| {
            let mut next_queue = (*queue).clone();
            let Some(receipt) = next_queue.commit(decision) else {
                return;
            };
            log::debug!("Committed {} as {}", receipt.id, receipt.decision.as_str());

            let mut next_cards = (*cards).clone();
            next_cards.on_commit(&receipt.id, decision);
            cards.set(next_cards);
            queue.set(next_queue);

            pressed.set(Some(decision));
            {
                let pressed = pressed.clone();
                *press_reset.borrow_mut() = Some(Timeout::new(PRESS_FLASH_MS, move || {
                    pressed.set(None);
                }));
            }

            if token.is_empty() {
                return;
            }
            if let Some(identity) = (*identity).clone() {
                spawn_report(
                    (*token).clone(),
                    DecisionReport {
                        image_id: receipt.id,
                        decision: receipt.decision,
                        order_index: receipt.order_index,
                        client_id: identity.client_id,
                        session_id: identity.session_id,
                        user_name: (*user_name).clone(),
                    },
                );
            }
        })
    };

    let on_undo = {
        let queue = queue.clone();
        Callback::from(move |_| {
            let mut next_queue = (*queue).clone();
            if next_queue.undo() {
                if let Some(item) = next_queue.current() {
                    log::debug!("Undo reopened {}", item.id);
                }
                queue.set(next_queue);
            }
        })
    };

    {
        let on_commit = on_commit.clone();
        let wheel = wheel.clone();
        let wheel_reset = wheel_reset.clone();
        let wheel_offset = wheel_offset.clone();
        let photo_area = photo_area.clone();
        let current_id = queue.current().map(|item| item.id.clone());

        use_effect_with_deps(
            move |_| {
                // Non-passive listener: horizontal trackpad travel must be
                // able to cancel the browser's own scroll/navigation.
                let listener = photo_area.cast::<web_sys::Element>().map(|area| {
                    let options = EventListenerOptions::enable_prevent_default();
                    EventListener::new_with_options(
                        area.as_ref(),
                        "wheel",
                        options,
                        move |event| {
                            let Some(event) = event.dyn_ref::<web_sys::WheelEvent>() else {
                                return;
                            };
                            let outcome = wheel.borrow_mut().feed(
                                event.delta_x(),
                                event.delta_y(),
                                event.time_stamp(),
                            );
                            match outcome {
                                WheelOutcome::Ignored => {}
                                WheelOutcome::Tracking(offset) => {
                                    event.prevent_default();
                                    wheel_offset.set(offset);
                                    let wheel = wheel.clone();
                                    let wheel_offset = wheel_offset.clone();
                                    *wheel_reset.borrow_mut() = Some(Timeout::new(
                                        gesture::WHEEL_IDLE_MS as u32,
                                        move || {
                                            wheel.borrow_mut().reset();
                                            wheel_offset.set(0.0);
                                        },
                                    ));
                                }
                                WheelOutcome::Commit(decision) => {
                                    event.prevent_default();
                                    *wheel_reset.borrow_mut() = None;
                                    wheel_offset.set(0.0);
                                    on_commit.emit(decision);
                                }
                            }
                        },
                    )
                });
                move || drop(listener)
            },
            (current_id, *mode, (*status).clone(), user_name.is_some()),
        );
    }

    let on_name_change = {
        let name_input = name_input.clone();
        Callback::from(move |value: String| name_input.set(value))
    };

    let on_name_focus = {
        let name_focused = name_focused.clone();
        Callback::from(move |focused: bool| name_focused.set(focused))
    };

    let on_name_submit = {
        let name_input = name_input.clone();
        let user_name = user_name.clone();
        let token = token.clone();
        Callback::from(move |_| {
            let store = IdentityStore::new(BrowserStorage);
            if let Some(saved) = store.set_display_name(&token, &name_input) {
                user_name.set(Some(saved));
            }
        })
    };

    let on_retry = {
        let retry_tick = retry_tick.clone();
        let status = status.clone();
        Callback::from(move |_| {
            status.set(FeedStatus::Loading);
            retry_tick.set(*retry_tick + 1);
        })
    };

    let on_open_gallery = {
        let mode = mode.clone();
        Callback::from(move |_| mode.set(ViewMode::Gallery))
    };

    let on_close_gallery = {
        let mode = mode.clone();
        Callback::from(move |_| mode.set(ViewMode::Feed))
    };

    let on_close_expanded = {
        let expanded = expanded.clone();
        Callback::from(move |_| expanded.set(None))
    };

    let view = match &*status {
        FeedStatus::Loading => render_loader(),
        FeedStatus::Failed(error) => render_error(error, &on_retry),
        FeedStatus::Ready => {
            if queue.is_empty() {
                render_no_images()
            } else if user_name.is_none() {
                render_name_gate(
                    &name_input,
                    *name_focused,
                    &on_name_change,
                    &on_name_focus,
                    &on_name_submit,
                )
            } else {
                match *mode {
                    ViewMode::Gallery => render_gallery(&queue, &on_close_gallery),
                    ViewMode::Feed => render_feed(
                        &queue,
                        &cards,
                        &drag,
                        &touch,
                        &hovered,
                        &expanded,
                        *pressed,
                        *wheel_offset,
                        &photo_area,
                        &on_commit,
                        &on_undo,
                        &on_open_gallery,
                    ),
                }
            }
        }
    };

    let overlay = match (*expanded).as_ref() {
        Some(item) => render_expanded(item, &on_close_expanded),
        None => html! {},
    };

    html! {
        <div class="app-shell">
            <div class="backdrop" aria-hidden="true">
                <div class="glow glow-top"></div>
                <div class="glow glow-bottom"></div>
            </div>
            { view }
            { overlay }
        </div>
    }
}

fn render_loader() -> Html {
    html! {
        <div class="loader-screen">
            <div class="loader-title">{ "Like that!" }</div>
        </div>
    }
}

fn render_error(error: &FeedError, on_retry: &Callback<()>) -> Html {
    let retry_click = {
        let on_retry = on_retry.clone();
        Callback::from(move |_| on_retry.emit(()))
    };

    html! {
        <div class="screen-center">
            <div class="screen-card">
                <div class="screen-title">{ error.to_string() }</div>
                <div class="screen-hint">{ "Check the link or try again in a moment." }</div>
                <button class="retry-button" onclick={retry_click}>{ "Retry" }</button>
            </div>
        </div>
    }
}

fn render_no_images() -> Html {
    html! {
        <div class="screen-center">
            <div class="screen-card">
                <div class="screen-title">{ "No images" }</div>
                <div class="screen-hint">{ "This project has no images to rate yet." }</div>
            </div>
        </div>
    }
}

fn render_name_gate(
    value: &str,
    focused: bool,
    on_change: &Callback<String>,
    on_focus: &Callback<bool>,
    on_submit: &Callback<()>,
) -> Html {
    let ready = !value.trim().is_empty();
    let form_class = classes!("name-form", (ready || focused).then_some("active"));

    let input = {
        let on_change = on_change.clone();
        Callback::from(move |event: web_sys::InputEvent| {
            let field: web_sys::HtmlInputElement = event.target_unchecked_into();
            on_change.emit(field.value());
        })
    };
    let focus = {
        let on_focus = on_focus.clone();
        Callback::from(move |_| on_focus.emit(true))
    };
    let blur = {
        let on_focus = on_focus.clone();
        Callback::from(move |_| on_focus.emit(false))
    };
    let submit = {
        let on_submit = on_submit.clone();
        Callback::from(move |event: web_sys::SubmitEvent| {
            event.prevent_default();
            on_submit.emit(());
        })
    };

    html! {
        <div class="name-scrim">
            <div class="name-prompt">
                <div class="name-title">{ "Type your name:" }</div>
                <form class={form_class} onsubmit={submit}>
                    <input
                        type="text"
                        class="name-input"
                        placeholder="Sean"
                        maxlength="100"
                        autofocus={true}
                        value={value.to_string()}
                        oninput={input}
                        onfocus={focus}
                        onblur={blur}
                    />
                    <button type="submit" class="name-submit" disabled={!ready} title="Continue">
                        { "→" }
                    </button>
                </form>
            </div>
        </div>
    }
}

fn render_feed(
    queue: &UseStateHandle<DecisionQueue>,
    cards: &UseStateHandle<CardFlow>,
    drag: &UseStateHandle<Option<DragGesture>>,
    touch: &UseStateHandle<Option<TouchGesture>>,
    hovered: &UseStateHandle<Option<Decision>>,
    expanded: &UseStateHandle<Option<ReviewItem>>,
    pressed: Option<Decision>,
    wheel_offset: f64,
    photo_area: &NodeRef,
    on_commit: &Callback<Decision>,
    on_undo: &Callback<()>,
    on_open_gallery: &Callback<()>,
) -> Html {
    let current = queue.current().cloned();
    let drag_delta = (*drag).as_ref().map(|gesture| gesture.delta());
    // Zones vanish with the last card without firing mouseleave, so a
    // stale hover must not keep the wash lit over the done screen.
    let hint = (*drag)
        .as_ref()
        .and_then(|gesture| gesture.hint())
        .or(**hovered)
        .filter(|_| current.is_some());

    let pointer_down = {
        let queue = queue.clone();
        let drag = drag.clone();
        Callback::from(move |event: web_sys::PointerEvent| {
            if queue.current().is_none() || event.button() != 0 || event.pointer_type() == "touch"
            {
                return;
            }
            if (*drag).is_some() {
                return;
            }
            if let Some(target) = event
                .target()
                .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            {
                let _ = target.set_pointer_capture(event.pointer_id());
            }
            drag.set(Some(DragGesture::begin(
                event.pointer_id(),
                event.client_x() as f64,
            )));
        })
    };

    let pointer_move = {
        let drag = drag.clone();
        Callback::from(move |event: web_sys::PointerEvent| {
            if event.pointer_type() == "touch" {
                return;
            }
            if let Some(mut gesture) = (*drag).clone() {
                if gesture.track(event.pointer_id(), event.client_x() as f64) {
                    drag.set(Some(gesture));
                }
            }
        })
    };

    let pointer_up = {
        let queue = queue.clone();
        let drag = drag.clone();
        let expanded = expanded.clone();
        let on_commit = on_commit.clone();
        Callback::from(move |event: web_sys::PointerEvent| {
            if event.button() != 0 || event.pointer_type() == "touch" {
                return;
            }
            let Some(gesture) = (*drag).clone() else {
                return;
            };
            let Some(outcome) = gesture.release(event.pointer_id()) else {
                return;
            };
            if let Some(target) = event
                .target()
                .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            {
                let _ = target.release_pointer_capture(event.pointer_id());
            }
            drag.set(None);
            match outcome {
                SwipeOutcome::Commit(decision) => on_commit.emit(decision),
                SwipeOutcome::Tap => {
                    if let Some(item) = queue.current() {
                        expanded.set(Some(item.clone()));
                    }
                }
                SwipeOutcome::SnapBack => {}
            }
        })
    };

    let pointer_cancel = {
        let drag = drag.clone();
        Callback::from(move |event: web_sys::PointerEvent| {
            if let Some(gesture) = (*drag).clone() {
                if gesture.matches(event.pointer_id()) {
                    if let Some(target) = event
                        .target()
                        .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
                    {
                        let _ = target.release_pointer_capture(event.pointer_id());
                    }
                    drag.set(None);
                }
            }
        })
    };

    let touch_start = {
        let queue = queue.clone();
        let touch = touch.clone();
        Callback::from(move |event: web_sys::TouchEvent| {
            if queue.current().is_none() {
                return;
            }
            let touches = event.touches();
            if let Some(point) = touches.get(0) {
                touch.set(TouchGesture::arm(touches.length(), point.client_x() as f64));
            }
        })
    };

    let touch_end = {
        let queue = queue.clone();
        let touch = touch.clone();
        let expanded = expanded.clone();
        let on_commit = on_commit.clone();
        Callback::from(move |event: web_sys::TouchEvent| {
            let Some(gesture) = *touch else {
                return;
            };
            let Some(point) = event.changed_touches().get(0) else {
                return;
            };
            touch.set(None);
            match gesture.release(point.client_x() as f64) {
                SwipeOutcome::Commit(decision) => on_commit.emit(decision),
                SwipeOutcome::Tap => {
                    if let Some(item) = queue.current() {
                        expanded.set(Some(item.clone()));
                    }
                }
                SwipeOutcome::SnapBack => {}
            }
        })
    };

    let hover_enter = |decision: Decision| {
        let hovered = hovered.clone();
        Callback::from(move |_| hovered.set(Some(decision)))
    };
    let hover_leave = {
        let hovered = hovered.clone();
        Callback::from(move |_| hovered.set(None))
    };
    let zone_commit = |decision: Decision| {
        let on_commit = on_commit.clone();
        Callback::from(move |_| on_commit.emit(decision))
    };

    let departing: Vec<Html> = cards
        .departing()
        .filter_map(|(id, decision)| {
            queue
                .item(id)
                .map(|item| render_departing_card(item, decision, cards))
        })
        .collect();

    let stage = match &current {
        Some(item) => {
            let transform = card_transform(drag_delta, wheel_offset, hint);
            html! {
                <div class="card-swivel" style={transform}>
                    <div key={item.id.clone()} class="photo-card entering">
                        { render_photo_card(item) }
                    </div>
                </div>
            }
        }
        None => html! {
            <div class="done-screen">
                <div class="done-icon">{ "♥" }</div>
                <div class="done-title">{ "All done" }</div>
                <div class="done-subtitle">
                    { format!("You liked {} out of {} references.", queue.liked_count(), queue.len()) }
                </div>
            </div>
        },
    };

    let counter = match &current {
        Some(_) => html! {
            <span class="remaining-counter" aria-live="polite">
                { format!("{} left", queue.remaining()) }
            </span>
        },
        None => html! {},
    };

    let zones = match &current {
        Some(_) => html! {
            <>
                <button
                    type="button"
                    class="hover-zone zone-dislike"
                    aria-label="Dislike"
                    onclick={zone_commit(Decision::Dislike)}
                    onmouseenter={hover_enter(Decision::Dislike)}
                    onmouseleave={hover_leave.clone()}
                />
                <button
                    type="button"
                    class="hover-zone zone-like"
                    aria-label="Like"
                    onclick={zone_commit(Decision::Like)}
                    onmouseenter={hover_enter(Decision::Like)}
                    onmouseleave={hover_leave.clone()}
                />
            </>
        },
        None => html! {},
    };

    let enabled = current.is_some();
    let progress_title = format!("{} / {}", queue.progress(), queue.len());

    let undo_click = {
        let on_undo = on_undo.clone();
        Callback::from(move |_| on_undo.emit(()))
    };
    let gallery_click = {
        let on_open_gallery = on_open_gallery.clone();
        Callback::from(move |_| on_open_gallery.emit(()))
    };

    html! {
        <div class="feed">
            <div class="photo-layer">
                <div
                    ref={photo_area.clone()}
                    class="photo-area"
                    ontouchstart={touch_start}
                    ontouchend={touch_end}
                    onpointerdown={pointer_down}
                    onpointermove={pointer_move}
                    onpointerup={pointer_up}
                    onpointercancel={pointer_cancel}
                >
                    { counter }
                    <div class="card-stage">
                        { for departing.into_iter() }
                        { stage }
                    </div>
                </div>
                <div class={classes!("side-wash", "wash-dislike", (hint == Some(Decision::Dislike)).then_some("visible"))}></div>
                <div class={classes!("side-wash", "wash-like", (hint == Some(Decision::Like)).then_some("visible"))}></div>
                { zones }
                <div class="action-row">
                    { render_action_button(Decision::Dislike, enabled, pressed, hint, on_commit) }
                    { render_action_button(Decision::Like, enabled, pressed, hint, on_commit) }
                </div>
            </div>
            <footer class="footer-menu">
                <button
                    class="menu-button"
                    onclick={undo_click}
                    disabled={!queue.can_undo()}
                    title="Back (Undo)"
                >
                    { "←" }
                </button>
                <div class="menu-button static" title={progress_title}>{ "♥" }</div>
                <button class="menu-button" onclick={gallery_click} title="Gallery">
                    { "▦" }
                </button>
            </footer>
        </div>
    }
}

fn render_departing_card(
    item: &ReviewItem,
    decision: Decision,
    cards: &UseStateHandle<CardFlow>,
) -> Html {
    let exit_class = match decision {
        Decision::Like => "exit-like",
        Decision::Dislike => "exit-dislike",
    };

    let on_start = {
        let cards = cards.clone();
        let id = item.id.clone();
        Callback::from(move |_| {
            let mut next = (*cards).clone();
            if next.begin_exit(&id).is_some() {
                cards.set(next);
            }
        })
    };

    let on_end = {
        let cards = cards.clone();
        let id = item.id.clone();
        Callback::from(move |_| {
            let mut next = (*cards).clone();
            if next.on_animation_complete(&id) {
                log::debug!("{} left the stage", id);
                cards.set(next);
            }
        })
    };

    html! {
        <div
            key={format!("exit-{}", item.id)}
            class={classes!("photo-card", "departing", exit_class)}
            onanimationstart={on_start}
            onanimationend={on_end}
        >
            { render_photo_card(item) }
        </div>
    }
}

fn render_photo_card(item: &ReviewItem) -> Html {
    html! {
        <div class="photo-frame">
            <img
                class="photo-backdrop"
                src={item.url.clone()}
                alt=""
                aria-hidden="true"
                draggable="false"
            />
            <img
                class="photo"
                src={item.url.clone()}
                alt={item.title.clone()}
                draggable="false"
            />
        </div>
    }
}

fn render_action_button(
    decision: Decision,
    enabled: bool,
    pressed: Option<Decision>,
    hint: Option<Decision>,
    on_commit: &Callback<Decision>,
) -> Html {
    let (glyph, side_class, label) = match decision {
        Decision::Dislike => ("✕", "action-dislike", "Dislike"),
        Decision::Like => ("✓", "action-like", "Like"),
    };
    let filled = pressed == Some(decision) || hint == Some(decision);
    let on_click = {
        let on_commit = on_commit.clone();
        Callback::from(move |_| on_commit.emit(decision))
    };

    html! {
        <button
            type="button"
            class={classes!("circle-action", side_class, filled.then_some("filled"))}
            onclick={on_click}
            disabled={!enabled}
            title={label}
        >
            <span class="action-glyph">{ glyph }</span>
        </button>
    }
}

fn render_gallery(queue: &UseStateHandle<DecisionQueue>, on_back: &Callback<()>) -> Html {
    let liked = queue.liked_items();
    let back_click = {
        let on_back = on_back.clone();
        Callback::from(move |_| on_back.emit(()))
    };

    let body = if liked.is_empty() {
        html! {
            <div class="gallery-empty">
                <div class="gallery-empty-icon">{ "♥" }</div>
                <div class="gallery-empty-title">{ "No likes yet" }</div>
                <div class="gallery-empty-hint">{ "Tap ♥ to save references here." }</div>
            </div>
        }
    } else {
        html! {
            <div class="gallery-grid">
                { for liked.iter().rev().map(|item| html! {
                    <figure key={item.id.clone()} class="gallery-tile">
                        <img src={item.url.clone()} alt={item.title.clone()} loading="lazy" />
                        <figcaption>{ &item.title }</figcaption>
                    </figure>
                }) }
            </div>
        }
    };

    html! {
        <section class="gallery">
            <header class="gallery-header">
                <div class="gallery-title">{ "Liked gallery" }</div>
                <div class="gallery-count">{ format!("{} saved", liked.len()) }</div>
            </header>
            <div class="gallery-scroll">{ body }</div>
            <footer class="footer-menu">
                <button class="menu-button" onclick={back_click} title="Back">{ "←" }</button>
                <div class="menu-button static" title={format!("{} / {}", queue.progress(), queue.len())}>
                    { "♥" }
                </div>
                <button class="menu-button" disabled={true} title="Gallery (you are here)">{ "▦" }</button>
            </footer>
        </section>
    }
}

fn render_expanded(item: &ReviewItem, on_close: &Callback<()>) -> Html {
    let stop_click = Callback::from(|event: web_sys::MouseEvent| event.stop_propagation());
    let close_click = {
        let on_close = on_close.clone();
        Callback::from(move |_| on_close.emit(()))
    };

    html! {
        <div
            class="expanded-overlay"
            onclick={close_click.clone()}
            role="dialog"
            aria-modal="true"
            aria-label="Full screen image"
        >
            <button type="button" class="expanded-close" onclick={close_click} aria-label="Close">
                { "✕" }
            </button>
            <div class="expanded-body" onclick={stop_click}>
                <img
                    class="expanded-photo"
                    src={item.url.clone()}
                    alt={item.title.clone()}
                    draggable="false"
                />
            </div>
        </div>
    }
}

async fn hold_loader(started_ms: f64) {
    let elapsed = js_sys::Date::now() - started_ms;
    let remaining = MIN_LOADER_MS - elapsed;
    if remaining > 0.0 {
        TimeoutFuture::new(remaining as u32).await;
    }
}

fn resolve_token() -> Option<String> {
    let location = window()?.location();
    let path = location.pathname().ok()?;
    let query = location.search().ok()?;
    token_from_parts(&path, &query)
}

fn token_from_parts(path: &str, query: &str) -> Option<String> {
    if let Some(rest) = path.strip_prefix("/r/") {
        let link = rest.trim_end_matches('/');
        if !link.is_empty() {
            return Some(link.to_string());
        }
    }

    query
        .trim_start_matches('?')
        .split('&')
        .find_map(|pair| pair.strip_prefix("token="))
        .filter(|link| !link.is_empty())
        .map(|link| link.to_string())
}

fn card_transform(drag_delta: Option<f64>, wheel_offset: f64, hint: Option<Decision>) -> String {
    let (x, rotate, live) = if let Some(delta) = drag_delta {
        (delta, delta * DRAG_ROTATE_SCALE, true)
    } else if wheel_offset != 0.0 {
        (wheel_offset, wheel_offset * DRAG_ROTATE_SCALE, true)
    } else {
        match hint {
            Some(Decision::Like) => (HOVER_SHIFT_PX, HOVER_TILT_DEG, false),
            Some(Decision::Dislike) => (-HOVER_SHIFT_PX, -HOVER_TILT_DEG, false),
            None => (0.0, 0.0, false),
        }
    };

    format!(
        "transform: translateX({:.1}px) rotate({:.2}deg); transition: {};",
        x,
        rotate,
        if live {
            "transform 0s"
        } else {
            "transform 0.75s cubic-bezier(0.16, 1, 0.3, 1)"
        }
    )
}

#[wasm_bindgen(start)]
pub fn run_app() {
    wasm_logger::init(wasm_logger::Config::default());
    console_error_panic_hook::set_once();
    yew::Renderer::<App>::new().render();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn review_link_tokens_come_from_the_path() {
        assert_eq!(
            token_from_parts("/r/abc123", ""),
            Some("abc123".to_string())
        );
        assert_eq!(
            token_from_parts("/r/abc123/", ""),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn query_token_is_the_fallback() {
        assert_eq!(token_from_parts("/", "?token=xyz"), Some("xyz".to_string()));
        assert_eq!(
            token_from_parts("/", "?utm=feed&token=xyz"),
            Some("xyz".to_string())
        );
    }

    #[test]
    fn bare_paths_mean_the_default_feed() {
        assert_eq!(token_from_parts("/", ""), None);
        assert_eq!(token_from_parts("/r/", ""), None);
        assert_eq!(token_from_parts("/", "?token="), None);
    }

    #[test]
    fn dragged_card_follows_the_pointer_without_easing() {
        let style = card_transform(Some(120.0), 0.0, None);
        assert!(style.contains("translateX(120.0px)"));
        assert!(style.contains("rotate(3.60deg)"));
        assert!(style.contains("transform 0s"));
    }

    #[test]
    fn wheel_travel_moves_the_card_between_events() {
        let style = card_transform(None, 24.0, None);
        assert!(style.contains("translateX(24.0px)"));
        assert!(style.contains("transform 0s"));
    }

    #[test]
    fn hover_hint_nudges_the_card_with_easing() {
        let style = card_transform(None, 0.0, Some(Decision::Like));
        assert!(style.contains("translateX(56.0px)"));
        assert!(style.contains("rotate(1.50deg)"));
        assert!(style.contains("0.75s"));

        let resting = card_transform(None, 0.0, None);
        assert!(resting.contains("translateX(0.0px)"));
    }
}
