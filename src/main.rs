//! Spin Party entry point
//!
//! Wires pointer events and the animation frame loop to the spinner on web;
//! natively it plays a scripted round and logs the result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::DVec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlElement, HtmlInputElement, PointerEvent};

    use spin_party::Settings;
    use spin_party::consts::WHEEL_SLOTS;
    use spin_party::feedback::Haptics;
    use spin_party::modes::{GameMode, custom_slices, deal_mode};
    use spin_party::spin::{
        ElementBounds, FrameTicket, Outcome, SliceSet, SpinEvent, Spinner,
    };
    use spin_party::tuning::SpinTuning;

    /// One mounted mini-game
    struct App {
        spinner: Spinner<Haptics>,
        settings: Settings,
        rng: Pcg32,
        /// Rotating element (wheel or bottle)
        target: HtmlElement,
        needle: Option<HtmlElement>,
        /// Pending requestAnimationFrame id
        frame_request: Option<i32>,
    }

    impl App {
        /// Push the current frame to the DOM
        fn apply_frame(&self) {
            let frame = self.spinner.frame();
            let _ = self
                .target
                .style()
                .set_property("transform", &frame.css_transform());
            if let Some(needle) = &self.needle {
                let mut frame = frame;
                frame.needle_tilt = self.settings.effective_needle_tilt(frame.needle_tilt);
                let _ = needle
                    .style()
                    .set_property("transform", &frame.needle_css_transform());
            }
        }

        fn cancel_frame(&mut self) {
            if let Some(id) = self.frame_request.take() {
                if let Some(window) = web_sys::window() {
                    let _ = window.cancel_animation_frame(id);
                }
            }
        }
    }

    fn document() -> Document {
        web_sys::window()
            .and_then(|w| w.document())
            .expect("no document")
    }

    fn html_by_id(id: &str) -> Option<HtmlElement> {
        document()
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }

    fn set_class(id: &str, class: &str) {
        if let Some(el) = document().get_element_by_id(id) {
            let _ = el.set_attribute("class", class);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Spin Party starting...");

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let mut rng = Pcg32::seed_from_u64(seed);
        if !settings.haptics {
            log::info!("Haptics disabled in settings");
        }

        let (target, spinner) = if let Some(wheel) = html_by_id("wheel") {
            let slices = match initial_slices(&settings, &mut rng) {
                Ok(slices) => slices,
                Err(e) => {
                    log::error!("Cannot build wheel: {e}");
                    return;
                }
            };
            render_slices(&wheel, &slices);
            let spinner = Spinner::wheel(SpinTuning::wheel(), slices, Haptics::new());
            (wheel, spinner)
        } else if let Some(bottle) = html_by_id("bottle") {
            (bottle, Spinner::bottle(SpinTuning::bottle(), Haptics::new()))
        } else {
            log::warn!("No #wheel or #bottle element - nothing to mount");
            return;
        };

        let mut spinner = match spinner {
            Ok(spinner) => spinner,
            Err(e) => {
                log::error!("Spinner rejected: {e}");
                return;
            }
        };
        spinner.set_haptics(settings.haptics);

        let app = Rc::new(RefCell::new(App {
            spinner,
            settings,
            rng,
            target: target.clone(),
            needle: html_by_id("needle"),
            frame_request: None,
        }));
        app.borrow().apply_frame();

        setup_pointer_handlers(&target, app.clone());
        setup_buttons(app.clone());
        setup_unmount(app);

        log::info!("Spin Party running (seed {seed})");
    }

    fn initial_slices(settings: &Settings, rng: &mut Pcg32) -> Result<SliceSet, spin_party::SpinError> {
        match settings.last_mode {
            GameMode::Custom => custom_slices(&settings.custom_entries, rng)
                .or_else(|e| {
                    log::warn!("Stored custom wheel unusable ({e}), falling back to Fun");
                    deal_mode(GameMode::Fun, rng)
                }),
            mode => deal_mode(mode, rng),
        }
    }

    /// Paint the wheel as a conic gradient with one rotated label per slice
    fn render_slices(wheel: &HtmlElement, slices: &SliceSet) {
        let width = slices.slice_width();
        // stops are relative to `from`, which puts slice 0 centered at the top
        let stops: Vec<String> = slices
            .iter()
            .enumerate()
            .map(|(i, slice)| {
                let start = i as f64 * width;
                format!("{} {}deg {}deg", slice.fill_color, start, start + width)
            })
            .collect();
        let gradient = format!("conic-gradient(from {}deg, {})", -width / 2.0, stops.join(", "));
        let _ = wheel.style().set_property("background", &gradient);

        wheel.set_inner_html("");
        let document = document();
        for (i, slice) in slices.iter().enumerate() {
            let Ok(label) = document.create_element("div") else {
                continue;
            };
            label.set_text_content(Some(&slice.label));
            let _ = label.set_attribute("class", "slice-label");
            let _ = label.set_attribute(
                "style",
                &format!(
                    "color: {}; transform: rotate({}deg) translateY(-32%);",
                    slice.text_color,
                    slices.center_of(i)
                ),
            );
            let _ = wheel.append_child(&label);
        }
    }

    fn element_bounds(el: &HtmlElement) -> Option<ElementBounds> {
        let rect = el.get_bounding_client_rect();
        match ElementBounds::new(rect.left(), rect.top(), rect.width(), rect.height()) {
            Ok(bounds) => Some(bounds),
            Err(e) => {
                log::warn!("Ignoring drag: {e}");
                None
            }
        }
    }

    fn pointer_pos(event: &PointerEvent) -> DVec2 {
        DVec2::new(event.client_x() as f64, event.client_y() as f64)
    }

    fn setup_pointer_handlers(target: &HtmlElement, app: Rc<RefCell<App>>) {
        // Pointer down - grab the element, cancel any coast
        {
            let app = app.clone();
            let target_clone = target.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                let Some(bounds) = element_bounds(&target_clone) else {
                    return;
                };
                let _ = target_clone.set_pointer_capture(event.pointer_id());
                let mut a = app.borrow_mut();
                a.cancel_frame();
                a.spinner
                    .pointer_down(pointer_pos(&event), event.time_stamp(), bounds);
                set_class("result", "hidden");
                set_class("hint", "hidden");
                a.apply_frame();
            });
            let _ = target
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer move
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut a = app.borrow_mut();
                if a.spinner.pointer_move(pointer_pos(&event), event.time_stamp()) != 0.0 {
                    a.apply_frame();
                }
            });
            let _ = target
                .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Release - up, leave and cancel all end the drag
        for name in ["pointerup", "pointerleave", "pointercancel"] {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                let event = app.borrow_mut().spinner.pointer_up();
                handle_event(&app, event);
            });
            let _ = target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// React to a release/launch/settle
    fn handle_event(app: &Rc<RefCell<App>>, event: Option<SpinEvent>) {
        match event {
            Some(SpinEvent::Released { velocity }) => {
                log::info!("Spinning at {velocity:.1}°/frame");
                set_class("status", "spinning");
                let ticket = app.borrow().spinner.frame_ticket();
                if let Some(ticket) = ticket {
                    request_frame(app.clone(), ticket);
                }
            }
            Some(SpinEvent::Settled(outcome)) => {
                app.borrow().apply_frame();
                set_class("status", "");
                let delay = app.borrow().spinner.reveal_delay_ms();
                if delay == 0 {
                    show_result(&outcome);
                } else {
                    reveal_after(app.clone(), outcome, delay);
                }
            }
            Some(SpinEvent::DragStarted) | Some(SpinEvent::Reset) | None => {}
        }
    }

    fn request_frame(app: Rc<RefCell<App>>, ticket: FrameTicket) {
        let Some(window) = web_sys::window() else { return };
        let app_clone = app.clone();
        let closure = Closure::once(move |_time: f64| {
            frame_loop(app_clone, ticket);
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(id) => app.borrow_mut().frame_request = Some(id),
            Err(e) => log::warn!("requestAnimationFrame failed: {e:?}"),
        }
        closure.forget();
    }

    fn frame_loop(app: Rc<RefCell<App>>, ticket: FrameTicket) {
        let event = {
            let mut a = app.borrow_mut();
            a.frame_request = None;
            if !a.spinner.should_continue(ticket) {
                return;
            }
            let event = a.spinner.tick(ticket);
            a.apply_frame();
            event
        };

        if event.is_some() {
            handle_event(&app, event);
        } else {
            request_frame(app, ticket);
        }
    }

    fn reveal_after(app: Rc<RefCell<App>>, outcome: Outcome, delay_ms: u32) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move || {
            // a new drag may have replaced this result in the meantime
            if app.borrow().spinner.outcome() != Some(&outcome) {
                return;
            }
            show_result(&outcome);
        });
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            delay_ms as i32,
        );
        closure.forget();
    }

    fn show_result(outcome: &Outcome) {
        let text = match outcome {
            Outcome::Slice { slice, .. } => slice.label.clone(),
            Outcome::FreeAngle(angle) => format!("{angle:.0}°"),
        };
        if let Some(el) = document().get_element_by_id("result-label") {
            el.set_text_content(Some(&text));
        }
        set_class("result", "");
    }

    fn on_click(id: &str, handler: impl FnMut(web_sys::MouseEvent) + 'static) {
        let Some(btn) = document().get_element_by_id(id) else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(handler);
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(app: Rc<RefCell<App>>) {
        // Dismiss result
        {
            let app = app.clone();
            on_click("result-dismiss", move |_| {
                app.borrow_mut().spinner.reset();
                set_class("result", "hidden");
            });
        }

        // Bottle spin button
        {
            let app = app.clone();
            on_click("spin-btn", move |_| {
                let event = {
                    let mut a = app.borrow_mut();
                    // the running spin owns the frame loop
                    if a.spinner.phase().is_busy() {
                        return;
                    }
                    a.cancel_frame();
                    let App { spinner, rng, .. } = &mut *a;
                    spinner.launch_random(rng)
                };
                set_class("result", "hidden");
                handle_event(&app, event);
            });
        }

        // Preset modes
        for mode in [GameMode::Fun, GameMode::Hot, GameMode::Hard] {
            let app = app.clone();
            let id = format!("mode-{}", mode.as_str().to_lowercase());
            on_click(&id, move |_| {
                let mut a = app.borrow_mut();
                let slices = match deal_mode(mode, &mut a.rng) {
                    Ok(slices) => slices,
                    Err(e) => {
                        log::error!("Cannot deal {} mode: {e}", mode.as_str());
                        return;
                    }
                };
                switch_slices(&mut a, slices, mode);
            });
        }

        // Custom mode
        on_click("mode-custom-save", move |_| {
            let entries: Vec<String> = (0..WHEEL_SLOTS)
                .map(|i| {
                    document()
                        .get_element_by_id(&format!("custom-entry-{i}"))
                        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                        .map(|input| input.value())
                        .unwrap_or_default()
                })
                .collect();

            let mut a = app.borrow_mut();
            for (i, text) in entries.iter().enumerate() {
                a.settings.set_custom_entry(i, text);
            }
            match custom_slices(&entries, &mut a.rng) {
                Ok(slices) => switch_slices(&mut a, slices, GameMode::Custom),
                Err(e) => {
                    log::warn!("Custom wheel rejected: {e}");
                    if let Some(el) = document().get_element_by_id("custom-error") {
                        el.set_text_content(Some(&e.to_string()));
                    }
                }
            }
        });
    }

    fn switch_slices(app: &mut App, slices: SliceSet, mode: GameMode) {
        app.cancel_frame();
        render_slices(&app.target, &slices);
        app.spinner.set_slices(slices);
        app.settings.last_mode = mode;
        app.settings.save();
        app.apply_frame();
        set_class("result", "hidden");
        set_class("mode-select", "hidden");
    }

    /// Leaving the page must not leave a frame callback behind
    fn setup_unmount(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut a = app.borrow_mut();
            a.cancel_frame();
            a.spinner.reset();
            log::info!("Unmounted");
        });
        let _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Spin Party (native) starting...");
    log::info!("Native mode has no display - run with `trunk serve` for the web version");

    if let Err(e) = demo_round() {
        log::error!("Demo round failed: {e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted wheel flick and bottle launch
#[cfg(not(target_arch = "wasm32"))]
fn demo_round() -> Result<(), spin_party::SpinError> {
    use glam::DVec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use spin_party::feedback::Haptics;
    use spin_party::modes::{GameMode, deal_mode};
    use spin_party::spin::{ElementBounds, Outcome, SpinEvent, Spinner};
    use spin_party::tuning::SpinTuning;

    let mut rng = Pcg32::seed_from_u64(2025);
    let slices = deal_mode(GameMode::Fun, &mut rng)?;
    let mut wheel = Spinner::wheel(SpinTuning::wheel(), slices, Haptics::new())?;

    let bounds = ElementBounds::new(0.0, 0.0, 320.0, 320.0)?;
    let center = bounds.center();
    let at = |deg: f64| {
        let rad = (deg - 90.0_f64).to_radians();
        center + DVec2::new(rad.cos(), rad.sin()) * 120.0
    };

    wheel.pointer_down(at(0.0), 0.0, bounds);
    for (i, deg) in [8.0, 20.0, 36.0].into_iter().enumerate() {
        wheel.pointer_move(at(deg), (i + 1) as f64 * 16.0);
    }
    let mut frames = 0u32;
    if let Some(SpinEvent::Released { velocity }) = wheel.pointer_up() {
        println!("Wheel released at {velocity:.1}°/frame");
        if let Some(ticket) = wheel.frame_ticket() {
            while wheel.should_continue(ticket) {
                wheel.tick(ticket);
                frames += 1;
            }
        }
    }
    if let Some(Outcome::Slice { index, slice }) = wheel.outcome() {
        println!("Wheel settled after {frames} frames on #{index}: {}", slice.label);
    }

    let mut bottle = Spinner::bottle(SpinTuning::bottle(), Haptics::new())?;
    bottle.launch_random(&mut rng);
    if let Some(ticket) = bottle.frame_ticket() {
        while bottle.should_continue(ticket) {
            bottle.tick(ticket);
        }
    }
    if let Some(Outcome::FreeAngle(angle)) = bottle.outcome() {
        println!("Bottle points at {angle:.0}°");
    }
    Ok(())
}
