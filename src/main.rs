//! Spin Wheel entry point
//!
//! Handles platform-specific initialization and wires DOM events to the
//! wheel controller.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlElement, HtmlInputElement, HtmlTextAreaElement, KeyboardEvent, MouseEvent};

    use spin_wheel::WheelApp;
    use spin_wheel::persistence::{KeyValueStore, LocalStorage, MemoryStore, StorageError};
    use spin_wheel::platform::{now_ms, time_seed};
    use spin_wheel::renderer::DomPresenter;
    use spin_wheel::settings::Settings;

    /// LocalStorage when the browser allows it, memory otherwise
    enum BrowserStore {
        Local(LocalStorage),
        Memory(MemoryStore),
    }

    impl KeyValueStore for BrowserStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            match self {
                BrowserStore::Local(s) => s.get(key),
                BrowserStore::Memory(s) => s.get(key),
            }
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            match self {
                BrowserStore::Local(s) => s.set(key, value),
                BrowserStore::Memory(s) => s.set(key, value),
            }
        }

        fn remove(&mut self, key: &str) -> Result<(), StorageError> {
            match self {
                BrowserStore::Local(s) => s.remove(key),
                BrowserStore::Memory(s) => s.remove(key),
            }
        }
    }

    type App = WheelApp<BrowserStore, DomPresenter>;

    pub fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger init failed: {}", e).into());
        }

        log::info!("Spin Wheel starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let wheel: HtmlElement = document
            .get_element_by_id("wheel")
            .expect("no #wheel element")
            .dyn_into()
            .expect("#wheel is not an HTML element");

        let store = match LocalStorage::open() {
            Ok(local) => BrowserStore::Local(local),
            Err(e) => {
                log::warn!("{}; options will not survive a reload", e);
                BrowserStore::Memory(MemoryStore::default())
            }
        };

        let settings = Settings::load(&store);
        let presenter = DomPresenter::new(
            document.clone(),
            wheel.clone(),
            settings.effective_duration_ms(),
            settings.reference_offset_deg,
        );

        let seed = time_seed();
        let app = Rc::new(RefCell::new(WheelApp::new(store, presenter, seed)));
        log::info!("Wheel initialized with seed: {}", seed);

        // Follow the OS reduced-motion preference unless already set
        let prefers_reduced = window
            .match_media("(prefers-reduced-motion: reduce)")
            .ok()
            .flatten()
            .is_some_and(|mq| mq.matches());
        if prefers_reduced && !settings.reduced_motion {
            let mut a = app.borrow_mut();
            let updated = Settings {
                reduced_motion: true,
                ..a.settings().clone()
            };
            a.update_settings(updated);
            log::info!("Reduced motion enabled from system preference");
        }

        setup_spin_controls(app.clone());
        setup_option_controls(app.clone());
        setup_animation_end(&wheel, app.clone());
        setup_resize(app);

        log::info!("Spin Wheel running!");
    }

    fn on_click<F>(id: &str, mut handler: F)
    where
        F: FnMut(MouseEvent) + 'static,
    {
        let document = web_sys::window().unwrap().document().unwrap();
        if let Some(el) = document.get_element_by_id(id) {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| handler(event));
            let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        } else {
            log::warn!("Missing #{} element", id);
        }
    }

    fn start_spin(app: &Rc<RefCell<App>>) {
        let started = app.borrow_mut().spin(now_ms());
        if started {
            request_animation_frame(app.clone());
        }
    }

    fn setup_spin_controls(app: Rc<RefCell<App>>) {
        {
            let app = app.clone();
            on_click("spin-btn", move |_| start_spin(&app));
        }

        // "Spin again" in the winner panel is just another spin request
        {
            let app = app.clone();
            on_click("spin-again-btn", move |_| start_spin(&app));
        }

        {
            let app = app.clone();
            on_click("reset-btn", move |_| {
                app.borrow_mut().reset();
            });
        }

        on_click("winner-close-btn", |_| {
            if let Some(panel) = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id("winner-panel"))
            {
                let _ = panel.set_attribute("class", "hidden");
            }
        });

        // Keyboard: Ctrl/Cmd+Enter spins, except inside the batch textarea
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let in_textarea = event
                .target()
                .and_then(|t| t.dyn_into::<HtmlTextAreaElement>().ok())
                .is_some();
            if (event.ctrl_key() || event.meta_key()) && event.key() == "Enter" && !in_textarea {
                event.prevent_default();
                start_spin(&app);
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_option_controls(app: Rc<RefCell<App>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        // Single option input: button or Enter
        let input: Option<HtmlInputElement> = document
            .get_element_by_id("option-input")
            .and_then(|el| el.dyn_into().ok());
        if let Some(input) = input {
            {
                let app = app.clone();
                let input = input.clone();
                on_click("add-btn", move |_| {
                    if app.borrow_mut().add_option(&input.value()) {
                        input.set_value("");
                    }
                });
            }
            {
                let app = app.clone();
                let input_clone = input.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                    if event.key() == "Enter" && app.borrow_mut().add_option(&input_clone.value()) {
                        input_clone.set_value("");
                    }
                });
                let _ = input.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        // Batch textarea: one option per line
        let batch: Option<HtmlTextAreaElement> = document
            .get_element_by_id("batch-input")
            .and_then(|el| el.dyn_into().ok());
        if let Some(batch) = batch {
            let app = app.clone();
            on_click("batch-add-btn", move |_| {
                let report = app.borrow_mut().add_batch(&batch.value());
                if !report.added.is_empty() || report.duplicates > 0 {
                    batch.set_value("");
                }
            });
        }

        // Remove buttons are re-rendered with the list, so listen on the list
        if let Some(list) = document.get_element_by_id("option-list") {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let index = event
                    .target()
                    .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
                    .and_then(|el| el.get_attribute("data-index"))
                    .and_then(|i| i.parse::<usize>().ok());
                if let Some(index) = index {
                    app.borrow_mut().remove_option(index);
                }
            });
            let _ = list.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_animation_end(wheel: &HtmlElement, app: Rc<RefCell<App>>) {
        let wheel_clone = wheel.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::TransitionEvent| {
            // Ignore transitions bubbling up from labels
            let from_wheel = event
                .target()
                .and_then(|t| t.dyn_into::<HtmlElement>().ok())
                .is_some_and(|el| el == wheel_clone);
            if from_wheel && event.property_name() == "transform" {
                app.borrow_mut().on_animation_end(now_ms());
            }
        });
        let _ = wheel.add_event_listener_with_callback("transitionend", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            app.borrow_mut().resize();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Drive the spin's frame sequence: one callback per frame until the
    /// controller stops asking for more
    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            let more = app.borrow_mut().on_frame();
            if more {
                request_animation_frame(app);
            }
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
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
    use spin_wheel::WheelApp;
    use spin_wheel::persistence::{MemoryStore, save_json};
    use spin_wheel::platform::{now_ms, time_seed};
    use spin_wheel::renderer::LogPresenter;

    env_logger::init();
    log::info!("Spin Wheel (native) starting...");
    log::info!("The browser build is the real UI - run with `trunk serve`");

    // Options from the command line, else the default list
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut store = MemoryStore::default();
    if !args.is_empty() {
        if let Err(e) = save_json(&mut store, spin_wheel::consts::OPTIONS_STORAGE_KEY, &args) {
            log::warn!("Could not seed options: {}", e);
        }
    }

    let mut app = WheelApp::new(store, LogPresenter::with_diameter(520.0), time_seed());
    if !app.spin(now_ms()) {
        println!("Need at least two distinct options to spin.");
        return;
    }
    while app.on_frame() {}

    // No real transition natively: report it finished right away
    match app.on_animation_end(now_ms()) {
        Some(outcome) => println!("{}", outcome.announcement()),
        None => println!("Spin did not complete."),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
