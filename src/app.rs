//! Wheel controller
//!
//! Owns the engine, the store, and the presenter, and turns user and
//! renderer events into state transitions. Every rejected action is a
//! logged no-op; nothing here returns an error to the caller.

use crate::persistence::{KeyValueStore, load_options, save_options};
use crate::renderer::{Presenter, WheelGeometry};
use crate::settings::Settings;
use crate::wheel::{BatchReport, FrameCommand, SelectionOutcome, WheelState};

pub struct WheelApp<S: KeyValueStore, P: Presenter> {
    state: WheelState,
    settings: Settings,
    store: S,
    presenter: P,
    geometry: WheelGeometry,
}

impl<S: KeyValueStore, P: Presenter> WheelApp<S, P> {
    /// Load options and settings from `store` and draw the initial wheel
    pub fn new(store: S, mut presenter: P, seed: u64) -> Self {
        let settings = Settings::load(&store);
        let options = load_options(&store);
        let mut state = WheelState::new(options, seed);
        state.apply_settings(&settings);
        presenter.apply_settings(&settings);

        let geometry = WheelGeometry::compute(
            state.segments().len(),
            presenter.measure(),
            settings.reference_offset_deg as f32,
        );

        let mut app = Self {
            state,
            settings,
            store,
            presenter,
            geometry,
        };
        app.redraw();
        app
    }

    pub fn state(&self) -> &WheelState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn geometry(&self) -> &WheelGeometry {
        &self.geometry
    }

    fn redraw(&mut self) {
        self.presenter
            .render_segments(self.state.segments(), &self.geometry);
        self.presenter.render_view(&self.state.view());
    }

    fn relayout(&mut self) {
        self.geometry = WheelGeometry::compute(
            self.state.segments().len(),
            self.presenter.measure(),
            self.settings.reference_offset_deg as f32,
        );
        self.redraw();
    }

    fn options_changed(&mut self) {
        save_options(&mut self.store, self.state.options());
        self.relayout();
    }

    /// Re-measure after the container changed size
    pub fn resize(&mut self) {
        self.relayout();
    }

    pub fn add_option(&mut self, label: &str) -> bool {
        match self.state.add_option(label) {
            Ok(()) => {
                self.options_changed();
                true
            }
            Err(e) => {
                log::debug!("Add rejected: {}", e);
                false
            }
        }
    }

    /// Add one option per line of `text`
    pub fn add_batch(&mut self, text: &str) -> BatchReport {
        match self.state.add_batch(text) {
            Ok(report) => {
                if !report.added.is_empty() {
                    self.options_changed();
                }
                log::info!(
                    "Added {} options ({} duplicates skipped)",
                    report.added.len(),
                    report.duplicates
                );
                report
            }
            Err(e) => {
                log::debug!("Batch rejected: {}", e);
                BatchReport::default()
            }
        }
    }

    pub fn remove_option(&mut self, index: usize) -> bool {
        let had_outcome = self.state.outcome().is_some();
        match self.state.remove_option(index) {
            Ok(label) => {
                log::info!("Removed option \"{}\"", label);
                self.options_changed();
                if had_outcome && self.state.outcome().is_none() {
                    self.presenter.announce(None);
                }
                true
            }
            Err(e) => {
                log::debug!("Remove rejected: {}", e);
                false
            }
        }
    }

    /// Start a spin. When this returns `true` the caller must drive
    /// `on_frame` from its animation-frame loop until it returns `false`.
    pub fn spin(&mut self, now_ms: f64) -> bool {
        if !self.state.request_spin(now_ms) {
            return false;
        }
        self.presenter.announce(None);
        self.presenter.render_view(&self.state.view());
        true
    }

    /// Animation-frame callback. Returns whether another frame is needed.
    pub fn on_frame(&mut self) -> bool {
        match self.state.advance_frame() {
            Some(FrameCommand::Snap { .. }) => {
                self.presenter.render_view(&self.state.view());
                true
            }
            Some(FrameCommand::Animate { .. }) => {
                self.presenter.render_view(&self.state.view());
                false
            }
            None => false,
        }
    }

    /// Renderer reports the rotation transition finished
    pub fn on_animation_end(&mut self, now_ms: f64) -> Option<SelectionOutcome> {
        let outcome = self.state.finish_animation(now_ms)?;
        self.presenter.render_view(&self.state.view());
        self.presenter.announce(Some(&outcome));
        Some(outcome)
    }

    pub fn reset(&mut self) -> bool {
        if !self.state.reset() {
            return false;
        }
        self.presenter.render_view(&self.state.view());
        self.presenter.announce(None);
        true
    }

    /// Replace settings, persist them, and apply to the next spin
    pub fn update_settings(&mut self, settings: Settings) {
        self.settings = settings.validated();
        self.settings.save(&mut self.store);
        self.state.apply_settings(&self.settings);
        self.presenter.apply_settings(&self.settings);
        self.relayout();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::OPTIONS_STORAGE_KEY;
    use crate::persistence::MemoryStore;
    use crate::renderer::LogPresenter;
    use crate::wheel::OptionList;

    fn app() -> WheelApp<MemoryStore, LogPresenter> {
        WheelApp::new(MemoryStore::default(), LogPresenter::with_diameter(400.0), 777)
    }

    fn stored_options(app: &WheelApp<MemoryStore, LogPresenter>) -> Option<String> {
        app.store().get(OPTIONS_STORAGE_KEY).unwrap()
    }

    #[test]
    fn test_startup_uses_defaults_and_draws() {
        let app = app();
        assert_eq!(app.state().options(), &OptionList::defaults());
        assert_eq!(app.presenter().segment_labels.len(), 6);
        assert_eq!(app.geometry().labels.len(), 6);
        assert!(app.presenter().last_view.unwrap().can_spin);
    }

    #[test]
    fn test_startup_reads_store() {
        let mut store = MemoryStore::default();
        store.set(OPTIONS_STORAGE_KEY, r#"["Ramen","Pho","Udon"]"#).unwrap();
        let app = WheelApp::new(store, LogPresenter::default(), 1);
        assert_eq!(app.state().options().as_slice(), ["Ramen", "Pho", "Udon"]);
        // Unmeasured presenter gives zero geometry
        assert_eq!(app.geometry().radius, 0.0);
    }

    #[test]
    fn test_add_persists() {
        let mut app = app();
        assert!(app.add_option("Ramen"));
        assert!(stored_options(&app).unwrap().ends_with(r#""Ramen"]"#));
        assert_eq!(app.presenter().segment_labels.len(), 7);
    }

    #[test]
    fn test_duplicate_add_is_noop() {
        let mut app = app();
        assert!(!app.add_option("pizza"));
        assert_eq!(app.state().options().len(), 6);
        assert!(stored_options(&app).is_none(), "nothing changed, nothing saved");
    }

    #[test]
    fn test_add_batch() {
        let mut app = app();
        let report = app.add_batch("Ramen\nsushi\n\nPho");
        assert_eq!(report.added, ["Ramen", "Pho"]);
        assert_eq!(report.duplicates, 1);
        assert_eq!(app.state().options().len(), 8);
    }

    #[test]
    fn test_full_spin_cycle() {
        let mut app = app();
        assert!(app.spin(1000.0));
        assert_eq!(app.presenter().current_announcement(), None);
        assert!(app.presenter().last_view.unwrap().spinning);
        assert!(!app.presenter().last_view.unwrap().can_spin);

        // Snap frame: no transition
        assert!(app.on_frame());
        let view = app.presenter().last_view.unwrap();
        assert!(!view.animate);
        assert!((0.0..360.0).contains(&view.rotation));

        // Target frame: animated
        assert!(!app.on_frame());
        assert!(app.presenter().last_view.unwrap().animate);
        assert_eq!(app.presenter().current_announcement(), None);

        let outcome = app.on_animation_end(5600.0).unwrap();
        assert_eq!(
            app.presenter().current_announcement(),
            Some(format!("Winner: {}", outcome.label).as_str())
        );
        let view = app.presenter().last_view.unwrap();
        assert!(!view.spinning && view.can_spin);
    }

    #[test]
    fn test_mutations_rejected_while_spinning() {
        let mut app = app();
        app.spin(0.0);
        assert!(!app.spin(1.0));
        assert!(!app.add_option("Ramen"));
        assert!(app.add_batch("Ramen").added.is_empty());
        assert!(!app.remove_option(0));
        assert!(!app.reset());
        assert_eq!(app.state().options().len(), 6);
        assert!(stored_options(&app).is_none());
    }

    #[test]
    fn test_single_option_spin_is_noop() {
        let mut store = MemoryStore::default();
        store.set(OPTIONS_STORAGE_KEY, r#"["Only"]"#).unwrap();
        let mut app = WheelApp::new(store, LogPresenter::with_diameter(300.0), 3);
        assert!(!app.spin(0.0));
        assert!(!app.on_frame());
        assert_eq!(app.state().rotation(), 0.0);
        assert!(!app.state().is_spinning());
    }

    #[test]
    fn test_reset_clears_rotation_and_winner() {
        let mut app = app();
        app.spin(0.0);
        app.on_frame();
        app.on_frame();
        app.on_animation_end(1.0);

        assert!(app.reset());
        assert_eq!(app.state().rotation(), 0.0);
        assert!(app.state().outcome().is_none());
        assert_eq!(app.presenter().current_announcement(), None);
    }

    #[test]
    fn test_remove_persists() {
        let mut app = app();
        assert!(app.remove_option(0));
        assert!(stored_options(&app).unwrap().starts_with(r#"["Burgare""#));
        assert!(!app.remove_option(42));
    }

    fn finished_app() -> (WheelApp<MemoryStore, LogPresenter>, SelectionOutcome) {
        let mut app = app();
        app.spin(0.0);
        app.on_frame();
        app.on_frame();
        let outcome = app.on_animation_end(5000.0).unwrap();
        (app, outcome)
    }

    #[test]
    fn test_relayout_does_not_republish_winner() {
        let (mut app, _) = finished_app();
        let published = app.presenter().announcements.len();

        app.resize();
        assert!(app.add_option("Ramen"));
        app.update_settings(Settings::default());
        assert_eq!(app.presenter().announcements.len(), published);
        assert!(app.state().outcome().is_some());
    }

    #[test]
    fn test_removing_winner_clears_announcement() {
        let (mut app, outcome) = finished_app();
        let published = app.presenter().announcements.len();

        // Some other option first: winner stays, nothing republished
        let other = if outcome.index == 0 { 1 } else { 0 };
        assert!(app.remove_option(other));
        assert_eq!(app.presenter().announcements.len(), published);

        let winner = app.state().outcome().unwrap().index;
        assert!(app.remove_option(winner));
        assert_eq!(app.presenter().announcements.len(), published + 1);
        assert_eq!(app.presenter().current_announcement(), None);
    }

    #[test]
    fn test_update_settings() {
        let mut app = app();
        let settings = Settings {
            extra_turns_min: 1,
            extra_turns_max: 1,
            ..Settings::default()
        };
        app.update_settings(settings.clone());
        assert_eq!(app.settings(), &settings);
        assert_eq!(Settings::load(app.store()), settings);

        app.spin(0.0);
        assert_eq!(app.state().session().unwrap().extra_turns, 1);
    }

    #[test]
    fn test_resize_relayouts() {
        let mut app = app();
        app.presenter_mut().diameter = 200.0;
        app.resize();
        assert_eq!(app.geometry().radius, 100.0);
    }
}
