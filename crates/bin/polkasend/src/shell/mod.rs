//! eframe shell - owns the reducer, the executor, and the frame loop.

mod executor;
mod widgets;

pub use executor::EffectExecutor;

use eframe::egui;
use tokio::sync::mpsc;

use crate::core::{AppCore, Effect, Event};

pub struct PolkasendApp {
    core: AppCore,
    executor: EffectExecutor,
    events: mpsc::UnboundedReceiver<Event>,

    /// Keeps the tokio runtime alive for as long as the window is open.
    _runtime: tokio::runtime::Runtime,
}

impl PolkasendApp {
    pub fn new(
        core: AppCore,
        executor: EffectExecutor,
        events: mpsc::UnboundedReceiver<Event>,
        runtime: tokio::runtime::Runtime,
        initial: Vec<Effect>,
    ) -> Self {
        // vault enumeration happens once at startup; the reducer treats an
        // empty result as "no accounts", not an error
        executor.load_accounts();
        for effect in initial {
            executor.execute(effect);
        }

        Self {
            core,
            executor,
            events,
            _runtime: runtime,
        }
    }

    fn dispatch(&mut self, event: Event) {
        for effect in self.core.update(event) {
            self.executor.execute(effect);
        }
    }
}

impl eframe::App for PolkasendApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // drain async completions before rendering
        while let Ok(event) = self.events.try_recv() {
            self.dispatch(event);
        }

        let view = self.core.view_model();
        let mut pending = Vec::new();

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                widgets::render_page(ui, &view, &mut pending);
            });
        });

        for event in pending {
            self.dispatch(event);
        }

        // completions arrive outside the frame loop, so keep polling
        ctx.request_repaint_after(std::time::Duration::from_millis(200));
    }
}
