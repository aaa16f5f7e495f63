use egui::{Key, Rect, UserData, ViewportCommand};

use crate::catalog::CatalogService;
use crate::command::{Command, Outcome};
use crate::config::AppConfig;
use crate::export::{export_board, export_file_name};
use crate::geometry::DropZones;
use crate::input::{InputCoordinator, InputEvent};
use crate::panels::{header, search_panel, tier_panel};
use crate::state::{KeyValueStore, LocalStore, Preferences, SessionPolicy};
use crate::tier::{resolve_container, ContainerId, PlacementEngine, PlacementId};
use crate::util::time::file_stamp;
use crate::widgets::{show_drag_overlay, ApiKeyModal, ModalAction, TitleEditor};

pub struct TierListApp {
    config: AppConfig,
    pub(crate) engine: PlacementEngine,
    pub(crate) coordinator: InputCoordinator,
    pub(crate) preferences: Preferences,
    pub(crate) catalog: CatalogService,
    /// Drop targets laid out this frame
    pub(crate) zones: DropZones,
    /// Input collected by the panels, dispatched after they are drawn
    pub(crate) events: Vec<InputEvent>,
    pub(crate) search_input: String,
    pub(crate) title_editor: TitleEditor,
    api_key_modal: ApiKeyModal,
    pub(crate) show_api_key_modal: bool,
    /// Container under the pointer during a drag, as of last frame
    pub(crate) hovered_container: Option<ContainerId>,
    /// Screen area captured by the PNG export
    pub(crate) board_rect: Option<Rect>,
    pub(crate) export_pending: bool,
    pub(crate) status: Option<String>,
}

impl TierListApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);
        let config = AppConfig::from_env();
        log::info!(
            "Starting with session policy {:?}, duplicate policy {:?}",
            config.session_policy,
            config.duplicate_policy
        );
        Self::with_stores(config, Box::new(LocalStore::open()), Box::new(LocalStore::open()))
    }

    /// Build the app over explicit stores for the board and the preferences
    pub fn with_stores(
        config: AppConfig,
        board_store: Box<dyn KeyValueStore>,
        preference_store: Box<dyn KeyValueStore>,
    ) -> Self {
        let engine = PlacementEngine::restore(board_store, config.duplicate_policy, config.session_policy);
        let preferences = Preferences::load(
            preference_store,
            config.width_bounds(),
            &config.default_api_key,
        );
        let catalog = CatalogService::new(&config, preferences.api_key());
        let show_api_key_modal = !preferences.has_api_key();

        Self {
            config,
            engine,
            coordinator: InputCoordinator::new(),
            preferences,
            catalog,
            zones: DropZones::new(),
            events: Vec::new(),
            search_input: String::new(),
            title_editor: TitleEditor::default(),
            api_key_modal: ApiKeyModal::default(),
            show_api_key_modal,
            hovered_container: None,
            board_rect: None,
            export_pending: false,
            status: None,
        }
    }

    pub fn engine(&self) -> &PlacementEngine {
        &self.engine
    }

    pub fn coordinator(&self) -> &InputCoordinator {
        &self.coordinator
    }

    /// Route one input event through the coordinator
    pub fn dispatch(&mut self, event: InputEvent) {
        log::trace!("Input: {event:?}");
        if let Some(outcome) = self.coordinator.handle(event, &mut self.engine) {
            self.report(&outcome);
        }
        self.coordinator.prune(&self.engine);
    }

    pub fn remove(&mut self, placement_id: &PlacementId) {
        let outcome = self.engine.execute(Command::Remove {
            placement_id: placement_id.clone(),
        });
        self.report(&outcome);
        self.coordinator.prune(&self.engine);
    }

    pub fn reset(&mut self) {
        let outcome = self.engine.execute(Command::Reset);
        self.report(&outcome);
        self.coordinator.prune(&self.engine);
    }

    /// Ask the backend for a screenshot; the board is cropped out of it when
    /// it arrives.
    pub fn request_export(&mut self, ctx: &egui::Context) {
        if self.board_rect.is_none() {
            self.status = Some("Nothing to export yet".to_owned());
            return;
        }
        self.export_pending = true;
        self.status = Some("Exporting...".to_owned());
        ctx.send_viewport_cmd(ViewportCommand::Screenshot(UserData::default()));
    }

    fn report(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Duplicate => {
                self.status = Some("That movie is already on the board".to_owned());
            }
            Outcome::Reset => self.status = Some("Board cleared".to_owned()),
            outcome if outcome.changed() => self.status = None,
            _ => {}
        }
    }

    fn submit_api_key(&mut self, key: &str) {
        self.preferences.set_api_key(key);
        self.catalog.set_api_key(self.preferences.api_key());
        if !self.search_input.trim().is_empty() {
            self.catalog.set_query(&self.search_input, 0.0);
        }
        self.show_api_key_modal = false;
    }

    /// Dispatch panel events, then follow the pointer for an active drag and
    /// treat leftover clicks as background clicks.
    fn process_input(&mut self, ctx: &egui::Context) {
        let events = std::mem::take(&mut self.events);
        let handled_click = events.iter().any(|event| {
            matches!(
                event,
                InputEvent::SourceClicked(_) | InputEvent::TargetClicked(_)
            )
        });
        for event in events {
            self.dispatch(event);
        }

        let (pointer, released, clicked, escape) = ctx.input(|i| {
            (
                i.pointer.latest_pos(),
                i.pointer.any_released(),
                i.pointer.primary_clicked(),
                i.key_pressed(Key::Escape),
            )
        });

        self.hovered_container = None;
        if self.coordinator.state().is_dragging() {
            let target = pointer.and_then(|pos| self.zones.hit(pos));
            if released {
                self.dispatch(InputEvent::DragReleased(target));
            } else {
                self.hovered_container = target
                    .as_ref()
                    .and_then(|target| resolve_container(self.engine.collection(), target));
                self.dispatch(InputEvent::DragHovered(target));
            }
        } else if clicked && !handled_click {
            self.dispatch(InputEvent::BackgroundClicked);
        }

        if escape && !self.title_editor.is_editing() && !self.coordinator.state().is_idle() {
            self.dispatch(InputEvent::Cancelled);
        }
    }

    fn handle_screenshot(&mut self, ctx: &egui::Context) {
        if !self.export_pending {
            return;
        }
        let image = ctx.input(|i| {
            i.raw.events.iter().find_map(|event| match event {
                egui::Event::Screenshot { image, .. } => Some(image.clone()),
                _ => None,
            })
        });
        let (Some(image), Some(board)) = (image, self.board_rect) else {
            return;
        };
        self.export_pending = false;

        let file_name = export_file_name(self.preferences.title(), &file_stamp());
        match export_board(&image, board, ctx.pixels_per_point(), &file_name) {
            Ok(saved) => {
                log::info!("Exported tier list to {saved}");
                self.status = Some(format!("Saved {saved}"));
            }
            Err(err) => {
                log::error!("Export failed: {err}");
                self.status = Some(format!("Export failed: {err}"));
            }
        }
    }
}

impl eframe::App for TierListApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = ctx.input(|i| i.time);
        self.catalog.update(ctx, now);
        self.handle_screenshot(ctx);

        self.zones.clear();
        header(self, ctx);
        search_panel(self, ctx);
        tier_panel(self, ctx);

        self.process_input(ctx);

        if let Some(preview) = self.coordinator.drag_preview() {
            show_drag_overlay(ctx, preview);
            ctx.request_repaint();
        }

        if self.show_api_key_modal {
            match self.api_key_modal.show(ctx) {
                ModalAction::Submit(key) => self.submit_api_key(&key),
                ModalAction::Close => self.show_api_key_modal = false,
                ModalAction::None => {}
            }
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if self.config.session_policy == SessionPolicy::ClearOnExit {
            log::info!("Clearing the stored tier list on exit");
            self.engine.clear_snapshot();
        }
    }
}
