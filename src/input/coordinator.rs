//! Arbitrates between pointer drags and click-to-place.
//!
//! Only one modality can be armed at a time, which the state enum makes
//! structural:
//!
//! ```text
//!              DragStarted                  SourceClicked
//!   ┌──────────┐ ───────────► ┌──────────┐         ┌──────────────────┐
//!   │          │              │          │ ◄────── │                  │
//!   │   Idle   │ ◄─────────── │ Dragging │ Drag-   │ PendingClick-    │
//!   │          │ DragReleased │          │ Started │ Placement        │
//!   │          │ ──────────────────────────────────►                  │
//!   │          │ ◄──────────────────────────────── │                  │
//!   └──────────┘  TargetClicked / Background /     └──────────────────┘
//!                 same source again
//! ```
//!
//! Every placement resolves its target through the container resolver
//! first; an unresolvable target aborts without touching the engine.
use super::{DragPreview, DragSource, InputEvent};
use crate::command::{Command, Outcome};
use crate::tier::resolver::target_index;
use crate::tier::{resolve_container, PlacementEngine, Target};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    /// A pointer drag is in progress
    Dragging {
        origin: DragSource,
        preview: DragPreview,
    },
    /// A source was clicked and waits for a container click
    PendingClickPlacement { source: DragSource },
}

impl InteractionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    pub fn is_pending_click(&self) -> bool {
        matches!(self, Self::PendingClickPlacement { .. })
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Dragging { .. } => "Dragging",
            Self::PendingClickPlacement { .. } => "PendingClickPlacement",
        }
    }
}

#[derive(Debug, Default)]
pub struct InputCoordinator {
    state: InteractionState,
}

impl InputCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// Source armed for click placement, if any
    pub fn pending_source(&self) -> Option<&DragSource> {
        match &self.state {
            InteractionState::PendingClickPlacement { source } => Some(source),
            _ => None,
        }
    }

    pub fn drag_origin(&self) -> Option<&DragSource> {
        match &self.state {
            InteractionState::Dragging { origin, .. } => Some(origin),
            _ => None,
        }
    }

    pub fn drag_preview(&self) -> Option<&DragPreview> {
        match &self.state {
            InteractionState::Dragging { preview, .. } => Some(preview),
            _ => None,
        }
    }

    /// True when `source` is the armed click selection
    pub fn is_selected(&self, source: &DragSource) -> bool {
        self.pending_source()
            .is_some_and(|pending| pending.same_entity(source))
    }

    /// Drop back to idle when the armed tile has left the board (removed or
    /// reset from elsewhere)
    pub fn prune(&mut self, engine: &PlacementEngine) {
        let armed = match &self.state {
            InteractionState::Idle => return,
            InteractionState::Dragging { origin, .. } => origin,
            InteractionState::PendingClickPlacement { source } => source,
        };
        if !armed.is_present(engine.collection()) {
            self.transition(InteractionState::Idle);
        }
    }

    /// Feed one event. Returns the engine outcome when a placement was
    /// attempted.
    pub fn handle(&mut self, event: InputEvent, engine: &mut PlacementEngine) -> Option<Outcome> {
        match event {
            InputEvent::DragStarted(source) => {
                self.start_drag(source, engine);
                None
            }
            InputEvent::DragHovered(target) => self.hover(target?, engine),
            InputEvent::DragReleased(target) => self.release(target, engine),
            InputEvent::SourceClicked(source) => {
                self.select(source, engine);
                None
            }
            InputEvent::TargetClicked(target) => self.place_pending(&target, engine),
            InputEvent::BackgroundClicked => {
                if self.state.is_pending_click() {
                    self.transition(InteractionState::Idle);
                }
                None
            }
            InputEvent::Cancelled => {
                self.transition(InteractionState::Idle);
                None
            }
        }
    }

    fn start_drag(&mut self, source: DragSource, engine: &PlacementEngine) {
        // A pending click selection is disarmed before the drag is set up
        if self.state.is_pending_click() {
            self.transition(InteractionState::Idle);
        }
        match DragPreview::for_source(&source, engine.collection()) {
            Some(preview) => self.transition(InteractionState::Dragging {
                origin: source,
                preview,
            }),
            None => self.transition(InteractionState::Idle),
        }
    }

    /// Live re-parenting: crossing into another container moves the dragged
    /// entity to the end of that container right away
    fn hover(&mut self, target: Target, engine: &mut PlacementEngine) -> Option<Outcome> {
        let InteractionState::Dragging { origin, .. } = &mut self.state else {
            return None;
        };
        let hovered = resolve_container(engine.collection(), &target)?;
        let end = engine.collection().container(&hovered)?.len();

        let item = match origin {
            DragSource::Placed(placement_id) => {
                let (current, _, _) = engine.collection().find(placement_id)?;
                if current == &hovered {
                    return None;
                }
                return Some(engine.execute(Command::Move {
                    placement_id: placement_id.clone(),
                    container: hovered,
                    index: end,
                }));
            }
            DragSource::Search(item) => item.clone(),
        };

        let outcome = engine.execute(Command::Add {
            item,
            container: hovered,
            index: end,
        });
        // From here on the drag carries the placed tile
        if let Outcome::Added(placement_id) = &outcome {
            *origin = DragSource::Placed(placement_id.clone());
        }
        Some(outcome)
    }

    fn release(&mut self, target: Option<Target>, engine: &mut PlacementEngine) -> Option<Outcome> {
        if !self.state.is_dragging() {
            return None;
        }
        let InteractionState::Dragging { origin, .. } =
            std::mem::take(&mut self.state)
        else {
            return None;
        };
        log::debug!("Dragging -> Idle");

        let target = target?;
        let container = resolve_container(engine.collection(), &target)?;
        let index = target_index(engine.collection(), &container, &target);

        let command = match origin {
            DragSource::Search(item) => Command::Add {
                item,
                container,
                index,
            },
            DragSource::Placed(placement_id) => Command::Move {
                placement_id,
                container,
                index,
            },
        };
        Some(engine.execute(command))
    }

    fn select(&mut self, source: DragSource, engine: &PlacementEngine) {
        match &self.state {
            InteractionState::Dragging { .. } => {}
            InteractionState::PendingClickPlacement { source: pending }
                if pending.same_entity(&source) =>
            {
                self.transition(InteractionState::Idle);
            }
            _ if source.is_present(engine.collection()) => {
                self.transition(InteractionState::PendingClickPlacement { source });
            }
            _ => self.transition(InteractionState::Idle),
        }
    }

    fn place_pending(&mut self, target: &Target, engine: &mut PlacementEngine) -> Option<Outcome> {
        if !self.state.is_pending_click() {
            return None;
        }
        let InteractionState::PendingClickPlacement { source } = std::mem::take(&mut self.state)
        else {
            return None;
        };
        log::debug!("PendingClickPlacement -> Idle");

        let container = resolve_container(engine.collection(), target)?;
        let end = engine.collection().container(&container)?.len();
        let command = match source {
            DragSource::Search(item) => Command::Add {
                item,
                container,
                index: end,
            },
            DragSource::Placed(placement_id) => Command::Move {
                placement_id,
                container,
                index: end,
            },
        };
        Some(engine.execute(command))
    }

    fn transition(&mut self, new_state: InteractionState) {
        if self.state.name() != new_state.name() {
            log::debug!("{} -> {}", self.state.name(), new_state.name());
        }
        self.state = new_state;
    }
}
