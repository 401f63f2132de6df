//! Editor Session
//!
//! One tick of the editor as a pure function, plus the session wrapper
//! that owns the state, performs file I/O and logs what happened.
//!
//! Commands apply strictly in the order given. A click resolves the cursor
//! cell with the mode, rotation and selection in force at that point. Save
//! and load are returned as requests; the session splits a tick's commands
//! at each of them so the file is written or read exactly where the command
//! sits. After the commands the cursor is refreshed for display.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use glam::Vec3;

use crate::camera::RaycastHit;
use crate::game::builder::{
    BlockSelector, CursorState, EditMode, InteractionOutcome, decide_interaction,
    query_occupancy, resolve_target_cell,
};
use crate::game::config::EditorConfig;
use crate::game::input::EditorCommand;
use crate::game::level::{
    BlockCatalog, BlockType, LevelFileError, LevelScene, PlacedBlock, WorldState, load_level,
    save_level,
};

// ============================================================================
// TICK
// ============================================================================

/// Input for one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickInput {
    /// Current player position (centre of the player volume)
    pub player_position: Vec3,
    /// Result of this tick's eye raycast; `None` on a miss
    pub hit: Option<RaycastHit>,
    /// Commands triggered this tick, in order
    pub commands: Vec<EditorCommand>,
}

impl TickInput {
    pub fn new(player_position: Vec3, hit: Option<RaycastHit>) -> Self {
        Self {
            player_position,
            hit,
            commands: Vec::new(),
        }
    }

    pub fn with_command(mut self, command: EditorCommand) -> Self {
        self.commands.push(command);
        self
    }
}

/// Editor state carried from tick to tick.
#[derive(Clone, Debug, PartialEq)]
pub struct EditorState {
    pub world: WorldState,
    pub cursor: CursorState,
    pub selector: BlockSelector,
}

impl EditorState {
    pub fn new(world: WorldState, catalog: &BlockCatalog) -> Self {
        Self {
            world,
            cursor: CursorState::default(),
            selector: BlockSelector::for_catalog(catalog),
        }
    }
}

/// Fixed context a tick runs in.
#[derive(Clone, Copy, Debug)]
pub struct TickContext<'a> {
    pub config: &'a EditorConfig,
}

/// Something a tick did or asks the host to do.
#[derive(Clone, Debug, PartialEq)]
pub enum TickEffect {
    SaveRequested,
    LoadRequested,
    Cleared { removed: usize },
    ModeChanged(EditMode),
    BlockSelected(BlockType),
    RotationChanged(Vec3),
    /// A placement/selection command arrived while destroying
    CommandIgnored(EditorCommand),
    Placed(PlacedBlock),
    Destroyed(Vec<PlacedBlock>),
    PlacementRejected { cell: Vec3 },
}

/// Split a command list so every save or load ends its batch.
///
/// A host that runs each batch through [`tick`] and then performs the
/// batch's trailing request sees file I/O in command order. An empty list
/// yields one empty batch so the cursor still refreshes.
pub fn command_batches(commands: &[EditorCommand]) -> Vec<&[EditorCommand]> {
    if commands.is_empty() {
        return vec![commands];
    }
    commands
        .split_inclusive(|c| matches!(c, EditorCommand::Save | EditorCommand::Load))
        .collect()
}

/// Advance the editor by one tick.
///
/// Save and load only emit requests; commands after one of them in the same
/// input run against the unsaved/unloaded world. Use [`command_batches`]
/// when the requests must take effect in place.
pub fn tick(input: &TickInput, mut state: EditorState, ctx: TickContext<'_>) -> (EditorState, Vec<TickEffect>) {
    let mut effects = Vec::new();
    state.world.player_position = input.player_position;

    for &command in &input.commands {
        if command.is_placement_modifier() && state.cursor.mode.is_destroying() {
            effects.push(TickEffect::CommandIgnored(command));
            continue;
        }
        match command {
            EditorCommand::Save => effects.push(TickEffect::SaveRequested),
            EditorCommand::Load => effects.push(TickEffect::LoadRequested),
            EditorCommand::Clear => {
                let removed = state.world.clear();
                effects.push(TickEffect::Cleared { removed });
            }
            EditorCommand::ToggleMode => {
                effects.push(TickEffect::ModeChanged(state.cursor.toggle_mode()));
            }
            EditorCommand::RotateCw => {
                let rotation = state.cursor.rotate(ctx.config.rotation_step_degrees);
                effects.push(TickEffect::RotationChanged(rotation));
            }
            EditorCommand::RotateCcw => {
                let rotation = state.cursor.rotate(-ctx.config.rotation_step_degrees);
                effects.push(TickEffect::RotationChanged(rotation));
            }
            EditorCommand::SelectNextBlock => {
                effects.push(TickEffect::BlockSelected(state.selector.select_next()));
            }
            EditorCommand::SelectPrevBlock => {
                effects.push(TickEffect::BlockSelected(state.selector.select_prev()));
            }
            // Clicks with nothing under the crosshair do nothing.
            EditorCommand::Interact => {
                if let Some(hit) = &input.hit {
                    effects.extend(interact(hit, &mut state, ctx));
                }
            }
        }
    }

    refresh_cursor(input.hit.as_ref(), &mut state, ctx);
    (state, effects)
}

/// Place or destroy at the cell the hit resolves to.
fn interact(hit: &RaycastHit, state: &mut EditorState, ctx: TickContext<'_>) -> Option<TickEffect> {
    let target = resolve_target_cell(hit, state.cursor.mode);
    let mutation = {
        let scene = LevelScene::with_player(&state.world, ctx.config.player_half_extents);
        let occupancy = query_occupancy(&scene, target, ctx.config.occupancy_half_extent);
        decide_interaction(
            target,
            state.cursor.mode,
            &occupancy,
            state.cursor.pending_rotation,
            state.selector.selected(),
        )
    };

    match mutation.apply(&mut state.world) {
        InteractionOutcome::Placed(block) => Some(TickEffect::Placed(block)),
        InteractionOutcome::Destroyed(blocks) => Some(TickEffect::Destroyed(blocks)),
        InteractionOutcome::Rejected { cell } => Some(TickEffect::PlacementRejected { cell }),
        InteractionOutcome::Nothing => None,
    }
}

/// Recompute target cell and visibility for the end-of-tick world.
fn refresh_cursor(hit: Option<&RaycastHit>, state: &mut EditorState, ctx: TickContext<'_>) {
    let Some(hit) = hit else {
        state.cursor.visible = false;
        return;
    };
    let target = resolve_target_cell(hit, state.cursor.mode);
    let scene = LevelScene::with_player(&state.world, ctx.config.player_half_extents);
    let occupancy = query_occupancy(&scene, target, ctx.config.occupancy_half_extent);
    state.cursor.target_cell = target;
    state.cursor.visible = !occupancy.player_present();
}

// ============================================================================
// SESSION
// ============================================================================

/// An editing session: state, configuration and file I/O.
pub struct EditorSession {
    config: EditorConfig,
    catalog: BlockCatalog,
    state: EditorState,
}

impl EditorSession {
    /// Start with an empty level.
    pub fn new(config: EditorConfig, catalog: BlockCatalog) -> Self {
        Self::with_world(config, catalog, WorldState::default())
    }

    pub fn with_world(config: EditorConfig, catalog: BlockCatalog, world: WorldState) -> Self {
        let state = EditorState::new(world, &catalog);
        Self {
            config,
            catalog,
            state,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn catalog(&self) -> &BlockCatalog {
        &self.catalog
    }

    pub fn world(&self) -> &WorldState {
        &self.state.world
    }

    pub fn cursor(&self) -> &CursorState {
        &self.state.cursor
    }

    pub fn selector(&self) -> &BlockSelector {
        &self.state.selector
    }

    /// Name of the block the next placement uses.
    pub fn selected_block_name(&self) -> &str {
        self.state.selector.selected_name(&self.catalog)
    }

    pub fn level_path(&self) -> PathBuf {
        self.config.level_path()
    }

    /// Run one tick. Saves and loads happen at their place in the command list.
    pub fn step(&mut self, input: TickInput) -> Vec<TickEffect> {
        let mut effects = Vec::new();
        for (i, batch) in command_batches(&input.commands).into_iter().enumerate() {
            // A load replaces the player position; later batches keep it.
            let player_position = if i == 0 {
                input.player_position
            } else {
                self.state.world.player_position
            };
            let batch_input = TickInput {
                player_position,
                hit: input.hit,
                commands: batch.to_vec(),
            };

            let state = std::mem::replace(
                &mut self.state,
                EditorState::new(WorldState::default(), &self.catalog),
            );
            let (state, batch_effects) = tick(&batch_input, state, TickContext { config: &self.config });
            self.state = state;

            for effect in &batch_effects {
                self.report(effect);
                match effect {
                    TickEffect::SaveRequested => {
                        // Failures are already logged; the session keeps running.
                        let _ = self.save();
                    }
                    TickEffect::LoadRequested => {
                        if self.load().is_ok() {
                            self.refresh_cursor(input.hit.as_ref());
                        }
                    }
                    _ => {}
                }
            }
            effects.extend(batch_effects);
        }
        effects
    }

    fn refresh_cursor(&mut self, hit: Option<&RaycastHit>) {
        refresh_cursor(hit, &mut self.state, TickContext { config: &self.config });
    }

    /// Write the current level to the configured path.
    pub fn save(&self) -> Result<PathBuf, LevelFileError> {
        let path = self.level_path();
        match save_level(&path, &self.state.world, &self.config.level_name, &self.catalog) {
            Ok(()) => {
                log::info!(
                    "[Level Editor] Saved level to {} at {}",
                    path.display(),
                    utc_time_of_day()
                );
                Ok(path)
            }
            Err(e) => {
                log::error!("[Level Editor] Failed to save {}: {}", path.display(), e);
                Err(e)
            }
        }
    }

    /// Replace the level with the configured level file.
    ///
    /// On any error the current level is left exactly as it was.
    pub fn load(&mut self) -> Result<usize, LevelFileError> {
        let path = self.level_path();
        match load_level(&path, &self.catalog) {
            Ok(world) => {
                let count = world.len();
                self.state.world.replace_with(world);
                log::info!("[Level Editor] Instantiated {count} level objects");
                Ok(count)
            }
            Err(e) if e.is_not_found() => {
                log::warn!("[Level Editor] {} does not exist", path.display());
                Err(e)
            }
            Err(e) => {
                log::error!("[Level Editor] Could not load {}: {}", path.display(), e);
                Err(e)
            }
        }
    }

    fn report(&self, effect: &TickEffect) {
        match effect {
            TickEffect::Cleared { removed } => {
                log::info!("[Level Editor] Cleared level ({removed} blocks removed)");
            }
            TickEffect::ModeChanged(mode) => {
                log::info!("[Level Editor] Mode: {mode:?}");
            }
            TickEffect::BlockSelected(block_type) => {
                log::info!(
                    "[Level Editor] Currently placing: {}",
                    self.catalog.name(*block_type)
                );
            }
            TickEffect::RotationChanged(rotation) => {
                log::info!("[Level Editor] Placement rotation: {}°", rotation.y);
            }
            TickEffect::CommandIgnored(command) => {
                log::debug!("[Level Editor] {command:?} ignored while destroying");
            }
            TickEffect::Placed(block) => {
                log::info!(
                    "[Level Editor] Placed {} at ({}, {}, {})",
                    self.catalog.name(block.block_type),
                    block.position.x,
                    block.position.y,
                    block.position.z
                );
            }
            TickEffect::Destroyed(blocks) => {
                log::info!("[Level Editor] Destroyed {} block(s)", blocks.len());
            }
            TickEffect::PlacementRejected { cell } => {
                log::debug!(
                    "[Level Editor] Cell ({}, {}, {}) is occupied",
                    cell.x,
                    cell.y,
                    cell.z
                );
            }
            TickEffect::SaveRequested | TickEffect::LoadRequested => {}
        }
    }
}

/// Current time of day as `HH:MM:SS UTC`.
fn utc_time_of_day() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format_time_of_day(secs)
}

fn format_time_of_day(unix_secs: u64) -> String {
    let secs = unix_secs % 86_400;
    format!("{:02}:{:02}:{:02} UTC", secs / 3600, (secs / 60) % 60, secs % 60)
}
