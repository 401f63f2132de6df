//! Level Editor - Headless Driver
//!
//! Drives an editing session from a script instead of a window, so levels
//! can be built, saved and inspected without a renderer.
//!
//! Run with: `cargo run --bin level_editor -- [script] [config.json]`
//! (reads stdin when no script is given)
//!
//! Script lines:
//! - look <yaw> <pitch>: Set view angles in degrees (0 0 looks towards -Z)
//! - move <x> <y> <z>: Move the player
//! - click: Place / destroy at the cursor
//! - toggle: Switch Placing / Destroying
//! - cw / ccw: Rotate the next block by one step
//! - next / prev: Cycle the block type
//! - scroll <delta>: Mouse wheel; up selects the next block, down the previous
//! - save / load / clear: Level file and reset
//! - status: Print cursor and level summary
//! - # ...: Comment

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use glam::Vec3;

use level_editor_engine::camera::{FirstPersonView, Raycaster};
use level_editor_engine::game::{
    BlockCatalog, EditorCommand, EditorConfig, EditorSession, LevelScene, TickInput,
};

/// Block types offered by the driver, in selection order.
const BLOCK_TYPES: [&str; 4] = ["stone", "wood", "glass", "brick"];

// ============================================================================
// SCRIPT
// ============================================================================

/// One parsed script line.
#[derive(Debug, PartialEq)]
enum ScriptLine {
    Look { yaw: f32, pitch: f32 },
    Move(Vec3),
    Command(EditorCommand),
    Status,
}

fn parse_floats<const N: usize>(args: &[&str]) -> Result<[f32; N], String> {
    if args.len() != N {
        return Err(format!("expected {N} numbers, got {}", args.len()));
    }
    let mut out = [0.0; N];
    for (slot, arg) in out.iter_mut().zip(args) {
        *slot = arg
            .parse()
            .map_err(|_| format!("not a number: {arg}"))?;
    }
    Ok(out)
}

/// Parse a script line. Blank lines and comments yield `None`.
fn parse_line(line: &str) -> Result<Option<ScriptLine>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let words: Vec<&str> = line.split_whitespace().collect();
    let (head, args) = (words[0], &words[1..]);

    let parsed = match head.to_ascii_lowercase().as_str() {
        "look" => {
            let [yaw, pitch] = parse_floats::<2>(args)?;
            ScriptLine::Look { yaw, pitch }
        }
        "move" => {
            let [x, y, z] = parse_floats::<3>(args)?;
            ScriptLine::Move(Vec3::new(x, y, z))
        }
        "scroll" => {
            let [delta] = parse_floats::<1>(args)?;
            match EditorCommand::from_scroll(delta) {
                Some(command) => ScriptLine::Command(command),
                None => return Ok(None),
            }
        }
        "status" => ScriptLine::Status,
        _ => ScriptLine::Command(head.parse()?),
    };
    Ok(Some(parsed))
}

// ============================================================================
// DRIVER
// ============================================================================

struct Driver {
    session: EditorSession,
    view: FirstPersonView,
}

impl Driver {
    fn new(session: EditorSession) -> Self {
        let mut driver = Self {
            session,
            view: FirstPersonView::new(),
        };
        // Place the player and prime the cursor for the starting view.
        driver.tick(None);
        driver
    }

    fn tick(&mut self, command: Option<EditorCommand>) {
        let hit = LevelScene::new(self.session.world()).cast(
            self.view.eye(),
            self.view.forward(),
            self.session.config().max_ray_distance,
        );
        let mut input = TickInput::new(self.view.position, hit);
        if let Some(command) = command {
            input = input.with_command(command);
        }
        self.session.step(input);
        // A load may have moved the player.
        self.view.position = self.session.world().player_position;
    }

    fn run_line(&mut self, line: ScriptLine) {
        match line {
            ScriptLine::Look { yaw, pitch } => {
                self.view.look(yaw.to_radians(), pitch.to_radians());
                self.tick(None);
            }
            ScriptLine::Move(position) => {
                self.view.position = position;
                self.tick(None);
            }
            ScriptLine::Command(command) => self.tick(Some(command)),
            ScriptLine::Status => self.print_status(),
        }
    }

    fn print_status(&self) {
        let cursor = self.session.cursor();
        let world = self.session.world();
        println!(
            "mode={:?} cursor=({}, {}, {}) visible={} rotation={}° block={} blocks={}",
            cursor.mode,
            cursor.target_cell.x,
            cursor.target_cell.y,
            cursor.target_cell.z,
            cursor.visible,
            cursor.pending_rotation.y,
            self.session.selected_block_name(),
            world.len()
        );
    }
}

fn run<R: BufRead>(driver: &mut Driver, reader: R) -> io::Result<()> {
    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        match parse_line(&line) {
            Ok(Some(parsed)) => driver.run_line(parsed),
            Ok(None) => {}
            Err(e) => log::warn!("[Level Editor] line {}: {}", number + 1, e),
        }
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("===========================================");
    println!("   Level Editor - Headless Driver");
    println!("===========================================");
    println!();
    println!("Script: look <yaw> <pitch>, move <x> <y> <z>, click, status");
    println!("toggle: Place/Destroy, cw/ccw: Rotate, next/prev/scroll <d>: Block type");
    println!("save / load / clear: Level file, #: Comment");
    println!();

    let args: Vec<String> = std::env::args().skip(1).collect();

    let config = match args.get(1) {
        Some(path) => match EditorConfig::load_or_default(Path::new(path)) {
            Ok(config) => config,
            Err(e) => {
                log::error!("[Config] {e}");
                std::process::exit(1);
            }
        },
        None => EditorConfig::default(),
    };

    let catalog = match BlockCatalog::new(BLOCK_TYPES.iter().map(|s| s.to_string()).collect()) {
        Ok(catalog) => catalog,
        Err(e) => {
            log::error!("[Level Editor] {e}");
            std::process::exit(1);
        }
    };

    log::info!("[Level Editor] Level file: {}", config.level_path().display());
    let mut driver = Driver::new(EditorSession::new(config, catalog));

    let result = match args.first() {
        Some(path) => File::open(path).and_then(|file| run(&mut driver, BufReader::new(file))),
        None => run(&mut driver, io::stdin().lock()),
    };
    if let Err(e) = result {
        log::error!("[Level Editor] {e}");
        std::process::exit(1);
    }

    driver.print_status();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script_lines() {
        assert_eq!(parse_line("  # comment"), Ok(None));
        assert_eq!(parse_line(""), Ok(None));
        assert_eq!(
            parse_line("look 90 -30"),
            Ok(Some(ScriptLine::Look { yaw: 90.0, pitch: -30.0 }))
        );
        assert_eq!(
            parse_line("move 1 2 3"),
            Ok(Some(ScriptLine::Move(Vec3::new(1.0, 2.0, 3.0))))
        );
        assert_eq!(
            parse_line("click"),
            Ok(Some(ScriptLine::Command(EditorCommand::Interact)))
        );
        assert_eq!(parse_line("status"), Ok(Some(ScriptLine::Status)));
        assert_eq!(
            parse_line("scroll -1"),
            Ok(Some(ScriptLine::Command(EditorCommand::SelectPrevBlock)))
        );
        assert_eq!(parse_line("scroll 0"), Ok(None));
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_line("move 1 2").is_err());
        assert!(parse_line("look a b").is_err());
        assert!(parse_line("fly").is_err());
    }

    #[test]
    fn test_driver_places_block_on_ground() {
        let config = EditorConfig {
            storage_dir: std::env::temp_dir().join("level_editor_driver_test"),
            ..Default::default()
        };
        let catalog = BlockCatalog::new(vec!["stone".into()]).unwrap();
        let mut driver = Driver::new(EditorSession::new(config, catalog));

        // Eye at y = 1.8 looking 45° down towards -Z hits the ground at z ≈ -1.8.
        driver.run_line(ScriptLine::Look { yaw: 0.0, pitch: -45.0 });
        assert!(driver.session.cursor().visible);
        assert_eq!(driver.session.cursor().target_cell, Vec3::new(0.0, 0.5, -2.0));

        driver.run_line(ScriptLine::Command(EditorCommand::Interact));
        assert_eq!(driver.session.world().len(), 1);
    }
}
