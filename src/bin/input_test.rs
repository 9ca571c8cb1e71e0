//! Keyboard state display.
//!
//! One row per tracked key: a block when held (two for a double tap), the
//! key name, and how long it has been held. Press `q` to quit.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use asciiscape::engine::{Node, NodeId, Scene, Sprite, Visual};
use asciiscape::input::{should_quit, InputKey, KeyboardController};
use asciiscape::term::{Canvas, TerminalSink};

struct KeyRow {
    key: InputKey,
    marker: NodeId,
    held: NodeId,
}

fn main() -> Result<()> {
    env_logger::init();

    let mut sink = TerminalSink::new();
    sink.enter()?;

    let result = run(&mut sink);

    // Always try to restore terminal state.
    let _ = sink.exit();
    result
}

fn build_rows(scene: &mut Scene) -> Result<Vec<KeyRow>> {
    let root = scene.root();
    let mut rows = Vec::with_capacity(InputKey::ALL.len());
    for (index, key) in InputKey::ALL.into_iter().enumerate() {
        let y = index as f64;
        let marker = scene.spawn(root, Node::at((0.0, y)))?;
        scene.spawn(
            root,
            Node::at((3.0, y)).with_visual(Sprite::new(key.as_str().to_uppercase())),
        )?;
        let held = scene.spawn(root, Node::at((8.0, y)))?;
        rows.push(KeyRow { key, marker, held });
    }
    Ok(rows)
}

fn update_rows(scene: &mut Scene, rows: &[KeyRow], keyboard: &KeyboardController, now_ms: f64) -> Result<()> {
    for row in rows {
        let marker = keyboard.is_pressed(row.key).then(|| {
            let block = if keyboard.is_double_tap(row.key) { "██" } else { "█" };
            Visual::from(Sprite::new(block))
        });
        scene.set_visual(row.marker, marker)?;

        let held = keyboard
            .held_ms(row.key, now_ms)
            .map(|ms| Visual::from(Sprite::new(format!("{:>10}", format!("{}ms", ms as u64)))));
        scene.set_visual(row.held, held)?;
    }
    Ok(())
}

fn run(sink: &mut TerminalSink) -> Result<()> {
    let mut scene = Scene::new();
    let rows = build_rows(&mut scene)?;
    let root = scene.root();

    let mut canvas = Canvas::new(20, InputKey::ALL.len() as u16);
    let mut keyboard = KeyboardController::new();
    let start = Instant::now();
    let now_ms = || start.elapsed().as_secs_f64() * 1000.0;

    loop {
        let now = now_ms();
        keyboard.update(now);
        update_rows(&mut scene, &rows, &keyboard, now)?;
        canvas.present(&scene, root, sink)?;

        if event::poll(Duration::from_millis(16))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Release && should_quit(key) {
                    return Ok(());
                }
                keyboard.handle_event(&key, now_ms());
            }
        }
    }
}
