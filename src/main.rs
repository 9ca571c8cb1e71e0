//! Bouncing ball demo (default binary).
//!
//! A damped rigid body inside four static walls. Arrow keys or WASD launch
//! the ball, space pauses, `q` quits. Configure with `ASCIISCAPE_*`
//! variables; logs go to stderr (`RUST_LOG=debug`).

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use asciiscape::core::{Background, Rectangle, Shape};
use asciiscape::engine::{
    BodyEvent, Node, NodeId, PhysicsBody, RigidBody, Scene, Settings, Ticker,
};
use asciiscape::input::{should_quit, InputKey, KeyboardController};
use asciiscape::term::{Canvas, TerminalSink};
use asciiscape::types::{Direction, Point};

const LAUNCH_SPEED: f64 = 3.0;
const POLL_INTERVAL: Duration = Duration::from_millis(4);

fn main() -> Result<()> {
    env_logger::init();
    let settings = Settings::from_env();
    log::info!("starting with {:?}", settings);

    let mut sink = TerminalSink::new();
    sink.enter()?;

    let result = run(&mut sink, &settings);

    // Always try to restore terminal state.
    let _ = sink.exit();
    result
}

fn wall(x: f64, y: f64, width: f64, height: f64) -> Node {
    Node::at((x, y))
        .named("wall")
        .with_visual(Shape::from(Rectangle::new(Point::ZERO, width, height)))
        .with_shader(Background::fill('#'))
        .with_body(PhysicsBody::fixed())
}

/// Flip the velocity along the axis the contact spans.
fn bounce(body: &mut PhysicsBody, event: &BodyEvent) {
    let Some(rigid) = body.as_rigid_mut() else {
        return;
    };
    let Some(first) = event.intersections.first() else {
        return;
    };
    let one_column = event.intersections.iter().all(|hit| hit.source.x == first.source.x);
    let one_row = event.intersections.iter().all(|hit| hit.source.y == first.source.y);

    let mut velocity = rigid.linear_velocity;
    if one_column {
        velocity.x = -velocity.x;
    }
    if one_row {
        velocity.y = -velocity.y;
    }
    rigid.linear_velocity = velocity;
}

fn build_scene(settings: &Settings) -> Result<(Scene, NodeId)> {
    let mut scene = Scene::with_settings(settings);
    let root = scene.root();

    let mut body = PhysicsBody::rigid(
        RigidBody::new()
            .with_linear_damp(0.3)
            .with_velocity(Direction::Right.vector() * LAUNCH_SPEED),
    );
    body.on_entered(bounce);
    let ball = scene.spawn(root, Node::at((3.0, 3.0)).named("ball").with_body(body))?;
    scene.spawn(
        ball,
        Node::new()
            .with_visual(Shape::from(Rectangle::new(Point::ZERO, 2.0, 2.0)))
            .with_shader(Background::fill('B')),
    )?;

    let (w, h) = (settings.canvas_width as f64, settings.canvas_height as f64);
    scene.spawn(root, wall(0.0, 0.0, w, 1.0))?;
    scene.spawn(root, wall(0.0, 0.0, 1.0, h - 1.0))?;
    scene.spawn(root, wall(w - 1.0, 0.0, 1.0, h - 1.0))?;
    scene.spawn(root, wall(0.0, h - 1.0, w, 1.0))?;

    Ok((scene, ball))
}

fn run(sink: &mut TerminalSink, settings: &Settings) -> Result<()> {
    let (mut scene, ball) = build_scene(settings)?;
    let root = scene.root();

    let mut canvas = Canvas::from_settings(settings);
    let mut ticker = Ticker::from_settings(settings);
    let mut keyboard = KeyboardController::new();
    let start = Instant::now();
    let now_ms = || start.elapsed().as_secs_f64() * 1000.0;

    loop {
        keyboard.update(now_ms());

        if let Some(delta) = ticker.update(now_ms()) {
            for event in scene.process(&delta) {
                log::debug!("{} -> {}", event.kind.as_str(), event.other);
            }
            canvas.present(&scene, root, sink)?;
        }

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) => {
                if key.kind != KeyEventKind::Release && should_quit(key) {
                    return Ok(());
                }
                let space_was_held = keyboard.is_pressed(InputKey::Space);
                if !keyboard.handle_event(&key, now_ms()) || key.kind == KeyEventKind::Release {
                    continue;
                }
                if keyboard.is_pressed(InputKey::Space) && !space_was_held {
                    ticker.paused = !ticker.paused;
                }
                if let Some(vector) = keyboard.vector() {
                    scene.rigid_body_mut(ball)?.linear_velocity = vector * LAUNCH_SPEED;
                }
            }
            Event::Resize(..) => canvas.invalidate(),
            _ => {}
        }
    }
}
