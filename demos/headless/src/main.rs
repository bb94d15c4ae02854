use glam::Vec2;
use slingshot::input::slingshot::{KEY_BOOST, KEY_SPLIT, KEY_STANDARD};
use slingshot::{
    DestructionReport, GameConfig, InputEvent, InputQueue, PointerButton, RenderBuffer, Session,
    Slingshot,
};

const SLING: Vec2 = Vec2::new(200.0, 600.0);
const PULL: Vec2 = Vec2::new(110.0, 650.0);

/// Two columns, a beam across them and a pig on top.
fn build_tower(session: &mut Session, x: f32) -> Result<(), slingshot::EntityError> {
    let ground_y = session.config.ground_y();
    let column = session.config.column;
    let beam = session.config.beam;
    let target = session.config.target;

    let column_y = ground_y - column.height / 2.0;
    session.spawn_obstacle(Vec2::new(x - 40.0, column_y), column)?;
    session.spawn_obstacle(Vec2::new(x + 40.0, column_y), column)?;
    let beam_y = ground_y - column.height - beam.height / 2.0;
    session.spawn_obstacle(Vec2::new(x, beam_y), beam)?;
    session.spawn_target(Vec2::new(x, beam_y - beam.height / 2.0 - target.radius), target)?;
    Ok(())
}

fn shoot(queue: &mut InputQueue, key_code: u32) {
    queue.push(InputEvent::KeyDown { key_code });
    queue.push(InputEvent::PointerDown { x: SLING.x, y: SLING.y, button: PointerButton::Primary });
    queue.push(InputEvent::PointerMove { x: PULL.x, y: PULL.y });
    queue.push(InputEvent::PointerUp { x: PULL.x, y: PULL.y, button: PointerButton::Primary });
}

fn run(session: &mut Session, frames: u32) -> DestructionReport {
    let mut total = DestructionReport::default();
    for _ in 0..frames {
        let report = session.tick();
        if !report.is_empty() {
            log::info!("Destroyed {:?}", report.removed);
        }
        total.merge(report);
    }
    total
}

fn main() {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let json = match std::fs::read_to_string(&path) {
                Ok(json) => json,
                Err(e) => {
                    log::error!("Cannot read {}: {}", path, e);
                    std::process::exit(1);
                }
            };
            match GameConfig::from_json(&json) {
                Ok(config) => config,
                Err(e) => {
                    log::error!("Bad config {}: {}", path, e);
                    std::process::exit(1);
                }
            }
        }
        None => GameConfig::default(),
    };

    let mut session = Session::new(config);
    let mut sling = Slingshot::new(session.config.max_drag_distance);
    let mut queue = InputQueue::new();

    session.spawn_static(SLING + Vec2::new(0.0, 90.0), Vec2::new(20.0, 180.0));
    for x in [900.0, 1150.0, 1400.0] {
        if let Err(e) = build_tower(&mut session, x) {
            log::error!("Tower at {} failed: {}", x, e);
            std::process::exit(1);
        }
    }
    log::info!(
        "Scene ready: {} targets, {} obstacles",
        session.target_count(),
        session.obstacle_count()
    );

    let mut total = DestructionReport::default();
    for key in [KEY_STANDARD, KEY_BOOST, KEY_SPLIT] {
        shoot(&mut queue, key);
        for command in sling.process(&mut queue) {
            if let Err(e) = session.apply(command) {
                log::warn!("Launch rejected: {}", e);
            }
        }
        total.merge(run(&mut session, 30));

        queue.push(InputEvent::PointerDown { x: 0.0, y: 0.0, button: PointerButton::Secondary });
        for command in sling.process(&mut queue) {
            if let Err(e) = session.apply(command) {
                log::warn!("Activation failed: {}", e);
            }
        }
        total.merge(run(&mut session, 150));
    }

    let mut buffer = RenderBuffer::new();
    session.build_render_buffer(&mut buffer);

    log::info!(
        "Done: {} removed ({} destructive contacts, {} informational), \
         {} targets left, {} instances drawn",
        total.removed.len(),
        total.destructive,
        total.informational,
        session.target_count(),
        buffer.instance_count()
    );
}
