//! Headless scripted session: tap the center of a phone-sized surface to
//! spawn a burst, drag across it for a second, then let everything fall out
//! and retire. Run with RUST_LOG=debug for per-particle lifecycle output.

use burst_engine::{
    BurstController, ImageManifest, ImageRegistry, InputEvent, InputQueue, SessionConfig,
    SimulationSession, SnapshotBuffer, SurfaceBounds,
};

const MANIFEST_JSON: &str = r#"{
    "images": [
        { "name": "token", "path": "token.png", "width": 320, "height": 320 }
    ]
}"#;

const SURFACE: SurfaceBounds = SurfaceBounds {
    width: 414.0,
    height: 736.0,
};

fn main() {
    env_logger::init();

    let manifest = ImageManifest::from_json(MANIFEST_JSON).expect("manifest is valid JSON");
    let registry = ImageRegistry::from_manifest(&manifest);
    let image = registry.get("token").expect("token image").clone();

    let mut session = SimulationSession::new(SURFACE, SessionConfig::default());
    let mut controller = BurstController::new(image);
    let mut input = InputQueue::new();
    let mut snapshot = SnapshotBuffer::new();

    // Tap the center of the surface
    let (cx, cy) = (SURFACE.width / 2.0, SURFACE.height / 2.0);
    input.push(InputEvent::PointerDown { x: cx, y: cy });
    input.push(InputEvent::PointerUp { x: cx, y: cy });

    for frame in 0u32..600 {
        // Second tap at frame 50, then a left-to-right drag through frame 120
        match frame {
            50 => {
                input.push(InputEvent::PointerDown { x: cx, y: 200.0 });
                input.push(InputEvent::PointerUp { x: cx, y: 200.0 });
            }
            60 => input.push(InputEvent::PointerDown { x: 80.0, y: 300.0 }),
            61..=119 => input.push(InputEvent::PointerMove {
                x: 80.0 + 4.0 * (frame - 60) as f32,
                y: 300.0,
            }),
            120 => input.push(InputEvent::PointerUp { x: 320.0, y: 300.0 }),
            _ => {}
        }

        controller.update(&mut session, &mut input);
        session.step();
        snapshot.write(&session);

        if frame % 60 == 0 {
            log::info!(
                "frame {:3}: {} live particles, {} fields, {} instances",
                frame,
                session.live_particle_count(),
                session.field_count(),
                snapshot.instance_count()
            );
        }
        if session.live_particle_count() == 0 && frame > 150 {
            log::info!("all particles retired after {} frames", frame);
            break;
        }
    }

    log::info!(
        "done: {} live particles, {} registered fields (3 persistent expected)",
        session.live_particle_count(),
        session.field_count()
    );
}
