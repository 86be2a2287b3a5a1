//! # GLIDE Replay Demo
//!
//! Replays a scripted session against a [`ClientWorld`] and prints what a
//! renderer running at four frames per tick would draw.
//!
//! ```bash
//! # Defaults
//! cargo run --bin replay_demo
//!
//! # Custom config, verbose
//! RUST_LOG=debug cargo run --bin replay_demo -- config/glide.toml
//! ```

use std::process::ExitCode;

use glide::render::{AttributeUpdate, DisplayKind, SubFrame};
use glide::refs::Identity;
use glide::shared::{
    AbsoluteTransform, Argb, DVec3, Pose, RelativeFlag, RelativeMovePacket, RelativeUpdateMask,
};
use glide::{ClientWorld, GlideConfig, GlideResult};
use tracing_subscriber::EnvFilter;

const FRAMES_PER_TICK: u32 = 4;
const TICKS: u32 = 12;

const CART: Identity = Identity::from_u128(0xC0FF_EE00);
const SIGN: Identity = Identity::from_u128(0x5160_0000);

fn main() -> ExitCode {
    init_tracing();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "Replay failed");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn run() -> GlideResult<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => GlideConfig::load(path)?,
        None => GlideConfig::default(),
    };

    println!("═══════════════════════════════════════════════════════════════════");
    println!("                       GLIDE REPLAY DEMO");
    println!("═══════════════════════════════════════════════════════════════════");
    println!("  Tick rate:     {} Hz ({:?})", config.tick_rate, config.tick_duration());
    println!("  Motion steps:  {}", config.motion.steps);
    println!("  Frames/tick:   {FRAMES_PER_TICK}");
    println!();

    let mut world = ClientWorld::new(config.clone());
    world.spawn_body(CART, Pose::default());

    let mut sign = config.display_data(DisplayKind::Text);
    sign.interpolation_duration = sign.interpolation_duration.max(4);
    sign.apply(AttributeUpdate::Text("GLIDE".into()));
    world.spawn_display(SIGN, Pose::default(), sign);
    world.attach(SIGN, CART, DVec3::new(0.0, 2.5, 0.0))?;

    for tick in 0..TICKS {
        script(&mut world, tick)?;
        world.tick();

        for frame in 0..FRAMES_PER_TICK {
            let partial = frame as f32 / FRAMES_PER_TICK as f32;
            let cart = world.frame(CART, partial, |frame| frame.pose)?;
            let background = world.frame(SIGN, partial, |frame| match frame.display.map(|d| d.sub) {
                Some(SubFrame::Text(text)) => text.background,
                _ => Argb::TRANSPARENT,
            })?;
            println!(
                "  tick {tick:>2} +{partial:.2}  cart ({:>6.2}, {:>5.2}, {:>5.2}) yaw {:>7.2}  sign bg {:#010x}",
                cart.position.x, cart.position.y, cart.position.z, cart.yaw, background.0
            );
        }
    }

    println!();
    println!("  Final cart pose: {:?}", world.pose(CART)?);
    Ok(())
}

/// Authoritative updates for `tick`.
fn script(world: &mut ClientWorld, tick: u32) -> GlideResult<()> {
    match tick {
        // Drive forward two blocks per update, turning as it goes
        0 | 3 | 6 => {
            let delta = AbsoluteTransform::absolute(DVec3::new(2.0, 0.0, 0.0), 30.0, 0.0);
            let mask = RelativeUpdateMask::POSITION | RelativeFlag::Yaw;
            world.apply_move(CART, &RelativeMovePacket::new(delta, mask).to_bytes())?;
        }
        4 => {
            world.apply_attribute(SIGN, AttributeUpdate::Background(Argb(0xFF20_60C0)))?;
            world.apply_attribute(SIGN, AttributeUpdate::InterpolationDelay(0))?;
        }
        9 => {
            let home = AbsoluteTransform::absolute(DVec3::ZERO, 0.0, 0.0);
            world.apply_teleport(CART, &RelativeMovePacket::new(home, RelativeUpdateMask::NONE).to_bytes())?;
        }
        _ => {}
    }
    Ok(())
}
