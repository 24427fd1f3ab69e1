//! Input dispatch and intent application.
//!
//! First system of the frame. Pending [`ActorInput`] messages are routed to
//! the addressed actor's [`Controller`]; then every controller produces its
//! [`FrameIntent`], which is written into the actor's components:
//!
//! | Intent      | Target                                  |
//! |-------------|-----------------------------------------|
//! | `move_axis` | `Motion::movement_direction`            |
//! | `aim`       | `Orientation::look_direction` (deadzoned) |
//! | `jump`      | `Motion::jump_requested`                |
//! | `attack`    | `AttackScheduler::is_attacking`         |
//! | `recall`    | current projectile, reason `Command`    |
//! | `reel`      | current projectile's reel input         |
//! | `interact`  | [`InteractEvent`] trigger               |

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::attack::AttackScheduler;
use crate::components::controller::{Controller, IntentContext};
use crate::components::mapposition::MapPosition;
use crate::components::motion::Motion;
use crate::components::orientation::{Orientation, look_direction};
use crate::components::projectile::{CurrentProjectile, Projectile};
use crate::events::combat::InteractEvent;
use crate::events::input::ActorInput;
use crate::events::projectile::RecallReason;
use crate::resources::simconfig::SimConfig;
use crate::resources::worldtime::WorldTime;
use crate::systems::projectile::recall_current;

pub fn intent_system(
    mut commands: Commands,
    mut inputs: MessageReader<ActorInput>,
    time: Res<WorldTime>,
    config: Res<SimConfig>,
    mut actors: Query<(
        Entity,
        &MapPosition,
        &mut Controller,
        Option<&mut Motion>,
        Option<&mut Orientation>,
        Option<&mut AttackScheduler>,
        Option<&CurrentProjectile>,
    )>,
    mut projectiles: Query<&mut Projectile>,
) {
    for input in inputs.read() {
        match actors.get_mut(input.actor) {
            Ok((_, _, mut controller, ..)) => controller.0.handle_input(&input.action),
            Err(_) => debug!("Dropping input for missing actor {:?}", input.actor),
        }
    }

    for (entity, position, mut controller, motion, orientation, scheduler, current) in
        actors.iter_mut()
    {
        let ctx = IntentContext {
            position: position.pos,
        };
        let intent = controller.0.produce(&ctx, time.delta);

        if let Some(mut motion) = motion {
            motion.set_movement_axis(intent.move_axis);
            if intent.jump {
                motion.request_jump();
            }
        }
        if let Some(mut orientation) = orientation {
            orientation.look_direction = look_direction(intent.aim.raw(position.pos), config.look_deadzone);
        }
        if let Some(mut scheduler) = scheduler {
            scheduler.is_attacking = intent.attack;
        }
        if intent.recall {
            recall_current(&mut commands, current, &mut projectiles, RecallReason::Command);
        }
        if let Some(axis) = intent.reel {
            if let Some(mut projectile) = current
                .and_then(|c| c.get())
                .and_then(|p| projectiles.get_mut(p).ok())
            {
                projectile.reel_input = axis;
            }
        }
        if intent.interact {
            commands.trigger(InteractEvent { actor: entity });
        }
    }
}
