//! Headless simulation driver.
//!
//! [`Simulation`] owns the ECS [`World`] and the two schedules that advance
//! it:
//!
//! - **physics**, run at a fixed step from an accumulator, at most
//!   `max_substeps` times per frame
//! - **frame**, run once per [`Simulation::advance`] call with the frame
//!   delta
//!
//! Physics steps for a frame run before that frame's frame pass. Message
//! queues are advanced after every pass, so a message is seen by each
//! reader exactly once.
//!
//! The outward API mirrors what a game would call on its actors: spawn,
//! equip, knock back, feed input, recall, despawn.

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use bevy_ecs::system::RunSystemOnce;
use bevy_math::Vec2;
use log::{debug, info};

use crate::components::attack::AttackScheduler;
use crate::components::boxcollider::BoxCollider;
use crate::components::controller::{Controller, FireMode, IdleIntent, IntentSource, PlayerInput};
use crate::components::layer::Layer;
use crate::components::mapposition::MapPosition;
use crate::components::motion::Motion;
use crate::components::orientation::Orientation;
use crate::components::projectile::CurrentProjectile;
use crate::components::rigidbody::RigidBody;
use crate::components::stats::Stats;
use crate::components::weapon::Weapon;
use crate::events::collision::CollisionEvent;
use crate::events::input::{ActorInput, InputAction};
use crate::events::projectile::RecallReason;
use crate::resources::simconfig::SimConfig;
use crate::resources::worldtime::WorldTime;
use crate::systems::attack::attack_system;
use crate::systems::collision::collision_detector;
use crate::systems::intent::intent_system;
use crate::systems::jump::jump_system;
use crate::systems::motion::{knockback_decay_system, motion_system};
use crate::systems::movement::movement_system;
use crate::systems::orientation::orientation_system;
use crate::systems::projectile::{
    clear_owner_registration, projectile_contact_system, projectile_update_system,
    recall_actor_projectile,
};
use crate::systems::rope::{rope_constraint_system, rope_line_system};
use crate::systems::terrain::terrain_collision_system;
use crate::systems::time::update_world_time;

/// Name of the gravity force on actor rigid bodies.
pub const GRAVITY_FORCE: &str = "gravity";

/// Where an actor's intent comes from.
pub enum ActorIntent {
    Player(FireMode),
    Idle,
    Custom(Box<dyn IntentSource>),
}

/// Everything needed to spawn an actor.
pub struct ActorSpec {
    pub position: Vec2,
    pub size: Vec2,
    pub layer: Layer,
    pub stats: Option<Stats>,
    pub weapon: Option<Weapon>,
    pub intent: ActorIntent,
    pub gravity: bool,
}

impl ActorSpec {
    /// A player-controlled actor on the player layer.
    pub fn player(position: Vec2) -> Self {
        Self {
            position,
            size: Vec2::new(1.0, 2.0),
            layer: Layer::PLAYER,
            stats: Some(Stats::default()),
            weapon: None,
            intent: ActorIntent::Player(FireMode::Tap),
            gravity: true,
        }
    }

    /// A training dummy: enemy layer, no stats, no weapon, no intent.
    pub fn dummy(position: Vec2) -> Self {
        Self {
            position,
            size: Vec2::new(1.0, 2.0),
            layer: Layer::ENEMY,
            stats: None,
            weapon: None,
            intent: ActorIntent::Idle,
            gravity: true,
        }
    }

    pub fn with_stats(mut self, stats: Stats) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn with_weapon(mut self, weapon: Weapon) -> Self {
        self.weapon = Some(weapon);
        self
    }

    pub fn with_intent(mut self, intent: ActorIntent) -> Self {
        self.intent = intent;
        self
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.size = Vec2::new(width, height);
        self
    }

    pub fn without_gravity(mut self) -> Self {
        self.gravity = false;
        self
    }
}

pub struct Simulation {
    world: World,
    frame: Schedule,
    physics: Schedule,
    accumulator: f32,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Self {
        let mut world = World::new();
        world.insert_resource(
            WorldTime::default()
                .with_fixed_delta(config.fixed_delta)
                .with_time_scale(1.0),
        );
        world.insert_resource(config);
        world.init_resource::<Messages<ActorInput>>();
        world.init_resource::<Messages<CollisionEvent>>();
        world.spawn(Observer::new(clear_owner_registration));
        world.flush();

        let mut frame = Schedule::default();
        frame.add_systems(
            (
                intent_system,
                orientation_system,
                jump_system,
                attack_system,
                projectile_update_system,
                rope_line_system,
            )
                .chain(),
        );

        let mut physics = Schedule::default();
        physics.add_systems(
            (
                motion_system,
                knockback_decay_system,
                movement_system,
                terrain_collision_system,
                rope_constraint_system,
                collision_detector,
                projectile_contact_system,
            )
                .chain(),
        );

        Self {
            world,
            frame,
            physics,
            accumulator: 0.0,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn config(&self) -> &SimConfig {
        self.world.resource::<SimConfig>()
    }

    pub fn time(&self) -> &WorldTime {
        self.world.resource::<WorldTime>()
    }

    /// Spawn a static solid block. `center` is the middle of the block.
    pub fn spawn_terrain(&mut self, center: Vec2, size: Vec2, layer: Layer) -> Entity {
        self.world
            .spawn((
                MapPosition::from_vec(center),
                BoxCollider::centered(size.x, size.y),
                layer,
                RigidBody::fixed(),
            ))
            .id()
    }

    pub fn spawn_actor(&mut self, desc: ActorSpec) -> Entity {
        let config = self.world.resource::<SimConfig>();
        let motion = Motion::new()
            .with_probe_length(config.ground_probe_length)
            .with_control_scale(config.knockback_control_scale);
        let tap_release = config.tap_fire_release;
        let gravity = Vec2::new(0.0, config.gravity);

        let controller = match desc.intent {
            ActorIntent::Player(mode) => {
                Controller::new(PlayerInput::new(mode).with_tap_release(tap_release))
            }
            ActorIntent::Idle => Controller::new(IdleIntent),
            ActorIntent::Custom(source) => Controller(source),
        };
        let mut body = RigidBody::new();
        if desc.gravity {
            body.add_force(GRAVITY_FORCE, gravity);
        }

        let mut actor = self.world.spawn((
            MapPosition::from_vec(desc.position),
            BoxCollider::centered(desc.size.x, desc.size.y),
            desc.layer,
            body,
            motion,
            Orientation::default(),
            AttackScheduler::new(),
            CurrentProjectile::default(),
            controller,
        ));
        if let Some(stats) = desc.stats {
            actor.insert(stats);
        }
        if let Some(weapon) = desc.weapon {
            actor.insert(weapon);
        }
        let id = actor.id();
        info!(
            "Spawned actor {:?} on layer {} at {:?}",
            id,
            desc.layer.name().unwrap_or("?"),
            desc.position
        );
        id
    }

    /// Equip `weapon`, replacing any current one. The attack timer is kept.
    pub fn equip_weapon(&mut self, actor: Entity, weapon: Weapon) -> bool {
        let Ok(mut entity) = self.world.get_entity_mut(actor) else {
            debug!("equip_weapon: actor {:?} does not exist", actor);
            return false;
        };
        if !entity.contains::<AttackScheduler>() {
            entity.insert(AttackScheduler::new());
        }
        entity.insert(weapon);
        info!("Actor {:?} equipped {} weapon", actor, weapon.kind.name());
        true
    }

    pub fn unequip_weapon(&mut self, actor: Entity) -> Option<Weapon> {
        let mut entity = self.world.get_entity_mut(actor).ok()?;
        entity.take::<Weapon>()
    }

    /// Knock `actor` away from `source`. Replaces any running knockback.
    pub fn apply_knockback(&mut self, actor: Entity, source: Vec2, power: f32, duration: f32) -> bool {
        let Some(position) = self.world.get::<MapPosition>(actor).map(|p| p.pos) else {
            return false;
        };
        let Some(mut motion) = self.world.get_mut::<Motion>(actor) else {
            return false;
        };
        motion.apply_knockback(position, source, power, duration);
        true
    }

    /// Queue an input action for the next frame pass.
    pub fn send_input(&mut self, actor: Entity, action: InputAction) {
        self.world.write_message(ActorInput::new(actor, action));
    }

    /// Recall the actor's current projectile, if any.
    pub fn recall_projectile(&mut self, actor: Entity) -> bool {
        self.recall_with_reason(actor, RecallReason::Command)
    }

    fn recall_with_reason(&mut self, actor: Entity, reason: RecallReason) -> bool {
        match self
            .world
            .run_system_once_with(recall_actor_projectile, (actor, reason))
        {
            Ok(recalled) => recalled,
            Err(e) => {
                log::warn!("Recall for {:?} failed: {}", actor, e);
                false
            }
        }
    }

    /// Despawn an actor. Its projectile is recalled first.
    pub fn despawn_actor(&mut self, actor: Entity) -> bool {
        self.recall_with_reason(actor, RecallReason::OwnerDespawned);
        let despawned = self.world.try_despawn(actor).is_ok();
        if despawned {
            info!("Despawned actor {:?}", actor);
        }
        despawned
    }

    pub fn current_projectile(&self, actor: Entity) -> Option<Entity> {
        self.world.get::<CurrentProjectile>(actor).and_then(|c| c.get())
    }

    pub fn position(&self, entity: Entity) -> Option<Vec2> {
        self.world.get::<MapPosition>(entity).map(|p| p.pos)
    }

    /// Run exactly one physics step.
    pub fn step_physics(&mut self) {
        self.physics.run(&mut self.world);
        self.world.resource_mut::<Messages<CollisionEvent>>().update();
    }

    /// Run the frame pass only, with frame delta `dt`.
    pub fn step_frame(&mut self, dt: f32) {
        update_world_time(&mut self.world, dt);
        self.frame.run(&mut self.world);
        self.world.resource_mut::<Messages<ActorInput>>().update();
        self.world.clear_trackers();
    }

    /// Advance by one frame of `dt` seconds. Returns the physics steps run.
    pub fn advance(&mut self, dt: f32) -> u32 {
        let (fixed_delta, time_scale) = {
            let time = self.world.resource::<WorldTime>();
            (time.fixed_delta, time.time_scale)
        };
        let max_substeps = self.config().max_substeps.max(1);

        self.accumulator += dt * time_scale;
        let mut steps = 0;
        while self.accumulator >= fixed_delta && steps < max_substeps {
            self.step_physics();
            self.accumulator -= fixed_delta;
            steps += 1;
        }
        if self.accumulator >= fixed_delta {
            debug!(
                "Physics fell behind by {:.3}s, dropping the backlog",
                self.accumulator
            );
            self.accumulator %= fixed_delta;
        }

        self.step_frame(dt);
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_accumulator_runs_fixed_steps() {
        let mut config = SimConfig::new();
        config.fixed_delta = 0.25;
        let mut sim = Simulation::new(config);
        assert_eq!(sim.advance(0.625), 2);
        // 0.125 left over plus 0.625
        assert_eq!(sim.advance(0.625), 3);
    }

    #[test]
    fn test_substeps_are_capped() {
        let mut config = SimConfig::new();
        config.max_substeps = 4;
        let mut sim = Simulation::new(config);
        assert_eq!(sim.advance(1.0), 4);
        assert!(sim.accumulator < sim.time().fixed_delta);
    }

    #[test]
    fn test_spawned_actor_has_core_components() {
        let mut sim = Simulation::new(SimConfig::new());
        let actor = sim.spawn_actor(ActorSpec::player(Vec2::ZERO));
        let world = sim.world();
        assert!(world.get::<Motion>(actor).is_some());
        assert!(world.get::<Orientation>(actor).is_some());
        assert!(world.get::<AttackScheduler>(actor).is_some());
        assert!(world.get::<Controller>(actor).is_some());
        assert!(world.get::<Weapon>(actor).is_none());
        assert!(world.get::<RigidBody>(actor).unwrap().is_force_enabled(GRAVITY_FORCE));
    }

    #[test]
    fn test_equip_keeps_timer_and_unequip_returns_weapon() {
        let mut sim = Simulation::new(SimConfig::new());
        let actor = sim.spawn_actor(ActorSpec::player(Vec2::ZERO));
        sim.world_mut()
            .get_mut::<AttackScheduler>(actor)
            .unwrap()
            .time_since_last_attack = 0.25;
        assert!(sim.equip_weapon(actor, Weapon::melee(Default::default())));
        assert!(approx_eq(
            sim.world().get::<AttackScheduler>(actor).unwrap().time_since_last_attack,
            0.25
        ));
        assert!(sim.unequip_weapon(actor).is_some());
        assert!(sim.unequip_weapon(actor).is_none());
    }

    #[test]
    fn test_api_tolerates_missing_actor() {
        let mut sim = Simulation::new(SimConfig::new());
        let actor = sim.spawn_actor(ActorSpec::dummy(Vec2::ZERO));
        assert!(sim.despawn_actor(actor));
        assert!(!sim.despawn_actor(actor));
        assert!(!sim.recall_projectile(actor));
        assert!(!sim.apply_knockback(actor, Vec2::ZERO, 1.0, 1.0));
        assert!(!sim.equip_weapon(actor, Weapon::melee(Default::default())));
        sim.send_input(actor, InputAction::Jump);
        sim.advance(0.02);
    }
}
