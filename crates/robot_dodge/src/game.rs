//! Robot Dodge game state and per-tick simulation
//!
//! One tick runs: optional robot spawn, player input, scoring, motion, then
//! collision resolution. Resolution works on snapshots of the robot and
//! bullet populations and applies every removal after the passes, so nothing
//! is skipped or handled twice while the populations shrink.

use std::collections::HashSet;

use puddle_engine::assets::{AssetError, AssetLoader, MeshData, ResourceCache};
use puddle_engine::config::{Config, ConfigError};
use puddle_engine::ecs::{EntityId, Transform, World};
use puddle_engine::foundation::math::{utils, Vec3};
use puddle_engine::input::{InputSource, Keys};
use puddle_engine::physics::{ColliderShape, CollisionError, PlayArea};
use puddle_engine::render::{Camera, RenderPayload, RenderTarget, TextureHandle};
use puddle_engine::{AppError, Application};
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

use crate::components::{Bullet, Player, PlayerState, Robot};
use crate::config::{GameConfig, ModelAsset};
use crate::spawner::{self, SpawnPlan};

const FLOOR_PITCH_DEGREES: f32 = 90.0;
const FLOOR_SCALE: f32 = 20.0;

/// Game errors
#[derive(Error, Debug)]
pub enum GameError {
    /// Collision test failed
    #[error("Collision error: {0}")]
    Collision(#[from] CollisionError),

    /// Mesh could not be loaded
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    /// Configuration rejected
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// A tracked entity is no longer in the world
    #[error("Entity {0:?} is missing from the world")]
    MissingEntity(EntityId),

    /// No robot model for this variant
    #[error("Unknown robot variant {0}")]
    UnknownVariant(usize),
}

impl From<GameError> for AppError {
    fn from(error: GameError) -> Self {
        match error {
            GameError::Collision(error) => Self::Collision(error),
            GameError::Asset(error) => Self::Asset(error),
            GameError::Config(error) => Self::Config(error),
            other => Self::GameLogic(other.to_string()),
        }
    }
}

/// What the HUD shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HudState {
    /// Remaining lives (drawn as full hearts)
    pub lives: u32,
    /// Starting lives (full plus empty hearts)
    pub max_lives: u32,
    /// Whole seconds survived
    pub score: u32,
    /// Whether to show the game-over banner
    pub game_over: bool,
}

/// Robot Dodge session
pub struct RobotDodge {
    config: GameConfig,
    world: World,
    rng: StdRng,
    meshes: ResourceCache<MeshData>,
    camera: Camera,
    player: Player,
    floor: EntityId,
    robot_models: Vec<RenderPayload>,
    bullet_model: RenderPayload,
    robots: Vec<Robot>,
    bullets: Vec<Bullet>,
}

impl RobotDodge {
    /// Start a session
    ///
    /// Every mesh is loaded up front through `loader`, once per distinct
    /// path; any load failure aborts startup.
    pub fn new<L>(config: GameConfig, loader: &mut L) -> Result<Self, GameError>
    where
        L: AssetLoader<Output = MeshData> + ?Sized,
    {
        config.validate()?;

        let rng = config
            .gameplay
            .seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);

        let mut meshes = ResourceCache::new();
        let assets = &config.assets;
        let player_model = load_model(&mut meshes, loader, &assets.player)?;
        let floor_model = load_model(&mut meshes, loader, &assets.floor)?;
        let bullet_model = load_model(&mut meshes, loader, &assets.bullet)?;
        let mut robot_models = Vec::with_capacity(assets.robots.len());
        for asset in &assets.robots {
            robot_models.push(load_model(&mut meshes, loader, asset)?);
        }

        let mut world = World::new();
        let gameplay = &config.gameplay;

        let player_entity = world.spawn_rendered(
            Transform::new().with_uniform_scale(gameplay.player_scale),
            player_model,
        );
        world.attach_collider(player_entity, ColliderShape::sphere(gameplay.player_radius)?)?;
        let player = Player::new(player_entity, gameplay.starting_lives, gameplay.player_speed);

        let floor = world.spawn_rendered(
            Transform::new()
                .with_rotation(Vec3::new(FLOOR_PITCH_DEGREES, 0.0, 0.0))
                .with_uniform_scale(FLOOR_SCALE),
            floor_model,
        );

        let mut camera = Camera::new(
            config.window.width,
            config.window.height,
            config.camera.fov_degrees,
            config.camera.near,
            config.camera.far,
        );
        camera.transform.set_position(config.camera.position);
        camera.transform.set_rotation(config.camera.rotation);

        log::info!(
            "Robot Dodge started: {} lives, {} robot variants, {} meshes loaded",
            gameplay.starting_lives,
            robot_models.len(),
            meshes.len()
        );

        Ok(Self {
            config,
            world,
            rng,
            meshes,
            camera,
            player,
            floor,
            robot_models,
            bullet_model,
            robots: Vec::new(),
            bullets: Vec::new(),
        })
    }

    /// Advance the game by one tick
    ///
    /// Does nothing once the game is over.
    pub fn update(&mut self, input: &dyn InputSource, delta_time: f32) -> Result<(), GameError> {
        if self.is_game_over() {
            return Ok(());
        }
        let delta_time = delta_time.max(0.0);

        if spawner::should_spawn(&mut self.rng, self.config.gameplay.spawn_chance) {
            let target = self.player_position()?;
            let plan = spawner::plan_robot(
                &mut self.rng,
                &self.config.play_area,
                &target,
                self.config.gameplay.robot_speed,
                self.robot_models.len(),
            );
            self.spawn_robot(plan)?;
        }

        self.handle_input(input, delta_time)?;
        self.player.add_score(delta_time);
        self.advance(delta_time);
        self.resolve_collisions()
    }

    fn handle_input(&mut self, input: &dyn InputSource, delta_time: f32) -> Result<(), GameError> {
        let player = self.player.entity();

        if input.is_key_pressed(Keys::FIRE) {
            let transform = self.world.transform(player).ok_or(GameError::MissingEntity(player))?;
            let (origin, direction) = (transform.position(), transform.forward());
            self.fire_bullet(origin, direction)?;
        }

        let movement = [
            (Keys::LEFT, Vec3::new(-1.0, 0.0, 0.0)),
            (Keys::RIGHT, Vec3::new(1.0, 0.0, 0.0)),
            (Keys::FORWARD, Vec3::new(0.0, 0.0, -1.0)),
            (Keys::BACK, Vec3::new(0.0, 0.0, 1.0)),
        ];
        if !movement.iter().any(|(key, _)| input.is_key_down(*key)) {
            return Ok(());
        }

        let direction = movement
            .iter()
            .filter(|(key, _)| input.is_key_down(*key))
            .fold(Vec3::zeros(), |direction, (_, step)| direction + step);

        let speed = self.player.speed();
        let transform = self.world.transform_mut(player).ok_or(GameError::MissingEntity(player))?;
        transform.translate(direction * speed * delta_time);
        transform.set_rotation(Vec3::new(0.0, utils::yaw_towards(&direction), 0.0));
        Ok(())
    }

    fn advance(&mut self, delta_time: f32) {
        let moves = self
            .robots
            .iter()
            .map(|robot| (robot.entity, robot.velocity))
            .chain(self.bullets.iter().map(|bullet| (bullet.entity, bullet.velocity)));

        for (entity, velocity) in moves {
            if let Some(transform) = self.world.transform_mut(entity) {
                transform.translate(velocity * delta_time);
            }
        }
    }

    /// Apply this tick's hits and culling
    ///
    /// Robots touching the player damage it and are removed; robots outside
    /// the play area are removed. Each remaining robot is then tested against
    /// every bullet not yet spent; a hit removes the robot and every bullet
    /// touching it. Finally bullets outside
    /// the play area are removed. Does nothing once the game is over.
    pub fn resolve_collisions(&mut self) -> Result<(), GameError> {
        if self.is_game_over() {
            return Ok(());
        }

        let player = self.player.entity();
        let area = self.config.play_area;
        let mut dead_robots = HashSet::new();
        let mut dead_bullets = HashSet::new();

        for robot in &self.robots {
            if self.world.check_collision(player, robot.entity)? {
                self.player.take_damage(self.config.gameplay.damage);
                dead_robots.insert(robot.entity);
            } else if !self.is_inside(&area, robot.entity)? {
                dead_robots.insert(robot.entity);
            }
        }

        let targets: Vec<EntityId> = self
            .robots
            .iter()
            .map(|robot| robot.entity)
            .filter(|entity| !dead_robots.contains(entity))
            .collect();
        for robot in targets {
            for bullet in &self.bullets {
                if !dead_bullets.contains(&bullet.entity) && self.world.check_collision(robot, bullet.entity)? {
                    dead_robots.insert(robot);
                    dead_bullets.insert(bullet.entity);
                }
            }
        }

        for bullet in &self.bullets {
            if !dead_bullets.contains(&bullet.entity) && !self.is_inside(&area, bullet.entity)? {
                dead_bullets.insert(bullet.entity);
            }
        }

        if !dead_robots.is_empty() || !dead_bullets.is_empty() {
            log::debug!(
                "Removing {} robots and {} bullets",
                dead_robots.len(),
                dead_bullets.len()
            );
        }
        for entity in dead_robots.iter().chain(dead_bullets.iter()) {
            self.world.despawn(*entity);
        }
        self.robots.retain(|robot| !dead_robots.contains(&robot.entity));
        self.bullets.retain(|bullet| !dead_bullets.contains(&bullet.entity));

        Ok(())
    }

    fn is_inside(&self, area: &PlayArea, entity: EntityId) -> Result<bool, GameError> {
        let transform = self.world.transform(entity).ok_or(GameError::MissingEntity(entity))?;
        Ok(area.contains(&transform.position()))
    }

    /// Spawn a robot of `variant` at `position`, heading for the player
    pub fn spawn_robot_at(&mut self, position: Vec3, variant: usize) -> Result<EntityId, GameError> {
        let target = self.player_position()?;
        let (velocity, yaw_degrees) = spawner::aim(&position, &target, self.config.gameplay.robot_speed);
        self.spawn_robot(SpawnPlan {
            position,
            velocity,
            yaw_degrees,
            variant,
        })
    }

    fn spawn_robot(&mut self, plan: SpawnPlan) -> Result<EntityId, GameError> {
        let model = self
            .robot_models
            .get(plan.variant)
            .cloned()
            .ok_or(GameError::UnknownVariant(plan.variant))?;
        let gameplay = &self.config.gameplay;

        let entity = self.world.spawn_rendered(
            Transform::from_position(plan.position)
                .with_rotation(Vec3::new(0.0, plan.yaw_degrees, 0.0))
                .with_uniform_scale(gameplay.robot_scale),
            model,
        );
        self.world.attach_collider(entity, ColliderShape::sphere(gameplay.robot_radius)?)?;
        self.robots.push(Robot {
            entity,
            velocity: plan.velocity,
            variant: plan.variant,
        });

        log::debug!("Spawned robot {:?} (variant {}) at {:?}", entity, plan.variant, plan.position);
        Ok(entity)
    }

    /// Fire a bullet from `origin` travelling along `direction`
    pub fn fire_bullet(&mut self, origin: Vec3, direction: Vec3) -> Result<EntityId, GameError> {
        let gameplay = &self.config.gameplay;
        let entity = self.world.spawn_rendered(
            Transform::from_position(origin)
                .with_rotation(Vec3::new(0.0, utils::yaw_towards(&direction), 0.0))
                .with_uniform_scale(gameplay.bullet_scale),
            self.bullet_model.clone(),
        );
        self.world.attach_collider(entity, ColliderShape::sphere(gameplay.bullet_radius)?)?;
        self.bullets.push(Bullet {
            entity,
            velocity: direction * gameplay.bullet_speed,
        });

        log::debug!("Fired bullet {:?} from {:?}", entity, origin);
        Ok(entity)
    }

    /// Submit the player, floor, robots and bullets to `target`
    pub fn draw(&self, target: &mut dyn RenderTarget) {
        let view_projection = self.camera.view_projection();
        let drawn = [self.player.entity(), self.floor]
            .into_iter()
            .chain(self.robots.iter().map(|robot| robot.entity))
            .chain(self.bullets.iter().map(|bullet| bullet.entity));

        for id in drawn {
            let Some(entity) = self.world.get(id) else {
                log::warn!("Skipping draw of missing entity {:?}", id);
                continue;
            };
            if let Some(payload) = entity.render() {
                target.submit(&entity.transform.world_matrix(), &view_projection, payload);
            }
        }
    }

    /// Lives, score and game-over state for the HUD
    pub fn hud(&self) -> HudState {
        HudState {
            lives: self.player.lives(),
            max_lives: self.player.max_lives(),
            score: self.player.score().max(0.0) as u32,
            game_over: self.is_game_over(),
        }
    }

    fn player_position(&self) -> Result<Vec3, GameError> {
        let player = self.player.entity();
        self.world
            .transform(player)
            .map(Transform::position)
            .ok_or(GameError::MissingEntity(player))
    }

    /// Whether the player has run out of lives
    pub fn is_game_over(&self) -> bool {
        self.player.state() == PlayerState::GameOver
    }

    /// Player state
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Live robots
    pub fn robots(&self) -> &[Robot] {
        &self.robots
    }

    /// Live bullets
    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    /// Entity store
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable entity store, for scripted scenarios
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Loaded meshes
    pub fn meshes(&self) -> &ResourceCache<MeshData> {
        &self.meshes
    }

    /// Model used for robots of `variant`
    pub fn robot_model(&self, variant: usize) -> Option<&RenderPayload> {
        self.robot_models.get(variant)
    }

    /// Scene camera
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Session configuration
    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

fn load_model<L>(
    meshes: &mut ResourceCache<MeshData>,
    loader: &mut L,
    asset: &ModelAsset,
) -> Result<RenderPayload, AssetError>
where
    L: AssetLoader<Output = MeshData> + ?Sized,
{
    let mesh = meshes.load_or_get_with(loader, &asset.mesh)?;
    Ok(RenderPayload::new(mesh, TextureHandle::new(asset.texture.as_str())))
}

impl Application for RobotDodge {
    fn update(&mut self, input: &dyn InputSource, delta_time: f32) -> Result<(), AppError> {
        Ok(Self::update(self, input, delta_time)?)
    }

    fn draw(&mut self, target: &mut dyn RenderTarget) -> Result<(), AppError> {
        Self::draw(self, target);
        Ok(())
    }

    fn should_exit(&self) -> bool {
        self.config.gameplay.exit_on_game_over && self.is_game_over()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use puddle_engine::assets::Vertex;
    use puddle_engine::input::KeyboardState;
    use puddle_engine::render::DrawRecorder;
    use std::collections::HashMap;
    use std::rc::Rc;

    #[derive(Default)]
    struct StubLoader {
        calls: HashMap<String, usize>,
        missing: Option<String>,
    }

    impl AssetLoader for StubLoader {
        type Output = MeshData;

        fn load(&mut self, path: &str) -> Result<MeshData, AssetError> {
            *self.calls.entry(path.to_string()).or_insert(0) += 1;
            if self.missing.as_deref() == Some(path) {
                return Err(AssetError::NotFound(path.to_string()));
            }
            let vertex = Vertex {
                position: [0.0, 0.0, 0.0],
                normal: [0.0, 1.0, 0.0],
                tex_coord: [0.0, 0.0],
            };
            Ok(MeshData::new(vec![vertex; 3], vec![0, 1, 2]))
        }
    }

    fn quiet_config() -> GameConfig {
        let mut config = GameConfig::default();
        config.gameplay.spawn_chance = 0.0;
        config.gameplay.seed = Some(7);
        config
    }

    fn game(config: GameConfig) -> RobotDodge {
        puddle_engine::foundation::logging::init_for_tests();
        RobotDodge::new(config, &mut StubLoader::default()).unwrap()
    }

    fn position(game: &RobotDodge, entity: EntityId) -> Vec3 {
        game.world().transform(entity).unwrap().position()
    }

    fn keys(held: Keys) -> KeyboardState {
        let mut keyboard = KeyboardState::new();
        keyboard.update(held);
        keyboard
    }

    #[test]
    fn test_robot_touching_player_costs_one_life() {
        let mut game = game(quiet_config());
        let robot = game.spawn_robot_at(Vec3::new(0.3, 0.0, 0.0), 0).unwrap();

        game.resolve_collisions().unwrap();

        assert!(game.robots().is_empty());
        assert!(!game.world().contains(robot));
        assert_eq!(game.player().lives(), 4);
        assert!(!game.is_game_over());
    }

    #[test]
    fn test_last_life_ends_game_and_freezes_state() {
        let mut config = quiet_config();
        config.gameplay.starting_lives = 1;
        let mut game = game(config);

        game.spawn_robot_at(Vec3::new(0.3, 0.0, 0.0), 0).unwrap();
        let survivor = game.spawn_robot_at(Vec3::new(-5.0, 0.0, -5.0), 1).unwrap();
        game.resolve_collisions().unwrap();

        assert!(game.is_game_over());
        assert_eq!(game.player().lives(), 0);
        assert_eq!(game.robots().len(), 1);
        let frozen_at = position(&game, survivor);

        game.resolve_collisions().unwrap();
        game.update(&keys(Keys::FIRE | Keys::LEFT), 0.5).unwrap();

        assert_eq!(game.player().lives(), 0);
        assert_eq!(game.robots().len(), 1);
        assert!(game.bullets().is_empty());
        assert_eq!(position(&game, survivor), frozen_at);
        assert_eq!(game.hud().score, 0);
        assert!(game.hud().game_over);
    }

    #[test]
    fn test_bullet_outside_play_area_is_removed() {
        let mut game = game(quiet_config());
        let right = game.config().play_area.right;
        let bullet = game.fire_bullet(Vec3::new(right + 1.0, 0.0, 0.0), Vec3::x()).unwrap();

        game.resolve_collisions().unwrap();

        assert!(game.bullets().is_empty());
        assert!(!game.world().contains(bullet));
    }

    #[test]
    fn test_robot_on_edge_stays_robot_past_edge_goes() {
        let mut game = game(quiet_config());
        let on_edge = game.spawn_robot_at(Vec3::new(6.0, 0.0, -3.0), 0).unwrap();
        game.spawn_robot_at(Vec3::new(-7.5, 0.0, -3.0), 0).unwrap();

        game.resolve_collisions().unwrap();

        assert_eq!(game.robots().len(), 1);
        assert_eq!(game.robots()[0].entity, on_edge);
        assert_eq!(game.player().lives(), 5);
    }

    #[test]
    fn test_bullet_and_robot_destroy_each_other() {
        let mut game = game(quiet_config());
        let robot = game.spawn_robot_at(Vec3::new(3.0, 0.0, -3.0), 2).unwrap();
        let hit = game.fire_bullet(Vec3::new(3.5, 0.0, -3.0), Vec3::x()).unwrap();
        let miss = game.fire_bullet(Vec3::new(-3.0, 0.0, -3.0), Vec3::x()).unwrap();

        game.resolve_collisions().unwrap();

        assert!(game.robots().is_empty());
        assert!(!game.world().contains(robot));
        assert!(!game.world().contains(hit));
        assert_eq!(game.bullets().len(), 1);
        assert_eq!(game.bullets()[0].entity, miss);
        assert_eq!(game.player().lives(), 5);
    }

    #[test]
    fn test_every_bullet_touching_a_robot_is_spent() {
        let mut game = game(quiet_config());
        game.spawn_robot_at(Vec3::new(3.0, 0.0, -3.0), 0).unwrap();
        let other = game.spawn_robot_at(Vec3::new(-3.0, 0.0, -3.0), 1).unwrap();
        game.fire_bullet(Vec3::new(3.3, 0.0, -3.0), Vec3::x()).unwrap();
        game.fire_bullet(Vec3::new(2.7, 0.0, -3.0), Vec3::x()).unwrap();

        game.resolve_collisions().unwrap();

        assert_eq!(game.robots().len(), 1);
        assert_eq!(game.robots()[0].entity, other);
        assert!(game.bullets().is_empty());
    }

    #[test]
    fn test_spent_bullet_does_not_hit_a_second_robot() {
        let mut game = game(quiet_config());
        let first = game.spawn_robot_at(Vec3::new(3.0, 0.0, -3.0), 0).unwrap();
        let second = game.spawn_robot_at(Vec3::new(3.5, 0.0, -3.0), 0).unwrap();
        game.fire_bullet(Vec3::new(3.25, 0.0, -3.0), Vec3::x()).unwrap();

        game.resolve_collisions().unwrap();

        assert!(!game.world().contains(first));
        assert_eq!(game.robots().len(), 1);
        assert_eq!(game.robots()[0].entity, second);
        assert!(game.bullets().is_empty());
    }

    #[test]
    fn test_default_session_stops_after_game_over() {
        let mut config = GameConfig::default();
        config.gameplay.spawn_chance = 0.0;
        config.gameplay.seed = Some(7);
        config.gameplay.starting_lives = 1;
        let mut game = game(config);
        game.spawn_robot_at(Vec3::new(0.2, 0.0, 0.0), 0).unwrap();

        let mut engine = puddle_engine::Engine::new(game.config().engine.clone()).unwrap();
        let mut recorder = DrawRecorder::default();
        let stats = engine
            .run(&mut game, &mut puddle_engine::input::ScriptedInput::default(), &mut recorder)
            .unwrap();

        assert!(game.is_game_over());
        assert_eq!(stats.frames, 1);
        assert_eq!(recorder.calls().len(), 2);
    }

    #[test]
    fn test_robot_that_hits_player_is_not_shot_too() {
        let mut game = game(quiet_config());
        game.spawn_robot_at(Vec3::new(0.3, 0.0, 0.0), 0).unwrap();
        let bullet = game.fire_bullet(Vec3::new(0.5, 0.0, 0.0), Vec3::x()).unwrap();

        game.resolve_collisions().unwrap();

        assert_eq!(game.player().lives(), 4);
        assert!(game.robots().is_empty());
        assert_eq!(game.bullets().len(), 1);
        assert_eq!(game.bullets()[0].entity, bullet);
    }

    #[test]
    fn test_robots_advance_towards_player() {
        let mut game = game(quiet_config());
        let robot = game.spawn_robot_at(Vec3::new(-7.0, 0.0, 0.0), 0).unwrap();

        game.update(&KeyboardState::new(), 0.5).unwrap();

        assert_relative_eq!(position(&game, robot), Vec3::new(-6.0, 0.0, 0.0), epsilon = 1e-5);
        assert_relative_eq!(game.robots()[0].velocity, Vec3::new(2.0, 0.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_input_moves_player_and_fires_along_facing() {
        let mut game = game(quiet_config());
        let player = game.player().entity();

        game.update(&keys(Keys::RIGHT | Keys::FIRE), 0.05).unwrap();

        assert_relative_eq!(position(&game, player), Vec3::new(0.25, 0.0, 0.0), epsilon = 1e-5);
        assert_relative_eq!(game.world().transform(player).unwrap().rotation().y, 90.0, epsilon = 1e-4);

        assert_eq!(game.bullets().len(), 1);
        let bullet = game.bullets()[0];
        assert_relative_eq!(bullet.velocity, Vec3::new(0.0, 0.0, 10.0), epsilon = 1e-4);
        assert_relative_eq!(position(&game, bullet.entity), Vec3::new(0.0, 0.0, 0.5), epsilon = 1e-4);

        let mut keyboard = keys(Keys::FIRE);
        keyboard.update(Keys::FIRE);
        game.update(&keyboard, 0.01).unwrap();
        assert_eq!(game.bullets().len(), 1, "holding fire does not refire");
    }

    #[test]
    fn test_opposite_keys_cancel_movement() {
        let mut game = game(quiet_config());
        let player = game.player().entity();

        game.update(&keys(Keys::LEFT | Keys::RIGHT), 0.5).unwrap();

        assert_relative_eq!(position(&game, player), Vec3::zeros(), epsilon = 1e-6);
    }

    #[test]
    fn test_score_accumulates_elapsed_time() {
        let mut game = game(quiet_config());
        for _ in 0..3 {
            game.update(&KeyboardState::new(), 0.5).unwrap();
        }

        assert_relative_eq!(game.player().score(), 1.5, epsilon = 1e-6);
        assert_eq!(
            game.hud(),
            HudState {
                lives: 5,
                max_lives: 5,
                score: 1,
                game_over: false,
            }
        );
    }

    #[test]
    fn test_certain_spawn_places_robot_on_perimeter() {
        let mut config = quiet_config();
        config.gameplay.spawn_chance = 1.0;
        let mut game = game(config);

        game.update(&KeyboardState::new(), 0.0).unwrap();

        assert_eq!(game.robots().len(), 1);
        let area = game.config().play_area;
        let spawned = position(&game, game.robots()[0].entity);
        assert!(area.contains(&spawned));
        assert!(
            spawned.x == area.left || spawned.x == area.right || spawned.z == area.top || spawned.z == area.bottom,
            "{spawned:?} is not on the perimeter"
        );
    }

    #[test]
    fn test_seeded_sessions_replay_identically() {
        let mut config = quiet_config();
        config.gameplay.spawn_chance = 0.3;
        config.gameplay.seed = Some(42);

        let mut first = game(config.clone());
        let mut second = game(config);
        for _ in 0..30 {
            first.update(&KeyboardState::new(), 0.1).unwrap();
            second.update(&KeyboardState::new(), 0.1).unwrap();
        }

        let layout = |game: &RobotDodge| -> Vec<(usize, Vec3)> {
            game.robots()
                .iter()
                .map(|robot| (robot.variant, position(game, robot.entity)))
                .collect()
        };
        assert_eq!(layout(&first), layout(&second));
        assert_eq!(first.hud(), second.hud());
    }

    #[test]
    fn test_shared_mesh_paths_load_once() {
        let mut config = quiet_config();
        config.assets.robots[1].mesh = config.assets.robots[0].mesh.clone();
        let mut loader = StubLoader::default();

        let game = RobotDodge::new(config.clone(), &mut loader).unwrap();

        assert_eq!(loader.calls[&config.assets.robots[0].mesh], 1);
        let first = game.robot_model(0).unwrap();
        let second = game.robot_model(1).unwrap();
        assert!(Rc::ptr_eq(&first.mesh, &second.mesh));
        assert_ne!(first.texture, second.texture);
        assert_eq!(game.meshes().len(), 5);
    }

    #[test]
    fn test_missing_mesh_is_fatal() {
        let config = quiet_config();
        let mut loader = StubLoader {
            missing: Some(config.assets.bullet.mesh.clone()),
            ..Default::default()
        };

        assert!(matches!(
            RobotDodge::new(config, &mut loader),
            Err(GameError::Asset(AssetError::NotFound(_)))
        ));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = quiet_config();
        config.gameplay.player_radius = -1.0;

        assert!(matches!(
            RobotDodge::new(config, &mut StubLoader::default()),
            Err(GameError::Config(ConfigError::Invalid(_)))
        ));
    }

    #[test]
    fn test_unknown_variant_is_rejected() {
        let mut game = game(quiet_config());
        assert!(matches!(
            game.spawn_robot_at(Vec3::new(-7.0, 0.0, 0.0), 9),
            Err(GameError::UnknownVariant(9))
        ));
        assert!(game.robots().is_empty());
    }

    #[test]
    fn test_draw_submits_every_visible_entity() {
        let mut game = game(quiet_config());
        game.spawn_robot_at(Vec3::new(-7.0, 0.0, 0.0), 0).unwrap();
        game.fire_bullet(Vec3::new(1.0, 0.0, 0.0), Vec3::x()).unwrap();
        let mut recorder = DrawRecorder::default();

        game.draw(&mut recorder);

        let calls = recorder.calls();
        assert_eq!(calls.len(), 4);
        assert_eq!(calls[0].texture.path(), "Robot/Robot.png");
        assert_eq!(calls[1].texture.path(), "floor.jpg");
        let view_projection = game.camera().view_projection();
        assert!(calls.iter().all(|call| call.view_projection == view_projection));
        assert_relative_eq!(calls[1].world_matrix[(1, 2)], -FLOOR_SCALE, epsilon = 1e-3);
    }

    #[test]
    fn test_application_stops_on_game_over_when_configured() {
        let mut config = quiet_config();
        config.gameplay.starting_lives = 1;
        config.gameplay.exit_on_game_over = true;
        let mut game = game(config);
        assert!(!Application::should_exit(&game));

        game.spawn_robot_at(Vec3::new(0.0, 0.0, 0.2), 0).unwrap();
        Application::update(&mut game, &KeyboardState::new(), 0.0).unwrap();

        assert!(Application::should_exit(&game));
    }
}
