//! Tests for enemy AI behaviour.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use crate::ai::{AIState, AttackTarget, Enemy, EnemyConfig};
    use crate::components::EnemyId;
    use crate::events::{SimulationEvent, Signals};
    use crate::level::{BoxSpec, LevelGeometry, LevelLayout};

    /// Stationary punching bag
    struct Dummy {
        position: Vec3,
        hits: Vec<(u32, f64)>,
        alive: bool,
    }

    impl Dummy {
        fn at(position: Vec3) -> Self {
            Self {
                position,
                hits: Vec::new(),
                alive: true,
            }
        }
    }

    impl AttackTarget for Dummy {
        fn target_position(&self) -> Vec3 {
            self.position
        }

        fn is_targetable(&self) -> bool {
            self.alive
        }

        fn receive_attack(&mut self, damage: u32, now: f64, _signals: &mut Signals) -> bool {
            self.hits.push((damage, now));
            false
        }
    }

    fn enemy_at(position: Vec3) -> Enemy {
        Enemy::new(EnemyId(1), position, EnemyConfig::default())
    }

    fn step(enemy: &mut Enemy, dummy: &mut Dummy, dt: f32, now: f64) {
        let level = LevelGeometry::empty();
        let mut signals = Signals::new();
        enemy.update(dt, now, Some(dummy), &level, &mut signals);
    }

    #[test]
    fn test_stays_idle_out_of_range() {
        let mut enemy = enemy_at(Vec3::ZERO);
        let mut dummy = Dummy::at(Vec3::new(0.0, 1.8, 20.0));

        step(&mut enemy, &mut dummy, 0.5, 0.5);

        assert_eq!(enemy.state(), AIState::Idle);
        assert_eq!(enemy.position(), Vec3::ZERO);
    }

    #[test]
    fn test_detects_then_chases_horizontally() {
        let mut enemy = enemy_at(Vec3::ZERO);
        // Height difference is ignored: only XZ distance counts
        let mut dummy = Dummy::at(Vec3::new(0.0, 1.8, 10.0));

        step(&mut enemy, &mut dummy, 0.5, 0.5);
        assert_eq!(enemy.state(), AIState::Chasing);

        step(&mut enemy, &mut dummy, 0.5, 1.0);
        assert_eq!(enemy.velocity(), Vec3::new(0.0, 0.0, 2.0));
        assert_eq!(enemy.position(), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(enemy.yaw(), 0.0);
    }

    #[test]
    fn test_attacks_on_cooldown() {
        let mut enemy = enemy_at(Vec3::ZERO);
        let mut dummy = Dummy::at(Vec3::new(0.0, 1.8, 1.5));

        step(&mut enemy, &mut dummy, 0.5, 0.5); // idle → chasing
        step(&mut enemy, &mut dummy, 0.5, 1.0); // chasing → attacking
        assert_eq!(enemy.state(), AIState::Attacking);
        assert_eq!(enemy.velocity(), Vec3::ZERO);

        let mut now = 1.0;
        for _ in 0..8 {
            now += 0.5;
            step(&mut enemy, &mut dummy, 0.5, now);
        }

        // 1.5, 3.0, 4.5 (5.0 is inside the cooldown)
        assert_eq!(dummy.hits, vec![(10, 1.5), (10, 3.0), (10, 4.5)]);
    }

    #[test]
    fn test_attacking_resumes_chase_when_target_backs_off() {
        let mut enemy = enemy_at(Vec3::ZERO);
        let mut dummy = Dummy::at(Vec3::new(0.0, 1.8, 1.0));

        step(&mut enemy, &mut dummy, 0.1, 0.1);
        step(&mut enemy, &mut dummy, 0.1, 0.2);
        assert_eq!(enemy.state(), AIState::Attacking);

        dummy.position = Vec3::new(0.0, 1.8, 5.0);
        step(&mut enemy, &mut dummy, 0.1, 0.3);
        assert_eq!(enemy.state(), AIState::Chasing);
    }

    #[test]
    fn test_gives_up_beyond_hysteresis() {
        let mut enemy = enemy_at(Vec3::ZERO);
        let mut dummy = Dummy::at(Vec3::new(0.0, 1.8, 14.0));

        step(&mut enemy, &mut dummy, 0.1, 0.1);
        assert_eq!(enemy.state(), AIState::Chasing);

        dummy.position = Vec3::new(0.0, 1.8, 20.0);
        step(&mut enemy, &mut dummy, 0.1, 0.2);
        assert_eq!(enemy.state(), AIState::Chasing);

        dummy.position = Vec3::new(0.0, 1.8, 30.0);
        step(&mut enemy, &mut dummy, 0.1, 0.3);
        assert_eq!(enemy.state(), AIState::Idle);
        assert_eq!(enemy.velocity(), Vec3::ZERO);
    }

    #[test]
    fn test_damage_kills_exactly_once() {
        let mut enemy = enemy_at(Vec3::ZERO);
        let mut signals = Signals::new();

        assert!(!enemy.take_damage(25, 1.0, &mut signals));
        assert_eq!(enemy.health().current, 25);
        assert!(enemy.take_damage(25, 1.1, &mut signals));
        assert!(!enemy.is_alive());
        assert_eq!(enemy.state(), AIState::Dead { died_at: 1.1 });

        // Overkill on a corpse is ignored
        assert!(!enemy.take_damage(100, 1.2, &mut signals));
        assert_eq!(enemy.health().current, 0);

        let deaths = signals
            .iter()
            .filter(|e| matches!(e, SimulationEvent::EnemyDied { .. }))
            .count();
        assert_eq!(deaths, 1);
    }

    #[test]
    fn test_damage_wakes_idle_enemy() {
        let mut enemy = enemy_at(Vec3::ZERO);
        let mut signals = Signals::new();

        enemy.take_damage(10, 0.0, &mut signals);
        assert_eq!(enemy.state(), AIState::Chasing);
    }

    #[test]
    fn test_dead_enemy_ignores_ai() {
        let mut enemy = enemy_at(Vec3::ZERO);
        let mut dummy = Dummy::at(Vec3::new(0.0, 1.8, 1.0));
        let mut signals = Signals::new();
        enemy.take_damage(50, 0.0, &mut signals);

        step(&mut enemy, &mut dummy, 0.5, 0.5);
        step(&mut enemy, &mut dummy, 0.5, 1.0);

        assert!(dummy.hits.is_empty());
        assert_eq!(enemy.position(), Vec3::ZERO);
    }

    #[test]
    fn test_no_target_holds_position() {
        let level = LevelGeometry::empty();
        let mut signals = Signals::new();
        let mut enemy = enemy_at(Vec3::ZERO);

        enemy.update(0.5, 0.5, None, &level, &mut signals);
        assert_eq!(enemy.state(), AIState::Idle);

        let mut dead = Dummy::at(Vec3::new(0.0, 0.0, 1.0));
        dead.alive = false;
        enemy.update(0.5, 1.0, Some(&mut dead), &level, &mut signals);
        assert_eq!(enemy.state(), AIState::Idle);
        assert_eq!(enemy.position(), Vec3::ZERO);
    }

    #[test]
    fn test_movement_clamped_to_play_area() {
        let mut enemy = enemy_at(Vec3::new(17.9, 0.0, 0.0));
        let mut dummy = Dummy::at(Vec3::new(30.0, 1.8, 0.0));

        step(&mut enemy, &mut dummy, 0.5, 0.5);
        step(&mut enemy, &mut dummy, 0.5, 1.0);

        assert_eq!(enemy.state(), AIState::Chasing);
        assert_eq!(enemy.position().x, 18.0);
    }

    #[test]
    fn test_chase_ignores_static_boxes() {
        // Box occupies x 3..5 across the chase line
        let layout = LevelLayout {
            walls: Vec::new(),
            obstacles: vec![BoxSpec::new([4.0, 1.0, 0.0], [2.0, 2.0, 2.0])],
            enemy_spawns: Vec::new(),
            ..LevelLayout::default()
        };
        let level = LevelGeometry::from_layout(&layout).unwrap();
        let mut enemy = enemy_at(Vec3::new(2.0, 0.0, 0.0));
        let mut dummy = Dummy::at(Vec3::new(12.0, 1.8, 0.0));
        let mut signals = Signals::new();

        enemy.update(0.5, 0.5, Some(&mut dummy), &level, &mut signals);
        enemy.update(0.5, 1.0, Some(&mut dummy), &level, &mut signals);
        enemy.update(0.5, 1.5, Some(&mut dummy), &level, &mut signals);

        assert_eq!(enemy.state(), AIState::Chasing);
        assert_eq!(enemy.position(), Vec3::new(4.0, 0.0, 0.0));
        assert!(level.collides(enemy.position(), enemy.radius()));
    }
}
