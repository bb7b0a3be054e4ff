//! Tests for weapon firing, ammo and reload.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use crate::combat::{ProjectileFate, Weapon, WeaponStats};
    use crate::components::ProjectileOwner;
    use crate::events::{sounds, SimulationEvent, Signals};
    use crate::level::LevelGeometry;

    fn fire(weapon: &mut Weapon, now: f64, rng: &mut ChaCha8Rng, signals: &mut Signals) -> bool {
        weapon.fire(now, Vec3::new(0.0, 1.8, 0.0), Vec3::Z, ProjectileOwner::Player, rng, signals)
    }

    #[test]
    fn test_weapon_stats_default() {
        let stats = WeaponStats::default();
        assert_eq!(stats.damage, 25);
        assert_eq!(stats.fire_rate, 0.1);
        assert_eq!(stats.max_ammo, 30);
        assert_eq!(stats.range, 100.0);
        assert_eq!(stats.max_projectiles, 50);
        assert_eq!(stats.reload_duration, 2.0);
    }

    #[test]
    fn test_fire_rate_limit() {
        let mut weapon = Weapon::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut signals = Signals::new();

        assert!(fire(&mut weapon, 0.0, &mut rng, &mut signals));
        assert!(!fire(&mut weapon, 0.05, &mut rng, &mut signals));
        assert_eq!(weapon.ammo(), 29);
        assert!(fire(&mut weapon, 0.125, &mut rng, &mut signals));
        assert_eq!(weapon.ammo(), 28);
    }

    #[test]
    fn test_fire_allowed_exactly_at_cooldown() {
        let mut weapon = Weapon::default();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut signals = Signals::new();

        assert!(fire(&mut weapon, 0.0, &mut rng, &mut signals));
        assert!(fire(&mut weapon, 0.1, &mut rng, &mut signals));
        assert_eq!(weapon.ammo(), 28);
    }

    #[test]
    fn test_magazine_then_reload_scenario() {
        let mut weapon = Weapon::default();
        let level = LevelGeometry::empty();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut signals = Signals::new();

        for shot in 0..30 {
            let now = shot as f64 * 0.25;
            assert!(fire(&mut weapon, now, &mut rng, &mut signals), "shot {}", shot);
        }
        assert_eq!(weapon.ammo(), 0);
        assert!(weapon.is_out_of_ammo());

        signals.drain();
        assert!(!fire(&mut weapon, 10.0, &mut rng, &mut signals));
        assert!(signals.iter().any(|e| *e == SimulationEvent::EmptyClick));

        assert!(weapon.reload(10.0, &mut signals));
        assert!(weapon.is_reloading());
        assert!(!weapon.reload(10.5, &mut signals), "already reloading");

        weapon.update(0.25, 11.75, &level, &mut signals);
        assert!(weapon.is_reloading());
        assert_eq!(weapon.ammo(), 0);

        weapon.update(0.25, 12.0, &level, &mut signals);
        assert!(!weapon.is_reloading());
        assert_eq!(weapon.ammo(), 30);
        assert!(signals.iter().any(|e| *e == SimulationEvent::ReloadFinished { ammo: 30 }));
    }

    #[test]
    fn test_cannot_fire_while_reloading() {
        let mut weapon = Weapon::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut signals = Signals::new();

        assert!(fire(&mut weapon, 0.0, &mut rng, &mut signals));
        assert!(weapon.reload(0.5, &mut signals));
        assert!(!weapon.can_fire(1.0));
        assert!(!fire(&mut weapon, 1.0, &mut rng, &mut signals));
        assert_eq!(weapon.ammo(), 29);
    }

    #[test]
    fn test_reload_on_full_magazine_is_noop() {
        let mut weapon = Weapon::default();
        let mut signals = Signals::new();

        assert!(!weapon.reload(0.0, &mut signals));
        assert!(!weapon.is_reloading());
        assert!(signals.is_empty());
    }

    #[test]
    fn test_fire_emits_gunshot_and_spreads_within_bounds() {
        let mut weapon = Weapon::default();
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let mut signals = Signals::new();

        assert!(fire(&mut weapon, 0.0, &mut rng, &mut signals));
        assert!(signals.iter().any(|e| *e
            == SimulationEvent::Sound {
                name: sounds::GUNSHOT,
                volume: 0.3
            }));

        let projectile = weapon.projectiles().next().expect("one projectile");
        let direction = projectile.direction();
        assert!((direction.length() - 1.0).abs() < 1e-5);
        // ±0.01 jitter on a unit +Z aim
        assert!(direction.x.abs() <= 0.011);
        assert!(direction.y.abs() <= 0.011);
        assert!(direction.z > 0.99);
    }

    #[test]
    fn test_projectile_pool_evicts_oldest() {
        let stats = WeaponStats {
            max_ammo: 100,
            max_projectiles: 5,
            ..WeaponStats::default()
        };
        let mut weapon = Weapon::new(stats);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut signals = Signals::new();

        for shot in 0..8 {
            let origin = Vec3::new(0.0, 1.8, shot as f32);
            assert!(weapon.fire(shot as f64, origin, Vec3::Z, ProjectileOwner::Player, &mut rng, &mut signals));
        }

        assert_eq!(weapon.projectile_count(), 5);
        let origins: Vec<f32> = weapon.projectiles().map(|p| p.origin().z).collect();
        assert_eq!(origins, vec![3.0, 4.0, 5.0, 6.0, 7.0]);
    }

    #[test]
    fn test_update_drops_consumed_projectiles() {
        let mut weapon = Weapon::default();
        let level = LevelGeometry::empty();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut signals = Signals::new();

        assert!(fire(&mut weapon, 0.0, &mut rng, &mut signals));
        assert!(fire(&mut weapon, 0.25, &mut rng, &mut signals));

        if let Some(first) = weapon.projectiles_mut().next() {
            first.destroy(ProjectileFate::Consumed);
        }

        weapon.update(1.0 / 60.0, 0.5, &level, &mut signals);
        assert_eq!(weapon.projectile_count(), 1);
    }
}
