//! One exchange of fire between two fleets.
//!
//! A fleet acts in two steps: every unit picks its targets from the opposing
//! fleet, then every unit fires at what it picked. The attacker acts fully
//! before the defender picks anything, so the defender sees the attacker's
//! post-fire state.

use crate::combat::fleet::{Fleet, Unit};
use crate::combat::rng::Rng;
use crate::data::catalog::Catalog;

/// Shots weaker than `shield / WEAK_SHOT_DIVISOR` bounce off without effect.
pub const WEAK_SHOT_DIVISOR: u32 = 100;
/// Below this fraction of base hull a damaged unit may explode.
pub const EXPLOSION_HULL_RATIO: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shot {
    /// Target already wrecked, or the shot was too weak to register.
    Skipped,
    /// Shield took the whole hit.
    Absorbed,
    /// Hull took damage and the unit is still flying.
    Penetrated,
    Destroyed,
}

/// Choose targets for every unit of `acting`.
///
/// Each unit picks at least one index into the opposing fleet, including
/// units already wrecked this round. While the rapid-fire roll against the
/// opposing fleet's *last* unit succeeds it picks again.
pub fn pick_targets(acting: &mut Fleet, opposing: &Fleet, catalog: &Catalog, rng: &mut Rng) {
    let Some(reference) = opposing.units.last().map(|unit| unit.unit_type) else {
        for unit in &mut acting.units {
            unit.targets.clear();
        }
        return;
    };
    let candidates = opposing.len();

    for unit in &mut acting.units {
        unit.targets.clear();
        let rapid_fire = catalog.rapid_fire(unit.unit_type, reference);
        loop {
            unit.targets.push(rng.below(candidates));
            if rapid_fire <= 0.0 || rng.next_f64() >= rapid_fire {
                break;
            }
        }
    }
}

/// Resolve one shot of `weapon` power against `target`.
pub fn fire_shot(weapon: u32, target: &mut Unit, base_hull: u32, rng: &mut Rng) -> Shot {
    if target.is_destroyed() || weapon < target.shield / WEAK_SHOT_DIVISOR {
        return Shot::Skipped;
    }
    if weapon < target.shield {
        target.shield -= weapon;
        return Shot::Absorbed;
    }

    target.hull = target.hull.saturating_sub(weapon - target.shield);
    target.shield = 0;

    let integrity = f64::from(target.hull) / f64::from(base_hull.max(1));
    if integrity < EXPLOSION_HULL_RATIO && rng.next_f64() < 1.0 - integrity {
        target.hull = 0;
    }

    if target.is_destroyed() {
        Shot::Destroyed
    } else {
        Shot::Penetrated
    }
}

/// Fire every target picked by `acting` at `opposing`. Returns the number of
/// opposing units destroyed.
pub fn attack_targets(
    acting: &Fleet,
    opposing: &mut Fleet,
    catalog: &Catalog,
    rng: &mut Rng,
) -> usize {
    let mut destroyed = 0;
    for unit in &acting.units {
        for &index in &unit.targets {
            let Some(target) = opposing.units.get_mut(index) else {
                continue;
            };
            let base_hull = catalog.stats(target.unit_type).hull;
            if fire_shot(unit.weapon, target, base_hull, rng) == Shot::Destroyed {
                destroyed += 1;
            }
        }
    }
    destroyed
}

/// `acting` picks targets, then fires. Returns opposing units destroyed.
pub fn process(acting: &mut Fleet, opposing: &mut Fleet, catalog: &Catalog, rng: &mut Rng) -> usize {
    pick_targets(acting, opposing, catalog, rng);
    attack_targets(acting, opposing, catalog, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::catalog::UnitType;

    fn unit(unit_type: UnitType) -> Unit {
        Unit::new(unit_type, &Catalog::standard())
    }

    #[test]
    fn weak_shot_is_skipped_without_touching_shield() {
        let mut rng = Rng::new(1);
        let mut target = unit(UnitType::IonCannon);
        target.shield = 1000;
        assert_eq!(fire_shot(9, &mut target, 1600, &mut rng), Shot::Skipped);
        assert_eq!((target.hull, target.shield), (1600, 1000));
    }

    #[test]
    fn shot_on_the_one_percent_boundary_counts() {
        let mut rng = Rng::new(1);
        let mut target = unit(UnitType::IonCannon);
        assert_eq!(fire_shot(10, &mut target, 1600, &mut rng), Shot::Absorbed);
        assert_eq!(target.shield, 990);
    }

    #[test]
    fn shield_absorbs_shot_below_its_value() {
        let mut rng = Rng::new(1);
        let mut target = unit(UnitType::IonCannon);
        assert_eq!(fire_shot(800, &mut target, 1600, &mut rng), Shot::Absorbed);
        assert_eq!((target.hull, target.shield), (1600, 200));
    }

    #[test]
    fn penetrating_shot_strips_shield_and_keeps_hull_above_threshold() {
        let mut rng = Rng::new(1);
        let mut target = unit(UnitType::Battleship);
        // 12000 - (2000 - 400) = 10400, ~87% of base: no explosion roll.
        assert_eq!(fire_shot(2000, &mut target, 12000, &mut rng), Shot::Penetrated);
        assert_eq!((target.hull, target.shield), (10400, 0));
    }

    #[test]
    fn overkill_clamps_hull_at_zero() {
        let mut rng = Rng::new(1);
        let mut target = unit(UnitType::RocketLauncher);
        assert_eq!(fire_shot(2200, &mut target, 400, &mut rng), Shot::Destroyed);
        assert_eq!((target.hull, target.shield), (0, 0));
    }

    #[test]
    fn wrecked_target_is_skipped() {
        let mut rng = Rng::new(1);
        let mut target = unit(UnitType::LightLaser);
        target.hull = 0;
        assert_eq!(fire_shot(5000, &mut target, 400, &mut rng), Shot::Skipped);
    }

    #[test]
    fn heavily_damaged_units_explode_at_the_expected_rate() {
        // A light fighter left with 80 of 800 hull explodes 90% of the time.
        let mut rng = Rng::new(2024);
        let trials = 20_000;
        let mut exploded = 0;
        for _ in 0..trials {
            let mut target = unit(UnitType::LightFighter);
            target.shield = 0;
            if fire_shot(720, &mut target, 800, &mut rng) == Shot::Destroyed {
                exploded += 1;
            }
        }
        let rate = exploded as f64 / trials as f64;
        assert!((rate - 0.9).abs() < 0.02, "explosion rate {rate}");
    }

    #[test]
    fn pick_targets_against_empty_fleet_picks_nothing() {
        let catalog = Catalog::standard();
        let mut rng = Rng::new(5);
        let mut acting = Fleet::uniform(UnitType::Cruiser, 2, &catalog);
        acting.units[0].targets = vec![3];
        pick_targets(&mut acting, &Fleet::default(), &catalog, &mut rng);
        assert!(acting.units.iter().all(|u| u.targets.is_empty()));
    }

    #[test]
    fn targets_stay_within_opposing_fleet() {
        let catalog = Catalog::standard();
        let mut rng = Rng::new(8);
        let mut acting = Fleet::uniform(UnitType::Cruiser, 50, &catalog);
        let opposing = Fleet::uniform(UnitType::RocketLauncher, 7, &catalog);
        pick_targets(&mut acting, &opposing, &catalog, &mut rng);
        for u in &acting.units {
            assert!(!u.targets.is_empty());
            assert!(u.targets.iter().all(|&t| t < 7));
        }
    }
}
