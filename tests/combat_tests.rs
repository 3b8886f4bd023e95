use fleetlab::combat::{
    loss_ratio, pick_targets, BattleOutcome, BattleReport, BattleSimulator, Fleet, Rng,
};
use fleetlab::data::config::DEFAULT_ATTACKER_BUDGET;
use fleetlab::data::{Catalog, Resources, UnitStats, UnitType, ATTACKER_COMPOSITION};
use fleetlab::Defect;

fn fight(
    catalog: &Catalog,
    attacker: (UnitType, usize),
    defender: (UnitType, usize),
    seed: u64,
) -> (BattleOutcome, Fleet, Fleet) {
    let mut a = Fleet::uniform(attacker.0, attacker.1, catalog);
    let mut d = Fleet::uniform(defender.0, defender.1, catalog);
    let outcome = BattleSimulator::new(catalog, 6).simulate_combat(&mut a, &mut d, &mut Rng::new(seed));
    (outcome, a, d)
}

#[test]
fn max_allocation_is_exactly_the_affordable_count() {
    let budgets = [
        Resources::new(0, 0, 0),
        Resources::new(1, 1, 1),
        Resources::new(45_000, 15_000, 0),
        Resources::new(123_456, 78_910, 1_112),
        DEFAULT_ATTACKER_BUDGET,
    ];
    let costs = [
        Resources::new(3000, 1000, 0),
        Resources::new(2000, 0, 0),
        Resources::new(20000, 7000, 2000),
        Resources::new(0, 6000, 0),
        Resources::new(1, 1, 1),
    ];

    for budget in budgets {
        for cost in costs {
            let n = budget.max_allocation(cost);

            let mut exact = budget;
            assert!(exact.allocate_n(cost, n).is_ok(), "{budget:?} should afford {n} x {cost:?}");

            let mut over = budget;
            let result = over.allocate_n(cost, n + 1);
            assert!(
                matches!(result, Err(Defect::OverAllocation { .. })),
                "{budget:?} should not afford {} x {cost:?}",
                n + 1
            );
            assert_eq!(over, budget, "failed allocation must not debit");
        }
    }
}

#[test]
fn all_in_battleships_spends_the_default_attacker_budget() {
    let catalog = Catalog::standard();
    let mut budget = DEFAULT_ATTACKER_BUDGET;
    let fleet = Fleet::build(&mut budget, &ATTACKER_COMPOSITION, &[0.0, 0.0, 0.0, 1.0], &catalog)
        .expect("affordable fleet");

    assert_eq!(fleet.len(), 498);
    assert_eq!(fleet.summary().get(&UnitType::Battleship), Some(&498));
    assert_eq!(budget.metal, 39_840);
    assert_eq!(budget.crystal, 14_911_680 - 498 * 15_000);
    assert_eq!(budget.deuterium, 8_420_160);
}

#[test]
fn allocation_length_mismatch_is_a_defect() {
    let catalog = Catalog::standard();
    let mut budget = DEFAULT_ATTACKER_BUDGET;
    let result = Fleet::build(&mut budget, &ATTACKER_COMPOSITION, &[0.5, 1.0], &catalog);
    assert!(matches!(
        result,
        Err(Defect::GenomeLength {
            expected: 4,
            actual: 2
        })
    ));
    assert_eq!(budget, DEFAULT_ATTACKER_BUDGET);
}

#[test]
fn overwhelming_attacker_wins_in_round_zero() {
    let catalog = Catalog::standard();
    let (outcome, attacker, defender) =
        fight(&catalog, (UnitType::Battleship, 10), (UnitType::RocketLauncher, 1), 3);

    assert_eq!(outcome, BattleOutcome::Win(0));
    assert!(defender.is_empty());
    assert_eq!(attacker.len(), 10);
    assert_eq!(defender.lost, catalog.cost(UnitType::RocketLauncher));
    assert!(attacker.lost.is_zero());
}

#[test]
fn flawless_win_scores_the_defender_losses() {
    let catalog = Catalog::standard();
    let mut a = Fleet::uniform(UnitType::Battleship, 10, &catalog);
    let mut d = Fleet::uniform(UnitType::RocketLauncher, 1, &catalog);
    let score = BattleSimulator::new(&catalog, 6).simulate_fight(&mut a, &mut d, &mut Rng::new(3));
    assert_eq!(score, 2000.0);
}

#[test]
fn light_fighter_against_gauss_cannon_is_lost_in_round_zero() {
    let catalog = Catalog::standard();
    let (outcome, attacker, defender) =
        fight(&catalog, (UnitType::LightFighter, 1), (UnitType::GaussCannon, 1), 11);

    assert_eq!(outcome, BattleOutcome::Loss(0));
    assert!(attacker.is_empty());
    assert_eq!(defender.len(), 1);
    assert_eq!(outcome.to_string(), "LOSS(0)");
}

#[test]
fn mutual_one_shots_eliminate_both_sides() {
    let standard = Catalog::standard();
    let catalog = standard
        .clone()
        .with_stats(
            UnitType::LightFighter,
            UnitStats {
                weapon: 10_000,
                ..*standard.stats(UnitType::LightFighter)
            },
        )
        .with_stats(
            UnitType::RocketLauncher,
            UnitStats {
                weapon: 10_000,
                ..*standard.stats(UnitType::RocketLauncher)
            },
        );

    let (outcome, attacker, defender) =
        fight(&catalog, (UnitType::LightFighter, 1), (UnitType::RocketLauncher, 1), 5);

    assert_eq!(outcome, BattleOutcome::DrawBothEliminated(0));
    assert!(attacker.is_empty() && defender.is_empty());
    assert_eq!(outcome.to_string(), "DRAW-BOTH-LOSE(0)");
}

#[test]
fn shields_that_hold_run_out_the_clock() {
    let catalog = Catalog::standard();
    let (outcome, attacker, defender) =
        fight(&catalog, (UnitType::Cruiser, 1), (UnitType::IonCannon, 1), 17);

    assert_eq!(outcome, BattleOutcome::DrawTimeout);
    assert_eq!(attacker.units[0].hull, 5400 - 6 * 200);
    assert_eq!(defender.units[0].hull, 1600);
    assert!(attacker.lost.is_zero() && defender.lost.is_zero());
}

#[test]
fn nothing_lost_on_either_side_scores_zero() {
    assert_eq!(loss_ratio(Resources::ZERO, Resources::ZERO), 0.0);
    assert_eq!(
        loss_ratio(Resources::new(2000, 0, 0), Resources::new(4000, 0, 0)),
        2.0
    );
}

#[test]
fn rounds_leave_no_wrecks_and_full_shields() {
    let catalog = Catalog::standard();
    let simulator = BattleSimulator::new(&catalog, 6);
    let mut rng = Rng::new(2024);
    let mut attacker = Fleet::uniform(UnitType::HeavyFighter, 40, &catalog);
    attacker
        .units
        .extend(Fleet::uniform(UnitType::Cruiser, 10, &catalog).units);
    let mut defender = Fleet::uniform(UnitType::LightLaser, 60, &catalog);
    defender
        .units
        .extend(Fleet::uniform(UnitType::HeavyLaser, 15, &catalog).units);

    for _ in 0..6 {
        simulator.play_round(&mut attacker, &mut defender, &mut rng);
        for unit in attacker.units.iter().chain(&defender.units) {
            assert!(!unit.is_destroyed());
            assert_eq!(unit.shield, catalog.stats(unit.unit_type).shield);
        }
        if attacker.is_empty() || defender.is_empty() {
            break;
        }
    }
}

#[test]
fn losses_account_for_every_removed_unit() {
    let catalog = Catalog::standard();
    let (_, attacker, defender) =
        fight(&catalog, (UnitType::HeavyFighter, 30), (UnitType::LightLaser, 50), 99);

    let lost_attackers = (30 - attacker.len()) as u64;
    let lost_defenders = (50 - defender.len()) as u64;
    assert_eq!(
        Some(attacker.lost),
        catalog.cost(UnitType::HeavyFighter).times(lost_attackers)
    );
    assert_eq!(
        Some(defender.lost),
        catalog.cost(UnitType::LightLaser).times(lost_defenders)
    );
}

#[test]
fn rapid_fire_keys_on_the_last_opposing_unit() {
    let catalog = Catalog::standard();
    let mut rng = Rng::new(8);

    // Light fighter first, heavy fighter last: no rapid fire.
    let mut opposing = Fleet::uniform(UnitType::LightFighter, 3, &catalog);
    opposing
        .units
        .extend(Fleet::uniform(UnitType::HeavyFighter, 1, &catalog).units);
    let mut cruisers = Fleet::uniform(UnitType::Cruiser, 200, &catalog);
    pick_targets(&mut cruisers, &opposing, &catalog, &mut rng);
    assert!(cruisers.units.iter().all(|unit| unit.targets.len() == 1));

    // Light fighter last: 5/6 chance to keep firing, six targets on average.
    let mut opposing = Fleet::uniform(UnitType::HeavyFighter, 1, &catalog);
    opposing
        .units
        .extend(Fleet::uniform(UnitType::LightFighter, 3, &catalog).units);
    pick_targets(&mut cruisers, &opposing, &catalog, &mut rng);
    let picks: usize = cruisers.units.iter().map(|unit| unit.targets.len()).sum();
    let mean = picks as f64 / cruisers.len() as f64;
    assert!(mean > 4.0 && mean < 8.0, "mean targets {mean}");
    assert!(cruisers
        .units
        .iter()
        .flat_map(|unit| &unit.targets)
        .all(|&index| index < opposing.len()));
}

#[test]
fn seeded_battles_replay_identically() {
    let catalog = Catalog::standard();
    let first = fight(&catalog, (UnitType::Cruiser, 25), (UnitType::RocketLauncher, 80), 42);
    let second = fight(&catalog, (UnitType::Cruiser, 25), (UnitType::RocketLauncher, 80), 42);
    assert_eq!(first, second);
}

#[test]
fn battle_report_serializes_outcome_and_tag() {
    let catalog = Catalog::standard();
    let (outcome, attacker, defender) =
        fight(&catalog, (UnitType::Battleship, 10), (UnitType::RocketLauncher, 1), 3);
    let report = BattleReport::new(outcome, &attacker, &defender);
    let json = serde_json::to_value(&report).expect("report serializes");

    assert_eq!(json["tag"], "WIN(0)");
    assert_eq!(json["outcome"]["result"], "win");
    assert_eq!(json["outcome"]["round"], 0);
    assert_eq!(json["defender"]["lost_value"], 2000);
    assert_eq!(json["attacker"]["survivors"]["Battleship"], 10);
}
