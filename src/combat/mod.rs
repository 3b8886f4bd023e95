pub mod battle;
pub mod engine;
pub mod fleet;
pub mod rng;

pub use battle::{loss_ratio, BattleOutcome, BattleReport, BattleSimulator, SideReport};
pub use engine::{attack_targets, fire_shot, pick_targets, process, Shot};
pub use fleet::{Fleet, Unit};
pub use rng::Rng;
