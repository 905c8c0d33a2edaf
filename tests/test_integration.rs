//! End-to-end games driven through the turn controller.

use wumpus_rust::simulation::environment::{Effect, Resolution};
use wumpus_rust::simulation::params::{
    ACTION_COST, ARROW_COST, DEATH_PENALTY, GOLD_REWARD, MAX_TURNS,
};
use wumpus_rust::simulation::{
    Action, ActionFailure, Cave, Controller, Direction, GameConfig, Location, Outcome, Percept,
    Progress, World,
};

fn loc(row: i32, col: i32) -> Location {
    Location::new(row, col)
}

fn cave(wumpuses: &[Location], pits: &[Location], gold: Location) -> Cave {
    let mut cave = Cave::empty(4);
    cave.set_map(wumpuses, pits, gold, Location::origin()).unwrap();
    cave
}

/// A hazard-free room with no gold: the explorer can only wander.
struct EmptyRoom {
    size: i32,
}

impl World for EmptyRoom {
    fn size(&self) -> i32 {
        self.size
    }

    fn percept(&self, _location: Location, bump: bool, scream: bool) -> Percept {
        Percept {
            bump,
            scream,
            ..Percept::default()
        }
    }

    fn resolve(&mut self, action: Action, location: Location, direction: Direction) -> Resolution {
        let result = match action {
            Action::Forward if location.step(direction).is_inside(self.size) => Ok(Effect::Moved),
            Action::Forward => Err(ActionFailure::Bump),
            Action::TurnLeft | Action::TurnRight => Ok(Effect::Turned),
            Action::Shoot => Ok(Effect::ArrowMissed),
            Action::Grab => Err(ActionFailure::NoGoldHere),
            Action::Climb => Err(ActionFailure::NotAtExit),
        };
        Resolution {
            result,
            score_delta: ACTION_COST,
        }
    }

    fn is_lethal(&self, _location: Location) -> bool {
        false
    }
}

#[test]
fn test_opening_turn_on_4x4() {
    let cave = cave(&[loc(3, 1)], &[loc(1, 3)], loc(3, 3));
    let mut controller = Controller::new(cave, MAX_TURNS);

    assert_eq!(controller.advance(), Progress::Continue);

    let percept = controller.last_percept();
    assert!(!percept.stench);
    assert!(!percept.breeze);

    let beliefs = &controller.explorer().beliefs;
    let entrance = beliefs.cell(Location::origin()).unwrap();
    assert!(entrance.visited && entrance.safe);
    assert!(beliefs.cell(loc(1, 2)).unwrap().safe);
    assert!(beliefs.cell(loc(2, 1)).unwrap().safe);

    // First move heads east to (1,2), which takes a turn from north
    assert_eq!(controller.explorer().direction, Direction::East);
    assert_eq!(controller.turn(), 1);
    assert_eq!(controller.score(), ACTION_COST);
}

#[test]
fn test_fetches_gold_and_climbs_out() {
    let cave = cave(&[loc(4, 1)], &[loc(4, 4)], loc(1, 2));
    let mut controller = Controller::new(cave, MAX_TURNS);

    let result = controller.run_to_end();

    // turn, forward, grab, turn, turn, forward, climb
    assert_eq!(result.outcome, Outcome::Escaped);
    assert!(result.outcome.is_win());
    assert_eq!(result.turns, 7);
    assert_eq!(result.score, 7 * ACTION_COST + GOLD_REWARD);
    assert!(controller.explorer().has_gold);
    assert!(controller.is_over());
    assert_eq!(
        controller.messages().last().map(|m| m.text.as_str()),
        Some("climbed out of the cave!")
    );
}

#[test]
fn test_death_is_recovered_on_the_next_turn() {
    let cave = cave(&[loc(4, 4)], &[loc(1, 2)], loc(3, 3));
    let mut controller = Controller::new(cave, MAX_TURNS);

    // Breeze at the entrance; (1,2) and (2,1) tie, east wins
    controller.advance();
    assert_eq!(controller.explorer().direction, Direction::East);

    controller.advance();
    assert_eq!(controller.explorer().location, loc(1, 2));
    assert!(!controller.explorer().is_alive);
    assert_eq!(controller.explorer().path_stack, vec![Location::origin()]);
    assert_eq!(controller.score(), 2 * ACTION_COST + DEATH_PENALTY);

    controller.advance();
    let explorer = controller.explorer();
    assert!(explorer.is_alive);
    assert_eq!(explorer.location, Location::origin());
    assert!(explorer.path_stack.is_empty());
    assert!(explorer.beliefs.cell(loc(1, 2)).unwrap().lethal);
    assert_eq!(controller.turn(), 3);
    // Respawning costs nothing
    assert_eq!(controller.score(), 2 * ACTION_COST + DEATH_PENALTY);

    // The pit is never offered again
    assert_eq!(
        explorer.beliefs.candidate_neighbors(Location::origin()),
        vec![loc(2, 1)]
    );
}

#[test]
fn test_turn_limit_forces_a_loss() {
    let mut controller = Controller::new(EmptyRoom { size: 10 }, MAX_TURNS);
    let result = controller.run_to_end();

    assert_eq!(result.outcome, Outcome::TurnLimit);
    assert!(!result.outcome.is_win());
    assert_eq!(result.turns, MAX_TURNS);
    assert_eq!(controller.turn(), MAX_TURNS);
    assert_eq!(
        controller.advance(),
        Progress::Finished(result),
        "a finished game stays finished"
    );
    assert_eq!(controller.turn(), MAX_TURNS);
}

#[test]
fn test_stranded_when_everything_is_explored() {
    let mut controller = Controller::new(EmptyRoom { size: 2 }, MAX_TURNS);
    let result = controller.run_to_end();

    assert_eq!(result.outcome, Outcome::Stranded);
    assert!(result.turns < MAX_TURNS);
    assert_eq!(controller.explorer().beliefs.visited_count(), 4);
    assert_eq!(
        controller.messages().last().map(|m| m.text.as_str()),
        Some("no route left to retreat along")
    );
}

#[test]
fn test_manual_shot_kills_wumpus_and_screams() {
    let cave = cave(&[loc(1, 3)], &[loc(4, 4)], loc(3, 3));
    let mut controller = Controller::new(cave, MAX_TURNS);

    controller.advance_with(Action::TurnRight);
    controller.advance_with(Action::Shoot);
    assert!(!controller.explorer().has_arrow);
    assert!(!controller.world().is_lethal(loc(1, 3)));
    assert_eq!(controller.score(), 2 * ACTION_COST + ARROW_COST);

    controller.advance_with(Action::Shoot);
    assert!(controller.last_percept().scream);
    assert_eq!(
        controller.messages().last().map(|m| m.text.as_str()),
        Some("no arrow left")
    );
    assert_eq!(controller.score(), 3 * ACTION_COST + ARROW_COST);
}

#[test]
fn test_generated_game_always_terminates() {
    for seed in 0..50 {
        let config = GameConfig {
            seed: Some(seed),
            ..GameConfig::default()
        };
        let (mut controller, used) = Controller::from_config(&config).unwrap();
        assert_eq!(used, seed);

        let result = controller.run_to_end();
        assert!(result.turns <= MAX_TURNS, "seed {seed}");
        assert!(controller.explorer().path_stack.len() <= 16, "seed {seed}");
        if result.outcome == Outcome::Escaped {
            assert!(controller.explorer().at_exit());
            assert!(controller.explorer().has_gold);
        }
    }
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = GameConfig {
        size: 1,
        ..GameConfig::default()
    };
    assert!(Controller::from_config(&config).is_err());

    let huge = GameConfig {
        size: 50_000,
        ..GameConfig::default()
    };
    assert!(Controller::from_config(&huge).is_err());
}
