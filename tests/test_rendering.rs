use wumpus_rust::simulation::params::MAX_TURNS;
use wumpus_rust::simulation::{Cave, Controller, Explorer, Location, Percept};
use wumpus_rust::ui::Snapshot;
use wumpus_rust::ui::field::{CELL_WIDTH, belief_rows, cave_rows};
use wumpus_rust::ui::render::panel_height;

fn fixed_cave() -> Cave {
    let mut cave = Cave::empty(4);
    cave.set_map(
        &[Location::new(3, 1)],
        &[Location::new(1, 3)],
        Location::new(3, 3),
        Location::origin(),
    )
    .unwrap();
    cave
}

#[test]
fn test_belief_rows_dimensions() {
    let explorer = Explorer::new(4);
    let rows = belief_rows(&explorer.beliefs, &explorer);

    assert_eq!(rows.len(), 4);
    for row in &rows {
        assert_eq!(row.chars().count(), 4 * CELL_WIDTH);
    }
    // Explorer faces north at the top-left cell
    assert!(rows[0].starts_with("[ ^ ]"));
    assert_eq!(rows[3], "[ ? ]".repeat(4));
}

#[test]
fn test_belief_rows_show_summaries() {
    let mut explorer = Explorer::new(4);
    explorer.perceive(&Percept {
        breeze: true,
        ..Percept::default()
    });
    explorer.location = Location::new(4, 4);
    let rows = belief_rows(&explorer.beliefs, &explorer);

    assert_eq!(rows[0], "[ V ][ 1 ][ ? ][ ? ]");
    assert_eq!(rows[1], "[ 1 ][ ? ][ ? ][ ? ]");
}

#[test]
fn test_cave_rows_show_contents() {
    let cave = fixed_cave();
    let explorer = Explorer::new(4);
    let rows = cave_rows(&cave, &explorer);

    assert_eq!(rows[0], "[ ^ ][   ][ P ][   ]");
    assert_eq!(rows[2], "[ W ][   ][ G ][   ]");
}

#[test]
fn test_snapshot_captures_controller() {
    let mut controller = Controller::new(fixed_cave(), MAX_TURNS);
    controller.advance();
    let snapshot = Snapshot::capture(&controller);

    assert!(snapshot.hud.starts_with("Turn 1/200 | Score -1"));
    assert_eq!(snapshot.beliefs.len(), 4);
    assert_eq!(snapshot.cave.len(), 4);
    // Explorer now faces east
    assert!(snapshot.beliefs[0].starts_with("[ > ]"));
    assert_eq!(panel_height(&snapshot.beliefs), 6);
}
