// Integration tests test your crate's public API. They only have access to items
// in your crate that are marked pub. See the Cargo Targets page of the Cargo Book
// for more information.
//
//   https://doc.rust-lang.org/cargo/reference/cargo-targets.html#integration-tests
//

use house_elevator_simulator::*;

mod travel_queue_tests;

// House layout and configuration
mod cli_argument_parsing_tests;
mod house_layout_tests;


#[test]
fn test_core_id_types() {
    let run_id = RunId::new();
    assert_ne!(run_id, RunId::new());
    assert!(run_id.to_string().starts_with("RUN_"));

    assert_eq!(EntranceId(0).to_string(), "ENTRANCE_0");
    assert_eq!(FloorId(3).to_string(), "3");
    assert_eq!(FloorId::GROUND, FloorId::new(1));
}

#[test]
fn test_id_serialization() {
    assert_eq!(serde_json::to_string(&FloorId(4)).unwrap(), "4");
    assert_eq!(serde_json::to_string(&EntranceId(2)).unwrap(), "2");

    let run_id = RunId::new();
    let json = serde_json::to_string(&run_id).unwrap();
    assert_eq!(json, format!("\"{}\"", run_id));
    assert_eq!(serde_json::from_str::<RunId>(&json).unwrap(), run_id);
}

#[test]
fn test_enum_types() {
    let indicators = [IndicatorState::Idle, IndicatorState::Called, IndicatorState::Active];
    for indicator in &indicators {
        assert!(!indicator.to_string().is_empty());
    }

    assert_eq!(RequestKind::Call.button(), ButtonKind::Outside);
    assert_eq!(RequestKind::Select.button(), ButtonKind::Cabin);

    let moving = ElevatorPhase::Moving { target: FloorId(4) };
    assert!(moving.is_moving());
    assert!(!ElevatorPhase::DoorsOpen.is_moving());
    assert_eq!(moving.to_string(), "Moving to 4");

    assert_eq!(serde_json::to_string(&IndicatorState::Called).unwrap(), "\"called\"");
    assert_eq!(serde_json::to_string(&RequestKind::Select).unwrap(), "\"select\"");
}

#[test]
fn test_end_to_end_single_call() {
    let mut driver = SimulationDriver::new(&HouseConfig { seed: Some(1), ..Default::default() }).unwrap();
    let outcome = driver.press(EntranceId(0), RequestKind::Call, FloorId(3)).unwrap();
    assert_eq!(outcome, PressOutcome::Accepted);

    driver.run_until_idle().unwrap();
    let elevator = driver.house().entrance(EntranceId(0)).unwrap();
    assert_eq!(elevator.current_floor(), FloorId(3));
    assert!(!elevator.doors_open());
    assert!(elevator.queue().is_empty());
}
