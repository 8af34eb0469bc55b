//! Tests for building the house and routing requests to its entrances

use house_elevator_simulator::*;

#[test]
fn test_default_house_matches_demo_size() {
    let house = House::build(&HouseConfig::default()).unwrap();
    assert_eq!(house.entrance_count(), 2);
    assert_eq!(house.storeys(), 5);
    assert_eq!(house.floors().len(), 5);
    assert!(house.is_idle());
}

#[test]
fn test_storeys_are_listed_top_down_for_display() {
    let config = HouseConfig { storeys: 4, ..Default::default() };
    let house = House::build(&config).unwrap();

    let top_down = house.storeys_top_down();
    assert_eq!(top_down, vec![FloorId(4), FloorId(3), FloorId(2), FloorId(1)]);

    let mut bottom_up = top_down.clone();
    bottom_up.reverse();
    assert_eq!(bottom_up, house.floors());
}

#[test]
fn test_single_storey_house() {
    let config = HouseConfig { entrances: 1, storeys: 1, ..Default::default() };
    let mut house = House::build(&config).unwrap();
    assert_eq!(house.shaft_height(), 0.0);

    house.call_floor(EntranceId(0), FloorId(1)).unwrap();
    let elevator = house.entrance(EntranceId(0)).unwrap();
    assert_eq!(elevator.phase(), ElevatorPhase::DoorsOpening);
    assert!(house.call_floor(EntranceId(0), FloorId(2)).is_err());
}

#[test]
fn test_invalid_configurations_are_rejected() {
    for config in [
        HouseConfig { entrances: 0, ..Default::default() },
        HouseConfig { storeys: 0, ..Default::default() },
        HouseConfig { storey_height: -10.0, ..Default::default() },
        HouseConfig { auto_close_ms: 0, ..Default::default() },
    ] {
        let error = House::build(&config).unwrap_err();
        assert_eq!(error.category(), "Configuration");
        assert!(!error.is_recoverable());
    }
}

#[test]
fn test_requests_route_to_the_right_entrance() {
    let config = HouseConfig { entrances: 3, storeys: 6, ..Default::default() };
    let mut house = House::build(&config).unwrap();

    house.call_floor(EntranceId(2), FloorId(6)).unwrap();
    house.call_floor(EntranceId(0), FloorId(3)).unwrap();

    assert_eq!(house.entrance(EntranceId(0)).unwrap().target(), Some(FloorId(3)));
    assert!(house.entrance(EntranceId(1)).unwrap().is_idle());
    assert_eq!(house.entrance(EntranceId(2)).unwrap().target(), Some(FloorId(6)));
}

#[test]
fn test_unknown_entrance_is_an_error() {
    let mut house = House::build(&HouseConfig::default()).unwrap();

    let error = house.select_floor(EntranceId(9), FloorId(1)).unwrap_err();
    assert_eq!(error.category(), "Unknown Entrance");
    assert_eq!(error.to_string(), "Unknown entrance ENTRANCE_9: house has 2 entrances");
}

#[test]
fn test_checked_floor_construction() {
    let house = House::build(&HouseConfig::default()).unwrap();
    assert_eq!(house.floor(1).unwrap(), FloorId::GROUND);
    assert_eq!(
        house.floor(6).unwrap_err(),
        ElevatorError::InvalidFloor { floor: FloorId(6), storeys: 5 }
    );
}

#[test]
fn test_oversized_house_is_rejected_before_allocation() {
    let config = HouseConfig { storeys: 4_000_000_000, ..Default::default() };
    let error = House::build(&config).unwrap_err();
    assert_eq!(error.category(), "Configuration");
    assert!(error.to_string().contains("4000000000"));
}
