use std::f64::consts::TAU;

use mars_habitat::{
    geometry,
    mission::{HabitatDimensions, Zone, ZoneId},
    zones::{available_area, compute_placement, AllocationError, ZoneAllocator},
};

fn ten_metre_floor() -> HabitatDimensions {
    HabitatDimensions {
        diameter: 10.0,
        height: 5.0,
    }
}

fn zone(id: &str, area: f64) -> Zone {
    Zone {
        id: ZoneId::new(id),
        name: "Storage".into(),
        area,
    }
}

#[test]
fn default_habitat_volume_and_crew_share() {
    let volume = geometry::volume(10.0, 5.0);
    assert!((volume - 392.70).abs() < 0.01);
    let per_crew = geometry::volume_per_crew(volume, 4).unwrap();
    assert!((per_crew - 98.17).abs() < 0.01);
}

#[test]
fn empty_template_leaves_zones_unchanged() {
    let mut allocator = ZoneAllocator::default();
    let zones = vec![zone("zone-9", 4.0)];
    let before = zones.clone();
    let err = allocator
        .add_zone(&zones, &ten_metre_floor(), "")
        .unwrap_err();
    assert_eq!(err, AllocationError::NoTemplateSelected);
    assert_eq!(zones, before);
}

#[test]
fn laboratories_fill_floor_until_space_runs_out() {
    let mut allocator = ZoneAllocator::default();
    let floor = ten_metre_floor();
    assert!((floor.floor_area() - 78.54).abs() < 0.01);

    let mut zones = Vec::new();
    for _ in 0..7 {
        zones = allocator.add_zone(&zones, &floor, "Laboratory").unwrap();
        assert_eq!(zones.last().map(|z| z.area), Some(10.0));
    }
    assert!(available_area(&zones, &floor) < 10.0);

    let err = allocator.add_zone(&zones, &floor, "Laboratory").unwrap_err();
    match err {
        AllocationError::InsufficientSpace {
            template,
            required,
            available,
        } => {
            assert_eq!(template, "Laboratory");
            assert_eq!(required, 10.0);
            assert!((available - 8.54).abs() < 0.01);
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(zones.len(), 7);
}

#[test]
fn added_zones_get_unique_ids() {
    let mut allocator = ZoneAllocator::default();
    let floor = ten_metre_floor();
    let mut zones = Vec::new();
    for name in ["Airlock", "Storage", "Airlock", "Medical Bay"] {
        zones = allocator.add_zone(&zones, &floor, name).unwrap();
    }
    let mut ids: Vec<&str> = zones.iter().map(|z| z.id.as_str()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 4);
}

#[test]
fn add_zone_does_not_touch_existing_zones() {
    let mut allocator = ZoneAllocator::default();
    let zones = vec![zone("a", 7.5), zone("b", 2.0)];
    let next = allocator
        .add_zone(&zones, &ten_metre_floor(), "Hygiene Station")
        .unwrap();
    assert_eq!(&next[..2], &zones[..]);
    assert_eq!(next[2].name, "Hygiene Station");
    assert_eq!(next[2].area, 3.0);
}

#[test]
fn removing_twice_is_a_no_op() {
    let allocator = ZoneAllocator::default();
    let zones = vec![zone("a", 4.0), zone("b", 5.0)];
    let once = allocator.remove_zone(&zones, &ZoneId::new("a"));
    let twice = allocator.remove_zone(&once, &ZoneId::new("a"));
    assert_eq!(once.len(), 1);
    assert_eq!(once, twice);
}

#[test]
fn resize_clamps_to_one_square_metre() {
    let allocator = ZoneAllocator::default();
    let zones = vec![zone("a", 4.0)];
    let resized = allocator.update_zone_area(&zones, &ZoneId::new("a"), -5.0);
    assert_eq!(resized[0].area, 1.0);
}

#[test]
fn resize_is_not_capped_by_free_floor() {
    let allocator = ZoneAllocator::default();
    let zones = vec![zone("a", 4.0)];
    let resized = allocator.update_zone_area(&zones, &ZoneId::new("a"), 500.0);
    assert_eq!(resized[0].area, 500.0);
    assert!(available_area(&resized, &ten_metre_floor()) < 0.0);
}

#[test]
fn resize_of_unknown_id_changes_nothing() {
    let allocator = ZoneAllocator::default();
    let zones = vec![zone("a", 4.0)];
    let resized = allocator.update_zone_area(&zones, &ZoneId::new("missing"), 9.0);
    assert_eq!(resized, zones);
}

#[test]
fn single_zone_sits_at_angle_zero() {
    let placement = compute_placement(&[zone("a", 20.0)], 10.0, 180.0);
    assert_eq!(placement.len(), 1);
    assert_eq!(placement[0].angle, 0.0);
    assert!(placement[0].y.abs() < 1e-9);
    assert!(placement[0].x > 0.0);
}

#[test]
fn angles_depend_only_on_index() {
    let zones = vec![
        zone("a", 1.0),
        zone("b", 30.0),
        zone("c", 4.0),
        zone("d", 12.0),
        zone("e", 2.5),
    ];
    let placement = compute_placement(&zones, 10.0, 180.0);
    for (index, result) in placement.iter().enumerate() {
        let expected = TAU * index as f64 / zones.len() as f64;
        assert!((result.angle - expected).abs() < 1e-12);
        assert_eq!(result.zone_id, zones[index].id);
    }
}

#[test]
fn radius_scales_with_area_share() {
    let floor = geometry::floor_area(10.0);
    let placement = compute_placement(&[zone("a", floor / 4.0)], 10.0, 180.0);
    assert!((placement[0].radius - 90.0).abs() < 1e-9);
    let offset = (placement[0].x.powi(2) + placement[0].y.powi(2)).sqrt();
    assert!((offset - 90.0).abs() < 1e-9);
}

#[test]
fn placement_on_zero_diameter_collapses_disks() {
    let placement = compute_placement(&[zone("a", 4.0)], 0.0, 180.0);
    assert_eq!(placement[0].radius, 0.0);
    assert!((placement[0].x - 180.0).abs() < 1e-9);
}
