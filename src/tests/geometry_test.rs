use crate::geometry::disk_constants::MAX_BLOCK_NUMBER;
use crate::geometry::{map_block, Geometry};

fn geometry(cylinder: i32, track: i32, sector: i32) -> Geometry {
    Geometry {
        cylinder,
        track,
        sector,
    }
}

#[test]
fn known_conversion_vectors() {
    // First track of the first cylinder.
    assert_eq!(map_block(1), geometry(0, 0, 0));
    assert_eq!(map_block(5), geometry(0, 0, 8));

    // Upper half of the sector range folds onto the second head.
    assert_eq!(map_block(6), geometry(0, 1, 1));
    assert_eq!(map_block(9), geometry(0, 1, 7));

    // Cylinder boundary.
    assert_eq!(map_block(10), geometry(1, 0, 0));

    // Last valid block.
    assert_eq!(map_block(360), geometry(39, 1, 7));
}

#[test]
fn mapping_is_deterministic() {
    for block in 1..=MAX_BLOCK_NUMBER {
        assert_eq!(map_block(block), map_block(block), "block {}", block);
    }
}

#[test]
fn sector_stays_in_track_relative_range() {
    for block in 1..=MAX_BLOCK_NUMBER {
        let converted = map_block(block);
        assert!(
            (0..=16).contains(&converted.sector),
            "sector {} out of range at block {}",
            converted.sector,
            block
        );
        assert!(converted.track == 0 || converted.track == 1);
    }
}
