//! Coarse continent outlines, `(latitude, longitude)` in degrees.
//!
//! Just enough shape to orient the viewer; each ring is closed.

pub static OUTLINES: &[&[(f32, f32)]] = &[
    NORTH_AMERICA,
    SOUTH_AMERICA,
    EUROPE,
    AFRICA,
    ASIA,
    AUSTRALIA,
    GREENLAND,
    BRITAIN,
    JAPAN,
];

const NORTH_AMERICA: &[(f32, f32)] = &[
    (70.0, -92.0), (66.5, -82.0), (59.0, -94.5), (51.5, -80.0), (62.5, -77.0),
    (58.5, -68.0), (53.0, -56.0), (47.0, -70.5), (45.0, -61.0), (40.5, -74.0),
    (35.0, -76.0), (31.0, -81.5), (25.5, -80.2), (29.8, -84.5), (29.5, -94.5),
    (26.0, -97.2), (19.0, -96.0), (21.4, -87.0), (16.0, -88.5), (15.0, -83.3),
    (9.0, -79.5), (7.5, -80.5), (15.5, -93.0), (19.5, -105.5), (23.0, -109.5),
    (31.5, -113.5), (32.5, -117.2), (40.0, -124.2), (48.5, -124.6), (58.5, -136.5),
    (60.5, -146.0), (57.0, -157.0), (59.0, -162.0), (64.5, -165.5), (68.0, -166.0),
    (71.3, -156.5), (69.5, -140.0), (68.5, -116.0), (68.0, -98.0), (70.0, -92.0),
];

const SOUTH_AMERICA: &[(f32, f32)] = &[
    (11.5, -72.5), (10.5, -64.0), (5.5, -55.0), (0.0, -50.0), (-5.0, -36.5),
    (-8.0, -35.0), (-13.0, -38.5), (-23.0, -42.5), (-28.5, -48.8), (-34.5, -54.0),
    (-35.0, -57.0), (-39.0, -62.0), (-42.5, -64.5), (-47.5, -65.8), (-52.5, -68.5),
    (-55.0, -68.0), (-53.0, -74.0), (-46.5, -75.5), (-37.0, -73.5), (-30.0, -71.5),
    (-18.5, -70.3), (-14.0, -76.3), (-5.5, -81.0), (-1.0, -80.5), (3.5, -77.3),
    (8.0, -77.5), (11.5, -72.5),
];

const EUROPE: &[(f32, f32)] = &[
    (36.0, -5.6), (37.0, -9.0), (43.2, -9.3), (43.5, -2.0), (46.5, -1.5),
    (48.5, -4.7), (49.5, 0.0), (51.0, 2.5), (53.5, 7.5), (57.0, 8.5),
    (54.5, 10.5), (54.3, 14.0), (54.5, 19.5), (57.5, 21.5), (59.5, 24.0),
    (60.5, 29.0), (60.5, 22.0), (65.5, 25.5), (63.5, 20.5), (59.5, 18.5),
    (56.0, 16.0), (55.5, 13.0), (58.5, 11.0), (58.0, 7.0), (62.5, 5.5),
    (68.0, 14.5), (70.5, 23.0), (70.8, 31.0), (69.0, 36.0), (66.0, 41.5),
    (47.0, 39.0), (45.0, 36.5), (46.5, 31.0), (42.0, 28.5), (40.5, 26.0),
    (39.0, 26.5), (36.5, 22.5), (38.5, 21.0), (40.5, 19.5), (42.5, 18.0),
    (45.5, 13.5), (44.0, 12.5), (40.0, 18.5), (38.0, 15.7), (41.0, 13.5),
    (44.0, 9.5), (43.2, 5.5), (41.5, 3.2), (38.5, -0.2), (36.7, -2.2),
    (36.0, -5.6),
];

const AFRICA: &[(f32, f32)] = &[
    (35.8, -5.9), (37.0, 10.0), (33.0, 11.5), (30.5, 19.5), (32.5, 22.0),
    (31.0, 32.0), (22.0, 36.8), (15.5, 39.5), (11.5, 43.5), (12.0, 51.0),
    (2.0, 45.5), (-4.5, 39.5), (-10.5, 40.5), (-15.5, 40.8), (-25.0, 35.0),
    (-29.0, 32.5), (-34.5, 26.0), (-34.8, 20.0), (-33.8, 18.4), (-28.5, 16.5),
    (-17.0, 11.7), (-11.0, 13.8), (-6.0, 12.3), (-1.0, 9.0), (4.0, 9.5),
    (6.3, 4.5), (5.0, -2.0), (4.5, -7.5), (7.5, -13.0), (10.5, -15.0),
    (14.7, -17.5), (21.0, -17.0), (27.5, -13.2), (31.5, -9.8), (35.8, -5.9),
];

const ASIA: &[(f32, f32)] = &[
    (66.0, 41.5), (68.5, 44.0), (68.5, 55.0), (69.5, 67.0), (73.0, 70.0),
    (72.5, 80.0), (76.0, 97.0), (77.5, 105.0), (73.5, 113.0), (71.5, 131.0),
    (72.0, 150.0), (69.5, 170.0), (66.0, -170.0), (64.5, 177.0), (60.0, 165.0),
    (57.0, 163.0), (51.0, 156.5), (59.0, 155.0), (59.5, 143.0), (53.5, 141.0),
    (47.0, 138.5), (42.5, 133.0), (39.0, 128.0), (34.8, 126.5), (37.5, 122.5),
    (40.5, 121.5), (38.5, 118.0), (35.0, 119.5), (30.5, 122.0), (25.0, 119.5),
    (22.5, 114.0), (21.5, 108.0), (16.0, 108.0), (10.5, 106.5), (8.5, 104.8),
    (13.5, 100.0), (7.0, 100.5), (1.3, 103.8), (8.0, 98.3), (16.5, 97.5),
    (21.5, 92.0), (22.0, 88.5), (15.5, 80.5), (8.0, 77.5), (15.0, 74.0),
    (21.0, 72.8), (23.5, 68.0), (25.5, 61.5), (26.5, 56.5), (24.0, 52.0),
    (29.5, 48.0), (27.0, 50.5), (22.5, 59.8), (16.0, 52.5), (12.7, 43.5),
    (21.5, 39.0), (28.0, 34.6), (31.5, 34.5), (36.5, 36.0), (36.5, 30.5),
    (41.0, 29.0), (41.5, 41.5), (45.0, 37.5), (47.0, 39.0), (66.0, 41.5),
];

const AUSTRALIA: &[(f32, f32)] = &[
    (-10.7, 142.5), (-19.0, 146.5), (-25.5, 153.0), (-32.0, 152.5), (-37.5, 150.0),
    (-38.5, 145.5), (-38.0, 140.5), (-35.5, 138.0), (-32.5, 134.0), (-31.5, 131.0),
    (-32.0, 126.0), (-34.5, 118.5), (-34.0, 115.0), (-28.0, 114.0), (-22.0, 114.0),
    (-19.5, 121.0), (-16.0, 123.0), (-14.0, 127.5), (-15.0, 129.5), (-12.0, 131.5),
    (-12.0, 136.8), (-15.0, 135.5), (-17.5, 140.5), (-10.7, 142.5),
];

const GREENLAND: &[(f32, f32)] = &[
    (83.5, -30.0), (82.0, -21.0), (79.5, -18.0), (76.0, -20.0), (72.5, -22.0),
    (70.0, -24.0), (66.0, -36.0), (60.0, -44.0), (64.0, -52.0), (69.0, -51.0),
    (71.5, -55.0), (76.0, -62.0), (78.0, -72.0), (81.5, -63.0), (83.5, -30.0),
];

const BRITAIN: &[(f32, f32)] = &[
    (50.0, -5.5), (51.0, 1.3), (52.5, 1.7), (55.0, -1.5), (57.5, -1.8),
    (58.6, -3.1), (58.2, -6.0), (55.5, -5.5), (54.5, -3.5), (53.0, -4.5),
    (51.5, -5.0), (50.0, -5.5),
];

const JAPAN: &[(f32, f32)] = &[
    (45.5, 141.8), (43.0, 145.5), (41.5, 140.0), (39.0, 142.0), (35.5, 140.8),
    (34.5, 137.0), (33.5, 135.5), (31.0, 130.5), (33.5, 129.5), (35.5, 133.0),
    (37.5, 137.0), (40.5, 140.0), (41.5, 140.0), (45.5, 141.8),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outlines_are_closed_and_in_range() {
        for ring in OUTLINES {
            assert!(ring.len() >= 4);
            assert_eq!(ring.first(), ring.last());
            for (lat, lon) in ring.iter() {
                assert!((-90.0..=90.0).contains(lat));
                assert!((-180.0..=180.0).contains(lon));
            }
        }
    }
}
