use std::fs;

use geo::Point;
use time::macros::datetime;

use super::gpx::GpxGenerator;
use super::position::TourPosition;
use super::tracker::Tracker;
use crate::error::ConversionError;

fn position(lat: f64, lon: f64, elevation: Option<f64>) -> TourPosition {
    let mut pos = TourPosition::basic(Point::new(lon, lat));
    pos.elevation = elevation;
    pos
}

#[test]
fn simple_track() -> Result<(), String> {
    let mut p1 = position(-26.31832, -48.8702222, Some(4.0));
    p1.time = Some(datetime!(2021-05-24 0:00 UTC));
    let p2 = position(-26.3185919, -48.8619776, Some(12.5));
    let p3 = position(-26.3185861, -48.8619871, None);

    let track = Tracker::new("running in joinville".to_string())
        .link("https://tours.example/t/1".to_string())
        .build(&[p1.clone(), p2.clone(), p3.clone()])
        .map_err(|e| e.to_string())?;

    assert_eq!(Some("running in joinville".to_string()), track.name);
    assert_eq!(1, track.links.len());
    assert_eq!("https://tours.example/t/1", track.links[0].href);
    assert_eq!(1, track.segments.len());

    let segment = &track.segments[0];
    assert_eq!(3, segment.points.len());
    assert_eq!(p1.coordinates, segment.points[0].point());
    assert_eq!(Some(4.0), segment.points[0].elevation);
    assert_eq!(Some(p1.time.unwrap().into()), segment.points[0].time);
    assert_eq!(p2.coordinates, segment.points[1].point());
    assert_eq!(None, segment.points[1].time);
    assert_eq!(p3.coordinates, segment.points[2].point());
    assert_eq!(None, segment.points[2].elevation);

    Ok(())
}

#[test]
fn path_order_is_kept() -> Result<(), String> {
    let positions = vec![
        position(10.0, 10.0, None),
        position(-10.0, -10.0, None),
        position(5.0, 5.0, None),
    ];

    let track = Tracker::new("zigzag".to_string())
        .build(&positions)
        .map_err(|e| e.to_string())?;

    let points: Vec<Point> = track.segments[0].points.iter().map(|p| p.point()).collect();
    let expected: Vec<Point> = positions.iter().map(|p| p.coordinates).collect();
    assert_eq!(expected, points);

    Ok(())
}

#[test]
fn empty_track() {
    let err = Tracker::new("empty".to_string()).build(&[]).unwrap_err();

    assert_eq!(ConversionError::NoCoordinates, err);
}

#[test]
fn invalid_latitude() {
    let positions = vec![position(91.0, 11.6, Some(520.0))];

    let err = Tracker::new("north".to_string()).build(&positions).unwrap_err();

    assert_eq!(
        ConversionError::InvalidLatitude {
            index: 0,
            lat: 91.0,
            lon: 11.6
        },
        err
    );
    assert!(err.to_string().contains("invalid latitude: 91"));
}

#[test]
fn invalid_longitude_is_not_dropped() {
    let positions = vec![
        position(48.1, 11.6, None),
        position(48.2, -180.5, None),
        position(95.0, 11.6, None),
    ];

    let err = Tracker::new("west".to_string()).build(&positions).unwrap_err();

    assert_eq!(
        ConversionError::InvalidLongitude {
            index: 1,
            lat: 48.2,
            lon: -180.5
        },
        err
    );
}

#[test]
fn range_limits_are_valid() -> Result<(), String> {
    let positions = vec![
        position(90.0, 180.0, None),
        position(-90.0, -180.0, Some(-420.0)),
    ];

    Tracker::new("edges".to_string())
        .build(&positions)
        .map_err(|e| e.to_string())?;

    Ok(())
}

#[test]
fn document() -> Result<(), String> {
    let track = Tracker::new("doc".to_string())
        .build(&[position(48.1, 11.6, Some(520.0))])
        .map_err(|e| e.to_string())?;

    let mut generator = GpxGenerator::empty("tour2gpx".to_string());
    generator.name = Some("doc".to_string());
    generator.time = Some(datetime!(2023-06-01 8:00 UTC));
    generator.tracks = vec![track];

    let gpx = generator.generate();
    assert_eq!(gpx::GpxVersion::Gpx11, gpx.version);
    assert_eq!(Some("tour2gpx".to_string()), gpx.creator);
    assert_eq!(1, gpx.tracks.len());

    let metadata = gpx.metadata.ok_or("metadata missing")?;
    assert_eq!(Some("doc".to_string()), metadata.name);
    assert_eq!(Some(datetime!(2023-06-01 8:00 UTC).into()), metadata.time);

    Ok(())
}

#[test]
fn round_trip() -> Result<(), String> {
    let positions = vec![
        position(48.1, 11.6, Some(520.0)),
        position(-33.8688197, 151.2092955, Some(-3.25)),
        position(89.999999, -179.999999, None),
        position(0.0, 0.0, Some(0.0)),
    ];

    let mut generator = GpxGenerator::empty("tour2gpx".to_string());
    generator.tracks = vec![Tracker::new("round trip".to_string())
        .build(&positions)
        .map_err(|e| e.to_string())?];

    let mut sink = vec![];
    generator.write_to(&mut sink).map_err(|e| e.to_string())?;

    let text = String::from_utf8(sink).map_err(|e| e.to_string())?;
    assert!(text.starts_with("<?xml"));

    let read = gpx::read(text.as_bytes()).map_err(|e| e.to_string())?;
    assert_eq!(Some("tour2gpx".to_string()), read.creator);
    assert_eq!(1, read.tracks.len());
    assert_eq!(Some("round trip".to_string()), read.tracks[0].name);
    assert_eq!(1, read.tracks[0].segments.len());

    let points = &read.tracks[0].segments[0].points;
    assert_eq!(positions.len(), points.len());
    for (expected, point) in positions.iter().zip(points) {
        assert_eq!(expected.coordinates, point.point());
        assert_eq!(expected.elevation, point.elevation);
    }

    Ok(())
}

#[test]
fn write_file_overwrites() -> Result<(), String> {
    let dir = tempfile::tempdir().map_err(|e| e.to_string())?;
    let path = dir.path().join("tour.gpx");
    fs::write(&path, "stale content that is much longer than nothing").map_err(|e| e.to_string())?;

    let mut generator = GpxGenerator::empty("tour2gpx".to_string());
    generator.tracks = vec![Tracker::new("file".to_string())
        .build(&[position(48.1, 11.6, Some(520.0))])
        .map_err(|e| e.to_string())?];
    generator.write(&path).map_err(|e| e.to_string())?;

    let text = fs::read_to_string(&path).map_err(|e| e.to_string())?;
    assert!(text.starts_with("<?xml"));
    assert!(!text.contains("stale"));
    assert!(text.contains("<name>file</name>"));

    Ok(())
}

#[test]
fn write_to_missing_dir() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("tour.gpx");

    let generator = GpxGenerator::empty("tour2gpx".to_string());
    let err = generator.write(&path).unwrap_err();

    assert!(matches!(err, crate::error::WriteError::Create(_)));
}
