use goalpost::{
    inclusive_edges, interior_points, interior_points_with, parse_goal_corners, quad_from_extent,
    utl::{IntoArray, IntoImage},
    warp_points, ProjectionOptions, ProjectionError, Projector, Quad, RgbImg,
};
use image::Rgb;
use nalgebra::point;
use ndarray::{s, Array3};
use std::collections::HashSet;

/// A frame filled with a position dependent pattern so that untouched pixels
/// can be told apart
fn frame(height: usize, width: usize, seed: usize) -> Array3<u8> {
    Array3::from_shape_fn((height, width, 3), |(r, c, ch)| {
        ((r * 7 + c * 13 + ch * 31 + seed) % 251) as u8
    })
}

/// Left half red, right half blue
fn logo() -> Array3<u8> {
    let img = RgbImg::from_fn(40, 20, |x, _| {
        if x < 20 {
            Rgb([255, 0, 0])
        } else {
            Rgb([0, 0, 255])
        }
    });
    img.into_array().unwrap()
}

/// A slightly tilted goal with fractional corners
fn goal(shift: f64) -> Quad<f64> {
    [
        point!(30.37 + shift, 20.21),
        point!(110.13 + shift, 26.58),
        point!(106.71 + shift, 70.34),
        point!(28.29 + shift, 64.47),
    ]
}

#[test]
fn logo_lands_inside_the_goal_only() {
    let base = frame(90, 150, 0);
    let goal = goal(0.);
    let projector = Projector::new(logo());
    let out = projector.project(base.view(), &goal).unwrap();

    let inside: HashSet<(usize, usize)> = interior_points(90, 150, &goal)
        .iter()
        .map(|p| (p.y as usize, p.x as usize))
        .collect();
    assert!(!inside.is_empty());

    for ((r, c, ch), v) in out.indexed_iter() {
        if inside.contains(&(r, c)) {
            assert!(*v == 0 || *v == 255, "pixel ({r}, {c}) was not painted");
        } else {
            assert_eq!(*v, base[[r, c, ch]], "pixel ({r}, {c}) was modified");
        }
    }

    // well inside the left and right halves of the goal
    assert_eq!(out.slice(s![45, 45, ..]).to_vec(), vec![255, 0, 0]);
    assert_eq!(out.slice(s![45, 95, ..]).to_vec(), vec![0, 0, 255]);
}

#[test]
fn integer_corners_with_sloped_edges_are_filled_completely() {
    // the bottom edge passes through (180, 154), the right edge through (301, 65)
    let goals = [
        [
            point!(100., 50.),
            point!(300., 60.),
            point!(300., 160.),
            point!(100., 150.),
        ],
        [
            point!(100., 50.),
            point!(300., 60.),
            point!(320., 160.),
            point!(100., 150.),
        ],
    ];
    let frames = vec![Array3::<u8>::zeros((200, 400, 3)); 2];
    let projector = Projector::new(Array3::from_elem((100, 200, 3), 255u8));

    let results = projector.project_all(&frames, &goals).unwrap();
    for (goal, result) in goals.iter().zip(results) {
        let out = result.unwrap();
        let interior = interior_points_with(200, 400, goal, &inclusive_edges(projector.corners()));

        assert!(interior
            .iter()
            .all(|p| out.slice(s![p.y as usize, p.x as usize, ..]).iter().all(|&v| v == 255)));
        let painted = out.iter().filter(|&&v| v == 255).count();
        assert_eq!(painted, interior.len() * 3);
    }

    assert!(!interior_points(200, 400, &goals[0]).contains(&point!(180, 154)));
    assert!(!interior_points(200, 400, &goals[1]).contains(&point!(301, 65)));
}

#[test]
fn parallel_frames_match_sequential_ones() {
    let frames: Vec<_> = (0..6).map(|i| frame(90, 150, i)).collect();
    let goals: Vec<_> = (0..6).map(|i| goal(i as f64 * 3.5)).collect();
    let projector = Projector::new(logo()).with_options(ProjectionOptions {
        normalize: true,
        ..Default::default()
    });

    let parallel = projector.project_all(&frames, &goals).unwrap();
    for ((frame, goal), result) in frames.iter().zip(&goals).zip(parallel) {
        let sequential = projector.project(frame.view(), goal).unwrap();
        assert_eq!(result.unwrap(), sequential);
    }
}

#[test]
fn a_failing_frame_does_not_affect_the_others() {
    // corners out of order: the diagonals cross and the middle of the goal
    // is sent towards infinity
    let bowtie = [
        point!(30., 20.),
        point!(110., 70.),
        point!(110., 20.),
        point!(30., 70.),
    ];
    let frames = vec![frame(90, 150, 0), frame(90, 150, 1)];
    let projector = Projector::new(logo());

    let results = projector.project_all(&frames, &[goal(0.), bowtie]).unwrap();
    assert!(results[0].is_ok());
    assert!(matches!(
        results[1],
        Err(ProjectionError::OutOfBounds { .. })
    ));
}

#[test]
fn annotated_frames_round_trip_through_images() {
    let json = "[[[30.37, 20.21], [110.13, 26.58], [106.71, 70.34], [28.29, 64.47]]]";
    let goals = parse_goal_corners(json).unwrap();
    let base: RgbImg<u8> = frame(90, 150, 3).into_image().unwrap();

    let projector = Projector::new(logo());
    let out = projector
        .project(base.clone().into_array().unwrap().view(), &goals[0])
        .unwrap();
    let img: RgbImg<u8> = out.into_image().unwrap();

    assert_eq!(img.dimensions(), base.dimensions());
    assert_eq!(img.get_pixel(45, 45), &Rgb([255, 0, 0]));
    assert_eq!(img.get_pixel(5, 5), base.get_pixel(5, 5));
}

#[test]
fn warped_goal_pixels_fall_inside_the_logo() {
    let goal = goal(0.);
    let logo_quad = quad_from_extent(40, 20);
    let interior = interior_points(90, 150, &goal);
    let warped = warp_points(&goal, &logo_quad, &interior).unwrap();

    assert_eq!(warped.len(), interior.len());
    assert!(warped
        .iter()
        .all(|p| (-1e-6..40.).contains(&p.x) && (-1e-6..20.).contains(&p.y)));
}
