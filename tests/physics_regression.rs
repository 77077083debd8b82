//! Physics Regression Tests
//!
//! These tests pin down the behaviour of the cloth core: equilibrium, the
//! spring force symmetry, the force clamp, anchors, reset and topology.
//!
//! # Running tests
//! ```bash
//! cargo test physics_regression
//! ```

use bevy::math::DVec3;
use bytemuck::Zeroable;
use rand::{rngs::StdRng, Rng, SeedableRng};

use cloth::resources::{ClothParams, PositionBuffer};
use cloth::ClothError;
use cloth::simulation::{
    clamp_force, Cloth, ClothLayout, EndpointRole, ForceIntegrator, RunState, SpringKind,
    TickClock, WindModel,
};

// ==================== HELPER FUNCTIONS ====================

fn default_cloth() -> Cloth {
    Cloth::new(&ClothLayout::default()).unwrap()
}

fn small_cloth(n: usize) -> Cloth {
    Cloth::new(&ClothLayout {
        size: n,
        edge_length: 40.0,
        ..ClothLayout::default()
    })
    .unwrap()
}

fn sink_for(cloth: &Cloth) -> PositionBuffer {
    PositionBuffer::with_points(cloth.grid().len())
}

/// Stiff springs, no gravity, no wind.
fn springs_only(stiffness: f64) -> ClothParams {
    ClothParams {
        stiffness,
        time_scale: 1.0,
        max_spring_force: 1.0,
        ..Zeroable::zeroed()
    }
}

fn frame(n: u32) -> TickClock {
    TickClock::from_wall(n as f64 / 60.0, 1.0 / 60.0, 57.2)
}

/// Jiggle every point by up to `amount` on each axis.
fn scramble(cloth: &mut Cloth, rng: &mut StdRng, amount: f64) {
    for point in cloth.grid_mut().points_mut() {
        point.position += DVec3::new(
            rng.gen_range(-amount..amount),
            rng.gen_range(-amount..amount),
            rng.gen_range(-amount..amount),
        );
    }
}

// ==================== TESTS ====================

#[test]
fn test_equilibrium_is_a_fixed_point() {
    let mut cloth = default_cloth();
    let mut sink = sink_for(&cloth);
    let before = cloth.grid().positions();

    let params = ClothParams {
        stiffness: 2.6,
        max_spring_force: 1.0,
        ..Zeroable::zeroed()
    };
    cloth.tick(&params, TickClock { sim_time: 5.0, scaled_delta: 1.0 }, &mut sink);

    assert_eq!(cloth.grid().positions(), before);
}

#[test]
fn test_spring_contributions_are_exact_negations() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut cloth = small_cloth(6);
    scramble(&mut cloth, &mut rng, 15.0);
    let mut sink = sink_for(&cloth);
    cloth.tick(&springs_only(0.8), frame(1), &mut sink);

    for spring in cloth.springs().springs() {
        let on_a = spring.force_on(EndpointRole::A);
        let on_b = spring.force_on(EndpointRole::B);
        assert_eq!(on_a, -on_b);
        assert_eq!(on_a + on_b, DVec3::ZERO);
    }
}

#[test]
fn test_internal_spring_forces_cancel_across_the_sheet() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut cloth = small_cloth(5);
    scramble(&mut cloth, &mut rng, 8.0);
    let mut sink = sink_for(&cloth);
    cloth.tick(&springs_only(0.5), frame(1), &mut sink);

    let total = (0..cloth.grid().len())
        .map(|idx| ForceIntegrator::spring_force(cloth.grid(), cloth.springs(), idx))
        .fold(DVec3::ZERO, |acc, f| acc + f);
    assert!(total.length() < 1e-6, "net internal force {:?}", total);
}

#[test]
fn test_clamp_produces_unit_force_in_same_direction() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..100 {
        let v = DVec3::new(
            rng.gen_range(-50.0..50.0),
            rng.gen_range(-50.0..50.0),
            rng.gen_range(-50.0..50.0),
        );
        if v.length() <= 1.0 {
            continue;
        }
        let clamped = clamp_force(v, 1.0);
        assert!((clamped.length() - 1.0).abs() < 1e-12);
        assert!(clamped.normalize().dot(v.normalize()) > 1.0 - 1e-12);
    }
}

#[test]
fn test_clamped_accumulator_when_springs_are_overstretched() {
    let mut cloth = small_cloth(4);
    cloth.grid_mut().set_position(2, 1, DVec3::new(140.0, 80.0, 0.0));
    let mut sink = sink_for(&cloth);
    cloth.tick(&springs_only(1.0), TickClock::default(), &mut sink);

    let idx = cloth.grid().index(2, 1);
    let raw = ForceIntegrator::spring_force(cloth.grid(), cloth.springs(), idx);
    assert!(raw.length() > 1.0);
    let stored = cloth.integrator().accumulated(idx);
    assert!((stored.length() - 1.0).abs() < 1e-12);
    assert!(stored.normalize().dot(raw.normalize()) > 1.0 - 1e-12);
}

#[test]
fn test_reset_is_idempotent_and_restores_snapshot() {
    let mut cloth = default_cloth();
    let mut sink = sink_for(&cloth);
    let original = cloth.grid().positions();

    for n in 0..200 {
        cloth.tick(&ClothParams::default(), frame(n), &mut sink);
    }
    assert_ne!(cloth.grid().positions(), original);

    cloth.reset(&mut sink);
    let once = cloth.grid().positions();
    let once_buffer = sink.clone();
    cloth.reset(&mut sink);

    assert_eq!(once, original);
    assert_eq!(cloth.grid().positions(), once);
    assert_eq!(sink, once_buffer);
    assert_eq!(cloth.snapshot().positions(), original.as_slice());
}

#[test]
fn test_reset_before_any_tick() {
    let mut cloth = default_cloth();
    let mut sink = sink_for(&cloth);
    cloth.reset(&mut sink);

    assert_eq!(cloth.grid().positions(), cloth.snapshot().positions());
    let far_corner = cloth.grid().point(19, 19).buffer_index().unwrap();
    assert_eq!(sink.get(far_corner), [760.0, 760.0, 0.0]);
}

#[test]
fn test_reset_keeps_run_state_and_topology() {
    let mut cloth = default_cloth();
    let mut sink = sink_for(&cloth);
    cloth.toggle();
    cloth.reset(&mut sink);
    assert_eq!(cloth.state(), RunState::Paused);
    assert_eq!(cloth.springs().len(), 1760);
}

#[test]
fn test_spring_count_for_twenty_by_twenty() {
    let cloth = default_cloth();
    let springs = cloth.springs();

    assert_eq!(springs.count_of(SpringKind::Vertical), 19 * 20);
    let horizontal: usize = [1, 2, 3, 5]
        .iter()
        .map(|&offset| springs.count_of(SpringKind::Horizontal { offset }))
        .sum();
    assert_eq!(horizontal, (19 + 18 + 17 + 15) * 20);
    assert_eq!(springs.len(), 1760);
}

#[test]
fn test_repeated_spring_offset_fails_construction() {
    let layout = ClothLayout {
        spring_offsets: vec![1, 1],
        ..ClothLayout::default()
    };
    assert_eq!(
        Cloth::new(&layout).unwrap_err(),
        ClothError::DuplicateSpringOffset { offset: 1 }
    );
}

#[test]
fn test_displaced_point_is_pulled_back() {
    let mut cloth = small_cloth(4);
    let (row, col) = (1, 1);
    let home = cloth.position(row, col);
    cloth
        .grid_mut()
        .set_position(row, col, home + DVec3::new(10.0, 0.0, 0.0));

    let mut sink = sink_for(&cloth);
    cloth.tick(&springs_only(0.001), TickClock::default(), &mut sink);

    let grid = cloth.grid();
    let displaced = grid.index(row, col);
    assert!(cloth.integrator().accumulated(displaced).x < 0.0);

    // Every neighbour is pushed in the direction that shrinks its spring's deformation.
    for incident in grid.points()[displaced].incident() {
        let spring = cloth.springs().spring(incident.spring);
        let neighbour = match incident.role {
            EndpointRole::A => spring.b(),
            EndpointRole::B => spring.a(),
        };
        let neighbour_role = match incident.role {
            EndpointRole::A => EndpointRole::B,
            EndpointRole::B => EndpointRole::A,
        };
        let toward_displaced = grid.points()[displaced].position - grid.points()[neighbour].position;
        let stretch = toward_displaced.length() - spring.rest_length();
        let push = spring.force_on(neighbour_role);
        // The neighbour's other springs are all at rest, so what it accumulates
        // is this spring's push after the clamp.
        let accumulated = cloth.integrator().accumulated(neighbour);
        assert!(stretch.abs() > 0.0);
        if stretch > 0.0 {
            assert!(push.dot(toward_displaced) > 0.0, "stretched spring should pull neighbour in");
            assert!(accumulated.dot(toward_displaced) > 0.0);
        } else {
            assert!(push.dot(toward_displaced) < 0.0, "compressed spring should push neighbour out");
            assert!(accumulated.dot(toward_displaced) < 0.0);
        }
        assert!(accumulated.normalize().dot(push.normalize()) > 1.0 - 1e-9);
    }
}

#[test]
fn test_wind_moves_free_points_by_force_times_step() {
    let mut cloth = small_cloth(4);
    let mut sink = sink_for(&cloth);
    let mut params = ClothParams {
        wind_force_factor: 0.8,
        wind_cycle_factor: 0.04,
        time_scale: 1.0,
        max_spring_force: 1.0,
        ..Zeroable::zeroed()
    };

    let mut check_step = |cloth: &mut Cloth, params: &ClothParams, clock: TickClock| {
        let before = cloth.grid().positions();
        cloth.tick(params, clock, &mut sink);
        let wind = WindModel::new(params.wind_force_factor, params.wind_cycle_factor);
        let mut steps = Vec::with_capacity(before.len());
        for (idx, point) in cloth.grid().points().iter().enumerate() {
            let step = point.position - before[idx];
            steps.push(step);
            if cloth.grid().is_anchor(point.row(), point.col()) {
                assert_eq!(step, DVec3::ZERO);
                continue;
            }
            let expected = wind.force(clock.sim_time, point.col()) * clock.scaled_delta;
            assert!(
                (step - expected).length() < 1e-12,
                "point {:?} moved {:?}, expected {:?}",
                (point.row(), point.col()),
                step,
                expected
            );
        }
        steps
    };

    let first = check_step(&mut cloth, &params, TickClock { sim_time: 3.0, scaled_delta: 0.5 });
    let (a, b) = (cloth.grid().index(1, 1), cloth.grid().index(1, 2));
    // columns 1 and 2 sit at different wind phases
    assert_ne!(first[a].z, first[b].z);
    assert!(first[a].z != 0.0 && first[b].z != 0.0);

    // No reset in between: the new factor applies from the next tick on.
    params.wind_force_factor = 2.5;
    let second = check_step(&mut cloth, &params, TickClock { sim_time: 4.0, scaled_delta: 0.5 });
    let expected = WindModel::new(2.5, 0.04).force(4.0, 1).z * 0.5;
    assert!((second[a].z - expected).abs() < 1e-12);
    assert!(second[a].z.abs() > first[a].z.abs());
}

#[test]
fn test_anchors_never_move() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut cloth = default_cloth();
    let mut sink = sink_for(&cloth);
    let anchors = cloth.grid().anchors();
    let pinned: Vec<DVec3> = anchors.iter().map(|&(r, c)| cloth.position(r, c)).collect();

    for n in 0..300 {
        let params = ClothParams {
            stiffness: rng.gen_range(0.0..5.0),
            gravity: rng.gen_range(0.0..1.0),
            wind_force_factor: rng.gen_range(0.0..5.0),
            wind_cycle_factor: rng.gen_range(0.0..1.0),
            time_scale: rng.gen_range(0.0..100.0),
            max_spring_force: 1.0,
        };
        let clock = TickClock::from_wall(n as f64 / 60.0, 1.0 / 60.0, params.time_scale);
        cloth.tick(&params, clock, &mut sink);
    }

    for (&(r, c), &start) in anchors.iter().zip(&pinned) {
        assert_eq!(cloth.position(r, c), start);
    }
}

#[test]
fn test_paused_ticks_are_inert() {
    let mut cloth = default_cloth();
    let mut sink = sink_for(&cloth);
    cloth.tick(&ClothParams::default(), frame(1), &mut sink);
    cloth.toggle();

    let positions = cloth.grid().positions();
    let buffer = sink.clone();
    for n in 2..50 {
        assert!(!cloth.tick(&ClothParams::default(), frame(n), &mut sink));
    }
    assert_eq!(cloth.grid().positions(), positions);
    assert_eq!(sink, buffer);
    assert_eq!(cloth.ticks(), 1);
}

#[test]
fn test_sink_mirrors_grid_after_tick() {
    let mut cloth = default_cloth();
    let mut sink = sink_for(&cloth);
    cloth.reset(&mut sink);
    cloth.tick(&ClothParams::default(), frame(1), &mut sink);

    for point in cloth.grid().points() {
        let index = point.buffer_index().unwrap();
        assert_eq!(sink.get(index), point.position.as_vec3().to_array());
        assert_eq!(index, point.row() * 20 + point.col());
    }
}

#[test]
fn test_cloth_sags_under_gravity() {
    let mut cloth = default_cloth();
    let mut sink = sink_for(&cloth);
    let params = ClothParams {
        wind_force_factor: 0.0,
        ..ClothParams::default()
    };
    let start = cloth.position(19, 10);
    for n in 0..120 {
        cloth.tick(&params, frame(n), &mut sink);
    }
    let end = cloth.position(19, 10);
    assert!(end.y > start.y, "bottom edge should fall along +y");
    assert!(end.is_finite());
}

#[test]
fn test_determinism() {
    let run = || {
        let mut cloth = default_cloth();
        let mut sink = sink_for(&cloth);
        for n in 0..100 {
            cloth.tick(&ClothParams::default(), frame(n), &mut sink);
        }
        cloth.grid().positions()
    };
    assert_eq!(run(), run());
}
