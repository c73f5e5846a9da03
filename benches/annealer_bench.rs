//! Benchmarks for the emberweave annealing engine.
//!
//! Measures the two per-iteration hot spots (full fitness evaluation and
//! neighbor generation, exercised through short end-to-end solves) over
//! generated timetabling instances of increasing size.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use emberweave::prelude::*;
use emberweave::timetable::constraints::{
    ClassTypeTimePreference, LabRequirement, LecturerConflict, RoomCapacity, RoomConflict,
    RoomUtilization,
};
use emberweave::timetable::model::*;
use emberweave::timetable::moves::{
    ChangeRoom, ChangeTimeSlot, RelocateConflicted, SwapTimeSlots,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const SEED: u64 = 1337;

/// Generates a random instance with `classes` assignments crammed into a
/// deliberately tight catalog, so the engine has real conflicts to chew
/// through.
fn random_instance(classes: usize, rng: &mut ChaCha8Rng) -> Timetable {
    let days = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];
    let mut slots = Vec::new();
    for day in days {
        for p in 0..4u16 {
            let start = 8 * 60 + p * 120;
            slots.push(TimeSlot::new(day, start, start + 100, (p + 1) as u8));
        }
    }

    let rooms: Vec<Room> = (0..classes.max(4) / 4)
        .map(|i| Room::new(format!("R{:03}", i + 101), 30 + (i as u32 % 3) * 20, i % 5 == 0))
        .collect();
    let lecturers: Vec<Lecturer> = (0..classes.max(3) / 3)
        .map(|i| Lecturer::new(format!("L{i}"), format!("Lecturer {i}")))
        .collect();

    let assignments = (0..classes)
        .map(|i| {
            let slot = slots[rng.gen_range(0..slots.len())];
            Assignment {
                class_id: format!("C{i:03}"),
                room_id: rooms[rng.gen_range(0..rooms.len())].id.clone(),
                lecturer_ids: vec![lecturers[rng.gen_range(0..lecturers.len())].id.clone()],
                slot,
                credit_hours: 2,
                participants: rng.gen_range(10..45),
                class_type: if rng.gen_bool(0.7) {
                    ClassType::Morning
                } else {
                    ClassType::Evening
                },
                requires_lab: rng.gen_bool(0.2),
                prayer_extension_min: if rng.gen_bool(0.1) { 20 } else { 0 },
                overflow: false,
            }
        })
        .collect();

    Timetable {
        assignments,
        rooms,
        lecturers,
        slots,
    }
}

fn constraints() -> Vec<Box<dyn Constraint<Timetable>>> {
    vec![
        Box::new(RoomConflict),
        Box::new(LecturerConflict),
        Box::new(RoomCapacity),
        Box::new(LabRequirement),
        Box::new(ClassTypeTimePreference::new(5.0)),
        Box::new(RoomUtilization::new(2.0)),
    ]
}

fn move_library() -> Vec<Box<dyn MoveGenerator<Timetable>>> {
    vec![
        Box::new(ChangeTimeSlot),
        Box::new(ChangeRoom),
        Box::new(SwapTimeSlots),
        Box::new(RelocateConflicted),
    ]
}

fn bench_fitness_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("FitnessEvaluation");

    for size in [20, 60, 120].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let mut rng = ChaCha8Rng::seed_from_u64(SEED);
            let instance = random_instance(size, &mut rng);
            let evaluator = FitnessEvaluator::new(constraints(), 10_000.0);

            b.iter(|| black_box(evaluator.evaluate(black_box(&instance))));
        });
    }

    group.finish();
}

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("Solve");
    group.sample_size(10);

    for size in [20, 60].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter_batched(
                || {
                    let mut rng = ChaCha8Rng::seed_from_u64(SEED);
                    let instance = random_instance(size, &mut rng);
                    let config = AnnealerConfig {
                        initial_temperature: 200.0,
                        min_temperature: 0.1,
                        cooling_rate: 0.99,
                        max_iterations: 2_000,
                        logging: LogOptions {
                            enabled: false,
                            ..LogOptions::default()
                        },
                        ..AnnealerConfig::default()
                    };
                    let annealer = Annealer::new(
                        config,
                        constraints(),
                        move_library(),
                        seeded_rng(SEED),
                    )
                    .unwrap();
                    (annealer, instance)
                },
                |(mut annealer, instance)| black_box(annealer.solve(&instance)),
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_fitness_evaluation, bench_solve);
criterion_main!(benches);
