use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::Vec2;
use tileblade_core::{EnemyKind, GameConfig, PlayerInput, Simulation, TileKind};

const TILE: f32 = 64.0;

/// A walled `size` x `size` room with a grass border inside the walls and
/// enemies spread over the floor.
fn build_room(size: i32, enemy_spacing: usize) -> Simulation {
    let mut sim = Simulation::new(GameConfig::default(), 1).expect("default config is valid");

    for x in -1..=size {
        for y in -1..=size {
            let cell = Vec2::new(x as f32 * TILE, y as f32 * TILE);
            let on_wall = x < 0 || y < 0 || x == size || y == size;
            let on_grass = x == 0 || y == 0 || x == size - 1 || y == size - 1;
            if on_wall {
                sim.spawn_tile(TileKind::Boundary, cell);
            } else if on_grass && (x + y) % 2 == 0 {
                sim.spawn_tile(TileKind::Grass, cell);
            }
        }
    }

    let mut kinds = EnemyKind::ALL.iter().cycle();
    for (i, x) in (2..size - 2).enumerate() {
        for y in 2..size - 2 {
            if (i + y as usize) % enemy_spacing == 0 {
                if let Some(&kind) = kinds.next() {
                    sim.spawn_enemy(kind, Vec2::new(x as f32 * TILE, y as f32 * TILE))
                        .expect("default config is valid");
                }
            }
        }
    }

    let center = (size / 2) as f32 * TILE;
    sim.spawn_player(Vec2::splat(center)).expect("default config is valid");
    sim
}

fn bench_step_idle(c: &mut Criterion) {
    // Enemies far from the player idle; measures the frame loop overhead
    let mut sim = build_room(24, 7);
    let input = PlayerInput::default();
    let mut now = 0;

    c.bench_function("step_idle", |b| {
        b.iter(|| {
            now += 16;
            black_box(sim.step(black_box(now), &input).len())
        })
    });
}

fn bench_step_combat(c: &mut Criterion) {
    // Dense room with the player swinging every frame
    let mut sim = build_room(16, 3);
    let input = PlayerInput {
        attack: true,
        move_x: 1,
        ..PlayerInput::default()
    };
    let mut now = 0;

    c.bench_function("step_combat", |b| {
        b.iter(|| {
            now += 16;
            black_box(sim.step(black_box(now), &input).len())
        })
    });
}

fn bench_obstacle_query(c: &mut Criterion) {
    let sim = build_room(32, 11);

    c.bench_function("obstacle_hitboxes", |b| {
        b.iter(|| {
            black_box(
                sim.arena()
                    .hitboxes_in(tileblade_core::SpriteGroups::OBSTACLE),
            )
        })
    });
}

criterion_group!(benches, bench_step_idle, bench_step_combat, bench_obstacle_query);
criterion_main!(benches);
