//! Criterion benchmarks for check evaluation and tree generation.
//!
//! Uses synthetic catalogs drawn from a seeded RNG so runs are comparable.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use draft_compose::checks::{evaluate_composition_checks, RequirementToggles};
use draft_compose::team::{
    ChampionCatalog, ChampionRecord, CompositionTag, DamageType, ScalingPhase, Slot, TeamState,
};
use draft_compose::tree::{generate_possibility_tree, RankGoal, TreeConfig, TreeParams};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const TAGS: [CompositionTag; 7] = [
    CompositionTag::HardEngage,
    CompositionTag::Frontline,
    CompositionTag::Waveclear,
    CompositionTag::Disengage,
    CompositionTag::AntiTank,
    CompositionTag::SideLaneThreat,
    CompositionTag::DiveThreat,
];

/// `per_role` champions for each slot, each with one or two random tags.
fn synthetic_catalog(per_role: usize, seed: u64) -> ChampionCatalog {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut catalog = ChampionCatalog::new();
    for slot in Slot::ALL {
        for i in 0..per_role {
            let damage = match rng.random_range(0..5) {
                0 | 1 => DamageType::Ad,
                2 | 3 => DamageType::Ap,
                _ => DamageType::Mixed,
            };
            let mut tags = vec![TAGS[rng.random_range(0..TAGS.len())]];
            if rng.random_bool(0.5) {
                tags.push(TAGS[rng.random_range(0..TAGS.len())]);
            }
            catalog.insert(
                ChampionRecord::new(format!("{slot}-{i}"), damage, ScalingPhase::Mid)
                    .with_roles([slot])
                    .with_tags(tags),
            );
        }
    }
    catalog
}

fn bench_evaluate(c: &mut Criterion) {
    let catalog = synthetic_catalog(10, 42);
    let team = Slot::ALL
        .into_iter()
        .try_fold(TeamState::default(), |team, slot| {
            team.with_pick(slot, &format!("{slot}-0"))
        })
        .expect("synthetic names are distinct");
    let toggles = RequirementToggles::default();

    c.bench_function("evaluate_full_team", |b| {
        b.iter(|| {
            let eval = evaluate_composition_checks(black_box(&team), &catalog, &toggles);
            black_box(eval)
        })
    });
}

fn bench_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("possibility_tree");
    group.sample_size(10);

    for &per_role in &[8, 16, 32] {
        let catalog = synthetic_catalog(per_role, 42);
        for goal in [RankGoal::CandidateScore, RankGoal::ValidEndStates] {
            let config = TreeConfig::default()
                .with_max_branch(3)
                .with_rank_goal(goal);
            let params = TreeParams::new(&catalog).with_config(config);
            group.bench_with_input(
                BenchmarkId::new(goal.as_str(), per_role),
                &params,
                |b, p| {
                    b.iter(|| {
                        let tree = generate_possibility_tree(black_box(p));
                        black_box(tree)
                    })
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_evaluate, bench_tree);
criterion_main!(benches);
