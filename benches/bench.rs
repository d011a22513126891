// Criterion benchmarks for MatchMate Algo

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use matchmate_algo::core::{catalog::{AVAILABILITIES, GAMES}, compatibility, FilterSelection, Ranker};
use matchmate_algo::models::{ContactInfo, Level, MatchMode, PlayStyle, Profile};

fn create_candidate(id: usize) -> Profile {
    let levels = [Level::Beginner, Level::Intermediate, Level::Advanced, Level::Expert];
    let styles = [PlayStyle::Competitive, PlayStyle::Chill, PlayStyle::Tryhard, PlayStyle::Fun];

    Profile {
        user_id: id.to_string(),
        username: format!("Player {}", id),
        avatar_emoji: "🎮".to_string(),
        bio: String::new(),
        main_game: String::new(),
        games: GAMES
            .iter()
            .skip(id % GAMES.len())
            .take(1 + id % 4)
            .map(|g| g.to_string())
            .collect(),
        level: levels[id % 4].clone(),
        play_style: styles[(id / 3) % 4].clone(),
        availability: AVAILABILITIES
            .iter()
            .skip(id % 3)
            .take(1 + id % 3)
            .map(|s| s.to_string())
            .collect(),
        contact: ContactInfo::default(),
        is_online: id % 2 == 0,
        last_seen: None,
        created_at: None,
        updated_at: None,
    }
}

fn create_viewer() -> Profile {
    Profile {
        user_id: "viewer".to_string(),
        games: vec!["Valorant".to_string(), "CS2".to_string(), "Minecraft".to_string()],
        level: Level::Advanced,
        play_style: PlayStyle::Competitive,
        availability: vec!["Soirée (18h-23h)".to_string(), "Week-end".to_string()],
        ..create_candidate(0)
    }
}

fn bench_compatibility(c: &mut Criterion) {
    let viewer = create_viewer();
    let candidate = create_candidate(7);

    c.bench_function("compatibility", |b| {
        b.iter(|| compatibility(black_box(&viewer), black_box(&candidate)));
    });
}

fn bench_ranking(c: &mut Criterion) {
    let ranker = Ranker::with_default_rules();
    let viewer = create_viewer();

    let mut group = c.benchmark_group("ranking");

    for candidate_count in [10, 100, 500, 1000].iter() {
        let pool: Vec<Profile> = (0..*candidate_count).map(create_candidate).collect();

        group.bench_with_input(
            BenchmarkId::new("rank_all", candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| {
                    ranker.rank(
                        black_box(Some(&viewer)),
                        black_box(&pool),
                        MatchMode::All,
                        &FilterSelection::default(),
                    )
                });
            },
        );
    }

    group.finish();
}

fn bench_filtered_ranking(c: &mut Criterion) {
    let ranker = Ranker::with_default_rules();
    let viewer = create_viewer();
    let pool: Vec<Profile> = (0..1000).map(create_candidate).collect();
    let filters = FilterSelection {
        games: vec!["Valorant".to_string(), "CS2".to_string()],
        styles: vec![],
        availability: vec!["Week-end".to_string()],
    };

    c.bench_function("rank_competitive_filtered_1000_candidates", |b| {
        b.iter(|| {
            ranker.rank(
                black_box(Some(&viewer)),
                black_box(&pool),
                MatchMode::Competitive,
                black_box(&filters),
            )
        });
    });
}

criterion_group!(benches, bench_compatibility, bench_ranking, bench_filtered_ranking);

criterion_main!(benches);
