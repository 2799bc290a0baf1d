// Criterion benchmarks for LinkWork Match

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use linkwork_match::core::{
    distance::distance_km,
    regions::{regions, resolve_region},
    scoring::{compute_match, DEFAULT_MAX_DISTANCE_KM},
    skills::skill_match_fraction,
    Matcher,
};
use linkwork_match::models::{CandidateProfile, Posting, PostingKind, PostingStatus};

const SKILLS: [&str; 8] = [
    "Python", "React", "SQL", "Marketing", "Design", "Customer Service", "Driving", "Cooking",
];

fn create_candidate() -> CandidateProfile {
    CandidateProfile {
        id: "seeker".to_string(),
        full_name: None,
        region: "Kingston".to_string(),
        skills: vec!["Python".to_string(), "React".to_string(), "SQL".to_string()],
    }
}

fn create_posting(id: usize) -> Posting {
    let parishes: Vec<&str> = regions().map(|(name, _)| name).collect();

    Posting {
        id: id.to_string(),
        kind: PostingKind::Job,
        title: format!("Job {}", id),
        region: parishes[id % parishes.len()].to_string(),
        pay: 20000.0 + (id % 50) as f64 * 1000.0,
        required_skills: (0..(1 + id % 4))
            .map(|k| SKILLS[(id + k) % SKILLS.len()].to_string())
            .collect(),
        status: PostingStatus::Active,
        job_type: None,
        owner_id: None,
    }
}

fn bench_distance(c: &mut Criterion) {
    let kingston = resolve_region("Kingston").unwrap();
    let hanover = resolve_region("Hanover").unwrap();

    c.bench_function("geodesic_distance", |b| {
        b.iter(|| distance_km(black_box(kingston), black_box(hanover)));
    });

    c.bench_function("resolve_region", |b| {
        b.iter(|| resolve_region(black_box("St. Elizabeth")));
    });
}

fn bench_skill_match(c: &mut Criterion) {
    let candidate: Vec<String> = SKILLS.iter().take(5).map(|s| s.to_string()).collect();
    let required: Vec<String> = SKILLS.iter().skip(2).map(|s| s.to_lowercase()).collect();

    c.bench_function("skill_match_fraction", |b| {
        b.iter(|| skill_match_fraction(black_box(&candidate), black_box(&required)));
    });
}

fn bench_compute_match(c: &mut Criterion) {
    let candidate = create_candidate();
    let posting = create_posting(7);

    c.bench_function("compute_match", |b| {
        b.iter(|| compute_match(black_box(&candidate), black_box(&posting), DEFAULT_MAX_DISTANCE_KM));
    });
}

fn bench_ranking(c: &mut Criterion) {
    let matcher = Matcher::with_default_weights();
    let candidate = create_candidate();

    let mut group = c.benchmark_group("ranking");

    for posting_count in [10, 50, 100, 500].iter() {
        let postings: Vec<Posting> = (0..*posting_count).map(create_posting).collect();

        group.bench_with_input(
            BenchmarkId::new("rank", posting_count),
            posting_count,
            |b, _| {
                b.iter(|| matcher.rank(black_box(&candidate), black_box(&postings), black_box(10)));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_distance,
    bench_skill_match,
    bench_compute_match,
    bench_ranking
);

criterion_main!(benches);
