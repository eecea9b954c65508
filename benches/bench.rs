// Criterion benchmarks for the Kinship matching engine

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use kinship::core::{decode, encode, Interests, Matcher};
use kinship::models::{Profile, ProfileRecord};

const INTERESTS: &[&str] = &[
    "art", "music", "sports", "chess", "hiking", "cooking", "travel", "reading",
    "gaming", "photography", "yoga", "cycling", "running", "dancing", "film",
];

const CITIES: &[&str] = &["Austin", "Dallas", "Houston"];

fn interests_for(id: usize) -> Interests {
    (0..3)
        .map(|k| INTERESTS[(id * 7 + k * 5) % INTERESTS.len()])
        .collect()
}

fn create_candidate(id: usize) -> ProfileRecord {
    ProfileRecord {
        id: id as i64,
        name: format!("User {}", id),
        age: 20 + (id % 30) as i32,
        gender: if id % 2 == 0 { "female" } else { "male" }.to_string(),
        email: format!("user{}@example.com", id),
        city: CITIES[id % CITIES.len()].to_string(),
        interests: encode(&interests_for(id)),
    }
}

fn create_subject() -> Profile {
    Profile {
        id: 0,
        name: "Subject".to_string(),
        age: 30,
        gender: "female".to_string(),
        email: "subject@example.com".to_string(),
        city: "Austin".to_string(),
        interests: ["art", "music", "hiking"].into_iter().collect(),
    }
}

fn bench_codec(c: &mut Criterion) {
    let interests: Interests = INTERESTS.iter().copied().collect();
    let raw = encode(&interests);

    c.bench_function("interests_encode", |b| {
        b.iter(|| encode(black_box(&interests)));
    });

    c.bench_function("interests_decode", |b| {
        b.iter(|| decode(black_box(&raw)));
    });
}

fn bench_find_matches(c: &mut Criterion) {
    let matcher = Matcher::default();
    let subject = create_subject();

    let mut group = c.benchmark_group("find_matches");

    for size in [100, 1000, 10000].iter() {
        let candidates: Vec<ProfileRecord> = (1..=*size).map(create_candidate).collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), &candidates, |b, candidates| {
            b.iter(|| matcher.find_matches(black_box(&subject), black_box(candidates.clone())));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_codec, bench_find_matches);
criterion_main!(benches);
