// Unit tests for the Kinship matching engine

use kinship::core::{decode, encode, overlap, Interests, Matcher};
use kinship::models::{Profile, ProfileRecord};

fn create_profile(id: i64, city: &str, interests: &[&str]) -> Profile {
    Profile {
        id,
        name: format!("User {}", id),
        age: 25,
        gender: "female".to_string(),
        email: format!("user{}@example.com", id),
        city: city.to_string(),
        interests: interests.iter().copied().collect(),
    }
}

fn to_record(profile: &Profile) -> ProfileRecord {
    ProfileRecord {
        id: profile.id,
        name: profile.name.clone(),
        age: profile.age,
        gender: profile.gender.clone(),
        email: profile.email.clone(),
        city: profile.city.clone(),
        interests: encode(&profile.interests),
    }
}

#[test]
fn test_round_trip_many_sets() {
    let words = ["art", "music", "sports", "chess", "hiking", "ünïcödé", "with space", ""];

    // Every subset of the word list
    for mask in 0u32..(1 << words.len()) {
        let set: Interests = words
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, w)| *w)
            .collect();

        assert_eq!(decode(&encode(&set)).unwrap(), set);
    }
}

#[test]
fn test_decode_accepts_unsorted_storage() {
    // Rows written by other tools need not be sorted or deduplicated
    let interests = decode(r#"["music", "art", "music"]"#).unwrap();
    let expected: Interests = ["art", "music"].into_iter().collect();
    assert_eq!(interests, expected);
}

#[test]
fn test_overlap_is_commutative() {
    let a: Interests = ["art", "music", "chess"].into_iter().collect();
    let b: Interests = ["chess", "music", "sports"].into_iter().collect();
    assert_eq!(overlap(&a, &b), 2);
    assert_eq!(overlap(&b, &a), 2);
}

#[test]
fn test_chess_examples() {
    let matcher = Matcher::default();
    let chess = create_profile(1, "Austin", &["chess"]);
    let chess_hiking = create_profile(2, "Austin", &["chess", "hiking"]);
    let hiking = create_profile(3, "Austin", &["hiking"]);

    assert!(matcher.is_match(&chess, &chess_hiking));
    assert!(!matcher.is_match(&chess, &hiking));
}

#[test]
fn test_results_keep_store_order() {
    let matcher = Matcher::default();
    let subject = create_profile(1, "Austin", &["art", "music"]);
    let candidates: Vec<ProfileRecord> = [
        create_profile(9, "Austin", &["music"]),
        create_profile(3, "Austin", &["art", "music"]),
        create_profile(5, "Austin", &["art"]),
    ]
    .iter()
    .map(to_record)
    .collect();

    let result = matcher.find_matches(&subject, candidates);
    let ids: Vec<i64> = result.matches.iter().map(|p| p.id).collect();

    // No ranking by overlap; input order is preserved
    assert_eq!(ids, vec![9, 3, 5]);
}

#[test]
fn test_symmetry_over_snapshot() {
    let matcher = Matcher::default();
    let snapshot = vec![
        create_profile(1, "Austin", &["art", "music"]),
        create_profile(2, "Austin", &["music", "sports"]),
        create_profile(3, "Austin", &["sports"]),
        create_profile(4, "Dallas", &["art", "music"]),
        create_profile(5, "Austin", &[]),
    ];

    for a in &snapshot {
        let records: Vec<ProfileRecord> = snapshot.iter().map(to_record).collect();
        let from_a = matcher.find_matches(a, records);

        for b in &from_a.matches {
            let records: Vec<ProfileRecord> = snapshot.iter().map(to_record).collect();
            let from_b = matcher.find_matches(b, records);
            assert!(
                from_b.matches.iter().any(|p| p.id == a.id),
                "{} matches {} but not the reverse",
                b.id,
                a.id
            );
        }

        assert!(from_a.matches.iter().all(|p| p.id != a.id));
        assert!(from_a.matches.iter().all(|p| p.city == a.city));
    }
}

#[test]
fn test_empty_subject_never_matches() {
    let matcher = Matcher::default();
    let subject = create_profile(1, "Austin", &[]);
    let candidates: Vec<ProfileRecord> = (2..20)
        .map(|i| to_record(&create_profile(i, "Austin", &["art", "music", "chess"])))
        .collect();

    let result = matcher.find_matches(&subject, candidates);
    assert!(result.matches.is_empty());
    assert_eq!(result.total_candidates, 18);
}
