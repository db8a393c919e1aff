mod common;

use sqlx::PgPool;
use std::collections::{HashMap, HashSet};

const CALLERS: usize = 16;

#[sqlx::test]
async fn test_concurrent_shorten_of_distinct_urls(pool: PgPool) {
    let shortener = common::create_test_state(pool.clone()).shortener;

    let handles: Vec<_> = (0..CALLERS)
        .map(|i| {
            let shortener = shortener.clone();
            let url = format!("https://u{i}.example.com");
            tokio::spawn(async move { shortener.shorten(&url).await })
        })
        .collect();

    let mut ids = Vec::new();
    for handle in handles {
        let mapping = handle.await.unwrap().expect("every caller gets a mapping");
        ids.push(mapping.short_id);
    }

    let distinct: HashSet<i64> = ids.iter().copied().collect();
    assert_eq!(distinct.len(), CALLERS);

    ids.sort_unstable();
    assert_eq!(ids, (1..=CALLERS as i64).collect::<Vec<_>>());
    assert_eq!(common::count_mappings(&pool).await, CALLERS as i64);
}

#[sqlx::test]
async fn test_concurrent_shorten_of_same_url(pool: PgPool) {
    let shortener = common::create_test_state(pool.clone()).shortener;

    let handles: Vec<_> = (0..CALLERS)
        .map(|_| {
            let shortener = shortener.clone();
            tokio::spawn(async move { shortener.shorten("https://www.example.com").await })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        let mapping = handle.await.unwrap().expect("every caller gets a mapping");
        assert_eq!(mapping.original_url, "https://www.example.com");
        ids.insert(mapping.short_id);
    }

    assert_eq!(ids, HashSet::from([1]));
    assert_eq!(common::count_mappings(&pool).await, 1);
}

#[sqlx::test]
async fn test_concurrent_shorten_with_repeated_urls(pool: PgPool) {
    let shortener = common::create_test_state(pool.clone()).shortener;

    // Four URLs, each submitted by four callers at once.
    let handles: Vec<_> = (0..CALLERS)
        .map(|i| {
            let shortener = shortener.clone();
            tokio::spawn(async move {
                let url = format!("https://u{}.example.com", i % 4);
                let mapping = shortener.shorten(&url).await;
                (url, mapping)
            })
        })
        .collect();

    let mut ids_by_url: HashMap<String, HashSet<i64>> = HashMap::new();
    for handle in handles {
        let (url, mapping) = handle.await.unwrap();
        let mapping = mapping.expect("every caller gets a mapping");
        ids_by_url.entry(url).or_default().insert(mapping.short_id);
    }

    assert_eq!(ids_by_url.len(), 4);
    assert!(ids_by_url.values().all(|ids| ids.len() == 1));

    let all_ids: HashSet<i64> = ids_by_url.values().flatten().copied().collect();
    assert_eq!(all_ids, HashSet::from([1, 2, 3, 4]));
    assert_eq!(common::count_mappings(&pool).await, 4);
}
