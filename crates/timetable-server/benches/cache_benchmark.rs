//! Benchmarks for the in-memory caches and the lesson filter.
//!
//! ```bash
//! cargo bench --package timetable-server
//! ```

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use timetable_service::{external::applicability::lesson_applies, BoundedCache, FeedLesson};

fn bench_bounded_cache(c: &mut Criterion) {
    let mut group = c.benchmark_group("bounded_cache");

    for capacity in [100usize, 10_000] {
        group.bench_with_input(BenchmarkId::new("put_evicting", capacity), &capacity, |b, &cap| {
            let cache = BoundedCache::new(cap, None);
            let mut key = 0u64;
            b.iter(|| {
                key += 1;
                cache.put(key, black_box(key));
            });
        });

        group.bench_with_input(BenchmarkId::new("get_hit", capacity), &capacity, |b, &cap| {
            let cache = BoundedCache::new(cap, None);
            for key in 0..cap as u64 {
                cache.put(key, key);
            }
            let mut key = 0u64;
            b.iter(|| {
                key = (key + 1) % cap as u64;
                black_box(cache.get(&key))
            });
        });
    }

    group.finish();
}

fn bench_lesson_filter(c: &mut Criterion) {
    let lesson: FeedLesson = serde_json::from_str(
        r#"{"subjectFullName":"Physics","weekNumber":[1,3],"startLessonDate":"10.02.2025","endLessonDate":"31.05.2025","startLessonTime":"09:00","endLessonTime":"10:20","auditories":["101-1"]}"#,
    )
    .unwrap();
    let semester_start = NaiveDate::from_ymd_opt(2025, 2, 9).unwrap();
    let target = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();

    c.bench_function("lesson_applies", |b| {
        b.iter(|| lesson_applies(black_box(&lesson), black_box(target), semester_start));
    });
}

criterion_group!(benches, bench_bounded_cache, bench_lesson_filter);
criterion_main!(benches);
