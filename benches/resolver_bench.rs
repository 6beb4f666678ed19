// Copyright (c) 2026 Bountyy Oy. All rights reserved.

use bookmarker::{absolute, classify, clean};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn clean_benchmark(c: &mut Criterion) {
    let inputs = vec![
        "smh.com.au",
        "//www.smh.com.au/rss/feed.xml",
        "http://www.theage.com.au:8080/news/",
        "  example.com\\images\\cat.png  ",
        "https://user:pw@host.example/a/b?c=d#e",
    ];

    c.bench_function("clean", |b| {
        b.iter(|| {
            for input in &inputs {
                black_box(clean(*input));
            }
        })
    });
}

fn absolute_benchmark(c: &mut Criterion) {
    let parent = clean("http://www.foxsports.com.au/rss/index.html").unwrap();
    let references = vec![
        "one/two/",
        "../up/three.html",
        "/root/path",
        "//cdn.example.com/x.js",
        "?page=2",
        "http://other.example.com/",
    ];

    c.bench_function("absolute", |b| {
        b.iter(|| {
            for reference in &references {
                black_box(absolute(reference, &parent));
            }
        })
    });
}

fn classify_benchmark(c: &mut Criterion) {
    let uris: Vec<_> = [
        "http://example.com/photo.JPG",
        "http://example.com/clip.mp4?x=1",
        "http://example.com/page.html",
        "http://example.com/",
    ]
    .iter()
    .filter_map(|u| clean(*u))
    .collect();

    c.bench_function("classify", |b| {
        b.iter(|| {
            for uri in &uris {
                black_box(classify(uri));
            }
        })
    });
}

criterion_group!(benches, clean_benchmark, absolute_benchmark, classify_benchmark);
criterion_main!(benches);
