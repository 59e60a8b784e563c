use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use clipdump::classify::{Availability, classify};
use clipdump::render::{PREVIEW_BYTES, RenderOptions, hex_preview, render_binary};

fn bench_hex_preview(c: &mut Criterion) {
    let payload = vec![0xA5u8; 1_000_000];

    c.bench_function("hex_preview_1mb", |b| {
        b.iter(|| hex_preview(black_box(&payload), PREVIEW_BYTES))
    });

    c.bench_function("render_binary_1mb", |b| {
        let options = RenderOptions::default();
        b.iter(|| {
            let mut out = Vec::with_capacity(512);
            render_binary(&mut out, black_box(&payload), &options).unwrap();
            out
        })
    });
}

fn bench_classify(c: &mut Criterion) {
    let available = Availability {
        text: true,
        bytes: true,
        paths: false,
        image: false,
    };
    let ids = [
        "text/plain;charset=utf-8",
        "text/html",
        "image/png",
        "application/x-qt-windows-mime;value=\"Rich Text Format\"",
        "chromium/x-web-custom-data",
    ];

    c.bench_function("classify_mixed_ids", |b| {
        b.iter(|| {
            for id in ids {
                black_box(classify(black_box(id), &available));
            }
        })
    });
}

criterion_group!(benches, bench_hex_preview, bench_classify);
criterion_main!(benches);
