use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dynamic_array::DynamicArray;

fn bench_push_back(c: &mut Criterion) {
    c.bench_function("std_vec_push", |b| {
        b.iter(|| {
            let mut v = Vec::new();
            for i in 0..1000 {
                v.push(black_box(i));
            }
            v
        })
    });

    c.bench_function("dynamic_array_push_back", |b| {
        b.iter(|| {
            let mut v = DynamicArray::new();
            for i in 0..1000 {
                v.push_back(black_box(i));
            }
            v
        })
    });
}

fn bench_insert_front(c: &mut Criterion) {
    c.bench_function("std_vec_insert_front", |b| {
        b.iter(|| {
            let mut v = Vec::new();
            for i in 0..256 {
                v.insert(0, black_box(i));
            }
            v
        })
    });

    c.bench_function("dynamic_array_insert_front", |b| {
        b.iter(|| {
            let mut v = DynamicArray::new();
            for i in 0..256 {
                let _ = v.insert(v.begin(), black_box(i));
            }
            v
        })
    });
}

fn bench_iter(c: &mut Criterion) {
    let v: Vec<i32> = (0..1000).collect();
    c.bench_function("std_vec_iter", |b| {
        b.iter(|| {
            let mut sum = 0;
            for &x in black_box(&v) {
                sum += x;
            }
            sum
        })
    });

    let arr: DynamicArray<i32> = (0..1000).collect();
    c.bench_function("dynamic_array_iter", |b| {
        b.iter(|| {
            let mut sum = 0;
            for &x in black_box(&arr) {
                sum += x;
            }
            sum
        })
    });
}

criterion_group!(benches, bench_push_back, bench_insert_front, bench_iter);
criterion_main!(benches);
