// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use trisweep_core::{Population, VertexLayout};

fn bench_population(c: &mut Criterion) {
    let mut group = c.benchmark_group("Population");

    group.bench_function("Regenerate 10k", |b| {
        let mut population = Population::with_seed(42);
        b.iter(|| {
            population.resize(black_box(10_000));
        });
    });

    let mut population = Population::with_seed(42);
    population.resize(10_000);

    group.bench_function("Tick 10k", |b| {
        b.iter(|| population.tick(black_box(0.016)));
    });

    group.bench_function("Extended vertex data 10k", |b| {
        b.iter(|| black_box(population.vertex_data(VertexLayout::Extended)));
    });

    group.finish();
}

criterion_group!(benches, bench_population);
criterion_main!(benches);
