// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use mcg::{Kustomization, validate_manifest_name};

fn benchmark_validate_manifest_name(c: &mut Criterion,)
{
    let short = "payments-overview";
    let long = format!("payments-{}", "a".repeat(240,));

    c.bench_function("validate_manifest_name_short", |b| {
        b.iter(|| validate_manifest_name(black_box(short,),).expect("valid name",),)
    },);

    c.bench_function("validate_manifest_name_long", |b| {
        b.iter(|| validate_manifest_name(black_box(&long,),).expect("valid name",),)
    },);

    c.bench_function("validate_manifest_name_rejected", |b| {
        b.iter(|| validate_manifest_name(black_box("-Payments-Overview",),).is_err(),)
    },);
}

fn benchmark_kustomization_render(c: &mut Criterion,)
{
    let resources: Vec<String,> = (0..500)
        .map(|index| format!("team-{index:03}-dashboard.db.configmap.yaml"),)
        .collect();
    let kustomization = Kustomization::with_resources(resources,);

    c.bench_function("kustomization_render_500", |b| {
        b.iter(|| black_box(&kustomization,).render().expect("render failed",),)
    },);
}

criterion_group!(benches, benchmark_validate_manifest_name, benchmark_kustomization_render);
criterion_main!(benches);
