use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rws_codec::{FieldCodec, FloatCell, FractionalCodec, Grass, SchemeKind, WhitespaceCodec};
use rws_save::{DefaultSteganographer, SaveConfig, Steganographer};
use rws_tests::{SaveBuilder, payload};

fn grass_cover(count: u32) -> Vec<Grass> {
    (0..count)
        .map(|n| {
            let age = (n % 3 != 0).then_some(90_000 + n);
            Grass::new("PlantGrass", 4000 + n, 40, "0.53129001", age)
        })
        .collect()
}

fn bench_codec_field(c: &mut Criterion) {
    let cover = grass_cover(200);
    let data = payload(1024);

    c.bench_function("codec_field_encode", |b| {
        b.iter(|| {
            let mut grass = cover.clone();
            FieldCodec::encode(&mut grass, &data).unwrap()
        });
    });
}

fn bench_codec_fractional(c: &mut Criterion) {
    let cover: Vec<FloatCell> = (0..2000)
        .map(|i| FloatCell::new(&format!("{}.{:04}", i % 300, i * 37 % 10_000)))
        .collect();
    let data = payload(1024);

    c.bench_function("codec_fractional_encode", |b| {
        b.iter(|| {
            let mut floats = cover.clone();
            FractionalCodec::encode(&mut floats, &data).unwrap()
        });
    });
}

fn bench_codec_whitespace(c: &mut Criterion) {
    let lines: Vec<String> = (0..4000).map(|i| format!("<stat{i}>1.5</stat{i}>")).collect();
    let data = payload(512);

    c.bench_function("codec_whitespace_encode", |b| {
        b.iter(|| WhitespaceCodec::encode_lines(&lines, &data));
    });
}

fn bench_conceal_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("conceal_save");

    for grasses in [50, 500] {
        let save = SaveBuilder::new().grasses(grasses, 0).decimals(grasses).build();
        #[allow(clippy::cast_possible_truncation)]
        group.throughput(Throughput::Bytes(save.len() as u64));
        for scheme in SchemeKind::ALL {
            let config = SaveConfig::with_scheme(scheme);
            let data = payload(grasses);
            group.bench_with_input(
                BenchmarkId::new(scheme.name(), format!("{grasses}_grass")),
                &save,
                |b, save| {
                    b.iter(|| DefaultSteganographer.conceal(save, &data, &config).unwrap());
                },
            );
        }
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_codec_field,
    bench_codec_fractional,
    bench_codec_whitespace,
    bench_conceal_throughput
);
criterion_main!(benches);
