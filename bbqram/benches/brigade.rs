use bbqram::brigade::BucketBrigade;
use bbqram::decompose::BucketBrigadeDecomp;
use bbqram::gate::GType;
use bbqram::mutate::GateRemover;
use bbqram::sim::Sampler;
use criterion::{criterion_group, criterion_main, Criterion};

fn benchmark_build(c: &mut Criterion) {
    for id in ["1", "2", "3"] {
        let decomp = BucketBrigadeDecomp::resolve(id).unwrap();
        c.bench_function(&format!("build_brigade_3q_scenario_{}", id), |b| {
            b.iter(|| {
                let bb = BucketBrigade::build(3, &decomp, "000").unwrap();
                std::hint::black_box(bb.circuit.num_gates());
            });
        });
    }
}

fn benchmark_remove(c: &mut Criterion) {
    let decomp = BucketBrigadeDecomp::resolve("1").unwrap();
    let bb = BucketBrigade::build(3, &decomp, "000").unwrap();
    c.bench_function("remove_half_the_t_gates_3q", |b| {
        b.iter(|| {
            let mut circuit = bb.circuit.clone();
            let plan = GateRemover::new(GType::T)
                .seed(1337)
                .fraction(0.5)
                .remove_gates(&mut circuit)
                .unwrap();
            std::hint::black_box(plan.len());
        });
    });
}

fn benchmark_sample(c: &mut Criterion) {
    let decomp = BucketBrigadeDecomp::resolve("2").unwrap();
    let bb = BucketBrigade::build(2, &decomp, "10").unwrap();
    let measured = bb.layout.address_qubits();
    c.bench_function("sample_brigade_2q_1000_shots", |b| {
        b.iter(|| {
            let mut sampler = Sampler::new();
            sampler.seed(1337).shots(1000);
            std::hint::black_box(sampler.run(&bb.circuit, &measured).unwrap());
        });
    });
}

criterion_group!(benches, benchmark_build, benchmark_remove, benchmark_sample);
criterion_main!(benches);
