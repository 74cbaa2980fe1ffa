//! Benchmarks for the Platter machine.
//!
//! Run with: `cargo bench` in the core/ directory.
//!
//! Benchmark groups:
//! 1. arithmetic_loop: a counting loop, dominated by dispatch
//! 2. alloc_free: allocation and abandonment churn through the free-list

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use platter_core::api::ExecutionOptions;
use platter_core::vm::{BufferChannel, Instruction, Machine, Platter, Reg};

fn r(index: u8) -> Reg {
    Reg::new(index)
}

/// A loop that decrements r1 from `iterations` to zero, with `body` spliced
/// in at the top of the loop. The loop starts at platter 3.
fn countdown(iterations: u32, body: &[Platter]) -> Vec<Platter> {
    let loop_start = 3;
    let exit = loop_start + body.len() as u32 + 6;
    let mut program = vec![
        Instruction::Orthography { a: r(1), value: iterations }.encode(),
        Instruction::Orthography { a: r(2), value: 1 }.encode(),
        Instruction::NotAnd { a: r(3), b: r(0), c: r(0) }.encode(),
    ];
    program.extend_from_slice(body);
    program.extend_from_slice(&[
        Instruction::Addition { a: r(1), b: r(1), c: r(3) }.encode(),
        Instruction::Orthography { a: r(5), value: exit }.encode(),
        Instruction::Orthography { a: r(6), value: loop_start }.encode(),
        Instruction::ConditionalMove { a: r(5), b: r(6), c: r(1) }.encode(),
        Instruction::LoadProgram { b: r(0), c: r(5) }.encode(),
        // Padding so that `exit` lands on the Halt.
        Instruction::Halt.encode(),
        Instruction::Halt.encode(),
    ]);
    program
}

fn run(program: &[Platter]) -> u64 {
    let mut machine = Machine::new(
        program.to_vec(),
        BufferChannel::new(),
        ExecutionOptions::default(),
    );
    machine.run().unwrap().cycles
}

fn bench_arithmetic_loop(c: &mut Criterion) {
    let mut group = c.benchmark_group("arithmetic_loop");

    for iterations in [1_000u32, 10_000, 100_000] {
        let program = countdown(
            iterations,
            &[Instruction::Multiplication { a: r(4), b: r(1), c: r(1) }.encode()],
        );
        group.throughput(Throughput::Elements(u64::from(iterations)));
        group.bench_with_input(
            BenchmarkId::from_parameter(iterations),
            &program,
            |b, program| b.iter(|| black_box(run(program))),
        );
    }

    group.finish();
}

fn bench_alloc_free(c: &mut Criterion) {
    let mut group = c.benchmark_group("alloc_free");

    for iterations in [1_000u32, 10_000] {
        let program = countdown(
            iterations,
            &[
                Instruction::Allocation { b: r(4), c: r(2) }.encode(),
                Instruction::Abandonment { c: r(4) }.encode(),
            ],
        );
        group.throughput(Throughput::Elements(u64::from(iterations)));
        group.bench_with_input(
            BenchmarkId::from_parameter(iterations),
            &program,
            |b, program| b.iter(|| black_box(run(program))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_arithmetic_loop, bench_alloc_free);
criterion_main!(benches);
